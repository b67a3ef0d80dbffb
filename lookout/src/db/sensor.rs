use futures::TryStreamExt;
use mongodb::bson::{self, doc, Document};

use primitives::{Filter, OwnerId, Sensor, SensorId, SensorUpdate};

use super::{Store, StoreError};

/// All sensors belonging to the owner.
pub async fn list_sensors(store: &Store, owner: &OwnerId) -> Result<Vec<Sensor>, StoreError> {
    let filter = Filter::new().equals("owner", owner.as_str());

    let cursor = store.sensors().find(Document::from(&filter), None).await?;

    cursor.try_collect().await
}

pub async fn find_sensor(
    store: &Store,
    sensor_id: &SensorId,
    owner: &OwnerId,
) -> Result<Option<Sensor>, StoreError> {
    let filter = Filter::new()
        .equals("sensor_id", sensor_id.as_str())
        .equals("owner", owner.as_str());

    store.sensors().find_one(Document::from(&filter), None).await
}

/// Looks a sensor up by id alone. Sensor ids are unique across owners,
/// so this resolves the owner a detection belongs to.
pub async fn find_sensor_any_owner(
    store: &Store,
    sensor_id: &SensorId,
) -> Result<Option<Sensor>, StoreError> {
    let filter = Filter::new().equals("sensor_id", sensor_id.as_str());

    store.sensors().find_one(Document::from(&filter), None).await
}

pub async fn insert_sensor(store: &Store, sensor: &Sensor) -> Result<(), StoreError> {
    store.sensors().insert_one(sensor, None).await?;

    Ok(())
}

/// Applies the update to the owner's sensor, returning how many
/// documents matched (0 when the sensor does not exist).
pub async fn update_sensor(
    store: &Store,
    sensor_id: &SensorId,
    owner: &OwnerId,
    update: &SensorUpdate,
) -> Result<u64, StoreError> {
    let filter = Filter::new()
        .equals("sensor_id", sensor_id.as_str())
        .equals("owner", owner.as_str());

    let result = store
        .sensors()
        .update_one(
            Document::from(&filter),
            doc! { "$set": bson::to_document(update)? },
            None,
        )
        .await?;

    Ok(result.matched_count)
}

pub async fn delete_sensor(
    store: &Store,
    sensor_id: &SensorId,
    owner: &OwnerId,
) -> Result<u64, StoreError> {
    let filter = Filter::new()
        .equals("sensor_id", sensor_id.as_str())
        .equals("owner", owner.as_str());

    let result = store
        .sensors()
        .delete_one(Document::from(&filter), None)
        .await?;

    Ok(result.deleted_count)
}
