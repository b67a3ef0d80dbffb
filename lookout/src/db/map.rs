use mongodb::bson::Document;

use primitives::{Filter, MapId, OwnerId, SectorId};

use super::{Store, StoreError};

pub async fn map_exists(
    store: &Store,
    map_id: &MapId,
    owner: &OwnerId,
) -> Result<bool, StoreError> {
    let filter = Filter::new()
        .equals("map_id", map_id.as_str())
        .equals("owner", owner.as_str());

    let found = store.maps().find_one(Document::from(&filter), None).await?;

    Ok(found.is_some())
}

/// Whether the sector exists on the given map of the owner.
pub async fn sector_exists(
    store: &Store,
    sector_id: &SectorId,
    map_id: &MapId,
    owner: &OwnerId,
) -> Result<bool, StoreError> {
    let filter = Filter::new()
        .equals("sector_id", sector_id.as_str())
        .equals("map_id", map_id.as_str())
        .equals("owner", owner.as_str());

    let found = store
        .sectors()
        .find_one(Document::from(&filter), None)
        .await?;

    Ok(found.is_some())
}
