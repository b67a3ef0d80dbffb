//! `/sensors` route handlers.

use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};

use adapter::Authenticator;
use primitives::{
    lookout::{CreateSensorRequest, SuccessResponse, UpdateSensorRequest},
    MapId, SectorId, Sensor, SensorId, SensorUpdate,
};

use crate::{
    db::{
        map::{map_exists, sector_exists},
        sensor::{
            delete_sensor, find_sensor, find_sensor_any_owner, insert_sensor, list_sensors,
            update_sensor,
        },
    },
    response::{list_response, ResponseError},
    Application, Auth,
};

fn required(field: &str, value: &str) -> Result<(), ResponseError> {
    if value.trim().is_empty() {
        Err(ResponseError::BadRequest(format!("{} is required", field)))
    } else {
        Ok(())
    }
}

/// Validates that the map and the sector referenced by a create or
/// update request exist for this owner.
async fn check_placement<A: Authenticator>(
    app: &Application<A>,
    auth: &Auth,
    map_id: &MapId,
    sector_id: &SectorId,
) -> Result<(), ResponseError> {
    if !map_exists(&app.store, map_id, &auth.owner).await? {
        return Err(ResponseError::BadRequest(format!(
            "no map '{}' found",
            map_id
        )));
    }

    if !sector_exists(&app.store, sector_id, map_id, &auth.owner).await? {
        return Err(ResponseError::BadRequest(format!(
            "no sector '{}' found on map '{}'",
            sector_id, map_id
        )));
    }

    Ok(())
}

/// `GET /sensors/`
pub async fn get_all<A: Authenticator>(
    Extension(app): Extension<Arc<Application<A>>>,
    Extension(auth): Extension<Auth>,
) -> Result<Response, ResponseError> {
    let sensors = list_sensors(&app.store, &auth.owner).await?;

    Ok(list_response(sensors))
}

/// `GET /sensors/:sensor_id`
///
/// Responds with the same `{ "response": [..] }` envelope as the list
/// endpoints, carrying at most one sensor. An unknown or foreign id
/// yields `204 No Content`.
pub async fn get_by_id<A: Authenticator>(
    Extension(app): Extension<Arc<Application<A>>>,
    Extension(auth): Extension<Auth>,
    Path(sensor_id): Path<SensorId>,
) -> Result<Response, ResponseError> {
    let sensor = find_sensor(&app.store, &sensor_id, &auth.owner).await?;

    Ok(list_response(sensor.into_iter().collect::<Vec<_>>()))
}

/// `POST /sensors/`
pub async fn create<A: Authenticator>(
    Extension(app): Extension<Arc<Application<A>>>,
    Extension(auth): Extension<Auth>,
    Json(request): Json<CreateSensorRequest>,
) -> Result<Response, ResponseError> {
    required("sensor_id", &request.sensor_id)?;
    required("map_id", &request.map_id)?;
    required("sector_id", &request.sector_id)?;

    let sensor_id = SensorId::new(request.sensor_id);
    let map_id = MapId::new(request.map_id);
    let sector_id = SectorId::new(request.sector_id);

    check_placement(&app, &auth, &map_id, &sector_id).await?;

    // ids are unique across owners, ingestion resolves sensors without
    // an owner filter
    if find_sensor_any_owner(&app.store, &sensor_id).await?.is_some() {
        return Err(ResponseError::NotAcceptable(format!(
            "sensor '{}' already exists",
            sensor_id
        )));
    }

    let sensor = Sensor {
        sensor_id,
        name: request.name,
        pos_x: request.pos_x.unwrap_or_default(),
        pos_y: request.pos_y.unwrap_or_default(),
        map_id,
        sector_id,
        owner: auth.owner.clone(),
    };
    insert_sensor(&app.store, &sensor).await?;

    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse::new(format!(
            "sensor '{}' created",
            sensor.sensor_id
        ))),
    )
        .into_response())
}

/// `PATCH /sensors/:sensor_id`
pub async fn update<A: Authenticator>(
    Extension(app): Extension<Arc<Application<A>>>,
    Extension(auth): Extension<Auth>,
    Path(sensor_id): Path<SensorId>,
    Json(request): Json<UpdateSensorRequest>,
) -> Result<Response, ResponseError> {
    required("map_id", &request.map_id)?;
    required("sector_id", &request.sector_id)?;

    let update = SensorUpdate {
        name: request.name,
        pos_x: request.pos_x.unwrap_or_default(),
        pos_y: request.pos_y.unwrap_or_default(),
        map_id: MapId::new(request.map_id),
        sector_id: SectorId::new(request.sector_id),
    };

    check_placement(&app, &auth, &update.map_id, &update.sector_id).await?;

    let matched = update_sensor(&app.store, &sensor_id, &auth.owner, &update).await?;
    if matched == 0 {
        return Err(ResponseError::NotAcceptable(format!(
            "no sensor '{}' found",
            sensor_id
        )));
    }

    Ok(Json(SuccessResponse::new(format!(
        "sensor '{}' updated",
        sensor_id
    )))
    .into_response())
}

/// `DELETE /sensors/:sensor_id`
pub async fn delete<A: Authenticator>(
    Extension(app): Extension<Arc<Application<A>>>,
    Extension(auth): Extension<Auth>,
    Path(sensor_id): Path<SensorId>,
) -> Result<Response, ResponseError> {
    let deleted = delete_sensor(&app.store, &sensor_id, &auth.owner).await?;
    if deleted == 0 {
        return Err(ResponseError::NotAcceptable(format!(
            "no sensor '{}' found",
            sensor_id
        )));
    }

    Ok(Json(SuccessResponse::new(format!(
        "sensor '{}' deleted",
        sensor_id
    )))
    .into_response())
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn required_rejects_empty_and_blank() {
        assert_eq!(Ok(()), required("sensor_id", "gate-1"));

        assert_eq!(
            Err(ResponseError::BadRequest("sensor_id is required".to_string())),
            required("sensor_id", "")
        );
        assert_eq!(
            Err(ResponseError::BadRequest("map_id is required".to_string())),
            required("map_id", "   ")
        );
    }

    #[tokio::test]
    async fn single_sensor_is_wrapped_in_the_list_envelope() {
        use primitives::{test_util::dummy_sensor, Sensor};

        use crate::test_util::body_to_string;

        let sensor = dummy_sensor("gate-1", "entrance");
        let response = list_response(Some(sensor.clone()).into_iter().collect::<Vec<_>>());
        assert_eq!(StatusCode::OK, response.status());

        let body: serde_json::Value = serde_json::from_str(&body_to_string(response).await)
            .expect("Should be valid JSON");
        assert_eq!(
            serde_json::json!({ "response": [sensor] }),
            body
        );

        let missing = list_response(Vec::<Sensor>::new());
        assert_eq!(StatusCode::NO_CONTENT, missing.status());
    }
}
