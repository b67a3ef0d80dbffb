//! `/notifications` route handlers.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};

use adapter::Authenticator;
use primitives::{
    lookout::SuccessResponse, Filter, Sensor, SensorId, TagId, TimestampFilter,
};

use crate::{
    db::{
        notification::{delete_notifications, find_notifications},
        sensor::{find_sensor, list_sensors},
        tag::find_tag,
    },
    response::{list_response, ResponseError},
    visits::count_visits,
    Application, Auth,
};

/// `$or` over the owner's sensor ids, the ownership boundary of every
/// notification query.
fn owned_filter(sensors: &[Sensor]) -> Filter {
    sensors.iter().fold(Filter::new(), |filter, sensor| {
        filter.or(Filter::new().equals("sensor_id", sensor.sensor_id.as_str()))
    })
}

fn parse_range(timestamp: &str) -> Result<Filter, ResponseError> {
    let filter: TimestampFilter = timestamp
        .parse()
        .map_err(|error: primitives::timestamp::ParseError| {
            ResponseError::NotAcceptable(error.to_string())
        })?;

    Ok(Filter::from(&filter))
}

/// Parses the optional `:timestamp` tail of a route, where a missing
/// or blank segment means "no time constraint".
fn parse_optional_range(timestamp: Option<&str>) -> Result<Option<Filter>, ResponseError> {
    let filter = TimestampFilter::from_param(timestamp)
        .map_err(|error| ResponseError::NotAcceptable(error.to_string()))?;

    Ok(filter.as_ref().map(Filter::from))
}

/// `GET /notifications/`
pub async fn get_all<A: Authenticator>(
    Extension(app): Extension<Arc<Application<A>>>,
    Extension(auth): Extension<Auth>,
) -> Result<Response, ResponseError> {
    let sensors = list_sensors(&app.store, &auth.owner).await?;
    if sensors.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let notifications = find_notifications(
        &app.store,
        &owned_filter(&sensors),
        Some(app.config.notifications_find_limit),
    )
    .await?;

    Ok(list_response(notifications))
}

/// `GET /notifications/:timestamp`
pub async fn get_by_timestamp<A: Authenticator>(
    Extension(app): Extension<Arc<Application<A>>>,
    Extension(auth): Extension<Auth>,
    Path(timestamp): Path<String>,
) -> Result<Response, ResponseError> {
    let sensors = list_sensors(&app.store, &auth.owner).await?;
    if sensors.is_empty() {
        return Err(ResponseError::NotAcceptable("no sensors found".to_string()));
    }

    let filter = owned_filter(&sensors).merge(parse_range(&timestamp)?);

    let notifications = find_notifications(
        &app.store,
        &filter,
        Some(app.config.notifications_find_limit),
    )
    .await?;

    Ok(list_response(notifications))
}

async fn sensor_notifications<A: Authenticator>(
    app: &Application<A>,
    auth: &Auth,
    sensor_id: &SensorId,
    timestamp: Option<&str>,
) -> Result<Response, ResponseError> {
    if find_sensor(&app.store, sensor_id, &auth.owner)
        .await?
        .is_none()
    {
        return Err(ResponseError::NotAcceptable(format!(
            "no sensor '{}' found",
            sensor_id
        )));
    }

    let mut filter = Filter::new().equals("sensor_id", sensor_id.as_str());
    if let Some(range) = parse_optional_range(timestamp)? {
        filter = filter.merge(range);
    }

    let notifications = find_notifications(
        &app.store,
        &filter,
        Some(app.config.notifications_find_limit),
    )
    .await?;

    Ok(list_response(notifications))
}

/// `GET /notifications/sensor/:sensor_id`
pub async fn get_for_sensor<A: Authenticator>(
    Extension(app): Extension<Arc<Application<A>>>,
    Extension(auth): Extension<Auth>,
    Path(sensor_id): Path<SensorId>,
) -> Result<Response, ResponseError> {
    sensor_notifications(&app, &auth, &sensor_id, None).await
}

/// `GET /notifications/sensor/:sensor_id/:timestamp`
pub async fn get_for_sensor_in_range<A: Authenticator>(
    Extension(app): Extension<Arc<Application<A>>>,
    Extension(auth): Extension<Auth>,
    Path((sensor_id, timestamp)): Path<(SensorId, String)>,
) -> Result<Response, ResponseError> {
    sensor_notifications(&app, &auth, &sensor_id, Some(&timestamp)).await
}

async fn tag_notifications<A: Authenticator>(
    app: &Application<A>,
    auth: &Auth,
    tag_id: &TagId,
    timestamp: Option<&str>,
) -> Result<Response, ResponseError> {
    if find_tag(&app.store, tag_id, &auth.owner).await?.is_none() {
        return Err(ResponseError::NotAcceptable(format!(
            "no tag '{}' found",
            tag_id
        )));
    }

    let mut filter = Filter::new().equals("tag_id", tag_id.as_str());
    if let Some(range) = parse_optional_range(timestamp)? {
        filter = filter.merge(range);
    }

    let notifications = find_notifications(
        &app.store,
        &filter,
        Some(app.config.notifications_find_limit),
    )
    .await?;

    Ok(list_response(notifications))
}

/// `GET /notifications/tag/:tag_id`
pub async fn get_for_tag<A: Authenticator>(
    Extension(app): Extension<Arc<Application<A>>>,
    Extension(auth): Extension<Auth>,
    Path(tag_id): Path<TagId>,
) -> Result<Response, ResponseError> {
    tag_notifications(&app, &auth, &tag_id, None).await
}

/// `GET /notifications/tag/:tag_id/:timestamp`
pub async fn get_for_tag_in_range<A: Authenticator>(
    Extension(app): Extension<Arc<Application<A>>>,
    Extension(auth): Extension<Auth>,
    Path((tag_id, timestamp)): Path<(TagId, String)>,
) -> Result<Response, ResponseError> {
    tag_notifications(&app, &auth, &tag_id, Some(&timestamp)).await
}

/// `GET /notifications/visit/:timestamp`
///
/// The notification query is filtered by time alone, ownership is
/// applied by the aggregator which skips sensors the caller does not
/// own.
pub async fn get_visits<A: Authenticator>(
    Extension(app): Extension<Arc<Application<A>>>,
    Extension(auth): Extension<Auth>,
    Path(timestamp): Path<String>,
) -> Result<Response, ResponseError> {
    let sensors = list_sensors(&app.store, &auth.owner).await?;
    if sensors.is_empty() {
        return Err(ResponseError::NotAcceptable("no sensors found".to_string()));
    }

    let range = parse_range(&timestamp)?;

    // No limit here: the tally folds over every notification in the
    // window, and a truncated slice would skew the counts.
    let notifications = find_notifications(&app.store, &range, None).await?;
    if notifications.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let sectors_by_sensor: HashMap<_, _> = sensors
        .into_iter()
        .map(|sensor| (sensor.sensor_id, sensor.sector_id))
        .collect();

    Ok(list_response(count_visits(
        &sectors_by_sensor,
        &notifications,
    )))
}

/// `DELETE /notifications/`
pub async fn delete_all<A: Authenticator>(
    Extension(app): Extension<Arc<Application<A>>>,
    Extension(auth): Extension<Auth>,
) -> Result<Response, ResponseError> {
    let sensors = list_sensors(&app.store, &auth.owner).await?;
    if sensors.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let deleted = delete_notifications(&app.store, &owned_filter(&sensors)).await?;
    if deleted > 0 {
        Ok(Json(SuccessResponse::new(format!(
            "{} notifications deleted",
            deleted
        )))
        .into_response())
    } else {
        Err(ResponseError::NotAcceptable(
            "no notifications deleted".to_string(),
        ))
    }
}

/// `DELETE /notifications/sensor/:sensor_id/:timestamp`
pub async fn delete_for_sensor<A: Authenticator>(
    Extension(app): Extension<Arc<Application<A>>>,
    Extension(auth): Extension<Auth>,
    Path((sensor_id, timestamp)): Path<(SensorId, String)>,
) -> Result<Response, ResponseError> {
    if find_sensor(&app.store, &sensor_id, &auth.owner)
        .await?
        .is_none()
    {
        return Err(ResponseError::NotAcceptable(format!(
            "no sensor '{}' found",
            sensor_id
        )));
    }

    let filter = Filter::new()
        .equals("sensor_id", sensor_id.as_str())
        .merge(parse_range(&timestamp)?);

    let deleted = delete_notifications(&app.store, &filter).await?;
    if deleted > 0 {
        Ok(Json(SuccessResponse::new(format!(
            "{} notifications deleted",
            deleted
        )))
        .into_response())
    } else {
        Err(ResponseError::NotAcceptable(
            "no notifications deleted".to_string(),
        ))
    }
}
