//! The REST API routers.
//!
//! Both routers are nested under their prefix by [`crate::router`] and
//! require an authenticated owner, route handlers never see a request
//! without an [`Auth`](crate::Auth) extension.

use axum::{
    middleware::from_fn,
    routing::get,
    Router,
};

use adapter::Authenticator;

use crate::middleware::auth::authentication_required;

pub mod notification;
pub mod sensor;

pub fn notifications_router<A: Authenticator + 'static>() -> Router {
    Router::new()
        .route(
            "/",
            get(notification::get_all::<A>).delete(notification::delete_all::<A>),
        )
        .route("/:timestamp", get(notification::get_by_timestamp::<A>))
        .route("/sensor/:sensor_id", get(notification::get_for_sensor::<A>))
        .route(
            "/sensor/:sensor_id/:timestamp",
            get(notification::get_for_sensor_in_range::<A>)
                .delete(notification::delete_for_sensor::<A>),
        )
        .route("/tag/:tag_id", get(notification::get_for_tag::<A>))
        .route(
            "/tag/:tag_id/:timestamp",
            get(notification::get_for_tag_in_range::<A>),
        )
        .route("/visit/:timestamp", get(notification::get_visits::<A>))
        .layer(from_fn(authentication_required))
}

pub fn sensors_router<A: Authenticator + 'static>() -> Router {
    Router::new()
        .route(
            "/",
            get(sensor::get_all::<A>).post(sensor::create::<A>),
        )
        .route(
            "/:sensor_id",
            get(sensor::get_by_id::<A>)
                .patch(sensor::update::<A>)
                .delete(sensor::delete::<A>),
        )
        .layer(from_fn(authentication_required))
}
