#![deny(rust_2018_idioms)]
#![deny(clippy::all)]

//! REST API server and detection ingestion pipeline for the sensor
//! notification system.
//!
//! The server exposes two route groups, `/notifications` and
//! `/sensors`, both scoped to the authenticated owner. The ingestion
//! side subscribes to an MQTT topic and persists every detection a
//! known sensor reports.

use std::sync::Arc;

use axum::{middleware::from_fn, Extension, Router};
use slog::Logger;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use adapter::Authenticator;
use primitives::{Config, OwnerId};

use crate::{
    db::Store,
    middleware::{auth::authenticate, error::log_internal_errors},
    routes::{notifications_router, sensors_router},
};

pub mod application;
pub mod broker;
pub mod db;
pub mod ingestion;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod visits;

#[cfg(test)]
pub mod test_util;

/// The shared state of the API server.
pub struct Application<A: Authenticator> {
    pub adapter: A,
    pub config: Config,
    pub logger: Logger,
    pub store: Store,
}

impl<A: Authenticator> Application<A> {
    pub fn new(adapter: A, config: Config, logger: Logger, store: Store) -> Self {
        Self {
            adapter,
            config,
            logger,
            store,
        }
    }
}

/// The authenticated tenant of the current request.
///
/// Inserted in the request extensions by
/// [`authenticate`](middleware::auth::authenticate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Auth {
    pub owner: OwnerId,
}

pub fn router<A: Authenticator + 'static>(app: Arc<Application<A>>) -> Router {
    Router::new()
        .nest("/notifications", notifications_router::<A>())
        .nest("/sensors", sensors_router::<A>())
        .layer(
            // keeps the order from top to bottom!
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(Extension(app))
                .layer(from_fn(log_internal_errors::<A, _>))
                .layer(from_fn(authenticate::<A, _>)),
        )
}
