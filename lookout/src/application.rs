use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
};

use serde::Deserialize;
use slog::{error, info, Logger};

use adapter::Authenticator;
use primitives::config::Environment;

/// an error used when deserializing an [`EnvConfig`] instance from
/// environment variables, see [`EnvConfig::from_env()`]
pub use envy::Error as EnvError;

use crate::{router, Application};

pub const DEFAULT_PORT: u16 = 8005;
pub const DEFAULT_IP_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0));

#[derive(Debug, Deserialize, Clone)]
pub struct EnvConfig {
    /// Defaults to `Development`: [`Environment::default()`]
    #[serde(default)]
    pub env: Environment,
    /// The port on which the REST API will be accessible.
    #[serde(default = "default_port")]
    /// Defaults to `8005`: [`DEFAULT_PORT`]
    pub port: u16,
    /// The address on which the REST API will be accessible.
    /// `0.0.0.0` can be used for Docker.
    /// `127.0.0.1` can be used for locally running servers.
    #[serde(default = "default_ip_addr")]
    /// Defaults to `0.0.0.0`: [`DEFAULT_IP_ADDR`]
    pub ip_addr: IpAddr,
}

impl EnvConfig {
    /// Deserialize the [`EnvConfig`] from Environment variables.
    pub fn from_env() -> Result<Self, EnvError> {
        envy::from_env()
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_ip_addr() -> IpAddr {
    DEFAULT_IP_ADDR
}

impl<A: Authenticator + 'static> Application<A> {
    /// Starts the `axum` server with graceful shutdown on `Ctrl+C`.
    pub async fn run(self, socket_addr: SocketAddr) {
        let logger = self.logger.clone();
        info!(&logger, "Listening on socket address: {}!", socket_addr);

        let server = axum::Server::bind(&socket_addr)
            .serve(router(Arc::new(self)).into_make_service())
            .with_graceful_shutdown(shutdown_signal(logger.clone()));

        if let Err(error) = server.await {
            error!(&logger, "server error: {}", error; "main" => "run");
        }
    }
}

async fn shutdown_signal(logger: Logger) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!(&logger, "Received Ctrl+C signal, shutting down.."),
        Err(error) => error!(&logger, "Failed to listen for Ctrl+C signal: {}", error),
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn environment() {
        let development = serde_json::from_value::<Environment>(json!("development"))
            .expect("Should deserialize");
        let production =
            serde_json::from_value::<Environment>(json!("production")).expect("Should deserialize");

        assert_eq!(Environment::Development, development);
        assert_eq!(Environment::Production, production);
    }
}
