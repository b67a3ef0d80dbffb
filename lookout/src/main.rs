#![deny(clippy::all)]
#![deny(rust_2018_idioms)]

use std::{net::SocketAddr, time::Duration};

use clap::{crate_version, Arg, Command};
use slog::info;

use adapter::{dummy, Authenticator, Dummy, Mongo};
use lookout::{
    application::EnvConfig, broker, db::Store, ingestion::Ingestor, Application,
};
use primitives::{config::configuration, util::logging::new_logger, OwnerId};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Command::new("Lookout")
        .version(crate_version!())
        .arg(
            Arg::new("config")
                .long("config")
                .help("the Toml configuration file of the server")
                .takes_value(true),
        )
        .arg(
            Arg::new("adapter")
                .short('a')
                .long("adapter")
                .help("the adapter for authenticating API requests")
                .default_value("mongo")
                .possible_values(["mongo", "dummy"])
                .takes_value(true),
        )
        .get_matches();

    let env_config = EnvConfig::from_env()?;
    let config = configuration(env_config.env, cli.value_of("config"))?;

    let logger = new_logger("lookout");
    let store = Store::connect(&config).await?;

    let socket_addr = SocketAddr::new(env_config.ip_addr, env_config.port);

    match cli.value_of("adapter").expect("clap provides a default") {
        "mongo" => {
            let adapter = Mongo::new(store.database());

            run(Application::new(adapter, config, logger, store), socket_addr).await
        }
        "dummy" => {
            let auth_tokens = vec![("AUTH_dev".to_string(), OwnerId::new("dev"))]
                .into_iter()
                .collect();
            let adapter = Dummy::init(dummy::Options { auth_tokens });

            run(Application::new(adapter, config, logger, store), socket_addr).await
        }
        _ => unreachable!("clap validates the possible values"),
    }

    Ok(())
}

async fn run<A: Authenticator + 'static>(app: Application<A>, socket_addr: SocketAddr) {
    info!(&app.logger, "Subscribing to broker"; "host" => &app.config.broker_host, "topic" => &app.config.broker_topic);

    let (client, eventloop) = broker::connect(&app.config);
    let ingestor = Ingestor::new(app.store.clone(), app.logger.clone());
    let listener = tokio::spawn(broker::listen(
        client.clone(),
        eventloop,
        ingestor,
        app.config.broker_topic.clone(),
        Duration::from_millis(app.config.broker_retry_interval),
        app.logger.clone(),
    ));

    app.run(socket_addr).await;

    // the HTTP server has shut down, tear the broker task down as well
    listener.abort();
    let _ = client.disconnect().await;
}
