use mongodb::{
    options::{ClientOptions, ServerAddress},
    Client,
};
use slog::{o, Discard, Logger};

use adapter::{dummy, Dummy};
use primitives::{config::DEVELOPMENT_CONFIG, test_util::DUMMY_AUTH};

use crate::{db::Store, Application};

pub fn discard_logger() -> Logger {
    Logger::root(Discard, o!())
}

pub async fn body_to_string(response: axum::response::Response) -> String {
    let body = hyper::body::to_bytes(response.into_body())
        .await
        .expect("Should read the response body");

    String::from_utf8(body.to_vec()).expect("Should be valid utf-8")
}

/// An [`Application`] with the [`Dummy`] authenticator and the
/// development config.
///
/// The database client is constructed but never contacted, the driver
/// connects lazily on the first operation.
pub fn setup_dummy_app() -> Application<Dummy> {
    let config = DEVELOPMENT_CONFIG.clone();
    let adapter = Dummy::init(dummy::Options {
        auth_tokens: DUMMY_AUTH.clone(),
    });

    let options = ClientOptions::builder()
        .hosts(vec![ServerAddress::Tcp {
            host: "localhost".to_string(),
            port: Some(27017),
        }])
        .build();
    let client = Client::with_options(options).expect("Should build the mongodb Client");
    let store = Store::with_database(client.database("lookout_test"));

    Application::new(adapter, config, discard_logger(), store)
}
