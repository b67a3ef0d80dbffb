use mongodb::{Client, Collection, Database};

use primitives::{Config, Map, Notification, Sector, Sensor, Tag};

pub use mongodb::error::Error as StoreError;

pub mod map;
pub mod notification;
pub mod sensor;
pub mod tag;

/// Handle to the application database and its typed collections.
#[derive(Debug, Clone)]
pub struct Store {
    database: Database,
}

impl Store {
    /// Connects to the database from the [`Config`].
    ///
    /// The driver connects lazily, a bad `database_url` only shows up
    /// on the first operation.
    pub async fn connect(config: &Config) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&config.database_url).await?;

        Ok(Self {
            database: client.database(&config.database_name),
        })
    }

    pub fn with_database(database: Database) -> Self {
        Self { database }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub(crate) fn notifications(&self) -> Collection<Notification> {
        self.database.collection("notifications")
    }

    pub(crate) fn sensors(&self) -> Collection<Sensor> {
        self.database.collection("sensors")
    }

    pub(crate) fn tags(&self) -> Collection<Tag> {
        self.database.collection("tags")
    }

    pub(crate) fn maps(&self) -> Collection<Map> {
        self.database.collection("maps")
    }

    pub(crate) fn sectors(&self) -> Collection<Sector> {
        self.database.collection("sectors")
    }
}
