//! Turns raw broker payloads into persisted notifications.

use async_trait::async_trait;
use slog::{debug, error, Logger};

use primitives::{lookout::DetectionMessage, Notification, OwnerId, Sensor, SensorId, Tag, TagId};

use crate::db::{
    notification::insert_notification,
    sensor::find_sensor_any_owner,
    tag::{find_tag, insert_tag},
    Store, StoreError,
};

/// The slice of the store the ingestion pipeline touches.
#[async_trait]
pub trait DetectionStore: Send + Sync {
    async fn sensor(&self, sensor_id: &SensorId) -> Result<Option<Sensor>, StoreError>;
    async fn tag(&self, tag_id: &TagId, owner: &OwnerId) -> Result<Option<Tag>, StoreError>;
    async fn create_tag(&self, tag: &Tag) -> Result<(), StoreError>;
    async fn create_notification(&self, notification: &Notification) -> Result<(), StoreError>;
}

#[async_trait]
impl DetectionStore for Store {
    async fn sensor(&self, sensor_id: &SensorId) -> Result<Option<Sensor>, StoreError> {
        find_sensor_any_owner(self, sensor_id).await
    }

    async fn tag(&self, tag_id: &TagId, owner: &OwnerId) -> Result<Option<Tag>, StoreError> {
        find_tag(self, tag_id, owner).await
    }

    async fn create_tag(&self, tag: &Tag) -> Result<(), StoreError> {
        insert_tag(self, tag).await
    }

    async fn create_notification(&self, notification: &Notification) -> Result<(), StoreError> {
        insert_notification(self, notification).await
    }
}

#[derive(Clone)]
pub struct Ingestor<S = Store> {
    store: S,
    logger: Logger,
}

impl<S: DetectionStore> Ingestor<S> {
    pub fn new(store: S, logger: Logger) -> Self {
        Self { store, logger }
    }

    /// Handles one raw broker payload.
    ///
    /// Malformed payloads are logged and dropped, the pipeline never
    /// stops over a single bad message. Store errors are logged and
    /// dropped as well, the detection is lost.
    pub async fn process(&self, payload: &[u8]) {
        let message: DetectionMessage = match serde_json::from_slice(payload) {
            Ok(message) => message,
            Err(error) => {
                debug!(&self.logger, "Dropping malformed detection payload"; "error" => %error);
                return;
            }
        };

        if let Err(error) = self.insert_detection(message).await {
            error!(&self.logger, "Failed to persist detection"; "error" => %error);
        }
    }

    async fn insert_detection(&self, message: DetectionMessage) -> Result<(), StoreError> {
        let sensor = match self.store.sensor(&message.sensor_id).await? {
            Some(sensor) => sensor,
            None => {
                debug!(
                    &self.logger,
                    "Dropping detection from unknown sensor";
                    "sensor_id" => %message.sensor_id,
                );
                return Ok(());
            }
        };

        // Tag records are created on first sight. The check and the
        // insert are not atomic, two concurrent detections of a brand
        // new tag may insert it twice.
        if self.store.tag(&message.tag_id, &sensor.owner).await?.is_none() {
            let tag = Tag {
                tag_id: message.tag_id.clone(),
                name: String::new(),
                owner: sensor.owner.clone(),
            };
            self.store.create_tag(&tag).await?;
        }

        let notification = Notification::stamped(message.tag_id, message.sensor_id);
        self.store.create_notification(&notification).await?;

        debug!(
            &self.logger,
            "Persisted detection";
            "tag_id" => %notification.tag_id,
            "sensor_id" => %notification.sensor_id,
            "timestamp" => notification.timestamp,
        );

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;
    use primitives::test_util::{dummy_sensor, OWNER};

    use crate::test_util::discard_logger;

    use super::*;

    /// In-memory [`DetectionStore`] recording what the pipeline writes.
    struct MemoryStore {
        sensors: Vec<Sensor>,
        tags: Mutex<Vec<Tag>>,
        notifications: Mutex<Vec<Notification>>,
    }

    impl MemoryStore {
        fn with_sensors(sensors: Vec<Sensor>) -> Self {
            Self {
                sensors,
                tags: Mutex::new(vec![]),
                notifications: Mutex::new(vec![]),
            }
        }
    }

    #[async_trait]
    impl DetectionStore for MemoryStore {
        async fn sensor(&self, sensor_id: &SensorId) -> Result<Option<Sensor>, StoreError> {
            Ok(self
                .sensors
                .iter()
                .find(|sensor| &sensor.sensor_id == sensor_id)
                .cloned())
        }

        async fn tag(&self, tag_id: &TagId, owner: &OwnerId) -> Result<Option<Tag>, StoreError> {
            Ok(self
                .tags
                .lock()
                .expect("Should lock")
                .iter()
                .find(|tag| &tag.tag_id == tag_id && &tag.owner == owner)
                .cloned())
        }

        async fn create_tag(&self, tag: &Tag) -> Result<(), StoreError> {
            self.tags.lock().expect("Should lock").push(tag.clone());
            Ok(())
        }

        async fn create_notification(&self, notification: &Notification) -> Result<(), StoreError> {
            self.notifications
                .lock()
                .expect("Should lock")
                .push(notification.clone());
            Ok(())
        }
    }

    fn detection_payload(tag_id: &str, sensor_id: &str) -> Vec<u8> {
        format!(
            r#"{{ "tag_id": "{}", "sensor_id": "{}" }}"#,
            tag_id, sensor_id
        )
        .into_bytes()
    }

    #[tokio::test]
    async fn unknown_sensor_drops_the_detection() {
        let ingestor = Ingestor::new(MemoryStore::with_sensors(vec![]), discard_logger());

        ingestor
            .process(&detection_payload("badge-1", "gate-1"))
            .await;

        assert!(ingestor.store.tags.lock().expect("Should lock").is_empty());
        assert!(ingestor
            .store
            .notifications
            .lock()
            .expect("Should lock")
            .is_empty());
    }

    #[tokio::test]
    async fn first_sighting_creates_the_tag_once() {
        let store = MemoryStore::with_sensors(vec![dummy_sensor("gate-1", "entrance")]);
        let ingestor = Ingestor::new(store, discard_logger());

        ingestor
            .process(&detection_payload("badge-1", "gate-1"))
            .await;
        ingestor
            .process(&detection_payload("badge-1", "gate-1"))
            .await;

        let tags = ingestor.store.tags.lock().expect("Should lock");
        assert_eq!(1, tags.len());
        assert_eq!(TagId::new("badge-1"), tags[0].tag_id);
        assert_eq!(*OWNER, tags[0].owner);

        let notifications = ingestor.store.notifications.lock().expect("Should lock");
        assert_eq!(2, notifications.len());
        assert!(notifications
            .iter()
            .all(|notification| notification.sensor_id == SensorId::new("gate-1")));
    }

    #[tokio::test]
    async fn malformed_payload_changes_nothing() {
        let store = MemoryStore::with_sensors(vec![dummy_sensor("gate-1", "entrance")]);
        let ingestor = Ingestor::new(store, discard_logger());

        ingestor.process(b"not json").await;
        ingestor.process(b"{ \"tag_id\": \"badge-1\" }").await;

        assert!(ingestor.store.tags.lock().expect("Should lock").is_empty());
        assert!(ingestor
            .store
            .notifications
            .lock()
            .expect("Should lock")
            .is_empty());
    }
}
