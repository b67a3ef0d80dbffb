use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{SensorId, TagId};

/// A single sighting of a tag by a sensor.
///
/// `timestamp` is Unix milliseconds, assigned by the server when the
/// detection is ingested rather than trusted from the device.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub tag_id: TagId,
    pub sensor_id: SensorId,
    pub timestamp: i64,
}

impl Notification {
    /// Creates a notification stamped with the current server time.
    pub fn stamped(tag_id: TagId, sensor_id: SensorId) -> Self {
        Self {
            tag_id,
            sensor_id,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}
