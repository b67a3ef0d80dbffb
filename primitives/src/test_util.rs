//! Shared fixtures for tests across the workspace.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::{Map, MapId, Notification, OwnerId, Sector, SectorId, Sensor, SensorId, TagId};

/// The tenant most fixtures belong to.
pub static OWNER: Lazy<OwnerId> = Lazy::new(|| OwnerId::new("acme"));
/// A second tenant, for isolation tests.
pub static OTHER_OWNER: Lazy<OwnerId> = Lazy::new(|| OwnerId::new("globex"));

/// Bearer tokens accepted by the dummy authenticator, mapped to the
/// owner they authenticate as.
pub static DUMMY_AUTH: Lazy<HashMap<String, OwnerId>> = Lazy::new(|| {
    vec![
        ("AUTH_acme".to_string(), OWNER.clone()),
        ("AUTH_globex".to_string(), OTHER_OWNER.clone()),
    ]
    .into_iter()
    .collect()
});

pub static DUMMY_MAP: Lazy<Map> = Lazy::new(|| Map {
    map_id: MapId::new("floor-1"),
    name: "First floor".to_string(),
    owner: OWNER.clone(),
});

pub static DUMMY_SECTORS: Lazy<Vec<Sector>> = Lazy::new(|| {
    ["entrance", "workshop", "storage"]
        .into_iter()
        .map(|sector_id| Sector {
            sector_id: SectorId::new(sector_id),
            map_id: DUMMY_MAP.map_id.clone(),
            name: sector_id.to_string(),
            owner: OWNER.clone(),
        })
        .collect()
});

/// A sensor of [`OWNER`] placed in the given sector of [`DUMMY_MAP`].
pub fn dummy_sensor(sensor_id: &str, sector_id: &str) -> Sensor {
    Sensor {
        sensor_id: SensorId::new(sensor_id),
        name: format!("Sensor {}", sensor_id),
        pos_x: 1.0,
        pos_y: 2.0,
        map_id: DUMMY_MAP.map_id.clone(),
        sector_id: SectorId::new(sector_id),
        owner: OWNER.clone(),
    }
}

/// A notification with an explicit timestamp, for deterministic
/// aggregation tests.
pub fn detection(tag_id: &str, sensor_id: &str, timestamp: i64) -> Notification {
    Notification {
        tag_id: TagId::new(tag_id),
        sensor_id: SensorId::new(sensor_id),
        timestamp,
    }
}
