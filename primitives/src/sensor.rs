use serde::{Deserialize, Serialize};

use crate::{MapId, OwnerId, SectorId, SensorId};

/// A physical detector placed on a map, inside one of the map's sectors.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Sensor {
    pub sensor_id: SensorId,
    pub name: String,
    pub pos_x: f64,
    pub pos_y: f64,
    pub map_id: MapId,
    pub sector_id: SectorId,
    pub owner: OwnerId,
}

/// The mutable subset of a [`Sensor`], applied as a whole on update.
///
/// `sensor_id` and `owner` are fixed for the lifetime of the record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SensorUpdate {
    pub name: String,
    pub pos_x: f64,
    pub pos_y: f64,
    pub map_id: MapId,
    pub sector_id: SectorId,
}
