use serde::{Deserialize, Serialize};

use crate::{MapId, OwnerId, SectorId};

/// A floor plan that sensors are placed on.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Map {
    pub map_id: MapId,
    #[serde(default)]
    pub name: String,
    pub owner: OwnerId,
}

/// A region of a [`Map`]. Visits are counted per sector.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Sector {
    pub sector_id: SectorId,
    pub map_id: MapId,
    #[serde(default)]
    pub name: String,
    pub owner: OwnerId,
}
