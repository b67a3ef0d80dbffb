use serde::{Deserialize, Serialize};

use crate::{OwnerId, TagId};

/// A trackable tag. Records are created lazily, the first time a
/// detection for the tag is ingested.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub tag_id: TagId,
    #[serde(default)]
    pub name: String,
    pub owner: OwnerId,
}
