#![deny(rust_2018_idioms)]
#![deny(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod ids;
pub mod lookout;
pub mod map;
pub mod notification;
pub mod query;
pub mod sensor;
pub mod tag;
pub mod timestamp;
pub mod util {
    pub mod logging;
}

#[cfg(feature = "mongo")]
#[cfg_attr(docsrs, doc(cfg(feature = "mongo")))]
pub mod mongo;

#[cfg(any(test, feature = "test-util"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-util")))]
pub mod test_util;

pub use self::config::Config;
pub use self::ids::{MapId, OwnerId, SectorId, SensorId, TagId};
pub use self::map::{Map, Sector};
pub use self::notification::Notification;
pub use self::query::{Constraint, Filter, Value};
pub use self::sensor::{Sensor, SensorUpdate};
pub use self::tag::Tag;
pub use self::timestamp::TimestampFilter;
