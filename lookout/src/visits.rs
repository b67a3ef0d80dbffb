//! Visit aggregation over notification histories.

use std::collections::{BTreeMap, HashMap};

use primitives::{lookout::SectorVisits, Notification, SectorId, SensorId, TagId};

/// Counts visits per sector from a timestamp-ordered notification list.
///
/// A tag visits a sector when it arrives there from a different sector.
/// Consecutive sightings in the same sector count once. The first
/// sighting of a tag sets the sector's count to 1, it does not add to
/// visits other tags already produced there.
///
/// Notifications from sensors missing from `sectors_by_sensor` (i.e.
/// not owned by the requesting tenant) are skipped.
pub fn count_visits(
    sectors_by_sensor: &HashMap<SensorId, SectorId>,
    notifications: &[Notification],
) -> Vec<SectorVisits> {
    let mut sector_visits: BTreeMap<SectorId, u64> = BTreeMap::new();
    let mut last_sector: HashMap<TagId, SectorId> = HashMap::new();

    for notification in notifications {
        let current_sector = match sectors_by_sensor.get(&notification.sensor_id) {
            Some(sector_id) => sector_id,
            None => continue,
        };

        match last_sector.get_mut(&notification.tag_id) {
            None => {
                sector_visits.insert(current_sector.clone(), 1);
                last_sector.insert(notification.tag_id.clone(), current_sector.clone());
            }
            Some(last) if last != current_sector => {
                *sector_visits.entry(current_sector.clone()).or_insert(0) += 1;
                *last = current_sector.clone();
            }
            // still in the same sector
            Some(_) => {}
        }
    }

    sector_visits
        .into_iter()
        .map(|(sector_id, visits)| SectorVisits { sector_id, visits })
        .collect()
}
