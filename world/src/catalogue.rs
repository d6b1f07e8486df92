//! Static zone facts derived once from the level database.

use std::collections::{BTreeMap, BTreeSet};

use raid_pulse_core::{LevelId, LevelProfile, LevelTraits, PlayerBounds};

use crate::{query, LevelRecord, World};

/// Generic zone name appended to levels with too few named zones.
pub const PLACEHOLDER_ZONE: &str = "BotZone";

const SPARSE_ZONE_THRESHOLD: usize = 5;
const PLACEHOLDER_PADDING: usize = 9;
const DEFAULT_MIN_PLAYERS: u32 = 8;
const DEFAULT_MAX_PLAYERS: u32 = 10;

/// Read-only profiles of every level, keyed by identifier.
#[derive(Clone, Debug, Default)]
pub struct ZoneCatalogue {
    profiles: BTreeMap<LevelId, LevelProfile>,
}

impl ZoneCatalogue {
    /// Builds a profile for every level currently stored in the world.
    #[must_use]
    pub fn from_world(world: &World) -> Self {
        let profiles = query::levels(world)
            .map(|record| {
                let cap = query::capacity_cap(world, record.id());
                (record.id().clone(), build_profile(record, cap))
            })
            .collect();
        Self { profiles }
    }

    /// Profile of the provided level.
    #[must_use]
    pub fn profile(&self, level: &LevelId) -> Option<&LevelProfile> {
        self.profiles.get(level)
    }

    /// Iterates every profile in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&LevelId, &LevelProfile)> {
        self.profiles.iter()
    }

    /// Number of profiled levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether no level was profiled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Derives the zone profile of a single level.
///
/// The raw bot capacity comes from the record; when the record carries none,
/// the capacity-cap table entry is used instead.
#[must_use]
pub fn build_profile(record: &LevelRecord, capacity_cap: Option<u32>) -> LevelProfile {
    let traits = LevelTraits::for_level(record.id());
    let named = named_zones(record.spawn_zones());

    let elite_zones: BTreeSet<String> = named
        .iter()
        .filter(|zone| zone.contains(LevelTraits::elite_zone_marker()))
        .cloned()
        .collect();

    let mut regular_zones: Vec<String> = named
        .into_iter()
        .filter(|zone| !zone.contains(traits.excluded_zone_marker))
        .collect();
    if regular_zones.len() <= SPARSE_ZONE_THRESHOLD {
        regular_zones.extend(std::iter::repeat(PLACEHOLDER_ZONE.to_owned()).take(PLACEHOLDER_PADDING));
    }

    let players = PlayerBounds::new(
        record.min_players().unwrap_or(DEFAULT_MIN_PLAYERS),
        record.max_players().unwrap_or(DEFAULT_MAX_PLAYERS),
    );

    let max_bots = match record.bot_max() {
        0 => capacity_cap.unwrap_or(0),
        raw => raw,
    };

    LevelProfile::new(traits, elite_zones, regular_zones, players, max_bots)
}

/// Distinct non-blank zone names in sorted order.
fn named_zones(raw: &[String]) -> BTreeSet<String> {
    raw.iter()
        .map(|zone| zone.trim())
        .filter(|zone| !zone.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, zones: &[&str]) -> LevelRecord {
        LevelRecord::new(LevelId::new(id), 40).with_spawn_zones(zones.iter().copied())
    }

    #[test]
    fn sparse_levels_receive_placeholders() {
        let profile = build_profile(&record("woods", &["ZoneA", "ZoneB", "ZoneSnipe"]), None);
        assert_eq!(profile.elite_zones().len(), 1);
        assert_eq!(profile.regular_zones().len(), 2 + PLACEHOLDER_PADDING);
        assert_eq!(profile.regular_zones()[0], "ZoneA");
        assert!(profile.regular_zones()[2..]
            .iter()
            .all(|zone| zone == PLACEHOLDER_ZONE));
    }

    #[test]
    fn four_named_zones_pad_to_thirteen() {
        let profile = build_profile(&record("bigmap", &["Z1", "Z2", "Z3", "Z4"]), None);
        assert_eq!(profile.regular_zones().len(), 13);
    }

    #[test]
    fn padding_stops_above_five_zones() {
        let five = build_profile(&record("bigmap", &["Z1", "Z2", "Z3", "Z4", "Z5"]), None);
        assert_eq!(five.regular_zones().len(), 5 + PLACEHOLDER_PADDING);

        let six = build_profile(&record("bigmap", &["Z1", "Z2", "Z3", "Z4", "Z5", "Z6"]), None);
        assert_eq!(six.regular_zones().len(), 6);
        assert!(six.regular_zones().iter().all(|zone| zone != PLACEHOLDER_ZONE));
    }

    #[test]
    fn populated_levels_are_not_padded() {
        let zones = ["Z1", "Z2", "Z3", "Z4", "Z5", "Z6", "Z6", "", "  "];
        let profile = build_profile(&record("bigmap", &zones), None);
        assert_eq!(profile.regular_zones(), ["Z1", "Z2", "Z3", "Z4", "Z5", "Z6"]);
    }

    #[test]
    fn laboratory_excludes_gate_zones_but_keeps_snipe_zones() {
        let zones = ["ZoneGate1", "ZoneSnipeLab", "Z1", "Z2", "Z3", "Z4", "Z5"];
        let profile = build_profile(&record("laboratory", &zones), None);
        assert!(profile.regular_zones().iter().all(|zone| !zone.contains("Gate")));
        assert!(profile.regular_zones().iter().any(|zone| zone == "ZoneSnipeLab"));
        assert_eq!(profile.elite_zones().len(), 1);
    }

    #[test]
    fn capacity_falls_back_to_cap_table() {
        let empty = record("woods", &[]);
        assert_eq!(build_profile(&empty, Some(21)).max_bots(), 21);
        assert_eq!(build_profile(&empty, None).max_bots(), 0);

        let stored = record("woods", &[]).with_bot_max(14);
        assert_eq!(build_profile(&stored, Some(21)).max_bots(), 14);
    }

    #[test]
    fn player_bounds_default_when_missing() {
        let profile = build_profile(&record("woods", &[]), None);
        assert_eq!(profile.players(), PlayerBounds::new(8, 10));

        let bounded = record("woods", &[]).with_players(5, 7);
        assert_eq!(build_profile(&bounded, None).players(), PlayerBounds::new(5, 7));
    }

    #[test]
    fn catalogue_covers_every_level() {
        let mut world = World::new();
        let _ = world.insert_level(record("woods", &["ZoneA"]));
        let _ = world.insert_level(record("shoreline", &["ZoneSnipe1", "ZoneSnipe2"]));
        world.insert_capacity_cap(LevelId::new("woods"), 18);

        let catalogue = ZoneCatalogue::from_world(&world);
        assert_eq!(catalogue.len(), 2);
        let shoreline = catalogue
            .profile(&LevelId::new("shoreline"))
            .expect("shoreline profiled");
        assert_eq!(shoreline.max_elite_units(), 4);
        assert_eq!(
            catalogue
                .profile(&LevelId::new("woods"))
                .map(LevelProfile::max_bots),
            Some(18)
        );
    }
}
