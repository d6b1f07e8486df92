#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Quota partitioning and zone assignment shared by the scheduling systems.

use std::num::NonZeroU32;

use raid_pulse_core::SpawnGroup;
use rand::{seq::SliceRandom, Rng};

/// Splits `total` units into randomly sized groups of at most `max_group_size`.
///
/// Every group holds between one and `max_group_size` units and the groups sum
/// to exactly `total`. The final group absorbs whatever remains once a draw
/// overshoots the remaining budget, so it may be smaller than the draw.
pub fn partition(total: u32, max_group_size: NonZeroU32, rng: &mut impl Rng) -> Vec<u32> {
    let mut groups = Vec::new();
    let mut remaining = total;

    while remaining > 0 {
        let size = rng.gen_range(1..=max_group_size.get());
        if size > remaining {
            groups.push(remaining);
            break;
        }
        groups.push(size);
        remaining -= size;
    }

    groups
}

/// Binds groups to zones, one group per zone.
///
/// The zones are shuffled, then each zone takes the last unassigned group.
/// Assignment stops as soon as either zones or groups run out.
pub fn assign(zones: &[String], groups: &[u32], rng: &mut impl Rng) -> Vec<SpawnGroup> {
    let mut shuffled: Vec<&String> = zones.iter().collect();
    shuffled.shuffle(rng);

    let mut pending = groups.to_vec();
    let mut assigned = Vec::with_capacity(shuffled.len().min(pending.len()));
    for zone in shuffled {
        let Some(size) = pending.pop() else {
            break;
        };
        assigned.push(SpawnGroup::new(zone.as_str(), size));
    }

    assigned
}
