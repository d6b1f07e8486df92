use std::{collections::BTreeSet, num::NonZeroU32};

use proptest::prelude::*;
use raid_pulse_system_grouping::{assign, partition};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

proptest! {
    #[test]
    fn groups_sum_to_total_within_bounds(total in 0u32..500, max in 1u32..12, seed in any::<u64>()) {
        let max_group_size = NonZeroU32::new(max).expect("non-zero");
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let groups = partition(total, max_group_size, &mut rng);

        prop_assert_eq!(groups.iter().sum::<u32>(), total);
        prop_assert!(groups.iter().all(|size| (1..=max).contains(size)));
    }

    #[test]
    fn zones_are_never_reused(zone_count in 0usize..20, group_count in 0usize..20, seed in any::<u64>()) {
        let zones: Vec<String> = (0..zone_count).map(|index| format!("Zone{index}")).collect();
        let groups = vec![1u32; group_count];
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let assigned = assign(&zones, &groups, &mut rng);

        prop_assert_eq!(assigned.len(), zone_count.min(group_count));
        let distinct: BTreeSet<&str> = assigned.iter().map(|group| group.zone()).collect();
        prop_assert_eq!(distinct.len(), assigned.len());
    }
}

#[test]
fn partition_replays_under_fixed_seed() {
    let max = NonZeroU32::new(4).expect("non-zero");
    let first = partition(40, max, &mut ChaCha8Rng::seed_from_u64(0xC0FFEE));
    let second = partition(40, max, &mut ChaCha8Rng::seed_from_u64(0xC0FFEE));
    assert_eq!(first, second);
}
