#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Allocation of PMC boss squads across the level's assault windows.

use raid_pulse_core::{
    BossFaction, BossSpawnEntry, Command, LevelId, LevelProfile, PulseConfig, SpawnGroup,
    TriggerWindow,
};
use raid_pulse_system_grouping::{assign, partition};
use rand::Rng;

/// Pure system that schedules PMC boss squads on a freshly regenerated level.
#[derive(Debug, Default)]
pub struct BossAllocation;

impl BossAllocation {
    /// Emits an [`Command::AppendBossSpawns`] batch sized from `capacity`.
    ///
    /// `windows` holds the trigger window of each regular wave in wave order;
    /// batch `k` is timed against `windows[k]` and spawns immediately when
    /// there is no such window. Nothing is emitted when the quota or the
    /// configured wave count is zero.
    #[allow(clippy::too_many_arguments)]
    pub fn handle(
        &self,
        level: &LevelId,
        profile: &LevelProfile,
        capacity: u32,
        windows: &[TriggerWindow],
        config: &PulseConfig,
        rng: &mut impl Rng,
        out: &mut Vec<Command>,
    ) {
        let quota = config.pmc_quota(capacity);
        if quota == 0 {
            tracing::error!(
                level = %level,
                capacity,
                pmc_percentage = config.pmc_percentage,
                "boss quota is zero, no PMC squads scheduled"
            );
            return;
        }
        if config.assault_wave_count == 0 {
            tracing::debug!(level = %level, "no assault windows configured, skipping PMC squads");
            return;
        }

        let groups = partition(quota, config.max_pmc_group_size, rng);
        let assigned = assign(profile.regular_zones(), &groups, rng);

        let mut spawns = Vec::with_capacity(assigned.len());
        for (window_index, batch) in split_across_windows(&assigned, config.assault_wave_count)
            .into_iter()
            .enumerate()
        {
            let window = windows.get(window_index).copied();
            if window.is_none() && !batch.is_empty() {
                tracing::warn!(
                    level = %level,
                    window = window_index,
                    squads = batch.len(),
                    "assault window not found, squads spawn immediately"
                );
            }
            for group in batch {
                spawns.push(squad(group, window, config, rng));
            }
        }

        tracing::debug!(level = %level, quota, squads = spawns.len(), "allocated PMC squads");
        out.push(Command::AppendBossSpawns {
            level: level.clone(),
            spawns,
        });
    }
}

fn squad(
    group: &SpawnGroup,
    window: Option<TriggerWindow>,
    config: &PulseConfig,
    rng: &mut impl Rng,
) -> BossSpawnEntry {
    let faction = if rng.gen_bool(0.5) {
        BossFaction::Bear
    } else {
        BossFaction::Usec
    };
    let entry = BossSpawnEntry::new(faction, group.size(), config.pmc_bot_difficulty, group.zone())
        .with_chance(config.boss_spawn_chance_percent);

    match window {
        Some(window) => {
            let (min, max) = (window.min_seconds(), window.max_seconds());
            let seconds = if max > min { rng.gen_range(min..=max) } else { min };
            entry.with_randomized_time(seconds)
        }
        None => entry,
    }
}

/// Slices `groups` into `window_count` batches; the first batch absorbs the remainder.
fn split_across_windows(groups: &[SpawnGroup], window_count: u32) -> Vec<&[SpawnGroup]> {
    let count = usize::try_from(window_count).unwrap_or(usize::MAX).max(1);
    let per_window = groups.len() / count;
    let first = per_window + groups.len() % count;

    let mut batches = Vec::with_capacity(count.min(groups.len().max(1)));
    let (head, mut rest) = groups.split_at(first);
    batches.push(head);
    while batches.len() < count && !rest.is_empty() {
        let (batch, tail) = rest.split_at(per_window);
        batches.push(batch);
        rest = tail;
    }
    batches
}
