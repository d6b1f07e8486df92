#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Population scheduling: capacity resolution, elite waves and time-bucketed
//! regular waves for a single level.

use raid_pulse_core::{
    Command, Difficulty, GroupSize, LevelId, LevelProfile, PulseConfig, ScheduleMode, SpawnGroup,
    SpawnKind, TriggerWindow, WaveEvent,
};
use raid_pulse_system_grouping::{assign, partition};
use rand::Rng;

mod capacity;
mod timeline;

pub use capacity::{resolve_capacity, CapacityDecision};
pub use timeline::{build_times, FIRST_WAVE_SECONDS, WAVE_WINDOW_SECONDS};

const ELITE_WINDOW: TriggerWindow = TriggerWindow::new(60, 90);
const ELITE_DIFFICULTY: Difficulty = Difficulty::Hard;
const SECONDS_PER_MINUTE: u32 = 60;

/// Inputs describing the level being regenerated.
#[derive(Clone, Copy, Debug)]
pub struct LevelInputs<'a> {
    /// Level identifier.
    pub level: &'a LevelId,
    /// Static zone facts of the level.
    pub profile: &'a LevelProfile,
    /// Current raid duration in minutes.
    pub escape_time_limit_minutes: u32,
}

/// What a regeneration decided, for systems that run after the waves land.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleOutline {
    /// Drawn bot capacity.
    pub capacity: CapacityDecision,
    /// Trigger window of each regular wave, indexed by wave. Empty when the
    /// level schedules no regular waves.
    pub windows: Vec<TriggerWindow>,
}

/// Pure system that rebuilds a level's wave schedule from scratch.
#[derive(Debug, Default)]
pub struct WaveGeneration;

impl WaveGeneration {
    /// Emits the commands that reset the level, persist a freshly drawn bot
    /// capacity and append the new wave list.
    ///
    /// Returns the capacity decision and the per-wave trigger windows so
    /// callers can size and time follow-up systems.
    pub fn handle(
        &self,
        inputs: LevelInputs<'_>,
        config: &PulseConfig,
        rng: &mut impl Rng,
        out: &mut Vec<Command>,
    ) -> ScheduleOutline {
        let level = inputs.level;
        let profile = inputs.profile;
        out.push(Command::ResetSchedule {
            level: level.clone(),
        });

        let capacity = resolve_capacity(profile.max_bots(), config, rng);
        tracing::info!(
            level = %level,
            size = ?profile.traits().size,
            max_bots = profile.max_bots(),
            bot_max = capacity.value,
            multiplier = capacity.effective_multiplier(profile.max_bots()),
            "resolved bot capacity"
        );
        out.push(Command::SetBotCapacity {
            level: level.clone(),
            bot_max: capacity.value,
        });

        if profile.traits().schedule == ScheduleMode::BossOnly {
            tracing::debug!(level = %level, "boss-only level, no waves scheduled");
            return ScheduleOutline {
                capacity,
                windows: Vec::new(),
            };
        }

        let mut waves = elite_waves(profile);
        let raid_seconds = inputs
            .escape_time_limit_minutes
            .saturating_mul(SECONDS_PER_MINUTE);
        let times = build_times(config.assault_wave_count, raid_seconds);
        append_regular_waves(&mut waves, &times, profile, capacity.value, config, rng);
        let windows = times.iter().map(|&trigger| wave_window(trigger)).collect();

        if config.debug {
            tracing::debug!(level = %level, waves = waves.len(), ?times, "scheduled waves");
        }
        out.push(Command::AppendWaves {
            level: level.clone(),
            waves,
        });

        ScheduleOutline { capacity, windows }
    }
}

fn wave_window(trigger: u32) -> TriggerWindow {
    TriggerWindow::new(trigger, trigger.saturating_add(WAVE_WINDOW_SECONDS))
}

fn elite_waves(profile: &LevelProfile) -> Vec<WaveEvent> {
    let group_size = profile.traits().elite_group_size.get();
    let min_slots = u32::from(group_size > 1);

    profile
        .elite_zones()
        .iter()
        .zip(0u32..)
        .map(|(zone, number)| {
            WaveEvent::new(
                SpawnKind::Elite,
                zone.as_str(),
                ELITE_DIFFICULTY,
                number,
                GroupSize::new(min_slots, group_size),
                ELITE_WINDOW,
            )
        })
        .collect()
}

fn append_regular_waves(
    waves: &mut Vec<WaveEvent>,
    times: &[u32],
    profile: &LevelProfile,
    capacity: u32,
    config: &PulseConfig,
    rng: &mut impl Rng,
) {
    let zones = profile.regular_zones();
    let regular_group_size = profile
        .traits()
        .regular_group_size
        .unwrap_or(config.max_scav_group_size);
    let pmc_quota = config.pmc_quota(capacity);
    let combined_quota = pmc_quota.saturating_add(config.complementary_quota(capacity));
    let escalation_point = times.len() / 2;

    for (index, &trigger) in times.iter().enumerate() {
        let window = wave_window(trigger);

        let pmc_groups = zoned_groups(zones, pmc_quota, config.max_pmc_group_size, rng);
        let combined_groups = zoned_groups(zones, combined_quota, regular_group_size, rng);
        let combined_difficulty = if index < escalation_point {
            Difficulty::Normal
        } else {
            Difficulty::Hard
        };

        let batches = [
            (pmc_groups, config.pmc_bot_difficulty),
            (combined_groups, combined_difficulty),
        ];
        for (groups, difficulty) in batches {
            for group in groups {
                let number = next_number(waves);
                waves.push(WaveEvent::new(
                    SpawnKind::Assault,
                    group.zone(),
                    difficulty,
                    number,
                    GroupSize::new(0, group.size()),
                    window,
                ));
            }
        }
    }
}

fn zoned_groups(
    zones: &[String],
    quota: u32,
    max_group_size: std::num::NonZeroU32,
    rng: &mut impl Rng,
) -> Vec<SpawnGroup> {
    if quota == 0 {
        return Vec::new();
    }
    let groups = partition(quota, max_group_size, rng);
    assign(zones, &groups, rng)
}

fn next_number(waves: &[WaveEvent]) -> u32 {
    u32::try_from(waves.len()).unwrap_or(u32::MAX)
}
