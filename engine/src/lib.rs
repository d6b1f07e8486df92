#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Orchestration of the scheduling systems against the level database.
//!
//! [`PulseEngine`] owns the [`World`], the cached [`ZoneCatalogue`] and the
//! configuration. It runs the pure systems, feeds their command batches to
//! [`raid_pulse_world::apply`] and exposes the result through the
//! [`WaveGenerator`] and [`RaidAdjuster`] capabilities.

use std::collections::BTreeSet;

use raid_pulse_core::{
    Command, ConfigError, Event, LevelId, PulseConfig, RaidAdjuster, RaidAdjustment,
    RebalanceError, RebalanceReport, RegenerationSummary, ScheduleError, ScheduleState,
    WaveGenerator,
};
use raid_pulse_system_boss_allocation::BossAllocation;
use raid_pulse_system_rebalancing::{LevelSnapshot, Rebalancing};
use raid_pulse_system_wave_generation::{LevelInputs, WaveGeneration};
use raid_pulse_world::{apply, query, LevelRecord, World, ZoneCatalogue};
use serde::Serialize;

mod seed;

/// Drives schedule regeneration and raid rebalancing for every level.
#[derive(Debug)]
pub struct PulseEngine {
    world: World,
    catalogue: ZoneCatalogue,
    config: PulseConfig,
    seed: u64,
    wave_generation: WaveGeneration,
    boss_allocation: BossAllocation,
    rebalancing: Rebalancing,
}

impl PulseEngine {
    /// Validates `config`, profiles every level and opens their spawn zones.
    pub fn new(world: World, config: PulseConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let catalogue = ZoneCatalogue::from_world(&world);
        let mut engine = Self {
            world,
            catalogue,
            config,
            seed,
            wave_generation: WaveGeneration,
            boss_allocation: BossAllocation,
            rebalancing: Rebalancing,
        };
        engine.open_zones();
        Ok(engine)
    }

    /// Read-only access to the level database.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Cached zone profiles.
    #[must_use]
    pub const fn catalogue(&self) -> &ZoneCatalogue {
        &self.catalogue
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &PulseConfig {
        &self.config
    }

    /// Consumes the engine and returns the level database.
    #[must_use]
    pub fn into_world(self) -> World {
        self.world
    }

    fn open_zones(&mut self) {
        let mut commands = Vec::with_capacity(self.catalogue.len());
        for (level, profile) in self.catalogue.iter() {
            let zones: BTreeSet<&String> = profile
                .elite_zones()
                .iter()
                .chain(profile.regular_zones())
                .collect();
            commands.push(Command::OpenZones {
                level: level.clone(),
                zones: zones.into_iter().cloned().collect(),
            });
        }
        execute(&mut self.world, commands);
    }
}

impl WaveGenerator for PulseEngine {
    fn regenerate_all_levels(&mut self) -> RegenerationSummary {
        let mut summary = RegenerationSummary::default();
        for level in query::level_ids(&self.world) {
            match self.regenerate_level(&level) {
                Ok(()) => summary.regenerated.push(level),
                Err(error) => {
                    tracing::error!(level = %level, %error, "level regeneration failed");
                    summary.failed.push((level, error));
                }
            }
        }
        tracing::info!(
            regenerated = summary.regenerated.len(),
            failed = summary.failed.len(),
            "regenerated level schedules"
        );
        summary
    }

    fn regenerate_level(&mut self, level: &LevelId) -> Result<(), ScheduleError> {
        let record = query::level(&self.world, level)
            .ok_or_else(|| ScheduleError::UnknownLevel(level.to_string()))?;
        let profile = self
            .catalogue
            .profile(level)
            .ok_or_else(|| ScheduleError::MissingProfile(level.clone()))?;
        let mut rng = seed::level_rng(self.seed, level);

        let mut commands = Vec::new();
        let outline = self.wave_generation.handle(
            LevelInputs {
                level,
                profile,
                escape_time_limit_minutes: record.escape_time_limit_minutes(),
            },
            &self.config,
            &mut rng,
            &mut commands,
        );
        execute(&mut self.world, commands);

        let mut commands = Vec::new();
        self.boss_allocation.handle(
            level,
            profile,
            outline.capacity.value,
            &outline.windows,
            &self.config,
            &mut rng,
            &mut commands,
        );
        commands.push(Command::SetScheduleState {
            level: level.clone(),
            state: ScheduleState::Scheduled,
        });
        execute(&mut self.world, commands);

        if let Some(record) = query::level(&self.world, level) {
            tracing::info!(
                level = %level,
                bot_max = record.bot_max(),
                waves = record.waves().len(),
                boss_spawns = record.boss_spawns().len(),
                "regenerated level schedule"
            );
            if self.config.debug {
                dump_schedule(record);
            }
        }
        Ok(())
    }

    fn regenerate_level_by_name(&mut self, name: &str) -> Result<(), ScheduleError> {
        let level = query::find_by_name(&self.world, name)
            .map(|record| record.id().clone())
            .ok_or_else(|| ScheduleError::UnknownLevel(name.to_owned()))?;
        self.regenerate_level(&level)
    }
}

impl RaidAdjuster for PulseEngine {
    fn apply_adjustment(
        &mut self,
        level: &LevelId,
        adjustment: &RaidAdjustment,
    ) -> Result<RebalanceReport, RebalanceError> {
        let record = query::level(&self.world, level)
            .ok_or_else(|| RebalanceError::UnknownLevel(level.clone()))?;

        let mut commands = Vec::new();
        let result = self.rebalancing.handle(
            LevelSnapshot {
                level,
                exits: record.exits(),
                boss_spawns: record.boss_spawns(),
                settings: record.settings(),
                state: record.state(),
            },
            adjustment,
            &mut commands,
        );
        execute(&mut self.world, commands);

        match &result {
            Ok(report) => tracing::info!(
                level = %level,
                removed = report.removed_boss_spawns,
                remaining = report.remaining_boss_spawns,
                waves_adjusted = report.waves_adjusted,
                "rebalanced level"
            ),
            Err(error) => tracing::warn!(level = %level, %error, "rebalance aborted"),
        }
        if self.config.debug {
            if let Some(record) = query::level(&self.world, level) {
                dump_schedule(record);
            }
        }
        result
    }
}

/// Applies `commands` in order, logging every emitted event.
fn execute(world: &mut World, commands: Vec<Command>) {
    let mut events = Vec::with_capacity(commands.len());
    for command in commands {
        apply(world, command, &mut events);
    }
    for event in &events {
        match event {
            Event::CommandRejected { level, reason } => {
                tracing::warn!(level = %level, ?reason, "command rejected");
            }
            other => tracing::trace!(event = ?other, "applied"),
        }
    }
}

#[derive(Serialize)]
struct ScheduleDump<'a> {
    level: &'a LevelId,
    state: ScheduleState,
    bot_max: u32,
    waves: &'a [raid_pulse_core::WaveEvent],
    boss_spawns: &'a [raid_pulse_core::BossSpawnEntry],
}

fn dump_schedule(record: &LevelRecord) {
    let dump = ScheduleDump {
        level: record.id(),
        state: record.state(),
        bot_max: record.bot_max(),
        waves: record.waves(),
        boss_spawns: record.boss_spawns(),
    };
    match serde_json::to_string(&dump) {
        Ok(json) => tracing::debug!(level = %record.id(), schedule = %json, "schedule dump"),
        Err(error) => tracing::warn!(level = %record.id(), %error, "schedule dump failed"),
    }
}
