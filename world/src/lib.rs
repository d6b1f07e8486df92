#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative level database for Raid Pulse.
//!
//! The world owns every level record together with the tables that sit beside
//! them: the per-level capacity caps, the externally tracked custom-wave
//! overrides and the loot multipliers. Systems never touch these directly;
//! they submit [`Command`] values that [`apply`] executes, and observe the
//! resulting [`Event`] stream.

use std::collections::BTreeMap;

use raid_pulse_core::{
    BossSpawnEntry, Command, Event, ExitRecord, LevelId, LevelSettings, LootTable, Rejection,
    ScheduleState, WaveEvent,
};
use serde::{Deserialize, Serialize};

mod catalogue;

pub use catalogue::{build_profile, ZoneCatalogue, PLACEHOLDER_ZONE};

/// Mutable record of a single level as stored in the database.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelRecord {
    id: LevelId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    spawn_zones: Vec<String>,
    #[serde(default)]
    waves: Vec<WaveEvent>,
    #[serde(default)]
    boss_spawns: Vec<BossSpawnEntry>,
    #[serde(default)]
    bot_max: u32,
    escape_time_limit_minutes: u32,
    #[serde(default)]
    exits: Vec<ExitRecord>,
    #[serde(default)]
    open_zones: Vec<String>,
    #[serde(default)]
    min_players: Option<u32>,
    #[serde(default)]
    max_players: Option<u32>,
    #[serde(default)]
    settings: LevelSettings,
    #[serde(default)]
    state: ScheduleState,
}

impl LevelRecord {
    /// Creates an empty record with the provided raid duration.
    #[must_use]
    pub fn new(id: LevelId, escape_time_limit_minutes: u32) -> Self {
        Self {
            name: id.as_str().to_owned(),
            id,
            spawn_zones: Vec::new(),
            waves: Vec::new(),
            boss_spawns: Vec::new(),
            bot_max: 0,
            escape_time_limit_minutes,
            exits: Vec::new(),
            open_zones: Vec::new(),
            min_players: None,
            max_players: None,
            settings: LevelSettings::default(),
            state: ScheduleState::Uninitialized,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    /// Sets the raw zone names of the level's spawn points.
    #[must_use]
    pub fn with_spawn_zones<I, S>(self, zones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            spawn_zones: zones.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    /// Sets the raw bot capacity.
    #[must_use]
    pub fn with_bot_max(self, bot_max: u32) -> Self {
        Self { bot_max, ..self }
    }

    /// Sets the player bounds.
    #[must_use]
    pub fn with_players(self, min_players: u32, max_players: u32) -> Self {
        Self {
            min_players: Some(min_players),
            max_players: Some(max_players),
            ..self
        }
    }

    /// Sets the level's exits.
    #[must_use]
    pub fn with_exits(self, exits: Vec<ExitRecord>) -> Self {
        Self { exits, ..self }
    }

    /// Sets the level's pre-existing boss squads.
    #[must_use]
    pub fn with_boss_spawns(self, boss_spawns: Vec<BossSpawnEntry>) -> Self {
        Self {
            boss_spawns,
            ..self
        }
    }

    /// Sets the host-provided level settings.
    #[must_use]
    pub fn with_settings(self, settings: LevelSettings) -> Self {
        Self { settings, ..self }
    }

    /// Identifier of the level.
    #[must_use]
    pub const fn id(&self) -> &LevelId {
        &self.id
    }

    /// Display name of the level.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw zone names of every spawn point, duplicates and blanks included.
    #[must_use]
    pub fn spawn_zones(&self) -> &[String] {
        &self.spawn_zones
    }

    /// Scheduled waves in insertion order.
    #[must_use]
    pub fn waves(&self) -> &[WaveEvent] {
        &self.waves
    }

    /// Boss squads in list order.
    #[must_use]
    pub fn boss_spawns(&self) -> &[BossSpawnEntry] {
        &self.boss_spawns
    }

    /// Current bot capacity.
    #[must_use]
    pub const fn bot_max(&self) -> u32 {
        self.bot_max
    }

    /// Raid duration in minutes.
    #[must_use]
    pub const fn escape_time_limit_minutes(&self) -> u32 {
        self.escape_time_limit_minutes
    }

    /// Exits of the level.
    #[must_use]
    pub fn exits(&self) -> &[ExitRecord] {
        &self.exits
    }

    /// Zones opened for spawning.
    #[must_use]
    pub fn open_zones(&self) -> &[String] {
        &self.open_zones
    }

    /// Minimum player count, when the level defines one.
    #[must_use]
    pub const fn min_players(&self) -> Option<u32> {
        self.min_players
    }

    /// Maximum player count, when the level defines one.
    #[must_use]
    pub const fn max_players(&self) -> Option<u32> {
        self.max_players
    }

    /// Host-provided settings.
    #[must_use]
    pub const fn settings(&self) -> LevelSettings {
        self.settings
    }

    /// Lifecycle state of the generated schedule.
    #[must_use]
    pub const fn state(&self) -> ScheduleState {
        self.state
    }

    /// Number of boss squads belonging to the PMC factions.
    #[must_use]
    pub fn pmc_boss_count(&self) -> usize {
        self.boss_spawns
            .iter()
            .filter(|spawn| spawn.faction().is_pmc())
            .count()
    }
}

/// Externally tracked per-level wave overrides.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomWaves {
    /// Boss squad overrides.
    #[serde(default)]
    pub boss: Vec<BossSpawnEntry>,
    /// Regular wave overrides.
    #[serde(default)]
    pub normal: Vec<WaveEvent>,
}

impl CustomWaves {
    /// Whether no override is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boss.is_empty() && self.normal.is_empty()
    }
}

/// Per-level loot multipliers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LootMultipliers {
    /// Loose loot multipliers.
    #[serde(default)]
    pub loose: BTreeMap<LevelId, f64>,
    /// Container loot multipliers.
    #[serde(default, rename = "static")]
    pub container: BTreeMap<LevelId, f64>,
}

impl LootMultipliers {
    fn table(&self, table: LootTable) -> &BTreeMap<LevelId, f64> {
        match table {
            LootTable::Loose => &self.loose,
            LootTable::Static => &self.container,
        }
    }

    fn table_mut(&mut self, table: LootTable) -> &mut BTreeMap<LevelId, f64> {
        match table {
            LootTable::Loose => &mut self.loose,
            LootTable::Static => &mut self.container,
        }
    }

    fn scale(&mut self, table: LootTable, level: &LevelId, percent: u32) {
        let entry = self
            .table_mut(table)
            .entry(level.clone())
            .or_insert(DEFAULT_LOOT_MULTIPLIER);
        *entry = percent_of(*entry, percent);
    }
}

const DEFAULT_LOOT_MULTIPLIER: f64 = 1.0;

fn percent_of(value: f64, percent: u32) -> f64 {
    (value * f64::from(percent)).round() / 100.0
}

/// Represents the authoritative level database.
#[derive(Debug, Default)]
pub struct World {
    levels: BTreeMap<LevelId, LevelRecord>,
    capacity_caps: BTreeMap<LevelId, u32>,
    custom_waves: BTreeMap<LevelId, CustomWaves>,
    loot: LootMultipliers,
}

impl World {
    /// Creates an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a level record, returning the replaced one.
    pub fn insert_level(&mut self, record: LevelRecord) -> Option<LevelRecord> {
        self.levels.insert(record.id.clone(), record)
    }

    /// Seeds the capacity-cap table entry for a level.
    pub fn insert_capacity_cap(&mut self, level: LevelId, cap: u32) {
        let _ = self.capacity_caps.insert(level, cap);
    }

    /// Registers custom-wave overrides for a level.
    pub fn insert_custom_waves(&mut self, level: LevelId, waves: CustomWaves) {
        let _ = self.custom_waves.insert(level, waves);
    }

    /// Replaces the loot multiplier tables.
    pub fn set_loot_multipliers(&mut self, loot: LootMultipliers) {
        self.loot = loot;
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    let level = command.level().clone();
    let Some(record) = world.levels.get_mut(&level) else {
        out_events.push(Event::CommandRejected {
            level,
            reason: Rejection::UnknownLevel,
        });
        return;
    };

    match command {
        Command::OpenZones { zones, .. } => {
            let count = zones.len();
            record.open_zones = zones;
            out_events.push(Event::ZonesOpened { level, count });
        }
        Command::ResetSchedule { .. } => {
            let cleared_waves = record.waves.len();
            record.waves.clear();

            let before = record.boss_spawns.len();
            record.boss_spawns.retain(|spawn| !spawn.faction().is_pmc());
            let cleared_boss_spawns = before - record.boss_spawns.len();

            record.state = ScheduleState::Uninitialized;
            let _ = world
                .custom_waves
                .insert(level.clone(), CustomWaves::default());

            out_events.push(Event::ScheduleReset {
                level,
                cleared_waves,
                cleared_boss_spawns,
            });
        }
        Command::SetBotCapacity { bot_max, .. } => {
            let previous = record.bot_max;
            record.bot_max = bot_max;
            let _ = world.capacity_caps.insert(level.clone(), bot_max);
            out_events.push(Event::BotCapacityChanged {
                level,
                previous,
                current: bot_max,
            });
        }
        Command::AppendWaves { waves, .. } => {
            let count = waves.len();
            record.waves.extend(waves);
            out_events.push(Event::WavesAppended { level, count });
        }
        Command::AppendBossSpawns { spawns, .. } => {
            let count = spawns.len();
            record.boss_spawns.extend(spawns);
            out_events.push(Event::BossSpawnsAppended { level, count });
        }
        Command::ScaleLootMultiplier { table, percent, .. } => {
            world.loot.scale(table, &level, percent);
            out_events.push(Event::LootMultiplierScaled {
                level,
                table,
                percent,
            });
        }
        Command::SetRaidDuration { minutes, .. } => {
            record.escape_time_limit_minutes = minutes;
            out_events.push(Event::RaidDurationChanged { level, minutes });
        }
        Command::UpdateExit { change, .. } => {
            match record.exits.iter_mut().find(|exit| exit.name() == change.name) {
                Some(exit) => {
                    exit.apply(&change);
                    out_events.push(Event::ExitUpdated {
                        level,
                        exit: change.name,
                    });
                }
                None => out_events.push(Event::CommandRejected {
                    level,
                    reason: Rejection::UnknownExit(change.name),
                }),
            }
        }
        Command::TrimElapsedWaves {
            elapsed_seconds, ..
        } => {
            let before = record.waves.len();
            record.waves = std::mem::take(&mut record.waves)
                .into_iter()
                .filter(|wave| wave.window().max_seconds() > elapsed_seconds)
                .map(|wave| {
                    let window = wave.window().shifted_earlier(elapsed_seconds);
                    wave.with_window(window)
                })
                .collect();
            out_events.push(Event::WavesTrimmed {
                level,
                removed: before - record.waves.len(),
            });
        }
        Command::RemoveBossSpawns { count, .. } => {
            let before = record.boss_spawns.len();
            let mut remaining = count;
            record.boss_spawns.retain(|spawn| {
                if remaining > 0 && spawn.faction().is_pmc() {
                    remaining -= 1;
                    false
                } else {
                    true
                }
            });
            out_events.push(Event::BossSpawnsRemoved {
                level,
                removed: before - record.boss_spawns.len(),
            });
        }
        Command::SetScheduleState { state, .. } => {
            record.state = state;
            out_events.push(Event::ScheduleStateChanged { level, state });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use raid_pulse_core::{LevelId, LootTable};

    use super::{CustomWaves, LevelRecord, World};

    /// Retrieves a level record by identifier.
    #[must_use]
    pub fn level<'world>(world: &'world World, level: &LevelId) -> Option<&'world LevelRecord> {
        world.levels.get(level)
    }

    /// Iterates every level record in identifier order.
    pub fn levels(world: &World) -> impl Iterator<Item = &LevelRecord> {
        world.levels.values()
    }

    /// Identifiers of every known level in sorted order.
    #[must_use]
    pub fn level_ids(world: &World) -> Vec<LevelId> {
        world.levels.keys().cloned().collect()
    }

    /// Finds a level whose identifier or display name matches `name`, ignoring case.
    #[must_use]
    pub fn find_by_name<'world>(world: &'world World, name: &str) -> Option<&'world LevelRecord> {
        let by_id = LevelId::new(name);
        world.levels.get(&by_id).or_else(|| {
            world
                .levels
                .values()
                .find(|record| record.name().eq_ignore_ascii_case(name))
        })
    }

    /// Capacity-cap table entry for a level.
    #[must_use]
    pub fn capacity_cap(world: &World, level: &LevelId) -> Option<u32> {
        world.capacity_caps.get(level).copied()
    }

    /// Custom-wave overrides registered for a level.
    #[must_use]
    pub fn custom_waves<'world>(
        world: &'world World,
        level: &LevelId,
    ) -> Option<&'world CustomWaves> {
        world.custom_waves.get(level)
    }

    /// Loot multiplier of a level, when one is recorded.
    #[must_use]
    pub fn loot_multiplier(world: &World, table: LootTable, level: &LevelId) -> Option<f64> {
        world.loot.table(table).get(level).copied()
    }
}
