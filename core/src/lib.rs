#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Raid Pulse engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative level database, and pure scheduling systems. Systems read
//! explicit inputs (a [`LevelProfile`], a [`PulseConfig`], slices queried from
//! the world) and respond exclusively with [`Command`] batches. The world
//! executes those commands via its `apply` entry point and broadcasts
//! [`Event`] values describing every mutation it performed.

use std::{collections::BTreeSet, fmt, num::NonZeroU32};

use serde::{Deserialize, Serialize};

mod config;
mod error;

pub use config::PulseConfig;
pub use error::{ConfigError, RebalanceError, ScheduleError};

/// Lower-cased identifier of a playable level.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct LevelId(String);

impl LevelId {
    /// Creates a new identifier, normalising it to lower case.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().to_lowercase())
    }

    /// Borrows the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for LevelId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<LevelId> for String {
    fn from(value: LevelId) -> Self {
        value.0
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rough footprint of a level, used when reporting capacity decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum LevelSize {
    /// Compact level whose capacity is bounded by its maximum player count.
    Small,
    /// Open level whose capacity is bounded by its minimum player count.
    Large,
}

/// Which parts of the population schedule a level receives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ScheduleMode {
    /// Elite waves, regular waves and boss squads.
    Full,
    /// Boss squads only; the wave list stays empty.
    BossOnly,
}

/// Per-level scheduling policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LevelTraits {
    /// Footprint of the level.
    pub size: LevelSize,
    /// Portion of the schedule generated for the level.
    pub schedule: ScheduleMode,
    /// Largest group an elite wave may spawn.
    pub elite_group_size: NonZeroU32,
    /// Whether every elite zone accounts for two elite units.
    pub doubled_elites: bool,
    /// Level-specific cap for combined regular groups, if any.
    pub regular_group_size: Option<NonZeroU32>,
    /// Zones whose name contains this marker are excluded from the regular pool.
    pub excluded_zone_marker: &'static str,
}

const ELITE_ZONE_MARKER: &str = "Snipe";
const GATE_ZONE_MARKER: &str = "Gate";
const SMALL_LEVELS: [&str; 4] = ["factory4_day", "factory4_night", "laboratory", "rezervbase"];
const DOUBLED_ELITE_LEVELS: [&str; 2] = ["shoreline", "tarkovstreets"];

impl LevelTraits {
    /// Resolves the policy for the provided level.
    #[must_use]
    pub fn for_level(level: &LevelId) -> Self {
        let id = level.as_str();
        let size = if SMALL_LEVELS.contains(&id) {
            LevelSize::Small
        } else {
            LevelSize::Large
        };
        let (schedule, excluded_zone_marker) = if id == "laboratory" {
            (ScheduleMode::BossOnly, GATE_ZONE_MARKER)
        } else {
            (ScheduleMode::Full, ELITE_ZONE_MARKER)
        };
        let elite_group_size = if id == "shoreline" {
            NonZeroU32::MIN.saturating_add(1)
        } else {
            NonZeroU32::MIN
        };
        let regular_group_size = if id == "tarkovstreets" {
            NonZeroU32::new(3)
        } else {
            None
        };

        Self {
            size,
            schedule,
            elite_group_size,
            doubled_elites: DOUBLED_ELITE_LEVELS.contains(&id),
            regular_group_size,
            excluded_zone_marker,
        }
    }

    /// Marker that identifies elite (marksman) zones on every level.
    #[must_use]
    pub const fn elite_zone_marker() -> &'static str {
        ELITE_ZONE_MARKER
    }
}

/// Inclusive bounds on the number of players a level hosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerBounds {
    min: u32,
    max: u32,
}

impl PlayerBounds {
    /// Creates a new bounds descriptor.
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Minimum number of players.
    #[must_use]
    pub const fn min(&self) -> u32 {
        self.min
    }

    /// Maximum number of players.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }
}

/// Static spawn facts for a single level, computed once and read thereafter.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LevelProfile {
    traits: LevelTraits,
    elite_zones: BTreeSet<String>,
    regular_zones: Vec<String>,
    players: PlayerBounds,
    max_bots: u32,
    max_elite_units: u32,
    max_regular_units: u32,
}

impl LevelProfile {
    /// Creates a profile, deriving the elite and regular unit budgets.
    #[must_use]
    pub fn new(
        traits: LevelTraits,
        elite_zones: BTreeSet<String>,
        regular_zones: Vec<String>,
        players: PlayerBounds,
        max_bots: u32,
    ) -> Self {
        let elite_zone_count = u32::try_from(elite_zones.len()).unwrap_or(u32::MAX);
        let max_elite_units = if traits.doubled_elites {
            elite_zone_count.saturating_mul(2)
        } else {
            elite_zone_count
        };

        Self {
            traits,
            elite_zones,
            regular_zones,
            players,
            max_bots,
            max_elite_units,
            max_regular_units: max_bots.saturating_sub(max_elite_units),
        }
    }

    /// Scheduling policy of the level.
    #[must_use]
    pub const fn traits(&self) -> &LevelTraits {
        &self.traits
    }

    /// Zones reserved for elite units, in sorted order.
    #[must_use]
    pub const fn elite_zones(&self) -> &BTreeSet<String> {
        &self.elite_zones
    }

    /// Zones available to regular waves and boss squads, including placeholders.
    #[must_use]
    pub fn regular_zones(&self) -> &[String] {
        &self.regular_zones
    }

    /// Player bounds of the level.
    #[must_use]
    pub const fn players(&self) -> PlayerBounds {
        self.players
    }

    /// Raw bot capacity before any multiplier is applied.
    #[must_use]
    pub const fn max_bots(&self) -> u32 {
        self.max_bots
    }

    /// Number of elite units the level accounts for.
    #[must_use]
    pub const fn max_elite_units(&self) -> u32 {
        self.max_elite_units
    }

    /// Capacity left for regular units once elites are accounted for.
    #[must_use]
    pub const fn max_regular_units(&self) -> u32 {
        self.max_regular_units
    }
}

/// Category of unit a wave spawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpawnKind {
    /// Long-range specialist spawned in elite zones.
    Elite,
    /// Regular assault unit.
    Assault,
}

/// Difficulty preset applied to spawned units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Relaxed preset.
    Easy,
    /// Default preset.
    Normal,
    /// Escalated preset.
    Hard,
    /// Hardest preset.
    Impossible,
}

/// Inclusive range of units a wave may spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupSize {
    min: u32,
    max: u32,
}

impl GroupSize {
    /// Creates a new range.
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Smallest number of units spawned.
    #[must_use]
    pub const fn min(&self) -> u32 {
        self.min
    }

    /// Largest number of units spawned.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }
}

/// Time window, in seconds since raid start, during which a spawn may trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TriggerWindow {
    min_seconds: u32,
    max_seconds: u32,
}

impl TriggerWindow {
    /// Creates a new window.
    #[must_use]
    pub const fn new(min_seconds: u32, max_seconds: u32) -> Self {
        Self {
            min_seconds,
            max_seconds,
        }
    }

    /// Earliest trigger time.
    #[must_use]
    pub const fn min_seconds(&self) -> u32 {
        self.min_seconds
    }

    /// Latest trigger time.
    #[must_use]
    pub const fn max_seconds(&self) -> u32 {
        self.max_seconds
    }

    /// Moves the window earlier by `seconds`, saturating at raid start.
    #[must_use]
    pub const fn shifted_earlier(self, seconds: u32) -> Self {
        Self {
            min_seconds: self.min_seconds.saturating_sub(seconds),
            max_seconds: self.max_seconds.saturating_sub(seconds),
        }
    }
}

/// Group of units bound to a single zone within one scheduling pass.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SpawnGroup {
    zone: String,
    size: u32,
}

impl SpawnGroup {
    /// Creates a new zoned group.
    #[must_use]
    pub fn new(zone: impl Into<String>, size: u32) -> Self {
        Self {
            zone: zone.into(),
            size,
        }
    }

    /// Zone the group spawns in.
    #[must_use]
    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// Number of units in the group.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }
}

/// Scheduled spawn event owned by a level's wave list.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WaveEvent {
    kind: SpawnKind,
    zone: String,
    difficulty: Difficulty,
    number: u32,
    slots: GroupSize,
    window: TriggerWindow,
    #[serde(default)]
    is_player_squad: bool,
}

impl WaveEvent {
    /// Creates a non-player wave.
    #[must_use]
    pub fn new(
        kind: SpawnKind,
        zone: impl Into<String>,
        difficulty: Difficulty,
        number: u32,
        slots: GroupSize,
        window: TriggerWindow,
    ) -> Self {
        Self {
            kind,
            zone: zone.into(),
            difficulty,
            number,
            slots,
            window,
            is_player_squad: false,
        }
    }

    /// Category of unit spawned.
    #[must_use]
    pub const fn kind(&self) -> SpawnKind {
        self.kind
    }

    /// Zone the wave spawns in.
    #[must_use]
    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// Difficulty preset of the spawned units.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Sequence number, unique within the level.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Unit range spawned by the wave.
    #[must_use]
    pub const fn slots(&self) -> GroupSize {
        self.slots
    }

    /// Trigger window of the wave.
    #[must_use]
    pub const fn window(&self) -> TriggerWindow {
        self.window
    }

    /// Whether the wave spawns player-controlled squads.
    #[must_use]
    pub const fn is_player_squad(&self) -> bool {
        self.is_player_squad
    }

    /// Returns the same wave with a replaced trigger window.
    #[must_use]
    pub fn with_window(self, window: TriggerWindow) -> Self {
        Self { window, ..self }
    }
}

const BEAR_NAME: &str = "pmcBEAR";
const USEC_NAME: &str = "pmcUSEC";

/// Identity of a boss spawn entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BossFaction {
    /// First PMC faction managed by the engine.
    Bear,
    /// Second PMC faction managed by the engine.
    Usec,
    /// Native boss the engine never creates or removes.
    Other(String),
}

impl BossFaction {
    /// Whether the faction is one of the two PMC factions owned by the engine.
    #[must_use]
    pub const fn is_pmc(&self) -> bool {
        matches!(self, Self::Bear | Self::Usec)
    }

    /// Name of the faction as stored in level data.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Bear => BEAR_NAME,
            Self::Usec => USEC_NAME,
            Self::Other(name) => name,
        }
    }
}

impl From<String> for BossFaction {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case(BEAR_NAME) {
            Self::Bear
        } else if value.eq_ignore_ascii_case(USEC_NAME) {
            Self::Usec
        } else {
            Self::Other(value)
        }
    }
}

impl From<BossFaction> for String {
    fn from(value: BossFaction) -> Self {
        match value {
            BossFaction::Other(name) => name,
            pmc => pmc.name().to_owned(),
        }
    }
}

/// Escort squad attached to a boss.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EscortSupport {
    faction: BossFaction,
    count: u32,
    difficulty: Difficulty,
}

impl EscortSupport {
    /// Creates a new escort descriptor.
    #[must_use]
    pub const fn new(faction: BossFaction, count: u32, difficulty: Difficulty) -> Self {
        Self {
            faction,
            count,
            difficulty,
        }
    }

    /// Faction of the escorts.
    #[must_use]
    pub const fn faction(&self) -> &BossFaction {
        &self.faction
    }

    /// Number of escort units.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Difficulty preset of the escorts.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

/// Boss squad scheduled on a level independently of ambient waves.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BossSpawnEntry {
    faction: BossFaction,
    squad_size: u32,
    #[serde(default)]
    escort: Option<EscortSupport>,
    zone: String,
    #[serde(default)]
    trigger_time: Option<u32>,
    difficulty: Difficulty,
    #[serde(default = "full_chance")]
    chance: u32,
    #[serde(default)]
    randomized_time: bool,
    #[serde(default)]
    is_player: bool,
    #[serde(default)]
    force_spawn: bool,
    #[serde(default)]
    show_on_map: bool,
    #[serde(default = "ignores_cap")]
    ignore_population_cap: bool,
}

const fn full_chance() -> u32 {
    100
}

const fn ignores_cap() -> bool {
    true
}

impl BossSpawnEntry {
    /// Creates an immediately triggered squad; squads larger than one unit
    /// receive a single escort descriptor covering the remaining units.
    #[must_use]
    pub fn new(
        faction: BossFaction,
        squad_size: u32,
        difficulty: Difficulty,
        zone: impl Into<String>,
    ) -> Self {
        let escort = (squad_size > 1)
            .then(|| EscortSupport::new(faction.clone(), squad_size - 1, difficulty));

        Self {
            faction,
            squad_size,
            escort,
            zone: zone.into(),
            trigger_time: None,
            difficulty,
            chance: full_chance(),
            randomized_time: false,
            is_player: false,
            force_spawn: false,
            show_on_map: false,
            ignore_population_cap: ignores_cap(),
        }
    }

    /// Returns the entry with the provided spawn chance.
    #[must_use]
    pub fn with_chance(self, chance: u32) -> Self {
        Self { chance, ..self }
    }

    /// Returns the entry scheduled at `seconds`, marked as randomised within its window.
    #[must_use]
    pub fn with_randomized_time(self, seconds: u32) -> Self {
        Self {
            trigger_time: Some(seconds),
            randomized_time: true,
            ..self
        }
    }

    /// Identity of the boss.
    #[must_use]
    pub const fn faction(&self) -> &BossFaction {
        &self.faction
    }

    /// Units in the squad, boss included.
    #[must_use]
    pub const fn squad_size(&self) -> u32 {
        self.squad_size
    }

    /// Escort descriptor, present for squads larger than one.
    #[must_use]
    pub const fn escort(&self) -> Option<&EscortSupport> {
        self.escort.as_ref()
    }

    /// Number of escort units.
    #[must_use]
    pub fn escort_count(&self) -> u32 {
        self.escort.as_ref().map_or(0, EscortSupport::count)
    }

    /// Zone the squad spawns in.
    #[must_use]
    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// Trigger time in seconds, or `None` for an immediate spawn.
    #[must_use]
    pub const fn trigger_time(&self) -> Option<u32> {
        self.trigger_time
    }

    /// Difficulty preset of the boss.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Spawn chance in percent.
    #[must_use]
    pub const fn chance(&self) -> u32 {
        self.chance
    }

    /// Whether the trigger time was drawn from a wave window.
    #[must_use]
    pub const fn randomized_time(&self) -> bool {
        self.randomized_time
    }

    /// Whether the boss is player-controlled.
    #[must_use]
    pub const fn is_player(&self) -> bool {
        self.is_player
    }

    /// Whether the boss spawns regardless of chance rolls.
    #[must_use]
    pub const fn force_spawn(&self) -> bool {
        self.force_spawn
    }

    /// Whether the boss is shown on the level map.
    #[must_use]
    pub const fn show_on_map(&self) -> bool {
        self.show_on_map
    }

    /// Whether the squad bypasses the ambient population cap.
    #[must_use]
    pub const fn ignore_population_cap(&self) -> bool {
        self.ignore_population_cap
    }
}

/// Extraction point of a level.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExitRecord {
    name: String,
    chance: u32,
    min_time: u32,
    max_time: u32,
}

impl ExitRecord {
    /// Creates a new exit.
    #[must_use]
    pub fn new(name: impl Into<String>, chance: u32, min_time: u32, max_time: u32) -> Self {
        Self {
            name: name.into(),
            chance,
            min_time,
            max_time,
        }
    }

    /// Name of the exit.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Availability chance in percent.
    #[must_use]
    pub const fn chance(&self) -> u32 {
        self.chance
    }

    /// Earliest time the exit opens.
    #[must_use]
    pub const fn min_time(&self) -> u32 {
        self.min_time
    }

    /// Latest time the exit opens.
    #[must_use]
    pub const fn max_time(&self) -> u32 {
        self.max_time
    }

    /// Overwrites the fields present in `change`.
    pub fn apply(&mut self, change: &ExitChange) {
        if let Some(chance) = change.chance {
            self.chance = chance;
        }
        if let Some(min_time) = change.min_time {
            self.min_time = min_time;
        }
        if let Some(max_time) = change.max_time {
            self.max_time = max_time;
        }
    }
}

/// Partial update for a named exit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExitChange {
    /// Name of the exit to update.
    pub name: String,
    /// Replacement availability chance.
    #[serde(default)]
    pub chance: Option<u32>,
    /// Replacement earliest opening time.
    #[serde(default)]
    pub min_time: Option<u32>,
    /// Replacement latest opening time.
    #[serde(default)]
    pub max_time: Option<u32>,
}

/// Difficulty adjustment computed by an external subsystem for one raid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaidAdjustment {
    /// New raid duration.
    pub raid_duration_minutes: u32,
    /// Dynamic loot rate in percent; values of 100 or more leave loot untouched.
    pub dynamic_loot_percent: u32,
    /// Static loot rate in percent; values of 100 or more leave loot untouched.
    pub static_loot_percent: u32,
    /// Exit edits applied in order.
    #[serde(default)]
    pub exit_changes: Vec<ExitChange>,
    /// Seconds of raid time that elapsed before the player joined.
    #[serde(default)]
    pub simulated_raid_start_seconds: u32,
}

/// Host-provided settings attached to a level record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSettings {
    /// Whether raid adjustments should also reshape waves and boss squads.
    pub adjust_waves: bool,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self { adjust_waves: true }
    }
}

/// Lifecycle of a level's generated schedule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScheduleState {
    /// No schedule has been generated.
    #[default]
    Uninitialized,
    /// A full regeneration completed.
    Scheduled,
    /// At least one rebalance pass ran after the last regeneration.
    Rebalanced {
        /// Number of rebalance passes since the last regeneration.
        passes: u32,
    },
}

impl ScheduleState {
    /// State reached after one more rebalance pass.
    #[must_use]
    pub const fn after_rebalance(self) -> Self {
        match self {
            Self::Rebalanced { passes } => Self::Rebalanced {
                passes: passes.saturating_add(1),
            },
            Self::Uninitialized | Self::Scheduled => Self::Rebalanced { passes: 1 },
        }
    }
}

/// Loot multiplier table targeted by a scaling command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LootTable {
    /// Loose (dynamic) loot.
    Loose,
    /// Container (static) loot.
    Static,
}

/// Commands that express all permissible level database mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the level's open zone list.
    OpenZones {
        /// Level to update.
        level: LevelId,
        /// Zones opened for spawning.
        zones: Vec<String>,
    },
    /// Clears waves, PMC boss squads and custom-wave overrides of a level.
    ResetSchedule {
        /// Level to reset.
        level: LevelId,
    },
    /// Persists a new bot capacity on the record and the capacity-cap table.
    SetBotCapacity {
        /// Level to update.
        level: LevelId,
        /// New bot capacity.
        bot_max: u32,
    },
    /// Appends waves to the level's wave list.
    AppendWaves {
        /// Level to extend.
        level: LevelId,
        /// Waves appended in order.
        waves: Vec<WaveEvent>,
    },
    /// Appends boss squads to the level's boss list.
    AppendBossSpawns {
        /// Level to extend.
        level: LevelId,
        /// Entries appended in order.
        spawns: Vec<BossSpawnEntry>,
    },
    /// Scales one of the level's loot multipliers by `percent / 100`.
    ScaleLootMultiplier {
        /// Level to update.
        level: LevelId,
        /// Table to scale.
        table: LootTable,
        /// Scale expressed in percent.
        percent: u32,
    },
    /// Overwrites the level's raid duration.
    SetRaidDuration {
        /// Level to update.
        level: LevelId,
        /// New escape time limit.
        minutes: u32,
    },
    /// Applies a partial update to a named exit.
    UpdateExit {
        /// Level to update.
        level: LevelId,
        /// Fields to overwrite.
        change: ExitChange,
    },
    /// Drops waves closed before `elapsed_seconds` and shifts the rest earlier.
    TrimElapsedWaves {
        /// Level to update.
        level: LevelId,
        /// Raid time that already elapsed.
        elapsed_seconds: u32,
    },
    /// Removes the first `count` PMC boss squads in list order.
    RemoveBossSpawns {
        /// Level to update.
        level: LevelId,
        /// Number of PMC squads to remove.
        count: usize,
    },
    /// Records a schedule lifecycle transition.
    SetScheduleState {
        /// Level to update.
        level: LevelId,
        /// New state.
        state: ScheduleState,
    },
}

impl Command {
    /// Level targeted by the command.
    #[must_use]
    pub const fn level(&self) -> &LevelId {
        match self {
            Self::OpenZones { level, .. }
            | Self::ResetSchedule { level }
            | Self::SetBotCapacity { level, .. }
            | Self::AppendWaves { level, .. }
            | Self::AppendBossSpawns { level, .. }
            | Self::ScaleLootMultiplier { level, .. }
            | Self::SetRaidDuration { level, .. }
            | Self::UpdateExit { level, .. }
            | Self::TrimElapsedWaves { level, .. }
            | Self::RemoveBossSpawns { level, .. }
            | Self::SetScheduleState { level, .. } => level,
        }
    }
}

/// Reason the world refused to execute a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// The level is not present in the database.
    UnknownLevel,
    /// The level has no exit with the given name.
    UnknownExit(String),
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the open zone list was replaced.
    ZonesOpened {
        /// Level that changed.
        level: LevelId,
        /// Number of zones opened.
        count: usize,
    },
    /// Confirms that a level's schedule was cleared.
    ScheduleReset {
        /// Level that changed.
        level: LevelId,
        /// Number of waves removed.
        cleared_waves: usize,
        /// Number of PMC squads removed.
        cleared_boss_spawns: usize,
    },
    /// Reports a new bot capacity.
    BotCapacityChanged {
        /// Level that changed.
        level: LevelId,
        /// Capacity before the change.
        previous: u32,
        /// Capacity after the change.
        current: u32,
    },
    /// Confirms appended waves.
    WavesAppended {
        /// Level that changed.
        level: LevelId,
        /// Number of waves appended.
        count: usize,
    },
    /// Confirms appended boss squads.
    BossSpawnsAppended {
        /// Level that changed.
        level: LevelId,
        /// Number of entries appended.
        count: usize,
    },
    /// Confirms a loot multiplier scaling.
    LootMultiplierScaled {
        /// Level that changed.
        level: LevelId,
        /// Table that was scaled.
        table: LootTable,
        /// Scale applied in percent.
        percent: u32,
    },
    /// Confirms a raid duration change.
    RaidDurationChanged {
        /// Level that changed.
        level: LevelId,
        /// New escape time limit.
        minutes: u32,
    },
    /// Confirms an exit update.
    ExitUpdated {
        /// Level that changed.
        level: LevelId,
        /// Name of the updated exit.
        exit: String,
    },
    /// Reports waves dropped because their window already closed.
    WavesTrimmed {
        /// Level that changed.
        level: LevelId,
        /// Number of waves dropped.
        removed: usize,
    },
    /// Reports removed PMC squads.
    BossSpawnsRemoved {
        /// Level that changed.
        level: LevelId,
        /// Number of entries removed.
        removed: usize,
    },
    /// Announces a schedule lifecycle transition.
    ScheduleStateChanged {
        /// Level that changed.
        level: LevelId,
        /// New state.
        state: ScheduleState,
    },
    /// Reports a command the world refused.
    CommandRejected {
        /// Level named by the command.
        level: LevelId,
        /// Reason for the refusal.
        reason: Rejection,
    },
}

/// Outcome of regenerating every known level.
#[derive(Debug, Default)]
pub struct RegenerationSummary {
    /// Levels whose schedule was rebuilt.
    pub regenerated: Vec<LevelId>,
    /// Levels that failed, with the reason.
    pub failed: Vec<(LevelId, ScheduleError)>,
}

/// Outcome of a completed rebalance pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RebalanceReport {
    /// PMC squads removed by the pass.
    pub removed_boss_spawns: usize,
    /// PMC squads still scheduled after the pass.
    pub remaining_boss_spawns: usize,
    /// Whether waves and squads were reshaped at all.
    pub waves_adjusted: bool,
}

/// Capability surface for regenerating level schedules.
pub trait WaveGenerator {
    /// Regenerates every known level; failures are isolated per level.
    fn regenerate_all_levels(&mut self) -> RegenerationSummary;

    /// Regenerates a single level from scratch.
    fn regenerate_level(&mut self, level: &LevelId) -> Result<(), ScheduleError>;

    /// Regenerates the level whose identifier or display name matches `name`.
    fn regenerate_level_by_name(&mut self, name: &str) -> Result<(), ScheduleError>;
}

/// Capability surface for applying raid difficulty adjustments.
pub trait RaidAdjuster {
    /// Applies `adjustment` to an already scheduled level.
    fn apply_adjustment(
        &mut self,
        level: &LevelId,
        adjustment: &RaidAdjustment,
    ) -> Result<RebalanceReport, RebalanceError>;
}
