use thiserror::Error;

use crate::LevelId;

/// Invalid configuration values.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The PMC share exceeds 100 percent.
    #[error("pmc_percentage must be within 0..=100, got {0}")]
    PmcPercentage(u32),

    /// The boss spawn chance exceeds 100 percent.
    #[error("boss_spawn_chance_percent must be within 0..=100, got {0}")]
    BossSpawnChance(u32),

    /// A capacity multiplier is negative or not finite.
    #[error("bot count multipliers must be finite and non-negative, got {min}..{max}")]
    Multiplier {
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },

    /// The capacity multiplier bounds are inverted.
    #[error("bot_count_multiplier_min ({min}) exceeds bot_count_multiplier_max ({max})")]
    MultiplierOrder {
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },
}

/// Failures while regenerating a level schedule.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// No level record exists for the identifier or name.
    #[error("unknown level '{0}'")]
    UnknownLevel(String),

    /// The level exists but was not present when the zone catalogue was built.
    #[error("level '{0}' has no zone profile")]
    MissingProfile(LevelId),
}

/// Failures while rebalancing a level.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RebalanceError {
    /// No level record exists for the identifier.
    #[error("unknown level '{0}'")]
    UnknownLevel(LevelId),

    /// The level has not been scheduled yet.
    #[error("level '{0}' has no generated schedule to rebalance")]
    NotScheduled(LevelId),

    /// An exit change names an exit the level does not have; the pass stops here.
    #[error("level '{level}' has no exit named '{exit}'")]
    UnknownExit {
        /// Level being rebalanced.
        level: LevelId,
        /// Exit named by the change.
        exit: String,
    },
}
