use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Difficulty};

const PERCENT: u32 = 100;

/// Tunable parameters read by every scheduling system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    /// Largest PMC group, used for per-wave PMC groups and boss squads.
    pub max_pmc_group_size: NonZeroU32,
    /// Largest combined regular group on levels without their own cap.
    pub max_scav_group_size: NonZeroU32,
    /// Difficulty applied to PMC groups and boss squads.
    pub pmc_bot_difficulty: Difficulty,
    /// Number of regular waves, and of boss windows.
    pub assault_wave_count: u32,
    /// Lower bound of the random bot capacity multiplier.
    pub bot_count_multiplier_min: f64,
    /// Upper bound of the random bot capacity multiplier.
    pub bot_count_multiplier_max: f64,
    /// Hard ceiling on a level's bot capacity; zero disables the ceiling.
    pub global_bot_limit: u32,
    /// Share of each wave's capacity reserved for PMC groups, in percent.
    pub pmc_percentage: u32,
    /// Spawn chance stamped on generated boss squads, in percent.
    pub boss_spawn_chance_percent: u32,
    /// Enables verbose schedule dumps.
    pub debug: bool,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            max_pmc_group_size: NonZeroU32::MIN.saturating_add(3),
            max_scav_group_size: NonZeroU32::MIN.saturating_add(3),
            pmc_bot_difficulty: Difficulty::Normal,
            assault_wave_count: 3,
            bot_count_multiplier_min: 1.5,
            bot_count_multiplier_max: 2.0,
            global_bot_limit: 0,
            pmc_percentage: 30,
            boss_spawn_chance_percent: PERCENT,
            debug: false,
        }
    }
}

impl PulseConfig {
    /// Checks the invariants the scheduling systems rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pmc_percentage > PERCENT {
            return Err(ConfigError::PmcPercentage(self.pmc_percentage));
        }
        if self.boss_spawn_chance_percent > PERCENT {
            return Err(ConfigError::BossSpawnChance(self.boss_spawn_chance_percent));
        }

        let (min, max) = (self.bot_count_multiplier_min, self.bot_count_multiplier_max);
        if !min.is_finite() || !max.is_finite() || min < 0.0 {
            return Err(ConfigError::Multiplier { min, max });
        }
        if min > max {
            return Err(ConfigError::MultiplierOrder { min, max });
        }

        Ok(())
    }

    /// PMC share of `capacity`, rounded up.
    #[must_use]
    pub fn pmc_quota(&self, capacity: u32) -> u32 {
        percent_of_ceil(capacity, self.pmc_percentage)
    }

    /// Remaining share of `capacity`, rounded up.
    #[must_use]
    pub fn complementary_quota(&self, capacity: u32) -> u32 {
        percent_of_ceil(capacity, PERCENT.saturating_sub(self.pmc_percentage))
    }
}

fn percent_of_ceil(value: u32, percent: u32) -> u32 {
    let scaled = u64::from(value) * u64::from(percent);
    u32::try_from(scaled.div_ceil(u64::from(PERCENT))).unwrap_or(u32::MAX)
}
