use raid_pulse_core::PulseConfig;
use rand::Rng;

/// Outcome of resolving a level's bot capacity for one regeneration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapacityDecision {
    /// Lower bound of the draw.
    pub min: u32,
    /// Upper bound of the draw.
    pub max: u32,
    /// Capacity persisted on the level.
    pub value: u32,
}

impl CapacityDecision {
    /// Ratio between the persisted capacity and the raw capacity it came from.
    #[must_use]
    pub fn effective_multiplier(&self, max_bots: u32) -> f64 {
        if max_bots == 0 {
            0.0
        } else {
            f64::from(self.value) / f64::from(max_bots)
        }
    }
}

/// Scales `max_bots` by a random multiplier drawn from the configured range.
///
/// Both bounds are rounded half to even before an inclusive draw; a range
/// whose upper bound does not exceed its lower bound yields the lower bound.
/// A positive `global_bot_limit` caps the result.
pub fn resolve_capacity(max_bots: u32, config: &PulseConfig, rng: &mut impl Rng) -> CapacityDecision {
    let min = scaled(max_bots, config.bot_count_multiplier_min);
    let max = scaled(max_bots, config.bot_count_multiplier_max);

    let drawn = if max <= min {
        min
    } else {
        rng.gen_range(min..=max)
    };
    let value = match config.global_bot_limit {
        0 => drawn,
        limit => drawn.min(limit),
    };

    CapacityDecision { min, max, value }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled(max_bots: u32, multiplier: f64) -> u32 {
    (f64::from(max_bots) * multiplier).round_ties_even() as u32
}
