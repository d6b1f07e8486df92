/// Raid time at which the first wave triggers.
pub const FIRST_WAVE_SECONDS: u32 = 60;

/// Length of a regular wave's trigger window.
pub const WAVE_WINDOW_SECONDS: u32 = 120;

/// Computes evenly spaced trigger times for `wave_count` regular waves.
///
/// The first wave triggers at [`FIRST_WAVE_SECONDS`]; the rest follow at a
/// fixed integer interval that spreads them over the remaining raid time.
#[must_use]
pub fn build_times(wave_count: u32, raid_duration_seconds: u32) -> Vec<u32> {
    if wave_count == 0 {
        return Vec::new();
    }

    let interval = raid_duration_seconds.saturating_sub(FIRST_WAVE_SECONDS) / wave_count;
    (0..wave_count)
        .map(|index| FIRST_WAVE_SECONDS.saturating_add(interval.saturating_mul(index)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_waves_no_times() {
        assert!(build_times(0, 2_400).is_empty());
    }

    #[test]
    fn single_wave_starts_after_first_minute() {
        assert_eq!(build_times(1, 2_400), vec![60]);
    }

    #[test]
    fn waves_spread_over_remaining_time() {
        assert_eq!(build_times(3, 600), vec![60, 240, 420]);
        assert_eq!(build_times(3, 1_200), vec![60, 440, 820]);
    }

    #[test]
    fn short_raids_collapse_onto_first_wave() {
        assert_eq!(build_times(3, 30), vec![60, 60, 60]);
    }
}
