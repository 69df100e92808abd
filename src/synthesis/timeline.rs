//! Fixed-origin simulation timeline.
//!
//! Every run shares one constant synthetic start instant so that reruns with
//! the same parameters produce identical timestamps. The timeline is spaced
//! at 10 minutes, falling back to 1 minute for sub-hour durations, and is
//! inclusive of the end instant.

use chrono::{DateTime, Duration, TimeZone, Utc};
use lazy_static::lazy_static;

lazy_static! {
    static ref SIM_ORIGIN: DateTime<Utc> = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
}

/// The constant synthetic start instant (2023-01-01T00:00:00Z).
pub fn simulation_origin() -> DateTime<Utc> {
    *SIM_ORIGIN
}

/// Timeline step in minutes for a given duration.
pub fn step_minutes(duration_hours: u32) -> u32 {
    if duration_hours < 1 {
        1
    } else {
        10
    }
}

/// Build the inclusive timeline for a duration.
///
/// A 2-hour run at 10-minute resolution yields 13 timesteps: origin through
/// origin + 120 minutes.
pub fn build_timeline(duration_hours: u32) -> Vec<DateTime<Utc>> {
    let step = step_minutes(duration_hours);
    let total_minutes = duration_hours * 60;
    let origin = simulation_origin();

    let mut timestamps = Vec::with_capacity((total_minutes / step + 1) as usize);
    let mut offset = 0;
    while offset <= total_minutes {
        timestamps.push(origin + Duration::minutes(offset as i64));
        offset += step;
    }
    timestamps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_is_constant() {
        let origin = simulation_origin();
        assert_eq!(origin.to_rfc3339(), "2023-01-01T00:00:00+00:00");
        assert_eq!(origin, simulation_origin());
    }

    #[test]
    fn test_timeline_step_count() {
        // Inclusive of the end instant: hours * 6 + 1 steps.
        assert_eq!(build_timeline(1).len(), 7);
        assert_eq!(build_timeline(2).len(), 13);
        assert_eq!(build_timeline(24).len(), 145);
    }

    #[test]
    fn test_timeline_zero_duration_single_instant() {
        let timeline = build_timeline(0);
        assert_eq!(timeline, vec![simulation_origin()]);
    }

    #[test]
    fn test_timeline_spacing() {
        let timeline = build_timeline(1);
        let delta = timeline[1] - timeline[0];
        assert_eq!(delta.num_minutes(), 10);
    }
}
