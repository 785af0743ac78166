//! Time grid generation.
//!
//! Turns a [`ScheduleConfig`] window into the discrete start times an
//! organizer may pick for a block on a single day.

use crate::models::{ClockTime, ScheduleConfig};

/// Every `start + k * interval` strictly before `end`, for `k = 0, 1, 2, ...`.
///
/// An end at or before the start yields an empty grid, as does a zero
/// interval. Pure function of the configuration.
///
/// # Example
///
/// ```
/// use program_schedule::grid::generate_slots;
/// use program_schedule::models::{ClockTime, ScheduleConfig};
///
/// let config = ScheduleConfig::new(ClockTime::from_hm(8, 0), ClockTime::from_hm(9, 0), 30);
/// let slots: Vec<String> = generate_slots(&config).iter().map(|t| t.to_string()).collect();
/// assert_eq!(slots, vec!["08:00", "08:30"]);
/// ```
pub fn generate_slots(config: &ScheduleConfig) -> Vec<ClockTime> {
    if config.interval == 0 {
        return Vec::new();
    }
    (config.start_time.minutes()..config.end_time.minutes())
        .step_by(config.interval as usize)
        .map(ClockTime::from_minutes)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(start: &str, end: &str, interval: u32) -> ScheduleConfig {
        ScheduleConfig::new(start.parse().unwrap(), end.parse().unwrap(), interval)
    }

    fn labels(slots: &[ClockTime]) -> Vec<String> {
        slots.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_end_is_exclusive() {
        let slots = generate_slots(&config("08:00", "09:00", 30));
        assert_eq!(labels(&slots), vec!["08:00", "08:30"]);
    }

    #[test]
    fn test_uneven_step_stops_before_end() {
        let slots = generate_slots(&config("08:00", "09:00", 25));
        assert_eq!(labels(&slots), vec!["08:00", "08:25", "08:50"]);
    }

    #[test]
    fn test_full_day_grid() {
        let slots = generate_slots(&config("08:00", "18:00", 30));
        assert_eq!(slots.len(), 20);
        assert_eq!(slots.last().unwrap().to_string(), "17:30");
    }

    #[test]
    fn test_inverted_or_empty_window() {
        assert!(generate_slots(&config("18:00", "08:00", 30)).is_empty());
        assert!(generate_slots(&config("08:00", "08:00", 30)).is_empty());
        assert!(generate_slots(&config("08:00", "09:00", 0)).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let cfg = config("09:15", "12:00", 45);
        assert_eq!(generate_slots(&cfg), generate_slots(&cfg));
    }
}
