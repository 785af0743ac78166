//! Schedule window configuration and the external event-config mirror.

use serde::{Deserialize, Serialize};

use super::ClockTime;

fn default_start_time() -> ClockTime {
    ClockTime::from_hm(8, 0)
}

fn default_end_time() -> ClockTime {
    ClockTime::from_hm(18, 0)
}

fn default_interval() -> u32 {
    30
}

/// Operating window of a single event day, driving the time grid.
///
/// Missing keys fall back to 08:00–18:00 in 30-minute steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleConfig {
    /// First selectable start time.
    #[serde(default = "default_start_time")]
    pub start_time: ClockTime,
    /// Grid end (exclusive).
    #[serde(default = "default_end_time")]
    pub end_time: ClockTime,
    /// Step between selectable start times, in minutes.
    #[serde(default = "default_interval")]
    pub interval: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            start_time: default_start_time(),
            end_time: default_end_time(),
            interval: default_interval(),
        }
    }
}

impl ScheduleConfig {
    /// Creates a configuration.
    pub fn new(start_time: ClockTime, end_time: ClockTime, interval: u32) -> Self {
        Self {
            start_time,
            end_time,
            interval,
        }
    }

    /// Checks that the window is usable for editing.
    ///
    /// The grid generator itself tolerates any configuration; this is the
    /// gate applied before a configuration is persisted.
    pub fn validate(&self) -> Result<(), String> {
        if self.interval == 0 {
            return Err("interval must be at least one minute".to_string());
        }
        if self.start_time >= self.end_time {
            return Err(format!(
                "start time {} must be before end time {}",
                self.start_time, self.end_time
            ));
        }
        Ok(())
    }
}

/// One day's window in the external event configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDayWindow {
    /// Date text of the mirrored day.
    pub date: String,
    /// Opening time.
    pub start_time: ClockTime,
    /// Closing time.
    pub end_time: ClockTime,
}

/// External event configuration record. Only the `schedule` array is
/// maintained here; it mirrors the number of program days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventConfig {
    /// Per-day windows, one entry per program day.
    #[serde(default)]
    pub schedule: Vec<EventDayWindow>,
}
