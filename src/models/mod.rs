//! Program scheduling domain models.
//!
//! # Domain Mappings
//!
//! | program-schedule | Conference | Trade fair | Festival |
//! |------------------|-----------|------------|----------|
//! | Day | Congress day | Fair day | Festival day |
//! | Hall | Auditorium / room | Pavilion | Stage |
//! | Block (full) | Plenary | Keynote | Headliner set |
//! | Block (split) | Parallel sessions | Side tracks | Multi-stage slot |

mod block;
pub mod clock;
mod config;
mod day;
mod hall;
mod program;
mod work;

pub use block::{Block, BlockShape, BlockType, FullSession, Session};
pub use clock::{parse_interval, ClockTime, Interval, TimeParseError};
pub use config::{EventConfig, EventDayWindow, ScheduleConfig};
pub use day::{Day, DayField, NEW_DAY_DATE};
pub use hall::{find_hall, hall_display_name, resolve_hall_name, Hall};
pub use program::{sort_by_time, upsert_sorted, without_block, Program};
pub use work::Work;
