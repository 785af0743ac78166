//! Event program scheduling.
//!
//! Builds the timetable of a multi-day, multi-hall event: which activity runs
//! in which hall at what time. Organizers place blocks on a fixed time grid;
//! the crate detects hall clashes before a block is saved and lets the
//! organizer override or back out.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ClockTime`, `Interval`, `Hall`, `Day`,
//!   `Block`, `ScheduleConfig`, `Program`, `Work`
//! - **`grid`**: Time grid generation from a `ScheduleConfig`
//! - **`conflict`**: Hall conflict detection between blocks, per-day audit
//! - **`availability`**: Free/occupied start times for a block being placed
//! - **`editor`**: Draft state machine (create, edit, save, override, delete)
//! - **`validation`**: Program integrity checks (duplicate IDs, orphaned halls)
//! - **`import`**: Older room-by-name program data
//! - **`store`**: Async persistence collaborators and an in-memory store
//! - **`service`**: `ProgramService`, tying the editor to the stores
//!
//! # Architecture
//!
//! Everything below `service` is synchronous and pure: conflict detection,
//! slot generation and editor transitions take the loaded snapshot and
//! return values. `service` is the only layer that awaits, and it does so
//! only for store calls.
//!
//! # Example
//!
//! ```
//! use program_schedule::conflict::detect_conflicts;
//! use program_schedule::models::{parse_interval, Block, Hall};
//!
//! let halls = vec![Hall::new("h1", "Auditorio A")];
//! let opening = Block::full("a", parse_interval("08:00 - 09:00").unwrap(), "h1", "Opening");
//! let panel = Block::full("b", parse_interval("08:30 - 09:30").unwrap(), "h1", "Panel");
//!
//! let conflicts = detect_conflicts(&panel, &[opening], &halls);
//! assert_eq!(conflicts.len(), 1);
//! assert!(conflicts[0].reason.contains("Auditorio A"));
//! ```

pub mod availability;
pub mod conflict;
pub mod editor;
pub mod error;
pub mod grid;
pub mod import;
pub mod models;
pub mod service;
pub mod store;
pub mod validation;

pub use error::{ProgramError, ProgramResult};
pub use service::{accepted_works, EditorAction, OrphanedReference, ProgramService, SyncReport};
