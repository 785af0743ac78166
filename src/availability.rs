//! Slot availability for interactive editing.
//!
//! A thin layer over [`detect_conflicts`]: for a candidate start time, would
//! a block of the given duration, hall and shape be conflict-free?
//!
//! Results are not cached. Callers re-run [`slot_options`] whenever the hall,
//! shape or duration changes.

use serde::{Deserialize, Serialize};

use crate::conflict::detect_conflicts;
use crate::grid::generate_slots;
use crate::models::{Block, BlockType, ClockTime, Hall, Interval, ScheduleConfig};

/// What the organizer is trying to place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotQuery {
    /// Length of the block in minutes.
    pub duration_minutes: u32,
    /// Target hall (used by full blocks).
    pub hall_id: String,
    /// Id of the block being edited, so it does not collide with itself.
    pub exclude_block_id: String,
    /// Shape of the block being placed.
    pub block_type: BlockType,
}

impl SlotQuery {
    /// Creates a query for a full block.
    pub fn full(
        hall_id: impl Into<String>,
        duration_minutes: u32,
        exclude_block_id: impl Into<String>,
    ) -> Self {
        Self {
            duration_minutes,
            hall_id: hall_id.into(),
            exclude_block_id: exclude_block_id.into(),
            block_type: BlockType::Full,
        }
    }

    /// Sets the block shape.
    pub fn with_type(mut self, block_type: BlockType) -> Self {
        self.block_type = block_type;
        self
    }

    /// Synthetic candidate starting at `start`.
    ///
    /// Split candidates carry no sessions, so they occupy nothing.
    fn candidate(&self, start: ClockTime) -> Block {
        let range = Interval::starting_at(start, self.duration_minutes);
        match self.block_type {
            BlockType::Full => Block::full(&self.exclude_block_id, range, &self.hall_id, ""),
            BlockType::Split => Block::split(&self.exclude_block_id, range),
        }
    }
}

/// One entry of the start-time selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotOption {
    /// Candidate start time.
    pub start: ClockTime,
    /// Whether the query fits at this start without conflicts.
    pub free: bool,
}

/// Whether a block described by `query` starting at `start` conflicts with
/// nothing in `blocks`. A block running past `24:00` is never free.
pub fn is_slot_free(blocks: &[Block], halls: &[Hall], start: ClockTime, query: &SlotQuery) -> bool {
    if !Interval::starting_at(start, query.duration_minutes).fits_in_day() {
        return false;
    }
    detect_conflicts(&query.candidate(start), blocks, halls).is_empty()
}

/// Evaluates every grid slot of the day for `query`.
pub fn slot_options(
    config: &ScheduleConfig,
    blocks: &[Block],
    halls: &[Hall],
    query: &SlotQuery,
) -> Vec<SlotOption> {
    generate_slots(config)
        .into_iter()
        .map(|start| SlotOption {
            start,
            free: is_slot_free(blocks, halls, start, query),
        })
        .collect()
}

/// First grid slot where `query` fits, if any.
pub fn first_free_slot(
    config: &ScheduleConfig,
    blocks: &[Block],
    halls: &[Hall],
    query: &SlotQuery,
) -> Option<ClockTime> {
    generate_slots(config)
        .into_iter()
        .find(|start| is_slot_free(blocks, halls, *start, query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_interval, Session};

    fn halls() -> Vec<Hall> {
        vec![Hall::new("h1", "Auditorio A"), Hall::new("h2", "Sala B")]
    }

    fn at(text: &str) -> ClockTime {
        text.parse().unwrap()
    }

    fn opening() -> Block {
        Block::full("open", parse_interval("08:00 - 09:00").unwrap(), "h1", "Opening")
    }

    #[test]
    fn test_busy_and_free_slots() {
        let blocks = vec![opening()];
        let query = SlotQuery::full("h1", 60, "new");
        assert!(!is_slot_free(&blocks, &halls(), at("08:30"), &query));
        assert!(is_slot_free(&blocks, &halls(), at("09:00"), &query));
        // Ends exactly when the opening starts.
        assert!(is_slot_free(&blocks, &halls(), at("07:00"), &query));
    }

    #[test]
    fn test_other_hall_is_free() {
        let blocks = vec![opening()];
        let query = SlotQuery::full("h2", 60, "new");
        assert!(is_slot_free(&blocks, &halls(), at("08:00"), &query));
    }

    #[test]
    fn test_editing_block_ignores_itself() {
        let blocks = vec![opening()];
        let query = SlotQuery::full("h1", 60, "open");
        assert!(is_slot_free(&blocks, &halls(), at("08:30"), &query));
    }

    #[test]
    fn test_split_candidate_occupies_nothing() {
        let blocks = vec![opening()];
        let query = SlotQuery::full("h1", 60, "new").with_type(BlockType::Split);
        assert!(is_slot_free(&blocks, &halls(), at("08:00"), &query));
    }

    #[test]
    fn test_full_query_against_split_sessions() {
        let blocks = vec![Block::split("s", parse_interval("10:00 - 11:00").unwrap())
            .with_session("h1", Session::titled("Talk"))];
        let query = SlotQuery::full("h1", 30, "new");
        assert!(!is_slot_free(&blocks, &halls(), at("10:30"), &query));
        assert!(is_slot_free(&blocks, &halls(), at("11:00"), &query));
    }

    #[test]
    fn test_slot_options_recomputed_per_duration() {
        let config = ScheduleConfig::new(at("08:00"), at("10:00"), 30);
        let blocks = vec![Block::full(
            "late",
            parse_interval("09:00 - 09:30").unwrap(),
            "h1",
            "Late",
        )];

        let short = slot_options(&config, &blocks, &halls(), &SlotQuery::full("h1", 30, "new"));
        let free: Vec<_> = short.iter().map(|o| o.free).collect();
        assert_eq!(free, vec![true, true, false, true]);

        let long = slot_options(&config, &blocks, &halls(), &SlotQuery::full("h1", 90, "new"));
        let free: Vec<_> = long.iter().map(|o| o.free).collect();
        assert_eq!(free, vec![false, false, false, true]);
    }

    #[test]
    fn test_first_free_slot() {
        let config = ScheduleConfig::new(at("08:00"), at("12:00"), 30);
        let blocks = vec![opening()];
        let query = SlotQuery::full("h1", 30, "new");
        assert_eq!(first_free_slot(&config, &blocks, &halls(), &query), Some(at("09:00")));

        let full_day = vec![Block::full(
            "all",
            parse_interval("08:00 - 12:00").unwrap(),
            "h1",
            "All day",
        )];
        assert_eq!(first_free_slot(&config, &full_day, &halls(), &query), None);
    }

    #[test]
    fn test_slot_past_midnight_not_free() {
        let config = ScheduleConfig::new(at("23:00"), ClockTime::END_OF_DAY, 30);
        let query = SlotQuery::full("h1", 30, "new");
        assert!(is_slot_free(&[], &halls(), at("23:30"), &query));

        let long = SlotQuery::full("h1", 60, "new");
        assert!(!is_slot_free(&[], &halls(), at("23:30"), &long));
        assert_eq!(first_free_slot(&config, &[], &halls(), &long), Some(at("23:00")));

        let huge = SlotQuery::full("h1", u32::MAX, "new");
        assert_eq!(first_free_slot(&config, &[], &halls(), &huge), None);
    }
}
