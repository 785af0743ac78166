//! Room conflict detection.
//!
//! Given a candidate block and the blocks already stored for the same day,
//! reports every existing block that overlaps the candidate in time **and**
//! shares at least one occupied hall with it.
//!
//! # Algorithm
//!
//! 1. Skip the candidate's own id and any block without a time range.
//! 2. Half-open overlap test: no conflict when `new.end <= old.start` or
//!    `new.start >= old.end`. Touching blocks never conflict.
//! 3. Hall test by shape pair:
//!
//! | Candidate | Existing | Conflict when |
//! |-----------|----------|---------------|
//! | full | full | same hall |
//! | full | split | existing has a **titled** session in the candidate's hall |
//! | split | full | candidate has a **titled** session in the existing hall |
//! | split | split | candidate has a **titled** session in a hall the existing block lists at all |
//!
//! # Split/split occupancy
//!
//! The split/split row is deliberately conservative: a hall entry on the
//! existing block counts as "already programmed" even when its title is
//! empty. Untitled entries on the existing side are not filtered out until
//! product confirms they should be. [`audit_day`] checks both directions so
//! the asymmetry cannot hide a clash.
//!
//! All functions here are pure.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::models::{hall_display_name, Block, BlockShape, Hall};

/// Shape pair that produced a conflict (candidate first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConflictKind {
    /// Full candidate vs. full block.
    FullFull,
    /// Full candidate vs. split block.
    FullSplit,
    /// Split candidate vs. full block.
    SplitFull,
    /// Split candidate vs. split block.
    SplitSplit,
}

/// A clash between a candidate block and an existing block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// Id of the existing block.
    pub block_id: String,
    /// Shared hall.
    pub hall_id: String,
    /// Existing block's time text (`"HH:MM - HH:MM"`).
    pub time: String,
    /// Shape pair.
    pub kind: ConflictKind,
    /// Organizer-facing explanation naming the hall and time.
    pub reason: String,
}

/// Detects every conflict of `candidate` against `existing`.
///
/// Multiple conflicts against one block (several shared halls) and
/// conflicts against several blocks are all reported. The order of the
/// result is unspecified.
///
/// # Example
///
/// ```
/// use program_schedule::conflict::detect_conflicts;
/// use program_schedule::models::{parse_interval, Block, Hall};
///
/// let halls = vec![Hall::new("h1", "Auditorio A")];
/// let opening = Block::full("b1", parse_interval("08:00 - 09:00").unwrap(), "h1", "Opening");
/// let candidate = Block::full("b2", parse_interval("08:30 - 09:30").unwrap(), "h1", "Panel");
///
/// let conflicts = detect_conflicts(&candidate, &[opening], &halls);
/// assert_eq!(conflicts.len(), 1);
/// assert_eq!(conflicts[0].reason, "Auditorio A already occupied 08:00 - 09:00");
/// ```
pub fn detect_conflicts(candidate: &Block, existing: &[Block], halls: &[Hall]) -> Vec<Conflict> {
    let Some(new_range) = candidate.time else {
        debug!(block_id = %candidate.id, "candidate has no time range, nothing to check");
        return Vec::new();
    };

    let mut conflicts = Vec::new();

    for block in existing {
        if block.id == candidate.id {
            continue;
        }
        let Some(range) = block.time else {
            debug!(block_id = %block.id, "skipping block without a time range");
            continue;
        };
        if !new_range.overlaps(&range) {
            continue;
        }

        let time = range.to_string();
        let mut push = |hall_id: &str, kind: ConflictKind, reason: String| {
            conflicts.push(Conflict {
                block_id: block.id.clone(),
                hall_id: hall_id.to_string(),
                time: time.clone(),
                kind,
                reason,
            });
        };

        match (&candidate.shape, &block.shape) {
            (BlockShape::Full(new), BlockShape::Full(old)) => {
                if new.hall_id == old.hall_id {
                    let hall = hall_display_name(halls, &new.hall_id);
                    push(
                        &new.hall_id,
                        ConflictKind::FullFull,
                        format!("{hall} already occupied {time}"),
                    );
                }
            }
            (BlockShape::Full(new), BlockShape::Split { sessions }) => {
                for (hall_id, session) in sessions {
                    if session.is_occupying() && *hall_id == new.hall_id {
                        let hall = hall_display_name(halls, hall_id);
                        push(
                            hall_id,
                            ConflictKind::FullSplit,
                            format!("{hall} already occupied by a simultaneous session {time}"),
                        );
                    }
                }
            }
            (BlockShape::Split { sessions }, BlockShape::Full(old)) => {
                for (hall_id, session) in sessions {
                    if session.is_occupying() && *hall_id == old.hall_id {
                        let hall = hall_display_name(halls, hall_id);
                        push(
                            hall_id,
                            ConflictKind::SplitFull,
                            format!("{hall} conflicts with \"{}\" {time}", old.title),
                        );
                    }
                }
            }
            (BlockShape::Split { sessions: new }, BlockShape::Split { sessions: old }) => {
                // Conservative: any entry on the existing side counts, titled or not.
                for (hall_id, session) in new {
                    if session.is_occupying() && old.contains_key(hall_id) {
                        let hall = hall_display_name(halls, hall_id);
                        push(
                            hall_id,
                            ConflictKind::SplitSplit,
                            format!("{hall} already programmed {time}"),
                        );
                    }
                }
            }
        }
    }

    debug!(
        block_id = %candidate.id,
        checked = existing.len(),
        found = conflicts.len(),
        "conflict check finished"
    );
    conflicts
}

/// A conflict found between two blocks already stored on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayConflict {
    /// Block checked as the candidate.
    pub block_id: String,
    /// The clash against another stored block.
    pub conflict: Conflict,
}

/// Reports clashes already present in a day's blocks (e.g., saved through an
/// override).
///
/// Each block is checked as a candidate against all others. A pair of blocks
/// sharing a hall is reported once, in whichever direction detects it first.
pub fn audit_day(blocks: &[Block], halls: &[Hall]) -> Vec<DayConflict> {
    let mut seen: HashSet<(String, String, String)> = HashSet::new();
    let mut report = Vec::new();

    for block in blocks {
        for conflict in detect_conflicts(block, blocks, halls) {
            let (a, b) = if block.id <= conflict.block_id {
                (block.id.clone(), conflict.block_id.clone())
            } else {
                (conflict.block_id.clone(), block.id.clone())
            };
            if seen.insert((a, b, conflict.hall_id.clone())) {
                report.push(DayConflict {
                    block_id: block.id.clone(),
                    conflict,
                });
            }
        }
    }

    report
}
