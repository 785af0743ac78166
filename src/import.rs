//! Import of program data stored in the older, room-by-name format.
//!
//! Older records identify a single-hall block's room by its **name**
//! (`"room": "Auditorio Principal"`) and may carry the time either as a
//! combined `time` string or as separate `startTime`/`endTime` fields. This
//! module resolves room names to hall ids once, at load time, so the rest of
//! the crate only deals with hall ids.

use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::warn;

use crate::models::{
    parse_interval, resolve_hall_name, Block, BlockShape, BlockType, ClockTime, FullSession, Hall,
    Interval, Program, Session,
};

/// Legacy import failure.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Input is not valid JSON for the legacy shape.
    #[error("malformed program data: {0}")]
    Json(#[from] serde_json::Error),
    /// A single-hall block names a room no hall matches.
    #[error("block '{block_id}' references unknown room '{room}'")]
    UnknownRoom {
        /// Offending block.
        block_id: String,
        /// Room name as stored.
        room: String,
    },
}

/// A block as stored by the older editor.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyBlock {
    /// Block id.
    pub id: String,
    /// Combined `"HH:MM - HH:MM"` text.
    #[serde(default)]
    pub time: String,
    /// Separate start, present on unsaved drafts.
    #[serde(default)]
    pub start_time: Option<String>,
    /// Separate end, present on unsaved drafts.
    #[serde(default)]
    pub end_time: Option<String>,
    /// `"full"` or `"split"`.
    #[serde(rename = "type", default)]
    pub block_type: BlockType,
    /// Full-block title.
    #[serde(default)]
    pub title: String,
    /// Full-block room **name**.
    #[serde(default)]
    pub room: String,
    /// Full-block hall id, when the record was already migrated.
    #[serde(default)]
    pub hall_id: Option<String>,
    /// Full-block speaker.
    #[serde(default)]
    pub speaker: Option<String>,
    /// Full-block linked work.
    #[serde(default)]
    pub linked_work_id: Option<String>,
    /// Split sessions keyed by hall id.
    #[serde(default)]
    pub sessions: BTreeMap<String, Session>,
}

impl LegacyBlock {
    /// Time range: separate fields first, then the combined text.
    pub fn interval(&self) -> Option<Interval> {
        let separate = || -> Option<Interval> {
            let start: ClockTime = self.start_time.as_deref()?.parse().ok()?;
            let end: ClockTime = self.end_time.as_deref()?.parse().ok()?;
            Some(Interval::new(start, end))
        };
        separate().or_else(|| parse_interval(&self.time))
    }

    /// Converts to a [`Block`], resolving the room name against `halls`.
    pub fn into_block(self, halls: &[Hall]) -> Result<Block, ImportError> {
        let time = self.interval();
        if time.is_none() {
            warn!(block_id = %self.id, time = %self.time, "legacy block has no usable time");
        }

        let shape = match self.block_type {
            BlockType::Full => {
                let hall_id = match self.hall_id {
                    Some(id) => id,
                    None => resolve_hall_name(halls, &self.room)
                        .map(str::to_string)
                        .ok_or_else(|| ImportError::UnknownRoom {
                            block_id: self.id.clone(),
                            room: self.room.clone(),
                        })?,
                };
                BlockShape::Full(FullSession {
                    hall_id,
                    title: self.title,
                    speaker: self.speaker.filter(|s| !s.is_empty()),
                    linked_work_id: self.linked_work_id,
                })
            }
            BlockType::Split => BlockShape::Split {
                sessions: self.sessions,
            },
        };

        Ok(Block {
            id: self.id,
            time,
            shape,
        })
    }
}

/// Imports a legacy day → blocks JSON map.
pub fn import_legacy_program(json: &str, halls: &[Hall]) -> Result<Program, ImportError> {
    let raw: BTreeMap<String, Vec<LegacyBlock>> = serde_json::from_str(json)?;
    let mut program = Program::new();
    for (day_id, blocks) in raw {
        let blocks = blocks
            .into_iter()
            .map(|b| b.into_block(halls))
            .collect::<Result<Vec<_>, _>>()?;
        program.set_blocks(day_id, blocks);
    }
    Ok(program)
}
