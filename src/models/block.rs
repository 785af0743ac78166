//! Program block model.
//!
//! A block is the unit of storage of a program day: one time range that is
//! either a single-hall ("full") activity or a set of simultaneous per-hall
//! sessions ("split").
//!
//! # Persisted Shape
//!
//! ```json
//! { "id": "b1", "time": "09:00 - 10:00", "type": "full",
//!   "hallId": "h1", "title": "Opening", "speaker": "Dr. Ruiz" }
//! { "id": "b2", "time": "10:00 - 11:00", "type": "split",
//!   "sessions": { "h1": { "title": "Talk A" }, "h2": { "title": "" } } }
//! ```
//!
//! The edit-time shape (separate start/end fields) lives in
//! [`ScheduleDraft`](crate::editor::ScheduleDraft); blocks only carry the
//! combined range.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::clock::{time_text, Interval};

/// Which of the two block shapes a block (or draft) has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// One hall for the whole range.
    #[default]
    Full,
    /// Simultaneous sessions, one per hall.
    Split,
}

/// A per-hall sub-session of a split block.
///
/// A session with an empty title does not occupy its hall.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Session title; empty = hall unused.
    #[serde(default)]
    pub title: String,
    /// Optional speaker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    /// Academic work this session presents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_work_id: Option<String>,
}

impl Session {
    /// Creates a titled session.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the speaker.
    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speaker = Some(speaker.into());
        self
    }

    /// Whether this session occupies its hall.
    #[inline]
    pub fn is_occupying(&self) -> bool {
        !self.title.is_empty()
    }
}

/// A single-hall activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullSession {
    /// Occupied hall.
    pub hall_id: String,
    /// Activity title.
    #[serde(default)]
    pub title: String,
    /// Optional speaker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    /// Academic work this activity presents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_work_id: Option<String>,
}

/// The two mutually exclusive block shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BlockShape {
    /// One hall for the whole range.
    Full(FullSession),
    /// Per-hall sessions keyed by hall id.
    Split {
        #[serde(default)]
        sessions: BTreeMap<String, Session>,
    },
}

/// A scheduled block on one program day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Stable identifier assigned at creation.
    pub id: String,
    /// Time range, persisted as `"HH:MM - HH:MM"`.
    /// `None` when the stored text was missing or malformed.
    #[serde(default, with = "time_text")]
    pub time: Option<Interval>,
    /// Full or split content.
    #[serde(flatten)]
    pub shape: BlockShape,
}

impl Block {
    /// Creates a single-hall block.
    pub fn full(
        id: impl Into<String>,
        time: Interval,
        hall_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            time: Some(time),
            shape: BlockShape::Full(FullSession {
                hall_id: hall_id.into(),
                title: title.into(),
                speaker: None,
                linked_work_id: None,
            }),
        }
    }

    /// Creates a split block with no sessions.
    pub fn split(id: impl Into<String>, time: Interval) -> Self {
        Self {
            id: id.into(),
            time: Some(time),
            shape: BlockShape::Split {
                sessions: BTreeMap::new(),
            },
        }
    }

    /// Adds a session for a hall. No-op on full blocks.
    pub fn with_session(mut self, hall_id: impl Into<String>, session: Session) -> Self {
        if let BlockShape::Split { sessions } = &mut self.shape {
            sessions.insert(hall_id.into(), session);
        }
        self
    }

    /// Sets the speaker. No-op on split blocks.
    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        if let BlockShape::Full(full) = &mut self.shape {
            full.speaker = Some(speaker.into());
        }
        self
    }

    /// Shape discriminant.
    pub fn block_type(&self) -> BlockType {
        match self.shape {
            BlockShape::Full(_) => BlockType::Full,
            BlockShape::Split { .. } => BlockType::Split,
        }
    }

    /// Persisted time text; empty when the range is unknown.
    pub fn time_label(&self) -> String {
        self.time.map(|t| t.to_string()).unwrap_or_default()
    }

    /// Hall ids this block occupies.
    ///
    /// Full blocks occupy their hall; split blocks occupy every hall whose
    /// session has a title.
    pub fn occupied_halls(&self) -> Vec<&str> {
        match &self.shape {
            BlockShape::Full(full) => vec![full.hall_id.as_str()],
            BlockShape::Split { sessions } => sessions
                .iter()
                .filter(|(_, s)| s.is_occupying())
                .map(|(hall_id, _)| hall_id.as_str())
                .collect(),
        }
    }

    /// Every hall id this block references, titled or not.
    pub fn referenced_halls(&self) -> Vec<&str> {
        match &self.shape {
            BlockShape::Full(full) => vec![full.hall_id.as_str()],
            BlockShape::Split { sessions } => sessions.keys().map(String::as_str).collect(),
        }
    }
}
