//! Editable block draft.
//!
//! The draft holds the edit-time shape of a block: separate start and end
//! times, and both the single-hall fields and the per-hall sessions so that
//! switching the block type does not discard input. [`ScheduleDraft::to_block`]
//! normalizes it into the persisted [`Block`] shape.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use crate::models::{
    Block, BlockShape, BlockType, ClockTime, FullSession, Interval, Session, Work,
};

/// Duration offered when a draft has no usable range yet.
pub const DEFAULT_DURATION_MINUTES: u32 = 30;

/// Why a draft cannot be saved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    /// No start time entered.
    #[error("start time is required")]
    MissingStartTime,
    /// No end time entered.
    #[error("end time is required")]
    MissingEndTime,
    /// End is not after start.
    #[error("end time {end} must be after start time {start}")]
    EmptyRange {
        /// Entered start.
        start: ClockTime,
        /// Entered end.
        end: ClockTime,
    },
    /// Range runs past `24:00`.
    #[error("end time {end} is past the end of the day")]
    PastEndOfDay {
        /// Entered end.
        end: ClockTime,
    },
    /// Single-hall block without a hall.
    #[error("a single-hall block needs a hall")]
    MissingHall,
}

/// A single field edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftField {
    /// New start time; the current duration is kept.
    StartTime(Option<ClockTime>),
    /// New end time.
    EndTime(Option<ClockTime>),
    /// New duration in minutes; moves the end time.
    Duration(u32),
    /// Switch between full and split.
    Type(BlockType),
    /// Full-block title.
    Title(String),
    /// Full-block speaker.
    Speaker(String),
    /// Full-block hall id.
    Hall(String),
    /// Title of one hall's split session.
    SessionTitle {
        /// Hall id.
        hall_id: String,
        /// Session title.
        title: String,
    },
    /// Speaker of one hall's split session.
    SessionSpeaker {
        /// Hall id.
        hall_id: String,
        /// Session speaker.
        speaker: String,
    },
    /// Prefill the full-block title and speaker from an accepted work.
    LinkWork(Work),
    /// Prefill one hall's session from an accepted work.
    LinkSessionWork {
        /// Hall id.
        hall_id: String,
        /// Work to present.
        work: Work,
    },
}

/// In-memory draft of a block being created or edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDraft {
    /// Id of the block this draft creates or replaces.
    pub id: String,
    /// Current shape.
    pub block_type: BlockType,
    /// Entered start.
    pub start_time: Option<ClockTime>,
    /// Entered end.
    pub end_time: Option<ClockTime>,
    /// Full-block title.
    pub title: String,
    /// Full-block speaker (empty = none).
    pub speaker: String,
    /// Full-block hall.
    pub hall_id: Option<String>,
    /// Full-block linked work.
    pub linked_work_id: Option<String>,
    /// Split sessions keyed by hall id.
    pub sessions: BTreeMap<String, Session>,
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

impl ScheduleDraft {
    /// Creates an empty full-block draft.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            block_type: BlockType::Full,
            start_time: None,
            end_time: None,
            title: String::new(),
            speaker: String::new(),
            hall_id: None,
            linked_work_id: None,
            sessions: BTreeMap::new(),
        }
    }

    /// Sets the range.
    pub fn with_range(mut self, start: ClockTime, end: ClockTime) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    /// Sets the hall.
    pub fn with_hall(mut self, hall_id: impl Into<String>) -> Self {
        self.hall_id = Some(hall_id.into());
        self
    }

    /// Loads a stored block for editing, splitting its time text back into
    /// start and end.
    pub fn from_block(block: &Block) -> Self {
        let mut draft = Self::new(block.id.clone());
        draft.block_type = block.block_type();
        draft.start_time = block.time.map(|t| t.start);
        draft.end_time = block.time.map(|t| t.end);
        match &block.shape {
            BlockShape::Full(full) => {
                draft.title = full.title.clone();
                draft.speaker = full.speaker.clone().unwrap_or_default();
                draft.hall_id = Some(full.hall_id.clone());
                draft.linked_work_id = full.linked_work_id.clone();
            }
            BlockShape::Split { sessions } => {
                draft.sessions = sessions.clone();
            }
        }
        draft
    }

    /// Entered range, when both ends are present.
    pub fn interval(&self) -> Option<Interval> {
        Some(Interval::new(self.start_time?, self.end_time?))
    }

    /// Duration shown to the organizer.
    ///
    /// `end - start` in minutes, or [`DEFAULT_DURATION_MINUTES`] when either
    /// end is missing or the difference is not positive.
    pub fn duration_minutes(&self) -> u32 {
        self.interval()
            .map(|i| i.duration_minutes())
            .filter(|d| *d > 0)
            .and_then(|d| u32::try_from(d).ok())
            .unwrap_or(DEFAULT_DURATION_MINUTES)
    }

    /// Applies one field edit.
    pub fn apply(&mut self, field: DraftField) {
        match field {
            DraftField::StartTime(start) => {
                let duration = self.duration_minutes();
                self.start_time = start;
                if let Some(start) = start {
                    self.end_time = Some(start.plus_minutes(duration));
                }
            }
            DraftField::EndTime(end) => self.end_time = end,
            DraftField::Duration(minutes) => {
                if minutes == 0 {
                    debug!(block_id = %self.id, "ignoring zero duration");
                    return;
                }
                if let Some(start) = self.start_time {
                    self.end_time = Some(start.plus_minutes(minutes));
                }
            }
            DraftField::Type(block_type) => self.block_type = block_type,
            DraftField::Title(title) => self.title = title,
            DraftField::Speaker(speaker) => self.speaker = speaker,
            DraftField::Hall(hall_id) => self.hall_id = Some(hall_id),
            DraftField::SessionTitle { hall_id, title } => {
                self.sessions.entry(hall_id).or_default().title = title;
            }
            DraftField::SessionSpeaker { hall_id, speaker } => {
                self.sessions.entry(hall_id).or_default().speaker = non_empty(&speaker);
            }
            DraftField::LinkWork(work) => {
                if !work.is_accepted() {
                    debug!(work_id = %work.id, status = %work.status, "work not accepted, not linking");
                    return;
                }
                self.title = work.title;
                self.speaker = work.author;
                self.linked_work_id = Some(work.id);
            }
            DraftField::LinkSessionWork { hall_id, work } => {
                if !work.is_accepted() {
                    debug!(work_id = %work.id, status = %work.status, "work not accepted, not linking");
                    return;
                }
                let session = self.sessions.entry(hall_id).or_default();
                session.title = work.title;
                session.speaker = Some(work.author);
                session.linked_work_id = Some(work.id);
            }
        }
    }

    /// Validates the draft and produces the persisted block.
    pub fn to_block(&self) -> Result<Block, DraftError> {
        let start = self.start_time.ok_or(DraftError::MissingStartTime)?;
        let end = self.end_time.ok_or(DraftError::MissingEndTime)?;
        let range = Interval::new(start, end);
        if !range.is_valid() {
            return Err(DraftError::EmptyRange { start, end });
        }
        if !range.fits_in_day() {
            return Err(DraftError::PastEndOfDay { end });
        }

        let shape = match self.block_type {
            BlockType::Full => BlockShape::Full(FullSession {
                hall_id: self.hall_id.clone().ok_or(DraftError::MissingHall)?,
                title: self.title.clone(),
                speaker: non_empty(&self.speaker),
                linked_work_id: self.linked_work_id.clone(),
            }),
            BlockType::Split => BlockShape::Split {
                sessions: self.sessions.clone(),
            },
        };

        Ok(Block {
            id: self.id.clone(),
            time: Some(range),
            shape,
        })
    }
}
