//! Editor state machine.
//!
//! ```text
//!            start_create            request_save (ok)
//!   Idle ───────────────▶ Creating ─────────────────────▶ Idle + PersistDay
//!    │  start_edit        (or Editing)
//!    ├──────────────▶ Editing │ request_save (conflicts)
//!    │                        ▼
//!    │                 ConflictPending ──▶ cancel: back to Creating / Editing
//!    │                        │ confirm_override
//!    │                        ▼
//!    │                 Idle + PersistDay
//!    │  request_delete        confirm_delete
//!    └──────────────▶ ConfirmDelete ─────────────────▶ Idle + PersistDay
//! ```
//!
//! Every transition consumes the current state and returns the next state
//! together with the effects the caller must carry out. Transitions that do
//! not apply to the current state return it unchanged with no effects.

use tracing::{debug, info, warn};

use super::draft::{DraftError, DraftField, ScheduleDraft, DEFAULT_DURATION_MINUTES};
use crate::availability::{first_free_slot, SlotQuery};
use crate::conflict::{detect_conflicts, Conflict};
use crate::grid::generate_slots;
use crate::models::{upsert_sorted, without_block, Block, Hall, ScheduleConfig};

/// Read-only view of the day being edited.
#[derive(Debug, Clone, Copy)]
pub struct DayContext<'a> {
    /// Day id.
    pub day_id: &'a str,
    /// Blocks currently stored for the day.
    pub blocks: &'a [Block],
    /// Known halls.
    pub halls: &'a [Hall],
    /// Time grid configuration.
    pub config: &'a ScheduleConfig,
}

/// Work the caller must carry out after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace the day's blocks with `blocks` and persist the program.
    PersistDay {
        /// Day id.
        day_id: String,
        /// New, time-sorted block list.
        blocks: Vec<Block>,
    },
    /// Show the organizer the conflicts blocking a save.
    ShowConflicts(Vec<Conflict>),
    /// Show a validation message; the draft is kept.
    Reject(DraftError),
}

/// Editor states.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorState {
    /// No draft open.
    #[default]
    Idle,
    /// Drafting a new block.
    Creating(ScheduleDraft),
    /// Editing an existing block.
    Editing(ScheduleDraft),
    /// Save found conflicts; waiting for override or cancel.
    ConflictPending {
        /// Draft to save on override.
        draft: ScheduleDraft,
        /// Conflicts shown to the organizer.
        conflicts: Vec<Conflict>,
        /// Whether the draft is a block not yet stored.
        creating: bool,
    },
    /// Waiting for delete confirmation.
    ConfirmDelete {
        /// Block to remove.
        block_id: String,
    },
}

/// Result of a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Next state.
    pub state: EditorState,
    /// Effects to carry out, in order.
    pub effects: Vec<Effect>,
}

impl Transition {
    fn to(state: EditorState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn with(state: EditorState, effect: Effect) -> Self {
        Self {
            state,
            effects: vec![effect],
        }
    }

    fn ignored(state: EditorState, action: &str) -> Self {
        warn!(state = state.name(), action, "transition not allowed, ignoring");
        Self::to(state)
    }
}

fn persist(ctx: &DayContext<'_>, block: Block) -> Effect {
    Effect::PersistDay {
        day_id: ctx.day_id.to_string(),
        blocks: upsert_sorted(ctx.blocks, block),
    }
}

impl EditorState {
    fn reopen(draft: ScheduleDraft, creating: bool) -> Self {
        if creating {
            Self::Creating(draft)
        } else {
            Self::Editing(draft)
        }
    }

    /// State name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Creating(_) => "creating",
            Self::Editing(_) => "editing",
            Self::ConflictPending { .. } => "conflict_pending",
            Self::ConfirmDelete { .. } => "confirm_delete",
        }
    }

    /// Whether no draft or confirmation is open.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The open draft, if any.
    pub fn draft(&self) -> Option<&ScheduleDraft> {
        match self {
            Self::Creating(d) | Self::Editing(d) | Self::ConflictPending { draft: d, .. } => Some(d),
            Self::Idle | Self::ConfirmDelete { .. } => None,
        }
    }

    /// Opens a new full-block draft.
    ///
    /// Defaults: first hall, 30 minutes, starting at the first grid slot
    /// where that fits (or the first slot when none does).
    pub fn start_create(self, ctx: &DayContext<'_>, block_id: impl Into<String>) -> Transition {
        if !self.is_idle() {
            return Transition::ignored(self, "start_create");
        }

        let mut draft = ScheduleDraft::new(block_id);
        draft.hall_id = ctx.halls.first().map(|h| h.id.clone());

        let start = match &draft.hall_id {
            Some(hall_id) => {
                let query = SlotQuery::full(hall_id.as_str(), DEFAULT_DURATION_MINUTES, &draft.id);
                first_free_slot(ctx.config, ctx.blocks, ctx.halls, &query)
            }
            None => None,
        }
        .or_else(|| generate_slots(ctx.config).first().copied());

        if let Some(start) = start {
            draft = draft.with_range(start, start.plus_minutes(DEFAULT_DURATION_MINUTES));
        }

        debug!(block_id = %draft.id, day_id = ctx.day_id, "creating block");
        Transition::to(Self::Creating(draft))
    }

    /// Opens an existing block for editing.
    pub fn start_edit(self, block: &Block, halls: &[Hall]) -> Transition {
        if !self.is_idle() {
            return Transition::ignored(self, "start_edit");
        }

        let mut draft = ScheduleDraft::from_block(block);
        if draft.hall_id.is_none() {
            draft.hall_id = halls.first().map(|h| h.id.clone());
        }

        debug!(block_id = %draft.id, "editing block");
        Transition::to(Self::Editing(draft))
    }

    /// Applies a field edit to the open draft.
    pub fn set_field(self, field: DraftField) -> Transition {
        match self {
            Self::Creating(mut draft) => {
                draft.apply(field);
                Transition::to(Self::Creating(draft))
            }
            Self::Editing(mut draft) => {
                draft.apply(field);
                Transition::to(Self::Editing(draft))
            }
            other => Transition::ignored(other, "set_field"),
        }
    }

    /// Validates the draft and saves it, or stops on conflicts.
    pub fn request_save(self, ctx: &DayContext<'_>) -> Transition {
        let (draft, creating) = match self {
            Self::Creating(draft) => (draft, true),
            Self::Editing(draft) => (draft, false),
            other => return Transition::ignored(other, "request_save"),
        };
        let block = match draft.to_block() {
            Ok(block) => block,
            Err(err) => {
                debug!(block_id = %draft.id, %err, "save rejected");
                return Transition::with(Self::reopen(draft, creating), Effect::Reject(err));
            }
        };

        let conflicts = detect_conflicts(&block, ctx.blocks, ctx.halls);
        if !conflicts.is_empty() {
            info!(
                block_id = %block.id,
                day_id = ctx.day_id,
                count = conflicts.len(),
                "save blocked by conflicts"
            );
            return Transition::with(
                Self::ConflictPending {
                    draft,
                    conflicts: conflicts.clone(),
                    creating,
                },
                Effect::ShowConflicts(conflicts),
            );
        }

        info!(block_id = %block.id, day_id = ctx.day_id, time = %block.time_label(), "block saved");
        Transition::with(Self::Idle, persist(ctx, block))
    }

    /// Saves the pending draft despite its conflicts. Not re-validated
    /// against the day's blocks.
    pub fn confirm_override(self, ctx: &DayContext<'_>) -> Transition {
        let (draft, conflicts, creating) = match self {
            Self::ConflictPending {
                draft,
                conflicts,
                creating,
            } => (draft, conflicts, creating),
            other => return Transition::ignored(other, "confirm_override"),
        };

        match draft.to_block() {
            Ok(block) => {
                warn!(
                    block_id = %block.id,
                    day_id = ctx.day_id,
                    overridden = conflicts.len(),
                    "block saved over conflicts"
                );
                Transition::with(Self::Idle, persist(ctx, block))
            }
            Err(err) => Transition::with(Self::reopen(draft, creating), Effect::Reject(err)),
        }
    }

    /// Backs out of the current step.
    ///
    /// A pending conflict reopens the draft untouched, as `Creating` or
    /// `Editing` depending on where it came from; any other open state closes.
    pub fn cancel(self) -> Transition {
        match self {
            Self::ConflictPending {
                draft, creating, ..
            } => Transition::to(Self::reopen(draft, creating)),
            _ => Transition::to(Self::Idle),
        }
    }

    /// Asks for confirmation before deleting a block.
    pub fn request_delete(self, block_id: impl Into<String>) -> Transition {
        if !self.is_idle() {
            return Transition::ignored(self, "request_delete");
        }
        Transition::to(Self::ConfirmDelete {
            block_id: block_id.into(),
        })
    }

    /// Removes the block awaiting confirmation.
    pub fn confirm_delete(self, ctx: &DayContext<'_>) -> Transition {
        let block_id = match self {
            Self::ConfirmDelete { block_id } => block_id,
            other => return Transition::ignored(other, "confirm_delete"),
        };

        info!(block_id = %block_id, day_id = ctx.day_id, "block deleted");
        Transition::with(
            Self::Idle,
            Effect::PersistDay {
                day_id: ctx.day_id.to_string(),
                blocks: without_block(ctx.blocks, &block_id),
            },
        )
    }
}
