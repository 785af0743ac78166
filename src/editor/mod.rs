//! Block editor workflow.
//!
//! A reducer over one [`ScheduleDraft`]: each transition takes the current
//! [`EditorState`], returns the next one plus the [`Effect`]s to execute
//! (persist a day, show conflicts, show a validation message). The reducer
//! never touches storage; [`ProgramService`](crate::service::ProgramService)
//! executes the effects.

mod draft;
mod state;

pub use draft::{DraftError, DraftField, ScheduleDraft, DEFAULT_DURATION_MINUTES};
pub use state::{DayContext, EditorState, Effect, Transition};
