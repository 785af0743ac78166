//! Service-level errors.

use thiserror::Error;

use crate::store::StoreError;

/// Failure of a [`ProgramService`](crate::service::ProgramService) operation.
#[derive(Debug, Error)]
pub enum ProgramError {
    /// Persistence failed. In-memory state keeps the change.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// No day with this id.
    #[error("unknown day '{0}'")]
    UnknownDay(String),

    /// No block with this id on the active day.
    #[error("unknown block '{0}'")]
    UnknownBlock(String),

    /// No hall with this id.
    #[error("unknown hall '{0}'")]
    UnknownHall(String),

    /// A hall with this name already exists.
    #[error("hall '{0}' already exists")]
    DuplicateHall(String),

    /// The only remaining day cannot be removed.
    #[error("the program must keep at least one day")]
    LastDay,

    /// The operation needs an active day and there is none.
    #[error("no active day")]
    NoActiveDay,

    /// Schedule configuration rejected.
    #[error("invalid schedule configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias for service operations.
pub type ProgramResult<T> = Result<T, ProgramError>;
