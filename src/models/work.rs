//! Academic work records, read only to prefill block titles and speakers.

use serde::{Deserialize, Serialize};

/// A submitted academic work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Work {
    /// Unique work identifier.
    pub id: String,
    /// Work title.
    pub title: String,
    /// Presenting author.
    pub author: String,
    /// Review status as stored by the catalog (e.g., "accepted", "Aceptado").
    pub status: String,
}

impl Work {
    /// Creates a new work record.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            status: status.into(),
        }
    }

    /// Whether the work passed review and may be placed in the program.
    pub fn is_accepted(&self) -> bool {
        let status = self.status.trim();
        status.eq_ignore_ascii_case("accepted") || status.eq_ignore_ascii_case("aceptado")
    }
}
