//! Hall (room) model.
//!
//! Halls are the physical rooms a program books. Blocks reference halls by
//! id; names are for display and for resolving legacy data that stored the
//! room name instead of the id.

use serde::{Deserialize, Serialize};

/// A named physical room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hall {
    /// Unique hall identifier.
    pub id: String,
    /// Human-readable name shown to organizers and in conflict reasons.
    pub name: String,
}

impl Hall {
    /// Creates a new hall.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Whether this hall's name matches `name`, ignoring case and
    /// surrounding whitespace.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }
}

/// Finds a hall by id.
pub fn find_hall<'a>(halls: &'a [Hall], hall_id: &str) -> Option<&'a Hall> {
    halls.iter().find(|h| h.id == hall_id)
}

/// Display name for a hall id, falling back to the id itself when the hall
/// no longer exists.
pub fn hall_display_name<'a>(halls: &'a [Hall], hall_id: &'a str) -> &'a str {
    find_hall(halls, hall_id)
        .map(|h| h.name.as_str())
        .unwrap_or(hall_id)
}

/// Resolves a legacy room name to a hall id.
pub fn resolve_hall_name<'a>(halls: &'a [Hall], name: &str) -> Option<&'a str> {
    halls
        .iter()
        .find(|h| h.has_name(name))
        .map(|h| h.id.as_str())
}
