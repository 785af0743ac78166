//! Event day model.

use serde::{Deserialize, Serialize};

/// Placeholder date for a freshly added day.
pub const NEW_DAY_DATE: &str = "Nueva fecha";

/// One day of the event. Its blocks live in [`Program`](super::Program).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    /// Unique day identifier.
    pub id: String,
    /// Short label (e.g., "Día 1").
    pub label: String,
    /// Free-form date text shown to attendees.
    pub date: String,
}

impl Day {
    /// Creates a new day.
    pub fn new(id: impl Into<String>, label: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            date: date.into(),
        }
    }

    /// Creates the `number`-th day (1-based) with default label and date.
    pub fn numbered(id: impl Into<String>, number: usize) -> Self {
        Self::new(id, format!("Día {number}"), NEW_DAY_DATE)
    }

    /// Applies a field update.
    pub fn apply(&mut self, field: DayField) {
        match field {
            DayField::Label(label) => self.label = label,
            DayField::Date(date) => self.date = date,
        }
    }
}

/// Editable day fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayField {
    /// Replace the label.
    Label(String),
    /// Replace the date text.
    Date(String),
}
