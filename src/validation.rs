//! Program integrity checks.
//!
//! Checks structural integrity of the loaded program before it is edited.
//! Detects:
//! - Duplicate day, hall and block ids
//! - Blocks whose time text was missing or malformed
//! - Blocks whose end is not after their start
//! - Blocks referencing halls that no longer exist (orphaned references)
//! - Block collections for days that are not in the day list
//!
//! None of these stop the editor from working; the detector skips blocks
//! without a time range and prints hall ids for orphaned halls.

use std::collections::HashSet;

use crate::models::{Day, Hall, Program};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A block has no parseable time range.
    MissingTimeRange,
    /// A block's end is not after its start.
    EmptyTimeRange,
    /// A block references a hall that doesn't exist.
    InvalidHallReference,
    /// Blocks are stored for a day that isn't in the day list.
    UnknownDay,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a loaded program.
///
/// Checks:
/// 1. No duplicate day IDs
/// 2. No duplicate hall IDs
/// 3. No duplicate block IDs within a day
/// 4. Every block has a time range, and it is non-empty
/// 5. Every hall a block references exists
/// 6. Every block collection belongs to a known day
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_program(days: &[Day], program: &Program, halls: &[Hall]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut day_ids = HashSet::new();
    for day in days {
        if !day_ids.insert(day.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate day ID: {}", day.id),
            ));
        }
    }

    let mut hall_ids = HashSet::new();
    for hall in halls {
        if !hall_ids.insert(hall.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate hall ID: {}", hall.id),
            ));
        }
    }

    for (day_id, blocks) in program.iter() {
        if !day_ids.contains(day_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownDay,
                format!("Blocks stored for unknown day '{day_id}'"),
            ));
        }

        let mut block_ids = HashSet::new();
        for block in blocks {
            if !block_ids.insert(block.id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Duplicate block ID on day '{day_id}': {}", block.id),
                ));
            }

            match block.time {
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::MissingTimeRange,
                    format!("Block '{}' on day '{day_id}' has no valid time", block.id),
                )),
                Some(range) if !range.is_valid() => errors.push(ValidationError::new(
                    ValidationErrorKind::EmptyTimeRange,
                    format!("Block '{}' on day '{day_id}' ends before it starts ({range})", block.id),
                )),
                Some(_) => {}
            }

            for hall_id in block.referenced_halls() {
                if !hall_ids.contains(hall_id) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidHallReference,
                        format!(
                            "Block '{}' on day '{day_id}' references unknown hall '{hall_id}'",
                            block.id
                        ),
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
