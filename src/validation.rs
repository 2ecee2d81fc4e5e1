//! Input validation for planning runs.
//!
//! Checks structural integrity of slot requests and the staff directory
//! before anything is planned. Detects:
//! - Duplicate teacher IDs
//! - The same room requested twice for one date (a room-slot is one room
//!   on one date, whatever the session)
//! - Shift windows that end before they start
//! - Empty room numbers
//!
//! All issues are collected; validation never stops at the first one.

use std::collections::HashSet;

use crate::models::{SlotRequest, Teacher};

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
    /// Two teachers share the same ID.
    DuplicateTeacherId,
    /// A room is requested twice for the same date.
    DuplicateSlot,
    /// A shift window does not end after it starts.
    InvalidShiftWindow,
    /// A request has no room number.
    EmptyRoomNumber,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a list of slot requests.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_requests(requests: &[SlotRequest]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for req in requests {
        if req.room_number.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyRoomNumber,
                format!("Request on {} has no room number", req.date),
            ));
        }

        if !seen.insert((req.room_number.as_str(), req.date)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateSlot,
                format!(
                    "Room '{}' requested twice on {}",
                    req.room_number, req.date
                ),
            ));
        }

        if let Some(shift) = &req.shift {
            if !shift.is_valid() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidShiftWindow,
                    format!(
                        "Room '{}' on {}: shift {}-{} ends before it starts",
                        req.room_number, req.date, shift.start, shift.end
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates the staff directory.
pub fn validate_teachers(teachers: &[Teacher]) -> ValidationResult {
    let mut ids = HashSet::new();
    let errors: Vec<_> = teachers
        .iter()
        .filter(|t| !ids.insert(t.id.as_str()))
        .map(|t| {
            ValidationError::new(
                ValidationErrorKind::DuplicateTeacherId,
                format!("Duplicate teacher ID: {}", t.id),
            )
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
