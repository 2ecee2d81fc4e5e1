//! Error taxonomy.
//!
//! Two layers:
//! - [`InvigilationError`]: run-level failures, returned as `Err`.
//! - [`SlotFailure`]: per-slot outcomes of a batch, carried as data in the
//!   preview. A slot that cannot be staffed never aborts the batch.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::models::{Role, Session};
use crate::validation::ValidationError;

/// Failure reported by an external collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("conflicting record: {0}")]
    Conflict(String),

    #[error("record not found: {0}")]
    NotFound(String),
}

/// Run-level errors.
#[derive(Error, Debug)]
pub enum InvigilationError {
    #[error("prefetch failed, nothing was planned: {0}")]
    PrefetchFailed(#[source] StoreError),

    #[error("commit failed after {applied} of {attempted} writes: {source}")]
    CommitFailed {
        applied: usize,
        attempted: usize,
        #[source]
        source: StoreError,
    },

    #[error("room {room_number} is not provisioned on {date}")]
    RoomNotFoundForDate { room_number: String, date: NaiveDate },

    #[error("invalid input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    #[error("teacher {teacher_id} is not eligible as {role}: {reason}")]
    NotEligible {
        teacher_id: String,
        role: Role,
        reason: String,
    },

    #[error("teacher {teacher_id} is unavailable on {date} ({session}): {reason}")]
    Unavailable {
        teacher_id: String,
        date: NaiveDate,
        session: Session,
        reason: String,
    },

    #[error("unknown teacher: {0}")]
    UnknownTeacher(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, InvigilationError>;

/// Why no candidate could fill a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShortageReason {
    /// Nobody of an eligible rank exists in the directory.
    NoCandidatesOfRank,
    /// Eligible teachers exist but all already sit in this date and session.
    AllBusy,
    /// Every free eligible teacher has reached their rank's period limit.
    AllOverLimit,
}

impl fmt::Display for ShortageReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortageReason::NoCandidatesOfRank => f.write_str("no teachers of an eligible rank"),
            ShortageReason::AllBusy => {
                f.write_str("all eligible teachers are busy in this session")
            }
            ShortageReason::AllOverLimit => {
                f.write_str("all free eligible teachers reached their period limit")
            }
        }
    }
}

/// Why a slot in a batch could not be (fully) staffed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotFailure {
    NoEligibleSupervisor(ShortageReason),
    NoEligibleAssistant(ShortageReason),
    RoomNotFoundForDate,
}

impl fmt::Display for SlotFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotFailure::NoEligibleSupervisor(reason) => {
                write!(f, "no eligible supervisor: {reason}")
            }
            SlotFailure::NoEligibleAssistant(reason) => {
                write!(f, "no eligible assistant: {reason}")
            }
            SlotFailure::RoomNotFoundForDate => {
                f.write_str("room is not provisioned on this date")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_failure_messages_are_specific() {
        let busy = SlotFailure::NoEligibleSupervisor(ShortageReason::AllBusy);
        let limit = SlotFailure::NoEligibleSupervisor(ShortageReason::AllOverLimit);
        assert_ne!(busy.to_string(), limit.to_string());
        assert!(busy.to_string().contains("busy"));
        assert!(limit.to_string().contains("limit"));
    }

    #[test]
    fn test_commit_failed_message() {
        let err = InvigilationError::CommitFailed {
            applied: 3,
            attempted: 8,
            source: StoreError::Unavailable("timeout".into()),
        };
        assert_eq!(
            err.to_string(),
            "commit failed after 3 of 8 writes: store unavailable: timeout"
        );
    }
}
