//! Invigilation assignment records.
//!
//! A record says that a teacher holds a role in a room-slot. At most one
//! record per (room-assignment, date, role) exists at any time; replacing a
//! holder is delete-then-insert.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Role, Session, ShiftWindow};

/// Identity of a room-slot: one room provisioning on one date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomSlotKey {
    pub room_assignment_id: String,
    pub date: NaiveDate,
}

/// A teacher holding a role in a room-slot, persisted or staged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Canonical room-assignment id.
    pub room_assignment_id: String,
    /// Role held.
    pub role: Role,
    /// Assigned teacher.
    pub teacher_id: String,
    /// Exam date.
    pub date: NaiveDate,
    /// Exam session.
    pub session: Session,
    /// Optional shift window.
    pub shift: Option<ShiftWindow>,
}

impl AssignmentRecord {
    /// Creates a record without a shift window.
    pub fn new(
        room_assignment_id: impl Into<String>,
        role: Role,
        teacher_id: impl Into<String>,
        date: NaiveDate,
        session: Session,
    ) -> Self {
        Self {
            room_assignment_id: room_assignment_id.into(),
            role,
            teacher_id: teacher_id.into(),
            date,
            session,
            shift: None,
        }
    }

    /// Sets the shift window.
    pub fn with_shift(mut self, shift: Option<ShiftWindow>) -> Self {
        self.shift = shift;
        self
    }

    /// The room-slot this record belongs to.
    pub fn slot_key(&self) -> RoomSlotKey {
        RoomSlotKey {
            room_assignment_id: self.room_assignment_id.clone(),
            date: self.date,
        }
    }

    /// Whether this record occupies the given room-slot and role.
    pub fn occupies(&self, room_assignment_id: &str, date: NaiveDate, role: Role) -> bool {
        self.room_assignment_id == room_assignment_id && self.date == date && self.role == role
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupies() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let rec = AssignmentRecord::new("RA1", Role::Supervisor, "T1", date, Session::Morning);

        assert!(rec.occupies("RA1", date, Role::Supervisor));
        assert!(!rec.occupies("RA1", date, Role::Assistant));
        assert!(!rec.occupies("RA2", date, Role::Supervisor));
        assert_eq!(
            rec.slot_key(),
            RoomSlotKey {
                room_assignment_id: "RA1".into(),
                date
            }
        );
    }
}
