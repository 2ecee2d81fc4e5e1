//! Room-slot request model.
//!
//! A slot request names one physical room on one exam date and session.
//! The caller may also hold a room-assignment id for it, but that id can be
//! stale: rooms are re-provisioned between exam periods, so the id used for
//! writes is always re-derived by the [`RoomSlotResolver`].
//!
//! # Session Model
//! Sessions are coarse: an exam starting before noon is a Morning exam,
//! anything else is an Afternoon exam. Conflicts are detected per
//! (date, session), not per shift window.
//!
//! [`RoomSlotResolver`]: crate::resolver::RoomSlotResolver

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-day exam session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Session {
    Morning,
    Afternoon,
}

impl Session {
    /// Derives the session from an exam start time.
    pub fn from_start_time(start: NaiveTime) -> Self {
        if start.hour() < 12 {
            Session::Morning
        } else {
            Session::Afternoon
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Session::Morning => f.write_str("Morning"),
            Session::Afternoon => f.write_str("Afternoon"),
        }
    }
}

/// Invigilation shift window [start, end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl ShiftWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Whether the window has positive length.
    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }
}

/// Identity of the recurring student group that sits in a room.
///
/// Pair history is keyed by this, so the same group does not keep meeting
/// the same invigilator pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(pub String);

impl GroupKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A request to staff one room on one date and session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRequest {
    /// Physical room number.
    pub room_number: String,
    /// Exam date.
    pub date: NaiveDate,
    /// Exam session.
    pub session: Session,
    /// Optional invigilation shift.
    pub shift: Option<ShiftWindow>,
    /// Recurring group key for repeat avoidance. `None` = resolved from the
    /// room record, falling back to the room number.
    pub group_key: Option<GroupKey>,
    /// Room-assignment id held by the caller. Advisory only.
    pub room_assignment_hint: Option<String>,
}

impl SlotRequest {
    /// Creates a request for a room on a date and session.
    pub fn new(room_number: impl Into<String>, date: NaiveDate, session: Session) -> Self {
        Self {
            room_number: room_number.into(),
            date,
            session,
            shift: None,
            group_key: None,
            room_assignment_hint: None,
        }
    }

    /// Creates a request from exam start and end times.
    ///
    /// The session is derived from `start`, and the exam times become the
    /// shift window.
    pub fn from_exam_times(
        room_number: impl Into<String>,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Self {
        Self::new(room_number, date, Session::from_start_time(start))
            .with_shift(ShiftWindow::new(start, end))
    }

    /// Sets the shift window.
    pub fn with_shift(mut self, shift: ShiftWindow) -> Self {
        self.shift = Some(shift);
        self
    }

    /// Sets the recurring group key.
    pub fn with_group_key(mut self, key: impl Into<String>) -> Self {
        self.group_key = Some(GroupKey::new(key));
        self
    }

    /// Sets the caller-held room-assignment id.
    pub fn with_room_assignment_hint(mut self, id: impl Into<String>) -> Self {
        self.room_assignment_hint = Some(id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_session_derivation() {
        assert_eq!(Session::from_start_time(time(8, 30)), Session::Morning);
        assert_eq!(Session::from_start_time(time(11, 59)), Session::Morning);
        assert_eq!(Session::from_start_time(time(12, 0)), Session::Afternoon);
        assert_eq!(Session::from_start_time(time(15, 0)), Session::Afternoon);
    }

    #[test]
    fn test_from_exam_times() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let req = SlotRequest::from_exam_times("B-101", date, time(13, 0), time(15, 0));

        assert_eq!(req.room_number, "B-101");
        assert_eq!(req.session, Session::Afternoon);
        assert_eq!(req.shift, Some(ShiftWindow::new(time(13, 0), time(15, 0))));
        assert!(req.group_key.is_none());
    }

    #[test]
    fn test_shift_validity() {
        assert!(ShiftWindow::new(time(9, 0), time(11, 0)).is_valid());
        assert!(!ShiftWindow::new(time(11, 0), time(9, 0)).is_valid());
        assert!(!ShiftWindow::new(time(9, 0), time(9, 0)).is_valid());
    }
}
