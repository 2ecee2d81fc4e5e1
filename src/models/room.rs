//! Room provisioning records.
//!
//! A physical room is provisioned once per exam period. Each provisioning
//! gets its own room-assignment id, which is the key every invigilation
//! record is written against.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::GroupKey;

/// One provisioning of a physical room for an exam period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomAssignment {
    /// Canonical room-assignment id.
    pub id: String,
    /// Physical room number.
    pub room_number: String,
    /// First exam date covered (inclusive).
    pub first_date: NaiveDate,
    /// Last exam date covered (inclusive).
    pub last_date: NaiveDate,
    /// Recurring student group seated here, if known.
    pub group_key: Option<GroupKey>,
}

impl RoomAssignment {
    /// Creates a provisioning covering `[first_date, last_date]`.
    pub fn new(
        id: impl Into<String>,
        room_number: impl Into<String>,
        first_date: NaiveDate,
        last_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            room_number: room_number.into(),
            first_date,
            last_date,
            group_key: None,
        }
    }

    /// Sets the group key.
    pub fn with_group_key(mut self, key: impl Into<String>) -> Self {
        self.group_key = Some(GroupKey::new(key));
        self
    }

    /// Whether this provisioning covers the given date.
    #[inline]
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.first_date && date <= self.last_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, day).unwrap()
    }

    #[test]
    fn test_covers_is_inclusive() {
        let room = RoomAssignment::new("RA1", "B-101", d(1), d(10));
        assert!(room.covers(d(1)));
        assert!(room.covers(d(5)));
        assert!(room.covers(d(10)));
        assert!(!room.covers(d(11)));
    }
}
