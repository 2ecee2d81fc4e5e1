//! Room-slot resolution.
//!
//! Maps (room number, date) to the canonical room-assignment id. Callers may
//! hold an id from an earlier exam period; it is never trusted for writes.
//!
//! When several provisionings of the same room cover a date, the most
//! recently provisioned one (latest first date, then latest in directory
//! order) wins.

use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

use crate::models::{GroupKey, RoomAssignment, SlotRequest};

/// Resolves room numbers to canonical room-assignment ids.
#[derive(Debug, Clone, Default)]
pub struct RoomSlotResolver {
    by_room: HashMap<String, Vec<RoomAssignment>>,
}

impl RoomSlotResolver {
    /// Builds a resolver from the room directory.
    pub fn new(rooms: impl IntoIterator<Item = RoomAssignment>) -> Self {
        let mut by_room: HashMap<String, Vec<RoomAssignment>> = HashMap::new();
        for room in rooms {
            by_room.entry(room.room_number.clone()).or_default().push(room);
        }
        Self { by_room }
    }

    /// The provisioning of `room_number` that covers `date`.
    pub fn lookup(&self, room_number: &str, date: NaiveDate) -> Option<&RoomAssignment> {
        self.by_room
            .get(room_number)?
            .iter()
            .enumerate()
            .filter(|(_, r)| r.covers(date))
            .max_by_key(|(order, r)| (r.first_date, *order))
            .map(|(_, r)| r)
    }

    /// Canonical room-assignment id for a room on a date.
    pub fn resolve(&self, room_number: &str, date: NaiveDate) -> Option<&str> {
        self.lookup(room_number, date).map(|r| r.id.as_str())
    }

    /// Resolves a request, logging when the caller's id was stale.
    pub fn resolve_request(&self, request: &SlotRequest) -> Option<&RoomAssignment> {
        let room = self.lookup(&request.room_number, request.date)?;
        if let Some(hint) = &request.room_assignment_hint {
            if hint != &room.id {
                debug!(
                    room = %request.room_number,
                    date = %request.date,
                    stale = %hint,
                    canonical = %room.id,
                    "replaced stale room-assignment id"
                );
            }
        }
        Some(room)
    }

    /// Group key for a request: explicit key, then the room's group, then
    /// the room number.
    pub fn group_key(&self, request: &SlotRequest) -> GroupKey {
        request
            .group_key
            .clone()
            .or_else(|| {
                self.lookup(&request.room_number, request.date)
                    .and_then(|r| r.group_key.clone())
            })
            .unwrap_or_else(|| GroupKey::new(request.room_number.clone()))
    }
}
