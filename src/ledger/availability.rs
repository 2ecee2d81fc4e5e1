//! Availability checker.
//!
//! A teacher is unavailable for a (date, session) if any persisted or staged
//! record puts them there, whatever the room or role. Two sessions on the
//! same date never conflict; shift windows are not compared.

use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

use crate::models::{AssignmentRecord, Session};

/// Result of an availability query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub available: bool,
    /// Set when unavailable: which assignment is in the way.
    pub reason: Option<String>,
}

impl Availability {
    fn free() -> Self {
        Self {
            available: true,
            reason: None,
        }
    }

    fn blocked_by(record: &AssignmentRecord) -> Self {
        Self {
            available: false,
            reason: Some(format!(
                "already {} in room-assignment {} on {} ({})",
                record.role, record.room_assignment_id, record.date, record.session
            )),
        }
    }
}

/// Persisted and staged assignments, indexed by (date, session).
#[derive(Debug, Clone, Default)]
pub struct AvailabilityChecker {
    persisted: Vec<AssignmentRecord>,
    staged: Vec<AssignmentRecord>,
    busy: HashMap<(NaiveDate, Session), HashSet<String>>,
}

impl AvailabilityChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the checker with persisted assignments.
    pub fn with_persisted(records: impl IntoIterator<Item = AssignmentRecord>) -> Self {
        let mut checker = Self::new();
        for record in records {
            checker.index(&record);
            checker.persisted.push(record);
        }
        checker
    }

    fn index(&mut self, record: &AssignmentRecord) {
        self.busy
            .entry((record.date, record.session))
            .or_default()
            .insert(record.teacher_id.clone());
    }

    /// Reports whether the teacher is free in the given slot.
    pub fn check_availability(
        &self,
        teacher_id: &str,
        date: NaiveDate,
        session: Session,
    ) -> Availability {
        if !self.is_busy(teacher_id, date, session) {
            return Availability::free();
        }
        self.persisted
            .iter()
            .chain(&self.staged)
            .find(|r| r.teacher_id == teacher_id && r.date == date && r.session == session)
            .map(Availability::blocked_by)
            .unwrap_or_else(Availability::free)
    }

    /// Whether the teacher already sits in this (date, session).
    pub fn is_busy(&self, teacher_id: &str, date: NaiveDate, session: Session) -> bool {
        self.busy
            .get(&(date, session))
            .is_some_and(|ids| ids.contains(teacher_id))
    }

    /// Teacher ids already consumed in this (date, session).
    pub fn busy_in(&self, date: NaiveDate, session: Session) -> Option<&HashSet<String>> {
        self.busy.get(&(date, session))
    }

    /// Stages a pending assignment so later queries see it.
    pub fn stage(&mut self, record: AssignmentRecord) {
        self.index(&record);
        self.staged.push(record);
    }

    /// Staged assignments in staging order.
    pub fn staged(&self) -> &[AssignmentRecord] {
        &self.staged
    }

    /// Persisted assignments the checker was seeded with.
    pub fn persisted(&self) -> &[AssignmentRecord] {
        &self.persisted
    }
}
