//! Workload ledger.
//!
//! Single id-keyed table of live period counters. Candidate pools hold
//! teacher ids and read through this table, so a teacher who appears in
//! both the supervisor and assistant pools is counted once and a commit is
//! visible to every pool immediately.

use std::collections::HashMap;

use crate::config::RankLimits;
use crate::models::{Rank, Teacher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WorkloadEntry {
    rank: Rank,
    baseline: u32,
    periods: u32,
}

/// Live per-teacher period counters for one run.
#[derive(Debug, Clone, Default)]
pub struct WorkloadLedger {
    entries: HashMap<String, WorkloadEntry>,
}

impl WorkloadLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the ledger from persisted teacher counters.
    ///
    /// If an id appears twice the later record wins.
    pub fn from_teachers<'a>(teachers: impl IntoIterator<Item = &'a Teacher>) -> Self {
        let entries = teachers
            .into_iter()
            .map(|t| {
                (
                    t.id.clone(),
                    WorkloadEntry {
                        rank: t.rank,
                        baseline: t.periods_assigned,
                        periods: t.periods_assigned,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Current period count, `None` for unknown teachers.
    pub fn periods(&self, teacher_id: &str) -> Option<u32> {
        self.entries.get(teacher_id).map(|e| e.periods)
    }

    /// Periods added during this run.
    pub fn added(&self, teacher_id: &str) -> u32 {
        self.entries
            .get(teacher_id)
            .map(|e| e.periods - e.baseline)
            .unwrap_or(0)
    }

    /// Rank of a known teacher.
    pub fn rank(&self, teacher_id: &str) -> Option<Rank> {
        self.entries.get(teacher_id).map(|e| e.rank)
    }

    /// Whether the teacher is below their rank's ceiling.
    ///
    /// Unknown teachers are never eligible.
    pub fn eligible(&self, teacher_id: &str, limits: &RankLimits) -> bool {
        self.entries
            .get(teacher_id)
            .is_some_and(|e| limits.allows(e.rank, e.periods))
    }

    /// Commits one period to a teacher and returns the new total.
    pub fn commit(&mut self, teacher_id: &str) -> Option<u32> {
        let entry = self.entries.get_mut(teacher_id)?;
        entry.periods += 1;
        Some(entry.periods)
    }

    /// Teachers with at least one period added in this run.
    pub fn touched(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries
            .iter()
            .filter(|(_, e)| e.periods > e.baseline)
            .map(|(id, e)| (id.as_str(), e.periods - e.baseline))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
