//! Teacher model.
//!
//! Teachers are owned by the staff directory. The engine reads them once per
//! run and keeps its own workload table (see [`WorkloadLedger`]) instead of
//! mutating these records.
//!
//! [`WorkloadLedger`]: crate::ledger::WorkloadLedger

use serde::{Deserialize, Serialize};

use super::Rank;

/// A teacher who can be assigned as an invigilator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Seniority classification.
    pub rank: Rank,
    /// Owning department.
    pub department: String,
    /// Periods (room-slots) already assigned, as persisted.
    pub periods_assigned: u32,
}

impl Teacher {
    /// Creates a teacher with no assigned periods.
    pub fn new(id: impl Into<String>, rank: Rank) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            rank,
            department: String::new(),
            periods_assigned: 0,
        }
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Sets the already-assigned period count.
    pub fn with_periods(mut self, periods: u32) -> Self {
        self.periods_assigned = periods;
        self
    }
}
