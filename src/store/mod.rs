//! External collaborators.
//!
//! The engine reads teachers, rooms, and existing assignments through these
//! traits and hands its writes back through [`AssignmentWriter`]. They are
//! the only suspension points of a run.
//!
//! [`InMemoryStore`] implements all of them and backs the tests.

mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::error::StoreError;
use crate::models::{AssignmentRecord, Role, RoomAssignment, Session, Teacher};

pub use memory::InMemoryStore;

/// Read-only staff directory.
#[async_trait]
pub trait TeacherDirectory: Send + Sync {
    /// All teachers, in directory order.
    async fn teachers(&self) -> Result<Vec<Teacher>, StoreError>;
}

/// Existing invigilation assignments.
#[async_trait]
pub trait AvailabilitySource: Send + Sync {
    /// Every assignment on any of `dates`.
    async fn assignments_on(
        &self,
        dates: &[NaiveDate],
    ) -> Result<Vec<AssignmentRecord>, StoreError>;

    /// Assignments of one room-slot.
    async fn assignments_for_room(
        &self,
        room_assignment_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<AssignmentRecord>, StoreError>;

    /// Assignments of one teacher in a (date, session).
    async fn assignments_for_teacher(
        &self,
        teacher_id: &str,
        date: NaiveDate,
        session: Session,
    ) -> Result<Vec<AssignmentRecord>, StoreError>;
}

/// Room provisioning records.
#[async_trait]
pub trait RoomDirectory: Send + Sync {
    /// Every provisioning of the given rooms, in directory order.
    async fn room_assignments(
        &self,
        room_numbers: &[String],
    ) -> Result<Vec<RoomAssignment>, StoreError>;
}

/// A batched write stopped part-way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("batched write stopped after {applied} writes: {source}")]
pub struct BatchWriteError {
    pub applied: usize,
    #[source]
    pub source: StoreError,
}

/// Assignment persistence.
#[async_trait]
pub trait AssignmentWriter: Send + Sync {
    /// Removes the holder of `role` in a room, on one date or on all dates.
    ///
    /// Returns the number of records removed.
    async fn delete_by_room_and_role(
        &self,
        room_assignment_id: &str,
        role: Role,
        date: Option<NaiveDate>,
    ) -> Result<usize, StoreError>;

    /// Inserts a record. Fails with [`StoreError::Conflict`] if the role is
    /// already held in that room-slot.
    async fn create(&self, record: &AssignmentRecord) -> Result<(), StoreError>;

    /// Replaces each role holder in order: delete-by-role, then insert.
    ///
    /// Stops at the first failure.
    async fn apply(&self, writes: &[AssignmentRecord]) -> Result<usize, BatchWriteError> {
        for (applied, write) in writes.iter().enumerate() {
            let result: Result<(), StoreError> = async {
                self.delete_by_room_and_role(
                    &write.room_assignment_id,
                    write.role,
                    Some(write.date),
                )
                .await?;
                self.create(write).await
            }
            .await;
            if let Err(source) = result {
                return Err(BatchWriteError { applied, source });
            }
        }
        Ok(writes.len())
    }
}

/// Everything a planner needs from the outside world.
pub trait ExamStore:
    TeacherDirectory + AvailabilitySource + RoomDirectory + AssignmentWriter
{
}

impl<T> ExamStore for T where
    T: TeacherDirectory + AvailabilitySource + RoomDirectory + AssignmentWriter
{
}
