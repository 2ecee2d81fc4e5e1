//! In-memory collaborator implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use super::{AssignmentWriter, AvailabilitySource, RoomDirectory, TeacherDirectory};
use crate::error::StoreError;
use crate::models::{AssignmentRecord, Role, RoomAssignment, Session, Teacher};

#[derive(Debug, Default)]
struct State {
    teachers: Vec<Teacher>,
    rooms: Vec<RoomAssignment>,
    records: Vec<AssignmentRecord>,
    fail_reads: bool,
    creates_before_failure: Option<usize>,
}

/// Store backed by process memory.
///
/// Keeps teacher period counters in step with records: `create` adds a
/// period, `delete_by_room_and_role` takes one away per removed record.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds teachers to the directory.
    pub fn with_teachers(mut self, teachers: impl IntoIterator<Item = Teacher>) -> Self {
        self.state.get_mut().teachers.extend(teachers);
        self
    }

    /// Adds room provisionings.
    pub fn with_rooms(mut self, rooms: impl IntoIterator<Item = RoomAssignment>) -> Self {
        self.state.get_mut().rooms.extend(rooms);
        self
    }

    /// Adds existing assignments without touching period counters.
    pub fn with_records(mut self, records: impl IntoIterator<Item = AssignmentRecord>) -> Self {
        self.state.get_mut().records.extend(records);
        self
    }

    /// Makes every read fail while set.
    pub async fn set_read_failure(&self, fail: bool) {
        self.state.write().await.fail_reads = fail;
    }

    /// Lets `n` more creates succeed, then fails the rest.
    pub async fn fail_creates_after(&self, n: usize) {
        self.state.write().await.creates_before_failure = Some(n);
    }

    /// Snapshot of all records.
    pub async fn records(&self) -> Vec<AssignmentRecord> {
        self.state.read().await.records.clone()
    }

    /// Snapshot of one teacher.
    pub async fn teacher(&self, id: &str) -> Option<Teacher> {
        let state = self.state.read().await;
        state.teachers.iter().find(|t| t.id == id).cloned()
    }
}

impl State {
    fn check_read(&self) -> Result<(), StoreError> {
        if self.fail_reads {
            Err(StoreError::Unavailable("reads disabled".into()))
        } else {
            Ok(())
        }
    }

    fn adjust_periods(&mut self, teacher_id: &str, add: bool) {
        if let Some(t) = self.teachers.iter_mut().find(|t| t.id == teacher_id) {
            t.periods_assigned = if add {
                t.periods_assigned + 1
            } else {
                t.periods_assigned.saturating_sub(1)
            };
        }
    }
}

#[async_trait]
impl TeacherDirectory for InMemoryStore {
    async fn teachers(&self) -> Result<Vec<Teacher>, StoreError> {
        let state = self.state.read().await;
        state.check_read()?;
        Ok(state.teachers.clone())
    }
}

#[async_trait]
impl AvailabilitySource for InMemoryStore {
    async fn assignments_on(
        &self,
        dates: &[NaiveDate],
    ) -> Result<Vec<AssignmentRecord>, StoreError> {
        let state = self.state.read().await;
        state.check_read()?;
        Ok(state
            .records
            .iter()
            .filter(|r| dates.contains(&r.date))
            .cloned()
            .collect())
    }

    async fn assignments_for_room(
        &self,
        room_assignment_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<AssignmentRecord>, StoreError> {
        let state = self.state.read().await;
        state.check_read()?;
        Ok(state
            .records
            .iter()
            .filter(|r| r.room_assignment_id == room_assignment_id && r.date == date)
            .cloned()
            .collect())
    }

    async fn assignments_for_teacher(
        &self,
        teacher_id: &str,
        date: NaiveDate,
        session: Session,
    ) -> Result<Vec<AssignmentRecord>, StoreError> {
        let state = self.state.read().await;
        state.check_read()?;
        Ok(state
            .records
            .iter()
            .filter(|r| r.teacher_id == teacher_id && r.date == date && r.session == session)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl RoomDirectory for InMemoryStore {
    async fn room_assignments(
        &self,
        room_numbers: &[String],
    ) -> Result<Vec<RoomAssignment>, StoreError> {
        let state = self.state.read().await;
        state.check_read()?;
        Ok(state
            .rooms
            .iter()
            .filter(|r| room_numbers.contains(&r.room_number))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AssignmentWriter for InMemoryStore {
    async fn delete_by_room_and_role(
        &self,
        room_assignment_id: &str,
        role: Role,
        date: Option<NaiveDate>,
    ) -> Result<usize, StoreError> {
        let mut state = self.state.write().await;
        let (removed, kept): (Vec<_>, Vec<_>) =
            std::mem::take(&mut state.records).into_iter().partition(|r| {
                r.room_assignment_id == room_assignment_id
                    && r.role == role
                    && date.map_or(true, |d| r.date == d)
            });
        state.records = kept;
        for record in &removed {
            state.adjust_periods(&record.teacher_id, false);
        }
        Ok(removed.len())
    }

    async fn create(&self, record: &AssignmentRecord) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if let Some(remaining) = state.creates_before_failure.as_mut() {
            if *remaining == 0 {
                return Err(StoreError::Unavailable("write quota exhausted".into()));
            }
            *remaining -= 1;
        }
        if state
            .records
            .iter()
            .any(|r| r.occupies(&record.room_assignment_id, record.date, record.role))
        {
            return Err(StoreError::Conflict(format!(
                "{} already held in {} on {}",
                record.role, record.room_assignment_id, record.date
            )));
        }
        state.adjust_periods(&record.teacher_id, true);
        state.records.push(record.clone());
        Ok(())
    }
}
