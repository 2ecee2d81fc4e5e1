//! Single-slot assignment.
//!
//! Interactive counterpart of the batch planner for one room-slot: show who
//! holds each role, list who could, auto-pick through the same pairing
//! engine, and replace holders on confirm.
//!
//! The room-assignment id is re-resolved before every read and write.
//! When a role is being replaced, its current holder does not count as busy
//! and does not count against their ceiling.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::batch::SlotPreview;
use super::context::{BatchContext, TeacherPick};
use crate::config::PlannerConfig;
use crate::error::{InvigilationError, Result};
use crate::ledger::AvailabilityChecker;
use crate::models::{AssignmentRecord, Role, RoomAssignment, SlotRequest, Teacher};
use crate::policy::PairingEngine;
use crate::resolver::RoomSlotResolver;
use crate::store::ExamStore;

/// Current holders of a room-slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotHolders {
    pub room_assignment_id: String,
    pub supervisor: Option<TeacherPick>,
    pub assistant: Option<TeacherPick>,
}

/// A teacher who could take a role, with their workload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateInfo {
    pub teacher: TeacherPick,
    pub periods_assigned: u32,
}

/// Eligible and available teachers per role, lowest workload first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePools {
    pub supervisors: Vec<CandidateInfo>,
    pub assistants: Vec<CandidateInfo>,
}

/// Assigns invigilators to one room-slot at a time.
#[derive(Debug)]
pub struct SingleSlotAssigner<'s, S: ?Sized> {
    store: &'s S,
    config: PlannerConfig,
}

impl<'s, S> SingleSlotAssigner<'s, S>
where
    S: ExamStore + ?Sized,
{
    pub fn new(store: &'s S, config: PlannerConfig) -> Self {
        Self { store, config }
    }

    async fn resolve(&self, request: &SlotRequest) -> Result<RoomAssignment> {
        let rooms = self
            .store
            .room_assignments(std::slice::from_ref(&request.room_number))
            .await?;
        RoomSlotResolver::new(rooms)
            .resolve_request(request)
            .cloned()
            .ok_or_else(|| InvigilationError::RoomNotFoundForDate {
                room_number: request.room_number.clone(),
                date: request.date,
            })
    }

    /// Who currently holds each role.
    pub async fn status(&self, request: &SlotRequest) -> Result<SlotHolders> {
        let room = self.resolve(request).await?;
        let records = self
            .store
            .assignments_for_room(&room.id, request.date)
            .await?;
        let teachers = self.store.teachers().await?;
        let holder = |role: Role| {
            records
                .iter()
                .find(|r| r.role == role)
                .and_then(|r| teachers.iter().find(|t| t.id == r.teacher_id))
                .map(TeacherPick::from)
        };
        Ok(SlotHolders {
            supervisor: holder(Role::Supervisor),
            assistant: holder(Role::Assistant),
            room_assignment_id: room.id,
        })
    }

    /// Teachers who could take each role right now.
    pub async fn candidates(&self, request: &SlotRequest) -> Result<CandidatePools> {
        let room = self.resolve(request).await?;
        let teachers = self.store.teachers().await?;
        let on_date = self.store.assignments_on(&[request.date]).await?;

        let pool = |role: Role| {
            let mut pool: Vec<CandidateInfo> = teachers
                .iter()
                .filter(|t| self.check(t, role, &room.id, request, &on_date, &[role]).is_ok())
                .map(|t| CandidateInfo {
                    teacher: TeacherPick::from(t),
                    periods_assigned: t.periods_assigned,
                })
                .collect();
            pool.sort_by_key(|c| c.periods_assigned);
            pool
        };
        Ok(CandidatePools {
            supervisors: pool(Role::Supervisor),
            assistants: pool(Role::Assistant),
        })
    }

    /// Runs the pairing engine as a one-slot batch. Nothing is written.
    ///
    /// Both current holders are treated as replaced: they are not busy here
    /// and the periods they hold in this slot do not count.
    pub async fn auto_pick(&self, request: &SlotRequest) -> Result<SlotPreview> {
        let room = self.resolve(request).await?;
        let (held, persisted): (Vec<_>, Vec<_>) = self
            .store
            .assignments_on(&[request.date])
            .await?
            .into_iter()
            .partition(|r| r.room_assignment_id == room.id && r.date == request.date);
        let teachers: Vec<Teacher> = self
            .store
            .teachers()
            .await?
            .into_iter()
            .map(|mut t| {
                let freed = held.iter().filter(|r| r.teacher_id == t.id).count() as u32;
                t.periods_assigned = t.periods_assigned.saturating_sub(freed);
                t
            })
            .collect();

        let mut request = request.clone();
        request.room_assignment_hint = Some(room.id.clone());
        let mut context = BatchContext::new(teachers, vec![room], persisted, &self.config.policy);
        let engine = PairingEngine::new(&self.config);
        Ok(context.plan_slot(&engine, request))
    }

    /// Puts `teacher_id` in `role`, replacing any current holder.
    pub async fn assign(
        &self,
        request: &SlotRequest,
        role: Role,
        teacher_id: &str,
    ) -> Result<AssignmentRecord> {
        let mut written = self.replace(request, &[(role, teacher_id)]).await?;
        written
            .pop()
            .ok_or_else(|| InvigilationError::UnknownTeacher(teacher_id.to_string()))
    }

    /// Writes the picks of an auto-pick preview.
    pub async fn confirm(
        &self,
        request: &SlotRequest,
        preview: &SlotPreview,
    ) -> Result<Vec<AssignmentRecord>> {
        let picks: Vec<(Role, &str)> = [
            (Role::Supervisor, &preview.supervisor),
            (Role::Assistant, &preview.assistant),
        ]
        .into_iter()
        .filter_map(|(role, pick)| pick.as_ref().map(|p| (role, p.id.as_str())))
        .collect();
        self.replace(request, &picks).await
    }

    /// Removes the holder of `role`.
    pub async fn clear(&self, request: &SlotRequest, role: Role) -> Result<usize> {
        let room = self.resolve(request).await?;
        let removed = self
            .store
            .delete_by_room_and_role(&room.id, role, Some(request.date))
            .await?;
        info!(room = %room.id, date = %request.date, %role, removed, "role cleared");
        Ok(removed)
    }

    async fn replace(
        &self,
        request: &SlotRequest,
        picks: &[(Role, &str)],
    ) -> Result<Vec<AssignmentRecord>> {
        let room = self.resolve(request).await?;
        let teachers = self.store.teachers().await?;
        let held = self
            .store
            .assignments_for_room(&room.id, request.date)
            .await?;
        let replacing: Vec<Role> = picks.iter().map(|(role, _)| *role).collect();

        for (i, (role, teacher_id)) in picks.iter().enumerate() {
            if picks[..i].iter().any(|(_, other)| other == teacher_id) {
                return Err(InvigilationError::NotEligible {
                    teacher_id: teacher_id.to_string(),
                    role: *role,
                    reason: "cannot hold both roles in one room".into(),
                });
            }
            let teacher = teachers
                .iter()
                .find(|t| t.id == *teacher_id)
                .ok_or_else(|| InvigilationError::UnknownTeacher(teacher_id.to_string()))?;

            let mut records = self
                .store
                .assignments_for_teacher(teacher_id, request.date, request.session)
                .await?;
            records.retain(|r| !(r.room_assignment_id == room.id && r.date == request.date));
            records.extend(held.iter().cloned());
            self.check(teacher, *role, &room.id, request, &records, &replacing)?;
        }

        let mut written = Vec::with_capacity(picks.len());
        for (role, _) in picks {
            self.store
                .delete_by_room_and_role(&room.id, *role, Some(request.date))
                .await?;
        }
        for (role, teacher_id) in picks {
            let record = AssignmentRecord::new(
                room.id.clone(),
                *role,
                *teacher_id,
                request.date,
                request.session,
            )
            .with_shift(request.shift);
            self.store.create(&record).await?;
            info!(
                room = %room.id,
                date = %request.date,
                %role,
                teacher = %teacher_id,
                "role assigned"
            );
            written.push(record);
        }
        Ok(written)
    }

    /// Eligibility, ceiling, and availability for one teacher.
    ///
    /// `records` must hold the teacher's assignments in this (date, session)
    /// and every record of this room-slot. Records of this room-slot in
    /// `replacing` roles are ignored, and free the period they held.
    fn check(
        &self,
        teacher: &Teacher,
        role: Role,
        room_id: &str,
        request: &SlotRequest,
        records: &[AssignmentRecord],
        replacing: &[Role],
    ) -> Result<()> {
        if !self.config.policy.is_eligible(teacher, role) {
            return Err(InvigilationError::NotEligible {
                teacher_id: teacher.id.clone(),
                role,
                reason: format!("rank {} cannot hold this role", teacher.rank),
            });
        }

        let replaced = |r: &AssignmentRecord| {
            r.room_assignment_id == room_id
                && r.date == request.date
                && replacing.contains(&r.role)
        };

        let freed = records
            .iter()
            .filter(|&r| r.teacher_id == teacher.id && replaced(r))
            .count() as u32;
        let periods = teacher.periods_assigned.saturating_sub(freed);
        if !self.config.rank_limits.allows(teacher.rank, periods) {
            return Err(InvigilationError::NotEligible {
                teacher_id: teacher.id.clone(),
                role,
                reason: format!("reached the {} period limit", teacher.rank),
            });
        }

        let availability =
            AvailabilityChecker::with_persisted(records.iter().filter(|&r| !replaced(r)).cloned());
        let status = availability.check_availability(&teacher.id, request.date, request.session);
        if !status.available {
            return Err(InvigilationError::Unavailable {
                teacher_id: teacher.id.clone(),
                date: request.date,
                session: request.session,
                reason: status.reason.unwrap_or_default(),
            });
        }
        Ok(())
    }
}
