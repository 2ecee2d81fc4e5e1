//! Batch context: the working set of one planning run.
//!
//! Built once by the prefetch phase, then consumed by the pure calculation.
//! Every ledger in here belongs to exactly one run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use super::batch::{BatchPhase, BatchPreview, SlotPreview};
use crate::config::PlannerConfig;
use crate::error::{InvigilationError, Result, SlotFailure};
use crate::ledger::{AvailabilityChecker, FairnessLedger, PairHistory, PairRecord, WorkloadLedger};
use crate::models::{AssignmentRecord, GroupKey, Rank, Role, RoomAssignment, SlotRequest, Teacher};
use crate::policy::{PairSelection, PairingEngine, PairingRequest, PairingState, RankPolicy};
use crate::resolver::RoomSlotResolver;
use crate::store::ExamStore;
use crate::validation::validate_teachers;

/// A chosen teacher as shown in a preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherPick {
    pub id: String,
    pub name: String,
    pub rank: Rank,
}

impl From<&Teacher> for TeacherPick {
    fn from(t: &Teacher) -> Self {
        Self {
            id: t.id.clone(),
            name: t.name.clone(),
            rank: t.rank,
        }
    }
}

/// Prefetched, mutable working set for one batch.
#[derive(Debug)]
pub struct BatchContext {
    teachers: Vec<Teacher>,
    supervisors: Vec<String>,
    assistants: Vec<String>,
    workload: WorkloadLedger,
    availability: AvailabilityChecker,
    resolver: RoomSlotResolver,
    fairness: FairnessLedger,
    history: PairHistory,
}

impl BatchContext {
    /// Assembles a context from already-fetched data.
    ///
    /// Pools keep directory order, which is the final tie-break.
    pub fn new(
        teachers: Vec<Teacher>,
        rooms: Vec<RoomAssignment>,
        persisted: Vec<AssignmentRecord>,
        policy: &RankPolicy,
    ) -> Self {
        let pool = |role| {
            teachers
                .iter()
                .filter(|t| policy.is_eligible(t, role))
                .map(|t| t.id.clone())
                .collect::<Vec<_>>()
        };
        let supervisors = pool(Role::Supervisor);
        let assistants = pool(Role::Assistant);
        Self {
            workload: WorkloadLedger::from_teachers(&teachers),
            availability: AvailabilityChecker::with_persisted(persisted),
            resolver: RoomSlotResolver::new(rooms),
            fairness: FairnessLedger::new(),
            history: PairHistory::new(),
            teachers,
            supervisors,
            assistants,
        }
    }

    /// Fetches everything a batch needs in one pass.
    ///
    /// This is the only network-bound step before commit. Any failure aborts
    /// the run with nothing computed.
    pub async fn prefetch<S>(
        store: &S,
        requests: &[SlotRequest],
        policy: &RankPolicy,
    ) -> Result<Self>
    where
        S: ExamStore + ?Sized,
    {
        let rooms: Vec<String> = requests
            .iter()
            .map(|r| r.room_number.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let dates: Vec<NaiveDate> = requests
            .iter()
            .map(|r| r.date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let teachers = store
            .teachers()
            .await
            .map_err(InvigilationError::PrefetchFailed)?;
        validate_teachers(&teachers).map_err(InvigilationError::InvalidInput)?;
        let room_records = store
            .room_assignments(&rooms)
            .await
            .map_err(InvigilationError::PrefetchFailed)?;
        let persisted = store
            .assignments_on(&dates)
            .await
            .map_err(InvigilationError::PrefetchFailed)?;

        info!(
            teachers = teachers.len(),
            rooms = room_records.len(),
            persisted = persisted.len(),
            dates = dates.len(),
            "batch context prefetched"
        );
        Ok(Self::new(teachers, room_records, persisted, policy))
    }

    /// Seeds a pair from an earlier run into a group's history.
    pub fn seed_history(&mut self, key: GroupKey, pair: PairRecord) {
        self.history.append(key, pair);
    }

    pub fn phase(&self) -> BatchPhase {
        BatchPhase::Calculating
    }

    pub fn workload(&self) -> &WorkloadLedger {
        &self.workload
    }

    pub fn fairness(&self) -> &FairnessLedger {
        &self.fairness
    }

    pub fn history(&self) -> &PairHistory {
        &self.history
    }

    pub fn availability(&self) -> &AvailabilityChecker {
        &self.availability
    }

    /// Plans every slot in the given order.
    ///
    /// Pure: no collaborator is called. Each pick is committed to the
    /// workload ledger and staged for availability before the next slot
    /// is evaluated, so ceilings and busy sets hold across the batch.
    pub fn calculate(mut self, requests: Vec<SlotRequest>, config: &PlannerConfig) -> BatchPreview {
        let engine = PairingEngine::new(config);
        let mut slots = Vec::with_capacity(requests.len());
        for request in requests {
            let preview = self.plan_slot(&engine, request);
            slots.push(preview);
        }

        let staffed = slots.iter().filter(|s| s.is_ok()).count();
        info!(slots = slots.len(), staffed, "batch preview computed");
        BatchPreview::new(slots)
    }

    pub(crate) fn plan_slot(
        &mut self,
        engine: &PairingEngine<'_>,
        request: SlotRequest,
    ) -> SlotPreview {
        let group_key = self.resolver.group_key(&request);
        let Some(room_id) = self.resolver.resolve_request(&request).map(|r| r.id.clone()) else {
            warn!(
                room = %request.room_number,
                date = %request.date,
                "room not provisioned on date"
            );
            return SlotPreview::failed(request, group_key, SlotFailure::RoomNotFoundForDate);
        };

        let pairing = PairingRequest {
            date: request.date,
            session: request.session,
            group_key: &group_key,
            supervisors: &self.supervisors,
            assistants: &self.assistants,
        };
        let mut state = PairingState {
            workload: &self.workload,
            availability: &self.availability,
            fairness: &mut self.fairness,
            history: &mut self.history,
        };
        let selection = engine.select(&pairing, &mut state);

        let failure = match &selection {
            PairSelection {
                supervisor: None, ..
            } => Some(SlotFailure::NoEligibleSupervisor(engine.shortage(
                Role::Supervisor,
                &self.supervisors,
                None,
                &pairing,
                &state,
            ))),
            PairSelection {
                supervisor: Some(sup),
                assistant: None,
                ..
            } => Some(SlotFailure::NoEligibleAssistant(engine.shortage(
                Role::Assistant,
                &self.assistants,
                Some(sup.as_str()),
                &pairing,
                &state,
            ))),
            _ => None,
        };

        let mut preview = SlotPreview::planned(request, room_id, group_key, failure);
        for (role, id) in [
            (Role::Supervisor, selection.supervisor),
            (Role::Assistant, selection.assistant),
        ] {
            if let Some(id) = id {
                preview.set(role, self.pick(&id));
                self.commit_pick(&preview, role, id);
            }
        }

        match &preview.failure {
            Some(failure) => warn!(
                room = %preview.request.room_number,
                date = %preview.request.date,
                session = %preview.request.session,
                %failure,
                "slot not fully staffed"
            ),
            None => debug!(
                room = %preview.request.room_number,
                date = %preview.request.date,
                session = %preview.request.session,
                supervisor = ?preview.supervisor.as_ref().map(|p| &p.id),
                assistant = ?preview.assistant.as_ref().map(|p| &p.id),
                "slot staffed"
            ),
        }
        preview
    }

    fn pick(&self, id: &str) -> Option<TeacherPick> {
        self.teachers.iter().find(|t| t.id == id).map(TeacherPick::from)
    }

    fn commit_pick(&mut self, preview: &SlotPreview, role: Role, teacher_id: String) {
        self.workload.commit(&teacher_id);
        if let Some(room_id) = &preview.room_assignment_id {
            self.availability.stage(
                AssignmentRecord::new(
                    room_id.clone(),
                    role,
                    teacher_id,
                    preview.request.date,
                    preview.request.session,
                )
                .with_shift(preview.request.shift),
            );
        }
    }
}
