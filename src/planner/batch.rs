//! Batch planner.
//!
//! # Phases
//!
//! ```text
//! Calculating ──calculate()──▶ Preview ──stage()──▶ Saving ──commit()──▶ Done
//! ```
//!
//! Each phase is its own type ([`BatchContext`], [`BatchPreview`],
//! [`StagedBatch`], [`BatchReport`]), so a phase can only be entered from
//! the one before it. `calculate` and `stage` are pure; prefetch and commit
//! are the only steps that talk to the store. Dropping a preview before
//! commit cancels the run with nothing written.
//!
//! A commit failure does not turn into an error: the report keeps every
//! computed slot and marks the unsaved ones.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use tracing::{info, warn};

use super::context::{BatchContext, TeacherPick};
use crate::config::PlannerConfig;
use crate::error::{InvigilationError, Result, SlotFailure};
use crate::models::{AssignmentRecord, GroupKey, Role, SlotRequest};
use crate::policy::PairType;
use crate::store::{AssignmentWriter, ExamStore};
use crate::validation::validate_requests;

/// Where a batch run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchPhase {
    Calculating,
    Preview,
    Saving,
    Done,
}

impl fmt::Display for BatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Summary status of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotStatus {
    /// Both roles filled.
    Staffed,
    /// Supervisor only.
    Partial,
    /// Nothing assigned.
    Failed,
}

/// Computed outcome for one slot, before any write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPreview {
    pub request: SlotRequest,
    /// Canonical id, `None` when the room could not be resolved.
    pub room_assignment_id: Option<String>,
    pub group_key: GroupKey,
    pub supervisor: Option<TeacherPick>,
    pub assistant: Option<TeacherPick>,
    pub failure: Option<SlotFailure>,
}

impl SlotPreview {
    pub(crate) fn failed(request: SlotRequest, group_key: GroupKey, failure: SlotFailure) -> Self {
        Self {
            request,
            room_assignment_id: None,
            group_key,
            supervisor: None,
            assistant: None,
            failure: Some(failure),
        }
    }

    pub(crate) fn planned(
        request: SlotRequest,
        room_assignment_id: String,
        group_key: GroupKey,
        failure: Option<SlotFailure>,
    ) -> Self {
        Self {
            request,
            room_assignment_id: Some(room_assignment_id),
            group_key,
            supervisor: None,
            assistant: None,
            failure,
        }
    }

    pub(crate) fn set(&mut self, role: Role, pick: Option<TeacherPick>) {
        match role {
            Role::Supervisor => self.supervisor = pick,
            Role::Assistant => self.assistant = pick,
        }
    }

    /// Whether both roles were filled.
    pub fn is_ok(&self) -> bool {
        self.failure.is_none()
    }

    pub fn status(&self) -> SlotStatus {
        match (&self.supervisor, &self.assistant) {
            (Some(_), Some(_)) => SlotStatus::Staffed,
            (Some(_), None) => SlotStatus::Partial,
            _ => SlotStatus::Failed,
        }
    }

    /// Rank pair actually chosen.
    pub fn pair_type(&self) -> Option<PairType> {
        match (&self.supervisor, &self.assistant) {
            (Some(s), Some(a)) => Some(PairType::new(s.rank, a.rank)),
            _ => None,
        }
    }

    /// Human-readable failure reason.
    pub fn reason(&self) -> Option<String> {
        self.failure.as_ref().map(ToString::to_string)
    }

    fn writes(&self) -> Vec<AssignmentRecord> {
        let Some(room_id) = &self.room_assignment_id else {
            return Vec::new();
        };
        [
            (Role::Supervisor, &self.supervisor),
            (Role::Assistant, &self.assistant),
        ]
        .into_iter()
        .filter_map(|(role, pick)| {
            let pick = pick.as_ref()?;
            Some(
                AssignmentRecord::new(
                    room_id.clone(),
                    role,
                    pick.id.clone(),
                    self.request.date,
                    self.request.session,
                )
                .with_shift(self.request.shift),
            )
        })
        .collect()
    }
}

/// All computed slots, ready for review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchPreview {
    pub slots: Vec<SlotPreview>,
}

impl BatchPreview {
    pub(crate) fn new(slots: Vec<SlotPreview>) -> Self {
        Self { slots }
    }

    pub fn phase(&self) -> BatchPhase {
        BatchPhase::Preview
    }

    /// Slots with both roles filled.
    pub fn staffed(&self) -> impl Iterator<Item = &SlotPreview> {
        self.slots.iter().filter(|s| s.is_ok())
    }

    /// Slots with a failure reason.
    pub fn unstaffed(&self) -> impl Iterator<Item = &SlotPreview> {
        self.slots.iter().filter(|s| !s.is_ok())
    }

    /// Turns the preview into ordered writes. Never recomputes.
    pub fn stage(self) -> StagedBatch {
        let mut writes = Vec::new();
        let mut ranges = Vec::with_capacity(self.slots.len());
        for slot in &self.slots {
            let start = writes.len();
            writes.extend(slot.writes());
            ranges.push(start..writes.len());
        }
        StagedBatch {
            preview: self,
            writes,
            ranges,
        }
    }
}

/// A preview with its writes laid out, waiting for commit.
#[derive(Debug, Clone)]
pub struct StagedBatch {
    preview: BatchPreview,
    writes: Vec<AssignmentRecord>,
    ranges: Vec<Range<usize>>,
}

impl StagedBatch {
    pub fn phase(&self) -> BatchPhase {
        BatchPhase::Saving
    }

    /// Writes in commit order: slot order, supervisor before assistant.
    pub fn writes(&self) -> &[AssignmentRecord] {
        &self.writes
    }

    /// Applies all writes and reports per-slot results.
    pub async fn commit<W>(self, writer: &W) -> BatchReport
    where
        W: AssignmentWriter + ?Sized,
    {
        let attempted = self.writes.len();
        let (applied, error) = match writer.apply(&self.writes).await {
            Ok(applied) => (applied, None),
            Err(e) => {
                warn!(applied = e.applied, attempted, error = %e.source, "batch commit failed");
                (
                    e.applied,
                    Some(InvigilationError::CommitFailed {
                        applied: e.applied,
                        attempted,
                        source: e.source,
                    }),
                )
            }
        };

        let slots = self
            .preview
            .slots
            .into_iter()
            .zip(self.ranges)
            .map(|(preview, range)| SlotOutcome {
                saved: !range.is_empty() && range.end <= applied,
                preview,
            })
            .collect();

        info!(attempted, applied, "batch commit finished");
        BatchReport {
            slots,
            writes_attempted: attempted,
            writes_applied: applied,
            error,
        }
    }
}

/// A computed slot and whether its writes reached the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotOutcome {
    pub preview: SlotPreview,
    pub saved: bool,
}

/// Final summary of a run.
#[derive(Debug)]
pub struct BatchReport {
    pub slots: Vec<SlotOutcome>,
    pub writes_attempted: usize,
    pub writes_applied: usize,
    /// Batch-level commit failure, reported once.
    pub error: Option<InvigilationError>,
}

impl BatchReport {
    pub fn phase(&self) -> BatchPhase {
        BatchPhase::Done
    }

    /// Whether every staged write was persisted.
    pub fn is_saved(&self) -> bool {
        self.error.is_none()
    }
}

/// Orchestrates prefetch, calculation, and commit against one store.
#[derive(Debug)]
pub struct BatchPlanner<'s, S: ?Sized> {
    store: &'s S,
    config: PlannerConfig,
}

impl<'s, S> BatchPlanner<'s, S>
where
    S: ExamStore + ?Sized,
{
    pub fn new(store: &'s S, config: PlannerConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Prefetches the shared context for `requests`.
    pub async fn prefetch(&self, requests: &[SlotRequest]) -> Result<BatchContext> {
        BatchContext::prefetch(self.store, requests, &self.config.policy).await
    }

    /// Validates, prefetches, and computes the preview.
    ///
    /// Slots are planned in the given order.
    pub async fn preview(&self, requests: Vec<SlotRequest>) -> Result<BatchPreview> {
        validate_requests(&requests).map_err(InvigilationError::InvalidInput)?;
        let context = self.prefetch(&requests).await?;
        Ok(context.calculate(requests, &self.config))
    }

    /// Commits a reviewed preview.
    pub async fn commit(&self, preview: BatchPreview) -> BatchReport {
        preview.stage().commit(self.store).await
    }

    /// Preview and commit in one go.
    pub async fn run(&self, requests: Vec<SlotRequest>) -> Result<BatchReport> {
        let preview = self.preview(requests).await?;
        Ok(self.commit(preview).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShortageReason;
    use crate::ledger::PairRecord;
    use crate::models::{Rank, RoomAssignment, Session, Teacher};
    use crate::validation::ValidationErrorKind;
    use crate::store::InMemoryStore;
    use chrono::NaiveDate;

    fn may(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, day).unwrap()
    }

    fn rooms(numbers: &[&str]) -> Vec<RoomAssignment> {
        numbers
            .iter()
            .map(|n| RoomAssignment::new(format!("RA-{n}"), *n, may(1), may(31)))
            .collect()
    }

    fn requests(numbers: &[&str], day: u32, session: Session) -> Vec<SlotRequest> {
        numbers
            .iter()
            .map(|n| SlotRequest::new(*n, may(day), session))
            .collect()
    }

    #[tokio::test]
    async fn test_rank_limit_holds_across_batch() {
        let store = InMemoryStore::new()
            .with_teachers([
                Teacher::new("AP1", Rank::AssociateProfessor),
                Teacher::new("L1", Rank::Lecturer),
                Teacher::new("L2", Rank::Lecturer),
                Teacher::new("L3", Rank::Lecturer),
            ])
            .with_rooms(rooms(&["R1", "R2", "R3"]));
        let config = PlannerConfig::default().with_rank_limit(Rank::AssociateProfessor, 2);
        let planner = BatchPlanner::new(&store, config);

        // Three sessions so AP1 is never busy; only the ceiling stops them.
        let reqs = vec![
            SlotRequest::new("R1", may(1), Session::Morning),
            SlotRequest::new("R2", may(1), Session::Afternoon),
            SlotRequest::new("R3", may(2), Session::Morning),
        ];
        let preview = planner.preview(reqs).await.unwrap();

        assert_eq!(preview.slots[0].supervisor.as_ref().unwrap().id, "AP1");
        assert_eq!(preview.slots[1].supervisor.as_ref().unwrap().id, "AP1");
        assert_eq!(
            preview.slots[2].failure,
            Some(SlotFailure::NoEligibleSupervisor(ShortageReason::AllOverLimit))
        );
        assert_eq!(preview.slots[2].status(), SlotStatus::Failed);
    }

    #[tokio::test]
    async fn test_same_session_rooms_report_busy() {
        let store = InMemoryStore::new()
            .with_teachers([
                Teacher::new("AP1", Rank::AssociateProfessor),
                Teacher::new("L1", Rank::Lecturer),
                Teacher::new("L2", Rank::Lecturer),
            ])
            .with_rooms(rooms(&["R1", "R2"]));
        let planner = BatchPlanner::new(&store, PlannerConfig::default());
        let preview = planner
            .preview(requests(&["R1", "R2"], 1, Session::Morning))
            .await
            .unwrap();

        assert!(preview.slots[0].is_ok());
        assert_eq!(
            preview.slots[1].failure,
            Some(SlotFailure::NoEligibleSupervisor(ShortageReason::AllBusy))
        );
        assert_eq!(
            preview.slots[1].reason().unwrap(),
            "no eligible supervisor: all eligible teachers are busy in this session"
        );
    }

    #[tokio::test]
    async fn test_persisted_morning_assignment_blocks_morning_only() {
        let store = InMemoryStore::new()
            .with_teachers([
                Teacher::new("AP1", Rank::AssociateProfessor),
                Teacher::new("L1", Rank::Lecturer),
            ])
            .with_rooms(rooms(&["R1", "R2"]))
            .with_records([AssignmentRecord::new(
                "RA-R9",
                Role::Supervisor,
                "AP1",
                may(1),
                Session::Morning,
            )]);
        let planner = BatchPlanner::new(&store, PlannerConfig::default());
        let preview = planner
            .preview(vec![
                SlotRequest::new("R1", may(1), Session::Morning),
                SlotRequest::new("R2", may(1), Session::Afternoon),
            ])
            .await
            .unwrap();

        assert_eq!(preview.slots[0].status(), SlotStatus::Failed);
        assert_eq!(preview.slots[1].supervisor.as_ref().unwrap().id, "AP1");
        assert_eq!(preview.slots[1].assistant.as_ref().unwrap().id, "L1");
    }

    #[tokio::test]
    async fn test_unknown_room_does_not_abort_batch() {
        let store = InMemoryStore::new()
            .with_teachers([
                Teacher::new("AP1", Rank::AssociateProfessor),
                Teacher::new("L1", Rank::Lecturer),
            ])
            .with_rooms(rooms(&["R1"]));
        let planner = BatchPlanner::new(&store, PlannerConfig::default());
        let report = planner
            .run(vec![
                SlotRequest::new("NOPE", may(1), Session::Morning),
                SlotRequest::new("R1", may(1), Session::Morning),
            ])
            .await
            .unwrap();

        assert_eq!(report.slots[0].preview.failure, Some(SlotFailure::RoomNotFoundForDate));
        assert!(!report.slots[0].saved);
        assert!(report.slots[1].saved);
        assert!(report.is_saved());
        assert_eq!(report.writes_applied, 2);
        assert_eq!(report.phase(), BatchPhase::Done);
        assert_eq!(store.records().await.len(), 2);
    }

    #[tokio::test]
    async fn test_prefetch_failure_is_fatal() {
        let store = InMemoryStore::new();
        store.set_read_failure(true).await;
        let planner = BatchPlanner::new(&store, PlannerConfig::default());

        let err = planner
            .preview(requests(&["R1"], 1, Session::Morning))
            .await
            .unwrap_err();
        assert!(matches!(err, InvigilationError::PrefetchFailed(_)));
    }

    #[tokio::test]
    async fn test_invalid_requests_rejected_before_prefetch() {
        let store = InMemoryStore::new();
        store.set_read_failure(true).await;
        let planner = BatchPlanner::new(&store, PlannerConfig::default());

        let err = planner
            .preview(requests(&["R1", "R1"], 1, Session::Morning))
            .await
            .unwrap_err();
        assert!(matches!(err, InvigilationError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_same_room_in_two_sessions_of_one_date_is_rejected() {
        let store = InMemoryStore::new()
            .with_teachers([
                Teacher::new("AP1", Rank::AssociateProfessor),
                Teacher::new("L1", Rank::Lecturer),
            ])
            .with_rooms(rooms(&["R1"]));
        let planner = BatchPlanner::new(&store, PlannerConfig::default());

        let err = planner
            .run(vec![
                SlotRequest::new("R1", may(1), Session::Morning),
                SlotRequest::new("R1", may(1), Session::Afternoon),
            ])
            .await
            .unwrap_err();
        let InvigilationError::InvalidInput(errors) = &err else {
            panic!("expected invalid input, got {err}");
        };
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateSlot);
        assert!(store.records().await.is_empty());
        assert_eq!(store.teacher("AP1").await.unwrap().periods_assigned, 0);
    }

    #[tokio::test]
    async fn test_rank_limit_on_one_date_reports_busy_before_limit() {
        let store = InMemoryStore::new()
            .with_teachers([
                Teacher::new("AP1", Rank::AssociateProfessor),
                Teacher::new("L1", Rank::Lecturer),
                Teacher::new("L2", Rank::Lecturer),
                Teacher::new("L3", Rank::Lecturer),
            ])
            .with_rooms(rooms(&["R1", "R2", "R3"]));
        let config = PlannerConfig::default().with_rank_limit(Rank::AssociateProfessor, 2);
        let planner = BatchPlanner::new(&store, config);

        let preview = planner
            .preview(vec![
                SlotRequest::new("R1", may(1), Session::Morning),
                SlotRequest::new("R2", may(1), Session::Afternoon),
                SlotRequest::new("R3", may(1), Session::Morning),
            ])
            .await
            .unwrap();

        assert_eq!(preview.slots[0].supervisor.as_ref().unwrap().id, "AP1");
        assert_eq!(preview.slots[1].supervisor.as_ref().unwrap().id, "AP1");
        // AP1 is both at the ceiling and already sitting this morning.
        assert_eq!(
            preview.slots[2].failure,
            Some(SlotFailure::NoEligibleSupervisor(ShortageReason::AllBusy))
        );
    }

    #[tokio::test]
    async fn test_seeded_history_steers_next_pick() {
        let store = InMemoryStore::new()
            .with_teachers([
                Teacher::new("AP1", Rank::AssociateProfessor),
                Teacher::new("AP2", Rank::AssociateProfessor),
                Teacher::new("L1", Rank::Lecturer),
            ])
            .with_rooms([
                RoomAssignment::new("RA-1", "R1", may(1), may(31)).with_group_key("CS-Y1")
            ]);
        let config = PlannerConfig::default();
        let planner = BatchPlanner::new(&store, config.clone());
        let reqs = requests(&["R1"], 2, Session::Morning);

        let fresh = planner.prefetch(&reqs).await.unwrap();
        let preview = fresh.calculate(reqs.clone(), &config);
        assert_eq!(preview.slots[0].supervisor.as_ref().unwrap().id, "AP1");

        let mut seeded = planner.prefetch(&reqs).await.unwrap();
        seeded.seed_history(
            GroupKey::new("CS-Y1"),
            PairRecord::new(Some("AP1".into()), Some("L1".into())),
        );
        let preview = seeded.calculate(reqs, &config);
        assert_eq!(preview.slots[0].supervisor.as_ref().unwrap().id, "AP2");
        // L1 is the only lecturer, so the repeat is accepted.
        assert_eq!(preview.slots[0].assistant.as_ref().unwrap().id, "L1");
    }

    #[tokio::test]
    async fn test_commit_failure_keeps_preview() {
        let store = InMemoryStore::new()
            .with_teachers([
                Teacher::new("AP1", Rank::AssociateProfessor),
                Teacher::new("AP2", Rank::AssociateProfessor),
                Teacher::new("L1", Rank::Lecturer),
                Teacher::new("L2", Rank::Lecturer),
            ])
            .with_rooms(rooms(&["R1", "R2"]));
        let planner = BatchPlanner::new(&store, PlannerConfig::default());
        let preview = planner
            .preview(requests(&["R1", "R2"], 1, Session::Morning))
            .await
            .unwrap();
        assert_eq!(preview.phase(), BatchPhase::Preview);

        store.fail_creates_after(2).await;
        let staged = preview.clone().stage();
        assert_eq!(staged.phase(), BatchPhase::Saving);
        assert_eq!(staged.writes().len(), 4);
        let report = staged.commit(&store).await;

        assert!(matches!(
            report.error,
            Some(InvigilationError::CommitFailed {
                applied: 2,
                attempted: 4,
                ..
            })
        ));
        assert!(report.slots[0].saved);
        assert!(!report.slots[1].saved);
        let shown: Vec<_> = report.slots.iter().map(|s| s.preview.clone()).collect();
        assert_eq!(shown, preview.slots);
    }

    #[tokio::test]
    async fn test_stale_room_id_is_replaced() {
        let store = InMemoryStore::new()
            .with_teachers([
                Teacher::new("AP1", Rank::AssociateProfessor),
                Teacher::new("T1", Rank::Tutor),
            ])
            .with_rooms([
                RoomAssignment::new("RA-spring", "B-101", may(1), may(10)),
                RoomAssignment::new("RA-summer", "B-101", may(11), may(20)),
            ]);
        let planner = BatchPlanner::new(&store, PlannerConfig::default());
        planner
            .run(vec![SlotRequest::new("B-101", may(12), Session::Morning)
                .with_room_assignment_hint("RA-spring")])
            .await
            .unwrap();

        let records = store.records().await;
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.room_assignment_id == "RA-summer"));
    }

    #[tokio::test]
    async fn test_pair_types_rotate_evenly_within_a_date() {
        let mut teachers: Vec<Teacher> = (0..10)
            .map(|i| Teacher::new(format!("AP{i}"), Rank::AssociateProfessor))
            .collect();
        for (prefix, rank) in [
            ("L", Rank::Lecturer),
            ("AL", Rank::AssistantLecturer),
            ("T", Rank::Tutor),
        ] {
            teachers.extend((0..4).map(|i| Teacher::new(format!("{prefix}{i}"), rank)));
        }
        let numbers = ["R1", "R2", "R3", "R4", "R5", "R6", "R7", "R8"];
        let store = InMemoryStore::new()
            .with_teachers(teachers)
            .with_rooms(rooms(&numbers));
        let planner = BatchPlanner::new(&store, PlannerConfig::default());
        let preview = planner
            .preview(requests(&numbers, 1, Session::Morning))
            .await
            .unwrap();

        assert_eq!(preview.staffed().count(), 8);
        let kpi = crate::planner::BatchKpi::calculate(&preview);
        let usage = &kpi.pair_type_usage[&may(1)];
        let counts: Vec<u32> = usage.values().copied().collect();
        assert_eq!(counts.len(), 3);
        let spread = counts.iter().max().unwrap() - counts.iter().min().unwrap();
        assert!(spread <= 1, "uneven usage: {usage:?}");
        assert!(!usage.contains_key(&PairType::new(
            Rank::AssociateProfessor,
            Rank::AssociateProfessor
        )));
    }

    #[tokio::test]
    async fn test_random_batches_keep_invariants() {
        use rand::rngs::SmallRng;
        use rand::{Rng, SeedableRng};
        use std::collections::{HashMap, HashSet};

        let mut rng = SmallRng::seed_from_u64(20250501);
        let numbers = ["R1", "R2", "R3", "R4", "R5", "R6"];

        for _ in 0..25 {
            let teachers: Vec<Teacher> = (0..rng.random_range(2..14))
                .map(|i| {
                    let rank = Rank::ALL[rng.random_range(0..Rank::ALL.len())];
                    Teacher::new(format!("X{i}"), rank).with_periods(rng.random_range(0..3))
                })
                .collect();

            // A room hosts at most one session per date.
            let mut reqs = Vec::new();
            for day in 1..=3 {
                for number in numbers {
                    if rng.random_bool(0.7) {
                        let session = if rng.random_bool(0.5) {
                            Session::Morning
                        } else {
                            Session::Afternoon
                        };
                        reqs.push(SlotRequest::new(number, may(day), session));
                    }
                }
            }

            let mut config = PlannerConfig::default();
            for rank in Rank::ALL {
                if rng.random_bool(0.5) {
                    config = config.with_rank_limit(rank, rng.random_range(1..5));
                }
            }

            let store = InMemoryStore::new()
                .with_teachers(teachers.clone())
                .with_rooms(rooms(&numbers));
            let planner = BatchPlanner::new(&store, config.clone());
            let report = planner.run(reqs).await.unwrap();
            assert!(report.is_saved());

            let records = store.records().await;
            let mut busy = HashSet::new();
            let mut holders = HashSet::new();
            let mut added: HashMap<&str, u32> = HashMap::new();
            for r in &records {
                assert!(
                    busy.insert((r.teacher_id.as_str(), r.date, r.session)),
                    "{} double-booked on {} {}",
                    r.teacher_id,
                    r.date,
                    r.session
                );
                assert!(holders.insert((r.room_assignment_id.as_str(), r.date, r.role)));
                *added.entry(r.teacher_id.as_str()).or_insert(0) += 1;
            }

            for t in &teachers {
                let Some(&n) = added.get(t.id.as_str()) else {
                    continue;
                };
                if let Some(max) = config.rank_limits.limit_for(t.rank) {
                    assert!(t.periods_assigned + n <= max, "{} over limit", t.id);
                }
            }

            for outcome in &report.slots {
                let slot = &outcome.preview;
                if let Some(sup) = &slot.supervisor {
                    assert_eq!(sup.rank, Rank::AssociateProfessor);
                    if let Some(asst) = &slot.assistant {
                        assert_ne!(sup.id, asst.id);
                    }
                }
            }
        }
    }
}
