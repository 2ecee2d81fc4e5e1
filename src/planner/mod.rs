//! Batch and single-slot planning.
//!
//! The batch planner staffs many room-slots in one run: prefetch once,
//! plan every slot offline against live ledgers, review, then commit. The
//! single-slot assigner does the same for one slot interactively.
//!
//! # Ordering
//!
//! Slots are planned strictly in the order given. Workload and fairness
//! state carry from one slot to the next, so reordering the input can
//! change the outcome.

mod batch;
mod context;
mod kpi;
mod single;

pub use batch::{
    BatchPhase, BatchPlanner, BatchPreview, BatchReport, SlotOutcome, SlotPreview, SlotStatus,
    StagedBatch,
};
pub use context::{BatchContext, TeacherPick};
pub use kpi::BatchKpi;
pub use single::{CandidateInfo, CandidatePools, SingleSlotAssigner, SlotHolders};
