//! Invigilator allocation for university exams.
//!
//! Decides, for each exam room on a date and session, which teacher
//! supervises and which assists. Works for one room at a time or for a
//! whole batch of rooms across several dates.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Teacher`, `Rank`, `Role`, `SlotRequest`,
//!   `RoomAssignment`, `AssignmentRecord`
//! - **`policy`**: Rank eligibility tables and the pairing engine
//! - **`ledger`**: Availability, workload, pair-type fairness, pair history
//! - **`resolver`**: Room number + date → canonical room-assignment id
//! - **`planner`**: Batch planner, single-slot assigner, batch KPIs
//! - **`store`**: Collaborator traits and an in-memory store
//! - **`validation`**: Input integrity checks
//!
//! # Guarantees
//!
//! - A teacher holds at most one assignment per (date, session).
//! - A rank's period ceiling holds across the whole batch.
//! - A room-slot has at most one holder per role; replacing is
//!   delete-then-insert.
//! - Batch outcomes depend only on input order.
//!
//! # Example
//!
//! ```
//! use exam_invigilation::models::{Rank, Role, Teacher};
//! use exam_invigilation::policy::RankPolicy;
//!
//! let policy = RankPolicy::default();
//! let ap = Teacher::new("AP1", Rank::AssociateProfessor);
//! assert!(policy.is_eligible(&ap, Role::Supervisor));
//! assert!(policy.is_eligible(&ap, Role::Assistant));
//! ```

pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod planner;
pub mod policy;
pub mod resolver;
pub mod store;
pub mod validation;

pub use config::{PlannerConfig, RankLimits};
pub use error::{InvigilationError, Result, ShortageReason, SlotFailure, StoreError};
