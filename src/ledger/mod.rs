//! Run-scoped bookkeeping consulted by the pairing engine.
//!
//! - [`AvailabilityChecker`]: who already sits in a (date, session).
//! - [`WorkloadLedger`]: live period counters against rank ceilings.
//! - [`FairnessLedger`]: per-date pair-type usage.
//! - [`PairHistory`]: recent pairs per recurring room-group.
//!
//! All four belong to one run and are discarded after commit.

mod availability;
mod fairness;
mod history;
mod workload;

pub use availability::{Availability, AvailabilityChecker};
pub use fairness::FairnessLedger;
pub use history::{PairHistory, PairRecord};
pub use workload::WorkloadLedger;
