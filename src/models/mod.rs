//! Invigilation domain models.
//!
//! Plain data types shared by the policy, ledgers, and planners. None of
//! them carry behavior beyond construction and simple queries.
//!
//! # Domain Mappings
//!
//! | Type | Exam office term |
//! |------|------------------|
//! | Teacher | Staff member / invigilator |
//! | RoomAssignment | Room provisioned for an exam period |
//! | SlotRequest | Room on an exam date and session |
//! | AssignmentRecord | Invigilation duty |

mod assignment;
mod rank;
mod room;
mod slot;
mod teacher;

pub use assignment::{AssignmentRecord, RoomSlotKey};
pub use rank::{Rank, Role, UnknownRank};
pub use room::RoomAssignment;
pub use slot::{GroupKey, Session, ShiftWindow, SlotRequest};
pub use teacher::Teacher;
