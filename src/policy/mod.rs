//! Invigilation policy.
//!
//! - [`RankPolicy`]: which ranks may hold which role, and which rank pairs
//!   are preferred.
//! - [`PairingEngine`]: the per-slot selection algorithm built on it.

mod pairing;
mod rank;

pub use pairing::{PairSelection, PairingEngine, PairingRequest, PairingState, SelectionPath};
pub use rank::{PairPreference, PairType, RankPolicy};
