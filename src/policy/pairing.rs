//! Pairing policy engine.
//!
//! Picks one supervisor and one assistant for a room-slot.
//!
//! # Algorithm
//!
//! 1. Filter both pools to teachers whose rank allows the role, who are
//!    below their rank ceiling, and who are free in this (date, session).
//!    No supervisor left means no assignment.
//! 2. A pair-type from the preference list is viable when some assistant of
//!    its assistant rank can sit next to a different supervisor of its
//!    supervisor rank. Last-resort entries are only considered when no
//!    regular entry is viable.
//! 3. No viable pair-type: lowest-workload supervisor plus lowest-workload
//!    assistant of any rank, or the supervisor alone.
//! 4. Otherwise take the viable pair-type used least on this date (ties by
//!    preference order) and record the use.
//! 5. Within the type, prefer teachers absent from the group's recent pairs,
//!    then lower workload, then pool order. If the chosen assistant rank has
//!    nobody left after removing the supervisor, any assistant will do.
//! 6. Append the result to the group's pair history.
//!
//! Workload is not committed here; the caller commits picks before the next
//! slot is evaluated.

use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::trace;

use super::{PairType, RankPolicy};
use crate::config::{PlannerConfig, RankLimits};
use crate::error::ShortageReason;
use crate::ledger::{AvailabilityChecker, FairnessLedger, PairHistory, PairRecord, WorkloadLedger};
use crate::models::{GroupKey, Rank, Role, Session};

/// One room-slot to staff.
#[derive(Debug, Clone, Copy)]
pub struct PairingRequest<'a> {
    pub date: NaiveDate,
    pub session: Session,
    pub group_key: &'a GroupKey,
    /// Supervisor pool (teacher ids) in tie-break order.
    pub supervisors: &'a [String],
    /// Assistant pool (teacher ids) in tie-break order.
    pub assistants: &'a [String],
}

/// Ledgers the engine reads and updates.
#[derive(Debug)]
pub struct PairingState<'a> {
    pub workload: &'a WorkloadLedger,
    pub availability: &'a AvailabilityChecker,
    pub fairness: &'a mut FairnessLedger,
    pub history: &'a mut PairHistory,
}

/// How a selection was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPath {
    /// Through a pair-type from the preference list.
    Preferred(PairType),
    /// No preferred pair-type was viable.
    Fallback,
    /// No supervisor could be found.
    Empty,
}

/// Outcome of one pairing decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairSelection {
    pub supervisor: Option<String>,
    pub assistant: Option<String>,
    pub path: SelectionPath,
}

impl PairSelection {
    fn empty() -> Self {
        Self {
            supervisor: None,
            assistant: None,
            path: SelectionPath::Empty,
        }
    }

    /// Whether both roles are filled.
    pub fn is_complete(&self) -> bool {
        self.supervisor.is_some() && self.assistant.is_some()
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    id: &'a str,
    rank: Rank,
    periods: u32,
}

/// Supervisor/assistant selection for single room-slots.
#[derive(Debug, Clone)]
pub struct PairingEngine<'p> {
    policy: &'p RankPolicy,
    limits: &'p RankLimits,
    history_window: usize,
}

impl<'p> PairingEngine<'p> {
    /// Creates an engine from a planner configuration.
    pub fn new(config: &'p PlannerConfig) -> Self {
        Self {
            policy: &config.policy,
            limits: &config.rank_limits,
            history_window: config.history_window,
        }
    }

    /// Selects a pair for one room-slot.
    pub fn select(&self, req: &PairingRequest<'_>, state: &mut PairingState<'_>) -> PairSelection {
        let supervisors = self.eligible(Role::Supervisor, req.supervisors, req, state);
        if supervisors.is_empty() {
            return PairSelection::empty();
        }
        let assistants = self.eligible(Role::Assistant, req.assistants, req, state);

        let selection = match self.choose_pair_type(&supervisors, &assistants, req.date, state) {
            None => self.fallback(&supervisors, &assistants),
            Some(pair) => {
                state.fairness.record(req.date, pair);
                self.within_pair_type(pair, &supervisors, &assistants, req, state)
            }
        };

        trace!(
            group = %req.group_key,
            supervisor = ?selection.supervisor,
            assistant = ?selection.assistant,
            path = ?selection.path,
            "pair selected"
        );

        state.history.append(
            req.group_key.clone(),
            PairRecord::new(selection.supervisor.clone(), selection.assistant.clone()),
        );
        selection
    }

    /// Explains why a pool has nobody for `role`.
    ///
    /// `exclude` counts as occupied (e.g. the supervisor already picked for
    /// this room when diagnosing the assistant side).
    pub fn shortage(
        &self,
        role: Role,
        pool: &[String],
        exclude: Option<&str>,
        req: &PairingRequest<'_>,
        state: &PairingState<'_>,
    ) -> ShortageReason {
        let of_rank: Vec<&str> = pool
            .iter()
            .map(String::as_str)
            .filter(|id| {
                state
                    .workload
                    .rank(id)
                    .is_some_and(|rank| self.policy.rank_allows(rank, role))
            })
            .collect();
        if of_rank.is_empty() {
            return ShortageReason::NoCandidatesOfRank;
        }
        let free = of_rank.iter().any(|id| {
            Some(*id) != exclude && !state.availability.is_busy(id, req.date, req.session)
        });
        if free {
            ShortageReason::AllOverLimit
        } else {
            ShortageReason::AllBusy
        }
    }

    fn eligible<'a>(
        &self,
        role: Role,
        pool: &'a [String],
        req: &PairingRequest<'_>,
        state: &PairingState<'_>,
    ) -> Vec<Candidate<'a>> {
        let mut seen = HashSet::new();
        pool.iter()
            .filter(|id| seen.insert(id.as_str()))
            .filter_map(|id| {
                let rank = state.workload.rank(id)?;
                let periods = state.workload.periods(id)?;
                let ok = self.policy.rank_allows(rank, role)
                    && state.workload.eligible(id, self.limits)
                    && !state.availability.is_busy(id, req.date, req.session);
                ok.then_some(Candidate {
                    id: id.as_str(),
                    rank,
                    periods,
                })
            })
            .collect()
    }

    fn choose_pair_type(
        &self,
        supervisors: &[Candidate<'_>],
        assistants: &[Candidate<'_>],
        date: NaiveDate,
        state: &PairingState<'_>,
    ) -> Option<PairType> {
        let viable = |pair: &PairType| {
            assistants.iter().filter(|a| a.rank == pair.assistant).any(|a| {
                supervisors
                    .iter()
                    .any(|s| s.rank == pair.supervisor && s.id != a.id)
            })
        };
        let least_used = |last_resort: bool| {
            self.policy
                .pairing_preference_order()
                .iter()
                .filter(|p| p.last_resort == last_resort && viable(&p.pair))
                .enumerate()
                .min_by_key(|(order, p)| (state.fairness.usage_of(date, p.pair), *order))
                .map(|(_, p)| p.pair)
        };
        least_used(false).or_else(|| least_used(true))
    }

    fn fallback(
        &self,
        supervisors: &[Candidate<'_>],
        assistants: &[Candidate<'_>],
    ) -> PairSelection {
        let supervisor = lowest_workload(supervisors.iter().copied());
        let assistant = supervisor.and_then(|s| {
            lowest_workload(assistants.iter().copied().filter(|a| a.id != s.id))
        });
        PairSelection {
            supervisor: supervisor.map(|c| c.id.to_string()),
            assistant: assistant.map(|c| c.id.to_string()),
            path: SelectionPath::Fallback,
        }
    }

    fn within_pair_type(
        &self,
        pair: PairType,
        supervisors: &[Candidate<'_>],
        assistants: &[Candidate<'_>],
        req: &PairingRequest<'_>,
        state: &PairingState<'_>,
    ) -> PairSelection {
        let recent = |role: Role, c: &Candidate<'_>| {
            state
                .history
                .recently_held(req.group_key, self.history_window, role, c.id)
        };

        let supervisor = preferred(
            supervisors.iter().copied().filter(|s| s.rank == pair.supervisor),
            |c| recent(Role::Supervisor, c),
        );
        let Some(supervisor) = supervisor else {
            return self.fallback(supervisors, assistants);
        };

        let others = || assistants.iter().copied().filter(|a| a.id != supervisor.id);
        let assistant = preferred(others().filter(|a| a.rank == pair.assistant), |c| {
            recent(Role::Assistant, c)
        })
        .or_else(|| preferred(others(), |c| recent(Role::Assistant, c)));

        PairSelection {
            supervisor: Some(supervisor.id.to_string()),
            assistant: assistant.map(|c| c.id.to_string()),
            path: SelectionPath::Preferred(pair),
        }
    }
}

/// Lowest workload, first in pool order on ties.
fn lowest_workload<'a>(candidates: impl Iterator<Item = Candidate<'a>>) -> Option<Candidate<'a>> {
    candidates
        .enumerate()
        .min_by_key(|(order, c)| (c.periods, *order))
        .map(|(_, c)| c)
}

/// Not recently used first, then lowest workload, then pool order.
fn preferred<'a>(
    candidates: impl Iterator<Item = Candidate<'a>>,
    recently_used: impl Fn(&Candidate<'a>) -> bool,
) -> Option<Candidate<'a>> {
    candidates
        .enumerate()
        .min_by_key(|(order, c)| (recently_used(c), c.periods, *order))
        .map(|(_, c)| c)
}
