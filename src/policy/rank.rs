//! Rank policy tables.
//!
//! Static eligibility and pairing preference. By school rule only Associate
//! Professors supervise; every rank may assist, including Associate
//! Professors, which lets a same-rank pair staff a room when nothing else
//! is possible.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Rank, Role, Teacher};

/// A (supervisor rank, assistant rank) combination.
///
/// Used as a structured key by the fairness ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairType {
    pub supervisor: Rank,
    pub assistant: Rank,
}

impl PairType {
    pub fn new(supervisor: Rank, assistant: Rank) -> Self {
        Self {
            supervisor,
            assistant,
        }
    }
}

impl fmt::Display for PairType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}", self.supervisor, self.assistant)
    }
}

/// One entry of the pairing preference list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairPreference {
    pub pair: PairType,
    /// Considered only when no regular entry is viable.
    #[serde(default)]
    pub last_resort: bool,
}

/// Eligibility and pairing preference tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankPolicy {
    /// Ranks allowed to supervise.
    pub supervisor_ranks: Vec<Rank>,
    /// Ranks allowed to assist.
    pub assistant_ranks: Vec<Rank>,
    /// Pair-types, most preferred first.
    pub preferences: Vec<PairPreference>,
}

impl Default for RankPolicy {
    fn default() -> Self {
        let sup = Rank::AssociateProfessor;
        let regular = |assistant| PairPreference {
            pair: PairType::new(sup, assistant),
            last_resort: false,
        };
        Self {
            supervisor_ranks: vec![sup],
            assistant_ranks: vec![
                Rank::Lecturer,
                Rank::AssistantLecturer,
                Rank::Tutor,
                Rank::AssociateProfessor,
            ],
            preferences: vec![
                regular(Rank::Lecturer),
                regular(Rank::AssistantLecturer),
                regular(Rank::Tutor),
                PairPreference {
                    pair: PairType::new(sup, sup),
                    last_resort: true,
                },
            ],
        }
    }
}

impl RankPolicy {
    /// Whether a rank may hold a role.
    pub fn rank_allows(&self, rank: Rank, role: Role) -> bool {
        match role {
            Role::Supervisor => self.supervisor_ranks.contains(&rank),
            Role::Assistant => self.assistant_ranks.contains(&rank),
        }
    }

    /// Whether a teacher may hold a role.
    pub fn is_eligible(&self, teacher: &Teacher, role: Role) -> bool {
        self.rank_allows(teacher.rank, role)
    }

    /// Pair-types in preference order, last-resort entries at the end.
    pub fn pairing_preference_order(&self) -> &[PairPreference] {
        &self.preferences
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_associate_professors_supervise() {
        let policy = RankPolicy::default();
        assert!(policy.rank_allows(Rank::AssociateProfessor, Role::Supervisor));
        assert!(!policy.rank_allows(Rank::Lecturer, Role::Supervisor));
        assert!(!policy.rank_allows(Rank::Tutor, Role::Supervisor));
    }

    #[test]
    fn test_every_rank_may_assist() {
        let policy = RankPolicy::default();
        for rank in Rank::ALL {
            assert!(policy.rank_allows(rank, Role::Assistant), "{rank}");
        }
    }

    #[test]
    fn test_preference_order_ends_with_same_rank_last_resort() {
        let policy = RankPolicy::default();
        let order = policy.pairing_preference_order();
        assert_eq!(order[0].pair.assistant, Rank::Lecturer);

        let last = order.last().unwrap();
        assert!(last.last_resort);
        assert_eq!(last.pair.supervisor, last.pair.assistant);
        assert!(order[..order.len() - 1].iter().all(|p| !p.last_resort));
    }

    #[test]
    fn test_is_eligible_uses_teacher_rank() {
        let policy = RankPolicy::default();
        let tutor = Teacher::new("T1", Rank::Tutor);
        assert!(!policy.is_eligible(&tutor, Role::Supervisor));
        assert!(policy.is_eligible(&tutor, Role::Assistant));
    }
}
