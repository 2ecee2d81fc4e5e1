//! Planner configuration.
//!
//! Rank period limits are supplied by the exam office for each run. Ranks
//! without an entry are unlimited.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::Rank;
use crate::policy::RankPolicy;

/// Maximum periods per rank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankLimits(HashMap<Rank, u32>);

impl RankLimits {
    /// No limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ceiling for a rank.
    pub fn with_limit(mut self, rank: Rank, max_periods: u32) -> Self {
        self.0.insert(rank, max_periods);
        self
    }

    /// The ceiling for a rank, `None` = unlimited.
    pub fn limit_for(&self, rank: Rank) -> Option<u32> {
        self.0.get(&rank).copied()
    }

    /// Whether a teacher of `rank` with `periods` assigned may take one more.
    pub fn allows(&self, rank: Rank, periods: u32) -> bool {
        match self.limit_for(rank) {
            Some(max) => periods < max,
            None => true,
        }
    }
}

fn default_history_window() -> usize {
    1
}

/// Configuration for one planning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Per-rank period ceilings.
    #[serde(default)]
    pub rank_limits: RankLimits,
    /// How many of a group's most recent pairs count as "recent".
    #[serde(default = "default_history_window")]
    pub history_window: usize,
    /// Eligibility and pairing tables.
    #[serde(default)]
    pub policy: RankPolicy,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            rank_limits: RankLimits::default(),
            history_window: default_history_window(),
            policy: RankPolicy::default(),
        }
    }
}

impl PlannerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ceiling for a rank.
    pub fn with_rank_limit(mut self, rank: Rank, max_periods: u32) -> Self {
        self.rank_limits = self.rank_limits.with_limit(rank, max_periods);
        self
    }

    /// Replaces all rank limits.
    pub fn with_rank_limits(mut self, limits: RankLimits) -> Self {
        self.rank_limits = limits;
        self
    }

    /// Sets the repeat-avoidance window.
    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    /// Replaces the rank policy.
    pub fn with_policy(mut self, policy: RankPolicy) -> Self {
        self.policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_absent_is_unlimited() {
        let limits = RankLimits::new().with_limit(Rank::AssociateProfessor, 2);
        assert!(limits.allows(Rank::AssociateProfessor, 1));
        assert!(!limits.allows(Rank::AssociateProfessor, 2));
        assert!(limits.allows(Rank::Tutor, 10_000));
        assert_eq!(limits.limit_for(Rank::Tutor), None);
    }

    #[test]
    fn test_zero_limit_blocks_rank() {
        let limits = RankLimits::new().with_limit(Rank::Lecturer, 0);
        assert!(!limits.allows(Rank::Lecturer, 0));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "rank_limits": { "Associate Professor": 5, "Associate Lecturer": 8 },
            "history_window": 2
        }"#;
        let config: PlannerConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.rank_limits.limit_for(Rank::AssociateProfessor), Some(5));
        assert_eq!(config.rank_limits.limit_for(Rank::AssistantLecturer), Some(8));
        assert_eq!(config.rank_limits.limit_for(Rank::Lecturer), None);
        assert_eq!(config.history_window, 2);
        assert_eq!(config.policy, RankPolicy::default());
    }

    #[test]
    fn test_config_defaults() {
        let config: PlannerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.history_window, 1);
    }
}
