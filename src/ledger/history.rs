//! Pair history per recurring room-group.
//!
//! A soft preference only: the engine avoids teachers found in a group's
//! most recent pairs, but reuses them when nobody else is left.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{GroupKey, Role};

/// A previously chosen pair. Either side may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PairRecord {
    pub supervisor: Option<String>,
    pub assistant: Option<String>,
}

impl PairRecord {
    pub fn new(supervisor: Option<String>, assistant: Option<String>) -> Self {
        Self {
            supervisor,
            assistant,
        }
    }

    fn holder(&self, role: Role) -> Option<&str> {
        match role {
            Role::Supervisor => self.supervisor.as_deref(),
            Role::Assistant => self.assistant.as_deref(),
        }
    }
}

/// Ordered pair history keyed by group.
#[derive(Debug, Clone, Default)]
pub struct PairHistory {
    pairs: HashMap<GroupKey, Vec<PairRecord>>,
}

impl PairHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// All pairs recorded for a group, oldest first.
    pub fn past_pairs_for(&self, key: &GroupKey) -> &[PairRecord] {
        self.pairs.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Appends a pair for a group.
    pub fn append(&mut self, key: GroupKey, pair: PairRecord) {
        self.pairs.entry(key).or_default().push(pair);
    }

    /// Whether `teacher_id` held `role` in one of the group's last `window`
    /// pairs.
    pub fn recently_held(
        &self,
        key: &GroupKey,
        window: usize,
        role: Role,
        teacher_id: &str,
    ) -> bool {
        let past = self.past_pairs_for(key);
        past.iter()
            .rev()
            .take(window)
            .any(|p| p.holder(role) == Some(teacher_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(s: &str, a: &str) -> PairRecord {
        PairRecord::new(Some(s.into()), Some(a.into()))
    }

    #[test]
    fn test_append_keeps_order() {
        let key = GroupKey::new("CS-Y1");
        let mut history = PairHistory::new();
        history.append(key.clone(), pair("S1", "A1"));
        history.append(key.clone(), pair("S2", "A2"));

        assert_eq!(history.past_pairs_for(&key), &[pair("S1", "A1"), pair("S2", "A2")]);
        assert!(history.past_pairs_for(&GroupKey::new("other")).is_empty());
    }

    #[test]
    fn test_recently_held_respects_window_and_role() {
        let key = GroupKey::new("CS-Y1");
        let mut history = PairHistory::new();
        history.append(key.clone(), pair("S1", "A1"));
        history.append(key.clone(), pair("S2", "A2"));

        assert!(history.recently_held(&key, 1, Role::Supervisor, "S2"));
        assert!(!history.recently_held(&key, 1, Role::Supervisor, "S1"));
        assert!(history.recently_held(&key, 2, Role::Supervisor, "S1"));
        assert!(!history.recently_held(&key, 2, Role::Assistant, "S1"));
        assert!(!history.recently_held(&key, 0, Role::Supervisor, "S2"));
    }
}
