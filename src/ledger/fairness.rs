//! Pair-type fairness ledger.
//!
//! Counts how often each pair-type has been used on each date so the
//! pairing engine can rotate through viable types.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::policy::PairType;

/// Per-date pair-type usage counters for one run.
#[derive(Debug, Clone, Default)]
pub struct FairnessLedger {
    usage: HashMap<(NaiveDate, PairType), u32>,
}

impl FairnessLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Times `pair` was used on `date` (default 0).
    pub fn usage_of(&self, date: NaiveDate, pair: PairType) -> u32 {
        self.usage.get(&(date, pair)).copied().unwrap_or(0)
    }

    /// Records one use and returns the new count.
    pub fn record(&mut self, date: NaiveDate, pair: PairType) -> u32 {
        let count = self.usage.entry((date, pair)).or_insert(0);
        *count += 1;
        *count
    }

    /// Usage on a date, sorted by pair-type.
    pub fn usage_on(&self, date: NaiveDate) -> Vec<(PairType, u32)> {
        let mut usage: Vec<_> = self
            .usage
            .iter()
            .filter(|((d, _), _)| *d == date)
            .map(|((_, pair), &count)| (*pair, count))
            .collect();
        usage.sort();
        usage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rank;

    #[test]
    fn test_usage_is_scoped_per_date() {
        let d1 = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2025, 5, 2).unwrap();
        let pair = PairType::new(Rank::AssociateProfessor, Rank::Tutor);
        let mut ledger = FairnessLedger::new();

        assert_eq!(ledger.usage_of(d1, pair), 0);
        assert_eq!(ledger.record(d1, pair), 1);
        assert_eq!(ledger.record(d1, pair), 2);
        assert_eq!(ledger.usage_of(d1, pair), 2);
        assert_eq!(ledger.usage_of(d2, pair), 0);
        assert_eq!(ledger.usage_on(d1), vec![(pair, 2)]);
        assert!(ledger.usage_on(d2).is_empty());
    }
}
