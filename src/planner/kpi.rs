//! Batch quality metrics.
//!
//! Computed from a preview, so they can be shown before anything is saved.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Fill rate | Fully staffed slots / all slots |
//! | Load spread | Max - min periods added, over teachers who got work |
//! | Pair-type usage | Chosen rank pairs per date |

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

use super::batch::{BatchPreview, SlotStatus};
use crate::policy::PairType;

/// Batch performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchKpi {
    /// Slots with both roles filled.
    pub staffed: usize,
    /// Slots with a supervisor only.
    pub partial: usize,
    /// Slots with nobody assigned.
    pub failed: usize,
    /// Fraction of slots fully staffed (0.0..1.0).
    pub fill_rate: f64,
    /// Periods added per teacher by this batch.
    pub load_by_teacher: HashMap<String, u32>,
    /// Max minus min of `load_by_teacher` (0 when empty).
    pub load_spread: u32,
    /// Times each rank pair was chosen, per date.
    pub pair_type_usage: BTreeMap<NaiveDate, BTreeMap<PairType, u32>>,
}

impl BatchKpi {
    /// Computes KPIs from a preview.
    pub fn calculate(preview: &BatchPreview) -> Self {
        let mut staffed = 0;
        let mut partial = 0;
        let mut failed = 0;
        let mut load_by_teacher: HashMap<String, u32> = HashMap::new();
        let mut pair_type_usage: BTreeMap<NaiveDate, BTreeMap<PairType, u32>> = BTreeMap::new();

        for slot in &preview.slots {
            match slot.status() {
                SlotStatus::Staffed => staffed += 1,
                SlotStatus::Partial => partial += 1,
                SlotStatus::Failed => failed += 1,
            }

            for pick in [&slot.supervisor, &slot.assistant].into_iter().flatten() {
                *load_by_teacher.entry(pick.id.clone()).or_insert(0) += 1;
            }

            if let Some(pair) = slot.pair_type() {
                *pair_type_usage
                    .entry(slot.request.date)
                    .or_default()
                    .entry(pair)
                    .or_insert(0) += 1;
            }
        }

        let load_spread = match (load_by_teacher.values().max(), load_by_teacher.values().min()) {
            (Some(max), Some(min)) => max - min,
            _ => 0,
        };

        let total = preview.slots.len();
        let fill_rate = if total == 0 {
            1.0
        } else {
            staffed as f64 / total as f64
        };

        Self {
            staffed,
            partial,
            failed,
            fill_rate,
            load_by_teacher,
            load_spread,
            pair_type_usage,
        }
    }

    /// Whether the batch meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_fill_rate: f64, max_load_spread: u32) -> bool {
        self.fill_rate >= min_fill_rate && self.load_spread <= max_load_spread
    }
}
