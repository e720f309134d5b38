// WHY: precision/recall/F1 only depend on three counts, keeping scoring
// independent from how the alignment produced them

use serde::Serialize;

/// Counts collected over one evaluation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunTotals {
    pub evaluated_lines: usize,
    pub reference_lines: usize,
    pub matched_cuts: usize,
}

/// Cut placement scores, each in [0, 1] for non-empty inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CutMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl CutMetrics {
    /// Score a run. Totals must be non-zero; inputs are validated before alignment.
    pub fn from_totals(totals: &RunTotals) -> Self {
        let precision = precision(totals.matched_cuts, totals.evaluated_lines);
        let recall = recall(totals.matched_cuts, totals.reference_lines);
        Self {
            precision,
            recall,
            f1: f1(precision, recall),
        }
    }
}

/// Matched cuts over evaluated cuts
///
/// Returns NaN when `total_evaluated` is 0.
pub fn precision(matched: usize, total_evaluated: usize) -> f64 {
    ratio(matched, total_evaluated)
}

/// Matched cuts over reference cuts
///
/// Returns NaN when `total_reference` is 0.
pub fn recall(matched: usize, total_reference: usize) -> f64 {
    ratio(matched, total_reference)
}

/// Harmonic mean of precision and recall, 0 when both are 0
pub fn f1(precision: f64, recall: f64) -> f64 {
    let sum = precision + recall;
    if sum == 0.0 {
        return 0.0;
    }
    2.0 * (precision * recall) / sum
}

fn ratio(matched: usize, total: usize) -> f64 {
    matched as f64 / total as f64
}
