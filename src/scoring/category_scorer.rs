//! Weighted-mean category scorer

use crate::error::ReportResult;
use crate::models::{AuditMap, LhrCategory};
use serde::Serialize;
use tracing::debug;

/// Score of one category, with the totals that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Category id
    pub category: String,
    /// Weighted mean in [0, 1], or `None` when nothing was scorable
    pub score: Option<f64>,
    /// Σ weight × score over contributing audits (may overflow to infinity)
    pub weighted_sum: f64,
    /// Σ weight over contributing audits
    pub total_weight: f64,
    /// Audits that contributed to the score
    pub scored_count: usize,
    /// Audits excluded (zero weight, no finite score, or out of range)
    pub skipped_count: usize,
}

impl ScoreBreakdown {
    /// Human-readable explanation of the score
    pub fn explain(&self) -> String {
        let mut lines = Vec::new();
        match self.score {
            Some(score) => {
                lines.push(format!("{}: {:.4}", self.category, score));
                lines.push(format!(
                    "  = {:.4} weighted / {:.4} total weight",
                    self.weighted_sum, self.total_weight
                ));
            }
            None => lines.push(format!("{}: ungraded (no scorable audits)", self.category)),
        }
        lines.push(format!(
            "  {} audits scored, {} skipped",
            self.scored_count, self.skipped_count
        ));
        lines.join("\n")
    }
}

/// Computes category scores against a fixed set of audit results
pub struct CategoryScorer<'a> {
    audits: &'a AuditMap,
}

impl<'a> CategoryScorer<'a> {
    pub fn new(audits: &'a AuditMap) -> Self {
        Self { audits }
    }

    /// Calculate the weighted score of `category`.
    ///
    /// Fails if any audit reference does not resolve.
    pub fn calculate(&self, category: &LhrCategory) -> ReportResult<ScoreBreakdown> {
        let mut contributing: Vec<(f64, f64)> = Vec::new();
        let mut skipped_count = 0;

        for resolved in category.resolve(self.audits)? {
            let weight = resolved.audit_ref.weight;
            let Some(score) = resolved.result.finite_score() else {
                skipped_count += 1;
                continue;
            };
            if !(weight.is_finite() && weight > 0.0) {
                skipped_count += 1;
                continue;
            }
            if !(0.0..=1.0).contains(&score) {
                debug!(
                    "Skipping out-of-range score {} for {} in {}",
                    score, resolved.result.id, category.id
                );
                skipped_count += 1;
                continue;
            }

            contributing.push((weight, score));
        }

        // Weights are divided by the largest one before summing so that huge
        // weights cannot overflow the denominator.
        let max_weight = contributing.iter().map(|(w, _)| *w).fold(0.0, f64::max);
        let (scaled_sum, scaled_total) = contributing
            .iter()
            .fold((0.0_f64, 0.0_f64), |(sum, total), (weight, score)| {
                let weight = weight / max_weight;
                (sum + weight * score, total + weight)
            });
        let score = (scaled_total > 0.0).then(|| scaled_sum / scaled_total);

        let weighted_sum: f64 = contributing.iter().map(|(w, s)| w * s).sum();
        let total_weight: f64 = contributing.iter().map(|(w, _)| w).sum();
        let scored_count = contributing.len();

        debug!(
            "Category {} scored {:?} from {} audits ({} skipped)",
            category.id, score, scored_count, skipped_count
        );

        Ok(ScoreBreakdown {
            category: category.id.clone(),
            score,
            weighted_sum,
            total_weight,
            scored_count,
            skipped_count,
        })
    }
}

/// Weighted score of `category`, or `None` when nothing is scorable
pub fn compute_category_score(
    category: &LhrCategory,
    audits: &AuditMap,
) -> ReportResult<Option<f64>> {
    Ok(CategoryScorer::new(audits).calculate(category)?.score)
}
