//! Category Scoring
//!
//! A category's score is the weighted mean of its scored audits.
//!
//! # Scoring Formula
//!
//! ```text
//! Category Score = Σ(weight × score) / Σ(weight)
//!
//! Over audit refs where:
//!   weight > 0
//!   score is finite and within [0, 1]
//! ```
//!
//! If no audit qualifies the category is ungraded (`None`), which is not
//! the same thing as a score of zero.
//!
//! # Example
//!
//! A category with:
//! - `first-contentful-paint` weight 3, score 0.8
//! - `speed-index` weight 4, score 0.5
//! - `diagnostics` weight 0, score 0.1 (ignored, zero weight)
//! - `screenshot-thumbnails` weight 0, informative, no score (ignored)
//!
//! Score = (3 × 0.8 + 4 × 0.5) / (3 + 4) = 4.4 / 7 ≈ 0.629
//!
//! Scores are never rounded here. [`display_score`] and [`ScoreRating`] are
//! presentation helpers derived from the unrounded value.

mod category_scorer;

pub use category_scorer::{compute_category_score, CategoryScorer, ScoreBreakdown};

use serde::Serialize;

/// Lowest score rated as passing
pub const PASS_THRESHOLD: f64 = 0.9;
/// Lowest score rated as average
pub const AVERAGE_THRESHOLD: f64 = 0.5;

/// Round a [0, 1] score to the 0-100 display scale
pub fn display_score(score: Option<f64>) -> Option<u32> {
    score
        .filter(|s| s.is_finite())
        .map(|s| (s.clamp(0.0, 1.0) * 100.0).round() as u32)
}

/// Coarse rating of a score, for adapters that color gauges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreRating {
    Pass,
    Average,
    Fail,
    Unscored,
}

impl ScoreRating {
    pub fn from_score(score: Option<f64>) -> Self {
        match score.filter(|s| s.is_finite()) {
            None => ScoreRating::Unscored,
            Some(s) if s >= PASS_THRESHOLD => ScoreRating::Pass,
            Some(s) if s >= AVERAGE_THRESHOLD => ScoreRating::Average,
            Some(_) => ScoreRating::Fail,
        }
    }
}

impl std::fmt::Display for ScoreRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreRating::Pass => write!(f, "pass"),
            ScoreRating::Average => write!(f, "average"),
            ScoreRating::Fail => write!(f, "fail"),
            ScoreRating::Unscored => write!(f, "unscored"),
        }
    }
}
