//! Clump classification
//!
//! Every audit in a category lands in exactly one clump (disposition
//! bucket). Precedence, first match wins:
//!
//! ```text
//! scoreDisplayMode == manual          -> Manual
//! scoreDisplayMode == notApplicable   -> NotApplicable
//! score == 1 && no warnings           -> Passed
//! score == 1 && warnings              -> Warning
//! anything else                       -> Failed
//! ```
//!
//! Only passing audits are promoted to the Warning clump. A failing audit
//! keeps its warnings but stays in Failed. Informative and error audits
//! without a perfect score also land in Failed.

mod grouping;

pub use grouping::{organize, GroupRun, Grouped, GroupingPolicy};

use crate::error::ReportResult;
use crate::models::{AuditMap, AuditResult, LhrCategory, ResolvedAudit, ScoreDisplayMode};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Disposition bucket, declared in presentation order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Clump {
    Failed,
    Warning,
    Manual,
    Passed,
    NotApplicable,
}

impl Clump {
    /// All clumps in presentation order
    pub const ALL: [Clump; 5] = [
        Clump::Failed,
        Clump::Warning,
        Clump::Manual,
        Clump::Passed,
        Clump::NotApplicable,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Clump::Failed => "failed",
            Clump::Warning => "warning",
            Clump::Manual => "manual",
            Clump::Passed => "passed",
            Clump::NotApplicable => "notApplicable",
        }
    }
}

impl std::fmt::Display for Clump {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Clump {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "failed" => Ok(Clump::Failed),
            "warning" => Ok(Clump::Warning),
            "manual" => Ok(Clump::Manual),
            "passed" => Ok(Clump::Passed),
            "notapplicable" => Ok(Clump::NotApplicable),
            _ => Err(format!(
                "Unknown clump '{}'. Valid clumps: failed, warning, manual, passed, notApplicable",
                s
            )),
        }
    }
}

/// Assign an audit result to its clump
pub fn classify(audit: &AuditResult) -> Clump {
    match audit.score_display_mode {
        ScoreDisplayMode::Manual => Clump::Manual,
        ScoreDisplayMode::NotApplicable => Clump::NotApplicable,
        ScoreDisplayMode::Binary
        | ScoreDisplayMode::Numeric
        | ScoreDisplayMode::Informative
        | ScoreDisplayMode::Error => {
            if audit.score.value() == Some(1.0) {
                if audit.warnings().is_empty() {
                    Clump::Passed
                } else {
                    Clump::Warning
                }
            } else {
                Clump::Failed
            }
        }
    }
}

/// Members of each clump for one category, in original audit order
#[derive(Debug, Clone, Default)]
pub struct ClumpMap<'a> {
    members: [Vec<ResolvedAudit<'a>>; 5],
}

impl<'a> ClumpMap<'a> {
    fn push(&mut self, clump: Clump, audit: ResolvedAudit<'a>) {
        self.members[clump.index()].push(audit);
    }

    pub fn get(&self, clump: Clump) -> &[ResolvedAudit<'a>] {
        &self.members[clump.index()]
    }

    pub fn len(&self, clump: Clump) -> usize {
        self.members[clump.index()].len()
    }

    /// Total number of classified audits across all clumps
    pub fn total(&self) -> usize {
        self.members.iter().map(Vec::len).sum()
    }

    /// Clumps and their members in presentation order (empty clumps included)
    pub fn iter(&self) -> impl Iterator<Item = (Clump, &[ResolvedAudit<'a>])> {
        Clump::ALL
            .into_iter()
            .map(move |clump| (clump, self.get(clump)))
    }
}

/// Classify every audit referenced by `category`.
///
/// Fails on the first audit reference that does not resolve.
pub fn classify_category<'a>(
    category: &'a LhrCategory,
    audits: &'a AuditMap,
) -> ReportResult<ClumpMap<'a>> {
    let mut clumps = ClumpMap::default();
    for resolved in category.resolve(audits)? {
        clumps.push(classify(resolved.result), resolved);
    }
    Ok(clumps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuditRef, Nullable};

    fn audit(id: &str, score: Option<f64>, mode: ScoreDisplayMode) -> AuditResult {
        AuditResult {
            id: id.into(),
            title: id.into(),
            score: score.into(),
            score_display_mode: mode,
            ..Default::default()
        }
    }

    fn warned(mut audit: AuditResult, warning: &str) -> AuditResult {
        audit.warnings = Nullable::Value(vec![warning.to_string()]);
        audit
    }

    fn category_of(audits: &[AuditResult]) -> (LhrCategory, AuditMap) {
        let category = LhrCategory {
            id: "test".into(),
            audit_refs: audits.iter().map(|a| AuditRef::new(&a.id, 1.0)).collect(),
            ..Default::default()
        };
        let map = audits.iter().map(|a| (a.id.clone(), a.clone())).collect();
        (category, map)
    }

    #[test]
    fn test_display_mode_precedence() {
        // Manual and notApplicable win even with a perfect score
        let manual = audit("m", Some(1.0), ScoreDisplayMode::Manual);
        assert_eq!(classify(&manual), Clump::Manual);
        let na = audit("na", Some(1.0), ScoreDisplayMode::NotApplicable);
        assert_eq!(classify(&na), Clump::NotApplicable);
        let na_warned = warned(audit("na", None, ScoreDisplayMode::NotApplicable), "w");
        assert_eq!(classify(&na_warned), Clump::NotApplicable);
    }

    #[test]
    fn test_score_rules() {
        assert_eq!(classify(&audit("a", Some(1.0), ScoreDisplayMode::Binary)), Clump::Passed);
        assert_eq!(classify(&audit("a", Some(0.99), ScoreDisplayMode::Numeric)), Clump::Failed);
        assert_eq!(classify(&audit("a", Some(0.0), ScoreDisplayMode::Binary)), Clump::Failed);
        assert_eq!(classify(&audit("a", None, ScoreDisplayMode::Binary)), Clump::Failed);
        assert_eq!(
            classify(&audit("a", Some(f64::NAN), ScoreDisplayMode::Numeric)),
            Clump::Failed
        );
        // Out-of-range scores are not a perfect score
        assert_eq!(classify(&audit("a", Some(1.5), ScoreDisplayMode::Numeric)), Clump::Failed);
    }

    #[test]
    fn test_informative_and_error_fall_through_to_failed() {
        assert_eq!(
            classify(&audit("i", None, ScoreDisplayMode::Informative)),
            Clump::Failed
        );
        assert_eq!(classify(&audit("e", None, ScoreDisplayMode::Error)), Clump::Failed);
        assert_eq!(
            classify(&audit("i", Some(1.0), ScoreDisplayMode::Informative)),
            Clump::Passed
        );
    }

    #[test]
    fn test_passing_warning_promoted_failing_warning_kept() {
        let failing = warned(audit("failing", Some(0.0), ScoreDisplayMode::Binary), "Failed and warned");
        let passing = warned(audit("passing", Some(1.0), ScoreDisplayMode::Binary), "A passing warning");
        let (category, audits) = category_of(&[failing, passing]);

        let clumps = classify_category(&category, &audits).expect("classify");
        let failed = clumps.get(Clump::Failed);
        let warning = clumps.get(Clump::Warning);

        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].result.id, "failing");
        assert_eq!(failed[0].result.warnings(), ["Failed and warned"]);
        assert_eq!(warning.len(), 1);
        assert_eq!(warning[0].result.id, "passing");
        assert_eq!(warning[0].result.warnings(), ["A passing warning"]);
        assert_eq!(clumps.len(Clump::Passed), 0);
        assert_eq!(clumps.total(), 2);
    }

    #[test]
    fn test_all_zero_scores_are_failed() {
        let audits: Vec<AuditResult> = (0..12)
            .map(|i| audit(&format!("audit-{i}"), Some(0.0), ScoreDisplayMode::Binary))
            .collect();
        let (category, map) = category_of(&audits);

        let clumps = classify_category(&category, &map).expect("classify");
        assert_eq!(clumps.len(Clump::Failed), 12);
        assert_eq!(clumps.len(Clump::Passed), 0);
        assert_eq!(clumps.len(Clump::Warning), 0);
        assert_eq!(clumps.len(Clump::NotApplicable), 0);
    }

    #[test]
    fn test_members_keep_original_order() {
        let audits = vec![
            audit("c", Some(0.0), ScoreDisplayMode::Binary),
            audit("a", Some(1.0), ScoreDisplayMode::Binary),
            audit("b", Some(0.2), ScoreDisplayMode::Numeric),
        ];
        let (category, map) = category_of(&audits);
        let clumps = classify_category(&category, &map).expect("classify");
        let ids: Vec<&str> = clumps
            .get(Clump::Failed)
            .iter()
            .map(|m| m.result.id.as_str())
            .collect();
        assert_eq!(ids, ["c", "b"]);
    }

    #[test]
    fn test_dangling_reference_fails() {
        let (mut category, map) = category_of(&[audit("a", Some(1.0), ScoreDisplayMode::Binary)]);
        category.audit_refs.push(AuditRef::new("ghost", 1.0));
        assert!(classify_category(&category, &map).is_err());
    }

    #[test]
    fn test_clump_parsing() {
        assert_eq!("passed".parse::<Clump>(), Ok(Clump::Passed));
        assert_eq!("notApplicable".parse::<Clump>(), Ok(Clump::NotApplicable));
        assert_eq!("not-applicable".parse::<Clump>(), Ok(Clump::NotApplicable));
        assert!("bogus".parse::<Clump>().is_err());
        let json = serde_json::to_string(&Clump::NotApplicable).expect("serialize");
        assert_eq!(json, "\"notApplicable\"");
    }
}
