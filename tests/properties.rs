//! Property tests for classification, grouping and scoring

use lhr_report::clumps::{classify_category, organize, Clump};
use lhr_report::models::{
    AuditMap, AuditRef, AuditResult, LhrCategory, Nullable, ScoreDisplayMode,
};
use lhr_report::plugin::{is_plugin, PLUGIN_PREFIX};
use lhr_report::scoring::compute_category_score;
use proptest::prelude::*;
use std::collections::HashSet;

fn display_mode() -> impl Strategy<Value = ScoreDisplayMode> {
    prop_oneof![
        Just(ScoreDisplayMode::Binary),
        Just(ScoreDisplayMode::Numeric),
        Just(ScoreDisplayMode::Informative),
        Just(ScoreDisplayMode::NotApplicable),
        Just(ScoreDisplayMode::Manual),
        Just(ScoreDisplayMode::Error),
    ]
}

fn score() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        Just(None),
        Just(Some(0.0)),
        Just(Some(1.0)),
        (0.0f64..=1.0).prop_map(Some),
    ]
}

fn group() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("metrics".to_string())),
        Just(Some("diagnostics".to_string())),
        Just(Some("opportunities".to_string())),
    ]
}

prop_compose! {
    fn audit_spec()(
        mode in display_mode(),
        score in score(),
        warned in any::<bool>(),
        weight in prop_oneof![Just(0.0f64), 0.0f64..10.0],
        group in group(),
    ) -> (ScoreDisplayMode, Option<f64>, bool, f64, Option<String>) {
        (mode, score, warned, weight, group)
    }
}

fn build(specs: &[(ScoreDisplayMode, Option<f64>, bool, f64, Option<String>)]) -> (LhrCategory, AuditMap) {
    let mut audits = AuditMap::new();
    let mut refs = Vec::new();
    for (i, (mode, score, warned, weight, group)) in specs.iter().enumerate() {
        let id = format!("audit-{i}");
        audits.insert(
            id.clone(),
            AuditResult {
                id: id.clone(),
                score: (*score).into(),
                score_display_mode: *mode,
                warnings: if *warned {
                    Nullable::Value(vec!["warning".to_string()])
                } else {
                    Nullable::Absent
                },
                ..Default::default()
            },
        );
        let mut audit_ref = AuditRef::new(id, *weight);
        audit_ref.group = group.clone();
        refs.push(audit_ref);
    }
    let category = LhrCategory {
        id: "category".into(),
        audit_refs: refs,
        ..Default::default()
    };
    (category, audits)
}

proptest! {
    #[test]
    fn clumps_partition_the_category(specs in prop::collection::vec(audit_spec(), 0..30)) {
        let (category, audits) = build(&specs);
        let clumps = classify_category(&category, &audits).unwrap();

        prop_assert_eq!(clumps.total(), category.audit_refs.len());
        let mut seen = HashSet::new();
        for (_, members) in clumps.iter() {
            for member in members {
                prop_assert!(seen.insert(member.audit_ref.id.clone()), "duplicate member");
            }
        }
        prop_assert_eq!(seen.len(), category.audit_refs.len());
    }

    #[test]
    fn warnings_never_rescue_a_failing_audit(specs in prop::collection::vec(audit_spec(), 1..30)) {
        let (category, audits) = build(&specs);
        let clumps = classify_category(&category, &audits).unwrap();

        for member in clumps.get(Clump::Warning) {
            prop_assert_eq!(member.result.score.value(), Some(1.0));
            prop_assert!(!member.result.warnings().is_empty());
        }
        for member in clumps.get(Clump::Passed) {
            prop_assert!(member.result.warnings().is_empty());
        }
    }

    #[test]
    fn organize_preserves_membership(
        specs in prop::collection::vec(audit_spec(), 0..30),
        grouping in any::<bool>(),
    ) {
        let (category, _) = build(&specs);
        let runs = organize(&category.audit_refs, grouping);

        let flattened: Vec<&str> = runs
            .iter()
            .flat_map(|run| run.members.iter().map(|m| m.id.as_str()))
            .collect();
        prop_assert_eq!(flattened.len(), category.audit_refs.len());
        let unique: HashSet<&str> = flattened.iter().copied().collect();
        prop_assert_eq!(unique.len(), category.audit_refs.len());

        if grouping {
            // Ungrouped singletons first, then one run per distinct group
            let first_grouped = runs.iter().position(|r| r.group.is_some()).unwrap_or(runs.len());
            prop_assert!(runs[first_grouped..].iter().all(|r| r.group.is_some()));
            prop_assert!(runs[..first_grouped].iter().all(|r| r.members.len() == 1));

            let groups: Vec<&str> = runs.iter().filter_map(|r| r.group.as_deref()).collect();
            let distinct: HashSet<&str> = groups.iter().copied().collect();
            prop_assert_eq!(groups.len(), distinct.len());

            for run in &runs {
                prop_assert!(run.members.iter().all(|m| m.group == run.group));
            }
        } else if !runs.is_empty() {
            prop_assert_eq!(runs.len(), 1);
            prop_assert!(runs[0].group.is_none());
        }
    }

    #[test]
    fn score_is_order_invariant(
        specs in prop::collection::vec(audit_spec(), 0..20),
        seed in any::<u64>(),
    ) {
        let (category, audits) = build(&specs);
        let mut shuffled = category.clone();
        // Deterministic rotation plus reversal as a cheap permutation
        let len = shuffled.audit_refs.len();
        if len > 0 {
            shuffled.audit_refs.rotate_left((seed as usize) % len);
            shuffled.audit_refs.reverse();
        }

        let a = compute_category_score(&category, &audits).unwrap();
        let b = compute_category_score(&shuffled, &audits).unwrap();
        match (a, b) {
            (None, None) => {}
            (Some(x), Some(y)) => prop_assert!((x - y).abs() < 1e-9, "{} vs {}", x, y),
            _ => prop_assert!(false, "scores disagree: {:?} vs {:?}", a, b),
        }
        if let Some(s) = a {
            prop_assert!((0.0..=1.0 + 1e-12).contains(&s));
        }
    }

    #[test]
    fn zero_weights_are_ungraded(specs in prop::collection::vec(audit_spec(), 0..20)) {
        let zeroed: Vec<_> = specs
            .into_iter()
            .map(|(mode, score, warned, _, group)| (mode, score, warned, 0.0, group))
            .collect();
        let (category, audits) = build(&zeroed);
        prop_assert_eq!(compute_category_score(&category, &audits).unwrap(), None);
    }

    #[test]
    fn plugin_detection_is_prefix_only(id in "[a-z-]{0,30}") {
        prop_assert_eq!(is_plugin(&id), id.starts_with(PLUGIN_PREFIX));
        let prefixed = format!("{PLUGIN_PREFIX}{id}");
        prop_assert!(is_plugin(&prefixed));
    }
}
