use super::*;
use insta::assert_json_snapshot;
use yare::parameterized;

fn solo(include: &[&str], exclude: &[&str]) -> PermissionEngine {
    engine(vec![DistributorRequest::new(
        "solo",
        include.iter().copied(),
        exclude.iter().copied(),
    )])
}

#[parameterized(
    include_country = { &["France"], &[], "Paris", true },
    include_province = { &["Ile-de-France"], &[], "Paris", true },
    include_name = { &["paris"], &[], "Paris", true },
    include_other_country = { &["Spain"], &[], "Paris", false },
    empty_lists_deny = { &[], &[], "Paris", false },
    exclude_only_denies = { &[], &["Germany"], "Paris", false },
    exclude_wins_over_include = { &["France"], &["PARIS"], "Paris", false },
    exclude_province_exact = { &["France"], &["ile-de-france"], "Paris", false },
    exclude_partial_ignored = { &["France"], &["Ile-de"], "Paris", true },
    include_long_rule_contains_country = { &["United States of America"], &[], "Chicago", true },
    include_rule_shorter_than_token = { &["States"], &[], "Chicago", false },
    exclude_rule_inside_token_ignored = { &["Illinois"], &["States"], "Chicago", true },
    exclude_full_country = { &["Illinois"], &["united states"], "Chicago", false },
)]
fn test_single_level_decisions(include: &[&str], exclude: &[&str], city: &str, granted: bool) {
    let city = match city {
        "Paris" => paris(),
        "Chicago" => chicago(),
        other => panic!("no fixture for {other}"),
    };
    let decision = solo(include, exclude).evaluate_named("solo", &city).unwrap();
    assert_eq!(decision.is_granted(), granted);
}

#[test]
fn test_explain_included_on_country() {
    let engine = solo(&["France"], &[]);
    let id = engine.hierarchy().id_of("solo").unwrap();
    assert_json_snapshot!(engine.explain(id, &lyon()).unwrap(), @r#"
    {
      "decision": "GRANTED",
      "reason": {
        "kind": "included",
        "attribute": "country",
        "token": "France",
        "rule": "France"
      }
    }
    "#);
}

#[test]
fn test_explain_excluded_on_province() {
    let engine = engine(vec![
        DistributorRequest::new("A", ["France"], no_regions()),
        DistributorRequest::new("B", ["Paris"], ["Ile-de-France"]).with_parent("A"),
    ]);
    let b = engine.hierarchy().id_of("B").unwrap();
    assert_json_snapshot!(engine.explain(b, &paris()).unwrap(), @r#"
    {
      "decision": "DENIED",
      "reason": {
        "kind": "excluded",
        "attribute": "province",
        "token": "Ile-de-France",
        "rule": "Ile-de-France"
      }
    }
    "#);
}

#[test]
fn test_explain_default_deny() {
    let engine = solo(&["Spain"], &["Germany"]);
    let id = engine.hierarchy().id_of("solo").unwrap();
    let evaluation = engine.explain(id, &paris()).unwrap();
    assert_eq!(evaluation, Evaluation::denied(DecisionReason::NoIncludeMatch));
}

#[test]
fn test_exclusion_checks_country_before_name() {
    let engine = solo(&[], &["Paris", "France"]);
    let id = engine.hierarchy().id_of("solo").unwrap();
    match engine.explain(id, &paris()).unwrap().reason {
        DecisionReason::Excluded { attribute, .. } => {
            assert_eq!(attribute, CityAttribute::Country)
        }
        other => panic!("expected exclusion, got {other:?}"),
    }
}

#[test]
fn test_evaluate_level_ignores_parent() {
    let engine = engine(vec![
        DistributorRequest::new("A", no_regions(), no_regions()),
        DistributorRequest::new("B", ["France"], no_regions()).with_parent("A"),
    ]);
    let b = engine.hierarchy().id_of("B").unwrap();
    let rule_set = engine.hierarchy().get(b).unwrap();

    assert!(evaluate_level(rule_set, &paris()).decision.is_granted());
    assert!(engine.evaluate(b, &paris()).unwrap().is_denied());
}

#[test]
fn test_repeated_evaluation_is_stable() {
    let engine = solo(&["France"], &["Lyon"]);
    let id = engine.hierarchy().id_of("solo").unwrap();
    for city in [paris(), lyon(), madrid()] {
        let first = engine.explain(id, &city).unwrap();
        for _ in 0..3 {
            assert_eq!(engine.explain(id, &city).unwrap(), first);
        }
    }
}
