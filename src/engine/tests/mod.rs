use super::*;
use crate::types::DistributorRequest;

mod evaluate;

fn paris() -> City {
    City::new("FR-PAR", "Paris", "Ile-de-France", "France")
}

fn lyon() -> City {
    City::new("FR-LYS", "Lyon", "Auvergne-Rhone-Alpes", "France")
}

fn madrid() -> City {
    City::new("ES-MAD", "Madrid", "Comunidad de Madrid", "Spain")
}

fn chicago() -> City {
    City::new("US-CHI", "Chicago", "Illinois", "United States")
}

fn engine(requests: Vec<DistributorRequest>) -> PermissionEngine {
    let hierarchy = Hierarchy::builder().extend(requests).build().unwrap();
    PermissionEngine::new(hierarchy)
}

fn no_regions() -> Vec<String> {
    Vec::new()
}

#[test]
fn test_parent_grants_child_excludes_province() {
    let engine = engine(vec![
        DistributorRequest::new("A", ["France"], no_regions()),
        DistributorRequest::new("B", ["Paris"], ["Ile-de-France"]).with_parent("A"),
    ]);

    assert_eq!(engine.evaluate_named("A", &paris()).unwrap(), Decision::Granted);
    assert_eq!(engine.evaluate_named("B", &paris()).unwrap(), Decision::Denied);
}

#[test]
fn test_ancestor_veto_overrides_child_include() {
    let engine = engine(vec![
        DistributorRequest::new("A", ["France"], ["Paris"]),
        DistributorRequest::new("B", ["Paris", "France"], no_regions()).with_parent("A"),
    ]);

    let b = engine.hierarchy().id_of("B").unwrap();
    let evaluation = engine.explain(b, &paris()).unwrap();
    assert_eq!(evaluation.decision, Decision::Denied);
    assert_eq!(
        evaluation.reason,
        DecisionReason::AncestorDenied {
            ancestor: "A".to_string(),
            cause: Box::new(DecisionReason::Excluded {
                attribute: CityAttribute::Name,
                token: "Paris".to_string(),
                rule: "Paris".to_string(),
            }),
        }
    );

    // Lyon passes A, so B's own rules decide.
    assert_eq!(engine.evaluate(b, &lyon()).unwrap(), Decision::Granted);
}

#[test]
fn test_passing_parent_does_not_grant_by_itself() {
    let engine = engine(vec![
        DistributorRequest::new("A", ["France"], no_regions()),
        DistributorRequest::new("B", ["Lyon"], no_regions()).with_parent("A"),
    ]);

    assert_eq!(engine.evaluate_named("B", &paris()).unwrap(), Decision::Denied);
    assert_eq!(engine.evaluate_named("B", &lyon()).unwrap(), Decision::Granted);
}

#[test]
fn test_top_most_denying_ancestor_is_reported() {
    let engine = engine(vec![
        DistributorRequest::new("root", ["Spain"], no_regions()),
        DistributorRequest::new("middle", ["Madrid"], no_regions()).with_parent("root"),
        DistributorRequest::new("leaf", ["France"], no_regions()).with_parent("middle"),
    ]);

    let leaf = engine.hierarchy().id_of("leaf").unwrap();
    let evaluation = engine.explain(leaf, &paris()).unwrap();
    match evaluation.reason {
        DecisionReason::AncestorDenied { ancestor, cause } => {
            assert_eq!(ancestor, "root");
            assert_eq!(*cause, DecisionReason::NoIncludeMatch);
        }
        other => panic!("expected ancestor veto, got {other:?}"),
    }
}

#[test]
fn test_three_level_chain_grants_when_every_level_passes() {
    let engine = engine(vec![
        DistributorRequest::new("root", ["Spain", "France"], no_regions()),
        DistributorRequest::new("middle", ["France"], ["Lyon"]).with_parent("root"),
        DistributorRequest::new("leaf", ["Ile-de-France"], no_regions()).with_parent("middle"),
    ]);

    let leaf = engine.hierarchy().id_of("leaf").unwrap();
    assert_eq!(engine.evaluate(leaf, &paris()).unwrap(), Decision::Granted);
    assert_eq!(engine.evaluate(leaf, &lyon()).unwrap(), Decision::Denied);
    assert_eq!(engine.evaluate(leaf, &madrid()).unwrap(), Decision::Denied);
}

#[test]
fn test_siblings_share_parent_independently() {
    let engine = engine(vec![
        DistributorRequest::new("europe", ["France", "Spain"], no_regions()),
        DistributorRequest::new("fr", ["France"], no_regions()).with_parent("europe"),
        DistributorRequest::new("es", ["Spain"], no_regions()).with_parent("europe"),
    ]);

    assert_eq!(engine.evaluate_named("fr", &paris()).unwrap(), Decision::Granted);
    assert_eq!(engine.evaluate_named("fr", &madrid()).unwrap(), Decision::Denied);
    assert_eq!(engine.evaluate_named("es", &madrid()).unwrap(), Decision::Granted);
    assert_eq!(engine.evaluate_named("es", &paris()).unwrap(), Decision::Denied);
}

#[test]
fn test_cyclic_chain_is_an_error_not_a_hang() {
    let engine = engine(vec![
        DistributorRequest::new("A", ["France"], no_regions()).with_parent("B"),
        DistributorRequest::new("B", ["France"], no_regions()).with_parent("A"),
        DistributorRequest::new("C", ["France"], no_regions()),
    ]);

    let err = engine.evaluate_named("A", &paris()).unwrap_err();
    assert!(matches!(
        err,
        TerritoryError::CyclicHierarchy { ref distributor, .. } if distributor == "A"
    ));

    // Unrelated distributors are unaffected.
    assert_eq!(engine.evaluate_named("C", &paris()).unwrap(), Decision::Granted);
}

#[test]
fn test_unknown_distributor_name() {
    let engine = engine(vec![DistributorRequest::new("A", ["France"], no_regions())]);
    assert_eq!(
        engine.evaluate_named("Z", &paris()).unwrap_err(),
        TerritoryError::UnknownDistributor("Z".to_string())
    );
}

#[test]
fn test_engine_clone_shares_hierarchy() {
    let engine = engine(vec![DistributorRequest::new("A", ["United States"], no_regions())]);
    let cloned = engine.clone();
    let handle = std::thread::spawn(move || cloned.evaluate_named("A", &chicago()).unwrap());
    assert_eq!(handle.join().unwrap(), Decision::Granted);
}
