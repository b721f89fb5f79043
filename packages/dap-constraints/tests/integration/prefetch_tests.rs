//! Prefetch planning end to end through a session

#[path = "../common/mod.rs"]
mod common;
use common::fixtures::*;

use dap_constraints::config::PrefetchConfig;
use dap_constraints::domain::Constraint;
use dap_constraints::infrastructure::MetadataCacheBuilder;
use dap_constraints::{ErrorKind, PrefetchDecision, PrefetchPlanner, Session};
use pretty_assertions::assert_eq;

// ═══════════════════════════════════════════════════════════════════════════
// Variable Selection
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_threshold_selects_a_and_c() {
    let ds = abc_dataset();
    let merged = Constraint::new(
        vec![
            var_projection(&ds.tree, ds.a),
            var_projection(&ds.tree, ds.b),
            var_projection(&ds.tree, ds.c),
        ],
        vec![greater_than(&ds.tree, ds.b, 0.5)],
    );
    let config = PrefetchConfig::default().small_size_limit(100);
    let builder = RecordingBuilder::default();

    let mut session = Session::new(&ds.tree, merged, config).unwrap();
    let node = session.prefetch_data(&builder).unwrap().unwrap();

    assert_eq!(node.vars.as_slice(), &[ds.a, ds.c]);
    assert_eq!(leaves(&node.constraint), vec![Some(ds.a), Some(ds.c)]);
    // selections are carried verbatim, even ones naming other variables
    assert_eq!(node.constraint.selections.len(), 1);
    assert!(node.prefetch);

    assert_eq!(session.merged_constraint().projections.len(), 3);
    assert_eq!(builder.requests.lock().unwrap().len(), 1);
}

#[test]
fn test_unconstrainable_session_sends_empty_constraint() {
    let ds = abc_dataset();
    let merged = Constraint::new(
        vec![var_projection(&ds.tree, ds.a)],
        vec![greater_than(&ds.tree, ds.a, 1.0)],
    );
    let config = PrefetchConfig::default().unconstrainable(true);

    let mut session = Session::new(&ds.tree, merged, config).unwrap();
    let node = session
        .prefetch_data(&MetadataCacheBuilder::new())
        .unwrap()
        .unwrap();

    assert_eq!(node.vars.as_slice(), &[ds.a, ds.b, ds.c]);
    assert!(node.constraint.projections.is_empty());
    assert!(node.constraint.selections.is_empty());
    assert_eq!(node.estimated_elements, 1_000_015);
}

#[test]
fn test_nested_variables_follow_declaration_order() {
    let ds = ocean_dataset();
    let config = PrefetchConfig::default().small_size_limit(360);

    let planner = PrefetchPlanner::new(&ds.tree, &config);
    let PrefetchDecision::Fetch(plan) = planner.plan(&Constraint::default()).unwrap() else {
        panic!("expected a fetch plan");
    };

    assert_eq!(
        plan.vars.as_slice(),
        &[ds.time, ds.lat, ds.lon, ds.station_id]
    );
    assert_eq!(
        plan.describe(&ds.tree),
        "prefetch.vars: time lat lon obs.station_id"
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Skips and Failures
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cache_disabled_clears_prefetch_slot() {
    let ds = abc_dataset();
    let mut session = Session::new(&ds.tree, Constraint::default(), PrefetchConfig::default())
        .unwrap();
    session.prefetch_data(&MetadataCacheBuilder::new()).unwrap();
    assert!(session.prefetch().is_some());

    let mut disabled = Session::new(
        &ds.tree,
        Constraint::default(),
        PrefetchConfig::default().cache_enabled(false),
    )
    .unwrap();
    let builder = RecordingBuilder::default();
    assert!(disabled.prefetch_data(&builder).unwrap().is_none());
    assert!(disabled.prefetch().is_none());
    assert!(builder.requests.lock().unwrap().is_empty());
}

#[test]
fn test_empty_dataset_yields_empty_node() {
    let tree = dap_constraints::infrastructure::DatasetTree::new("empty.nc");
    let mut session =
        Session::new(&tree, Constraint::default(), PrefetchConfig::default()).unwrap();

    let node = session
        .prefetch_data(&MetadataCacheBuilder::new())
        .unwrap()
        .unwrap();
    assert!(node.vars.is_empty());
    assert!(node.constraint.is_empty());
}

#[test]
fn test_failure_keeps_previous_prefetch_node() {
    let ds = abc_dataset();
    let mut session = Session::new(
        &ds.tree,
        Constraint::default(),
        PrefetchConfig::default().small_size_limit(100),
    )
    .unwrap();
    session.prefetch_data(&MetadataCacheBuilder::new()).unwrap();

    session.set_merged_constraint(Constraint::new(
        vec![var_projection(&ds.tree, ds.c)],
        Vec::new(),
    ));
    let err = session.prefetch_data(&FailingBuilder).unwrap_err();

    assert_eq!(err.kind, ErrorKind::Delegated);
    assert_eq!(err.message, "fetch layer unavailable");
    let kept = session.prefetch().unwrap();
    assert_eq!(kept.vars.as_slice(), &[ds.a, ds.c]);
    assert!(kept.constraint.is_empty());
}

#[test]
fn test_depth_and_constraint_reach_builder() {
    let ds = abc_dataset();
    let merged = Constraint::new(
        vec![var_projection(&ds.tree, ds.b), var_projection(&ds.tree, ds.c)],
        Vec::new(),
    );
    let config = PrefetchConfig::default().small_size_limit(100).cache_depth(2);
    let builder = RecordingBuilder::default();

    let mut session = Session::new(&ds.tree, merged, config).unwrap();
    session.prefetch_data(&builder).unwrap();

    let requests = builder.requests.lock().unwrap();
    let (constraint, vars, depth) = &requests[0];
    assert_eq!(*depth, 2);
    assert_eq!(vars.as_slice(), &[ds.a, ds.c]);
    assert_eq!(leaves(constraint), vec![Some(ds.c)]);
}
