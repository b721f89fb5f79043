//! Projection building against realistic dataset trees

#[path = "../common/mod.rs"]
mod common;
use common::fixtures::*;

use dap_constraints::domain::DatasetPort;
use dap_constraints::{build_var_projection, build_whole_var_projection, ErrorKind};
use pretty_assertions::assert_eq;

// ═══════════════════════════════════════════════════════════════════════════
// Valid Requests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_subset_of_three_dimensional_variable() {
    let ds = ocean_dataset();
    let projection =
        build_var_projection(&ds.tree, ds.sst, &[0, 10, 20], &[12, 5, 4], &[2, 1, 10]).unwrap();

    let var = projection.as_var().unwrap();
    assert_eq!(var.leaf, ds.sst);
    assert_eq!(var.segments.len(), 1);

    let segment = &var.segments[0];
    assert_eq!(segment.slicerank(), ds.tree.dimensions(ds.sst).unwrap().len());

    let derived: Vec<_> = segment
        .slices
        .iter()
        .map(|s| (s.length, s.stop, s.declsize))
        .collect();
    assert_eq!(derived, vec![(24, 24, 24), (5, 15, 180), (40, 60, 360)]);
    assert_eq!(projection.to_string(), "sst[0:2:22][10:1:14][20:10:50]");
}

#[test]
fn test_nested_variable_projection_uses_variable_name() {
    let ds = ocean_dataset();
    let projection = build_var_projection(&ds.tree, ds.station_id, &[1], &[2], &[1]).unwrap();

    let segment = &projection.as_var().unwrap().segments[0];
    assert_eq!(segment.name, "station_id");
    assert_eq!(ds.tree.full_path(ds.station_id).unwrap(), "obs.station_id");
}

#[test]
fn test_whole_variable_projection_matches_explicit_request() {
    let ds = ocean_dataset();
    let whole = build_whole_var_projection(&ds.tree, ds.sst).unwrap();
    let explicit =
        build_var_projection(&ds.tree, ds.sst, &[0, 0, 0], &[24, 180, 360], &[1, 1, 1]).unwrap();
    assert_eq!(whole, explicit);
}

#[test]
fn test_projections_are_independent_values() {
    let ds = ocean_dataset();
    let first = build_var_projection(&ds.tree, ds.lat, &[0], &[10], &[1]).unwrap();
    let mut second = first.clone();

    if let dap_constraints::Projection::Var(var) = &mut second {
        var.segments[0].slices[0].count = 1;
    }
    assert_eq!(first.as_var().unwrap().segments[0].slices[0].count, 10);
}

// ═══════════════════════════════════════════════════════════════════════════
// Rejected Requests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_rank_mismatch_is_structural() {
    let ds = ocean_dataset();
    let err = build_var_projection(&ds.tree, ds.sst, &[0, 0], &[1, 1], &[1, 1]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Structural);
    assert!(err.message.contains("rank 3"));
}

#[test]
fn test_zero_stride_is_structural() {
    let ds = ocean_dataset();
    let err = build_var_projection(&ds.tree, ds.time, &[0], &[1], &[0]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Structural);
}

#[test]
fn test_past_end_is_out_of_bounds() {
    let ds = ocean_dataset();
    let err = build_var_projection(&ds.tree, ds.lon, &[350], &[2], &[10]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::OutOfBounds);
}

#[test]
fn test_strided_stop_past_end_is_out_of_bounds() {
    let ds = ocean_dataset();
    // last index 179 is addressable, but stop = 181 runs past lat(180)
    let err = build_var_projection(&ds.tree, ds.lat, &[171], &[5], &[2]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::OutOfBounds);
    assert!(err.message.contains("stop 181 exceeds size 180"));

    let projection = build_var_projection(&ds.tree, ds.lat, &[170], &[5], &[2]).unwrap();
    let slice = projection.as_var().unwrap().segments[0].slices[0];
    assert_eq!((slice.stop, slice.declsize), (180, 180));
}

#[test]
fn test_dimension_is_not_a_projection_target() {
    let ds = ocean_dataset();
    let dim = ds.tree.dimensions(ds.lat).unwrap()[0];
    let err = build_var_projection(&ds.tree, dim, &[0], &[1], &[1]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Structural);
}
