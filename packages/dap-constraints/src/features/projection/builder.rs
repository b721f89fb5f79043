//! Projection Builder
//!
//! Produces a `Projection::Var` with exactly one segment that references the
//! target variable. The slice vector is complete before the segment value
//! exists, and nothing is returned on error, so callers never see a
//! half-built projection.

use crate::domain::{DatasetPort, NodeId, Projection, Segment, Slice, VarProjection};
use crate::features::projection::slice_mapper::map_slices;
use crate::Result;

/// Projection for a `start`/`count`/`stride` subset of `target`
pub fn build_var_projection(
    dataset: &dyn DatasetPort,
    target: NodeId,
    start: &[u64],
    count: &[u64],
    stride: &[u64],
) -> Result<Projection> {
    let slices = map_slices(dataset, target, start, count, stride)?;
    let projection = assemble(dataset, target, slices)?;

    tracing::debug!("built projection {}", projection);
    Ok(projection)
}

/// Projection covering every element of `target`
pub fn build_whole_var_projection(dataset: &dyn DatasetPort, target: NodeId) -> Result<Projection> {
    let dims = dataset.dimensions(target)?;

    let mut start = Vec::new();
    let mut count = Vec::new();
    let mut stride = Vec::new();
    start.try_reserve_exact(dims.len())?;
    count.try_reserve_exact(dims.len())?;
    stride.try_reserve_exact(dims.len())?;

    for &dim in dims {
        start.push(0);
        count.push(dataset.declared_size(dim)?);
        stride.push(1);
    }

    build_var_projection(dataset, target, &start, &count, &stride)
}

fn assemble(dataset: &dyn DatasetPort, target: NodeId, slices: Vec<Slice>) -> Result<Projection> {
    let name = dataset.get(target)?.name.clone();

    let mut segments = Vec::new();
    segments.try_reserve_exact(1)?;
    segments.push(Segment::new(name, target, slices));

    Ok(Projection::Var(VarProjection {
        leaf: target,
        segments,
    }))
}
