//! Slice Mapper
//!
//! Pairs request index *i* with dimension *i* of a variable. All arithmetic
//! is exact and checked; nothing is rounded or clamped.

use crate::domain::{DatasetPort, NodeId, Slice};
use crate::{ConstraintError, Result};

/// Build one validated slice for a dimension of `declsize` elements
///
/// `label` names the dimension in error messages.
pub fn compute_slice(
    label: &str,
    first: u64,
    count: u64,
    stride: u64,
    declsize: u64,
) -> Result<Slice> {
    if declsize == 0 {
        return Err(ConstraintError::structural(format!(
            "dimension {} has no declared size",
            label
        )));
    }
    if stride == 0 {
        return Err(ConstraintError::structural(format!(
            "stride for dimension {} must be at least 1",
            label
        )));
    }

    let length = count.checked_mul(stride).ok_or_else(|| {
        ConstraintError::structural(format!(
            "count {} * stride {} overflows for dimension {}",
            count, stride, label
        ))
    })?;
    let stop = first.checked_add(length).ok_or_else(|| {
        ConstraintError::structural(format!(
            "start {} + length {} overflows for dimension {}",
            first, length, label
        ))
    })?;

    if stop > declsize {
        return Err(ConstraintError::out_of_bounds(format!(
            "stop {} exceeds size {} of dimension {}",
            stop, declsize, label
        )));
    }

    Ok(Slice {
        first,
        stride,
        count,
        length,
        stop,
        declsize,
    })
}

/// One slice per dimension of `var`, in dimension order
///
/// The three arrays must hold at least one entry per dimension; trailing
/// entries are ignored.
pub fn map_slices(
    dataset: &dyn DatasetPort,
    var: NodeId,
    start: &[u64],
    count: &[u64],
    stride: &[u64],
) -> Result<Vec<Slice>> {
    let node = dataset.get(var)?;
    let dims = dataset.dimensions(var)?;
    let rank = dims.len();

    for (what, values) in [("start", start), ("count", count), ("stride", stride)] {
        if values.len() < rank {
            return Err(ConstraintError::structural(format!(
                "variable '{}' has rank {} but {} has only {} entries",
                node.name,
                rank,
                what,
                values.len()
            )));
        }
    }

    let mut slices = Vec::new();
    slices.try_reserve_exact(rank)?;

    for (i, &dim) in dims.iter().enumerate() {
        let declsize = dataset.declared_size(dim)?;
        let label = match dataset.node(dim) {
            Some(d) => format!("{} '{}' of '{}'", i, d.name, node.name),
            None => format!("{} of '{}'", i, node.name),
        };
        slices.push(compute_slice(&label, start[i], count[i], stride[i], declsize)?);
    }

    Ok(slices)
}
