//! Deep copies of projection and selection sets

use crate::domain::{Projection, Selection};

/// Deep copy, order preserved
///
/// Node handles are copied by value; they never own the nodes they name.
pub fn clone_projections(projections: &[Projection]) -> Vec<Projection> {
    projections.to_vec()
}

/// Deep copy, order preserved
pub fn clone_selections(selections: &[Selection]) -> Vec<Selection> {
    selections.to_vec()
}
