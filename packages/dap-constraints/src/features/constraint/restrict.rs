//! Narrow a projection set to a variable set

use crate::domain::{Projection, VarSet};

/// Keep only variable projections whose leaf is in `vars`
///
/// Order among survivors is preserved and a second call with the same set
/// is a no-op. Function projections reference no variable and are dropped.
pub fn restrict_projections(vars: &VarSet, projections: &mut Vec<Projection>) {
    let before = projections.len();
    projections.retain(|p| p.leaf().is_some_and(|leaf| vars.contains(leaf)));

    tracing::debug!(
        "restricted projections to {} vars: kept {} of {}",
        vars.len(),
        projections.len(),
        before
    );
}
