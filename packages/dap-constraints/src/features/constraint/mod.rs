//! Constraint Cloner/Restrictor
//!
//! Prefetch planning never mutates the session's merged constraint. It works
//! on independently owned clones, narrowed to the variables being fetched.

pub mod clone;
pub mod restrict;

pub use clone::{clone_projections, clone_selections};
pub use restrict::restrict_projections;

use crate::domain::{Constraint, VarSet};

impl Constraint {
    /// Independent copy whose projections only mention variables in `vars`
    ///
    /// Selections are copied verbatim.
    pub fn restricted_to(&self, vars: &VarSet) -> Constraint {
        let mut projections = clone_projections(&self.projections);
        restrict_projections(vars, &mut projections);
        Constraint::new(projections, clone_selections(&self.selections))
    }
}
