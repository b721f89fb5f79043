//! Feature modules
//!
//! - `projection`: start/count/stride requests → single-variable projections
//! - `constraint`: deep copy and variable-set restriction of constraints
//! - `prefetch`: eager-fetch variable selection and cache node requests

pub mod constraint;
pub mod prefetch;
pub mod projection;
