//! Prefetch planning
//!
//! Small variables (and every variable, when the server cannot subset) are
//! fetched whole once per session setup or constraint change, so later
//! requests for them are served from the cache.

pub mod planner;

pub use planner::{PrefetchDecision, PrefetchPlan, PrefetchPlanner};
