//! dap-constraints: projections and prefetch planning for remote array datasets
//!
//! Turns per-dimension `start`/`count`/`stride` requests into protocol
//! projections, and decides which variables are small enough to fetch whole
//! before anyone asks for them.
//!
//! ## Layout
//!
//! - `domain/`: dataset node handles, constraint model, cache node + ports
//! - `features/projection`: Slice Mapper and Projection Builder
//! - `features/constraint`: deep copy and variable-set restriction
//! - `features/prefetch`: Prefetch Planner
//! - `infrastructure/`: arena dataset tree, metadata-only cache node builder
//! - `session`: merged constraint + config + prefetch slot for one client
//!
//! ## Usage
//!
//! ```rust
//! use dap_constraints::config::PrefetchConfig;
//! use dap_constraints::domain::Constraint;
//! use dap_constraints::infrastructure::{DatasetTree, MetadataCacheBuilder};
//! use dap_constraints::Session;
//!
//! let mut tree = DatasetTree::new("ocean.nc");
//! let time = tree.add_dimension("time", 12).unwrap();
//! let depth = tree.add_dimension("depth", 50_000).unwrap();
//! let times = tree.add_variable(tree.root(), "time", &[time]).unwrap();
//! let temp = tree.add_variable(tree.root(), "temp", &[time, depth]).unwrap();
//!
//! let config = PrefetchConfig::default().small_size_limit(1000);
//! let mut session = Session::new(&tree, Constraint::default(), config).unwrap();
//!
//! // Small variables are cached up front
//! let node = session.prefetch_data(&MetadataCacheBuilder::new()).unwrap().unwrap();
//! assert_eq!(node.vars.as_slice(), &[times]);
//!
//! // Everything else is subset on request
//! let projection = session.build_var_projection(temp, &[0, 0], &[1, 100], &[1, 10]).unwrap();
//! assert_eq!(projection.to_string(), "temp[0][0:10:990]");
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod features;
pub mod infrastructure;
pub mod session;

pub use error::{ConstraintError, ErrorKind, Result};

pub use domain::{CacheNode, CacheNodeBuilder, Constraint, DatasetPort, NodeId, Projection, VarSet};
pub use features::prefetch::{PrefetchDecision, PrefetchPlan, PrefetchPlanner};
pub use features::projection::{build_var_projection, build_whole_var_projection};
pub use session::Session;
