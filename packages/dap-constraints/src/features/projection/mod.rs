//! Projection building
//!
//! Maps a flat `start`/`count`/`stride` request onto the declared dimensions
//! of one variable and wraps the result in a single-segment projection.
//!
//! # Example
//!
//! ```rust
//! use dap_constraints::features::projection::build_var_projection;
//! use dap_constraints::infrastructure::DatasetTree;
//!
//! let mut tree = DatasetTree::new("example.nc");
//! let time = tree.add_dimension("time", 12).unwrap();
//! let lat = tree.add_dimension("lat", 90).unwrap();
//! let temp = tree.add_variable(tree.root(), "temp", &[time, lat]).unwrap();
//!
//! let projection = build_var_projection(&tree, temp, &[0, 10], &[6, 20], &[2, 1]).unwrap();
//! assert_eq!(projection.to_string(), "temp[0:2:10][10:1:29]");
//! ```

pub mod builder;
pub mod slice_mapper;

pub use builder::{build_var_projection, build_whole_var_projection};
pub use slice_mapper::{compute_slice, map_slices};
