//! Domain layer for dap-constraints
//!
//! # Domain Models
//!
//! - `NodeId` / `CdfNode`: non-owning handles into the dataset tree
//! - `Slice`, `Segment`, `Projection`: which elements of which variable to fetch
//! - `Selection`: opaque value filter, only ever cloned
//! - `Constraint`: projection set + selection set
//! - `VarSet`: ordered, duplicate-free variable handles
//! - `CacheNode`: what a cache node builder produced for a constraint
//!
//! # Port Traits
//!
//! - `DatasetPort`: read-only access to variable and dimension nodes
//! - `CacheNodeBuilder`: turns a constraint into a cache node

pub mod cache;
pub mod constraint;
pub mod dataset;

pub use cache::{CacheNode, CacheNodeBuilder};
pub use constraint::{
    Constant, Constraint, FunctionProjection, Projection, Segment, Selection, SelectionOp, Slice,
    Value, VarProjection, VarSet,
};
pub use dataset::{CdfNode, DatasetPort, NodeId, NodeKind};
