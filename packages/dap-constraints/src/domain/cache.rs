//! Cache node model and the builder port
//!
//! A cache node is the unit the fetch layer keeps per constraint: the
//! constraint that was (or will be) sent, the variables it covers, and
//! whatever the builder attached. This crate never fetches; it only asks a
//! `CacheNodeBuilder` for a node.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::constraint::{Constraint, VarSet};
use super::dataset::DatasetPort;
use crate::Result;

/// Cached fetch description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheNode {
    /// Constraint the node was built from; owned by the node
    pub constraint: Constraint,
    /// Variables the node covers, in declaration order
    pub vars: VarSet,
    /// Built by prefetch planning rather than an explicit request
    pub prefetch: bool,
    /// Caching depth the builder was asked for
    pub depth: u32,
    /// Element total across `vars`, saturating
    pub estimated_elements: u64,
    pub built_at: DateTime<Utc>,
}

impl CacheNode {
    pub fn new(constraint: Constraint, vars: VarSet, depth: u32) -> Self {
        Self {
            constraint,
            vars,
            prefetch: false,
            depth,
            estimated_elements: 0,
            built_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Port: cache node construction (driven port)
///
/// The constraint is handed over by value. Whatever the outcome, the caller
/// no longer owns it; on error the implementation drops everything it built.
///
/// # Implementors
/// - `MetadataCacheBuilder` (infrastructure/metadata_cache.rs)
pub trait CacheNodeBuilder: Send + Sync {
    fn build_cache_node(
        &self,
        dataset: &dyn DatasetPort,
        constraint: Constraint,
        vars: VarSet,
        depth: u32,
    ) -> Result<CacheNode>;
}
