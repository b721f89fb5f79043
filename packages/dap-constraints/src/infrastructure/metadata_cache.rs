//! Cache node builder that records what would be fetched
//!
//! No I/O happens here: the node carries the constraint, the covered
//! variables and an element estimate. Hosts with a real transport implement
//! `CacheNodeBuilder` themselves.

use crate::domain::{CacheNode, CacheNodeBuilder, Constraint, DatasetPort, VarSet};
use crate::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataCacheBuilder;

impl MetadataCacheBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl CacheNodeBuilder for MetadataCacheBuilder {
    fn build_cache_node(
        &self,
        dataset: &dyn DatasetPort,
        constraint: Constraint,
        vars: VarSet,
        depth: u32,
    ) -> Result<CacheNode> {
        let mut estimated = 0u64;
        for var in vars.iter() {
            estimated = estimated.saturating_add(dataset.element_count(var)?);
        }

        tracing::debug!(
            "cache node built: {} vars, ~{} elements, constraint '{}'",
            vars.len(),
            estimated,
            constraint
        );

        let mut node = CacheNode::new(constraint, vars, depth);
        node.estimated_elements = estimated;
        Ok(node)
    }
}
