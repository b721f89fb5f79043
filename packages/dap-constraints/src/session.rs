//! Client session
//!
//! Ties one borrowed dataset tree to the session's merged constraint, its
//! configuration and its prefetch slot. The tree is owned elsewhere and
//! must outlive the session.

use crate::config::{PrefetchConfig, Validatable};
use crate::domain::{CacheNode, CacheNodeBuilder, Constraint, DatasetPort, NodeId, Projection};
use crate::features::prefetch::PrefetchPlanner;
use crate::features::projection;
use crate::Result;

pub struct Session<'a> {
    dataset: &'a dyn DatasetPort,
    merged: Constraint,
    config: PrefetchConfig,
    /// Node built by the last successful prefetch
    prefetch: Option<CacheNode>,
}

impl<'a> Session<'a> {
    /// Fails when `config` is out of range
    pub fn new(
        dataset: &'a dyn DatasetPort,
        merged: Constraint,
        config: PrefetchConfig,
    ) -> Result<Self> {
        if let Err(err) = config.validate() {
            tracing::warn!("{} rejected: {}", config.config_name(), err);
            return Err(err.into());
        }

        Ok(Self {
            dataset,
            merged,
            config,
            prefetch: None,
        })
    }

    pub fn merged_constraint(&self) -> &Constraint {
        &self.merged
    }

    pub fn prefetch(&self) -> Option<&CacheNode> {
        self.prefetch.as_ref()
    }

    /// Replace the merged constraint; call `prefetch_data` afterwards to
    /// refresh the prefetch slot
    pub fn set_merged_constraint(&mut self, merged: Constraint) {
        self.merged = merged;
    }

    /// Projection for an explicit subset request
    pub fn build_var_projection(
        &self,
        target: NodeId,
        start: &[u64],
        count: &[u64],
        stride: &[u64],
    ) -> Result<Projection> {
        projection::build_var_projection(self.dataset, target, start, count, stride)
    }

    /// Refresh the prefetch slot
    ///
    /// The new node replaces the old one only once it is fully built; a
    /// failed refresh leaves the previous node in place. A skipped prefetch
    /// clears the slot.
    pub fn prefetch_data(&mut self, builder: &dyn CacheNodeBuilder) -> Result<Option<&CacheNode>> {
        let planner = PrefetchPlanner::new(self.dataset, &self.config);

        match planner.run(&self.merged, builder) {
            Ok(node) => {
                self.prefetch = node;
                Ok(self.prefetch.as_ref())
            }
            Err(err) => {
                tracing::warn!("prefetch refresh failed, keeping previous node: {}", err);
                Err(err)
            }
        }
    }
}
