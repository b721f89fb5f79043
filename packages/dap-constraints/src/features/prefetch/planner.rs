//! Prefetch Planner
//!
//! Picks the variables worth fetching whole ahead of any request and asks
//! the cache node builder for a node covering them.
//!
//! 1. Caching off on a constrainable server: skip entirely.
//! 2. Every variable, in declaration order, joins the eager set when the
//!    server is unconstrainable or its element count is within
//!    `small_size_limit`.
//! 3. Unconstrainable servers get an empty constraint (fetch everything);
//!    otherwise the merged constraint is cloned and restricted to the set.
//! 4. The builder receives the derived constraint by value.

use crate::config::PrefetchConfig;
use crate::domain::{CacheNode, CacheNodeBuilder, Constraint, DatasetPort, VarSet};
use crate::Result;

/// Outcome of the planning step
#[derive(Debug, Clone, PartialEq)]
pub enum PrefetchDecision {
    /// Nothing to prefetch; the prefetch slot should be cleared
    Skip,
    Fetch(PrefetchPlan),
}

/// What a prefetch will ask the cache node builder for
#[derive(Debug, Clone, PartialEq)]
pub struct PrefetchPlan {
    pub vars: VarSet,
    pub constraint: Constraint,
    /// Element total across `vars`, saturating
    pub estimated_elements: u64,
    pub depth: u32,
}

impl PrefetchPlan {
    /// `prefetch.vars: <path> <path> ...`
    pub fn describe(&self, dataset: &dyn DatasetPort) -> String {
        let mut line = String::from("prefetch.vars:");
        for var in self.vars.iter() {
            line.push(' ');
            match dataset.full_path(var) {
                Ok(path) => line.push_str(&path),
                Err(_) => line.push_str(&var.to_string()),
            }
        }
        line
    }
}

pub struct PrefetchPlanner<'a> {
    dataset: &'a dyn DatasetPort,
    config: &'a PrefetchConfig,
}

impl<'a> PrefetchPlanner<'a> {
    pub fn new(dataset: &'a dyn DatasetPort, config: &'a PrefetchConfig) -> Self {
        Self { dataset, config }
    }

    /// Decide the eager set and derive its constraint; `merged` is only read
    pub fn plan(&self, merged: &Constraint) -> Result<PrefetchDecision> {
        if self.config.skips_prefetch() {
            tracing::debug!("prefetch skipped: caching disabled on a constrainable server");
            return Ok(PrefetchDecision::Skip);
        }

        let mut vars = VarSet::new();
        let mut estimated = 0u64;
        for &var in self.dataset.variables() {
            let nelems = self.dataset.element_count(var)?;
            if (self.config.unconstrainable || self.config.is_small(nelems)) && vars.insert(var) {
                estimated = estimated.saturating_add(nelems);
            }
        }

        let constraint = if self.config.unconstrainable {
            Constraint::default()
        } else {
            merged.restricted_to(&vars)
        };

        Ok(PrefetchDecision::Fetch(PrefetchPlan {
            vars,
            constraint,
            estimated_elements: estimated,
            depth: self.config.cache_depth,
        }))
    }

    /// Hand a plan to the builder
    ///
    /// Builder errors come back unchanged. Anything built before the failure
    /// is dropped here.
    pub fn execute(&self, plan: PrefetchPlan, builder: &dyn CacheNodeBuilder) -> Result<CacheNode> {
        let line = if self.config.show_fetch {
            Some(plan.describe(self.dataset))
        } else {
            None
        };

        let mut node =
            builder.build_cache_node(self.dataset, plan.constraint, plan.vars, plan.depth)?;
        node.prefetch = true;

        if let Some(line) = line {
            tracing::info!("{}", line);
        }
        tracing::debug!(
            "prefetch node ready: {} vars, ~{} elements",
            node.vars.len(),
            plan.estimated_elements
        );

        Ok(node)
    }

    /// `plan` followed by `execute`; `None` when prefetch is skipped
    pub fn run(
        &self,
        merged: &Constraint,
        builder: &dyn CacheNodeBuilder,
    ) -> Result<Option<CacheNode>> {
        match self.plan(merged)? {
            PrefetchDecision::Skip => Ok(None),
            PrefetchDecision::Fetch(plan) => self.execute(plan, builder).map(Some),
        }
    }
}
