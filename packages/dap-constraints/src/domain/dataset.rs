//! Dataset node model
//!
//! The dataset tree is resolved before any constraint work starts and is
//! only ever read here. Projections, segments and var sets refer to nodes
//! through `NodeId`, a plain index that never owns the node it names.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{ConstraintError, Result};

/// Handle to a node in a dataset tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Tree root; never part of a path
    Dataset,
    Group,
    Structure,
    /// Array or scalar variable; `dims` in declaration order
    Variable { dims: Vec<NodeId> },
    /// Dimension with its declared size (0 = unbounded/unknown)
    Dimension { declsize: u64 },
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Dataset => "dataset",
            NodeKind::Group => "group",
            NodeKind::Structure => "structure",
            NodeKind::Variable { .. } => "variable",
            NodeKind::Dimension { .. } => "dimension",
        }
    }
}

/// A node of the dataset tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdfNode {
    pub name: String,
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
}

impl CdfNode {
    pub fn new(name: impl Into<String>, kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            name: name.into(),
            kind,
            parent,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self.kind, NodeKind::Variable { .. })
    }
}

/// Read-only access to a resolved dataset tree
///
/// Implementors only provide `node` and `variables`; the lookups used by
/// projection building and prefetch planning are derived from them.
pub trait DatasetPort: Send + Sync {
    /// Resolve a handle
    fn node(&self, id: NodeId) -> Option<&CdfNode>;

    /// All variables, in declaration order
    fn variables(&self) -> &[NodeId];

    /// Resolve a handle or fail with `NotFound`
    fn get(&self, id: NodeId) -> Result<&CdfNode> {
        self.node(id).ok_or_else(|| ConstraintError::node_not_found(id))
    }

    /// Ordered dimensions of a variable
    fn dimensions(&self, var: NodeId) -> Result<&[NodeId]> {
        let node = self.get(var)?;
        match &node.kind {
            NodeKind::Variable { dims } => Ok(dims.as_slice()),
            other => Err(ConstraintError::structural(format!(
                "'{}' ({}) is a {}, not a variable",
                node.name,
                var,
                other.as_str()
            ))),
        }
    }

    /// Declared size of a dimension
    fn declared_size(&self, dim: NodeId) -> Result<u64> {
        let node = self.get(dim)?;
        match node.kind {
            NodeKind::Dimension { declsize } => Ok(declsize),
            ref other => Err(ConstraintError::structural(format!(
                "'{}' ({}) is a {}, not a dimension",
                node.name,
                dim,
                other.as_str()
            ))),
        }
    }

    /// Product of a variable's declared dimension sizes
    ///
    /// Scalars count as one element. Saturates at `u64::MAX`, so a huge
    /// variable still compares as huge.
    fn element_count(&self, var: NodeId) -> Result<u64> {
        let mut nelems = 1u64;
        for &dim in self.dimensions(var)? {
            nelems = nelems.saturating_mul(self.declared_size(dim)?);
        }
        Ok(nelems)
    }

    /// Dot-separated path from the tree root, root name excluded
    fn full_path(&self, id: NodeId) -> Result<String> {
        let mut names = Vec::new();
        let mut current = Some(id);

        while let Some(cur) = current {
            let node = self.get(cur)?;
            if node.kind == NodeKind::Dataset {
                break;
            }
            names.push(node.name.as_str());
            current = node.parent;
            // a parent chain longer than the tree means a cycle
            if names.len() > self.len() {
                return Err(ConstraintError::structural(format!(
                    "parent chain of {} does not terminate",
                    id
                )));
            }
        }

        names.reverse();
        Ok(names.join("."))
    }

    /// Number of nodes
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
