//! Arena-backed dataset tree
//!
//! Nodes are stored in insertion order and addressed by `NodeId`. The root
//! dataset node is always `NodeId(0)`.

use crate::domain::{CdfNode, DatasetPort, NodeId, NodeKind};
use crate::{ConstraintError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetTree {
    nodes: Vec<CdfNode>,
    /// Variables in declaration order
    variables: Vec<NodeId>,
}

impl DatasetTree {
    /// Create a tree holding only its root dataset node
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            nodes: vec![CdfNode::new(name, NodeKind::Dataset, None)],
            variables: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Shared dimension attached to the root
    pub fn add_dimension(&mut self, name: impl Into<String>, declsize: u64) -> Result<NodeId> {
        let root = self.root();
        self.push(CdfNode::new(
            name,
            NodeKind::Dimension { declsize },
            Some(root),
        ))
    }

    pub fn add_group(&mut self, parent: NodeId, name: impl Into<String>) -> Result<NodeId> {
        self.check_container(parent)?;
        self.push(CdfNode::new(name, NodeKind::Group, Some(parent)))
    }

    /// Declare a variable; `dims` must all be dimension nodes
    pub fn add_variable(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        dims: &[NodeId],
    ) -> Result<NodeId> {
        self.check_container(parent)?;
        for &dim in dims {
            self.declared_size(dim)?;
        }

        let id = self.push(CdfNode::new(
            name,
            NodeKind::Variable {
                dims: dims.to_vec(),
            },
            Some(parent),
        ))?;
        self.variables.push(id);
        Ok(id)
    }

    fn push(&mut self, node: CdfNode) -> Result<NodeId> {
        let index = u32::try_from(self.nodes.len()).map_err(|_| {
            ConstraintError::allocation("dataset tree cannot address more than u32::MAX nodes")
        })?;
        self.nodes.try_reserve(1)?;
        self.nodes.push(node);
        Ok(NodeId(index))
    }

    fn check_container(&self, parent: NodeId) -> Result<()> {
        let node = self.get(parent)?;
        match node.kind {
            NodeKind::Dataset | NodeKind::Group | NodeKind::Structure => Ok(()),
            ref other => Err(ConstraintError::structural(format!(
                "'{}' ({}) is a {} and cannot contain other nodes",
                node.name,
                parent,
                other.as_str()
            ))),
        }
    }
}

impl DatasetPort for DatasetTree {
    fn node(&self, id: NodeId) -> Option<&CdfNode> {
        self.nodes.get(id.index())
    }

    fn variables(&self) -> &[NodeId] {
        &self.variables
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}
