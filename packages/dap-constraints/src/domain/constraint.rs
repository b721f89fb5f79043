//! Constraint model: projections, selections and the sets built from them
//!
//! Every type here owns its data outright except for `NodeId` handles, so a
//! `Clone` is a full structural copy that shares nothing mutable with its
//! source.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::dataset::NodeId;

// ═══════════════════════════════════════════════════════════════════════════
// Slice / Segment
// ═══════════════════════════════════════════════════════════════════════════

/// One dimension's requested extent
///
/// `length = count * stride` and `stop = first + length`. Slices built by
/// the slice mapper keep `stop <= declsize`; use [`Slice::last`] for the
/// last addressed index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slice {
    pub first: u64,
    pub stride: u64,
    pub count: u64,
    pub length: u64,
    pub stop: u64,
    pub declsize: u64,
}

impl Slice {
    /// Entire extent of a dimension
    pub fn whole(declsize: u64) -> Self {
        Self {
            first: 0,
            stride: 1,
            count: declsize,
            length: declsize,
            stop: declsize,
            declsize,
        }
    }

    /// Last addressed index
    ///
    /// `None` for an empty slice, or when the fields were set by hand and
    /// the index does not fit in a `u64`.
    pub fn last(&self) -> Option<u64> {
        self.count
            .checked_sub(1)?
            .checked_mul(self.stride)?
            .checked_add(self.first)
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Covers every index of its dimension
    pub fn is_whole(&self) -> bool {
        self.first == 0 && self.stride == 1 && self.count == self.declsize
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.count, self.last()) {
            (0, _) => write!(f, "[]"),
            (1, _) => write!(f, "[{}]", self.first),
            (_, Some(last)) => write!(f, "[{}:{}:{}]", self.first, self.stride, last),
            (_, None) => write!(f, "[{}:{}:{}]", self.first, self.stride, u64::MAX),
        }
    }
}

/// A named node reference plus one slice per dimension of that node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub name: String,
    pub node: NodeId,
    pub slices: Vec<Slice>,
}

impl Segment {
    pub fn new(name: impl Into<String>, node: NodeId, slices: Vec<Slice>) -> Self {
        Self {
            name: name.into(),
            node,
            slices,
        }
    }

    pub fn slicerank(&self) -> usize {
        self.slices.len()
    }

    /// Number of elements addressed by all slices together
    pub fn element_count(&self) -> u64 {
        self.slices
            .iter()
            .fold(1u64, |acc, s| acc.saturating_mul(s.count))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for slice in &self.slices {
            write!(f, "{}", slice)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Projection
// ═══════════════════════════════════════════════════════════════════════════

/// Projection of one variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarProjection {
    /// Variable the projection ends at
    pub leaf: NodeId,
    pub segments: Vec<Segment>,
}

impl fmt::Display for VarProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Server-side function call in a projection list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionProjection {
    pub name: String,
    pub args: Vec<Value>,
}

impl fmt::Display for FunctionProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Projection {
    Var(VarProjection),
    Function(FunctionProjection),
}

impl Projection {
    /// Referenced variable; function projections reference none
    pub fn leaf(&self) -> Option<NodeId> {
        match self {
            Projection::Var(var) => Some(var.leaf),
            Projection::Function(_) => None,
        }
    }

    pub fn as_var(&self) -> Option<&VarProjection> {
        match self {
            Projection::Var(var) => Some(var),
            Projection::Function(_) => None,
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Projection::Var(var) => write!(f, "{}", var),
            Projection::Function(func) => write!(f, "{}", func),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Selection
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Constant {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Int(v) => write!(f, "{}", v),
            Constant::Float(v) => write!(f, "{}", v),
            Constant::Text(v) => write!(f, "\"{}\"", v),
        }
    }
}

/// Operand of a selection or function argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Constant(Constant),
    Var(VarProjection),
    Function(FunctionProjection),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Constant(c) => write!(f, "{}", c),
            Value::Var(v) => write!(f, "{}", v),
            Value::Function(func) => write!(f, "{}", func),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    Regex,
}

impl SelectionOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionOp::Eq => "=",
            SelectionOp::Ne => "!=",
            SelectionOp::Gt => ">",
            SelectionOp::Ge => ">=",
            SelectionOp::Lt => "<",
            SelectionOp::Le => "<=",
            SelectionOp::Regex => "=~",
        }
    }
}

/// Value filter; carried along, never evaluated here
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub lhs: Value,
    pub op: SelectionOp,
    pub rhs: Vec<Value>,
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.lhs, self.op.as_str())?;
        if self.rhs.len() == 1 {
            return write!(f, "{}", self.rhs[0]);
        }
        write!(f, "{{")?;
        for (i, v) in self.rhs.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "}}")
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Constraint
// ═══════════════════════════════════════════════════════════════════════════

/// Projection set + selection set
///
/// An empty constraint asks for the whole dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub projections: Vec<Projection>,
    pub selections: Vec<Selection>,
}

impl Constraint {
    pub fn new(projections: Vec<Projection>, selections: Vec<Selection>) -> Self {
        Self {
            projections,
            selections,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.projections.is_empty() && self.selections.is_empty()
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.projections.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", p)?;
        }
        for s in &self.selections {
            write!(f, "&{}", s)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// VarSet
// ═══════════════════════════════════════════════════════════════════════════

/// Ordered, duplicate-free set of variable handles
///
/// Serialized as a plain list; membership checks go through a hash index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<NodeId>", into = "Vec<NodeId>")]
pub struct VarSet {
    vars: Vec<NodeId>,
    index: HashSet<NodeId>,
}

impl VarSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append unless already present; returns whether it was added
    pub fn insert(&mut self, var: NodeId) -> bool {
        if !self.index.insert(var) {
            return false;
        }
        self.vars.push(var);
        true
    }

    pub fn contains(&self, var: NodeId) -> bool {
        self.index.contains(&var)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.vars.iter().copied()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.vars
    }
}

impl From<Vec<NodeId>> for VarSet {
    fn from(vars: Vec<NodeId>) -> Self {
        vars.into_iter().collect()
    }
}

impl From<VarSet> for Vec<NodeId> {
    fn from(set: VarSet) -> Self {
        set.vars
    }
}

impl FromIterator<NodeId> for VarSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        let mut set = VarSet::new();
        for var in iter {
            set.insert(var);
        }
        set
    }
}
