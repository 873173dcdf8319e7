//! IR node and its core accessors.
//!
//! A [`Node`] is one operator instance: a kind tag, operand references, named
//! attributes and a single result type. Nodes are immutable and shared through
//! `Arc`; "modifying" a node means building a new one with [`Node::with_attribute`]
//! or [`Node::with_operands`] and letting the rewrite driver splice it in.

pub mod constructors;

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use onnx_canon_dtype::DType;
use smallvec::SmallVec;
use snafu::ensure;

use crate::Result;
use crate::attribute::{Attribute, Attributes};
use crate::error::OperandCountMismatchSnafu;
use crate::op::{OpKind, attr};
use crate::tensor::{ScalarValue, TensorData, TensorType};

pub type Operands = SmallVec<[Arc<Node>; 4]>;

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(0);

/// Operator instance in the graph.
pub struct Node {
    /// Unique stable ID. Used for memoization instead of pointer identity.
    pub id: u64,
    pub(crate) op: OpKind,
    pub(crate) operands: Operands,
    pub(crate) attributes: Attributes,
    pub(crate) ty: TensorType,
}

// Operands are printed by id only; a shared sub-graph would otherwise print once per use.
impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operands: Vec<u64> = self.operands.iter().map(|o| o.id).collect();
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("op", &self.op)
            .field("operands", &operands)
            .field("attributes", &self.attributes)
            .field("ty", &self.ty)
            .finish()
    }
}

impl Node {
    /// Create a node, validating the operand count for its kind.
    pub fn new(
        op: OpKind,
        operands: impl IntoIterator<Item = Arc<Node>>,
        attributes: Attributes,
        ty: TensorType,
    ) -> Result<Arc<Self>> {
        let operands: Operands = operands.into_iter().collect();
        let (min, max) = op.operand_range();
        ensure!(
            (min..=max).contains(&operands.len()),
            OperandCountMismatchSnafu { op, expected: op.operand_range_str(), found: operands.len() }
        );
        Ok(Self::new_unchecked(op, operands, attributes, ty))
    }

    pub(crate) fn new_unchecked(op: OpKind, operands: Operands, attributes: Attributes, ty: TensorType) -> Arc<Self> {
        let id = NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed);
        Arc::new(Self { id, op, operands, attributes, ty })
    }

    pub fn op(&self) -> OpKind {
        self.op
    }

    pub fn operands(&self) -> &[Arc<Node>] {
        &self.operands
    }

    pub fn operand(&self, index: usize) -> Option<&Arc<Node>> {
        self.operands.get(index)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Result type.
    pub fn ty(&self) -> &TensorType {
        &self.ty
    }

    pub fn dtype(&self) -> DType {
        self.ty.dtype
    }

    pub fn rank(&self) -> Option<usize> {
        self.ty.rank()
    }

    /// Copy of this node with one attribute set. Operands and type are kept.
    pub fn with_attribute(&self, name: impl Into<String>, value: impl Into<Attribute>) -> Arc<Self> {
        let attributes = self.attributes.clone().with(name, value);
        Self::new_unchecked(self.op, self.operands.clone(), attributes, self.ty.clone())
    }

    /// Copy of this node with one attribute removed.
    pub fn without_attribute(&self, name: &str) -> Arc<Self> {
        let mut attributes = self.attributes.clone();
        attributes.remove(name);
        Self::new_unchecked(self.op, self.operands.clone(), attributes, self.ty.clone())
    }

    /// Copy of this node reading from different operands.
    pub fn with_operands(&self, operands: impl IntoIterator<Item = Arc<Node>>) -> Result<Arc<Self>> {
        Self::new(self.op, operands, self.attributes.clone(), self.ty.clone())
    }

    /// Statically known value of this node, if it is a constant.
    pub fn constant_value(&self) -> Option<&TensorData> {
        if self.op != OpKind::Constant {
            return None;
        }
        self.attributes.get(attr::VALUE).and_then(Attribute::as_tensor)
    }

    /// Statically known value of a single-element constant.
    pub fn scalar_constant(&self) -> Option<ScalarValue<'_>> {
        self.constant_value().and_then(TensorData::as_scalar)
    }

    /// All nodes reachable from `self`, operands before their consumers.
    pub fn toposort(self: &Arc<Self>) -> Vec<Arc<Node>> {
        let mut order = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![(self.clone(), false)];

        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                order.push(node);
                continue;
            }
            if !visited.insert(node.id) {
                continue;
            }
            stack.push((node.clone(), true));
            for operand in node.operands.iter().rev() {
                if !visited.contains(&operand.id) {
                    stack.push((operand.clone(), false));
                }
            }
        }

        order
    }

    /// Structural equality: same kind, type, attributes and structurally equal
    /// operands. Ids are ignored.
    pub fn structurally_eq(&self, other: &Node) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        self.op == other.op
            && self.ty == other.ty
            && self.attributes == other.attributes
            && self.operands.len() == other.operands.len()
            && self.operands.iter().zip(&other.operands).all(|(a, b)| a.structurally_eq(b))
    }
}
