//! Intermediate representation for ONNX canonicalization.
//!
//! This crate defines the immutable node graph the canonicalization rules read
//! and rebuild, the rule interface they implement, and the driver that applies
//! them.
//!
//! # Module Organization
//!
//! - [`op`] - Operator kinds and attribute names
//! - [`attribute`] - Tagged attribute values with checked accessors
//! - [`tensor`] - Tensor types and constant tensor data
//! - [`node`] - The [`Node`] struct and its constructors
//! - [`pattern`] - [`Rule`] trait and kind-indexed [`RuleRegistry`]
//! - [`rewrite`] - Fixed-point rewrite driver
//! - [`error`] - Error types and result handling

pub mod attribute;
pub mod error;
pub mod node;
pub mod op;
pub mod pattern;
pub mod prelude;
pub mod rewrite;
pub mod tensor;


pub use attribute::{Attribute, Attributes, Floats, Ints};
pub use error::{Error, Result};
pub use node::Node;
pub use op::OpKind;
pub use pattern::{RewriteResult, Rule, RuleRegistry};
pub use rewrite::{RewriteContext, RewriteStats, graph_rewrite, graph_rewrite_many};
pub use tensor::{Dim, ScalarValue, TensorData, TensorType, TensorValues};

pub use onnx_canon_dtype::DType;
