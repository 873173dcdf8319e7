//! Common imports for building and rewriting node graphs.
//!
//! ```rust,ignore
//! use onnx_canon_ir::prelude::*;
//! ```

// Core types
pub use crate::node::Node;
pub use crate::op::{OpKind, attr};

// Attributes and tensors
pub use crate::attribute::{Attribute, Attributes, Floats, Ints};
pub use crate::tensor::{Dim, ScalarValue, TensorData, TensorType, TensorValues};

// Rules and rewriting
pub use crate::pattern::{RewriteResult, Rule, RuleRegistry};
pub use crate::rewrite::{RewriteContext, graph_rewrite, graph_rewrite_many};

// Re-exports from dependencies
pub use onnx_canon_dtype::DType;
