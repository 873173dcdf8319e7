use onnx_canon_dtype::DType;
use snafu::Snafu;

use crate::op::OpKind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Attribute sequence violates its length or parity invariant.
    #[snafu(display("malformed attribute {name:?}: {reason}"))]
    MalformedAttribute { name: String, reason: String },

    /// Attribute is present but holds a different variant.
    #[snafu(display("attribute {name:?} has kind {found}, expected {expected}"))]
    AttributeKindMismatch { name: String, expected: &'static str, found: &'static str },

    /// Required attribute is absent.
    #[snafu(display("{op} is missing required attribute {name:?}"))]
    MissingAttribute { op: OpKind, name: String },

    /// Constant cannot be materialized in the requested element type.
    #[snafu(display("cannot materialize a {requested} constant with {dtype} elements"))]
    UnsupportedConstantType { dtype: DType, requested: &'static str },

    /// Tensor data length disagrees with its shape.
    #[snafu(display("tensor data has {len} elements but shape {shape:?} holds {expected}"))]
    TensorDataLength { len: usize, shape: Vec<usize>, expected: usize },

    /// Wrong number of operands for an operator.
    #[snafu(display("{op} expects {expected} operands, got {found}"))]
    OperandCountMismatch { op: OpKind, expected: &'static str, found: usize },

    /// Fixed-point application on one node did not converge.
    #[snafu(display("rewrite limit ({limit}) exceeded on node {node_id} ({op}): rules may be cycling"))]
    RewriteLimitExceeded { limit: usize, node_id: u64, op: OpKind },
}
