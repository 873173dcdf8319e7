//! Generators for property-based testing.
//!
//! Provides strategies for padding sequences and small convolution graphs.
//! Exported under the `proptest` feature for use by downstream crates.

use std::sync::Arc;

use proptest::prelude::*;

use onnx_canon_dtype::DType;
use onnx_canon_dtype::test::generators::float_dtype;

use crate::node::Node;
use crate::tensor::TensorType;

// ============================================================================
// Padding Generators
// ============================================================================

/// Padding sequence with `n_dims` begin and `n_dims` end values.
pub fn arb_pads(n_dims: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0i64..=8, 2 * n_dims)
}

/// Padding sequence with at least one strictly positive value.
pub fn arb_nonzero_pads(n_dims: usize) -> impl Strategy<Value = Vec<i64>> {
    arb_pads(n_dims).prop_filter("needs a positive pad", |pads| pads.iter().any(|&p| p > 0))
}

// ============================================================================
// Graph Generators
// ============================================================================

/// Spatial extents of an NC* tensor with 1 to 3 spatial dimensions.
pub fn arb_spatial_shape() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(1usize..=16, 1..=3)
}

/// Graph input of shape `[1, channels, spatial...]`.
pub fn nc_input(name: &str, dtype: DType, channels: usize, spatial: &[usize]) -> Arc<Node> {
    let mut shape = vec![1, channels];
    shape.extend_from_slice(spatial);
    Node::input(name, TensorType::new(dtype, &shape))
}

/// `Conv(X, W)` whose pads cover a random number of trailing dimensions.
///
/// Yields the node together with the rank of `X`.
pub fn arb_conv() -> impl Strategy<Value = (Arc<Node>, usize)> {
    (float_dtype(), arb_spatial_shape())
        .prop_flat_map(|(dtype, spatial)| {
            let rank = spatial.len() + 2;
            (Just(dtype), Just(spatial), (1..=rank).prop_flat_map(arb_pads))
        })
        .prop_map(|(dtype, spatial, pads)| {
            let rank = spatial.len() + 2;
            let x = nc_input("x", dtype, 3, &spatial);
            let w = Node::input("w", TensorType::with_rank(dtype, rank));
            (Node::conv().x(x).w(w).pads(pads).call(), rank)
        })
}
