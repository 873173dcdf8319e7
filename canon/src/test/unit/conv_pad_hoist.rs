use std::sync::Arc;

use onnx_canon_dtype::DType;
use onnx_canon_ir::op::attr;
use onnx_canon_ir::{Error, Node, OpKind, RewriteContext, Rule, TensorType, TensorValues};

use crate::rules::{ConvPadHoisting, ConvPaddingNormalization};
use crate::test::helpers::*;

fn apply(node: &Arc<Node>) -> onnx_canon_ir::Result<Option<Arc<Node>>> {
    ConvPadHoisting.rewrite(node, &mut RewriteContext::default())
}

#[test]
fn test_padding_moves_into_pad() {
    let conv = conv_with_pads(4, &[1, 2, 1, 2]);
    let rewritten = apply(&conv).unwrap().expect("padding should be hoisted");

    assert_eq!(rewritten.op(), OpKind::Conv);
    assert_eq!(pads_of(&rewritten), Some(vec![0, 0, 0, 0]));
    assert!(Arc::ptr_eq(&rewritten.operands()[1], &conv.operands()[1]));

    let pad = &rewritten.operands()[0];
    assert_eq!(pad.op(), OpKind::Pad);
    assert_eq!(pads_of(pad), Some(vec![0, 0, 1, 2, 0, 0, 1, 2]));
    assert_eq!(pad.attributes().string(attr::MODE).unwrap(), Some("constant"));
    assert!(Arc::ptr_eq(&pad.operands()[0], &conv.operands()[0]));

    let fill = pad.operands()[1].constant_value().expect("fill is a constant");
    assert_eq!(fill.dtype(), DType::Float32);
    assert_eq!(fill.shape(), &[1]);
    assert_eq!(fill.values(), &TensorValues::Float(vec![0.0]));
}

#[test]
fn test_bias_is_kept() {
    let conv = Node::conv()
        .x(input("x", &[1, 3, 8]))
        .w(input("w", &[4, 3, 3]))
        .b(input("b", &[4]))
        .pads(vec![1i64, 1])
        .call();
    let rewritten = apply(&conv).unwrap().expect("padding should be hoisted");
    assert_eq!(rewritten.operands().len(), 3);
    assert!(Arc::ptr_eq(&rewritten.operands()[2], &conv.operands()[2]));
}

#[test]
fn test_hoisted_conv_is_stable() {
    let conv = conv_with_pads(4, &[1, 1, 1, 1]);
    let rewritten = apply(&conv).unwrap().expect("padding should be hoisted");

    assert!(apply(&rewritten).unwrap().is_none());
    let mut ctx = RewriteContext::default();
    assert!(ConvPaddingNormalization.rewrite(&rewritten, &mut ctx).unwrap().is_none());
}

#[test]
fn test_integer_input_declined() {
    let x = Node::input("x", TensorType::new(DType::Int8, &[1, 3, 8]));
    let w = Node::input("w", TensorType::new(DType::Int8, &[4, 3, 3]));
    let conv = Node::conv().x(x).w(w).pads(vec![1i64, 1]).call();
    assert!(matches!(apply(&conv), Err(Error::UnsupportedConstantType { dtype: DType::Int8, .. })));
}

#[test]
fn test_zero_pads_untouched() {
    assert!(apply(&conv_with_pads(4, &[0, 0, 0, 0])).unwrap().is_none());
}
