use std::sync::Arc;

use onnx_canon_ir::op::attr;
use onnx_canon_ir::{Node, OpKind, Result, RewriteContext, Rule};

use crate::attrs::{Categories, one_hot_membership};

/// Folds a `OneHotEncoder` over a constant input into its membership vector.
///
/// The replacement carries the result as the `membership` attribute and has no
/// operands, so it no longer depends on (or matches through) the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneHotEncoderAttributeSynthesis;

impl Rule for OneHotEncoderAttributeSynthesis {
    fn name(&self) -> &'static str {
        "one-hot-encoder-attribute-synthesis"
    }

    fn kind(&self) -> OpKind {
        OpKind::OneHotEncoder
    }

    fn matches(&self, node: &Node) -> bool {
        let attributes = node.attributes();
        let has_categories = attributes.contains(attr::CATS_INT64S) || attributes.contains(attr::CATS_STRINGS);
        has_categories && node.operand(0).is_some_and(|input| input.scalar_constant().is_some())
    }

    fn rewrite(&self, node: &Arc<Node>, _ctx: &mut RewriteContext) -> Result<Option<Arc<Node>>> {
        let Some(categories) = Categories::from_attributes(node.attributes())? else {
            return Ok(None);
        };
        if categories.is_empty() {
            return Ok(None);
        }

        let value = node.operand(0).and_then(|input| input.constant_value());
        let membership = one_hot_membership(value, &categories);
        if !membership.contains(&1.0) {
            if node.attributes().int(attr::ZEROS)? == Some(0) {
                tracing::debug!(node_id = node.id, "constant input matches no category and zeros=0");
            }
            return Ok(None);
        }

        let attributes = node.attributes().clone().with(attr::MEMBERSHIP, membership);
        Node::new(OpKind::OneHotEncoder, std::iter::empty(), attributes, node.ty().clone()).map(Some)
    }
}
