use std::sync::Arc;

use snafu::{OptionExt, ensure};

use onnx_canon_ir::error::{MalformedAttributeSnafu, MissingAttributeSnafu};
use onnx_canon_ir::op::attr;
use onnx_canon_ir::{Node, OpKind, Result, RewriteContext, Rule};

use super::uses_explicit_padding;
use crate::attrs::{has_non_zero, insert_zeros_for_non_padded_dims, padded_dims};

/// Extends a `Conv`'s partial `pads` to cover every dimension of its input.
///
/// Pads given for the trailing spatial dimensions only are prefixed with zero
/// pads for the leading ones, so `[1, 1]` on a rank-3 input becomes
/// `[0, 0, 1, 0, 0, 1]`. All-zero and already full-rank pads are left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvPaddingNormalization;

/// Rank the pads must cover: the data operand's, or the weight's if unknown.
fn expected_rank(node: &Node) -> Option<usize> {
    node.operand(0).and_then(|x| x.rank()).or_else(|| node.operand(1).and_then(|w| w.rank()))
}

impl Rule for ConvPaddingNormalization {
    fn name(&self) -> &'static str {
        "conv-padding-normalization"
    }

    fn kind(&self) -> OpKind {
        OpKind::Conv
    }

    fn matches(&self, node: &Node) -> bool {
        node.attributes().contains(attr::PADS) && uses_explicit_padding(node)
    }

    fn rewrite(&self, node: &Arc<Node>, _ctx: &mut RewriteContext) -> Result<Option<Arc<Node>>> {
        let pads = node
            .attributes()
            .ints(attr::PADS)?
            .context(MissingAttributeSnafu { op: node.op(), name: attr::PADS })?;
        if !has_non_zero(Some(pads)) {
            return Ok(None);
        }
        let Some(rank) = expected_rank(node) else {
            tracing::trace!(node_id = node.id, "operand rank unknown");
            return Ok(None);
        };
        if pads.len() == 2 * rank {
            return Ok(None);
        }

        let n_dims = padded_dims(pads)?;
        ensure!(
            n_dims < rank,
            MalformedAttributeSnafu {
                name: attr::PADS,
                reason: format!("pads cover {n_dims} dimensions but the operand has rank {rank}"),
            }
        );

        let extended = insert_zeros_for_non_padded_dims(pads, rank - n_dims)?;
        tracing::trace!(node_id = node.id, ?pads, extended = ?extended.as_slice(), "pads extended");
        Ok(Some(node.with_attribute(attr::PADS, extended)))
    }
}
