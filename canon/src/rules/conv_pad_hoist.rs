use std::sync::Arc;

use snafu::{OptionExt, ensure};

use onnx_canon_ir::error::{MalformedAttributeSnafu, MissingAttributeSnafu};
use onnx_canon_ir::op::attr;
use onnx_canon_ir::{Node, OpKind, Result, RewriteContext, Rule};

use super::uses_explicit_padding;
use crate::attrs::{has_non_zero, insert_zeros_for_non_padded_dims, padded_dims, scalar_constant, zeros_like};

/// Moves a `Conv`'s padding into an explicit zero-filled `Pad` on its input.
///
/// ```text
/// Conv(X, W, B; pads=P)  →  Conv(Pad(X, 0.0; pads=extend(P)), W, B; pads=0)
/// ```
///
/// The `Pad` covers every dimension of `X`, so the pads are extended with zeros
/// for the leading batch and channel dimensions. Only floating inputs are
/// handled since the fill value is a float constant.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvPadHoisting;

impl Rule for ConvPadHoisting {
    fn name(&self) -> &'static str {
        "conv-pad-hoisting"
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
        let Some(x) = node.operand(0) else {
            return Ok(None);
        };
        let Some(rank) = x.rank() else {
            tracing::trace!(node_id = node.id, "input rank unknown");
            return Ok(None);
        };

        let n_dims = padded_dims(pads)?;
        ensure!(
            n_dims <= rank,
            MalformedAttributeSnafu {
                name: attr::PADS,
                reason: format!("pads cover {n_dims} dimensions but the input has rank {rank}"),
            }
        );

        let fill = Node::constant(scalar_constant(x.ty(), 0.0)?);
        let pad = Node::pad()
            .data(x.clone())
            .constant_value(fill)
            .pads(insert_zeros_for_non_padded_dims(pads, rank - n_dims)?)
            .call();

        let operands = std::iter::once(pad).chain(node.operands().iter().skip(1).cloned());
        let attributes = node.attributes().clone().with(attr::PADS, zeros_like(pads));
        Node::new(OpKind::Conv, operands, attributes, node.ty().clone()).map(Some)
    }
}
