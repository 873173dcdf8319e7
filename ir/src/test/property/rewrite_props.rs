//! Property tests for the rewrite driver.

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;

use super::generators::*;
use crate::op::attr;
use crate::pattern::{Rule, RuleRegistry};
use crate::rewrite::{RewriteContext, graph_rewrite};
use crate::{Node, OpKind, Result};

/// Drops `strides` from every Conv; a stand-in rule for driver properties.
struct DropStrides;

impl Rule for DropStrides {
    fn name(&self) -> &'static str {
        "drop-strides"
    }

    fn kind(&self) -> OpKind {
        OpKind::Conv
    }

    fn matches(&self, node: &Node) -> bool {
        node.attributes().contains(attr::STRIDES)
    }

    fn rewrite(&self, node: &Arc<Node>, _ctx: &mut RewriteContext) -> Result<Option<Arc<Node>>> {
        Ok(Some(node.without_attribute(attr::STRIDES)))
    }
}

proptest! {
    #[test]
    fn empty_registry_is_identity((conv, _rank) in arb_conv()) {
        let result = graph_rewrite(&RuleRegistry::new(), &conv, &mut RewriteContext::default()).unwrap();
        prop_assert!(Arc::ptr_eq(&result, &conv));
    }

    #[test]
    fn toposort_visits_operands_first((conv, _rank) in arb_conv()) {
        let order = conv.toposort();
        let mut seen = HashSet::new();
        for node in &order {
            for operand in node.operands() {
                prop_assert!(seen.contains(&operand.id), "operand {} listed after consumer {}", operand.id, node.id);
            }
            prop_assert!(seen.insert(node.id), "node {} listed twice", node.id);
        }
        prop_assert_eq!(order.last().map(|n| n.id), Some(conv.id));
    }

    #[test]
    fn rewriting_is_idempotent((conv, _rank) in arb_conv()) {
        let conv = conv.with_attribute(attr::STRIDES, vec![1i64; 2]);
        let registry = RuleRegistry::new().with(DropStrides);

        let once = graph_rewrite(&registry, &conv, &mut RewriteContext::default()).unwrap();
        let mut ctx = RewriteContext::default();
        let twice = graph_rewrite(&registry, &once, &mut ctx).unwrap();

        prop_assert!(Arc::ptr_eq(&once, &twice));
        prop_assert_eq!(ctx.stats.total_applied(), 0);
    }
}
