use std::sync::Arc;

use onnx_canon_dtype::DType;

use crate::Result;
use crate::error::Error;
use crate::node::Node;
use crate::op::{OpKind, attr};
use crate::pattern::{Rule, RuleRegistry};
use crate::rewrite::{RewriteContext, graph_rewrite, graph_rewrite_many};
use crate::tensor::TensorType;

/// Renames every graph input by appending a suffix, once.
struct Rename;

impl Rule for Rename {
    fn name(&self) -> &'static str {
        "rename"
    }

    fn kind(&self) -> OpKind {
        OpKind::Input
    }

    fn matches(&self, node: &Node) -> bool {
        node.attributes().string(attr::NAME).ok().flatten().is_some_and(|name| !name.ends_with('\''))
    }

    fn rewrite(&self, node: &Arc<Node>, _ctx: &mut RewriteContext) -> Result<Option<Arc<Node>>> {
        let Some(name) = node.attributes().string(attr::NAME)? else {
            return Ok(None);
        };
        Ok(Some(node.with_attribute(attr::NAME, format!("{name}'"))))
    }
}

/// Always produces a fresh copy, so never converges.
struct Churn;

impl Rule for Churn {
    fn name(&self) -> &'static str {
        "churn"
    }

    fn kind(&self) -> OpKind {
        OpKind::Conv
    }

    fn matches(&self, _node: &Node) -> bool {
        true
    }

    fn rewrite(&self, node: &Arc<Node>, _ctx: &mut RewriteContext) -> Result<Option<Arc<Node>>> {
        Ok(Some(node.with_attribute(attr::GROUP, 1i64)))
    }
}

fn input(name: &str) -> Arc<Node> {
    Node::input(name, TensorType::new(DType::Float32, &[1, 3, 8]))
}

#[test]
fn test_consumer_rebuilt_over_replacement() {
    let x = input("x");
    let w = input("w");
    let conv = Node::conv().x(x.clone()).w(w).pads(vec![1i64, 1]).call();

    let mut ctx = RewriteContext::default();
    let result = graph_rewrite(&RuleRegistry::new().with(Rename), &conv, &mut ctx).unwrap();

    assert_ne!(result.id, conv.id);
    assert_eq!(result.attributes(), conv.attributes());
    assert_eq!(result.operands()[0].attributes().string(attr::NAME).unwrap(), Some("x'"));
    assert_eq!(result.operands()[1].attributes().string(attr::NAME).unwrap(), Some("w'"));
    assert_eq!(ctx.stats.applied("rename"), 2);

    // The input graph is untouched.
    assert!(Arc::ptr_eq(&conv.operands()[0], &x));
}

#[test]
fn test_shared_operand_rewritten_once() {
    let x = input("x");
    let conv = Node::conv().x(x.clone()).w(x).call();

    let mut ctx = RewriteContext::default();
    let result = graph_rewrite(&RuleRegistry::new().with(Rename), &conv, &mut ctx).unwrap();

    assert!(Arc::ptr_eq(&result.operands()[0], &result.operands()[1]));
    assert_eq!(ctx.stats.applied("rename"), 1);
}

#[test]
fn test_unmatched_graph_is_returned_as_is() {
    let pad = Node::pad().data(input("x")).pads(vec![0i64; 6]).call();
    let mut ctx = RewriteContext::default();

    let result = graph_rewrite(&RuleRegistry::new().with(Churn), &pad, &mut ctx).unwrap();

    assert!(Arc::ptr_eq(&result, &pad));
    assert_eq!(ctx.stats.total_applied(), 0);
}

#[test]
fn test_cycling_rule_hits_limit() {
    let conv = Node::conv().x(input("x")).w(input("w")).call();
    let mut ctx = RewriteContext::new(8);

    let err = graph_rewrite(&RuleRegistry::new().with(Churn), &conv, &mut ctx).unwrap_err();
    assert!(matches!(err, Error::RewriteLimitExceeded { limit: 8, op: OpKind::Conv, .. }));
    // Eight accepted replacements, the ninth is refused.
    assert_eq!(ctx.stats.applied("churn"), 9);
}

/// Decrements `group` down to 1.
struct Countdown;

impl Rule for Countdown {
    fn name(&self) -> &'static str {
        "countdown"
    }

    fn kind(&self) -> OpKind {
        OpKind::Conv
    }

    fn matches(&self, node: &Node) -> bool {
        node.attributes().int(attr::GROUP).ok().flatten().is_some_and(|group| group > 1)
    }

    fn rewrite(&self, node: &Arc<Node>, _ctx: &mut RewriteContext) -> Result<Option<Arc<Node>>> {
        let Some(group) = node.attributes().int(attr::GROUP)? else {
            return Ok(None);
        };
        Ok(Some(node.with_attribute(attr::GROUP, group - 1)))
    }
}

#[test]
fn test_converging_at_the_limit_succeeds() {
    let conv = Node::conv().x(input("x")).w(input("w")).group(4).call();
    let mut ctx = RewriteContext::new(3);

    let result = graph_rewrite(&RuleRegistry::new().with(Countdown), &conv, &mut ctx).unwrap();

    assert_eq!(result.attributes().int(attr::GROUP).unwrap(), Some(1));
    assert_eq!(ctx.stats.applied("countdown"), 3);
}

#[test]
fn test_one_past_the_limit_fails() {
    let conv = Node::conv().x(input("x")).w(input("w")).group(5).call();
    let err = graph_rewrite(&RuleRegistry::new().with(Countdown), &conv, &mut RewriteContext::new(3)).unwrap_err();
    assert!(matches!(err, Error::RewriteLimitExceeded { limit: 3, .. }));
}

#[test]
fn test_zero_limit_allows_unmatched_nodes() {
    let conv = Node::conv().x(input("x")).w(input("w")).group(1).call();
    let mut ctx = RewriteContext::new(0);

    let result = graph_rewrite(&RuleRegistry::new().with(Countdown), &conv, &mut ctx).unwrap();
    assert!(Arc::ptr_eq(&result, &conv));

    let busy = Node::conv().x(input("x")).w(input("w")).group(2).call();
    assert!(graph_rewrite(&RuleRegistry::new().with(Countdown), &busy, &mut ctx).is_err());
}

#[test]
fn test_many_roots_share_results() {
    let x = input("x");
    let a = Node::conv().x(x.clone()).w(input("w")).call();
    let b = Node::pad().data(x).pads(vec![0i64; 6]).call();

    let mut ctx = RewriteContext::default();
    let results = graph_rewrite_many(&RuleRegistry::new().with(Rename), &[a, b], &mut ctx).unwrap();

    assert_eq!(results.len(), 2);
    assert!(Arc::ptr_eq(&results[0].operands()[0], &results[1].operands()[0]));
    assert_eq!(ctx.stats.applied("rename"), 2);
}
