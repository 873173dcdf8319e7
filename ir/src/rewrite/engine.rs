//! Graph rewrite engine implementation.
//!
//! # Algorithm
//!
//! Nodes are visited in post-order (operands before consumers). For each node:
//!
//! 1. **Reconnect**: if any operand was replaced, rebuild the node over the
//!    replacements. This is how uses of a rewritten node are redirected.
//! 2. **Rewrite**: offer the node to the registry until no rule applies
//!    (fixed point) or the iteration limit is hit.
//!
//! Results are memoized by node id, so a sub-graph shared by several consumers
//! is rewritten once and every consumer sees the same replacement.

use std::collections::HashMap;
use std::sync::Arc;

use snafu::ensure;

use crate::Result;
use crate::error::RewriteLimitExceededSnafu;
use crate::node::{Node, Operands};
use crate::pattern::{RewriteResult, RuleRegistry};

use super::RewriteContext;

struct RewriteEngine<'a> {
    registry: &'a RuleRegistry,
    ctx: &'a mut RewriteContext,
    /// Original node id → final replacement.
    results: HashMap<u64, Arc<Node>>,
}

impl<'a> RewriteEngine<'a> {
    fn new(registry: &'a RuleRegistry, ctx: &'a mut RewriteContext) -> Self {
        Self { registry, ctx, results: HashMap::new() }
    }

    fn resolved(&self, node: &Arc<Node>) -> Arc<Node> {
        self.results.get(&node.id).cloned().unwrap_or_else(|| node.clone())
    }

    fn reconnect(&self, node: &Arc<Node>) -> Result<Arc<Node>> {
        let operands: Operands = node.operands().iter().map(|operand| self.resolved(operand)).collect();
        let changed = operands.iter().zip(node.operands()).any(|(new, old)| !Arc::ptr_eq(new, old));
        if !changed {
            return Ok(node.clone());
        }
        node.with_operands(operands)
    }

    /// Rewrite until no rule applies. At most `max_iterations` replacements
    /// are accepted; the node is always checked once more after the last one.
    fn fixed_point(&mut self, mut node: Arc<Node>) -> Result<Arc<Node>> {
        let limit = self.ctx.max_iterations();
        let mut applied = 0;
        loop {
            let RewriteResult::Rewritten(replacement) = self.registry.rewrite(&node, self.ctx) else {
                return Ok(node);
            };
            ensure!(applied < limit, RewriteLimitExceededSnafu { limit, node_id: node.id, op: node.op() });
            applied += 1;
            node = replacement;
        }
    }

    fn rewrite(&mut self, root: &Arc<Node>) -> Result<Arc<Node>> {
        if let Some(result) = self.results.get(&root.id) {
            return Ok(result.clone());
        }

        for node in root.toposort() {
            if self.results.contains_key(&node.id) {
                continue;
            }
            let working = self.reconnect(&node)?;
            let result = self.fixed_point(working)?;
            if !Arc::ptr_eq(&result, &node) {
                tracing::trace!(original = node.id, replacement = result.id, op = %node.op(), "node replaced");
            }
            self.results.insert(node.id, result);
        }

        Ok(self.resolved(root))
    }
}

/// Apply the registry to every node reachable from `root`.
///
/// Returns the replacement for `root` (which is `root` itself when nothing
/// changed). Rule failures never surface here; the only error is a node whose
/// rewrites did not converge within [`RewriteContext::max_iterations`].
///
/// # Example
///
/// ```ignore
/// let registry = RuleRegistry::new().with(ConvPaddingNormalization);
/// let mut ctx = RewriteContext::default();
/// let canonical = graph_rewrite(&registry, &root, &mut ctx)?;
/// ```
pub fn graph_rewrite(registry: &RuleRegistry, root: &Arc<Node>, ctx: &mut RewriteContext) -> Result<Arc<Node>> {
    RewriteEngine::new(registry, ctx).rewrite(root)
}

/// Like [`graph_rewrite`] for a graph with several outputs. Sub-graphs shared
/// between outputs are rewritten once.
pub fn graph_rewrite_many(
    registry: &RuleRegistry,
    roots: &[Arc<Node>],
    ctx: &mut RewriteContext,
) -> Result<Vec<Arc<Node>>> {
    let mut engine = RewriteEngine::new(registry, ctx);
    roots.iter().map(|root| engine.rewrite(root)).collect()
}
