//! Rule registry with `OpKind`-based dispatch.

use std::collections::HashMap;
use std::sync::Arc;

use crate::node::Node;
use crate::op::OpKind;
use crate::rewrite::RewriteContext;

use super::{RewriteResult, Rule};

/// Rules indexed by the operator kind they are registered against.
///
/// ```ignore
/// let mut registry = RuleRegistry::new();
/// registry.register(ConvPaddingNormalization);
/// let result = registry.rewrite(&conv, &mut RewriteContext::default());
/// ```
#[derive(Default)]
pub struct RuleRegistry {
    indexed: HashMap<OpKind, Vec<Box<dyn Rule>>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `rule` under its own kind. Rules for one kind are tried in
    /// registration order.
    pub fn register<R: Rule + 'static>(&mut self, rule: R) -> &mut Self {
        tracing::trace!(rule = rule.name(), op = %rule.kind(), "registering rule");
        self.indexed.entry(rule.kind()).or_default().push(Box::new(rule));
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.register(rule);
        self
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.indexed.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rules registered for `kind`, in application order.
    pub fn rules_for(&self, kind: OpKind) -> impl Iterator<Item = &(dyn Rule + 'static)> {
        self.indexed.get(&kind).into_iter().flatten().map(|rule| &**rule)
    }

    /// Offer `node` to the rules registered for its kind.
    ///
    /// The first rule that matches and returns a replacement wins. A rule
    /// error is logged and treated as the rule declining.
    ///
    /// # Tracing
    ///
    /// ```bash
    /// RUST_LOG=onnx_canon_ir::pattern=debug cargo test
    /// ```
    pub fn rewrite(&self, node: &Arc<Node>, ctx: &mut RewriteContext) -> RewriteResult {
        let op = node.op();
        let Some(rules) = self.indexed.get(&op) else {
            return RewriteResult::NoMatch;
        };
        tracing::trace!(%op, node_id = node.id, rule_count = rules.len(), "trying rules");

        for rule in rules {
            if !rule.matches(node) {
                continue;
            }
            match rule.rewrite(node, ctx) {
                Ok(Some(replacement)) => {
                    tracing::debug!(rule = rule.name(), node_id = node.id, replacement_id = replacement.id, "rule applied");
                    ctx.stats.record_applied(rule.name());
                    return RewriteResult::Rewritten(replacement);
                }
                Ok(None) => {
                    tracing::trace!(rule = rule.name(), node_id = node.id, "rule declined");
                    ctx.stats.record_declined(rule.name());
                }
                Err(error) => {
                    tracing::debug!(rule = rule.name(), node_id = node.id, %error, "rule failed; node left unchanged");
                    ctx.stats.record_failed(rule.name());
                }
            }
        }

        RewriteResult::NoMatch
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (kind, rules) in &self.indexed {
            let names: Vec<&str> = rules.iter().map(|r| r.name()).collect();
            map.entry(kind, &names);
        }
        map.finish()
    }
}

impl std::ops::Add for RuleRegistry {
    type Output = Self;

    /// Combine two registries. Rules from `rhs` run after those of `self`.
    fn add(mut self, rhs: Self) -> Self::Output {
        for (kind, rules) in rhs.indexed {
            self.indexed.entry(kind).or_default().extend(rules);
        }
        self
    }
}
