//! Rule interface and kind-indexed rule registry.
//!
//! A [`Rule`] is bound to exactly one [`OpKind`]. The [`RuleRegistry`] indexes
//! rules by kind so only the rules for a node's kind are tried, in
//! registration order, until one produces a replacement.

pub mod registry;

use std::sync::Arc;

use crate::Result;
use crate::node::Node;
use crate::op::OpKind;
use crate::rewrite::RewriteContext;

pub use registry::RuleRegistry;

/// Result of offering a node to the registry.
#[derive(Debug, Clone)]
pub enum RewriteResult {
    /// No rule matched, or every matching rule declined.
    NoMatch,
    /// A rule produced a replacement node.
    Rewritten(Arc<Node>),
}

/// Local rewrite of one node kind.
///
/// `rewrite` must be pure: it reads only `node` (and its operands) and either
/// returns one replacement or `None`. Returning an error is equivalent to
/// declining; the registry logs it and leaves the node unchanged.
pub trait Rule: Send + Sync {
    /// Stable name, used in logs and statistics.
    fn name(&self) -> &'static str;

    /// Operator kind this rule is registered against.
    fn kind(&self) -> OpKind;

    /// Cheap structural pre-check. `rewrite` is only called when this holds.
    fn matches(&self, node: &Node) -> bool;

    /// Build the replacement for `node`, or `None` to leave it as is.
    fn rewrite(&self, node: &Arc<Node>, ctx: &mut RewriteContext) -> Result<Option<Arc<Node>>>;
}
