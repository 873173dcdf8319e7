//! Graph rewrite driver with per-node fixed-point iteration.
//!
//! This module applies a [`RuleRegistry`](crate::pattern::RuleRegistry) to a
//! node graph and splices replacements in place of the nodes they rewrite.

pub mod context;
pub mod engine;

pub use context::{DEFAULT_MAX_ITERATIONS, RewriteContext, RewriteStats};
pub use engine::{graph_rewrite, graph_rewrite_many};
