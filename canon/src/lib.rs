//! Canonicalization rules for ONNX graphs.
//!
//! Rewrites operators into an equivalent, more uniform form:
//!
//! - [`ConvPaddingNormalization`](rules::ConvPaddingNormalization) extends
//!   partial `Conv` pads to cover every input dimension.
//! - [`OneHotEncoderAttributeSynthesis`](rules::OneHotEncoderAttributeSynthesis)
//!   folds a `OneHotEncoder` over a constant input into a membership vector.
//! - [`ConvPadHoisting`](rules::ConvPadHoisting) (opt-in) moves `Conv` padding
//!   into an explicit `Pad`.
//!
//! # Module Organization
//!
//! - [`attrs`] - Attribute algorithms the rules are built from
//! - [`rules`] - Rule implementations and registration
//! - [`config`] - [`CanonicalizeConfig`]
//!
//! # Example
//!
//! ```ignore
//! let canonical = canonicalize(&root, &CanonicalizeConfig::from_env())?;
//! ```

pub mod attrs;
pub mod config;
pub mod rules;

#[cfg(test)]
pub mod test;

use std::sync::Arc;

use onnx_canon_ir::{Node, Result, RewriteContext, RewriteStats, graph_rewrite, graph_rewrite_many};

pub use config::CanonicalizeConfig;
pub use rules::{
    ConvPadHoisting, ConvPaddingNormalization, OneHotEncoderAttributeSynthesis, canonicalization_rules, conv_rules,
    one_hot_rules,
};

/// Canonicalize the graph reachable from `root`.
pub fn canonicalize(root: &Arc<Node>, config: &CanonicalizeConfig) -> Result<Arc<Node>> {
    let registry = canonicalization_rules(config);
    let mut ctx = RewriteContext::new(config.max_iterations);
    graph_rewrite(&registry, root, &mut ctx)
}

/// Canonicalize a graph with several outputs, reporting per-rule statistics.
pub fn canonicalize_graph(roots: &[Arc<Node>], config: &CanonicalizeConfig) -> Result<(Vec<Arc<Node>>, RewriteStats)> {
    let registry = canonicalization_rules(config);
    let mut ctx = RewriteContext::new(config.max_iterations);
    let rewritten = graph_rewrite_many(&registry, roots, &mut ctx)?;
    tracing::debug!(outputs = roots.len(), applied = ctx.stats.total_applied(), "canonicalization finished");
    Ok((rewritten, ctx.stats))
}
