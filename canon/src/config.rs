//! Canonicalization configuration.
//!
//! Provides typed configuration with a bon builder and environment variable
//! fallbacks.

use bon::bon;

use onnx_canon_ir::rewrite::DEFAULT_MAX_ITERATIONS;

/// Which rules run and how long the driver may iterate on one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalizeConfig {
    /// Extend partial `Conv` pads to full rank.
    pub conv_padding: bool,
    /// Fold `OneHotEncoder` over constant inputs.
    pub one_hot: bool,
    /// Move `Conv` padding into an explicit `Pad`. Off by default.
    pub hoist_conv_padding: bool,
    /// Per-node rewrite limit.
    pub max_iterations: usize,
}

impl Default for CanonicalizeConfig {
    fn default() -> Self {
        Self { conv_padding: true, one_hot: true, hoist_conv_padding: false, max_iterations: DEFAULT_MAX_ITERATIONS }
    }
}

#[bon]
impl CanonicalizeConfig {
    /// Create a configuration with builder pattern, finished with `.build()`.
    #[builder(finish_fn = build)]
    pub fn builder(
        #[builder(default = true)] conv_padding: bool,
        #[builder(default = true)] one_hot: bool,
        #[builder(default = false)] hoist_conv_padding: bool,
        #[builder(default = DEFAULT_MAX_ITERATIONS)] max_iterations: usize,
    ) -> Self {
        Self { conv_padding, one_hot, hoist_conv_padding, max_iterations }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `ONNX_CANON_NO_CONV_PADS` - Disable `Conv` padding normalization if set
    /// * `ONNX_CANON_NO_ONE_HOT` - Disable `OneHotEncoder` folding if set
    /// * `ONNX_CANON_HOIST_PADS` - Enable `Conv` padding hoisting if set
    /// * `ONNX_CANON_MAX_ITERATIONS` - Per-node rewrite limit (default: 1000)
    pub fn from_env() -> Self {
        let conv_padding = std::env::var("ONNX_CANON_NO_CONV_PADS").is_err();
        let one_hot = std::env::var("ONNX_CANON_NO_ONE_HOT").is_err();
        let hoist_conv_padding = std::env::var("ONNX_CANON_HOIST_PADS").is_ok();
        let max_iterations = std::env::var("ONNX_CANON_MAX_ITERATIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_MAX_ITERATIONS);

        Self { conv_padding, one_hot, hoist_conv_padding, max_iterations }
    }
}
