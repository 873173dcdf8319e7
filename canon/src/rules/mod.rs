//! Canonicalization rules and their registration.
//!
//! Each rule is bound to exactly one operator kind. Registries for the two
//! operator families are built separately and combined with `+`.

mod conv_pad_hoist;
mod conv_padding;
mod one_hot;

pub use conv_pad_hoist::ConvPadHoisting;
pub use conv_padding::ConvPaddingNormalization;
pub use one_hot::OneHotEncoderAttributeSynthesis;

use onnx_canon_ir::op::attr;
use onnx_canon_ir::{Node, RuleRegistry};

use crate::config::CanonicalizeConfig;

/// Rules for `Conv`.
///
/// Hoisting, when enabled, runs first; the padding it leaves behind is all
/// zeros, so normalization then has nothing to do.
pub fn conv_rules(config: &CanonicalizeConfig) -> RuleRegistry {
    let mut registry = RuleRegistry::new();
    if config.hoist_conv_padding {
        registry.register(ConvPadHoisting);
    }
    if config.conv_padding {
        registry.register(ConvPaddingNormalization);
    }
    registry
}

/// Rules for `OneHotEncoder`.
pub fn one_hot_rules(config: &CanonicalizeConfig) -> RuleRegistry {
    let mut registry = RuleRegistry::new();
    if config.one_hot {
        registry.register(OneHotEncoderAttributeSynthesis);
    }
    registry
}

/// Every rule enabled by `config`.
pub fn canonicalization_rules(config: &CanonicalizeConfig) -> RuleRegistry {
    conv_rules(config) + one_hot_rules(config)
}

/// `pads` only takes effect when `auto_pad` is absent or `NOTSET`.
fn uses_explicit_padding(node: &Node) -> bool {
    matches!(node.attributes().string(attr::AUTO_PAD), Ok(None) | Ok(Some(attr::NOTSET)))
}
