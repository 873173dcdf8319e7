//! Operator kinds and the attribute names they use.

/// Kind tag of a node.
///
/// Rules register against exactly one kind; the registry dispatches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(strum::EnumCount, strum::EnumIter, strum::AsRefStr, strum::Display, strum::EnumString)]
pub enum OpKind {
    /// Graph input. Carries a `name` attribute.
    Input,
    /// Constant tensor. Carries a `value` tensor attribute.
    Constant,
    /// `Conv(X, W, [B])`.
    Conv,
    /// `Pad(data, [constant_value])`, padding given as the `pads` attribute.
    Pad,
    /// ONNX-ML `OneHotEncoder(X)`. Has no operand once its membership is known.
    OneHotEncoder,
}

impl OpKind {
    /// Inclusive operand count range accepted by this kind.
    pub const fn operand_range(&self) -> (usize, usize) {
        match self {
            Self::Input | Self::Constant => (0, 0),
            Self::Conv => (2, 3),
            Self::Pad => (1, 2),
            Self::OneHotEncoder => (0, 1),
        }
    }

    pub(crate) const fn operand_range_str(&self) -> &'static str {
        match self {
            Self::Input | Self::Constant => "0",
            Self::Conv => "2 or 3",
            Self::Pad => "1 or 2",
            Self::OneHotEncoder => "0 or 1",
        }
    }
}

/// Attribute names.
pub mod attr {
    pub const NAME: &str = "name";
    pub const VALUE: &str = "value";

    pub const PADS: &str = "pads";
    pub const AUTO_PAD: &str = "auto_pad";
    pub const STRIDES: &str = "strides";
    pub const DILATIONS: &str = "dilations";
    pub const GROUP: &str = "group";
    pub const KERNEL_SHAPE: &str = "kernel_shape";

    pub const MODE: &str = "mode";

    pub const CATS_INT64S: &str = "cats_int64s";
    pub const CATS_STRINGS: &str = "cats_strings";
    pub const ZEROS: &str = "zeros";
    pub const MEMBERSHIP: &str = "membership";

    /// `auto_pad` value under which explicit `pads` are honored.
    pub const NOTSET: &str = "NOTSET";
}
