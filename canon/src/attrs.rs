//! Attribute algorithms used by the canonicalization rules.
//!
//! Everything here is a pure function over attribute sequences and tensor
//! metadata. Failures are reported as [`Error`](onnx_canon_ir::Error) values
//! and turned into declines by the rule layer.
//!
//! Padding sequences follow the ONNX layout: `2 * n` values, all begin pads
//! first, then all end pads (`[b1, .., bn, e1, .., en]`).

use std::iter;

use smallvec::smallvec;
use snafu::ensure;

use onnx_canon_ir::error::{MalformedAttributeSnafu, UnsupportedConstantTypeSnafu};
use onnx_canon_ir::op::attr;
use onnx_canon_ir::{Attributes, Ints, Result, ScalarValue, TensorData, TensorType, TensorValues};

// ============================================================================
// Padding
// ============================================================================

/// Whether any pad is strictly positive. An absent sequence counts as all zeros.
pub fn has_non_zero(pads: Option<&[i64]>) -> bool {
    pads.is_some_and(|pads| pads.iter().any(|&p| p > 0))
}

/// All-zero sequence of the same length as `reference`.
pub fn zeros_like(reference: &[i64]) -> Ints {
    smallvec![0; reference.len()]
}

/// Number of dimensions a padding sequence covers.
pub fn padded_dims(pads: &[i64]) -> Result<usize> {
    ensure!(
        pads.len() % 2 == 0,
        MalformedAttributeSnafu { name: attr::PADS, reason: format!("odd length {}", pads.len()) }
    );
    Ok(pads.len() / 2)
}

/// Prepend `extension` unpadded dimensions to a padding sequence.
///
/// `[b1, .., bn, e1, .., en]` becomes `[0 × ext, b1, .., bn, 0 × ext, e1, .., en]`.
///
/// # Example
///
/// ```rust
/// # use onnx_canon::attrs::insert_zeros_for_non_padded_dims;
/// let pads = insert_zeros_for_non_padded_dims(&[1, 2, 3, 4], 2).unwrap();
/// assert_eq!(pads.as_slice(), &[0, 0, 1, 2, 0, 0, 3, 4]);
/// ```
pub fn insert_zeros_for_non_padded_dims(pads: &[i64], extension: usize) -> Result<Ints> {
    let n_dims = padded_dims(pads)?;
    let (begin, end) = pads.split_at(n_dims);

    let mut extended = Ints::with_capacity(2 * (n_dims + extension));
    extended.extend(iter::repeat_n(0, extension));
    extended.extend_from_slice(begin);
    extended.extend(iter::repeat_n(0, extension));
    extended.extend_from_slice(end);
    Ok(extended)
}

// ============================================================================
// Constants
// ============================================================================

/// Single-element (`shape = [1]`) tensor of `reference`'s element type.
///
/// Only floating element types are supported.
pub fn scalar_constant(reference: &TensorType, value: f32) -> Result<TensorData> {
    let dtype = reference.dtype;
    ensure!(dtype.is_float(), UnsupportedConstantTypeSnafu { dtype, requested: "float" });
    TensorData::new(dtype, vec![1], TensorValues::Float(vec![value as f64]))
}

// ============================================================================
// One-hot categories
// ============================================================================

/// Category list of a `OneHotEncoder`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Categories<'a> {
    Int64s(&'a [i64]),
    Strings(&'a [String]),
}

impl<'a> Categories<'a> {
    /// Read the categories from `cats_int64s` or `cats_strings`.
    ///
    /// Returns `Ok(None)` when neither is present. Setting both is malformed.
    pub fn from_attributes(attributes: &'a Attributes) -> Result<Option<Self>> {
        let ints = attributes.ints(attr::CATS_INT64S)?;
        let strings = attributes.strings(attr::CATS_STRINGS)?;
        match (ints, strings) {
            (Some(_), Some(_)) => MalformedAttributeSnafu {
                name: attr::CATS_INT64S,
                reason: format!("both {} and {} are set", attr::CATS_INT64S, attr::CATS_STRINGS),
            }
            .fail(),
            (Some(ints), None) => Ok(Some(Self::Int64s(ints))),
            (None, Some(strings)) => Ok(Some(Self::Strings(strings))),
            (None, None) => Ok(None),
        }
    }

    /// Output dimension of the encoder.
    pub fn len(&self) -> usize {
        match self {
            Self::Int64s(cats) => cats.len(),
            Self::Strings(cats) => cats.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slot of the first category equal to `value`.
    ///
    /// Integer categories also accept floats with an exactly integral value.
    pub fn position(&self, value: ScalarValue<'_>) -> Option<usize> {
        match (self, value) {
            (Self::Int64s(cats), ScalarValue::Int(v)) => cats.iter().position(|&c| c == v),
            (Self::Int64s(cats), ScalarValue::Float(v)) => {
                let as_int = integral(v)?;
                cats.iter().position(|&c| c == as_int)
            }
            (Self::Strings(cats), ScalarValue::String(v)) => cats.iter().position(|c| c == v),
            _ => None,
        }
    }
}

/// `value` as an `i64`, if it is a whole number inside the `i64` range.
fn integral(value: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, the first value out of range.
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (in_range && value.fract() == 0.0).then(|| value as i64)
}

/// Membership vector of a statically known encoder input.
///
/// The slot of the first matching category is `1.0`, every other slot `0.0`.
/// A missing value, a value with more than one element, or a value outside
/// the categories yields all zeros. No categories yields an empty vector.
pub fn one_hot_membership(value: Option<&TensorData>, categories: &Categories<'_>) -> Vec<f32> {
    let mut membership = vec![0.0; categories.len()];
    let slot = value.and_then(TensorData::as_scalar).and_then(|v| categories.position(v));
    if let Some(hot) = slot.and_then(|slot| membership.get_mut(slot)) {
        *hot = 1.0;
    }
    membership
}
