//! Named node attributes.
//!
//! [`Attribute`] is a closed tagged union over the attribute kinds ONNX nodes
//! carry. Typed access goes through [`Attributes`], which distinguishes an
//! absent attribute (`Ok(None)`) from one stored under a different kind
//! ([`Error::AttributeKindMismatch`](crate::Error::AttributeKindMismatch)).

use std::collections::BTreeMap;

use smallvec::SmallVec;
use snafu::OptionExt;

use crate::Result;
use crate::error::AttributeKindMismatchSnafu;
use crate::tensor::TensorData;

/// Integer attribute sequence (padding, strides, categories, ...).
pub type Ints = SmallVec<[i64; 8]>;

/// Float attribute sequence.
pub type Floats = SmallVec<[f32; 8]>;

/// Attribute value attached to a node.
#[derive(Debug, Clone, PartialEq, strum::IntoStaticStr)]
pub enum Attribute {
    Int(i64),
    Ints(Ints),
    Float(f32),
    Floats(Floats),
    String(String),
    Strings(Vec<String>),
    Tensor(TensorData),
}

impl Attribute {
    /// Variant name, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_ints(&self) -> Option<&[i64]> {
        match self {
            Self::Ints(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_floats(&self) -> Option<&[f32]> {
        match self {
            Self::Floats(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            Self::Strings(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_tensor(&self) -> Option<&TensorData> {
        match self {
            Self::Tensor(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for Attribute {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<Ints> for Attribute {
    fn from(v: Ints) -> Self {
        Self::Ints(v)
    }
}

impl From<Vec<i64>> for Attribute {
    fn from(v: Vec<i64>) -> Self {
        Self::Ints(Ints::from_vec(v))
    }
}

impl From<f32> for Attribute {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<Floats> for Attribute {
    fn from(v: Floats) -> Self {
        Self::Floats(v)
    }
}

impl From<Vec<f32>> for Attribute {
    fn from(v: Vec<f32>) -> Self {
        Self::Floats(Floats::from_vec(v))
    }
}

impl From<&str> for Attribute {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Attribute {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<String>> for Attribute {
    fn from(v: Vec<String>) -> Self {
        Self::Strings(v)
    }
}

impl From<TensorData> for Attribute {
    fn from(v: TensorData) -> Self {
        Self::Tensor(v)
    }
}

/// Ordered attribute map of a node.
///
/// Ordering is by name so two nodes with the same attributes compare and print
/// identically regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes(BTreeMap<String, Attribute>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.0.get(name)
    }

    /// Insert or replace an attribute, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Attribute>) -> Option<Attribute> {
        self.0.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<Attribute> {
        self.0.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Attribute>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert only when `value` is present.
    pub fn with_opt<T: Into<Attribute>>(mut self, name: impl Into<String>, value: Option<T>) -> Self {
        if let Some(value) = value {
            self.insert(name, value);
        }
        self
    }

    fn typed<'a, T>(
        &'a self,
        name: &str,
        expected: &'static str,
        pick: impl FnOnce(&'a Attribute) -> Option<T>,
    ) -> Result<Option<T>> {
        let Some(attr) = self.0.get(name) else {
            return Ok(None);
        };
        pick(attr).map(Some).context(AttributeKindMismatchSnafu { name, expected, found: attr.kind() })
    }

    pub fn int(&self, name: &str) -> Result<Option<i64>> {
        self.typed(name, "Int", Attribute::as_int)
    }

    pub fn ints(&self, name: &str) -> Result<Option<&[i64]>> {
        self.typed(name, "Ints", Attribute::as_ints)
    }

    pub fn float(&self, name: &str) -> Result<Option<f32>> {
        self.typed(name, "Float", Attribute::as_float)
    }

    pub fn floats(&self, name: &str) -> Result<Option<&[f32]>> {
        self.typed(name, "Floats", Attribute::as_floats)
    }

    pub fn string(&self, name: &str) -> Result<Option<&str>> {
        self.typed(name, "String", Attribute::as_str)
    }

    pub fn strings(&self, name: &str) -> Result<Option<&[String]>> {
        self.typed(name, "Strings", Attribute::as_strings)
    }

    pub fn tensor(&self, name: &str) -> Result<Option<&TensorData>> {
        self.typed(name, "Tensor", Attribute::as_tensor)
    }
}

impl<K: Into<String>, V: Into<Attribute>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
