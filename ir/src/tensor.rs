//! Tensor value descriptors and constant tensor data.

use onnx_canon_dtype::{DType, HasDType};
use smallvec::SmallVec;
use snafu::ensure;

use crate::Result;
use crate::error::{TensorDataLengthSnafu, UnsupportedConstantTypeSnafu};

/// One dimension of a tensor type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dim {
    Known(usize),
    Unknown,
}

pub type Dims = SmallVec<[Dim; 4]>;

/// Type of a tensor value: element type plus (optionally) its dimensions.
///
/// `dims == None` is an unranked tensor. A ranked tensor may still have
/// unknown extents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TensorType {
    pub dtype: DType,
    pub dims: Option<Dims>,
}

impl TensorType {
    /// Fully static tensor type.
    pub fn new(dtype: DType, shape: &[usize]) -> Self {
        Self { dtype, dims: Some(shape.iter().map(|&d| Dim::Known(d)).collect()) }
    }

    /// Ranked tensor type with unknown extents.
    pub fn with_rank(dtype: DType, rank: usize) -> Self {
        Self { dtype, dims: Some(SmallVec::from_elem(Dim::Unknown, rank)) }
    }

    pub fn unranked(dtype: DType) -> Self {
        Self { dtype, dims: None }
    }

    pub fn rank(&self) -> Option<usize> {
        self.dims.as_ref().map(|dims| dims.len())
    }

    /// Static shape, if every extent is known.
    pub fn static_shape(&self) -> Option<Vec<usize>> {
        self.dims
            .as_ref()?
            .iter()
            .map(|d| match d {
                Dim::Known(n) => Some(*n),
                Dim::Unknown => None,
            })
            .collect()
    }
}

/// Storage for constant tensor elements.
///
/// Integer and boolean tensors share `Int`, all floating types share `Float`.
#[derive(Debug, Clone, PartialEq)]
pub enum TensorValues {
    Int(Vec<i64>),
    Float(Vec<f64>),
    String(Vec<String>),
}

impl TensorValues {
    pub fn len(&self) -> usize {
        match self {
            Self::Int(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::String(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn storage_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
        }
    }

    fn fits(&self, dtype: DType) -> bool {
        match self {
            Self::Int(_) => dtype.is_int() || dtype.is_bool(),
            Self::Float(_) => dtype.is_float(),
            Self::String(_) => dtype.is_string(),
        }
    }
}

/// Borrowed view of a single tensor element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarValue<'a> {
    Int(i64),
    Float(f64),
    String(&'a str),
}

/// Constant tensor: element type, static shape and values in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorData {
    dtype: DType,
    shape: Vec<usize>,
    values: TensorValues,
}

impl TensorData {
    /// Create a constant tensor, validating storage kind and element count.
    pub fn new(dtype: DType, shape: Vec<usize>, values: TensorValues) -> Result<Self> {
        ensure!(values.fits(dtype), UnsupportedConstantTypeSnafu { dtype, requested: values.storage_name() });
        let expected = shape.iter().product::<usize>();
        ensure!(values.len() == expected, TensorDataLengthSnafu { len: values.len(), shape: shape.clone(), expected });
        Ok(Self { dtype, shape, values })
    }

    /// Rank-0 `Int64` tensor.
    pub fn scalar_i64(value: i64) -> Self {
        Self { dtype: i64::DTYPE, shape: vec![], values: TensorValues::Int(vec![value]) }
    }

    /// Rank-0 `Float32` tensor.
    pub fn scalar_f32(value: f32) -> Self {
        Self { dtype: f32::DTYPE, shape: vec![], values: TensorValues::Float(vec![value as f64]) }
    }

    /// Rank-0 `String` tensor.
    pub fn scalar_string(value: impl Into<String>) -> Self {
        Self { dtype: String::DTYPE, shape: vec![], values: TensorValues::String(vec![value.into()]) }
    }

    /// Rank-1 `Int64` tensor.
    pub fn from_i64s(values: &[i64]) -> Self {
        Self { dtype: i64::DTYPE, shape: vec![values.len()], values: TensorValues::Int(values.to_vec()) }
    }

    /// Rank-1 `Float32` tensor.
    pub fn from_f32s(values: &[f32]) -> Self {
        let values: Vec<f64> = values.iter().map(|&v| v as f64).collect();
        Self { dtype: f32::DTYPE, shape: vec![values.len()], values: TensorValues::Float(values) }
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn values(&self) -> &TensorValues {
        &self.values
    }

    pub fn numel(&self) -> usize {
        self.values.len()
    }

    /// Tensor type of this constant.
    pub fn ty(&self) -> TensorType {
        TensorType::new(self.dtype, &self.shape)
    }

    /// The single element of a one-element tensor, whatever its rank.
    pub fn as_scalar(&self) -> Option<ScalarValue<'_>> {
        if self.numel() != 1 {
            return None;
        }
        Some(match &self.values {
            TensorValues::Int(v) => ScalarValue::Int(v[0]),
            TensorValues::Float(v) => ScalarValue::Float(v[0]),
            TensorValues::String(v) => ScalarValue::String(&v[0]),
        })
    }
}
