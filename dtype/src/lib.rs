//! Tensor element types.
//!
//! [`DType`] names the element type of a tensor value flowing through the IR.
//! Discriminants are the ONNX `TensorProto.DataType` codes, so a type read from
//! a model maps onto a variant without a lookup table.

pub mod ext;


pub use ext::HasDType;

/// Element type of a tensor value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(strum::EnumCount, strum::EnumIter, strum::VariantArray, strum::FromRepr, strum::AsRefStr, strum::Display)]
#[cfg_attr(any(test, feature = "proptest"), derive(proptest_derive::Arbitrary))]
#[repr(i32)]
pub enum DType {
    Float32 = 1,
    UInt8 = 2,
    Int8 = 3,
    UInt16 = 4,
    Int16 = 5,
    Int32 = 6,
    Int64 = 7,
    String = 8,
    Bool = 9,
    Float16 = 10,
    Float64 = 11,
    UInt32 = 12,
    UInt64 = 13,
    BFloat16 = 16,
}

impl DType {
    /// Look up a type by its ONNX `TensorProto.DataType` code.
    pub fn from_onnx_code(code: i32) -> Option<Self> {
        Self::from_repr(code)
    }

    /// ONNX `TensorProto.DataType` code of this type.
    pub const fn onnx_code(&self) -> i32 {
        *self as i32
    }

    /// Size of one element in bytes. Strings have no fixed width.
    pub const fn bytes(&self) -> Option<usize> {
        Some(match self {
            Self::Bool | Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 | Self::Float16 | Self::BFloat16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Int64 | Self::UInt64 | Self::Float64 => 8,
            Self::String => return None,
        })
    }

    pub const fn is_bool(&self) -> bool {
        matches!(self, Self::Bool)
    }

    pub const fn is_signed(&self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
    }

    pub const fn is_unsigned(&self) -> bool {
        matches!(self, Self::UInt8 | Self::UInt16 | Self::UInt32 | Self::UInt64)
    }

    pub const fn is_int(&self) -> bool {
        self.is_signed() || self.is_unsigned()
    }

    /// Floating point types a tensor constant can be materialized in.
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float16 | Self::BFloat16 | Self::Float32 | Self::Float64)
    }

    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }
}
