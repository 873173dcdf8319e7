//! Native Rust scalars and the ONNX element types that store them.

use super::*;

/// Maps a native Rust scalar onto its tensor element type.
pub trait HasDType {
    const DTYPE: DType;

    /// `TensorProto.DataType` code of [`Self::DTYPE`].
    const ONNX_CODE: i32 = Self::DTYPE.onnx_code();
}

macro_rules! onnx_native {
    ($($variant:ident: $($ty:ty),+;)*) => {
        $($(impl HasDType for $ty { const DTYPE: DType = DType::$variant; })+)*
    };
}

// Half-precision types have no native scalar and are left out.
onnx_native! {
    Float32: f32;
    Float64: f64;
    Bool: bool;
    Int8: i8;
    Int16: i16;
    Int32: i32;
    Int64: i64;
    UInt8: u8;
    UInt16: u16;
    UInt32: u32;
    UInt64: u64;
    String: String, &'static str;
}
