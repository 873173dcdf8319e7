//! Node constructors for the operator kinds the rules work with.
//!
//! Constructors never validate attribute contents: a malformed `pads` must be
//! representable so that rules can observe it and decline.

use std::sync::Arc;

use bon::bon;
use onnx_canon_dtype::DType;

use super::{Node, Operands};
use crate::attribute::{Attributes, Ints};
use crate::op::{OpKind, attr};
use crate::tensor::{Dim, TensorData, TensorType};

fn same_rank_as(node: &Node, dtype: DType) -> TensorType {
    match node.rank() {
        Some(rank) => TensorType::with_rank(dtype, rank),
        None => TensorType::unranked(dtype),
    }
}

#[bon]
impl Node {
    /// Graph input of the given type.
    pub fn input(name: impl Into<String>, ty: TensorType) -> Arc<Self> {
        let attributes = Attributes::new().with(attr::NAME, name.into());
        Self::new_unchecked(OpKind::Input, Operands::new(), attributes, ty)
    }

    /// Constant node holding `value`.
    pub fn constant(value: TensorData) -> Arc<Self> {
        let ty = value.ty();
        let attributes = Attributes::new().with(attr::VALUE, value);
        Self::new_unchecked(OpKind::Constant, Operands::new(), attributes, ty)
    }

    /// `Conv(X, W, [B])`.
    ///
    /// The result type defaults to `X`'s element type and rank.
    #[builder]
    pub fn conv(
        x: Arc<Node>,
        w: Arc<Node>,
        b: Option<Arc<Node>>,
        #[builder(into)] pads: Option<Ints>,
        #[builder(into)] strides: Option<Ints>,
        #[builder(into)] dilations: Option<Ints>,
        #[builder(into)] kernel_shape: Option<Ints>,
        group: Option<i64>,
        #[builder(into)] auto_pad: Option<String>,
        ty: Option<TensorType>,
    ) -> Arc<Self> {
        let ty = ty.unwrap_or_else(|| same_rank_as(&x, x.dtype()));
        let attributes = Attributes::new()
            .with_opt(attr::PADS, pads)
            .with_opt(attr::STRIDES, strides)
            .with_opt(attr::DILATIONS, dilations)
            .with_opt(attr::KERNEL_SHAPE, kernel_shape)
            .with_opt(attr::GROUP, group)
            .with_opt(attr::AUTO_PAD, auto_pad);
        let operands: Operands = [Some(x), Some(w), b].into_iter().flatten().collect();
        Self::new_unchecked(OpKind::Conv, operands, attributes, ty)
    }

    /// `Pad(data, [constant_value])` with explicit full-rank `pads`.
    #[builder]
    pub fn pad(
        data: Arc<Node>,
        constant_value: Option<Arc<Node>>,
        #[builder(into)] pads: Ints,
        #[builder(into, default = String::from("constant"))] mode: String,
    ) -> Arc<Self> {
        let ty = same_rank_as(&data, data.dtype());
        let attributes = Attributes::new().with(attr::PADS, pads).with(attr::MODE, mode);
        let operands: Operands = [Some(data), constant_value].into_iter().flatten().collect();
        Self::new_unchecked(OpKind::Pad, operands, attributes, ty)
    }

    /// ONNX-ML `OneHotEncoder(X)`.
    ///
    /// The result is `Float32` with one trailing dimension per category.
    #[builder]
    pub fn one_hot_encoder(
        input: Arc<Node>,
        #[builder(into)] cats_int64s: Option<Ints>,
        cats_strings: Option<Vec<String>>,
        #[builder(default = 1)] zeros: i64,
    ) -> Arc<Self> {
        let out_dim = cats_int64s.as_ref().map(|c| c.len()).or_else(|| cats_strings.as_ref().map(Vec::len)).unwrap_or(0);
        let dims = input.ty().dims.clone().map(|mut dims| {
            dims.push(Dim::Known(out_dim));
            dims
        });
        let ty = TensorType { dtype: DType::Float32, dims };
        let attributes = Attributes::new()
            .with_opt(attr::CATS_INT64S, cats_int64s)
            .with_opt(attr::CATS_STRINGS, cats_strings)
            .with(attr::ZEROS, zeros);
        Self::new_unchecked(OpKind::OneHotEncoder, Operands::from_iter([input]), attributes, ty)
    }
}
