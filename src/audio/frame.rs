//! Fixed-length frame shaping for encoder feature tensors

use candle_core::shape::Dim;
use candle_core::{Result, Tensor};

/// Pad or truncate `features` to exactly `length` entries along `axis`.
///
/// Longer inputs keep the first `length` entries; shorter inputs are
/// zero-padded at the end of the axis. All other axes are unchanged, and
/// the input tensor is never mutated. Pass `candle_core::D::Minus1` to
/// shape the trailing frame axis.
pub fn pad_or_trim<D: Dim>(features: &Tensor, length: usize, axis: D) -> Result<Tensor> {
    let dim = axis.to_index(features.shape(), "pad_or_trim")?;
    let current = features.dim(dim)?;

    if current == 0 {
        let mut dims = features.dims().to_vec();
        dims[dim] = length;
        return Tensor::zeros(dims, features.dtype(), features.device());
    }

    if current > length {
        features.narrow(dim, 0, length)
    } else if current < length {
        features.pad_with_zeros(dim, 0, length - current)
    } else {
        Ok(features.clone())
    }
}
