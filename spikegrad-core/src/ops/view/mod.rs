//! Shape manipulation. Tensors are always contiguous here, so these
//! operations copy rather than produce strided views.

use crate::error::SpikeGradError;
use crate::ops::broadcast::broadcast_map;
use crate::tensor::utils::broadcast_shapes;
use crate::tensor::Tensor;
use std::sync::Arc;

/// Inserts a dimension of size 1 at position `dim`.
pub fn unsqueeze(a: &Tensor, dim: usize) -> Result<Tensor, SpikeGradError> {
    if dim > a.rank() {
        return Err(SpikeGradError::UnsupportedOperation(format!(
            "unsqueeze: dim {} out of range for rank {}",
            dim,
            a.rank()
        )));
    }
    let mut shape = a.shape();
    shape.insert(dim, 1);
    Ok(Tensor {
        data: a.data.clone(),
        shape,
    })
}

/// Broadcasts `a` to exactly `shape`, materializing the repeated values.
pub fn expand(a: &Tensor, shape: &[usize]) -> Result<Tensor, SpikeGradError> {
    match broadcast_shapes(&a.shape, shape) {
        Some(ref result) if result.as_slice() == shape => {}
        _ => {
            return Err(SpikeGradError::BroadcastError {
                shape1: a.shape(),
                shape2: shape.to_vec(),
            })
        }
    }
    if a.shape == shape {
        return Ok(a.clone());
    }
    let template = Tensor {
        data: Arc::new(vec![0.0; shape.iter().product()]),
        shape: shape.to_vec(),
    };
    broadcast_map(&[a, &template], |v| v[0])
}

/// Broadcasts a per-sample target of shape `[B]` across the trailing
/// dimensions of `like` (shape `[B, ...]`).
///
/// The target is expanded to `[B, 1, ..]` and then repeated along every
/// trailing axis, so `target[b]` lands on each element of row `b`.
pub fn tile_batch_target(target: &Tensor, like: &Tensor) -> Result<Tensor, SpikeGradError> {
    if target.shape == like.shape {
        return Ok(target.clone());
    }
    let batch = like.shape.first().copied();
    if target.rank() != 1 || batch != Some(target.shape[0]) {
        return Err(SpikeGradError::ShapeMismatch {
            expected: like.shape.first().map(|&b| vec![b]).unwrap_or_default(),
            actual: target.shape(),
            operation: "tile_batch_target".to_string(),
        });
    }
    let mut column = target.clone();
    while column.rank() < like.rank() {
        column = unsqueeze(&column, column.rank())?;
    }
    expand(&column, &like.shape)
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
