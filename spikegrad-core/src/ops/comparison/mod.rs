//! # Element-wise Comparison Operations
//!
//! Comparisons return `f32` masks holding `1.0` where the predicate holds and
//! `0.0` elsewhere, with the broadcast shape of the inputs. Masks can be fed
//! straight back into arithmetic or into [`where_op`].

use crate::error::SpikeGradError;
use crate::ops::broadcast::broadcast_map;
use crate::tensor::Tensor;

/// Element-wise `a >= b`, as a 1.0/0.0 mask.
pub fn ge_op(a: &Tensor, b: &Tensor) -> Result<Tensor, SpikeGradError> {
    broadcast_map(&[a, b], |v| if v[0] >= v[1] { 1.0 } else { 0.0 })
}

/// Selects `a` where `condition` is non-zero and `b` elsewhere.
///
/// All three operands are broadcast to a common shape.
pub fn where_op(condition: &Tensor, a: &Tensor, b: &Tensor) -> Result<Tensor, SpikeGradError> {
    broadcast_map(&[condition, a, b], |v| if v[0] != 0.0 { v[1] } else { v[2] })
}

#[cfg(test)]
#[path = "comparison_test.rs"]
mod tests;
