//! Element-wise arithmetic with broadcasting.

use crate::error::SpikeGradError;
use crate::ops::broadcast::broadcast_map;
use crate::tensor::Tensor;

/// Element-wise `a + b` with broadcasting.
pub fn add_op(a: &Tensor, b: &Tensor) -> Result<Tensor, SpikeGradError> {
    broadcast_map(&[a, b], |v| v[0] + v[1])
}

/// Element-wise `a - b` with broadcasting.
pub fn sub_op(a: &Tensor, b: &Tensor) -> Result<Tensor, SpikeGradError> {
    broadcast_map(&[a, b], |v| v[0] - v[1])
}

/// Element-wise `a * b` with broadcasting.
pub fn mul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, SpikeGradError> {
    broadcast_map(&[a, b], |v| v[0] * v[1])
}

/// Element-wise `a / b` with broadcasting. Division by zero follows IEEE-754.
pub fn div_op(a: &Tensor, b: &Tensor) -> Result<Tensor, SpikeGradError> {
    broadcast_map(&[a, b], |v| v[0] / v[1])
}

pub fn add_scalar(a: &Tensor, scalar: f32) -> Result<Tensor, SpikeGradError> {
    map_op(a, |x| x + scalar)
}

pub fn mul_scalar(a: &Tensor, scalar: f32) -> Result<Tensor, SpikeGradError> {
    map_op(a, |x| x * scalar)
}

pub fn div_scalar(a: &Tensor, scalar: f32) -> Result<Tensor, SpikeGradError> {
    map_op(a, |x| x / scalar)
}

/// Applies a unary function to every element.
pub fn map_op<F>(a: &Tensor, f: F) -> Result<Tensor, SpikeGradError>
where
    F: Fn(f32) -> f32,
{
    let data: Vec<f32> = a.data().iter().map(|&x| f(x)).collect();
    Tensor::new(data, a.shape())
}

#[cfg(test)]
#[path = "arithmetic_test.rs"]
mod tests;
