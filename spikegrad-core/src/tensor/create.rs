// src/tensor/create.rs

use crate::error::SpikeGradError;
use crate::tensor::Tensor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Creates a new tensor filled with zeros with the specified shape.
pub fn zeros(shape: &[usize]) -> Result<Tensor, SpikeGradError> {
    full(shape, 0.0)
}

/// Creates a new tensor filled with ones with the specified shape.
pub fn ones(shape: &[usize]) -> Result<Tensor, SpikeGradError> {
    full(shape, 1.0)
}

/// Creates a new tensor filled with a specific value with the specified shape.
pub fn full(shape: &[usize], value: f32) -> Result<Tensor, SpikeGradError> {
    let numel = shape.iter().product();
    Tensor::new(vec![value; numel], shape.to_vec())
}

/// Creates a new tensor filled with zeros, having the same shape as the input tensor.
pub fn zeros_like(tensor: &Tensor) -> Result<Tensor, SpikeGradError> {
    zeros(&tensor.shape)
}

/// Creates a new tensor filled with ones, having the same shape as the input tensor.
pub fn ones_like(tensor: &Tensor) -> Result<Tensor, SpikeGradError> {
    ones(&tensor.shape)
}

// Note: rand and randn draw from the thread-local generator; the seeded
// variants exist for reproducible tests and demos.

/// Creates a tensor with values drawn uniformly from `[0, 1)`.
pub fn rand(shape: &[usize]) -> Result<Tensor, SpikeGradError> {
    let mut rng = rand::thread_rng();
    sample_uniform(&mut rng, shape)
}

/// Creates a tensor with values drawn from the standard normal distribution.
pub fn randn(shape: &[usize]) -> Result<Tensor, SpikeGradError> {
    let mut rng = rand::thread_rng();
    sample_normal(&mut rng, shape)
}

/// Like [`rand`], but driven by a `StdRng` seeded with `seed`.
pub fn rand_seeded(shape: &[usize], seed: u64) -> Result<Tensor, SpikeGradError> {
    let mut rng = StdRng::seed_from_u64(seed);
    sample_uniform(&mut rng, shape)
}

/// Like [`randn`], but driven by a `StdRng` seeded with `seed`.
pub fn randn_seeded(shape: &[usize], seed: u64) -> Result<Tensor, SpikeGradError> {
    let mut rng = StdRng::seed_from_u64(seed);
    sample_normal(&mut rng, shape)
}

fn sample_uniform<R: Rng + ?Sized>(rng: &mut R, shape: &[usize]) -> Result<Tensor, SpikeGradError> {
    let numel: usize = shape.iter().product();
    let data_vec: Vec<f32> = (0..numel).map(|_| rng.gen::<f32>()).collect();
    Tensor::new(data_vec, shape.to_vec())
}

fn sample_normal<R: Rng + ?Sized>(rng: &mut R, shape: &[usize]) -> Result<Tensor, SpikeGradError> {
    let numel: usize = shape.iter().product();
    let data_vec: Vec<f32> = (0..numel).map(|_| StandardNormal.sample(rng)).collect();
    Tensor::new(data_vec, shape.to_vec())
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
