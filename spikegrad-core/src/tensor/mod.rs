// src/tensor/mod.rs

use crate::error::SpikeGradError;
use std::sync::Arc;

pub mod create;
mod debug;
pub mod utils;

pub use create::{full, ones, ones_like, rand, rand_seeded, randn, randn_seeded, zeros, zeros_like};

/// A dense, contiguous, row-major array of `f32` values.
///
/// `Tensor` is the numeric value type flowing through the autograd graph. It carries
/// no graph metadata of its own: gradient tracking lives on [`Variable`](crate::autograd::Variable).
///
/// The buffer is held in an `Arc`, so clones are cheap and never copy the data.
/// Tensors are immutable; every operation produces a new tensor.
#[derive(Clone, PartialEq)]
pub struct Tensor {
    pub(crate) data: Arc<Vec<f32>>,
    pub(crate) shape: Vec<usize>,
}

impl Tensor {
    /// Creates a new Tensor from row-major `f32` data and a shape.
    ///
    /// # Errors
    /// Returns `SpikeGradError::TensorCreationError` if the length of `data_vec` does not
    /// match the number of elements described by `shape`.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, SpikeGradError> {
        let numel: usize = shape.iter().product();
        if data_vec.len() != numel {
            return Err(SpikeGradError::TensorCreationError {
                data_len: data_vec.len(),
                shape,
            });
        }
        Ok(Tensor {
            data: Arc::new(data_vec),
            shape,
        })
    }

    /// Creates a 0-dimensional tensor holding a single value.
    pub fn scalar(value: f32) -> Self {
        Tensor {
            data: Arc::new(vec![value]),
            shape: vec![],
        }
    }

    /// Returns a clone of the tensor's shape.
    pub fn shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    /// Returns the number of dimensions.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Returns the number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Borrows the underlying row-major data.
    pub fn data(&self) -> &[f32] {
        self.data.as_slice()
    }

    /// Returns an owned copy of the tensor data.
    pub fn get_f32_data(&self) -> Result<Vec<f32>, SpikeGradError> {
        Ok(self.data.as_ref().clone())
    }

    /// Returns the single value of a one-element tensor.
    pub fn item(&self) -> Result<f32, SpikeGradError> {
        match self.data.as_slice() {
            [value] => Ok(*value),
            _ => Err(SpikeGradError::ShapeMismatch {
                expected: vec![],
                actual: self.shape.clone(),
                operation: "item".to_string(),
            }),
        }
    }
}
