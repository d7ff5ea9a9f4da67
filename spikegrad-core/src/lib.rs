//! Reverse-mode automatic differentiation for spiking neural networks.
//!
//! Operations implement [`Function`]; calling [`Function::apply`] records one
//! operation per call and wires it to its inputs. [`Variable::backward`] walks
//! the recorded graph and accumulates gradients into the leaves, using surrogate
//! rules where the forward pass is a hard spike threshold.

pub mod autograd;
pub mod error;
pub mod functions;
pub mod neuron;
pub mod ops;
pub mod tensor;
pub mod utils;

pub use autograd::{Function, Input, OpId, Variable};
pub use error::SpikeGradError;
pub use tensor::Tensor;
// Re-export traits required by public functions/structs
pub use num_traits;
