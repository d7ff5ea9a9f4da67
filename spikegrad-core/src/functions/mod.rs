//! # Differentiable operations
//!
//! Concrete [`Function`](crate::autograd::Function) implementations, one per
//! gradient-rule tag:
//!
//! - [`SpikingNeuron`] (`LIF`): one neuron time step with a surrogate gradient.
//! - [`OutputAccumulator`] (`output`): time-averaged readout potential.
//! - [`SpikeCountLoss`] (`Spikeloss`): squared error between spike trains and targets.
//! - [`SmoothFunction`] (`generic`): any smooth elementwise function whose gradient
//!   is derived automatically from its rule.

pub mod output_accumulator;
pub mod smooth;
pub mod spike_count_loss;
pub mod spiking_neuron;

pub use output_accumulator::OutputAccumulator;
pub use smooth::SmoothFunction;
pub use spike_count_loss::SpikeCountLoss;
pub use spiking_neuron::{SpikingNeuron, DEFAULT_SURROGATE_SLOPE};
