//! # Neuron transition models
//!
//! Integrate-and-fire dynamics producing spikes and the updated membrane
//! potential for one time step. The models are pure: all state is passed in
//! (`v_current`) and returned.
//!
//! Spike emission compares the integrated potential against the rest potential
//! `v_rest`, while reset compares it against `v_threshold`. Both comparisons are
//! kept as they are; surrogate gradients downstream are tuned to these outputs.

mod integrate_fire;
mod leaky_integrate_fire;
mod params;

pub use integrate_fire::IntegrateAndFire;
pub use leaky_integrate_fire::LeakyIntegrateAndFire;
pub use params::{IfParams, LifParams};
pub(crate) use params::check_positive;

use crate::error::SpikeGradError;
use crate::ops::{add_op, ge_op, where_op};
use crate::tensor::Tensor;

/// Result of one neuron time step.
#[derive(Debug, Clone, PartialEq)]
pub struct NeuronStep {
    /// 1.0 where the neuron fired, 0.0 elsewhere.
    pub spikes: Tensor,
    /// Membrane potential after reset, to be fed into the next step.
    pub potential: Tensor,
    /// Membrane potential after integration, before reset.
    pub pre_reset: Tensor,
}

/// A single-step neuron state transition.
pub trait NeuronModel {
    fn v_rest(&self) -> f32;
    fn v_threshold(&self) -> f32;

    /// The potential increment produced by input drive `x`.
    fn delta(&self, x: &Tensor) -> Result<Tensor, SpikeGradError>;

    /// `d(pre_reset)/dx`: how strongly the input drive moves the potential.
    fn input_gain(&self) -> f32;

    /// Integrates `x` into `v_current`, emits spikes and applies the reset.
    fn step(&self, x: &Tensor, v_current: &Tensor) -> Result<NeuronStep, SpikeGradError> {
        let pre_reset = add_op(v_current, &self.delta(x)?)?;
        let v_rest = Tensor::scalar(self.v_rest());
        let spikes = ge_op(&pre_reset, &v_rest)?;
        let fired = ge_op(&pre_reset, &Tensor::scalar(self.v_threshold()))?;
        let potential = where_op(&fired, &v_rest, &pre_reset)?;
        Ok(NeuronStep {
            spikes,
            potential,
            pre_reset,
        })
    }
}

#[cfg(test)]
#[path = "neuron_test.rs"]
mod tests;
