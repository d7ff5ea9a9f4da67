//! # Surrogate gradients through a leaky integrate-and-fire layer
//!
//! Drives a small LIF layer with a learnable per-neuron input gain, reads out
//! the firing rate over a few time steps and fits it to a per-sample target with
//! plain gradient descent. The spike threshold is not differentiable; the
//! gradient reaching the gains comes from the fast-sigmoid surrogate.
//!
//! ## Running
//! `RUST_LOG=debug cargo run --example lif_surrogate_demo`

use spikegrad_core::functions::{OutputAccumulator, SmoothFunction, SpikeCountLoss, SpikingNeuron};
use spikegrad_core::neuron::{LeakyIntegrateAndFire, LifParams};
use spikegrad_core::ops::{mul_scalar, sub_op};
use spikegrad_core::tensor::{rand_seeded, zeros};
use spikegrad_core::{Function, SpikeGradError, Tensor, Variable};

const TIME_STEPS: usize = 8;
const EPOCHS: usize = 20;
const LEARNING_RATE: f32 = 0.5;

fn main() -> Result<(), SpikeGradError> {
    env_logger::init();

    let params = LifParams::new(2.0, 0.0, 1.0, 1.0)?;
    let neuron = SpikingNeuron::new(LeakyIntegrateAndFire::new(params)).with_slope(2.0)?;
    let readout = OutputAccumulator::new(TIME_STEPS)?;
    // w * x, differentiated with respect to w.
    let gain = SmoothFunction::new("input_gain", 2, |v| v[0] * v[1], |v| v[0] * v[0] * 0.5 * v[2]);

    // Batch of 4 samples, 3 neurons each.
    let inputs = rand_seeded(&[4, 3], 42)?;
    let target = Tensor::new(vec![1.0, 0.0, 1.0, 0.0], vec![4])?;
    let mut weights = Variable::with_grad(rand_seeded(&[4, 3], 7)?);

    for epoch in 0..EPOCHS {
        let drive = gain.apply(&[(&weights).into(), inputs.clone().into()])?.output;
        let mut potential = Variable::new(zeros(&[4, 3])?, false);
        let mut rate = Variable::new(zeros(&[4, 3])?, false);
        let mut spike_count = 0.0;

        for _ in 0..TIME_STEPS {
            let step = neuron.apply(&[(&drive).into(), potential.into()])?;
            spike_count += step.output.value().data().iter().sum::<f32>();
            potential = step.state.ok_or_else(|| {
                SpikeGradError::InternalError("LIF step returned no state".to_string())
            })?;
            rate = readout.apply(&[step.output.into(), rate.into()])?.output;
        }

        let loss = SpikeCountLoss::new()
            .apply(&[rate.into(), target.clone().into(), Tensor::scalar(4.0).into()])?
            .output;
        loss.backward(None)?;

        let grad = weights
            .grad()
            .ok_or_else(|| SpikeGradError::InternalError("weights received no gradient".to_string()))?;
        println!(
            "epoch {:2}: loss = {:.4}, spikes = {}",
            epoch,
            loss.value().item()?,
            spike_count
        );

        weights = Variable::with_grad(sub_op(weights.value(), &mul_scalar(&grad, LEARNING_RATE)?)?);
    }

    println!("final weights: {:?}", weights.value());
    Ok(())
}
