use crate::autograd::function::{expect_arity, expect_tracked_shape, ForwardOutput, Function, Input};
use crate::autograd::numeric_fn::NumericFn;
use crate::autograd::op_id::OpId;
use crate::autograd::record::OperationRecord;
use crate::error::SpikeGradError;
use crate::neuron::{check_positive, NeuronModel};
use crate::ops::broadcast_map;
use crate::tensor::Tensor;

/// Steepness of the fast-sigmoid surrogate used when none is configured.
pub const DEFAULT_SURROGATE_SLOPE: f32 = 5.0;

/// One time step of a spiking neuron, as a differentiable operation.
///
/// Inputs are `(x, v_current)`. The primary output is the spike tensor, the state
/// output the membrane potential after reset, and the spikes are exposed again as
/// the third output of [`Function::apply`].
///
/// The spike threshold has a zero derivative almost everywhere, so backward uses
/// a fast-sigmoid surrogate centred on the firing threshold:
///
/// ```text
/// grad = upstream * input_gain / (1 + slope * |pre_reset - v_threshold|)^2
/// ```
#[derive(Debug, Clone)]
pub struct SpikingNeuron<M: NeuronModel> {
    model: M,
    slope: f32,
}

impl<M: NeuronModel> SpikingNeuron<M> {
    pub fn new(model: M) -> Self {
        SpikingNeuron {
            model,
            slope: DEFAULT_SURROGATE_SLOPE,
        }
    }

    /// Replaces the surrogate slope.
    ///
    /// # Errors
    /// `InvalidParameter` unless `slope` is finite and strictly positive.
    pub fn with_slope(mut self, slope: f32) -> Result<Self, SpikeGradError> {
        check_positive("slope", slope)?;
        self.slope = slope;
        Ok(self)
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn slope(&self) -> f32 {
        self.slope
    }
}

impl<M: NeuronModel> Function for SpikingNeuron<M> {
    fn name(&self) -> &'static str {
        "spiking_neuron"
    }

    fn forward(&self, _ctx: &OperationRecord, inputs: &[Input]) -> Result<ForwardOutput, SpikeGradError> {
        expect_arity(self.name(), inputs, 2)?;
        let step = self.model.step(inputs[0].value(), inputs[1].value())?;
        expect_tracked_shape(self.name(), inputs, &step.spikes.shape)?;

        let rule_args = vec![
            step.spikes.clone(),
            step.pre_reset,
            Tensor::scalar(self.model.v_threshold()),
            Tensor::scalar(self.model.input_gain()),
            Tensor::scalar(self.slope),
        ];
        Ok(ForwardOutput::stateful(
            NumericFn::closure("fast_sigmoid_surrogate", fast_sigmoid_surrogate),
            rule_args,
            step.spikes,
            step.potential,
            OpId::Lif,
        ))
    }
}

/// `args = [spikes, pre_reset, v_threshold, input_gain, slope]`.
fn fast_sigmoid_surrogate(upstream: &Tensor, args: &[Tensor]) -> Result<Tensor, SpikeGradError> {
    let [_spikes, pre_reset, v_threshold, gain, slope] = args else {
        return Err(SpikeGradError::InternalError(format!(
            "fast_sigmoid_surrogate expects 5 arguments, got {}",
            args.len()
        )));
    };
    broadcast_map(&[upstream, pre_reset, v_threshold, gain, slope], |v| {
        let denom = 1.0 + v[4] * (v[1] - v[2]).abs();
        v[0] * v[3] / (denom * denom)
    })
}

#[cfg(test)]
#[path = "spiking_neuron_test.rs"]
mod tests;
