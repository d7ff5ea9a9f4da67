use crate::autograd::function::{expect_arity, expect_tracked_shape, ForwardOutput, Function, Input};
use crate::autograd::numeric_fn::NumericFn;
use crate::autograd::op_id::OpId;
use crate::autograd::record::OperationRecord;
use crate::error::SpikeGradError;
use crate::neuron::check_positive;
use crate::ops::{add_op, div_op, div_scalar};
use crate::tensor::Tensor;

/// Readout layer that averages its input drive over the simulation window.
///
/// Inputs are `(x, v_current)`; both outputs are `v_current + x / time_steps`.
/// The gradient is `upstream / time_steps`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputAccumulator {
    time_steps: f32,
}

impl OutputAccumulator {
    /// # Errors
    /// `InvalidParameter` if `time_steps` is zero.
    pub fn new(time_steps: usize) -> Result<Self, SpikeGradError> {
        let time_steps = time_steps as f32;
        check_positive("time_steps", time_steps)?;
        Ok(OutputAccumulator { time_steps })
    }

    pub fn time_steps(&self) -> f32 {
        self.time_steps
    }
}

impl Function for OutputAccumulator {
    fn name(&self) -> &'static str {
        "output_accumulator"
    }

    fn forward(&self, _ctx: &OperationRecord, inputs: &[Input]) -> Result<ForwardOutput, SpikeGradError> {
        expect_arity(self.name(), inputs, 2)?;
        let potential = add_op(inputs[1].value(), &div_scalar(inputs[0].value(), self.time_steps)?)?;
        expect_tracked_shape(self.name(), inputs, &potential.shape)?;

        Ok(ForwardOutput::stateful(
            NumericFn::closure("time_average", |upstream, args| match args {
                [time_steps] => div_op(upstream, time_steps),
                _ => Err(SpikeGradError::InternalError(format!(
                    "time_average expects 1 argument, got {}",
                    args.len()
                ))),
            }),
            vec![Tensor::scalar(self.time_steps)],
            potential.clone(),
            potential,
            OpId::Output,
        ))
    }
}
