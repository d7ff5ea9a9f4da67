use crate::autograd::function::{expect_arity, ForwardOutput, Function, Input};
use crate::autograd::numeric_fn::NumericFn;
use crate::autograd::op_id::OpId;
use crate::autograd::record::OperationRecord;
use crate::error::SpikeGradError;
use crate::ops::{div_op, mul_op, mul_scalar, sub_op, sum_all, tile_batch_target};

/// Squared error between predicted spike trains and per-sample targets.
///
/// Inputs are `(predicted, target, scale)` with `predicted` shaped `[B, T, ..]`
/// and `target` shaped `[B]` (or already shaped like `predicted`):
///
/// ```text
/// loss = sum((predicted - broadcast(target))^2) / (2 * scale)
/// ```
///
/// The gradient is computed in closed form from the saved arguments, see
/// [`spike_loss_grad`](crate::autograd::spike_loss_grad). The loss is meant to
/// be the root of a backward pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpikeCountLoss;

impl SpikeCountLoss {
    pub fn new() -> Self {
        SpikeCountLoss
    }
}

impl Function for SpikeCountLoss {
    fn name(&self) -> &'static str {
        "spike_count_loss"
    }

    fn forward(&self, _ctx: &OperationRecord, inputs: &[Input]) -> Result<ForwardOutput, SpikeGradError> {
        expect_arity(self.name(), inputs, 3)?;
        let predicted = inputs[0].value();
        let target = inputs[1].value();
        let scale = inputs[2].value();

        let diff = sub_op(predicted, &tile_batch_target(target, predicted)?)?;
        let loss = div_op(&sum_all(&mul_op(&diff, &diff)?)?, &mul_scalar(scale, 2.0)?)?;

        Ok(ForwardOutput::single(
            NumericFn::Absent,
            vec![predicted.clone(), target.clone(), scale.clone()],
            loss,
            OpId::SpikeLoss,
        ))
    }
}
