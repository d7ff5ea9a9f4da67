// src/autograd/backward_op.rs

use crate::autograd::op_id::OpId;
use crate::autograd::record::OperationRecord;
use crate::error::SpikeGradError;
use crate::ops::{div_op, sub_op, tile_batch_target};
use crate::tensor::Tensor;

impl OperationRecord {
    /// Computes this record's local gradient from the upstream gradient.
    ///
    /// The rule is selected by the record's tag:
    ///
    /// * `SpikeLoss`: `(predicted - broadcast(target)) / scale`, with
    ///   `rule_args = [predicted, target, scale]`. The upstream gradient is
    ///   ignored; the loss is expected to be the root of the graph.
    /// * `Output`, `Lif`: the stored hand-authored rule evaluated at
    ///   `(upstream, *rule_args)`. For `Lif` this is a surrogate for the spike
    ///   threshold, whose true derivative is zero almost everywhere.
    /// * `Generic`: the stored rule is differentiated with respect to its first
    ///   operand and the derivative evaluated at `(upstream, *rule_args)`.
    ///
    /// # Errors
    /// `MissingGradRule` when the tag needs a rule or arguments the record lacks,
    /// `NotDifferentiable` when a `Generic` record stores a non-elementwise rule,
    /// plus any shape error from the numeric backend.
    pub fn backward(&self, upstream: &Tensor) -> Result<Tensor, SpikeGradError> {
        log::trace!(
            "dispatch record #{} ({}) tag={} upstream={:?}",
            self.id,
            self.function_name,
            self.tag,
            upstream.shape()
        );
        match self.tag {
            OpId::SpikeLoss => {
                let [predicted, target, scale] = self.rule_args.as_slice() else {
                    return Err(self.missing_rule());
                };
                spike_loss_grad(predicted, target, scale)
            }
            OpId::Output | OpId::Lif => {
                if self.rule.is_absent() {
                    return Err(self.missing_rule());
                }
                self.rule.call(upstream, &self.rule_args)
            }
            OpId::Generic => self.rule.grad()?.call(upstream, &self.rule_args),
        }
    }

    fn missing_rule(&self) -> SpikeGradError {
        SpikeGradError::MissingGradRule {
            function: self.function_name.to_string(),
            tag: self.tag.to_string(),
        }
    }
}

/// Closed-form spike-count loss gradient.
///
/// `target` holds one value per sample (`[B]`) and is repeated across the
/// trailing dimensions of `predicted` (`[B, T, ..]`).
pub fn spike_loss_grad(
    predicted: &Tensor,
    target: &Tensor,
    scale: &Tensor,
) -> Result<Tensor, SpikeGradError> {
    let tiled = tile_batch_target(target, predicted)?;
    div_op(&sub_op(predicted, &tiled)?, scale)
}

#[cfg(test)]
#[path = "backward_op_test.rs"]
mod tests;
