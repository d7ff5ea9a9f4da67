// src/autograd/function.rs

use crate::autograd::numeric_fn::NumericFn;
use crate::autograd::op_id::OpId;
use crate::autograd::record::OperationRecord;
use crate::autograd::variable::Variable;
use crate::error::SpikeGradError;
use crate::tensor::Tensor;
use std::sync::Arc;

/// A positional argument to [`Function::apply`]: a tracked variable or a plain value.
#[derive(Debug, Clone)]
pub enum Input {
    Variable(Variable),
    Value(Tensor),
}

impl Input {
    /// The numeric value, whichever kind of input this is.
    pub fn value(&self) -> &Tensor {
        match self {
            Input::Variable(var) => var.value(),
            Input::Value(tensor) => tensor,
        }
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Input::Variable(var) => Some(var),
            Input::Value(_) => None,
        }
    }
}

impl From<Variable> for Input {
    fn from(var: Variable) -> Self {
        Input::Variable(var)
    }
}

impl From<&Variable> for Input {
    fn from(var: &Variable) -> Self {
        Input::Variable(var.clone())
    }
}

impl From<Tensor> for Input {
    fn from(tensor: Tensor) -> Self {
        Input::Value(tensor)
    }
}

impl From<f32> for Input {
    fn from(value: f32) -> Self {
        Input::Value(Tensor::scalar(value))
    }
}

/// What a forward computation hands back to [`Function::apply`].
///
/// `state` must be present exactly when `tag.has_state()` (`Output` and `Lif`).
#[derive(Debug, Clone)]
pub struct ForwardOutput {
    pub rule: NumericFn,
    pub rule_args: Vec<Tensor>,
    pub output: Tensor,
    pub state: Option<Tensor>,
    pub tag: OpId,
}

impl ForwardOutput {
    /// Result shape for `SpikeLoss` and `Generic` operations.
    pub fn single(rule: NumericFn, rule_args: Vec<Tensor>, output: Tensor, tag: OpId) -> Self {
        ForwardOutput {
            rule,
            rule_args,
            output,
            state: None,
            tag,
        }
    }

    /// Result shape for `Output` and `Lif` operations.
    pub fn stateful(
        rule: NumericFn,
        rule_args: Vec<Tensor>,
        output: Tensor,
        state: Tensor,
        tag: OpId,
    ) -> Self {
        ForwardOutput {
            rule,
            rule_args,
            output,
            state: Some(state),
            tag,
        }
    }
}

/// The variables produced by one application.
#[derive(Debug, Clone)]
pub struct FunctionOutputs {
    /// Primary result.
    pub output: Variable,
    /// Secondary state (e.g. updated membrane potential) for `Output`/`Lif` operations.
    pub state: Option<Variable>,
    /// For `Lif` operations, the first gradient-rule argument (the spike tensor).
    pub spikes: Option<Variable>,
}

/// A differentiable operation.
///
/// Implementing this trait is the registration step: a type without a `forward`
/// does not compile, and every implementor gets a fresh [`OperationRecord`] per
/// call to [`apply`](Function::apply).
///
/// The gradient rule returned by `forward` is dispatched on its tag (see
/// [`OperationRecord::backward`]). For `OpId::Generic` the rule must be an
/// elementwise [`NumericFn`]; the gradient sent to the parents is its derivative
/// with respect to the first operand, evaluated at `(upstream, *rule_args)`.
pub trait Function {
    /// Name recorded on every operation record this function creates.
    fn name(&self) -> &'static str;

    /// Computes the numeric result and the gradient context.
    ///
    /// `ctx` is the record of this particular application; it is wired to the
    /// inputs after `forward` returns.
    fn forward(&self, ctx: &OperationRecord, inputs: &[Input]) -> Result<ForwardOutput, SpikeGradError>;

    /// Runs `forward`, wires a new record into the graph and wraps the results
    /// into variables that require grad and are produced by that record.
    fn apply(&self, inputs: &[Input]) -> Result<FunctionOutputs, SpikeGradError> {
        let mut record = OperationRecord::new(self.name());
        log::debug!("apply {} (record #{}) with {} inputs", self.name(), record.id, inputs.len());

        let ForwardOutput {
            rule,
            rule_args,
            output,
            state,
            tag,
        } = self.forward(&record, inputs)?;

        if tag.has_state() != state.is_some() {
            return Err(SpikeGradError::ForwardOutputMismatch {
                function: self.name().to_string(),
                tag: tag.to_string(),
                reason: if tag.has_state() {
                    "missing secondary state".to_string()
                } else {
                    "unexpected secondary state".to_string()
                },
            });
        }
        let exposed = match tag {
            OpId::Lif => Some(rule_args.first().cloned().ok_or_else(|| {
                SpikeGradError::ForwardOutputMismatch {
                    function: self.name().to_string(),
                    tag: tag.to_string(),
                    reason: "LIF gradient rule has no arguments to expose".to_string(),
                }
            })?),
            _ => None,
        };

        record.setup(rule, rule_args, tag, inputs);
        let record = Arc::new(record);

        let wrap = |value: Tensor| Variable::from_parts(value, true, Some(Arc::clone(&record)), Some(tag));
        Ok(FunctionOutputs {
            output: wrap(output),
            state: state.map(wrap),
            spikes: exposed.map(wrap),
        })
    }
}

/// Checks the number of positional inputs a forward received.
pub fn expect_arity(name: &str, inputs: &[Input], expected: usize) -> Result<(), SpikeGradError> {
    if inputs.len() != expected {
        return Err(SpikeGradError::ArityMismatch {
            function: name.to_string(),
            expected,
            actual: inputs.len(),
        });
    }
    Ok(())
}

/// Checks that every gradient-tracked input already has the result's shape.
///
/// Local gradients are produced at the result's shape and are never reduced
/// back, so only untracked inputs and plain values may broadcast.
pub fn expect_tracked_shape(name: &str, inputs: &[Input], shape: &[usize]) -> Result<(), SpikeGradError> {
    for (position, input) in inputs.iter().enumerate() {
        let Some(var) = input.as_variable() else {
            continue;
        };
        if var.requires_grad() && var.value().shape != shape {
            return Err(SpikeGradError::ShapeMismatch {
                expected: shape.to_vec(),
                actual: var.shape(),
                operation: format!("{} (tracked input {})", name, position),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "function_test.rs"]
mod tests;
