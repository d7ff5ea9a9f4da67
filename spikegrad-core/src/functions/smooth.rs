use crate::autograd::dual::Dual;
use crate::autograd::function::{expect_arity, expect_tracked_shape, ForwardOutput, Function, Input};
use crate::autograd::numeric_fn::{ElementwiseRule, NumericFn};
use crate::autograd::op_id::OpId;
use crate::autograd::record::OperationRecord;
use crate::error::SpikeGradError;
use crate::ops::broadcast_map;
use std::fmt;
use std::sync::Arc;

/// A smooth elementwise operation with an automatically derived gradient.
///
/// `forward` maps one value per input to the output value. `rule` receives
/// `(upstream, input_0, input_1, ..)`; the gradient sent backward is its partial
/// derivative with respect to `upstream`. A rule that is linear in `upstream`
/// should therefore be written as its antiderivative, e.g. for `y = x^2` the rule
/// is `x * upstream^2`, whose derivative in `upstream` is `2 * x * upstream`.
///
/// Every parent receives the same local gradient, so multi-input functions
/// should only mark one of their inputs as requiring grad. Inputs may broadcast
/// against each other, but a gradient-tracked input must already have the
/// result's shape; `forward` rejects it with `ShapeMismatch` otherwise.
#[derive(Clone)]
pub struct SmoothFunction {
    name: &'static str,
    arity: usize,
    forward: Arc<ElementwiseRule>,
    rule: NumericFn,
}

impl SmoothFunction {
    pub fn new<F, G>(name: &'static str, arity: usize, forward: F, rule: G) -> Self
    where
        F: Fn(&[Dual]) -> Dual + Send + Sync + 'static,
        G: Fn(&[Dual]) -> Dual + Send + Sync + 'static,
    {
        SmoothFunction {
            name,
            arity,
            forward: Arc::new(forward),
            rule: NumericFn::elementwise(name, rule),
        }
    }

    /// `y = x^2`.
    pub fn square() -> Self {
        SmoothFunction::new("square", 1, |v| v[0] * v[0], |v| v[1] * v[0] * v[0])
    }

    /// `y = 1 / (1 + exp(-x))`.
    pub fn sigmoid() -> Self {
        SmoothFunction::new(
            "sigmoid",
            1,
            |v| v[0].sigmoid(),
            |v| {
                let s = v[1].sigmoid();
                v[0] * s * (1.0 - s)
            },
        )
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn rule(&self) -> &NumericFn {
        &self.rule
    }
}

impl Function for SmoothFunction {
    fn name(&self) -> &'static str {
        self.name
    }

    fn forward(&self, _ctx: &OperationRecord, inputs: &[Input]) -> Result<ForwardOutput, SpikeGradError> {
        expect_arity(self.name, inputs, self.arity)?;
        let values: Vec<_> = inputs.iter().map(Input::value).collect();

        let forward = &self.forward;
        let output = broadcast_map(&values, |v| {
            let duals: Vec<Dual> = v.iter().map(|&x| Dual::constant(x)).collect();
            forward(&duals).value()
        })?;
        expect_tracked_shape(self.name, inputs, &output.shape)?;

        Ok(ForwardOutput::single(
            self.rule.clone(),
            values.into_iter().cloned().collect(),
            output,
            OpId::Generic,
        ))
    }
}

impl fmt::Debug for SmoothFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmoothFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autograd::Variable;
    use crate::utils::testing::{check_tensor_near, create_test_tensor};

    /// `w * x`, differentiated with respect to `w`.
    fn weighted() -> SmoothFunction {
        SmoothFunction::new("weighted", 2, |v| v[0] * v[1], |v| v[0] * v[0] * 0.5 * v[2])
    }

    #[test]
    fn test_tracked_input_must_not_broadcast() {
        let w = Variable::with_grad(create_test_tensor(vec![1.0, 2.0, 3.0], vec![3]));
        let x = create_test_tensor(vec![1.0; 6], vec![2, 3]);
        let err = weighted().apply(&[(&w).into(), x.into()]).unwrap_err();
        assert_eq!(
            err,
            SpikeGradError::ShapeMismatch {
                expected: vec![2, 3],
                actual: vec![3],
                operation: "weighted (tracked input 0)".to_string(),
            }
        );
    }

    #[test]
    fn test_untracked_input_broadcasts() {
        let w = Variable::with_grad(create_test_tensor(vec![1.0; 6], vec![2, 3]));
        let x = create_test_tensor(vec![1.0, 2.0, 3.0], vec![3]);
        let out = weighted().apply(&[(&w).into(), x.into()]).unwrap().output;
        check_tensor_near(out.value(), &[2, 3], &[1.0, 2.0, 3.0, 1.0, 2.0, 3.0], 0.0);

        out.backward(Some(create_test_tensor(vec![1.0; 6], vec![2, 3]))).unwrap();
        check_tensor_near(&w.grad().unwrap(), &[2, 3], &[1.0, 2.0, 3.0, 1.0, 2.0, 3.0], 1e-6);
    }

    #[test]
    fn test_untracked_variable_may_broadcast() {
        let w = Variable::new(create_test_tensor(vec![1.0, 2.0, 3.0], vec![3]), false);
        let x = create_test_tensor(vec![2.0; 6], vec![2, 3]);
        let out = weighted().apply(&[(&w).into(), x.into()]).unwrap().output;
        assert_eq!(out.shape(), vec![2, 3]);
    }
}
