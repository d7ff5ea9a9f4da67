use crate::autograd::variable::Variable;
use crate::error::SpikeGradError;
use crate::ops::{mul_op, sum_all};
use crate::tensor::Tensor;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: Analytical grad {analytical_grad:?} != Numerical grad {numerical_grad:?}. Difference: {difference:?}")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(SpikeGradError),
    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(SpikeGradError),
    #[error("Tensor error during intermediate calculation: {0}")]
    TensorError(SpikeGradError),
    #[error("Input {input_index} requires grad but has no gradient after backward pass.")]
    MissingAnalyticalGrad { input_index: usize },
    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index}. Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Analytical gradient is NaN or infinite for input {input_index}, element {element_index}. Value: {value:?}")]
    AnalyticalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        value: f64,
    },
    #[error("Gradient check input must be a leaf variable. Input index: {input_index}")]
    InputNotLeaf { input_index: usize },
}

impl From<SpikeGradError> for GradCheckError {
    fn from(err: SpikeGradError) -> Self {
        GradCheckError::TensorError(err)
    }
}

/// Checks analytical gradients against numerical gradients using central
/// finite differences.
///
/// The scalar loss is `sum(func(inputs) * output_grad)`. Gradients are computed on
/// fresh leaf copies of `inputs`, so the callers' variables are left untouched.
/// Only meaningful for smooth graphs: surrogate rules deliberately disagree with
/// the true (zero almost everywhere) derivative of a spike threshold.
pub fn check_grad<F>(
    func: F,
    inputs: &[Variable],
    output_grad: &Tensor,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Variable]) -> Result<Variable, SpikeGradError>,
{
    for (i, input) in inputs.iter().enumerate() {
        if !input.is_leaf() {
            return Err(GradCheckError::InputNotLeaf { input_index: i });
        }
    }

    let leaves: Vec<Variable> = inputs
        .iter()
        .map(|v| Variable::new(v.value().clone(), v.requires_grad()))
        .collect();

    let output = func(&leaves).map_err(GradCheckError::ForwardPassError)?;
    output
        .backward(Some(output_grad.clone()))
        .map_err(GradCheckError::BackwardPassError)?;

    for (i, leaf) in leaves.iter().enumerate() {
        if !leaf.requires_grad() {
            continue;
        }
        let analytical: Vec<f64> = leaf
            .grad()
            .ok_or(GradCheckError::MissingAnalyticalGrad { input_index: i })?
            .data()
            .iter()
            .map(|&x| f64::from(x))
            .collect();
        let original: Vec<f64> = leaf.value().data().iter().map(|&x| f64::from(x)).collect();

        for elem_idx in 0..original.len() {
            let loss_plus = perturbed_loss(&func, &leaves, i, &original, elem_idx, epsilon, output_grad)?;
            let loss_minus = perturbed_loss(&func, &leaves, i, &original, elem_idx, -epsilon, output_grad)?;
            let numerical_grad = (loss_plus - loss_minus) / (2.0 * epsilon);
            let analytical_grad = analytical[elem_idx];

            if !numerical_grad.is_finite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    input_index: i,
                    element_index: elem_idx,
                    loss_plus,
                    loss_minus,
                });
            }
            if !analytical_grad.is_finite() {
                return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                    input_index: i,
                    element_index: elem_idx,
                    value: analytical_grad,
                });
            }

            let difference = (analytical_grad - numerical_grad).abs();
            if difference > tolerance && difference / (analytical_grad.abs() + epsilon) > tolerance {
                return Err(GradCheckError::GradientMismatch {
                    input_index: i,
                    element_index: elem_idx,
                    analytical_grad,
                    numerical_grad,
                    difference,
                });
            }
        }
    }

    Ok(())
}

fn perturbed_loss<F>(
    func: &F,
    leaves: &[Variable],
    input_index: usize,
    original: &[f64],
    elem_idx: usize,
    delta: f64,
    output_grad: &Tensor,
) -> Result<f64, GradCheckError>
where
    F: Fn(&[Variable]) -> Result<Variable, SpikeGradError>,
{
    let mut data = original.to_vec();
    data[elem_idx] += delta;
    let perturbed = Tensor::new(
        data.iter().map(|&x| x as f32).collect(),
        leaves[input_index].shape(),
    )?;

    let mut shifted: Vec<Variable> = leaves.iter().map(Variable::detach).collect();
    shifted[input_index] = Variable::new(perturbed, false);

    let output = func(&shifted).map_err(GradCheckError::ForwardPassError)?;
    calculate_loss(output.value(), output_grad)
}

/// `sum(output * output_grad)` as `f64`.
fn calculate_loss(output: &Tensor, output_grad: &Tensor) -> Result<f64, GradCheckError> {
    if output.shape() != output_grad.shape() {
        return Err(GradCheckError::TensorError(SpikeGradError::ShapeMismatch {
            expected: output.shape(),
            actual: output_grad.shape(),
            operation: "calculate_loss (grad_check)".to_string(),
        }));
    }
    let loss = sum_all(&mul_op(output, output_grad)?)?;
    Ok(f64::from(loss.item()?))
}
