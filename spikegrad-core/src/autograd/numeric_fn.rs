use crate::autograd::dual::Dual;
use crate::error::SpikeGradError;
use crate::ops::broadcast::broadcast_map;
use crate::tensor::Tensor;
use std::fmt;
use std::sync::Arc;

/// Tensor-level rule: `(upstream, args) -> gradient`.
pub type ClosureRule = dyn Fn(&Tensor, &[Tensor]) -> Result<Tensor, SpikeGradError> + Send + Sync;

/// Scalar rule over dual numbers, applied elementwise after broadcasting.
pub type ElementwiseRule = dyn Fn(&[Dual]) -> Dual + Send + Sync;

/// The numeric function an operation record stores for gradient evaluation.
///
/// Operands are always `(upstream, args[0], args[1], ..)`.
#[derive(Clone)]
pub enum NumericFn {
    /// No function; the record's gradient is closed-form over its args.
    Absent,
    /// Hand-authored tensor rule, evaluated directly.
    Closure { name: &'static str, rule: Arc<ClosureRule> },
    /// Smooth scalar rule. Can be evaluated and differentiated.
    Elementwise { name: &'static str, rule: Arc<ElementwiseRule> },
}

impl NumericFn {
    pub fn closure<F>(name: &'static str, rule: F) -> Self
    where
        F: Fn(&Tensor, &[Tensor]) -> Result<Tensor, SpikeGradError> + Send + Sync + 'static,
    {
        NumericFn::Closure {
            name,
            rule: Arc::new(rule),
        }
    }

    pub fn elementwise<F>(name: &'static str, rule: F) -> Self
    where
        F: Fn(&[Dual]) -> Dual + Send + Sync + 'static,
    {
        NumericFn::Elementwise {
            name,
            rule: Arc::new(rule),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NumericFn::Absent => "absent",
            NumericFn::Closure { name, .. } | NumericFn::Elementwise { name, .. } => *name,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, NumericFn::Absent)
    }

    /// Evaluates the function at `(upstream, *args)`.
    ///
    /// # Errors
    /// `InternalError` for `Absent`; otherwise whatever the rule or broadcasting reports.
    pub fn call(&self, upstream: &Tensor, args: &[Tensor]) -> Result<Tensor, SpikeGradError> {
        match self {
            NumericFn::Absent => Err(SpikeGradError::InternalError(
                "attempted to call an absent gradient rule".to_string(),
            )),
            NumericFn::Closure { rule, .. } => rule(upstream, args),
            NumericFn::Elementwise { rule, .. } => {
                let operands = operand_list(upstream, args);
                broadcast_map(&operands, |values| {
                    let duals: Vec<Dual> = values.iter().map(|&v| Dual::constant(v)).collect();
                    rule(&duals).value()
                })
            }
        }
    }

    /// The generic differentiation operator.
    ///
    /// Returns a new function computing the partial derivative of `self` with
    /// respect to its first operand, elementwise. Only `Elementwise` rules can be
    /// differentiated.
    pub fn grad(&self) -> Result<NumericFn, SpikeGradError> {
        match self {
            NumericFn::Elementwise { name, rule } => {
                let rule = Arc::clone(rule);
                Ok(NumericFn::closure(*name, move |upstream, args| {
                    let operands = operand_list(upstream, args);
                    broadcast_map(&operands, |values| {
                        let duals: Vec<Dual> = values
                            .iter()
                            .enumerate()
                            .map(|(i, &v)| if i == 0 { Dual::variable(v) } else { Dual::constant(v) })
                            .collect();
                        rule(&duals).deriv()
                    })
                }))
            }
            other => Err(SpikeGradError::NotDifferentiable(other.name().to_string())),
        }
    }
}

fn operand_list<'a>(upstream: &'a Tensor, args: &'a [Tensor]) -> Vec<&'a Tensor> {
    let mut operands = Vec::with_capacity(args.len() + 1);
    operands.push(upstream);
    operands.extend(args.iter());
    operands
}

impl fmt::Debug for NumericFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericFn::Absent => write!(f, "NumericFn::Absent"),
            NumericFn::Closure { name, .. } => write!(f, "NumericFn::Closure({})", name),
            NumericFn::Elementwise { name, .. } => write!(f, "NumericFn::Elementwise({})", name),
        }
    }
}
