use crate::autograd::variable::{lock_grad, VariableNode};
use crate::error::SpikeGradError;
use crate::ops::arithmetic::add_op;
use crate::tensor::Tensor;
use std::fmt;
use std::sync::{RwLock, Weak};

/// Terminal graph node summing gradients into a leaf variable.
///
/// There is exactly one sink per gradient-requiring leaf, created the first time
/// the leaf is used as an input (see [`Variable::accumulation_sink`]). The sink
/// refers to its leaf weakly; the leaf owns the sink.
///
/// Backward passes are single-writer: two passes running concurrently over the
/// same leaf are not supported.
///
/// [`Variable::accumulation_sink`]: crate::autograd::Variable::accumulation_sink
pub struct AccumulationSink {
    target_leaf: Weak<VariableNode>,
}

impl AccumulationSink {
    pub(crate) fn new(target_leaf: Weak<VariableNode>) -> Self {
        AccumulationSink { target_leaf }
    }

    /// Adds `grad` into the leaf's accumulated gradient.
    ///
    /// The first contribution initializes the gradient; later ones are summed, so
    /// several graph paths converging on the same leaf add up.
    pub fn apply(&self, grad: &Tensor) -> Result<(), SpikeGradError> {
        let Some(leaf) = self.target_leaf.upgrade() else {
            log::debug!("Accumulation sink target was dropped; discarding gradient {:?}", grad);
            return Ok(());
        };
        if grad.shape != leaf.value.shape {
            return Err(SpikeGradError::GradientAccumulationShapeMismatch {
                expected: leaf.value.shape(),
                actual: grad.shape(),
            });
        }
        accumulate_grad(&leaf.grad, grad)
    }

    /// Whether the target leaf is still alive.
    pub fn is_alive(&self) -> bool {
        self.target_leaf.strong_count() > 0
    }
}

/// Initialize-then-add into a gradient slot.
///
/// On error the slot keeps its previous value.
pub(crate) fn accumulate_grad(
    slot: &RwLock<Option<Tensor>>,
    grad_to_add: &Tensor,
) -> Result<(), SpikeGradError> {
    let mut guard = lock_grad(slot);
    let summed = match guard.as_ref() {
        Some(existing) => add_op(existing, grad_to_add)?,
        None => grad_to_add.clone(),
    };
    *guard = Some(summed);
    Ok(())
}

impl fmt::Debug for AccumulationSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccumulationSink(leaf={:?}, alive={})", self.target_leaf.as_ptr(), self.is_alive())
    }
}
