// src/autograd/variable.rs

use crate::autograd::accumulate::AccumulationSink;
use crate::autograd::op_id::OpId;
use crate::autograd::record::OperationRecord;
use crate::error::SpikeGradError;
use crate::tensor::Tensor;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Internal state of a [`Variable`].
///
/// Everything except the accumulated gradient is fixed at construction. The
/// producer is set exactly once, by the operation that created the variable,
/// and stays `None` for user-created leaves.
pub(crate) struct VariableNode {
    pub(crate) value: Tensor,
    pub(crate) requires_grad: bool,
    pub(crate) producer: Option<Arc<OperationRecord>>,
    pub(crate) tag: Option<OpId>,
    /// Gradient accumulated by backward passes (leaves only).
    pub(crate) grad: RwLock<Option<Tensor>>,
    /// Created on first use as a tracked input; unique per leaf.
    pub(crate) sink: OnceLock<Arc<AccumulationSink>>,
}

/// A node of the autograd graph: a computed value plus its graph linkage.
///
/// `Variable` is a cheap handle (`Arc`) so the same node can be saved by several
/// operation records and still be recognized as one leaf. Its producer link is an
/// owning `Arc`: records only ever point at older records, so the graph stays
/// acyclic and is freed once the last output handle goes away.
#[derive(Clone)]
pub struct Variable {
    pub(crate) node: Arc<VariableNode>,
}

impl Variable {
    /// Creates a leaf variable.
    pub fn new(value: Tensor, requires_grad: bool) -> Self {
        Variable::from_parts(value, requires_grad, None, None)
    }

    /// Shorthand for a leaf that tracks gradients.
    pub fn with_grad(value: Tensor) -> Self {
        Variable::new(value, true)
    }

    pub(crate) fn from_parts(
        value: Tensor,
        requires_grad: bool,
        producer: Option<Arc<OperationRecord>>,
        tag: Option<OpId>,
    ) -> Self {
        Variable {
            node: Arc::new(VariableNode {
                value,
                requires_grad,
                producer,
                tag,
                grad: RwLock::new(None),
                sink: OnceLock::new(),
            }),
        }
    }

    pub fn value(&self) -> &Tensor {
        &self.node.value
    }

    pub fn requires_grad(&self) -> bool {
        self.node.requires_grad
    }

    /// The operation record that produced this variable, if any.
    pub fn producer(&self) -> Option<&Arc<OperationRecord>> {
        self.node.producer.as_ref()
    }

    pub fn tag(&self) -> Option<OpId> {
        self.node.tag
    }

    /// A leaf has no producing operation.
    pub fn is_leaf(&self) -> bool {
        self.node.producer.is_none()
    }

    pub fn shape(&self) -> Vec<usize> {
        self.node.value.shape()
    }

    /// Returns a clone of the accumulated gradient, if any.
    pub fn grad(&self) -> Option<Tensor> {
        self.read_grad().clone()
    }

    /// Resets the accumulated gradient to `None`.
    pub fn zero_grad(&self) {
        *self.write_grad() = None;
    }

    /// Creates a new leaf sharing this variable's value but cut off from the graph.
    pub fn detach(&self) -> Variable {
        Variable::new(self.node.value.clone(), false)
    }

    /// Whether two handles point at the same node.
    pub fn ptr_eq(&self, other: &Variable) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    /// Returns this leaf's accumulation sink, creating it on first use.
    ///
    /// The sink is unique per leaf: every call returns the same instance.
    pub fn accumulation_sink(&self) -> Arc<AccumulationSink> {
        Arc::clone(self.node.sink.get_or_init(|| {
            log::debug!("Creating accumulation sink for leaf {:?}", Arc::as_ptr(&self.node));
            Arc::new(AccumulationSink::new(Arc::downgrade(&self.node)))
        }))
    }

    /// Runs the backward pass from this variable. See [`crate::autograd::graph::backward`].
    pub fn backward(&self, gradient: Option<Tensor>) -> Result<(), SpikeGradError> {
        crate::autograd::graph::backward(self, gradient)
    }

    /// Acquires a read lock on the accumulated gradient.
    ///
    /// The slot is only ever replaced whole, so a poisoned lock still guards a
    /// consistent value and is recovered rather than reported.
    pub(crate) fn read_grad(&self) -> RwLockReadGuard<'_, Option<Tensor>> {
        self.node.grad.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquires a write lock on the accumulated gradient. See [`Variable::read_grad`].
    pub(crate) fn write_grad(&self) -> RwLockWriteGuard<'_, Option<Tensor>> {
        lock_grad(&self.node.grad)
    }
}

/// Write access to a gradient slot, recovering from poisoning.
pub(crate) fn lock_grad(slot: &RwLock<Option<Tensor>>) -> RwLockWriteGuard<'_, Option<Tensor>> {
    slot.write().unwrap_or_else(PoisonError::into_inner)
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Variable(value={:?}, requires_grad={}, tag={:?}, has_producer={}, has_grad={})",
            self.node.value,
            self.node.requires_grad,
            self.node.tag,
            self.node.producer.is_some(),
            self.read_grad().is_some()
        )
    }
}

#[cfg(test)]
#[path = "variable_test.rs"]
mod tests;
