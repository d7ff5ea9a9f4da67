//! # Autograd
//!
//! Reverse-mode automatic differentiation built for spiking neurons, whose spike
//! emission is a hard threshold with no useful derivative.
//!
//! - [`Variable`]: a value plus graph linkage.
//! - [`Function`]: the trait every differentiable operation implements; its
//!   provided [`Function::apply`] builds one [`OperationRecord`] per call.
//! - [`OperationRecord`]: saved inputs, per-input flags, parent links and the
//!   gradient rule, dispatched on a closed [`OpId`] tag.
//! - [`AccumulationSink`]: one per gradient-requiring leaf, sums incoming gradients.
//! - [`graph::backward`]: topological backward pass from an output variable.
//! - [`NumericFn`] and [`Dual`]: stored gradient rules and the generic
//!   differentiation operator used for `OpId::Generic` records.

pub mod accumulate;
pub mod backward_op;
pub mod dual;
pub mod function;
pub mod grad_check;
pub mod graph;
pub mod numeric_fn;
pub mod op_id;
pub mod record;
pub mod variable;

pub use accumulate::AccumulationSink;
pub use backward_op::spike_loss_grad;
pub use dual::Dual;
pub use function::{expect_arity, expect_tracked_shape, ForwardOutput, Function, FunctionOutputs, Input};
pub use numeric_fn::NumericFn;
pub use op_id::OpId;
pub use record::{InputEdge, OperationRecord, ParentLink, RecordId};
pub use variable::Variable;
