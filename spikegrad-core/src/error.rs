use thiserror::Error;

/// Custom error type for the spikegrad autograd core.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum SpikeGradError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Cannot broadcast shapes: {shape1:?} and {shape2:?}")]
    BroadcastError {
        shape1: Vec<usize>,
        shape2: Vec<usize>,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Operation requires variable to require grad, but it doesn't.")]
    RequiresGradNotMet,

    #[error("Backward called on non-scalar variable without explicit gradient.")]
    BackwardNonScalar,

    #[error("Shape mismatch during gradient accumulation: expected {expected:?}, got {actual:?}")]
    GradientAccumulationShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Cycle detected in the computation graph during backward pass.")]
    CycleDetected,

    #[error("Unknown operation tag '{0}'")]
    UnknownOpTag(String),

    #[error("Forward of '{function}' returned a result of the wrong shape for tag {tag}: {reason}")]
    ForwardOutputMismatch {
        function: String,
        tag: String,
        reason: String,
    },

    #[error("Operation record for '{function}' (tag {tag}) has no gradient rule to evaluate")]
    MissingGradRule { function: String, tag: String },

    #[error("Gradient rule '{0}' is not differentiable: only elementwise rules can be differentiated")]
    NotDifferentiable(String),

    #[error("Invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f32,
        reason: &'static str,
    },

    #[error("'{function}' expects {expected} inputs, got {actual}")]
    ArityMismatch {
        function: String,
        expected: usize,
        actual: usize,
    },
}
