//! # Numeric Operations Module (`ops`)
//!
//! Elementwise kernels over [`Tensor`](crate::tensor::Tensor) values. These functions are
//! purely numeric: they know nothing about the autograd graph and never record
//! operations. Gradient rules and neuron models are written on top of them.
//!
//! ## Key Submodules:
//!
//! - [`broadcast`]: The n-ary broadcasting kernel every elementwise op is built on.
//! - [`arithmetic`]: Element-wise arithmetic (add, sub, mul, div, scalar variants, map).
//! - [`comparison`]: Comparison masks and conditional select.
//! - [`view`]: Shape manipulation (unsqueeze, expand, batch target tiling).
//! - [`reduction`]: Full reductions (sum, mean).

pub mod arithmetic;
pub mod broadcast;
pub mod comparison;
pub mod reduction;
pub mod view;

pub use arithmetic::{add_op, add_scalar, div_op, div_scalar, map_op, mul_op, mul_scalar, sub_op};
pub use broadcast::broadcast_map;
pub use comparison::{ge_op, where_op};
pub use reduction::{mean_all, sum_all};
pub use view::{expand, tile_batch_target, unsqueeze};
