use crate::error::SpikeGradError;
use crate::tensor::utils::{
    broadcast_shapes, calculate_strides, coord_to_index_broadcasted, index_to_coord,
};
use crate::tensor::Tensor;

/// Computes the common broadcast shape of every operand.
pub fn broadcast_all(operands: &[&Tensor]) -> Result<Vec<usize>, SpikeGradError> {
    let mut shape: Vec<usize> = Vec::new();
    for operand in operands {
        shape = broadcast_shapes(&shape, &operand.shape).ok_or_else(|| {
            SpikeGradError::BroadcastError {
                shape1: shape.clone(),
                shape2: operand.shape.clone(),
            }
        })?;
    }
    Ok(shape)
}

/// Applies `f` elementwise over any number of operands after broadcasting them
/// to a common shape.
///
/// `f` receives one `f64` per operand, in operand order, for each output element.
/// Computation happens in `f64` and is narrowed to `f32` on write.
pub fn broadcast_map<F>(operands: &[&Tensor], f: F) -> Result<Tensor, SpikeGradError>
where
    F: Fn(&[f64]) -> f64,
{
    let output_shape = broadcast_all(operands)?;
    let numel: usize = output_shape.iter().product();
    let output_strides = calculate_strides(&output_shape);

    // Fast path: every operand already has the output shape.
    let same_shape = operands.iter().all(|t| t.shape == output_shape);

    let operand_strides: Vec<Vec<usize>> = operands
        .iter()
        .map(|t| calculate_strides(&t.shape))
        .collect();

    let mut values = vec![0.0f64; operands.len()];
    let mut result = Vec::with_capacity(numel);
    for i in 0..numel {
        if same_shape {
            for (slot, operand) in values.iter_mut().zip(operands) {
                *slot = f64::from(operand.data[i]);
            }
        } else {
            let coord = index_to_coord(i, &output_strides, &output_shape);
            for ((slot, operand), strides) in values.iter_mut().zip(operands).zip(&operand_strides) {
                let offset = coord_to_index_broadcasted(&coord, &operand.shape, strides);
                *slot = f64::from(operand.data[offset]);
            }
        }
        result.push(f(&values) as f32);
    }

    Tensor::new(result, output_shape)
}
