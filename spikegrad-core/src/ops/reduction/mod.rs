use crate::error::SpikeGradError;
use crate::tensor::Tensor;

/// Sums every element into a 0-dimensional tensor.
pub fn sum_all(a: &Tensor) -> Result<Tensor, SpikeGradError> {
    let total: f64 = a.data().iter().map(|&x| f64::from(x)).sum();
    Ok(Tensor::scalar(total as f32))
}

/// Averages every element into a 0-dimensional tensor.
pub fn mean_all(a: &Tensor) -> Result<Tensor, SpikeGradError> {
    if a.numel() == 0 {
        return Err(SpikeGradError::UnsupportedOperation(
            "mean of an empty tensor".to_string(),
        ));
    }
    let total: f64 = a.data().iter().map(|&x| f64::from(x)).sum();
    Ok(Tensor::scalar((total / a.numel() as f64) as f32))
}
