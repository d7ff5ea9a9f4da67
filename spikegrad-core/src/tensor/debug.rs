// src/tensor/debug.rs
use crate::tensor::Tensor;
use std::fmt;

const PREVIEW_LEN: usize = 8;

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data();
        if data.len() <= PREVIEW_LEN {
            write!(f, "Tensor(shape={:?}, data={:?})", self.shape, data)
        } else {
            write!(
                f,
                "Tensor(shape={:?}, data={:?} .. ({} more))",
                self.shape,
                &data[..PREVIEW_LEN],
                data.len() - PREVIEW_LEN
            )
        }
    }
}
