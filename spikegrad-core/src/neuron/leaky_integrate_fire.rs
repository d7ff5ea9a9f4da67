use super::params::LifParams;
use super::NeuronModel;
use crate::error::SpikeGradError;
use crate::ops::{div_scalar, sub_op};
use crate::tensor::Tensor;

/// Leaky integrate-and-fire neuron: `dV = ((x - v_rest) / dt) / tau`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeakyIntegrateAndFire {
    params: LifParams,
}

impl LeakyIntegrateAndFire {
    pub fn new(params: LifParams) -> Self {
        LeakyIntegrateAndFire { params }
    }

    pub fn params(&self) -> &LifParams {
        &self.params
    }
}

impl NeuronModel for LeakyIntegrateAndFire {
    fn v_rest(&self) -> f32 {
        self.params.v_rest()
    }

    fn v_threshold(&self) -> f32 {
        self.params.v_threshold()
    }

    fn delta(&self, x: &Tensor) -> Result<Tensor, SpikeGradError> {
        let drive = div_scalar(&sub_op(x, &Tensor::scalar(self.params.v_rest()))?, self.params.dt())?;
        div_scalar(&drive, self.params.tau())
    }

    fn input_gain(&self) -> f32 {
        1.0 / (self.params.dt() * self.params.tau())
    }
}
