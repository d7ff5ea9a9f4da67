use super::params::IfParams;
use super::NeuronModel;
use crate::error::SpikeGradError;
use crate::ops::{div_scalar, sub_op};
use crate::tensor::Tensor;

/// Integrate-and-fire neuron: `dV = (x - v_rest) / dt`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrateAndFire {
    params: IfParams,
}

impl IntegrateAndFire {
    pub fn new(params: IfParams) -> Self {
        IntegrateAndFire { params }
    }

    pub fn params(&self) -> &IfParams {
        &self.params
    }
}

impl NeuronModel for IntegrateAndFire {
    fn v_rest(&self) -> f32 {
        self.params.v_rest()
    }

    fn v_threshold(&self) -> f32 {
        self.params.v_threshold()
    }

    fn delta(&self, x: &Tensor) -> Result<Tensor, SpikeGradError> {
        div_scalar(&sub_op(x, &Tensor::scalar(self.params.v_rest()))?, self.params.dt())
    }

    fn input_gain(&self) -> f32 {
        1.0 / self.params.dt()
    }
}
