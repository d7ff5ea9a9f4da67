use spikegrad_core::functions::SpikingNeuron;
use spikegrad_core::neuron::{IfParams, IntegrateAndFire};
use spikegrad_core::Tensor;

// Shared across several test crates; not every crate uses every helper.
#[allow(dead_code)]
pub(crate) fn create_test_tensor(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
    Tensor::new(data, shape).expect("Test tensor creation failed")
}

/// IF neuron spiking at or above 0.0 and resetting at 1.0.
#[allow(dead_code)]
pub(crate) fn unit_if_neuron() -> SpikingNeuron<IntegrateAndFire> {
    let params = IfParams::new(0.0, 1.0, 1.0).expect("valid IF parameters");
    SpikingNeuron::new(IntegrateAndFire::new(params))
        .with_slope(1.0)
        .expect("valid slope")
}
