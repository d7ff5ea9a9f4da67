use spikegrad_core::functions::{OutputAccumulator, SmoothFunction, SpikeCountLoss};
use spikegrad_core::{Function, OpId, SpikeGradError, Tensor, Variable};
use std::str::FromStr;

mod common;
use common::unit_if_neuron;

#[test]
fn test_tag_round_trip_through_display() {
    for tag in [OpId::SpikeLoss, OpId::Output, OpId::Lif, OpId::Generic] {
        assert_eq!(OpId::from_str(&tag.to_string()).unwrap(), tag);
    }
    assert_eq!("spike_loss".parse::<OpId>().unwrap(), OpId::SpikeLoss);
    assert_eq!(
        "relu".parse::<OpId>().unwrap_err(),
        SpikeGradError::UnknownOpTag("relu".to_string())
    );
}

#[test]
fn test_each_function_records_its_tag() {
    let x = Variable::with_grad(Tensor::scalar(0.5));
    let zero = Tensor::scalar(0.0);

    let neuron = unit_if_neuron().apply(&[(&x).into(), zero.clone().into()]).unwrap();
    let readout = OutputAccumulator::new(1)
        .unwrap()
        .apply(&[(&x).into(), zero.clone().into()])
        .unwrap();
    let loss = SpikeCountLoss::new()
        .apply(&[(&x).into(), zero.clone().into(), Tensor::scalar(1.0).into()])
        .unwrap();
    let smooth = SmoothFunction::sigmoid().apply(&[(&x).into()]).unwrap();

    assert_eq!(neuron.output.producer().unwrap().tag(), OpId::Lif);
    assert_eq!(readout.output.producer().unwrap().tag(), OpId::Output);
    assert_eq!(loss.output.producer().unwrap().tag(), OpId::SpikeLoss);
    assert_eq!(smooth.output.producer().unwrap().tag(), OpId::Generic);

    assert!(neuron.spikes.is_some() && neuron.state.is_some());
    assert!(readout.spikes.is_none() && readout.state.is_some());
    assert!(loss.state.is_none() && smooth.state.is_none());
}
