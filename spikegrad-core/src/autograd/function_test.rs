use super::*;
use crate::autograd::record::ParentLink;
use crate::autograd::RecordId;
use crate::functions::SmoothFunction;
use crate::utils::testing::create_test_tensor;
use std::cell::Cell;

/// Passes its first input through and reports whatever shape of result it is told to.
struct Scripted {
    tag: OpId,
    with_state: bool,
    n_args: usize,
    seen: Cell<Option<RecordId>>,
}

impl Scripted {
    fn new(tag: OpId, with_state: bool, n_args: usize) -> Self {
        Scripted {
            tag,
            with_state,
            n_args,
            seen: Cell::new(None),
        }
    }
}

impl Function for Scripted {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn forward(&self, ctx: &OperationRecord, inputs: &[Input]) -> Result<ForwardOutput, SpikeGradError> {
        self.seen.set(Some(ctx.id()));
        let output = inputs
            .first()
            .map(|i| i.value().clone())
            .unwrap_or_else(|| Tensor::scalar(0.0));
        let state = self.with_state.then(|| output.clone());
        Ok(ForwardOutput {
            rule: NumericFn::closure("identity", |g, _| Ok(g.clone())),
            rule_args: (0..self.n_args).map(|i| Tensor::scalar(10.0 + i as f32)).collect(),
            output,
            state,
            tag: self.tag,
        })
    }
}

#[test]
fn test_wiring_per_input_kind() {
    let tracked = Variable::with_grad(Tensor::scalar(1.0));
    let untracked = Variable::new(Tensor::scalar(2.0), false);
    let produced = SmoothFunction::square()
        .apply(&[(&tracked).into()])
        .unwrap()
        .output;

    let out = Scripted::new(OpId::Generic, false, 0)
        .apply(&[
            (&tracked).into(),
            (&untracked).into(),
            3.0f32.into(),
            (&produced).into(),
        ])
        .unwrap()
        .output;
    let record = out.producer().unwrap();

    assert_eq!(record.needs_input_grad(), vec![true, false, false, true]);
    assert_eq!(record.saved_inputs().len(), 3);
    assert!(record.saved_inputs()[1].ptr_eq(&untracked));

    let links = record.parent_links();
    assert_eq!(links.len(), 2);
    assert!(links.len() <= record.saved_inputs().len());
    assert!(links[0].ptr_eq(&ParentLink::Sink(tracked.accumulation_sink())));
    assert!(links[1].ptr_eq(&ParentLink::Record(Arc::clone(produced.producer().unwrap()))));
    assert!(record.edges()[2].saved.is_none());
}

#[test]
fn test_sink_shared_across_applications() {
    let leaf = Variable::with_grad(Tensor::scalar(1.0));
    let first = SmoothFunction::square().apply(&[(&leaf).into()]).unwrap().output;
    let second = SmoothFunction::square().apply(&[(&leaf).into()]).unwrap().output;

    let link_a = first.producer().unwrap().parent_links()[0].clone();
    let link_b = second.producer().unwrap().parent_links()[0].clone();
    assert!(link_a.ptr_eq(&link_b));
    assert!(Arc::ptr_eq(&leaf.accumulation_sink(), &leaf.accumulation_sink()));
}

#[test]
fn test_each_application_gets_a_fresh_record() {
    let leaf = Variable::with_grad(Tensor::scalar(1.0));
    let square = SmoothFunction::square();
    let a = square.apply(&[(&leaf).into()]).unwrap().output;
    let b = square.apply(&[(&leaf).into()]).unwrap().output;

    let (ra, rb) = (a.producer().unwrap(), b.producer().unwrap());
    assert!(!Arc::ptr_eq(ra, rb));
    assert_ne!(ra.id(), rb.id());
    assert_eq!(ra.function_name(), rb.function_name());
}

#[test]
fn test_forward_context_is_the_wired_record() {
    let scripted = Scripted::new(OpId::Generic, false, 0);
    let out = scripted.apply(&[Tensor::scalar(1.0).into()]).unwrap().output;
    assert_eq!(scripted.seen.get(), Some(out.producer().unwrap().id()));
}

#[test]
fn test_outputs_require_grad_and_carry_producer() {
    // Even with no tracked inputs.
    let outputs = Scripted::new(OpId::Output, true, 1)
        .apply(&[Tensor::scalar(4.0).into()])
        .unwrap();
    let record = outputs.output.producer().unwrap();
    let state = outputs.state.unwrap();

    assert!(outputs.output.requires_grad());
    assert!(state.requires_grad());
    assert!(Arc::ptr_eq(record, state.producer().unwrap()));
    assert_eq!(state.tag(), Some(OpId::Output));
    assert!(outputs.spikes.is_none());
    assert!(record.parent_links().is_empty());
}

#[test]
fn test_lif_exposes_first_rule_arg() {
    let outputs = Scripted::new(OpId::Lif, true, 3)
        .apply(&[Tensor::scalar(4.0).into()])
        .unwrap();
    let spikes = outputs.spikes.unwrap();
    assert_eq!(spikes.value().item().unwrap(), 10.0);
    assert_eq!(spikes.tag(), Some(OpId::Lif));
    assert!(spikes.requires_grad());
}

#[test]
fn test_state_presence_must_match_tag() {
    for (tag, with_state) in [(OpId::Output, false), (OpId::Lif, false), (OpId::Generic, true), (OpId::SpikeLoss, true)] {
        let err = Scripted::new(tag, with_state, 1)
            .apply(&[Tensor::scalar(1.0).into()])
            .unwrap_err();
        assert!(
            matches!(err, SpikeGradError::ForwardOutputMismatch { .. }),
            "tag {} with_state {}: {:?}",
            tag,
            with_state,
            err
        );
    }
}

#[test]
fn test_lif_without_rule_args_rejected() {
    let err = Scripted::new(OpId::Lif, true, 0)
        .apply(&[Tensor::scalar(1.0).into()])
        .unwrap_err();
    assert!(matches!(err, SpikeGradError::ForwardOutputMismatch { .. }));
}

#[test]
fn test_forward_error_propagates() {
    let err = SmoothFunction::square()
        .apply(&[create_test_tensor(vec![1.0], vec![1]).into(), 2.0f32.into()])
        .unwrap_err();
    assert_eq!(
        err,
        SpikeGradError::ArityMismatch {
            function: "square".to_string(),
            expected: 1,
            actual: 2,
        }
    );
}
