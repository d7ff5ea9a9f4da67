// src/autograd/record.rs

use crate::autograd::accumulate::AccumulationSink;
use crate::autograd::function::Input;
use crate::autograd::numeric_fn::NumericFn;
use crate::autograd::op_id::OpId;
use crate::autograd::variable::Variable;
use crate::tensor::Tensor;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Process-unique identifier of an operation record.
///
/// Ids increase monotonically, so a parent record always has a smaller id than
/// any record linking to it.
pub type RecordId = u64;

static NEXT_RECORD_ID: AtomicU64 = AtomicU64::new(0);

/// Where a record forwards gradient during backward.
#[derive(Clone)]
pub enum ParentLink {
    /// The record that produced a tracked input.
    Record(Arc<OperationRecord>),
    /// The accumulation sink of a gradient-requiring leaf input.
    Sink(Arc<AccumulationSink>),
}

impl ParentLink {
    /// Identity comparison (same record or same sink instance).
    pub fn ptr_eq(&self, other: &ParentLink) -> bool {
        match (self, other) {
            (ParentLink::Record(a), ParentLink::Record(b)) => Arc::ptr_eq(a, b),
            (ParentLink::Sink(a), ParentLink::Sink(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for ParentLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParentLink::Record(record) => write!(f, "Record(#{} {})", record.id, record.function_name),
            ParentLink::Sink(sink) => write!(f, "{:?}", sink),
        }
    }
}

/// What the wiring step recorded for one positional argument.
#[derive(Debug)]
pub struct InputEdge {
    /// The argument itself, when it was a variable.
    pub saved: Option<Variable>,
    pub needs_grad: bool,
    /// Present only for inputs with a producer or gradient-requiring leaves.
    pub link: Option<ParentLink>,
}

/// Per-application record of an operation: everything needed to compute its
/// local gradient later, plus links to the parent nodes of the graph.
///
/// One record is created for every call to [`Function::apply`]; records are never
/// reused across calls. Once wired, a record is immutable and shared through `Arc`
/// by every output variable and every downstream record that consumes them.
///
/// [`Function::apply`]: crate::autograd::Function::apply
pub struct OperationRecord {
    pub(crate) id: RecordId,
    pub(crate) function_name: &'static str,
    pub(crate) edges: Vec<InputEdge>,
    pub(crate) rule: NumericFn,
    pub(crate) rule_args: Vec<Tensor>,
    pub(crate) tag: OpId,
}

impl OperationRecord {
    /// A fresh, unwired record bound to the function named `function_name`.
    pub(crate) fn new(function_name: &'static str) -> Self {
        OperationRecord {
            id: NEXT_RECORD_ID.fetch_add(1, Ordering::Relaxed),
            function_name,
            edges: Vec::new(),
            rule: NumericFn::Absent,
            rule_args: Vec::new(),
            tag: OpId::Generic,
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn function_name(&self) -> &'static str {
        self.function_name
    }

    pub fn tag(&self) -> OpId {
        self.tag
    }

    pub fn rule(&self) -> &NumericFn {
        &self.rule
    }

    pub fn rule_args(&self) -> &[Tensor] {
        &self.rule_args
    }

    /// One edge per positional argument, in call order.
    pub fn edges(&self) -> &[InputEdge] {
        &self.edges
    }

    /// The variable arguments, in call order.
    pub fn saved_inputs(&self) -> Vec<&Variable> {
        self.edges.iter().filter_map(|e| e.saved.as_ref()).collect()
    }

    /// One flag per positional argument; plain values are always `false`.
    pub fn needs_input_grad(&self) -> Vec<bool> {
        self.edges.iter().map(|e| e.needs_grad).collect()
    }

    /// Links appended only for applicable inputs, so `len(parent_links) <= len(saved_inputs)`.
    pub fn parent_links(&self) -> Vec<&ParentLink> {
        self.edges.iter().filter_map(|e| e.link.as_ref()).collect()
    }

    /// Wires the record to its inputs and stores the gradient context.
    pub(crate) fn setup(&mut self, rule: NumericFn, rule_args: Vec<Tensor>, tag: OpId, inputs: &[Input]) {
        self.rule = rule;
        self.rule_args = rule_args;
        self.tag = tag;
        self.edges = Vec::with_capacity(inputs.len());

        for (position, input) in inputs.iter().enumerate() {
            let edge = match input {
                Input::Variable(var) => {
                    let link = if let Some(producer) = var.producer() {
                        Some(ParentLink::Record(Arc::clone(producer)))
                    } else if var.requires_grad() {
                        Some(ParentLink::Sink(var.accumulation_sink()))
                    } else {
                        None
                    };
                    log::trace!(
                        "record #{} ({}) input {}: variable, requires_grad={}, link={:?}",
                        self.id,
                        self.function_name,
                        position,
                        var.requires_grad(),
                        link
                    );
                    InputEdge {
                        saved: Some(var.clone()),
                        needs_grad: var.requires_grad(),
                        link,
                    }
                }
                Input::Value(_) => InputEdge {
                    saved: None,
                    needs_grad: false,
                    link: None,
                },
            };
            self.edges.push(edge);
        }
    }
}

/// Releases the graph behind a record without recursing.
///
/// A record owns its inputs, which own their producers, so a time-unrolled
/// chain would otherwise be freed one native stack frame per record. Records
/// that are still shared elsewhere are only decremented.
impl Drop for OperationRecord {
    fn drop(&mut self) {
        let mut pending: Vec<Arc<OperationRecord>> = Vec::new();
        detach_parents(std::mem::take(&mut self.edges), &mut pending);
        while let Some(record) = pending.pop() {
            if let Some(mut record) = Arc::into_inner(record) {
                detach_parents(std::mem::take(&mut record.edges), &mut pending);
            }
        }
    }
}

fn detach_parents(edges: Vec<InputEdge>, pending: &mut Vec<Arc<OperationRecord>>) {
    for edge in edges {
        if let Some(ParentLink::Record(parent)) = edge.link {
            pending.push(parent);
        }
        if let Some(node) = edge.saved.and_then(|var| Arc::into_inner(var.node)) {
            pending.extend(node.producer);
        }
    }
}

impl fmt::Debug for OperationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationRecord")
            .field("id", &self.id)
            .field("function", &self.function_name)
            .field("tag", &self.tag)
            .field("rule", &self.rule)
            .field("needs_input_grad", &self.needs_input_grad())
            .field("parent_links", &self.parent_links())
            .finish()
    }
}
