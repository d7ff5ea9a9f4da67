// src/autograd/graph.rs

use crate::autograd::accumulate::accumulate_grad;
use crate::autograd::record::{OperationRecord, ParentLink, RecordId};
use crate::autograd::variable::Variable;
use crate::error::SpikeGradError;
use crate::ops::add_op;
use crate::tensor::{ones, Tensor};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Topologically sorts the records reachable from `root`.
///
/// The result is ordered so that every record comes before all of its parents:
/// processing it front to back guarantees a record is dispatched only after
/// every dependent has contributed its upstream gradient.
///
/// Uses an explicit stack so deep time-unrolled graphs do not overflow.
///
/// # Errors
/// `CycleDetected` if a record is reached again while still on the current path.
pub fn topological_sort(
    root: &Arc<OperationRecord>,
) -> Result<Vec<Arc<OperationRecord>>, SpikeGradError> {
    let mut visited: HashSet<RecordId> = HashSet::new();
    let mut on_path: HashSet<RecordId> = HashSet::new();
    let mut post_order: Vec<Arc<OperationRecord>> = Vec::new();

    // (record, index of the next parent link to visit)
    let mut stack: Vec<(Arc<OperationRecord>, usize)> = vec![(Arc::clone(root), 0)];
    visited.insert(root.id);
    on_path.insert(root.id);

    while let Some((record, next)) = stack.pop() {
        let parents = record_parents(&record);
        if let Some(parent) = parents.get(next) {
            let parent = Arc::clone(parent);
            stack.push((record, next + 1));
            if on_path.contains(&parent.id) {
                return Err(SpikeGradError::CycleDetected);
            }
            if visited.insert(parent.id) {
                on_path.insert(parent.id);
                stack.push((parent, 0));
            }
        } else {
            on_path.remove(&record.id);
            post_order.push(record);
        }
    }

    post_order.reverse();
    Ok(post_order)
}

fn record_parents(record: &OperationRecord) -> Vec<&Arc<OperationRecord>> {
    record
        .edges
        .iter()
        .filter_map(|edge| match &edge.link {
            Some(ParentLink::Record(parent)) => Some(parent),
            _ => None,
        })
        .collect()
}

/// Computes gradients of `root` with respect to every gradient-requiring leaf
/// reachable from it, accumulating them into the leaves.
///
/// # Arguments
/// * `gradient`: Seed gradient for `root`. If `None`, defaults to ones when `root`
///   holds a single element; otherwise `BackwardNonScalar` is returned.
///
/// Each record dispatches once with the sum of the gradients its dependents sent
/// it, and its local gradient is forwarded to every one of its parent links.
///
/// # Errors
/// * `RequiresGradNotMet` if `root` does not require grad.
/// * `ShapeMismatch` if a provided seed does not match `root`'s shape.
/// * `CycleDetected`, or any dispatch and accumulation error.
pub fn backward(root: &Variable, gradient: Option<Tensor>) -> Result<(), SpikeGradError> {
    if !root.requires_grad() {
        return Err(SpikeGradError::RequiresGradNotMet);
    }

    let seed = match gradient {
        Some(g) => {
            if g.shape() != root.shape() {
                return Err(SpikeGradError::ShapeMismatch {
                    expected: root.shape(),
                    actual: g.shape(),
                    operation: "backward".to_string(),
                });
            }
            g
        }
        None => {
            if root.value().numel() != 1 {
                return Err(SpikeGradError::BackwardNonScalar);
            }
            ones(&root.shape())?
        }
    };

    let Some(root_record) = root.producer() else {
        log::debug!("backward() called on a leaf variable; accumulating seed directly.");
        return accumulate_grad(&root.node.grad, &seed);
    };

    let sorted = topological_sort(root_record)?;
    log::debug!("backward: {} records reachable from root", sorted.len());

    let mut grads: HashMap<RecordId, Tensor> = HashMap::new();
    grads.insert(root_record.id, seed);

    for record in sorted {
        let Some(upstream) = grads.remove(&record.id) else {
            return Err(SpikeGradError::InternalError(format!(
                "record #{} ({}) reached without upstream gradient",
                record.id, record.function_name
            )));
        };

        let local = record.backward(&upstream)?;

        for link in record.parent_links() {
            match link {
                ParentLink::Record(parent) => {
                    let summed = match grads.remove(&parent.id) {
                        Some(existing) => {
                            if existing.shape() != local.shape() {
                                return Err(SpikeGradError::GradientAccumulationShapeMismatch {
                                    expected: existing.shape(),
                                    actual: local.shape(),
                                });
                            }
                            add_op(&existing, &local)?
                        }
                        None => local.clone(),
                    };
                    grads.insert(parent.id, summed);
                }
                ParentLink::Sink(sink) => sink.apply(&local)?,
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
