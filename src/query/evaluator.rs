//! Turning one allocation into a concrete id list.

use crate::data::DocId;
use crate::index::Index;
use crate::query::allocation::{Allocation, AllocationSummary};
use crate::query::intersect::intersect;

/// The outcome of evaluating one allocation.
pub(crate) struct Evaluated {
    /// Intersection of the allocation's per-token id lists, in descending
    /// id order (newest-first listing).
    pub ids: Vec<DocId>,

    /// Result-facing summary.
    pub summary: AllocationSummary,
}

/// Evaluate one allocation against a snapshot.
///
/// Each combination resolves to one ascending id list through its chosen
/// bundle; a similarity combination unions the exact lists of the sibling
/// tokens first. The lists are then intersected and the result reversed.
/// An empty intersection is a valid outcome; the orchestrator still
/// counts the allocation as evaluated.
pub(crate) fn evaluate(index: &Index, allocation: &Allocation) -> Evaluated {
    let lists: Vec<Vec<DocId>> = allocation
        .combinations
        .iter()
        .map(|combination| {
            index
                .category(combination.category)
                .posting(&combination.token, combination.bundle)
        })
        .collect();

    let mut borrowed: Vec<&[DocId]> = lists.iter().map(Vec::as_slice).collect();
    let mut ids = intersect(&mut borrowed);
    ids.reverse();

    let categories = allocation
        .combinations
        .iter()
        .map(|combination| index.category(combination.category).name().to_string())
        .collect();

    Evaluated {
        summary: AllocationSummary {
            score: allocation.score,
            categories,
            ids_count: ids.len(),
        },
        ids,
    }
}
