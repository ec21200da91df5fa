//! Allocations: category assignments for a token sequence.

use serde::Serialize;

use crate::index::bundle::BundleKind;

/// A single query token bound to one category through a concrete bundle.
#[derive(Debug, Clone)]
pub struct Combination {
    /// Normalized token text.
    pub token: String,

    /// Category index within the snapshot's declaration order.
    pub category: usize,

    /// The bundle that satisfies the token at this category.
    pub bundle: BundleKind,

    /// Score contribution: category weight plus the token's bundle weight.
    pub weight: f64,
}

/// An assignment of every query token to one category.
///
/// Allocations are produced by the enumerator in non-increasing score
/// order and turned into id lists by the evaluator.
#[derive(Debug, Clone)]
pub struct Allocation {
    /// One combination per query token, in token order.
    pub combinations: Vec<Combination>,

    /// Sum of the combination weights.
    pub score: f64,
}

/// Result-facing summary of one evaluated allocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationSummary {
    /// The allocation's score.
    pub score: f64,

    /// Category names, one per token, in token order.
    pub categories: Vec<String>,

    /// Size of the allocation's intersection.
    pub ids_count: usize,
}
