//! The query-evaluation pipeline.
//!
//! A query flows through four stages, each a submodule here:
//!
//! ```text
//! tokens → qualifier resolution → allocation enumeration
//!        → per-allocation evaluation (posting lookups + intersection)
//! ```
//!
//! An *allocation* assigns every query token to one category (and within
//! it, one bundle). The enumerator yields allocations best-score-first
//! without materializing the full category product; the evaluator turns
//! one allocation into a concrete id list via multi-set intersection. The
//! orchestration loop that consumes them, including early termination,
//! lives behind [`crate::Index::search`].

pub mod allocation;
pub mod enumerator;
pub mod evaluator;
pub mod intersect;
pub mod qualifier;

pub use allocation::{Allocation, AllocationSummary, Combination};
