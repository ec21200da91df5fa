//! Query orchestration: request shaping, allocation processing, and early
//! termination.
//!
//! The orchestrator consumes allocations in score order, appends each
//! intersection (descending ids) to an accumulator, and slices the
//! requested `offset..offset + limit` window out at the end. With early
//! termination enabled it stops processing as soon as the accumulator can
//! cover the window and the configured number of extra allocations has
//! been spent; the exact predicate is documented on [`execute`].

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::data::DocId;
use crate::index::Index;
use crate::query::allocation::AllocationSummary;
use crate::query::enumerator::{AllocationEnumerator, Choice};
use crate::query::{evaluator, qualifier};
use crate::util::pool::Pool;

/// Result window size when the request does not set one.
pub const DEFAULT_LIMIT: usize = 20;

/// A search request against one index.
///
/// # Examples
///
/// ```
/// use crocus::SearchRequest;
///
/// let request = SearchRequest::new("title:rust services")
///     .limit(10)
///     .offset(20)
///     .terminate_early(2);
/// ```
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub(crate) query: String,
    pub(crate) limit: usize,
    pub(crate) offset: usize,
    pub(crate) terminate_early: Option<usize>,
    pub(crate) timeout: Option<Duration>,
}

impl SearchRequest {
    /// Create a request with default limit and offset.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: DEFAULT_LIMIT,
            offset: 0,
            terminate_early: None,
            timeout: None,
        }
    }

    /// Maximum number of ids to return.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Number of ids to skip before the returned window.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Enable early termination with the given extra-allocation count.
    ///
    /// `0` stops immediately once the result window can be covered.
    pub fn terminate_early(mut self, extra_allocations: usize) -> Self {
        self.terminate_early = Some(extra_allocations);
        self
    }

    /// Enable early termination with the default of one extra allocation.
    pub fn terminate_early_default(self) -> Self {
        self.terminate_early(1)
    }

    /// Named form of [`SearchRequest::terminate_early`].
    pub fn terminate_early_with_extra_allocations(self, extra_allocations: usize) -> Self {
        self.terminate_early(extra_allocations)
    }

    /// Soft deadline for the whole query, checked between allocations.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// The outcome of a search.
///
/// Serializes as a stable key-ordered mapping
/// `{allocations, ids, offset, total, duration}`; the diagnostic fields
/// only appear when set.
#[derive(Debug, Clone, Serialize)]
pub struct Results {
    /// Summaries of the evaluated allocations that contributed ids.
    pub allocations: Vec<AllocationSummary>,

    /// The requested id window, concatenated in allocation order.
    pub ids: Vec<DocId>,

    /// The offset the window was sliced at.
    pub offset: usize,

    /// Total ids accumulated across evaluated allocations.
    pub total: usize,

    /// Query duration in seconds.
    pub duration: f64,

    /// Set when the deadline expired and the results are partial.
    #[serde(skip_serializing_if = "is_false")]
    pub truncated: bool,

    /// Qualifiers that resolved to no category.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown_qualifiers: Vec<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Results {
    fn empty(offset: usize) -> Self {
        Self {
            allocations: Vec::new(),
            ids: Vec::new(),
            offset,
            total: 0,
            duration: 0.0,
            truncated: false,
            unknown_qualifiers: Vec::new(),
        }
    }
}

/// Run a request against a snapshot.
///
/// Never fails on user input: an empty query or an unsatisfiable token
/// yields an empty success, unknown qualifiers become diagnostics.
///
/// # Early termination
///
/// With `terminate_early(e)` a countdown starts at `e` and decrements once
/// per evaluated allocation (empty intersections included). Processing
/// stops after the first allocation at which the accumulator holds at
/// least `offset + limit` ids *and* the countdown has gone negative.
/// Without the option every allocation is evaluated.
pub(crate) fn execute(index: &Index, request: &SearchRequest) -> Results {
    let started = Instant::now();
    let deadline = request.timeout.map(|timeout| started + timeout);

    let mut results = Results::empty(request.offset);

    // 1. Tokenize. An empty token stream is an empty success.
    let tokens = index.tokenizer().tokenize(&request.query);
    if tokens.is_empty() {
        results.duration = started.elapsed().as_secs_f64();
        return results;
    }

    // 2. Resolve qualifiers and pre-compute per-token category choices.
    let mut choices: Vec<Vec<Choice>> = Vec::with_capacity(tokens.len());
    for token in &tokens {
        let allowed = qualifier::allowed_categories(index, token, &mut results.unknown_qualifiers);
        let candidates: Vec<Choice> = allowed
            .into_iter()
            .filter_map(|position| {
                let category = index.category(position);
                category
                    .best_bundle(&token.text)
                    .map(|(bundle, weight)| Choice {
                        category: position,
                        bundle,
                        weight: category.weight() + weight,
                    })
            })
            .collect();

        if candidates.is_empty() {
            // Unsatisfiable token: no allocation can exist.
            results.duration = started.elapsed().as_secs_f64();
            return results;
        }
        choices.push(candidates);
    }

    // 3. Consume allocations in score order.
    let needed = request.offset + request.limit;
    let mut countdown: i64 = request.terminate_early.unwrap_or(0) as i64;
    let accumulator = Pool::obtain::<Vec<DocId>>();
    {
        let mut acc = accumulator.borrow_mut();
        for allocation in AllocationEnumerator::new(&tokens, choices) {
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    results.truncated = true;
                    break;
                }
            }

            let evaluated = evaluator::evaluate(index, &allocation);
            if !evaluated.ids.is_empty() {
                results.total += evaluated.ids.len();
                acc.extend_from_slice(&evaluated.ids);
                results.allocations.push(evaluated.summary);
            }

            if request.terminate_early.is_some() {
                countdown -= 1;
                if acc.len() >= needed && countdown < 0 {
                    break;
                }
            }
        }

        // 4. Slice the requested window out of the accumulator.
        if request.offset < acc.len() {
            let end = needed.min(acc.len());
            results.ids.extend_from_slice(&acc[request.offset..end]);
        }
    }

    // 5. Return this query's scratch to the per-thread pool.
    Pool::release(accumulator);
    Pool::release_all::<Vec<DocId>>();

    results.duration = started.elapsed().as_secs_f64();
    results
}
