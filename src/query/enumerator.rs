//! Best-first enumeration of allocations.
//!
//! For N tokens with k allowed categories each the assignment space is a
//! k^N product; materializing it would defeat early termination. Instead
//! each token's candidate categories are sorted best-first and a priority
//! queue walks the product lazily: pop the best unvisited assignment, emit
//! it, push its successors (one token bumped to its next-worse candidate).
//! The frontier stays bounded by the number of assignments emitted so far.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use ahash::RandomState;

use crate::analysis::token::QueryToken;
use crate::index::bundle::BundleKind;
use crate::query::allocation::{Allocation, Combination};

/// One category able to satisfy a token, with the pre-computed best
/// bundle and combined weight (category weight + bundle weight).
#[derive(Debug, Clone)]
pub(crate) struct Choice {
    pub category: usize,
    pub bundle: BundleKind,
    pub weight: f64,
}

/// Lazily yields allocations in non-increasing score order.
///
/// Equal scores are ordered by the category index tuple, lexicographically
/// ascending, which makes enumeration fully deterministic.
pub(crate) struct AllocationEnumerator<'a> {
    tokens: &'a [QueryToken],
    choices: Vec<Vec<Choice>>,
    heap: BinaryHeap<Frontier>,
    seen: HashSet<Vec<u32>, RandomState>,
}

struct Frontier {
    score: f64,
    categories: Vec<u32>,
    picks: Vec<u32>,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap: higher score first; on ties the lexicographically
        // smaller category tuple wins.
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.categories.cmp(&self.categories))
    }
}

impl<'a> AllocationEnumerator<'a> {
    /// Build an enumerator over per-token candidate categories.
    ///
    /// A token with no candidates makes the whole query unsatisfiable:
    /// the enumerator yields nothing.
    pub(crate) fn new(tokens: &'a [QueryToken], mut choices: Vec<Vec<Choice>>) -> Self {
        for candidates in &mut choices {
            candidates.sort_by(|a, b| {
                b.weight
                    .total_cmp(&a.weight)
                    .then_with(|| b.bundle.rank().cmp(&a.bundle.rank()))
                    .then_with(|| a.category.cmp(&b.category))
            });
        }

        let mut heap = BinaryHeap::new();
        let mut seen = HashSet::default();
        if !choices.is_empty() && choices.iter().all(|candidates| !candidates.is_empty()) {
            let picks = vec![0u32; choices.len()];
            seen.insert(picks.clone());
            heap.push(Self::frontier(&choices, picks));
        }

        Self {
            tokens,
            choices,
            heap,
            seen,
        }
    }

    fn frontier(choices: &[Vec<Choice>], picks: Vec<u32>) -> Frontier {
        let mut score = 0.0;
        let mut categories = Vec::with_capacity(picks.len());
        for (token_idx, &pick) in picks.iter().enumerate() {
            let choice = &choices[token_idx][pick as usize];
            score += choice.weight;
            categories.push(choice.category as u32);
        }
        Frontier {
            score,
            categories,
            picks,
        }
    }
}

impl Iterator for AllocationEnumerator<'_> {
    type Item = Allocation;

    fn next(&mut self) -> Option<Allocation> {
        let best = self.heap.pop()?;

        // Expand: bump one token at a time to its next-worse candidate.
        for token_idx in 0..best.picks.len() {
            let bumped = best.picks[token_idx] + 1;
            if (bumped as usize) < self.choices[token_idx].len() {
                let mut picks = best.picks.clone();
                picks[token_idx] = bumped;
                if self.seen.insert(picks.clone()) {
                    self.heap.push(Self::frontier(&self.choices, picks));
                }
            }
        }

        let combinations = best
            .picks
            .iter()
            .enumerate()
            .map(|(token_idx, &pick)| {
                let choice = &self.choices[token_idx][pick as usize];
                Combination {
                    token: self.tokens[token_idx].text.clone(),
                    category: choice.category,
                    bundle: choice.bundle,
                    weight: choice.weight,
                }
            })
            .collect();

        Some(Allocation {
            combinations,
            score: best.score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice(category: usize, weight: f64) -> Choice {
        Choice {
            category,
            bundle: BundleKind::Exact,
            weight,
        }
    }

    fn tokens(n: usize) -> Vec<QueryToken> {
        (0..n)
            .map(|i| QueryToken::unqualified(format!("t{i}")))
            .collect()
    }

    #[test]
    fn test_scores_are_non_increasing() {
        let tokens = tokens(2);
        let choices = vec![
            vec![choice(0, 3.0), choice(1, 1.0)],
            vec![choice(0, 2.0), choice(1, 0.5)],
        ];
        let scores: Vec<f64> = AllocationEnumerator::new(&tokens, choices)
            .map(|a| a.score)
            .collect();

        assert_eq!(scores.len(), 4);
        assert_eq!(scores, vec![5.0, 3.5, 3.0, 1.5]);
    }

    #[test]
    fn test_ties_break_by_category_tuple() {
        let tokens = tokens(1);
        let choices = vec![vec![choice(2, 0.0), choice(0, 0.0), choice(1, 0.0)]];
        let cats: Vec<usize> = AllocationEnumerator::new(&tokens, choices)
            .map(|a| a.combinations[0].category)
            .collect();

        assert_eq!(cats, vec![0, 1, 2]);
    }

    #[test]
    fn test_cross_token_ties_are_lexicographic() {
        let tokens = tokens(2);
        let choices = vec![
            vec![choice(0, 0.0), choice(1, 0.0)],
            vec![choice(0, 0.0), choice(1, 0.0)],
        ];
        let tuples: Vec<Vec<usize>> = AllocationEnumerator::new(&tokens, choices)
            .map(|a| a.combinations.iter().map(|c| c.category).collect())
            .collect();

        assert_eq!(
            tuples,
            vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]
        );
    }

    #[test]
    fn test_unsatisfiable_token_yields_nothing() {
        let tokens = tokens(2);
        let choices = vec![vec![choice(0, 1.0)], Vec::new()];
        assert_eq!(AllocationEnumerator::new(&tokens, choices).count(), 0);
    }

    #[test]
    fn test_exact_outranks_partial_on_equal_weight() {
        let tokens = tokens(1);
        let choices = vec![vec![
            Choice {
                category: 0,
                bundle: BundleKind::Partial,
                weight: 1.0,
            },
            Choice {
                category: 1,
                bundle: BundleKind::Exact,
                weight: 1.0,
            },
        ]];
        let first = AllocationEnumerator::new(&tokens, choices).next().unwrap();
        assert_eq!(first.combinations[0].bundle, BundleKind::Exact);
        assert_eq!(first.combinations[0].category, 1);
    }
}
