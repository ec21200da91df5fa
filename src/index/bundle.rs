//! Bundle kinds and the similarity-class map.
//!
//! A category routes a token through one of three bundles: exact postings,
//! substring-expanded postings, or phonetic similarity classes. The
//! similarity bundle is a token-rewriting layer: it owns no postings of its
//! own, it only names sibling tokens which are then resolved through the
//! exact bundle.

use std::collections::HashMap;

use ahash::RandomState;
use serde::{Deserialize, Serialize};

use crate::analysis::phonetic::soundex;

/// Which posting variant satisfied a token at a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BundleKind {
    /// The token is present verbatim in the category.
    Exact,
    /// The token is a configured substring of an indexed token.
    Partial,
    /// Tokens sharing the query token's phonetic code stand in for it.
    Similarity,
}

impl BundleKind {
    /// Preference rank: exact beats partial beats similarity on ties.
    pub(crate) fn rank(self) -> u8 {
        match self {
            BundleKind::Exact => 2,
            BundleKind::Partial => 1,
            BundleKind::Similarity => 0,
        }
    }
}

/// Phonetic-code → sibling-token map for one category.
///
/// Built from the category's exact token set at commit time. A lookup for
/// token `t` returns up to `limit` indexed tokens sharing `t`'s Soundex
/// code, excluding `t` itself. Class member lists are kept sorted so
/// lookups are deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimilarityMap {
    classes: HashMap<String, Vec<String>, RandomState>,
    limit: usize,
}

impl SimilarityMap {
    pub fn new(limit: usize) -> Self {
        Self {
            classes: HashMap::default(),
            limit,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Sibling tokens for a query token, capped at the configured limit.
    pub fn similar_to(&self, token: &str) -> Vec<&str> {
        let Some(code) = soundex(token) else {
            return Vec::new();
        };
        let Some(members) = self.classes.get(&code) else {
            return Vec::new();
        };
        members
            .iter()
            .map(String::as_str)
            .filter(|member| *member != token)
            .take(self.limit)
            .collect()
    }

    /// Add an indexed token to its phonetic class.
    pub(crate) fn insert(&mut self, token: &str) {
        let Some(code) = soundex(token) else {
            return;
        };
        let members = self.classes.entry(code).or_default();
        if let Err(pos) = members.binary_search_by(|m| m.as_str().cmp(token)) {
            members.insert(pos, token.to_string());
        }
    }
}
