//! Token-to-posting-list maps, the storage behind every bundle.

use std::collections::HashMap;

use ahash::RandomState;
use serde::{Deserialize, Serialize};

use crate::data::DocId;

const EMPTY: &[DocId] = &[];

/// Inverted postings for one bundle of one category.
///
/// Maps a token to a strictly ascending, duplicate-free id list, and to a
/// weight computed when the map is sealed at build time. Lookups on absent
/// tokens return an empty borrow, never an error. Sealed maps are shared
/// read-only between all concurrent queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostingMap {
    postings: HashMap<String, Vec<DocId>, RandomState>,
    weights: HashMap<String, f64, RandomState>,
}

impl PostingMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The ascending id list for a token. Empty if the token is unknown.
    pub fn ids(&self, token: &str) -> &[DocId] {
        self.postings.get(token).map(Vec::as_slice).unwrap_or(EMPTY)
    }

    /// The weight of a token, present for every indexed token once sealed.
    pub fn weight(&self, token: &str) -> Option<f64> {
        self.weights.get(token).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Iterate over the distinct tokens of this map.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }

    /// Insert an id under a token, keeping the list ascending and unique.
    pub(crate) fn insert(&mut self, token: &str, id: DocId) {
        let list = match self.postings.get_mut(token) {
            Some(list) => list,
            None => self.postings.entry(token.to_string()).or_default(),
        };
        match list.binary_search(&id) {
            Ok(_) => {}
            Err(pos) => list.insert(pos, id),
        }
    }

    /// Compute weights for every token: the natural log of its list length.
    ///
    /// Called once when the writer commits; afterwards the map is
    /// effectively immutable.
    pub(crate) fn seal(&mut self) {
        self.weights = self
            .postings
            .iter()
            .map(|(token, ids)| (token.clone(), (ids.len() as f64).ln()))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_stay_ascending_and_unique() {
        let mut map = PostingMap::new();
        for id in [5, 1, 3, 5, 2, 1] {
            map.insert("hello", id);
        }
        assert_eq!(map.ids("hello"), &[1, 2, 3, 5]);
    }

    #[test]
    fn test_missing_token_is_empty_not_error() {
        let map = PostingMap::new();
        assert!(map.ids("absent").is_empty());
        assert_eq!(map.weight("absent"), None);
    }

    #[test]
    fn test_seal_weights_every_token() {
        let mut map = PostingMap::new();
        map.insert("one", 1);
        map.insert("many", 1);
        map.insert("many", 2);
        map.insert("many", 3);
        map.seal();

        assert_eq!(map.weight("one"), Some(0.0));
        assert_eq!(map.weight("many"), Some(3f64.ln()));
    }
}
