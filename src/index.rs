//! Index snapshots and the registry of live indexes.
//!
//! An [`Index`] is an immutable, fully-built snapshot: categories with
//! sealed posting bundles plus the tokenizer configuration queries are
//! normalized with. Snapshots are built by [`writer::IndexWriter`], shared
//! between concurrent queries through `Arc`, and swapped atomically in the
//! [`Indexes`] registry when a rebuild lands; in-flight queries simply
//! finish on the snapshot they started with.

pub mod bundle;
pub mod category;
pub mod posting;
pub mod schema;
pub mod writer;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;

use ahash::RandomState;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::Tokenizer;
use crate::error::{CrocusError, Result};
use crate::index::category::Category;
use crate::search::{self, Results, SearchRequest};

/// An immutable, fully-built index ready for queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Index {
    name: String,
    categories: Vec<Category>,

    /// Tokenizer configuration is runtime state (regexes), not snapshot
    /// data; restore a custom one with [`Index::with_tokenizer`] after
    /// loading.
    #[serde(skip, default)]
    tokenizer: Tokenizer,
}

impl Index {
    pub(crate) fn from_parts(
        name: String,
        categories: Vec<Category>,
        tokenizer: Tokenizer,
    ) -> Self {
        Self {
            name,
            categories,
            tokenizer,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The index's categories, in schema declaration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub(crate) fn category(&self, index: usize) -> &Category {
        &self.categories[index]
    }

    pub(crate) fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Replace the tokenizer, e.g. after [`Index::load`].
    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Run a query against this snapshot.
    pub fn search(&self, request: SearchRequest) -> Results {
        search::execute(self, &request)
    }

    /// Persist the snapshot to disk.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        serde_json::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Load a snapshot previously written with [`Index::save`].
    ///
    /// A missing file is [`CrocusError::SnapshotMissing`]; this is the one
    /// fatal failure mode of the engine.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CrocusError::snapshot_missing(path));
        }
        let file = File::open(path)?;
        let index = serde_json::from_reader(BufReader::new(file))?;
        Ok(index)
    }
}

/// Registry of live index snapshots, addressed by name.
///
/// The registry is the only shared mutable state in the engine, guarded by
/// a `parking_lot::RwLock`. Queries take an `Arc` clone under the read
/// lock and run lock-free from then on; [`Indexes::swap`] replaces a
/// snapshot atomically.
#[derive(Debug, Default)]
pub struct Indexes {
    inner: RwLock<HashMap<String, Arc<Index>, RandomState>>,
}

impl Indexes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or atomically replace a snapshot under its name.
    pub fn swap(&self, index: Index) -> Option<Arc<Index>> {
        let name = index.name().to_string();
        self.inner.write().insert(name, Arc::new(index))
    }

    /// Fetch a snapshot handle by name.
    pub fn get(&self, name: &str) -> Result<Arc<Index>> {
        self.inner
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| CrocusError::unknown_index(name))
    }

    /// Remove a snapshot, returning the handle if one was registered.
    pub fn remove(&self, name: &str) -> Option<Arc<Index>> {
        self.inner.write().remove(name)
    }

    /// Host-level query API: search one index by name.
    pub fn search(
        &self,
        name: &str,
        query: &str,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Results> {
        let index = self.get(name)?;
        let mut request = SearchRequest::new(query);
        if let Some(limit) = limit {
            request = request.limit(limit);
        }
        if let Some(offset) = offset {
            request = request.offset(offset);
        }
        Ok(index.search(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Record;
    use crate::index::category::CategoryOptions;
    use crate::index::schema::Schema;
    use crate::index::writer::IndexWriter;

    fn build_index(name: &str) -> Index {
        let schema = Schema::builder(name)
            .category("title", CategoryOptions::new())
            .build()
            .unwrap();
        let mut writer = IndexWriter::new(schema);
        writer.add(Record::new(1).set("title", "hello"));
        writer.commit()
    }

    #[test]
    fn test_unknown_index_is_an_error() {
        let indexes = Indexes::new();
        assert!(matches!(
            indexes.search("missing", "hello", None, None),
            Err(CrocusError::UnknownIndex { .. })
        ));
    }

    #[test]
    fn test_swap_replaces_snapshot_atomically() {
        let indexes = Indexes::new();
        indexes.swap(build_index("books"));

        // A query context holding the old Arc keeps working after a swap.
        let held = indexes.get("books").unwrap();
        let previous = indexes.swap(build_index("books"));
        assert!(previous.is_some());
        assert!(Arc::ptr_eq(&held, &previous.unwrap()));

        let fresh = indexes.get("books").unwrap();
        assert!(!Arc::ptr_eq(&held, &fresh));
        assert_eq!(held.search(SearchRequest::new("hello")).ids, vec![1]);
    }
}
