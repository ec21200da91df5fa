//! # Crocus
//!
//! A fast, category-routed in-memory search engine library for Rust.
//!
//! Crocus indexes structured records into named *categories* (title,
//! author, …) and answers free-form query text with a ranked list of
//! record ids. Every query token is bound to a category through one of
//! three bundles (exact postings, substring-expanded postings, or
//! phonetic similarity classes), and the engine enumerates these bindings
//! (*allocations*) best-score-first, intersecting posting lists until the
//! requested result window is covered.
//!
//! ## Features
//!
//! - Pure Rust, in-memory snapshots, sub-millisecond queries
//! - Qualifier syntax (`title:rust`) routing tokens to categories
//! - Partial (prefix) and phonetic (Soundex) matching fallbacks
//! - Best-first allocation enumeration with early termination
//! - Numeric location categories with grid bucketing
//! - Immutable snapshots, atomically swappable under live queries
//!
//! ## Usage
//!
//! ```
//! use crocus::{CategoryOptions, IndexWriter, Record, Schema, SearchRequest};
//!
//! let schema = Schema::builder("books")
//!     .category("title", CategoryOptions::new().weight(1.0))
//!     .category("author", CategoryOptions::new())
//!     .build()
//!     .unwrap();
//!
//! let mut writer = IndexWriter::new(schema);
//! writer.add(Record::new(1).set("title", "systems at scale").set("author", "june"));
//! writer.add(Record::new(2).set("title", "quiet systems").set("author", "april"));
//! let index = writer.commit();
//!
//! let results = index.search(SearchRequest::new("systems").limit(10));
//! assert_eq!(results.ids, vec![2, 1]);
//!
//! let results = index.search(SearchRequest::new("author:june systems"));
//! assert_eq!(results.ids, vec![1]);
//! ```

// Core modules
pub mod analysis;
mod data;
mod error;
pub mod index;
pub mod query;
mod search;
pub mod util;

// Re-exports for the public API
pub use analysis::token::QueryToken;
pub use analysis::tokenizer::Tokenizer;
pub use data::{DataValue, DocId, Record};
pub use error::{CrocusError, Result};
pub use index::bundle::BundleKind;
pub use index::category::{CategoryOptions, PartialStrategy, SimilarityStrategy};
pub use index::schema::Schema;
pub use index::writer::IndexWriter;
pub use index::{Index, Indexes};
pub use query::allocation::AllocationSummary;
pub use search::{Results, SearchRequest, DEFAULT_LIMIT};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
