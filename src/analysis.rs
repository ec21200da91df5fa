//! Text analysis for queries and indexing.
//!
//! The pipeline is deliberately small:
//!
//! ```text
//! Text → normalize (lowercase, removals) → split → QueryToken stream
//! ```
//!
//! The same [`Tokenizer`] serves both sides: [`Tokenizer::tokenize`]
//! parses the `qualifier:text` syntax for queries, while
//! [`Tokenizer::index_tokens`] emits plain tokens for index building.
//! Phonetic similarity classes are keyed by the Soundex codes produced in
//! [`phonetic`].

pub mod phonetic;
pub mod token;
pub mod tokenizer;

// Re-exports
pub use token::QueryToken;
pub use tokenizer::Tokenizer;
