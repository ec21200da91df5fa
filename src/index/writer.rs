//! Building immutable index snapshots from source records.

use crate::analysis::tokenizer::Tokenizer;
use crate::data::{DocId, Record};
use crate::index::bundle::SimilarityMap;
use crate::index::category::{Category, CategoryOptions, LocationMapper, SimilarityStrategy};
use crate::index::posting::PostingMap;
use crate::index::schema::Schema;
use crate::index::Index;

/// Accumulates records and emits an immutable [`Index`].
///
/// The writer is the only mutable stage of an index's life: records go in
/// through [`IndexWriter::add`], and [`IndexWriter::commit`] seals the
/// posting maps (computing token weights), derives similarity classes and
/// location buckets, and hands back a snapshot that is never mutated
/// again.
///
/// # Examples
///
/// ```
/// use crocus::{CategoryOptions, IndexWriter, Record, Schema, SearchRequest};
///
/// let schema = Schema::builder("books")
///     .category("title", CategoryOptions::new())
///     .build()
///     .unwrap();
///
/// let mut writer = IndexWriter::new(schema);
/// writer.add(Record::new(1).set("title", "calm systems"));
/// writer.add(Record::new(2).set("title", "calm seas"));
/// let index = writer.commit();
///
/// let results = index.search(SearchRequest::new("calm"));
/// assert_eq!(results.ids, vec![2, 1]);
/// ```
pub struct IndexWriter {
    schema_name: String,
    tokenizer: Tokenizer,
    accumulators: Vec<Accumulator>,
}

struct Accumulator {
    name: String,
    options: CategoryOptions,
    exact: PostingMap,
    partial: PostingMap,
    numeric: Vec<(DocId, f64)>,
}

impl IndexWriter {
    /// Create a writer with the default tokenizer.
    pub fn new(schema: Schema) -> Self {
        Self::with_tokenizer(schema, Tokenizer::new())
    }

    /// Create a writer with a custom tokenizer.
    ///
    /// The same tokenizer configuration is carried into the snapshot and
    /// used for queries, so index-side and query-side normalization agree.
    pub fn with_tokenizer(schema: Schema, tokenizer: Tokenizer) -> Self {
        let accumulators = schema
            .categories
            .into_iter()
            .map(|(name, options)| Accumulator {
                name,
                options,
                exact: PostingMap::new(),
                partial: PostingMap::new(),
                numeric: Vec::new(),
            })
            .collect();
        Self {
            schema_name: schema.name,
            tokenizer,
            accumulators,
        }
    }

    /// Feed one record into every category that reads from it.
    ///
    /// Missing fields are skipped; a location category ignores values it
    /// cannot read as numbers.
    pub fn add(&mut self, record: Record) {
        for accumulator in &mut self.accumulators {
            let source = accumulator
                .options
                .from
                .as_deref()
                .unwrap_or(&accumulator.name);
            let Some(value) = record.get(source) else {
                continue;
            };

            if accumulator.options.location.is_some() {
                if let Some(number) = value.as_number() {
                    accumulator.numeric.push((record.id, number));
                }
                continue;
            }

            let Some(text) = value.as_text() else {
                continue;
            };
            for token in self.tokenizer.index_tokens(text) {
                accumulator.exact.insert(&token, record.id);
                for prefix in accumulator.options.partial.expansions(&token) {
                    accumulator.partial.insert(&prefix, record.id);
                }
            }
        }
    }

    /// Seal all bundles and emit the immutable snapshot.
    pub fn commit(self) -> Index {
        let categories = self
            .accumulators
            .into_iter()
            .map(Accumulator::into_category)
            .collect();
        Index::from_parts(self.schema_name, categories, self.tokenizer)
    }
}

impl Accumulator {
    fn into_category(mut self) -> Category {
        // 1. Location categories: anchor the grid at the smallest value,
        //    then bucket every buffered value into the exact bundle.
        let location = self.options.location.map(|options| {
            let anchor = self
                .numeric
                .iter()
                .map(|(_, value)| *value)
                .fold(f64::INFINITY, f64::min);
            let anchor = if anchor.is_finite() { anchor } else { 0.0 };
            let mapper = LocationMapper::new(anchor, options);
            for (id, value) in &self.numeric {
                for token in mapper.index_tokens(*value) {
                    self.exact.insert(&token, *id);
                }
            }
            mapper
        });

        // 2. Similarity classes derive from the final exact token set.
        let mut similarity = match self.options.similarity {
            SimilarityStrategy::Phonetic { limit } => SimilarityMap::new(limit),
            SimilarityStrategy::None => SimilarityMap::default(),
        };
        if matches!(self.options.similarity, SimilarityStrategy::Phonetic { .. }) {
            let tokens: Vec<String> = self.exact.tokens().map(str::to_string).collect();
            for token in &tokens {
                similarity.insert(token);
            }
        }

        // 3. Seal the posting maps: every token gets its weight entry.
        self.exact.seal();
        self.partial.seal();

        let qualifiers = if self.options.qualifiers.is_empty() {
            vec![self.name.clone()]
        } else {
            self.options.qualifiers.clone()
        };

        Category {
            name: self.name,
            qualifiers,
            weight: self.options.weight,
            exact: self.exact,
            partial: self.partial,
            similarity,
            location,
        }
    }
}
