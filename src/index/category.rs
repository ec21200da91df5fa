//! Categories: the logical fields of an index.

use serde::{Deserialize, Serialize};

use crate::data::DocId;
use crate::index::bundle::{BundleKind, SimilarityMap};
use crate::index::posting::PostingMap;

/// Substring expansion applied to a category's tokens at build time.
///
/// `Substring { from, to }` indexes every prefix of an indexed token whose
/// length lies in `from..=to`. Negative offsets count from the end of the
/// token, Ruby-style: for a five-letter token, `from: -3` resolves to
/// length 3 and `to: -1` to length 5. A query token then matches partially
/// whenever it equals one of those prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PartialStrategy {
    /// No substring expansion.
    None,
    /// Prefix expansion between the resolved `from` and `to` lengths.
    Substring { from: i32, to: i32 },
}

impl Default for PartialStrategy {
    fn default() -> Self {
        PartialStrategy::Substring { from: -3, to: -1 }
    }
}

impl PartialStrategy {
    /// Prefix lengths this strategy generates for a token, in characters.
    pub(crate) fn expansions(&self, token: &str) -> Vec<String> {
        let PartialStrategy::Substring { from, to } = *self else {
            return Vec::new();
        };
        let len = token.chars().count() as i32;
        let resolve = |offset: i32| -> i32 {
            if offset < 0 {
                len + 1 + offset
            } else {
                offset
            }
        };
        let lo = resolve(from).max(1);
        let hi = resolve(to).min(len);

        (lo..=hi)
            .map(|n| token.chars().take(n as usize).collect())
            .collect()
    }
}

/// Strategy for phonetic similarity classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimilarityStrategy {
    /// No similarity fallback.
    #[default]
    None,
    /// Soundex classes, returning up to `limit` siblings per lookup.
    Phonetic { limit: usize },
}

/// Numeric bucketing for location categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LocationOptions {
    /// Radius around a queried value that should still match.
    pub radius: f64,
    /// Bucketing precision, 1..=5. Higher is finer: the matched band
    /// around the queried value tightens toward the radius.
    pub precision: u32,
}

/// Configuration for a single category of an index.
///
/// Defaults: qualifiers fall back to the category name, partial expansion
/// keeps the last three prefix lengths, no similarity, weight 0, data read
/// from the field sharing the category's name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryOptions {
    /// Qualifier aliases. Empty means "the category name only".
    #[serde(default)]
    pub qualifiers: Vec<String>,

    /// Substring expansion strategy.
    #[serde(default)]
    pub partial: PartialStrategy,

    /// Phonetic similarity strategy.
    #[serde(default)]
    pub similarity: SimilarityStrategy,

    /// Score contribution of this category in allocations.
    #[serde(default)]
    pub weight: f64,

    /// Read data from this source field instead of the category name.
    #[serde(default)]
    pub from: Option<String>,

    /// Numeric bucketing; set through `SchemaBuilder::location`.
    #[serde(default)]
    pub location: Option<LocationOptions>,
}

impl CategoryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the qualifier aliases for this category.
    pub fn qualifiers<I, S>(mut self, qualifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.qualifiers = qualifiers.into_iter().map(Into::into).collect();
        self
    }

    /// Set the partial strategy.
    pub fn partial(mut self, partial: PartialStrategy) -> Self {
        self.partial = partial;
        self
    }

    /// Set the similarity strategy.
    pub fn similarity(mut self, similarity: SimilarityStrategy) -> Self {
        self.similarity = similarity;
        self
    }

    /// Set the category weight.
    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Read data from another source field.
    pub fn from_field(mut self, field: impl Into<String>) -> Self {
        self.from = Some(field.into());
        self
    }
}

/// Maps numeric tokens onto grid buckets for a location category.
///
/// The grid is `radius / precision` wide and anchored at the smallest
/// value seen at build time. Indexing expands a value to the
/// `2 * precision + 1` buckets around it; querying maps a value to its one
/// bucket, so a match means the two values are at most `precision + 1`
/// buckets apart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LocationMapper {
    pub(crate) anchor: f64,
    pub(crate) grid: f64,
    pub(crate) precision: u32,
}

impl LocationMapper {
    pub(crate) fn new(anchor: f64, options: LocationOptions) -> Self {
        Self {
            anchor,
            grid: options.radius / options.precision as f64,
            precision: options.precision,
        }
    }

    fn bucket(&self, value: f64) -> i64 {
        ((value - self.anchor) / self.grid).floor() as i64
    }

    /// The bucket tokens an indexed value is stored under.
    pub(crate) fn index_tokens(&self, value: f64) -> Vec<String> {
        let center = self.bucket(value);
        let spread = self.precision as i64;
        (center - spread..=center + spread)
            .map(|b| b.to_string())
            .collect()
    }

    /// The single bucket token a query value is looked up under.
    pub(crate) fn query_token(&self, text: &str) -> Option<String> {
        let value: f64 = text.trim().parse().ok()?;
        Some(self.bucket(value).to_string())
    }
}

/// One logical field of a built index, with its three posting bundles.
///
/// Immutable after build; queried concurrently through shared borrows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub(crate) name: String,
    pub(crate) qualifiers: Vec<String>,
    pub(crate) weight: f64,
    pub(crate) exact: PostingMap,
    pub(crate) partial: PostingMap,
    pub(crate) similarity: SimilarityMap,
    pub(crate) location: Option<LocationMapper>,
}

impl Category {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// True if this category answers to the given qualifier alias.
    pub fn matches_qualifier(&self, qualifier: &str) -> bool {
        self.qualifiers.iter().any(|q| q == qualifier)
    }

    /// The best bundle able to satisfy a query token here, with the
    /// token's weight in that bundle.
    ///
    /// Preference order: exact, then partial, then similarity. The
    /// similarity weight is the best exact weight among the siblings.
    /// `None` means the token cannot match this category at all, so no
    /// allocation assigns it here.
    pub(crate) fn best_bundle(&self, token_text: &str) -> Option<(BundleKind, f64)> {
        let text = self.effective_token(token_text)?;

        if let Some(weight) = self.exact.weight(&text) {
            return Some((BundleKind::Exact, weight));
        }
        if let Some(weight) = self.partial.weight(&text) {
            return Some((BundleKind::Partial, weight));
        }
        let siblings = self.similarity.similar_to(&text);
        if siblings.is_empty() {
            return None;
        }
        let weight = siblings
            .iter()
            .filter_map(|sibling| self.exact.weight(sibling))
            .fold(f64::NEG_INFINITY, f64::max);
        Some((BundleKind::Similarity, weight))
    }

    /// The id list backing a combination, ascending.
    pub(crate) fn posting(&self, token_text: &str, kind: BundleKind) -> Vec<DocId> {
        let Some(text) = self.effective_token(token_text) else {
            return Vec::new();
        };
        match kind {
            BundleKind::Exact => self.exact.ids(&text).to_vec(),
            BundleKind::Partial => self.partial.ids(&text).to_vec(),
            BundleKind::Similarity => {
                let siblings = self.similarity.similar_to(&text);
                let lists: Vec<&[DocId]> = siblings
                    .into_iter()
                    .map(|sibling| self.exact.ids(sibling))
                    .collect();
                crate::query::intersect::union(&lists)
            }
        }
    }

    /// Location categories rewrite numeric tokens into bucket tokens;
    /// non-numeric tokens cannot match them.
    fn effective_token(&self, text: &str) -> Option<String> {
        match &self.location {
            Some(mapper) => mapper.query_token(text),
            None => Some(text.to_string()),
        }
    }
}
