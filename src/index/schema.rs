//! Index schemas: the declared categories and their options.

use serde::{Deserialize, Serialize};

use crate::error::{CrocusError, Result};
use crate::index::category::{CategoryOptions, LocationOptions, PartialStrategy, SimilarityStrategy};

/// Declared shape of an index: its name and ordered categories.
///
/// Category order is load-bearing: it is the deterministic tie-break for
/// equal-score allocations, so schemas keep categories in declaration
/// order rather than in a map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    pub(crate) name: String,
    pub(crate) categories: Vec<(String, CategoryOptions)>,
}

impl Schema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            categories: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared categories, in declaration order.
    pub fn categories(&self) -> &[(String, CategoryOptions)] {
        &self.categories
    }
}

/// Builder for [`Schema`].
///
/// # Examples
///
/// ```
/// use crocus::{CategoryOptions, Schema, SimilarityStrategy};
///
/// let schema = Schema::builder("books")
///     .category("title", CategoryOptions::new().weight(2.0))
///     .category(
///         "author",
///         CategoryOptions::new()
///             .qualifiers(["author", "by"])
///             .similarity(SimilarityStrategy::Phonetic { limit: 5 }),
///     )
///     .location("price", 10.0, 2)
///     .build()
///     .unwrap();
/// assert_eq!(schema.categories().len(), 3);
/// ```
pub struct SchemaBuilder {
    name: String,
    categories: Vec<(String, CategoryOptions)>,
}

impl SchemaBuilder {
    /// Declare a category.
    pub fn category(mut self, name: impl Into<String>, options: CategoryOptions) -> Self {
        self.categories.push((name.into(), options));
        self
    }

    /// Declare a location category over a numeric source column.
    ///
    /// Values are bucketed on a grid of `radius / precision`; querying a
    /// value matches records whose value lies within roughly the given
    /// radius, with an error margin that narrows as precision rises
    /// (valid precisions are 1..=5).
    pub fn location(mut self, name: impl Into<String>, radius: f64, precision: u32) -> Self {
        let options = CategoryOptions {
            partial: PartialStrategy::None,
            similarity: SimilarityStrategy::None,
            location: Some(LocationOptions { radius, precision }),
            ..CategoryOptions::default()
        };
        self.categories.push((name.into(), options));
        self
    }

    /// Validate and build the schema.
    pub fn build(self) -> Result<Schema> {
        if self.categories.is_empty() {
            return Err(CrocusError::invalid_config(format!(
                "index '{}' declares no categories",
                self.name
            )));
        }
        for (i, (name, options)) in self.categories.iter().enumerate() {
            if self.categories[..i].iter().any(|(other, _)| other == name) {
                return Err(CrocusError::invalid_config(format!(
                    "duplicate category '{name}'"
                )));
            }
            if let Some(location) = &options.location {
                if !(1..=5).contains(&location.precision) {
                    return Err(CrocusError::invalid_config(format!(
                        "category '{name}': precision must be in 1..=5, got {}",
                        location.precision
                    )));
                }
                if location.radius <= 0.0 {
                    return Err(CrocusError::invalid_config(format!(
                        "category '{name}': radius must be positive"
                    )));
                }
            }
        }
        Ok(Schema {
            name: self.name,
            categories: self.categories,
        })
    }
}
