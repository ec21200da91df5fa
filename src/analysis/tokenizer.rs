//! Query and index tokenization.

use regex::Regex;

use crate::analysis::token::QueryToken;

/// Splits raw text into normalized tokens.
///
/// Configuration mirrors what the engine needs and nothing more: a split
/// pattern (default: whitespace runs), an optional removal pattern for
/// punctuation, and an optional cap on the number of tokens taken from a
/// query. Text is lowercased before anything else.
///
/// # Qualifier syntax
///
/// On the query side, a fragment of the form `x:y` yields a token with
/// text `y` restricted to qualifier `x`; `x,y:z` restricts to both `x` and
/// `y`. The index side ([`Tokenizer::index_tokens`]) never interprets
/// colons.
///
/// # Examples
///
/// ```
/// use crocus::analysis::Tokenizer;
///
/// let tokenizer = Tokenizer::new();
/// let tokens = tokenizer.tokenize("Title:Rust  search");
/// assert_eq!(tokens[0].text, "rust");
/// assert_eq!(tokens[0].qualifiers, Some(vec!["title".to_string()]));
/// assert_eq!(tokens[1].text, "search");
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer {
    splits_on: Regex,
    removes: Option<Regex>,
    max_tokens: Option<usize>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Create a tokenizer that splits on whitespace and removes nothing.
    pub fn new() -> Self {
        Self {
            splits_on: Regex::new(r"\s+").expect("static pattern"),
            removes: None,
            max_tokens: None,
        }
    }

    /// Set the pattern text is split on.
    pub fn splits_text_on(mut self, pattern: Regex) -> Self {
        self.splits_on = pattern;
        self
    }

    /// Set a pattern whose matches are removed before splitting.
    ///
    /// The pattern must leave `:` and `,` alone if qualifier syntax is to
    /// keep working on the query side.
    pub fn removes_characters(mut self, pattern: Regex) -> Self {
        self.removes = Some(pattern);
        self
    }

    /// Cap the number of tokens taken from a query.
    pub fn max_tokens(mut self, n: usize) -> Self {
        self.max_tokens = Some(n);
        self
    }

    /// Tokenize query text, parsing qualifier syntax.
    ///
    /// Empty fragments are dropped. A fragment whose text is empty after
    /// qualifier parsing is dropped too; a qualifier list that is empty
    /// after dropping empty entries yields an unqualified token.
    pub fn tokenize(&self, text: &str) -> Vec<QueryToken> {
        let mut tokens: Vec<QueryToken> = self
            .fragments(text)
            .into_iter()
            .filter_map(|fragment| self.parse_fragment(&fragment))
            .collect();

        if let Some(max) = self.max_tokens {
            tokens.truncate(max);
        }
        tokens
    }

    /// Tokenize field text for indexing. No qualifier parsing, no cap.
    pub fn index_tokens(&self, text: &str) -> Vec<String> {
        self.fragments(text)
    }

    fn fragments(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let cleaned = match &self.removes {
            Some(pattern) => pattern.replace_all(&lowered, ""),
            None => lowered.as_str().into(),
        };

        self.splits_on
            .split(&cleaned)
            .filter(|fragment| !fragment.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn parse_fragment(&self, fragment: &str) -> Option<QueryToken> {
        match fragment.split_once(':') {
            Some((qualifier_part, text)) => {
                if text.is_empty() {
                    return None;
                }
                let qualifiers: Vec<String> = qualifier_part
                    .split(',')
                    .filter(|q| !q.is_empty())
                    .map(str::to_string)
                    .collect();
                if qualifiers.is_empty() {
                    Some(QueryToken::unqualified(text))
                } else {
                    Some(QueryToken::qualified(text, qualifiers))
                }
            }
            None => Some(QueryToken::unqualified(fragment)),
        }
    }
}
