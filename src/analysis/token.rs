//! Query token representation.

/// A normalized text fragment extracted from a query, with the qualifiers
/// the user attached to it.
///
/// Tokens are immutable for the life of a query. A token with
/// `qualifiers: None` may match any category of the index; explicit
/// qualifiers restrict it to the categories whose alias lists contain at
/// least one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryToken {
    /// Normalized token text.
    pub text: String,

    /// User-requested qualifier strings, e.g. `["title"]` for `title:rust`.
    pub qualifiers: Option<Vec<String>>,
}

impl QueryToken {
    /// Create a token that may match any category.
    pub fn unqualified(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            qualifiers: None,
        }
    }

    /// Create a token restricted to the given qualifiers.
    pub fn qualified(text: impl Into<String>, qualifiers: Vec<String>) -> Self {
        Self {
            text: text.into(),
            qualifiers: Some(qualifiers),
        }
    }

    /// True if the user attached qualifiers to this token.
    pub fn has_qualifiers(&self) -> bool {
        self.qualifiers.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_qualifiers() {
        assert!(!QueryToken::unqualified("rust").has_qualifiers());
        assert!(QueryToken::qualified("rust", vec!["title".into()]).has_qualifiers());
    }
}
