//! Resolution of user-supplied qualifiers to allowed categories.

use crate::analysis::token::QueryToken;
use crate::index::Index;

/// Compute the categories a token is allowed to match, as indexes into
/// the snapshot's category order.
///
/// A token without qualifiers may match every category. With qualifiers,
/// the allowed set is the union over categories whose alias lists contain
/// any of them. Qualifiers matching no category at all are appended to
/// `unknown` (deduplicated) so the orchestrator can surface them as a
/// diagnostic; an empty allowed set makes the token unsatisfiable.
pub(crate) fn allowed_categories(
    index: &Index,
    token: &QueryToken,
    unknown: &mut Vec<String>,
) -> Vec<usize> {
    if !token.has_qualifiers() {
        return (0..index.categories().len()).collect();
    }

    let mut allowed = Vec::new();
    for qualifier in token.qualifiers.as_deref().unwrap_or_default() {
        let mut matched = false;
        for (position, category) in index.categories().iter().enumerate() {
            if category.matches_qualifier(qualifier) {
                matched = true;
                if !allowed.contains(&position) {
                    allowed.push(position);
                }
            }
        }
        if !matched && !unknown.contains(qualifier) {
            unknown.push(qualifier.clone());
        }
    }
    allowed.sort_unstable();
    allowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Record;
    use crate::index::category::CategoryOptions;
    use crate::index::schema::Schema;
    use crate::index::writer::IndexWriter;

    fn index() -> Index {
        let schema = Schema::builder("test")
            .category("title", CategoryOptions::new())
            .category(
                "author",
                CategoryOptions::new().qualifiers(["author", "by"]),
            )
            .build()
            .unwrap();
        let mut writer = IndexWriter::new(schema);
        writer.add(Record::new(1).set("title", "x").set("author", "y"));
        writer.commit()
    }

    #[test]
    fn test_unqualified_token_matches_all_categories() {
        let index = index();
        let mut unknown = Vec::new();
        let token = QueryToken::unqualified("x");
        assert_eq!(
            allowed_categories(&index, &token, &mut unknown),
            vec![0, 1]
        );
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_alias_resolves_to_its_category() {
        let index = index();
        let mut unknown = Vec::new();
        let token = QueryToken::qualified("y", vec!["by".into()]);
        assert_eq!(allowed_categories(&index, &token, &mut unknown), vec![1]);
    }

    #[test]
    fn test_unknown_qualifier_reported_not_fatal() {
        let index = index();
        let mut unknown = Vec::new();
        let token = QueryToken::qualified("x", vec!["isbn".into(), "title".into()]);
        assert_eq!(allowed_categories(&index, &token, &mut unknown), vec![0]);
        assert_eq!(unknown, vec!["isbn".to_string()]);
    }

    #[test]
    fn test_all_unknown_qualifiers_make_token_unsatisfiable() {
        let index = index();
        let mut unknown = Vec::new();
        let token = QueryToken::qualified("x", vec!["isbn".into()]);
        assert!(allowed_categories(&index, &token, &mut unknown).is_empty());
        assert_eq!(unknown, vec!["isbn".to_string()]);
    }
}
