//! Shared helper functions for SQLite repositories.

use crate::db::{CategoryFilter, Page, QuestionQuery};

/// A value bound to a `?` placeholder of a generated clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Int(i64),
    Text(String),
}

/// WHERE clause plus its bind values, in placeholder order.
#[derive(Debug, Default)]
pub struct QuestionFilter {
    pub where_clause: String,
    pub bind_values: Vec<BindValue>,
}

/// Build LIMIT/OFFSET clause from Page parameters.
/// Note: SQL requires LIMIT when using OFFSET. If offset is provided without limit,
/// we use LIMIT -1 (SQLite's "no limit" value).
pub fn build_limit_offset_clause(page: &Page) -> String {
    let mut clause = String::new();

    let offset = page.offset.filter(|o| *o > 0);

    if let Some(limit) = page.limit {
        clause.push_str(&format!(" LIMIT {}", limit));
    } else if offset.is_some() {
        clause.push_str(" LIMIT -1");
    }

    if let Some(offset) = offset {
        clause.push_str(&format!(" OFFSET {}", offset));
    }

    clause
}

/// Case-insensitive substring match over question text.
///
/// SQLite's `LIKE` folds ASCII only, so the search term is applied here
/// with full Unicode lowercasing.
pub fn matches_search(text: &str, term: &str) -> bool {
    text.to_lowercase().contains(&term.to_lowercase())
}

/// Build the WHERE clause for a question query.
///
/// The search term is not part of the clause; see [`matches_search`].
///
/// Excluded ids travel as one JSON array bound to `json_each`, so the
/// statement shape does not depend on how many ids are excluded.
pub fn build_question_filter(query: &QuestionQuery) -> QuestionFilter {
    let mut conditions: Vec<&str> = vec![];
    let mut bind_values = vec![];

    match query.category {
        Some(CategoryFilter::Only(id)) => {
            conditions.push("category = ?");
            bind_values.push(BindValue::Int(id));
        }
        Some(CategoryFilter::Except(id)) => {
            conditions.push("category != ?");
            bind_values.push(BindValue::Int(id));
        }
        None => {}
    }

    if !query.exclude_ids.is_empty() {
        conditions.push("id NOT IN (SELECT value FROM json_each(?))");
        let ids = query
            .exclude_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        bind_values.push(BindValue::Text(format!("[{}]", ids)));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    QuestionFilter {
        where_clause,
        bind_values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_offset_empty_page() {
        assert_eq!(build_limit_offset_clause(&Page::default()), "");
    }

    #[test]
    fn test_limit_offset_with_both() {
        let page = Page {
            limit: Some(10),
            offset: Some(20),
        };
        assert_eq!(build_limit_offset_clause(&page), " LIMIT 10 OFFSET 20");
    }

    #[test]
    fn test_limit_offset_zero_offset_is_dropped() {
        let page = Page {
            limit: Some(10),
            offset: Some(0),
        };
        assert_eq!(build_limit_offset_clause(&page), " LIMIT 10");
    }

    #[test]
    fn test_offset_without_limit_uses_no_limit() {
        let page = Page {
            limit: None,
            offset: Some(5),
        };
        assert_eq!(build_limit_offset_clause(&page), " LIMIT -1 OFFSET 5");
    }

    #[test]
    fn test_matches_search_folds_unicode_case() {
        assert!(matches_search("Où est située l'ÉCOLE normale?", "école"));
        assert!(matches_search("Сколько лет Москве?", "МОСКВЕ"));
        assert!(matches_search("Up 100% of the time", "100%"));
        assert!(!matches_search("plain", "1_00"));
        assert!(matches_search("anything", ""));
    }

    #[test]
    fn test_filter_unfiltered_query() {
        let filter = build_question_filter(&QuestionQuery::default());
        assert!(filter.where_clause.is_empty());
        assert!(filter.bind_values.is_empty());
    }

    #[test]
    fn test_filter_combines_conditions_in_bind_order() {
        let query = QuestionQuery {
            category: Some(CategoryFilter::Except(2)),
            search: Some("capital".to_string()),
            exclude_ids: vec![1, 5],
            ..Default::default()
        };
        let filter = build_question_filter(&query);
        assert_eq!(
            filter.where_clause,
            "WHERE category != ? AND id NOT IN (SELECT value FROM json_each(?))"
        );
        assert_eq!(
            filter.bind_values,
            vec![
                BindValue::Int(2),
                BindValue::Text("[1,5]".to_string()),
            ]
        );
    }
}
