//! Task list filter query builder.
//!
//! Converts a [`TaskFilter`] into a parameterized WHERE clause for the
//! list query. The owning `user_id` is a constructor argument, not a
//! filter option, so the ownership predicate cannot be omitted from the
//! generated SQL.

use tasklist_core::TaskFilter;

use crate::escape_like;

/// Type-safe parameter binding for SQL queries.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryParam {
    /// Boolean parameter.
    Bool(bool),
    /// String parameter.
    String(String),
}

/// Generates the WHERE clause for per-user task listing.
///
/// Fragments use SQLite's positional `?` placeholders and parameters are
/// returned in placeholder order. Search input passes through
/// [`escape_like`] so `%`, `_`, and `\` match literally.
///
/// # Example
///
/// ```rust,ignore
/// let builder = TaskFilterQueryBuilder::new("user-A-123", TaskFilter::default());
/// let (sql, params) = builder.build();
/// // sql: "user_id = ?"
/// // params: [QueryParam::String("user-A-123")]
/// ```
pub struct TaskFilterQueryBuilder {
    user_id: String,
    filter: TaskFilter,
}

impl TaskFilterQueryBuilder {
    /// Create a builder scoped to `user_id`.
    pub fn new(user_id: impl Into<String>, filter: TaskFilter) -> Self {
        Self {
            user_id: user_id.into(),
            filter,
        }
    }

    /// Build the WHERE clause fragment and its parameters.
    ///
    /// The ownership predicate always comes first; the optional filters
    /// AND-combine after it. An empty search string counts as absent.
    pub fn build(&self) -> (String, Vec<QueryParam>) {
        let mut clauses = vec!["user_id = ?".to_string()];
        let mut params = vec![QueryParam::String(self.user_id.clone())];

        if let Some(is_done) = self.filter.is_done {
            clauses.push("is_done = ?".to_string());
            params.push(QueryParam::Bool(is_done));
        }

        if let Some(ref search) = self.filter.search {
            if !search.is_empty() {
                // The '%' wrapping happens in SQL so the bound value stays a
                // plain (escaped) substring. LIKE is ASCII case-insensitive
                // in SQLite; a NULL description simply never matches.
                clauses.push(
                    "(title LIKE '%' || ? || '%' ESCAPE '\\' \
                     OR description LIKE '%' || ? || '%' ESCAPE '\\')"
                        .to_string(),
                );
                let escaped = escape_like(search);
                params.push(QueryParam::String(escaped.clone()));
                params.push(QueryParam::String(escaped));
            }
        }

        (clauses.join(" AND "), params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_keeps_ownership_predicate() {
        let builder = TaskFilterQueryBuilder::new("user-A-123", TaskFilter::default());
        let (sql, params) = builder.build();

        assert_eq!(sql, "user_id = ?");
        assert_eq!(params, vec![QueryParam::String("user-A-123".to_string())]);
    }

    #[test]
    fn test_is_done_filter() {
        let filter = TaskFilter {
            is_done: Some(true),
            ..Default::default()
        };
        let (sql, params) = TaskFilterQueryBuilder::new("u1", filter).build();

        assert_eq!(sql, "user_id = ? AND is_done = ?");
        assert_eq!(
            params,
            vec![
                QueryParam::String("u1".to_string()),
                QueryParam::Bool(true)
            ]
        );
    }

    #[test]
    fn test_search_filter_binds_escaped_term_twice() {
        let filter = TaskFilter {
            search: Some("milk".to_string()),
            ..Default::default()
        };
        let (sql, params) = TaskFilterQueryBuilder::new("u1", filter).build();

        assert_eq!(
            sql,
            "user_id = ? AND (title LIKE '%' || ? || '%' ESCAPE '\\' \
             OR description LIKE '%' || ? || '%' ESCAPE '\\')"
        );
        assert_eq!(params.len(), 3);
        assert_eq!(params[1], QueryParam::String("milk".to_string()));
        assert_eq!(params[2], QueryParam::String("milk".to_string()));
    }

    #[test]
    fn test_search_escapes_like_wildcards() {
        let filter = TaskFilter {
            search: Some("100%_done".to_string()),
            ..Default::default()
        };
        let (_, params) = TaskFilterQueryBuilder::new("u1", filter).build();

        assert_eq!(
            params[1],
            QueryParam::String("100\\%\\_done".to_string())
        );
    }

    #[test]
    fn test_empty_search_treated_as_absent() {
        let filter = TaskFilter {
            search: Some(String::new()),
            ..Default::default()
        };
        let (sql, params) = TaskFilterQueryBuilder::new("u1", filter).build();

        assert_eq!(sql, "user_id = ?");
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_combined_filters_and_param_order() {
        let filter = TaskFilter {
            is_done: Some(false),
            search: Some("ship".to_string()),
        };
        let (sql, params) = TaskFilterQueryBuilder::new("u1", filter).build();

        assert!(sql.starts_with("user_id = ? AND is_done = ? AND (title LIKE"));
        assert_eq!(
            params,
            vec![
                QueryParam::String("u1".to_string()),
                QueryParam::Bool(false),
                QueryParam::String("ship".to_string()),
                QueryParam::String("ship".to_string()),
            ]
        );
    }
}
