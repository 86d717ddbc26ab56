//! WHERE clause builder shared by the record tables
//!
//! All three record tables carry `user_id` and `date` columns, so the same
//! filter applies to each of them.

use crate::models::RecordFilter;

/// SQL components built from a [`RecordFilter`]
pub struct FilterClause {
    /// WHERE clause including "WHERE" keyword (empty if no conditions)
    pub where_clause: String,
    /// LIMIT clause including "LIMIT" keyword (empty if unlimited)
    pub limit_clause: String,
    /// Parameters for the query (boxed for rusqlite compatibility)
    pub params: Vec<Box<dyn rusqlite::ToSql>>,
}

impl FilterClause {
    pub fn build(filter: &RecordFilter) -> Self {
        let mut conditions = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref user_id) = filter.user_id {
            conditions.push("user_id = ?");
            params.push(Box::new(user_id.clone()));
        }

        if let Some((start, end)) = filter.date_range() {
            conditions.push("date BETWEEN ? AND ?");
            params.push(Box::new(start.to_string()));
            params.push(Box::new(end.to_string()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit_clause = match filter.limit {
            Some(limit) if limit > 0 => {
                params.push(Box::new(limit));
                "LIMIT ?".to_string()
            }
            _ => String::new(),
        };

        Self {
            where_clause,
            limit_clause,
            params,
        }
    }

    /// Parameter references in the form rusqlite expects
    pub fn param_refs(&self) -> Vec<&dyn rusqlite::ToSql> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_empty_filter() {
        let clause = FilterClause::build(&RecordFilter::default());
        assert!(clause.where_clause.is_empty());
        assert!(clause.limit_clause.is_empty());
        assert!(clause.params.is_empty());
    }

    #[test]
    fn test_user_and_range() {
        let filter = RecordFilter {
            user_id: Some("user1".to_string()),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 31),
            limit: Some(10),
        };
        let clause = FilterClause::build(&filter);
        assert_eq!(
            clause.where_clause,
            "WHERE user_id = ? AND date BETWEEN ? AND ?"
        );
        assert_eq!(clause.limit_clause, "LIMIT ?");
        assert_eq!(clause.params.len(), 4);
    }

    #[test]
    fn test_half_open_range_is_ignored() {
        let filter = RecordFilter {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..Default::default()
        };
        let clause = FilterClause::build(&filter);
        assert!(clause.where_clause.is_empty());
    }
}
