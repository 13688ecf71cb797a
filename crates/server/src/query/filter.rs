//! Filter specification to predicate builder.
//!
//! A [`FilterSpec`] names which query parameters map onto which columns and
//! how they match. [`FilterSpec::condition`] turns the parameters of one
//! request into a single `Condition`; every group is AND'd, the search
//! columns are OR'd among themselves.

use error::Result;
use sea_orm::{
    sea_query::{Expr, Func, LikeExpr, SimpleExpr},
    ColumnTrait,
    Condition,
};

use super::ListParams;
use crate::utils::{end_of_day, escape_like_wildcards, parse_datetime_param};

/// Inclusive date window on one column, bounded by two query parameters.
#[derive(Debug, Clone, Copy)]
pub struct DateRange<C: 'static> {
    pub start_param: &'static str,
    pub end_param:   &'static str,
    pub column:      C,
}

#[derive(Debug, Clone, Copy)]
pub struct FilterSpec<C: 'static> {
    /// Columns matched by the `search` parameter (case-insensitive substring).
    pub search:     &'static [C],
    /// `(param, column)` pairs compared for equality.
    pub exact:      &'static [(&'static str, C)],
    /// `(param, column)` pairs matched as case-insensitive substrings.
    pub contains:   &'static [(&'static str, C)],
    /// `(param, column)` boolean pairs; `"true"` is true, anything else false.
    pub flags:      &'static [(&'static str, C)],
    pub date_range: Option<DateRange<C>>,
}

impl<C: 'static> FilterSpec<C> {
    /// A spec that filters nothing.
    pub const fn empty() -> Self {
        Self {
            search:     &[],
            exact:      &[],
            contains:   &[],
            flags:      &[],
            date_range: None,
        }
    }
}

/// `LOWER(column) LIKE '%term%' ESCAPE '\'` with the term lowercased and its
/// wildcards escaped.
pub fn contains_insensitive<C: ColumnTrait>(column: C, term: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like_wildcards(&term.to_lowercase()));
    Expr::expr(Func::lower(Expr::col((column.entity_name(), column)))).like(LikeExpr::new(pattern).escape('\\'))
}

impl<C: ColumnTrait> FilterSpec<C> {
    /// Build the predicate for one request.
    ///
    /// Absent parameters contribute nothing. A malformed date is a 400.
    pub fn condition(&self, params: &ListParams) -> Result<Condition> {
        let mut condition = Condition::all();

        if let Some(term) = params.get("search") {
            if !self.search.is_empty() {
                let any = self
                    .search
                    .iter()
                    .fold(Condition::any(), |any, column| any.add(contains_insensitive(*column, term)));
                condition = condition.add(any);
            }
        }

        for (param, column) in self.exact {
            if let Some(value) = params.get(param) {
                condition = condition.add(column.eq(value));
            }
        }

        for (param, column) in self.contains {
            if let Some(value) = params.get(param) {
                condition = condition.add(contains_insensitive(*column, value));
            }
        }

        for (param, column) in self.flags {
            if let Some(value) = params.get(param) {
                condition = condition.add(column.eq(value == "true"));
            }
        }

        if let Some(range) = &self.date_range {
            if let Some(start) = params.get(range.start_param) {
                let start = parse_datetime_param(range.start_param, start)?;
                condition = condition.add(range.column.gte(start));
            }
            if let Some(end) = params.get(range.end_param) {
                let end = parse_datetime_param(range.end_param, end)?;
                // a bare date covers the whole day
                let end = if end.time() == chrono::NaiveTime::MIN {
                    end_of_day(end.date_naive())
                }
                else {
                    end
                };
                condition = condition.add(range.column.lte(end));
            }
        }

        Ok(condition)
    }
}

#[cfg(test)]
mod tests {
    use entity::jobs;
    use sea_orm::{sea_query::Value, DbBackend, EntityTrait, QueryFilter, QueryTrait, Statement};

    use super::*;

    const JOBS: FilterSpec<jobs::Column> = FilterSpec {
        search:     &[jobs::Column::Title, jobs::Column::Description],
        exact:      &[("status", jobs::Column::Status)],
        contains:   &[("location", jobs::Column::Location)],
        flags:      &[("remote", jobs::Column::IsRemote)],
        date_range: Some(DateRange {
            start_param: "from",
            end_param:   "to",
            column:      jobs::Column::CreatedAt,
        }),
    };

    fn statement(params: ListParams) -> Statement {
        let condition = JOBS.condition(&params).unwrap();
        entity::Jobs::find()
            .filter(condition)
            .build(DbBackend::Sqlite)
    }

    fn values(stmt: &Statement) -> Vec<Value> {
        stmt.values
            .clone()
            .map(|values| values.0)
            .unwrap_or_default()
    }

    #[test]
    fn test_no_params_no_predicate() {
        let condition = JOBS.condition(&ListParams::default()).unwrap();
        assert!(condition.is_empty());
    }

    #[test]
    fn test_search_is_or_of_lowercased_likes() {
        let stmt = statement(ListParams::from([("search", "Rust")]));
        let sql = &stmt.sql;
        assert!(sql.contains(r#"LOWER("jobs"."title") LIKE ? ESCAPE '\'"#), "{sql}");
        assert!(sql.contains(r#"LOWER("jobs"."description") LIKE ? ESCAPE '\'"#), "{sql}");
        assert!(sql.contains(" OR "), "{sql}");
        assert_eq!(values(&stmt), vec![Value::from("%rust%"), Value::from("%rust%")]);
    }

    #[test]
    fn test_search_escapes_wildcards() {
        let stmt = statement(ListParams::from([("search", "100%")]));
        assert_eq!(values(&stmt)[0], Value::from(r"%100\%%"));
    }

    #[test]
    fn test_groups_are_anded() {
        let stmt = statement(ListParams::from([
            ("search", "dev"),
            ("status", "APPROVED"),
            ("location", "Pune"),
            ("remote", "true"),
        ]));
        let sql = &stmt.sql;
        assert!(sql.contains(r#""jobs"."status" = ?"#), "{sql}");
        assert!(sql.contains(r#"LOWER("jobs"."location") LIKE ?"#), "{sql}");
        assert!(sql.contains(r#""jobs"."is_remote" = ?"#), "{sql}");
        assert_eq!(sql.matches(" AND ").count(), 3, "{sql}");

        let values = values(&stmt);
        assert!(values.contains(&Value::from("%dev%")));
        assert!(values.contains(&Value::from("APPROVED")));
        assert!(values.contains(&Value::from("%pune%")));
        assert!(values.contains(&Value::from(true)));
    }

    #[test]
    fn test_flag_other_than_true_is_false() {
        assert_eq!(values(&statement(ListParams::from([("remote", "true")]))), vec![Value::from(true)]);
        assert_eq!(values(&statement(ListParams::from([("remote", "yes")]))), vec![Value::from(false)]);
        assert_eq!(values(&statement(ListParams::from([("remote", "false")]))), vec![Value::from(false)]);
    }

    #[test]
    fn test_blank_params_ignored() {
        let condition = JOBS
            .condition(&ListParams::from([("search", "  "), ("status", "")]))
            .unwrap();
        assert!(condition.is_empty());
    }

    #[test]
    fn test_date_range() {
        let stmt = statement(ListParams::from([("from", "2025-01-01"), ("to", "2025-01-31")]));
        let sql = &stmt.sql;
        assert!(sql.contains(r#""jobs"."created_at" >= ?"#), "{sql}");
        assert!(sql.contains(r#""jobs"."created_at" <= ?"#), "{sql}");

        let inlined = stmt.to_string();
        assert!(inlined.contains("'2025-01-01 00:00:00"), "{inlined}");
        assert!(inlined.contains("'2025-01-31 23:59:59"), "{inlined}");
    }

    #[test]
    fn test_bad_date_rejected() {
        let err = JOBS
            .condition(&ListParams::from([("from", "last tuesday")]))
            .unwrap_err();
        assert_eq!(err.code(), "BAD_REQUEST");
    }
}
