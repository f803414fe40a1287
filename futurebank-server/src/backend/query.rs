//! Table queries
//!
//! A small description of the reads the dashboard issues: one table, an
//! optional column list and equality filters. The HTTP backend renders it as
//! PostgREST query parameters; the memory backend evaluates it directly.

use serde::Serialize;
use serde_json::{Map, Value};

/// The tables the dashboard reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Profiles,
    Offers,
    Wants,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Profiles => "profiles",
            Table::Offers => "offers",
            Table::Wants => "wants",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Row filter on a single column
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq(String, Value),
    Neq(String, Value),
}

impl Filter {
    fn column(&self) -> &str {
        match self {
            Filter::Eq(column, _) | Filter::Neq(column, _) => column,
        }
    }

    /// PostgREST operator syntax, e.g. `eq.42` or `is.null`
    fn operator(&self) -> String {
        match self {
            Filter::Eq(_, Value::Null) => "is.null".to_string(),
            Filter::Neq(_, Value::Null) => "not.is.null".to_string(),
            Filter::Eq(_, value) => format!("eq.{}", render(value)),
            Filter::Neq(_, value) => format!("neq.{}", render(value)),
        }
    }

    fn matches(&self, row: &Value) -> bool {
        let actual = row.get(self.column()).unwrap_or(&Value::Null);
        match self {
            Filter::Eq(_, expected) => actual == expected,
            Filter::Neq(_, expected) => actual != expected,
        }
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A read against one table
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    table: Table,
    columns: Option<Vec<String>>,
    filters: Vec<Filter>,
}

impl Query {
    /// Select every column of `table`
    pub fn from(table: Table) -> Self {
        Self {
            table,
            columns: None,
            filters: Vec::new(),
        }
    }

    /// Restrict the result to a comma-separated column list
    pub fn select(mut self, columns: &str) -> Self {
        let columns: Vec<String> = columns
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != "*")
            .map(str::to_string)
            .collect();
        self.columns = (!columns.is_empty()).then_some(columns);
        self
    }

    pub fn eq(mut self, column: &str, value: impl Serialize) -> Self {
        self.filters
            .push(Filter::Eq(column.to_string(), to_value(value)));
        self
    }

    pub fn neq(mut self, column: &str, value: impl Serialize) -> Self {
        self.filters
            .push(Filter::Neq(column.to_string(), to_value(value)));
        self
    }

    pub fn table(&self) -> Table {
        self.table
    }

    /// Query-string pairs understood by PostgREST
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![(
            "select".to_string(),
            self.columns
                .as_ref()
                .map(|c| c.join(","))
                .unwrap_or_else(|| "*".to_string()),
        )];
        params.extend(
            self.filters
                .iter()
                .map(|f| (f.column().to_string(), f.operator())),
        );
        params
    }

    /// Whether `row` passes every filter
    pub fn matches(&self, row: &Value) -> bool {
        self.filters.iter().all(|f| f.matches(row))
    }

    /// Keep only the selected columns of `row`
    pub fn project(&self, row: &Value) -> Value {
        let Some(columns) = &self.columns else {
            return row.clone();
        };

        let mut projected = Map::new();
        for column in columns {
            if let Some(value) = row.get(column) {
                projected.insert(column.clone(), value.clone());
            }
        }
        Value::Object(projected)
    }
}

fn to_value(value: impl Serialize) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn test_params_for_single_profile_lookup() {
        let id = Uuid::nil();
        let query = Query::from(Table::Profiles).select("id").eq("id", id);

        assert_eq!(
            query.to_params(),
            vec![
                ("select".to_string(), "id".to_string()),
                (
                    "id".to_string(),
                    "eq.00000000-0000-0000-0000-000000000000".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_params_default_to_all_columns() {
        let query = Query::from(Table::Offers)
            .select(" * ")
            .eq("user_id", "abc")
            .neq("category", Value::Null);

        assert_eq!(
            query.to_params(),
            vec![
                ("select".to_string(), "*".to_string()),
                ("user_id".to_string(), "eq.abc".to_string()),
                ("category".to_string(), "not.is.null".to_string()),
            ]
        );
    }

    #[test]
    fn test_matches_and_project() {
        let row = json!({ "id": "u1", "username": "nova", "time_balance": 2.5 });

        let taken = Query::from(Table::Profiles)
            .select("id")
            .eq("username", "nova")
            .neq("id", "u2");
        assert!(taken.matches(&row));
        assert_eq!(taken.project(&row), json!({ "id": "u1" }));

        let own = Query::from(Table::Profiles)
            .eq("username", "nova")
            .neq("id", "u1");
        assert!(!own.matches(&row));
        assert_eq!(own.project(&row), row);
    }

    #[test]
    fn test_missing_column_matches_null() {
        let row = json!({ "id": 1 });
        let query = Query::from(Table::Wants).eq("criteria", Value::Null);
        assert!(query.matches(&row));
    }
}
