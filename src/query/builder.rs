use super::filter::OrderDirection;
use super::predicate::Predicate;
use serde::Serialize;
use serde_json::Value;

/// Minimal query-builder surface the filter DSL needs.
pub trait QueryBuilder {
    /// Whether `column` exists on the target entity
    fn has_column(&self, column: &str) -> bool;

    /// Add a predicate combined with AND
    fn and_where(&mut self, predicate: Predicate);

    /// Set the single ORDER BY clause, replacing any previous one
    fn order_by(&mut self, column: &str, direction: OrderDirection);
}

/// A builder that can also produce rows
pub trait RowSource: QueryBuilder {
    /// Number of rows matching the current predicates
    fn count(&self) -> u64;

    /// Ordered, projected rows; `window` is `(offset, limit)`
    fn fetch(&self, columns: &[String], window: Option<(u64, u64)>) -> Vec<Value>;
}

/// Parameterized SQL statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSql {
    pub sql: String,
    pub params: Vec<String>,
}

/// SELECT builder rendering `?N` placeholders.
///
/// Identifiers are backtick-quoted; values only ever travel as parameters.
#[derive(Debug, Clone)]
pub struct SqlQuery {
    table: String,
    columns: Vec<String>,
    wheres: Vec<Predicate>,
    order: Option<(String, OrderDirection)>,
}

impl SqlQuery {
    pub fn new<S: AsRef<str>>(table: &str, columns: &[S]) -> Self {
        Self {
            table: table.to_string(),
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            wheres: Vec::new(),
            order: None,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.wheres
    }

    pub fn order(&self) -> Option<&(String, OrderDirection)> {
        self.order.as_ref()
    }

    /// `SELECT … FROM … WHERE … ORDER BY … [LIMIT … OFFSET …]`
    pub fn select_sql(&self, columns: &[String], window: Option<(u64, u64)>) -> RenderedSql {
        let projection = if columns.is_empty() || columns.iter().any(|c| c == "*") {
            "*".to_string()
        } else {
            columns.iter().map(|c| quote(c)).collect::<Vec<_>>().join(", ")
        };
        let mut params = Vec::new();
        let mut sql = format!("SELECT {projection} FROM {}", quote(&self.table));
        self.push_where(&mut sql, &mut params);
        if let Some((column, direction)) = &self.order {
            sql.push_str(&format!(" ORDER BY {} {}", quote(column), direction.as_sql()));
        }
        if let Some((offset, limit)) = window {
            sql.push_str(&format!(" LIMIT {limit} OFFSET {offset}"));
        }
        tracing::debug!(sql = %sql, params = ?params, "rendered select");
        RenderedSql { sql, params }
    }

    /// `SELECT COUNT(*) FROM … WHERE …`
    pub fn count_sql(&self) -> RenderedSql {
        let mut params = Vec::new();
        let mut sql = format!("SELECT COUNT(*) FROM {}", quote(&self.table));
        self.push_where(&mut sql, &mut params);
        RenderedSql { sql, params }
    }

    fn push_where(&self, sql: &mut String, params: &mut Vec<String>) {
        if self.wheres.is_empty() {
            return;
        }
        let clauses: Vec<String> = self
            .wheres
            .iter()
            .map(|p| render_predicate(p, params))
            .collect();
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
}

impl QueryBuilder for SqlQuery {
    fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    fn and_where(&mut self, predicate: Predicate) {
        self.wheres.push(predicate);
    }

    fn order_by(&mut self, column: &str, direction: OrderDirection) {
        self.order = Some((column.to_string(), direction));
    }
}

fn quote(identifier: &str) -> String {
    format!("`{}`", identifier.replace('`', "``"))
}

fn bind(params: &mut Vec<String>, value: &str) -> String {
    params.push(value.to_string());
    format!("?{}", params.len())
}

fn render_group(predicates: &[Predicate], joiner: &str, params: &mut Vec<String>) -> String {
    if predicates.is_empty() {
        return "1 = 1".to_string();
    }
    let parts: Vec<String> = predicates.iter().map(|p| render_predicate(p, params)).collect();
    format!("({})", parts.join(joiner))
}

fn render_list(values: &[String], params: &mut Vec<String>) -> String {
    values
        .iter()
        .map(|v| bind(params, v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render one predicate, appending its values to `params`
pub fn render_predicate(predicate: &Predicate, params: &mut Vec<String>) -> String {
    match predicate {
        Predicate::Compare { column, op, value } => {
            let placeholder = bind(params, value);
            format!("{} {} {placeholder}", quote(column), op.as_sql())
        }
        Predicate::In { values, .. } if values.is_empty() => "1 = 0".to_string(),
        Predicate::NotIn { values, .. } if values.is_empty() => "1 = 1".to_string(),
        Predicate::In { column, values } => {
            format!("{} IN ({})", quote(column), render_list(values, params))
        }
        Predicate::NotIn { column, values } => {
            format!("{} NOT IN ({})", quote(column), render_list(values, params))
        }
        Predicate::Between { column, low, high } => {
            let low = bind(params, low);
            let high = bind(params, high);
            format!("{} BETWEEN {low} AND {high}", quote(column))
        }
        Predicate::IsNull(column) => format!("{} IS NULL", quote(column)),
        Predicate::NotNull(column) => format!("{} IS NOT NULL", quote(column)),
        Predicate::And(inner) => render_group(inner, " AND ", params),
        Predicate::Or(inner) => render_group(inner, " OR ", params),
    }
}
