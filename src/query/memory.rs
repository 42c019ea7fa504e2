use super::builder::{QueryBuilder, RowSource};
use super::filter::OrderDirection;
use super::predicate::{CompareOp, Predicate};
use regex::{Regex, RegexBuilder};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// Query builder evaluating predicates over in-memory JSON rows.
///
/// Comparisons are numeric when both sides parse as finite numbers and
/// textual otherwise. Ordering puts NULL first, then numbers, then text. `LIKE` is case-insensitive with `%` and `_` wildcards. A missing
/// key reads as NULL, and NULL never satisfies a comparison.
#[derive(Debug, Clone)]
pub struct MemoryQuery {
    columns: Vec<String>,
    rows: Vec<Map<String, Value>>,
    wheres: Vec<Predicate>,
    order: Option<(String, OrderDirection)>,
}

impl MemoryQuery {
    pub fn new<S: AsRef<str>>(columns: &[S], rows: Vec<Map<String, Value>>) -> Self {
        Self {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            rows,
            wheres: Vec::new(),
            order: None,
        }
    }

    /// Build from a JSON array of objects; non-object entries are dropped.
    ///
    /// Columns are the union of the object keys, in first-seen order.
    pub fn from_json(rows: Vec<Value>) -> Self {
        let rows: Vec<Map<String, Value>> = rows
            .into_iter()
            .filter_map(|row| match row {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }
        Self::new(&columns, rows)
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.wheres
    }

    fn matching(&self) -> Vec<&Map<String, Value>> {
        let mut rows: Vec<&Map<String, Value>> = self
            .rows
            .iter()
            .filter(|row| self.wheres.iter().all(|p| matches(row, p)))
            .collect();
        if let Some((column, direction)) = &self.order {
            let mut keyed: Vec<(Option<String>, &Map<String, Value>)> =
                rows.into_iter().map(|row| (text(row, column), row)).collect();
            keyed.sort_by(|(a, _), (b, _)| {
                let ord = SortKey::of(a.as_deref()).compare(&SortKey::of(b.as_deref()));
                match direction {
                    OrderDirection::Asc => ord,
                    OrderDirection::Desc => ord.reverse(),
                }
            });
            rows = keyed.into_iter().map(|(_, row)| row).collect();
        }
        rows
    }
}

impl QueryBuilder for MemoryQuery {
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

impl RowSource for MemoryQuery {
    fn count(&self) -> u64 {
        self.matching().len() as u64
    }

    fn fetch(&self, columns: &[String], window: Option<(u64, u64)>) -> Vec<Value> {
        let rows = self.matching();
        let (offset, limit) = window.unwrap_or((0, u64::MAX));
        rows.into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(|row| Value::Object(project(row, columns)))
            .collect()
    }
}

fn project(row: &Map<String, Value>, columns: &[String]) -> Map<String, Value> {
    if columns.is_empty() || columns.iter().any(|c| c == "*") {
        return row.clone();
    }
    columns
        .iter()
        .filter_map(|c| row.get(c).map(|v| (c.clone(), v.clone())))
        .collect()
}

/// Text form of a cell; `None` for NULL or missing
fn text(row: &Map<String, Value>, column: &str) -> Option<String> {
    match row.get(column)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        other => Some(other.to_string()),
    }
}

/// Finite numeric value of a cell; `NaN` and infinities stay text
fn number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Filter comparison: numeric when both sides are numbers, textual otherwise
fn compare_values(left: &str, right: &str) -> Ordering {
    match (number(left), number(right)) {
        (Some(l), Some(r)) => l.total_cmp(&r),
        _ => left.cmp(right),
    }
}

/// ORDER BY key. A total order: NULL < numbers < text.
#[derive(Debug, Clone, Copy)]
enum SortKey<'a> {
    Null,
    Number(f64),
    Text(&'a str),
}

impl<'a> SortKey<'a> {
    fn of(cell: Option<&'a str>) -> Self {
        match cell {
            None => SortKey::Null,
            Some(s) => number(s).map_or(SortKey::Text(s), SortKey::Number),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Null => 0,
            SortKey::Number(_) => 1,
            SortKey::Text(_) => 2,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Translate a SQL LIKE pattern into an anchored, case-insensitive regex
pub fn like_regex(pattern: &str) -> Option<Regex> {
    let mut source = String::from("^");
    for c in pattern.chars() {
        match c {
            '%' => source.push_str(".*"),
            '_' => source.push('.'),
            other => source.push_str(&regex::escape(&other.to_string())),
        }
    }
    source.push('$');
    RegexBuilder::new(&source)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .ok()
}

fn matches(row: &Map<String, Value>, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::Compare { column, op, value } => {
            let Some(cell) = text(row, column) else {
                return false;
            };
            match op {
                CompareOp::Like => like_regex(value).is_some_and(|re| re.is_match(&cell)),
                CompareOp::Eq => compare_values(&cell, value) == Ordering::Equal,
                CompareOp::Gt => compare_values(&cell, value) == Ordering::Greater,
                CompareOp::Lt => compare_values(&cell, value) == Ordering::Less,
                CompareOp::Gte => compare_values(&cell, value) != Ordering::Less,
                CompareOp::Lte => compare_values(&cell, value) != Ordering::Greater,
            }
        }
        Predicate::In { column, values } => text(row, column)
            .is_some_and(|cell| values.iter().any(|v| compare_values(&cell, v) == Ordering::Equal)),
        Predicate::NotIn { column, values } => text(row, column)
            .is_some_and(|cell| values.iter().all(|v| compare_values(&cell, v) != Ordering::Equal)),
        Predicate::Between { column, low, high } => text(row, column).is_some_and(|cell| {
            compare_values(&cell, low) != Ordering::Less
                && compare_values(&cell, high) != Ordering::Greater
        }),
        Predicate::IsNull(column) => text(row, column).is_none(),
        Predicate::NotNull(column) => text(row, column).is_some(),
        Predicate::And(inner) => inner.iter().all(|p| matches(row, p)),
        Predicate::Or(inner) => inner.iter().any(|p| matches(row, p)),
    }
}
