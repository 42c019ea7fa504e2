use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Validation failure surfaced to API clients as HTTP 422
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("orderDirection must be \"asc\" or \"desc\", got {0:?}")]
    InvalidOrderDirection(String),
}

impl ValidationError {
    /// HTTP status equivalent
    pub fn status(&self) -> u16 {
        422
    }
}

/// Sort direction of the single ORDER BY clause
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

impl FromStr for OrderDirection {
    type Err = ValidationError;

    /// Only the exact lowercase spellings are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(OrderDirection::Asc),
            "desc" => Ok(OrderDirection::Desc),
            other => Err(ValidationError::InvalidOrderDirection(other.to_string())),
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderDirection::Asc => write!(f, "asc"),
            OrderDirection::Desc => write!(f, "desc"),
        }
    }
}

/// Value side of a filter entry.
///
/// Plain entries carry a string; the `_or` bracket carries a list of
/// field/value maps that are OR-ed together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Scalar(String),
    OrGroup(Vec<BTreeMap<String, String>>),
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Scalar(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Scalar(s)
    }
}

/// Filter key (`field` + optional suffix) to value
pub type FilterMap = BTreeMap<String, FilterValue>;

/// Build a [`FilterMap`] from plain `(key, value)` pairs
pub fn filter_map<K, V, I>(entries: I) -> FilterMap
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<FilterValue>,
{
    entries
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Projection, ordering and filters for one list query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    columns: Vec<String>,
    order_column: String,
    order_direction: OrderDirection,
    filters: FilterMap,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            columns: vec!["*".to_string()],
            order_column: "created_at".to_string(),
            order_direction: OrderDirection::Asc,
            filters: FilterMap::new(),
        }
    }
}

impl FilterSpec {
    /// # Errors
    ///
    /// Returns [`ValidationError`] unless `order_direction` is exactly `asc` or `desc`.
    pub fn new(
        columns: Vec<String>,
        order_column: impl Into<String>,
        order_direction: &str,
        filters: FilterMap,
    ) -> Result<Self, ValidationError> {
        let columns = if columns.is_empty() {
            vec!["*".to_string()]
        } else {
            columns
        };
        Ok(Self {
            columns,
            order_column: order_column.into(),
            order_direction: order_direction.parse()?,
            filters,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn order_column(&self) -> &str {
        &self.order_column
    }

    pub fn order_direction(&self) -> OrderDirection {
        self.order_direction
    }

    pub fn filters(&self) -> &FilterMap {
        &self.filters
    }

    pub fn set_columns(&mut self, columns: Vec<String>) -> &mut Self {
        self.columns = columns;
        self
    }

    pub fn set_order_column(&mut self, column: impl Into<String>) -> &mut Self {
        self.order_column = column.into();
        self
    }

    /// # Errors
    ///
    /// Returns [`ValidationError`] and leaves `self` untouched on an invalid direction.
    pub fn set_order_direction(&mut self, direction: &str) -> Result<&mut Self, ValidationError> {
        self.order_direction = direction.parse()?;
        Ok(self)
    }

    pub fn set_filters(&mut self, filters: FilterMap) -> &mut Self {
        self.filters = filters;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let spec = FilterSpec::default();
        assert_eq!(spec.columns(), ["*"]);
        assert_eq!(spec.order_column(), "created_at");
        assert_eq!(spec.order_direction(), OrderDirection::Asc);
        assert!(spec.filters().is_empty());
    }

    #[test]
    fn test_order_direction_is_exact() {
        assert_eq!("asc".parse::<OrderDirection>(), Ok(OrderDirection::Asc));
        assert_eq!("desc".parse::<OrderDirection>(), Ok(OrderDirection::Desc));
        for bad in ["ASC", "Desc", "up", ""] {
            let err = bad.parse::<OrderDirection>().unwrap_err();
            assert_eq!(err.status(), 422);
        }
    }

    #[test]
    fn test_constructor_rejects_bad_direction() {
        let err = FilterSpec::new(vec![], "id", "sideways", FilterMap::new()).unwrap_err();
        assert_eq!(err, ValidationError::InvalidOrderDirection("sideways".to_string()));
    }

    #[test]
    fn test_setter_keeps_previous_value_on_error() {
        let mut spec = FilterSpec::default();
        spec.set_order_direction("desc").unwrap();
        assert!(spec.set_order_direction("DESC").is_err());
        assert_eq!(spec.order_direction(), OrderDirection::Desc);
    }

    #[test]
    fn test_empty_columns_default_to_star() {
        let spec = FilterSpec::new(vec![], "id", "asc", FilterMap::new()).unwrap();
        assert_eq!(spec.columns(), ["*"]);
    }

    #[test]
    fn test_filter_value_deserializes_untagged() {
        let map: FilterMap = serde_json::from_str(
            r#"{"price_gt":"10","_or":[{"name_like":"pen"},{"sku":"A1"}]}"#,
        )
        .unwrap();
        assert_eq!(map["price_gt"], FilterValue::Scalar("10".to_string()));
        assert!(matches!(&map["_or"], FilterValue::OrGroup(g) if g.len() == 2));
    }
}
