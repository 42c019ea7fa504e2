//! Suffix-driven filter parsing and operator dispatch.
//!
//! | key form              | predicate                          |
//! |-----------------------|------------------------------------|
//! | `_or…` (list of maps) | OR of each entry's predicate       |
//! | `or_<a>_<b>…`         | OR of `LIKE %v%` over `a`, `b`, …  |
//! | `<column>`            | `column = v`                       |
//! | `<column>_like`       | `column LIKE %v%`                  |
//! | `_gt` `_lt` `_gte` `_lte` | `>` `<` `>=` `<=`              |
//! | `_in` / `_not_in`     | membership over `v` split on `,`   |
//! | `_between`            | inclusive range, exactly two parts |
//! | `_null` / `_not_null` | `IS NULL` / `IS NOT NULL`          |
//! | `_exact`              | `column = v`                       |
//!
//! Suffixes are matched longest first. Keys naming no column are ignored.

use super::builder::QueryBuilder;
use super::filter::{FilterMap, FilterValue};
use super::predicate::{CompareOp, Predicate};
use std::collections::BTreeMap;

const OR_BRACKET_PREFIX: &str = "_or";
const OR_GROUP_PREFIX: &str = "or_";
/// Reserved key expanded into an `or_` group over the searchable columns
pub const SEARCH_KEY: &str = "search";

/// Operator selected by a key suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    NotNull,
    NotIn,
    Between,
    Exact,
    Like,
    Null,
    Gte,
    Lte,
    In,
    Gt,
    Lt,
}

/// Longest suffix first, so `_not_in` wins over `_in` and `_gte` over `_gt`.
const SUFFIXES: &[(&str, Operator)] = &[
    ("_not_null", Operator::NotNull),
    ("_not_in", Operator::NotIn),
    ("_between", Operator::Between),
    ("_exact", Operator::Exact),
    ("_like", Operator::Like),
    ("_null", Operator::Null),
    ("_gte", Operator::Gte),
    ("_lte", Operator::Lte),
    ("_in", Operator::In),
    ("_gt", Operator::Gt),
    ("_lt", Operator::Lt),
];

/// Split a filter key into `(field, operator)`.
///
/// Keys without a recognized suffix map to plain equality (`None`).
pub fn parse_key(key: &str) -> (&str, Option<Operator>) {
    for (suffix, op) in SUFFIXES {
        if let Some(field) = key.strip_suffix(suffix) {
            if !field.is_empty() {
                return (field, Some(*op));
            }
        }
    }
    (key, None)
}

fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(str::to_string).collect()
}

/// Predicate for one `field` + operator, or `None` when the value is malformed.
pub fn predicate_for(field: &str, op: Option<Operator>, value: &str) -> Option<Predicate> {
    let predicate = match op {
        None | Some(Operator::Exact) => Predicate::eq(field, value),
        Some(Operator::Like) => Predicate::contains(field, value),
        Some(Operator::Gt) => Predicate::compare(field, CompareOp::Gt, value),
        Some(Operator::Lt) => Predicate::compare(field, CompareOp::Lt, value),
        Some(Operator::Gte) => Predicate::compare(field, CompareOp::Gte, value),
        Some(Operator::Lte) => Predicate::compare(field, CompareOp::Lte, value),
        Some(Operator::In) => Predicate::is_in(field, split_list(value)),
        Some(Operator::NotIn) => Predicate::not_in(field, split_list(value)),
        Some(Operator::Between) => {
            let parts: Vec<&str> = value.split(',').collect();
            let [low, high] = parts.as_slice() else {
                return None;
            };
            Predicate::between(field, *low, *high)
        }
        Some(Operator::Null) => Predicate::IsNull(field.to_string()),
        Some(Operator::NotNull) => Predicate::NotNull(field.to_string()),
    };
    Some(predicate)
}

/// Predicate for a single scalar filter entry, honoring column existence.
fn scalar_predicate<Q: QueryBuilder + ?Sized>(query: &Q, key: &str, value: &str) -> Option<Predicate> {
    if query.has_column(key) {
        return predicate_for(key, None, value);
    }
    let (field, op) = parse_key(key);
    if op.is_none() || !query.has_column(field) {
        return None;
    }
    predicate_for(field, op, value)
}

/// Resolve `a_b_c` into column names, taking the longest known column at each step.
///
/// Tokens that start no known column are skipped.
pub fn resolve_or_fields<Q: QueryBuilder + ?Sized>(query: &Q, spec: &str) -> Vec<String> {
    let tokens: Vec<&str> = spec.split('_').filter(|t| !t.is_empty()).collect();
    let mut fields = Vec::new();
    let mut start = 0;
    while start < tokens.len() {
        let found = (start + 1..=tokens.len())
            .rev()
            .map(|end| (end, tokens[start..end].join("_")))
            .find(|(_, candidate)| query.has_column(candidate));
        match found {
            Some((end, column)) => {
                fields.push(column);
                start = end;
            }
            None => start += 1,
        }
    }
    fields
}

fn or_bracket<Q: QueryBuilder + ?Sized>(query: &Q, conditions: &[BTreeMap<String, String>]) -> Option<Predicate> {
    let predicates: Vec<Predicate> = conditions
        .iter()
        .flat_map(|condition| condition.iter())
        .filter_map(|(key, value)| scalar_predicate(query, key, value))
        .collect();
    (!predicates.is_empty()).then_some(Predicate::Or(predicates))
}

fn or_like_group<Q: QueryBuilder + ?Sized>(query: &Q, spec: &str, value: &str) -> Option<Predicate> {
    let predicates: Vec<Predicate> = resolve_or_fields(query, spec)
        .into_iter()
        .map(|field| Predicate::contains(field, value))
        .collect();
    (!predicates.is_empty()).then_some(Predicate::Or(predicates))
}

/// Build the predicate for one filter entry.
pub fn entry_predicate<Q: QueryBuilder + ?Sized>(query: &Q, key: &str, value: &FilterValue) -> Option<Predicate> {
    match value {
        FilterValue::OrGroup(conditions) if key.starts_with(OR_BRACKET_PREFIX) => {
            or_bracket(query, conditions)
        }
        FilterValue::OrGroup(_) => None,
        FilterValue::Scalar(_) if key.starts_with(OR_BRACKET_PREFIX) => None,
        FilterValue::Scalar(v) => match key.strip_prefix(OR_GROUP_PREFIX) {
            Some(spec) if !query.has_column(key) => or_like_group(query, spec, v),
            _ => scalar_predicate(query, key, v),
        },
    }
}

/// Apply every applicable entry of `filters` to `query` as AND-ed predicates.
///
/// Entries that name no column, or carry a malformed value, are skipped.
pub fn apply_filters<Q: QueryBuilder + ?Sized>(query: &mut Q, filters: &FilterMap) {
    for (key, value) in filters {
        match entry_predicate(&*query, key, value) {
            Some(predicate) => query.and_where(predicate),
            None => tracing::debug!(key = %key, "ignoring inapplicable filter"),
        }
    }
}

/// Rewrite a `search` entry into an `or_` group over `searchable` columns.
///
/// Left untouched when there is nothing searchable or `search` is itself a column.
pub fn expand_search<Q: QueryBuilder + ?Sized>(query: &Q, filters: &FilterMap, searchable: &[&str]) -> FilterMap {
    let mut expanded = filters.clone();
    if searchable.is_empty() || query.has_column(SEARCH_KEY) {
        return expanded;
    }
    if let Some(FilterValue::Scalar(term)) = expanded.remove(SEARCH_KEY) {
        let key = format!("{OR_GROUP_PREFIX}{}", searchable.join("_"));
        expanded.insert(key, FilterValue::Scalar(term));
    }
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::builder::SqlQuery;

    fn people() -> SqlQuery {
        SqlQuery::new("people", &["first_name", "last_name", "first", "email", "or_code"])
    }

    #[test]
    fn test_or_fields_take_longest_known_column() {
        let q = people();
        assert_eq!(resolve_or_fields(&q, "first_name_last_name"), vec!["first_name", "last_name"]);
        assert_eq!(resolve_or_fields(&q, "first_email"), vec!["first", "email"]);
    }

    #[test]
    fn test_or_fields_skip_unknown_tokens() {
        let q = people();
        assert_eq!(resolve_or_fields(&q, "nick_first_name_x"), vec!["first_name"]);
        assert!(resolve_or_fields(&q, "nick_alias").is_empty());
        assert!(resolve_or_fields(&q, "__").is_empty());
    }

    #[test]
    fn test_or_prefixed_key_groups_contains() {
        let q = people();
        assert_eq!(
            entry_predicate(&q, "or_first_name_email", &"ann".into()),
            Some(Predicate::Or(vec![
                Predicate::contains("first_name", "ann"),
                Predicate::contains("email", "ann"),
            ]))
        );
        assert_eq!(entry_predicate(&q, "or_nick", &"ann".into()), None);
    }

    #[test]
    fn test_or_prefixed_column_is_plain_equality() {
        let q = people();
        assert_eq!(
            entry_predicate(&q, "or_code", &"A1".into()),
            Some(Predicate::eq("or_code", "A1"))
        );
    }

    #[test]
    fn test_parse_key_longest_suffix_first() {
        assert_eq!(parse_key("status_not_in"), ("status", Some(Operator::NotIn)));
        assert_eq!(parse_key("status_in"), ("status", Some(Operator::In)));
        assert_eq!(parse_key("deleted_at_not_null"), ("deleted_at", Some(Operator::NotNull)));
        assert_eq!(parse_key("deleted_at_null"), ("deleted_at", Some(Operator::Null)));
        assert_eq!(parse_key("price_gte"), ("price", Some(Operator::Gte)));
        assert_eq!(parse_key("price_gt"), ("price", Some(Operator::Gt)));
        assert_eq!(parse_key("name_exact"), ("name", Some(Operator::Exact)));
        assert_eq!(parse_key("name"), ("name", None));
        assert_eq!(parse_key("_in"), ("_in", None));
    }

    #[test]
    fn test_between_requires_two_parts() {
        assert_eq!(
            predicate_for("price", Some(Operator::Between), "1,5"),
            Some(Predicate::between("price", "1", "5"))
        );
        assert_eq!(predicate_for("price", Some(Operator::Between), "1,2,3"), None);
        assert_eq!(predicate_for("price", Some(Operator::Between), "1"), None);
    }

    #[test]
    fn test_in_splits_on_comma() {
        assert_eq!(
            predicate_for("tags", Some(Operator::In), "a,b,c"),
            Some(Predicate::is_in(
                "tags",
                vec!["a".to_string(), "b".to_string(), "c".to_string()]
            ))
        );
    }

    #[test]
    fn test_null_ignores_value() {
        assert_eq!(
            predicate_for("deleted_at", Some(Operator::Null), "whatever"),
            Some(Predicate::IsNull("deleted_at".to_string()))
        );
    }
}
