use crudgen::query::{
    apply_filters, filter_map, get_all, CompareOp, Entity, FilterMap, FilterSpec, FilterValue,
    MemoryQuery, PaginationSpec, Predicate, QueryOutput, SqlQuery, ValidationError,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;

fn products(count: u64) -> Vec<Value> {
    (1..=count)
        .map(|id| {
            json!({
                "id": id,
                "name": format!("Product {id}"),
                "sku": format!("SKU-{id:03}"),
                "price": id * 5,
                "tags": if id % 2 == 0 { "a" } else { "d" },
                "deleted_at": Value::Null,
            })
        })
        .collect()
}

fn spec(filters: FilterMap, order_column: &str) -> FilterSpec {
    FilterSpec::new(vec![], order_column, "asc", filters).unwrap()
}

fn ids(output: &QueryOutput) -> Vec<u64> {
    output.rows().iter().filter_map(|row| row["id"].as_u64()).collect()
}

#[test]
fn test_gt_suffix_compares_numerically() {
    let mut query = SqlQuery::new("products", &["id", "price"]);
    apply_filters(&mut query, &filter_map([("price_gt", "10")]));
    assert_eq!(
        query.predicates(),
        &[Predicate::compare("price", CompareOp::Gt, "10")]
    );

    let output = get_all(
        MemoryQuery::from_json(products(4)),
        &spec(filter_map([("price_gt", "10")]), "id"),
        &PaginationSpec::unpaged(),
        &[],
        "/products",
    );
    assert_eq!(ids(&output), vec![3, 4]);
}

#[test]
fn test_in_suffix_splits_on_commas() {
    let mut query = SqlQuery::new("products", &["tags"]);
    apply_filters(&mut query, &filter_map([("tags_in", "a,b,c")]));
    let rendered = query.select_sql(&[], None);
    assert_eq!(rendered.sql, "SELECT * FROM `products` WHERE `tags` IN (?1, ?2, ?3)");
    assert_eq!(rendered.params, vec!["a", "b", "c"]);
}

#[test]
fn test_between_with_three_parts_is_ignored() {
    let mut query = SqlQuery::new("products", &["price"]);
    apply_filters(&mut query, &filter_map([("price_between", "1,5,9")]));
    assert!(query.predicates().is_empty());

    apply_filters(&mut query, &filter_map([("price_between", "1,9")]));
    assert_eq!(query.predicates(), &[Predicate::between("price", "1", "9")]);
}

#[test]
fn test_unknown_field_is_ignored() {
    let mut query = SqlQuery::new("products", &["price"]);
    apply_filters(&mut query, &filter_map([("colour_like", "red"), ("weight", "3")]));
    assert!(query.predicates().is_empty());
}

#[test]
fn test_not_in_wins_over_in() {
    let output = get_all(
        MemoryQuery::from_json(products(4)),
        &spec(filter_map([("id_not_in", "1,2")]), "id"),
        &PaginationSpec::unpaged(),
        &[],
        "/products",
    );
    assert_eq!(ids(&output), vec![3, 4]);
}

#[test]
fn test_page_two_of_twelve_rows() {
    let output = get_all(
        MemoryQuery::from_json(products(12)),
        &spec(FilterMap::new(), "id"),
        &PaginationSpec::new(2, 5, true),
        &[],
        "/products",
    );
    let QueryOutput::Page(page) = &output else {
        panic!("expected a page");
    };
    assert_eq!(page.data.len(), 5);
    assert_eq!(page.last_page, 3);
    assert_eq!(page.total, 12);
    assert_eq!((page.from, page.to), (Some(6), Some(10)));
    assert_eq!(ids(&output), vec![6, 7, 8, 9, 10]);
    assert_eq!(page.prev_page_url.as_deref(), Some("/products?page=1"));
    assert_eq!(page.next_page_url.as_deref(), Some("/products?page=3"));
}

#[test]
fn test_unpaged_returns_every_row_ordered() {
    let filter = FilterSpec::new(vec!["id".to_string()], "price", "desc", FilterMap::new()).unwrap();
    let output = get_all(
        MemoryQuery::from_json(products(3)),
        &filter,
        &PaginationSpec::unpaged(),
        &[],
        "/products",
    );
    assert!(matches!(output, QueryOutput::All(_)));
    assert_eq!(output.rows(), &[json!({"id": 3}), json!({"id": 2}), json!({"id": 1})]);
}

#[test]
fn test_or_bracket_and_search_expansion() {
    let mut group = BTreeMap::new();
    group.insert("id".to_string(), "1".to_string());
    let mut other = BTreeMap::new();
    other.insert("sku_like".to_string(), "012".to_string());
    let mut filters = FilterMap::new();
    filters.insert("_or".to_string(), FilterValue::OrGroup(vec![group, other]));

    let output = get_all(
        MemoryQuery::from_json(products(12)),
        &spec(filters, "id"),
        &PaginationSpec::unpaged(),
        &[],
        "/products",
    );
    assert_eq!(ids(&output), vec![1, 12]);

    let output = get_all(
        MemoryQuery::from_json(products(12)),
        &spec(filter_map([("search", "sku-011")]), "id"),
        &PaginationSpec::unpaged(),
        &["name", "sku"],
        "/products",
    );
    assert_eq!(ids(&output), vec![11]);
}

#[test]
fn test_invalid_order_direction() {
    let err = FilterSpec::new(vec![], "id", "DESC", FilterMap::new()).unwrap_err();
    assert_eq!(err, ValidationError::InvalidOrderDirection("DESC".to_string()));
    assert_eq!(err.status(), 422);
}

#[test]
fn test_pagination_clamps_to_one() {
    let pagination = PaginationSpec::new(0, 0, true);
    assert_eq!(pagination.page(), 1);
    assert_eq!(pagination.per_page(), 1);
}

struct Product;

impl Entity for Product {
    const TABLE: &'static str = "products";
    const COLUMNS: &'static [&'static str] = &["id", "name", "sku", "price", "created_at"];
    const SEARCHABLE: &'static [&'static str] = &["name", "sku"];
}

#[test]
fn test_entity_search_and_count() {
    let mut filter = FilterSpec::default();
    filter.set_filters(filter_map([("search", "lamp"), ("price_lte", "50")]));
    let query = Product::filtered(&filter);

    let select = query.select_sql(filter.columns(), Some((10, 5)));
    assert_eq!(
        select.sql,
        "SELECT * FROM `products` WHERE (`name` LIKE ?1 OR `sku` LIKE ?2) AND `price` <= ?3 \
         ORDER BY `created_at` ASC LIMIT 5 OFFSET 10"
    );
    assert_eq!(select.params, vec!["%lamp%", "%lamp%", "50"]);

    let count = query.count_sql();
    assert_eq!(
        count.sql,
        "SELECT COUNT(*) FROM `products` WHERE (`name` LIKE ?1 OR `sku` LIKE ?2) AND `price` <= ?3"
    );
}
