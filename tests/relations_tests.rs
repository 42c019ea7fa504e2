mod common;

use common::temp_files;
use crudgen::relations::{infer_model, RelationKind, SlugField};
use crudgen::schema::{load_schema, SchemaIntrospector, SqlType};

fn accessors(table: &str) -> Vec<(RelationKind, String)> {
    let snapshot = load_schema(&temp_files::shop_schema_path()).unwrap();
    infer_model(&snapshot, table)
        .unwrap()
        .relations
        .into_iter()
        .map(|r| (r.kind, r.accessor))
        .collect()
}

#[test]
fn test_fixture_loads_with_parameterized_types() {
    let snapshot = load_schema(&temp_files::shop_schema_path()).unwrap();
    assert_eq!(
        snapshot.list_all_tables(),
        vec!["products", "categories", "tags", "product_tag", "reviews", "users"]
    );
    assert_eq!(snapshot.column_type("products", "price"), Some(SqlType::Decimal));
    assert_eq!(snapshot.column_type("products", "name"), Some(SqlType::Varchar));
    assert!(!snapshot.table_exists("orders"));
}

#[test]
fn test_product_inference() {
    let snapshot = load_schema(&temp_files::shop_schema_path()).unwrap();
    let model = infer_model(&snapshot, "products").unwrap();

    assert_eq!(model.fillable.first().map(String::as_str), Some("name"));
    assert!(!model.fillable.contains(&"id".to_string()));
    assert_eq!(model.fillable.len(), 10);
    assert_eq!(
        model.casts,
        vec![
            ("published_at".to_string(), "datetime".to_string()),
            ("attributes".to_string(), "array".to_string()),
            ("created_at".to_string(), "datetime".to_string()),
            ("updated_at".to_string(), "datetime".to_string()),
        ]
    );
    assert_eq!(
        model.slugs,
        vec![SlugField {
            column: "name_slug".to_string(),
            source: "name".to_string(),
        }]
    );
}

#[test]
fn test_product_relations() {
    let relations = accessors("products");
    assert!(relations.contains(&(RelationKind::BelongsTo, "category".to_string())));
    assert!(relations.contains(&(RelationKind::HasMany, "reviews".to_string())));
    assert!(relations.contains(&(RelationKind::BelongsToMany, "tags".to_string())));
    assert_eq!(relations[0], (RelationKind::BelongsTo, "category".to_string()));
}

#[test]
fn test_pivot_relates_both_sides() {
    assert!(accessors("tags").contains(&(RelationKind::BelongsToMany, "products".to_string())));
    assert_eq!(
        accessors("reviews"),
        vec![(RelationKind::BelongsTo, "product".to_string())]
    );
}

#[test]
fn test_table_without_relations() {
    assert!(accessors("users").is_empty());
    let snapshot = load_schema(&temp_files::shop_schema_path()).unwrap();
    assert!(infer_model(&snapshot, "orders").is_none());
}
