//! # Relationship Inference
//!
//! Convention-driven derivation of model metadata from a [`SchemaSnapshot`].
//! Every function here is pure: the same snapshot always yields the same
//! result, and nothing is re-checked against the live database later.
//!
//! ## Rules
//!
//! - **belongs-to**: a column `<prefix>_id` relates to table `plural(prefix)`
//! - **has-many**: another table carrying `<singular(this)>_id` relates back
//! - **belongs-to-many**: a table named `<a>_<b>` where `plural(a)` and
//!   `plural(b)` are tables, the pivot carries `<singular(a)>_id` and
//!   `<singular(b)>_id`, and one side is the current table
//! - **slug**: a column `<source>_slug` where `<source>` is also a column

use crate::naming::{camel, model_for_table, plural, singular};
use crate::schema::{SchemaSnapshot, TableSchema};
use serde::Serialize;
use std::collections::BTreeSet;

const FOREIGN_KEY_SUFFIX: &str = "_id";
const SLUG_SUFFIX: &str = "_slug";

/// Kind of relation accessor emitted on a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    BelongsTo,
    HasMany,
    BelongsToMany,
}

impl RelationKind {
    /// Eloquent builder method backing the accessor
    pub fn method(&self) -> &'static str {
        match self {
            RelationKind::BelongsTo => "belongsTo",
            RelationKind::HasMany => "hasMany",
            RelationKind::BelongsToMany => "belongsToMany",
        }
    }
}

/// One inferred relation accessor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    pub kind: RelationKind,
    /// Accessor method name (`category`, `orderItems`, `tags`)
    pub accessor: String,
    pub related_table: String,
    pub related_model: String,
    /// Foreign key column, or the pivot table for belongs-to-many
    pub key: String,
}

/// A slug column populated from its source column on save
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlugField {
    pub column: String,
    pub source: String,
}

/// Everything the model template needs that is derived from the schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInference {
    pub table: String,
    pub fillable: Vec<String>,
    pub casts: Vec<(String, String)>,
    pub relations: Vec<Relationship>,
    pub slugs: Vec<SlugField>,
}

/// Derive model metadata for `table`, or `None` if the table is unknown.
pub fn infer_model(snapshot: &SchemaSnapshot, table: &str) -> Option<ModelInference> {
    let schema = snapshot.table(table)?;
    Some(ModelInference {
        table: schema.name.clone(),
        fillable: fillable(schema),
        casts: casts(schema),
        relations: infer_relationships(snapshot, schema),
        slugs: slug_fields(schema),
    })
}

/// Columns in declaration order, minus `id`
pub fn fillable(table: &TableSchema) -> Vec<String> {
    table
        .columns
        .iter()
        .filter(|c| c.name != "id")
        .map(|c| c.name.clone())
        .collect()
}

/// `(column, cast)` pairs for temporal and JSON columns
pub fn casts(table: &TableSchema) -> Vec<(String, String)> {
    table
        .columns
        .iter()
        .filter_map(|c| {
            c.sql_type
                .model_cast()
                .map(|cast| (c.name.clone(), cast.to_string()))
        })
        .collect()
}

pub fn slug_fields(table: &TableSchema) -> Vec<SlugField> {
    table
        .columns
        .iter()
        .filter_map(|c| {
            let source = c.name.strip_suffix(SLUG_SUFFIX)?;
            if source.is_empty() || !table.has_column(source) {
                return None;
            }
            Some(SlugField {
                column: c.name.clone(),
                source: source.to_string(),
            })
        })
        .collect()
}

/// Belongs-to relations from `<prefix>_id` columns.
///
/// The related table is not required to exist in the snapshot.
pub fn belongs_to(table: &TableSchema) -> Vec<Relationship> {
    table
        .columns
        .iter()
        .filter_map(|c| {
            let prefix = c.name.strip_suffix(FOREIGN_KEY_SUFFIX)?;
            if prefix.is_empty() {
                return None;
            }
            let related_table = plural(prefix);
            Some(Relationship {
                kind: RelationKind::BelongsTo,
                accessor: camel(&singular(&related_table)),
                related_model: model_for_table(&related_table),
                related_table,
                key: c.name.clone(),
            })
        })
        .collect()
}

pub fn has_many(snapshot: &SchemaSnapshot, table: &TableSchema) -> Vec<Relationship> {
    let foreign_key = format!("{}{FOREIGN_KEY_SUFFIX}", singular(&table.name));
    snapshot
        .tables
        .iter()
        .filter(|other| other.name != table.name && other.has_column(&foreign_key))
        .map(|other| Relationship {
            kind: RelationKind::HasMany,
            accessor: camel(&plural(&other.name)),
            related_table: other.name.clone(),
            related_model: model_for_table(&other.name),
            key: foreign_key.clone(),
        })
        .collect()
}

pub fn belongs_to_many(snapshot: &SchemaSnapshot, table: &TableSchema) -> Vec<Relationship> {
    snapshot
        .tables
        .iter()
        .filter(|pivot| pivot.name != table.name)
        .filter_map(|pivot| {
            let related_table = pivot_counterpart(snapshot, pivot, &table.name)?;
            Some(Relationship {
                kind: RelationKind::BelongsToMany,
                accessor: camel(&plural(&related_table)),
                related_model: model_for_table(&related_table),
                related_table,
                key: pivot.name.clone(),
            })
        })
        .collect()
}

/// If `pivot` joins `current` to another table, return that other table.
fn pivot_counterpart(snapshot: &SchemaSnapshot, pivot: &TableSchema, current: &str) -> Option<String> {
    let segments: Vec<&str> = pivot.name.split('_').collect();
    let [a, b] = segments.as_slice() else {
        return None;
    };
    if a.is_empty() || b.is_empty() {
        return None;
    }
    for segment in [a, b] {
        if snapshot.table(&plural(segment)).is_none() {
            return None;
        }
        if !pivot.has_column(&format!("{}{FOREIGN_KEY_SUFFIX}", singular(segment))) {
            return None;
        }
    }
    let (table_a, table_b) = (plural(a), plural(b));
    if table_a == current {
        Some(table_b)
    } else if table_b == current {
        Some(table_a)
    } else {
        None
    }
}

/// All relations of `table`, with duplicate accessor names dropped.
pub fn infer_relationships(snapshot: &SchemaSnapshot, table: &TableSchema) -> Vec<Relationship> {
    let candidates = belongs_to(table)
        .into_iter()
        .chain(has_many(snapshot, table))
        .chain(belongs_to_many(snapshot, table));

    let mut seen = BTreeSet::new();
    let mut relations = Vec::new();
    for relation in candidates {
        if !seen.insert(relation.accessor.clone()) {
            tracing::warn!(
                table = %table.name,
                accessor = %relation.accessor,
                kind = ?relation.kind,
                "duplicate relation accessor, keeping the first"
            );
            continue;
        }
        relations.push(relation);
    }
    relations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnDescriptor, SqlType};

    fn table(name: &str, columns: &[(&str, SqlType)]) -> TableSchema {
        TableSchema::new(
            name,
            columns
                .iter()
                .map(|(n, t)| ColumnDescriptor::new(*n, t.clone()))
                .collect(),
        )
    }

    fn shop() -> SchemaSnapshot {
        SchemaSnapshot::new(vec![
            table(
                "products",
                &[
                    ("id", SqlType::BigInt),
                    ("name", SqlType::Varchar),
                    ("name_slug", SqlType::Varchar),
                    ("title_slug", SqlType::Varchar),
                    ("category_id", SqlType::BigInt),
                    ("meta", SqlType::Json),
                    ("created_at", SqlType::Timestamp),
                ],
            ),
            table("categories", &[("id", SqlType::BigInt), ("name", SqlType::Varchar)]),
            table("tags", &[("id", SqlType::BigInt), ("label", SqlType::Varchar)]),
            table(
                "product_tag",
                &[("product_id", SqlType::BigInt), ("tag_id", SqlType::BigInt)],
            ),
            table(
                "order_items",
                &[("id", SqlType::BigInt), ("product_id", SqlType::BigInt)],
            ),
        ])
    }

    #[test]
    fn test_fillable_excludes_only_id() {
        let snapshot = shop();
        let products = snapshot.table("products").unwrap();
        assert_eq!(
            fillable(products),
            vec!["name", "name_slug", "title_slug", "category_id", "meta", "created_at"]
        );
    }

    #[test]
    fn test_casts_only_temporal_and_json() {
        let snapshot = shop();
        let products = snapshot.table("products").unwrap();
        assert_eq!(
            casts(products),
            vec![
                ("meta".to_string(), "array".to_string()),
                ("created_at".to_string(), "datetime".to_string()),
            ]
        );
    }

    #[test]
    fn test_slug_requires_source_column() {
        let snapshot = shop();
        let slugs = slug_fields(snapshot.table("products").unwrap());
        assert_eq!(
            slugs,
            vec![SlugField {
                column: "name_slug".to_string(),
                source: "name".to_string()
            }]
        );
    }

    #[test]
    fn test_belongs_to_from_id_columns() {
        let snapshot = shop();
        let rels = belongs_to(snapshot.table("products").unwrap());
        assert_eq!(rels.len(), 1);
        assert_eq!(rels[0].accessor, "category");
        assert_eq!(rels[0].related_table, "categories");
        assert_eq!(rels[0].related_model, "Category");
        assert_eq!(rels[0].key, "category_id");
    }

    #[test]
    fn test_has_many_scans_other_tables() {
        let snapshot = shop();
        let rels = has_many(&snapshot, snapshot.table("products").unwrap());
        let accessors: Vec<_> = rels.iter().map(|r| r.accessor.as_str()).collect();
        assert_eq!(accessors, vec!["productTags", "orderItems"]);
        assert!(rels.iter().all(|r| r.key == "product_id"));
    }

    #[test]
    fn test_belongs_to_many_via_pivot() {
        let snapshot = shop();
        let rels = belongs_to_many(&snapshot, snapshot.table("products").unwrap());
        assert_eq!(rels.len(), 1);
        assert_eq!(rels[0].accessor, "tags");
        assert_eq!(rels[0].related_model, "Tag");
        assert_eq!(rels[0].key, "product_tag");

        let from_tags = belongs_to_many(&snapshot, snapshot.table("tags").unwrap());
        assert_eq!(from_tags.len(), 1);
        assert_eq!(from_tags[0].accessor, "products");
    }

    #[test]
    fn test_pivot_needs_both_id_columns() {
        let mut snapshot = shop();
        snapshot.tables.push(table("product_color", &[("product_id", SqlType::BigInt)]));
        snapshot.tables.push(table("colors", &[("id", SqlType::BigInt)]));
        let rels = belongs_to_many(&snapshot, snapshot.table("products").unwrap());
        assert!(rels.iter().all(|r| r.key != "product_color"));
    }

    #[test]
    fn test_duplicate_accessors_keep_first() {
        let snapshot = SchemaSnapshot::new(vec![
            table("posts", &[("id", SqlType::BigInt), ("tags_id", SqlType::BigInt)]),
            table("tags", &[("id", SqlType::BigInt), ("post_id", SqlType::BigInt)]),
        ]);
        let rels = infer_relationships(&snapshot, snapshot.table("posts").unwrap());
        // belongs-to `tag` and has-many `tags` do not collide
        assert_eq!(rels.len(), 2);

        let snapshot = SchemaSnapshot::new(vec![
            table(
                "posts",
                &[("id", SqlType::BigInt), ("author_id", SqlType::BigInt), ("authors_id", SqlType::BigInt)],
            ),
        ]);
        let rels = infer_relationships(&snapshot, snapshot.table("posts").unwrap());
        assert_eq!(rels.len(), 1);
        assert_eq!(rels[0].key, "author_id");
    }

    #[test]
    fn test_infer_model_unknown_table() {
        assert!(infer_model(&shop(), "missing").is_none());
    }
}
