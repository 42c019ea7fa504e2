use super::builder::{QueryBuilder, SqlQuery};
use super::dsl::{apply_filters, expand_search};
use super::filter::FilterSpec;

/// Reusable base-entity mixin.
///
/// Implementors declare their table and columns; [`Entity::filtered`] then
/// applies the filter DSL and the single ORDER BY clause in one step.
///
/// ```rust
/// use crudgen::query::{Entity, FilterSpec, filter_map};
///
/// struct Product;
///
/// impl Entity for Product {
///     const TABLE: &'static str = "products";
///     const COLUMNS: &'static [&'static str] = &["id", "name", "price", "created_at"];
///     const SEARCHABLE: &'static [&'static str] = &["name"];
/// }
///
/// let mut spec = FilterSpec::default();
/// spec.set_filters(filter_map([("price_gt", "10")]));
/// let sql = Product::filtered(&spec).select_sql(spec.columns(), None).sql;
/// assert_eq!(
///     sql,
///     "SELECT * FROM `products` WHERE `price` > ?1 ORDER BY `created_at` ASC"
/// );
/// ```
pub trait Entity {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];
    /// Columns matched by the `search` filter
    const SEARCHABLE: &'static [&'static str] = &[];

    fn query() -> SqlQuery {
        SqlQuery::new(Self::TABLE, Self::COLUMNS)
    }

    fn filtered(spec: &FilterSpec) -> SqlQuery {
        let mut query = Self::query();
        prepare(&mut query, spec, Self::SEARCHABLE);
        query
    }
}

/// Apply filters (with `search` expansion) and ordering from `spec`.
pub fn prepare<Q: QueryBuilder + ?Sized>(query: &mut Q, spec: &FilterSpec, searchable: &[&str]) {
    let filters = expand_search(&*query, spec.filters(), searchable);
    apply_filters(query, &filters);
    query.order_by(spec.order_column(), spec.order_direction());
}
