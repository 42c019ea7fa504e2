//! # Query Module
//!
//! Runtime side of the generated repositories: the filter DSL embedded in
//! query-parameter names, the filter/pagination value objects, and the
//! paginated result shape.
//!
//! ## Pipeline
//!
//! ```text
//! FilterMap → dsl::apply_filters → Predicate tree → QueryBuilder
//!           → ORDER BY → PaginationSpec → QueryOutput
//! ```
//!
//! Two builders ship with the crate:
//!
//! - [`SqlQuery`] renders parameterized SQL for a real database driver
//! - [`MemoryQuery`] evaluates predicates over JSON rows (fixtures, `crudgen query`)
//!
//! Any other backend only has to implement [`QueryBuilder`] (and
//! [`RowSource`] to participate in [`get_all`]).

mod builder;
mod dsl;
mod entity;
mod filter;
mod memory;
mod pagination;
mod predicate;

pub use builder::{render_predicate, QueryBuilder, RenderedSql, RowSource, SqlQuery};
pub use dsl::{
    apply_filters, entry_predicate, expand_search, parse_key, predicate_for, resolve_or_fields,
    Operator, SEARCH_KEY,
};
pub use entity::{prepare, Entity};
pub use filter::{filter_map, FilterMap, FilterSpec, FilterValue, OrderDirection, ValidationError};
pub use memory::{like_regex, MemoryQuery};
pub use pagination::{LengthAwarePage, PageLink, PaginationSpec, QueryOutput, DEFAULT_PER_PAGE};
pub use predicate::{CompareOp, Predicate};

/// Run a list query: filters, ordering, then pagination gating.
///
/// `path` is the base URL used for the page navigation links.
pub fn get_all<Q: RowSource>(
    mut query: Q,
    filter: &FilterSpec,
    pagination: &PaginationSpec,
    searchable: &[&str],
    path: &str,
) -> QueryOutput {
    prepare(&mut query, filter, searchable);
    if !pagination.paginate() {
        return QueryOutput::All(query.fetch(filter.columns(), None));
    }
    let total = query.count();
    let rows = query.fetch(
        filter.columns(),
        Some((pagination.offset(), pagination.per_page())),
    );
    QueryOutput::Page(LengthAwarePage::new(
        rows,
        total,
        pagination.per_page(),
        pagination.page(),
        path,
    ))
}
