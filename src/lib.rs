//! # crudgen
//!
//! **crudgen** scaffolds the CRUD layers of a Laravel application from a
//! database schema snapshot, and ships the suffix-driven query filter DSL the
//! generated code relies on as a native Rust library.
//!
//! ## Overview
//!
//! Given a table name, crudgen inspects the table's columns and emits model,
//! factory, repository, use-case, action, form-request and route files that
//! follow a layered Model → Repository → UseCase → Action/Route architecture.
//! Shared files (the service provider and the API route file) are patched
//! idempotently: re-running a command never duplicates a binding or an import.
//!
//! ## Architecture
//!
//! The library is organized into these modules:
//!
//! - **[`schema`]** - Column types, table metadata and the schema snapshot loader
//! - **[`relations`]** - Pure inference of fillable lists, casts, relationships and slug fields
//! - **[`naming`]** - Case conversion and English singular/plural inflection
//! - **[`generator`]** - Template rendering, artifact writing and registration patching
//! - **[`query`]** - Filter DSL, filter/pagination value objects, SQL and in-memory query builders
//! - **[`config`]** - `crudgen.toml` project layout
//! - **[`prompt`]** - Confirmation prompts (stdin, fixed, default, scripted)
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `crudgen` command line
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(crudgen)
//!     participant Config as config::resolve_config
//!     participant Schema as schema::load_schema
//!     participant Infer as relations::infer_model
//!     participant Gen as generator::Generator
//!     participant FS as File System
//!
//!     User->>CLI: crudgen crud products --factory
//!     CLI->>Config: resolve crudgen.toml
//!     Config-->>CLI: GeneratorConfig
//!     CLI->>Schema: load schema.yaml
//!     Schema-->>CLI: SchemaSnapshot
//!     CLI->>Gen: generate_crud(request)
//!     Gen->>Infer: fillable, casts, relations, slugs
//!     Infer-->>Gen: ModelInference
//!     Gen->>Gen: Render every artifact of the step
//!     Gen->>FS: Write / skip / overwrite after confirmation
//!     Gen->>FS: Patch AppServiceProvider and routes/api.php
//!     Gen-->>CLI: Vec<GeneratedArtifact>
//! ```
//!
//! ### Query Flow
//!
//! ```text
//! filter parameters → FilterMap → dsl::apply_filters → Predicate tree
//!     → QueryBuilder (SqlQuery | MemoryQuery) → ORDER BY → pagination → QueryOutput
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! crudgen init
//! crudgen crud products --factory --filter-fields name,sku
//! crudgen query --rows products.json -f price_gt=10 --per-page 5
//! ```
//!
//! ## Filter DSL
//!
//! ```rust
//! use crudgen::query::{apply_filters, filter_map, SqlQuery};
//!
//! let mut query = SqlQuery::new("products", &["id", "name", "price"]);
//! apply_filters(&mut query, &filter_map([("price_gt", "10"), ("name_like", "lamp")]));
//! let sql = query.select_sql(&[], None);
//! assert_eq!(
//!     sql.sql,
//!     "SELECT * FROM `products` WHERE `name` LIKE ?1 AND `price` > ?2"
//! );
//! assert_eq!(sql.params, vec!["%lamp%", "10"]);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod naming;
pub mod prompt;
pub mod query;
pub mod relations;
pub mod schema;

pub use config::GeneratorConfig;
pub use error::{GeneratorError, GeneratorResult};
pub use generator::{ArtifactStatus, GeneratedArtifact, Generator};
pub use schema::{SchemaIntrospector, SchemaSnapshot};
