//! # Generator Module
//!
//! The generator scaffolds the CRUD layers of a Laravel application from a
//! schema snapshot: model, factory, repository, use cases, actions, form
//! requests and routes.
//!
//! ## Overview
//!
//! Each `generate_*` operation of [`Generator`] is one step:
//!
//! - **Model** - fillable list, casts, relationships and slug hooks inferred from the table
//! - **Repository** - interface and implementation, bound in the service provider
//! - **Use cases** - `GetAll`, `Show`, `Create`, `Update`, `Delete`, each delegating to the repository
//! - **Actions** - one invokable action per use case, plus the shared `ApiResponser` trait
//! - **Form request** - validation rules derived from column types
//! - **Routes** - a route group per model, autoloaded from the API route file
//!
//! ## Architecture
//!
//! ```text
//! Schema Snapshot → Inference → Template Rendering → Artifact Writer → Project Files
//!                                                  ↘ Registration Patch → Service Provider
//! ```
//!
//! 1. **Inference** - pure functions over the snapshot ([`crate::relations`])
//! 2. **Template Rendering** - Askama templates with one typed context per artifact kind
//! 3. **Artifact Writer** - writes, skips existing files, or plans them in dry-run mode
//! 4. **Registration Patch** - structured, idempotent edit of the service provider
//!
//! A step renders every artifact before writing the first one, so template or
//! schema errors never leave a half-generated layer behind.
//!
//! ## Generated Structure
//!
//! ```text
//! app/
//! ├── Models/{Model}.php, BaseModel.php
//! ├── Repositories/{Model}/{Model}Repository.php, {Model}RepositoryInterface.php
//! ├── Support/Filter.php, Pagination.php
//! ├── UseCases/{Model}/{Op}{Model}UseCase.php
//! ├── Http/Actions/{Model}/{Model}{Op}Action.php
//! ├── Http/Requests/{Model}Request.php, BaseRequest.php
//! ├── Traits/ApiResponser.php
//! ├── Routes/{Model}Routes.php
//! └── Providers/AppServiceProvider.php   # patched
//! database/factories/{Model}Factory.php
//! routes/api.php                          # patched
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crudgen::config::GeneratorConfig;
//! use crudgen::generator::{Generator, ModelRequest};
//! use crudgen::prompt::StdinPrompt;
//! use crudgen::schema::load_schema;
//!
//! let schema = load_schema("schema.yaml".as_ref())?;
//! let mut generator = Generator::new(GeneratorConfig::with_root("."), &schema, &StdinPrompt);
//! generator.generate_model(&ModelRequest {
//!     table: "products".into(),
//!     label: "Product".into(),
//!     plural_label: "Products".into(),
//!     factory: true,
//!     observer: false,
//! })?;
//! ```
//!
//! ## Template Customization
//!
//! Templates live in the `templates/` directory (`model.php.txt`,
//! `repository.php.txt`, `action.php.txt`, ...) and are compiled into the
//! binary.

mod artifact;
mod project;
mod registration;
mod templates;

pub use artifact::*;
pub use project::*;
pub use registration::*;
pub use templates::*;
