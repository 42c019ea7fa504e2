//! # CLI Module
//!
//! Command-line interface of the `crudgen` binary.
//!
//! ## Commands
//!
//! ### Generation
//!
//! ```bash
//! crudgen model products --factory
//! crudgen repository ProductRepository --model Product --filter-fields name,sku
//! crudgen use-cases Product
//! crudgen actions Product --with-routes
//! crudgen request Product
//! crudgen routes Product
//! crudgen crud products --factory
//! ```
//!
//! Every generation command accepts `--blank` where a model-less variant
//! exists (`use-cases`, `actions`, `request`, `routes`).
//!
//! ### `inspect`
//!
//! Print the fillable list, casts, relations and slug fields inferred for a
//! table:
//!
//! ```bash
//! crudgen inspect products --format yaml
//! ```
//!
//! ### `query`
//!
//! Evaluate filter parameters against a JSON rows file, or print the
//! parameterized SQL they produce:
//!
//! ```bash
//! crudgen query --rows products.json -f price_gt=10 -f tags_in=a,b --per-page 5 --page 2
//! crudgen query --sql --table products -f name_like=lamp
//! ```
//!
//! ### `init`
//!
//! Write a starter `crudgen.toml` into the project root.
//!
//! ## Global Options
//!
//! - `--root <DIR>` - Target project root (default: `.`)
//! - `--config <FILE>` - Configuration file (default: `<root>/crudgen.toml`)
//! - `--schema <FILE>` - Schema snapshot, overriding the configuration
//! - `--yes` / `--no-interaction` - Answer prompts without stdin
//! - `--dry-run` - Report what would be written
//! - `--verbose` - Debug logging

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{model_request, parse_filter, run, run_cli, Cli, Commands, OutputFormat};
