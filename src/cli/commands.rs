use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{resolve_config, write_config_if_missing, GeneratorConfig, CONFIG_FILE_NAME};
use crate::generator::{
    render, ArtifactStatus, ConfigTomlTemplateData, CrudRequest, GeneratedArtifact, Generator,
    ModelRequest, RepositoryRequest,
};
use crate::logging::{init_logging_with_config, LogConfig};
use crate::naming::{singular, title};
use crate::prompt::{DefaultPrompt, FixedPrompt, Prompt, StdinPrompt};
use crate::query::{get_all, prepare, FilterMap, FilterSpec, FilterValue, MemoryQuery, PaginationSpec, SqlQuery};
use crate::relations::infer_model;
use crate::schema::{load_schema, SchemaIntrospector, SchemaSnapshot};

/// Command-line interface for crudgen
///
/// Scaffolds the CRUD layers of a Laravel application from a schema
/// snapshot, and runs the filter DSL against sample data.
#[derive(Parser)]
#[command(name = "crudgen", version)]
#[command(about = "Schema-driven CRUD scaffolding generator", long_about = None)]
pub struct Cli {
    /// Path to crudgen.toml (default: auto-detected in the project root)
    #[arg(long, global = true, env = "CRUDGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Schema snapshot (YAML or JSON); overrides `schema` from the config file
    #[arg(long, global = true, env = "CRUDGEN_SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Root of the target project
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true, default_value_t = false, conflicts_with = "no_interaction")]
    pub yes: bool,

    /// Never prompt; take each question's default answer
    #[arg(short, long, global = true, default_value_t = false)]
    pub no_interaction: bool,

    /// Show what would be written without touching any file
    #[arg(long, global = true, default_value_t = false)]
    pub dry_run: bool,

    /// Debug-level logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available crudgen commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a model (and optionally a factory) for a table
    Model {
        /// Table name (e.g. `products`)
        table: String,

        /// Singular label (default: title-cased singular table name)
        #[arg(long)]
        label: Option<String>,

        /// Plural label (default: title-cased table name)
        #[arg(long)]
        plural_label: Option<String>,

        /// Also generate a factory
        #[arg(long, default_value_t = false)]
        factory: bool,

        /// Print the command that scaffolds an observer
        #[arg(long, default_value_t = false)]
        observer: bool,
    },
    /// Generate a repository and bind it in the service provider
    Repository {
        /// Repository class name (e.g. `ProductRepository`)
        name: String,

        /// Model the repository serves; omit for an empty repository
        #[arg(long)]
        model: Option<String>,

        /// Columns matched by the `search` filter (comma-separated)
        #[arg(long, value_delimiter = ',')]
        filter_fields: Vec<String>,
    },
    /// Generate the CRUD use cases of a model, or one blank use case
    UseCases {
        /// Model name, or the class name with `--blank`
        name: String,

        /// Generate a single empty use case named NAME
        #[arg(long, default_value_t = false)]
        blank: bool,

        /// Sub-directory of a blank use case (default: NAME)
        #[arg(long, requires = "blank")]
        directory: Option<String>,
    },
    /// Generate the CRUD actions of a model, or one blank action
    Actions {
        /// Model name, or the class name with `--blank`
        name: String,

        /// Generate a single empty action named NAME
        #[arg(long, default_value_t = false)]
        blank: bool,

        /// Sub-directory of a blank action (default: NAME)
        #[arg(long, requires = "blank")]
        directory: Option<String>,

        /// Also generate the model's route group
        #[arg(long, default_value_t = false, conflicts_with = "blank")]
        with_routes: bool,
    },
    /// Generate a model's form request, or one blank request
    Request {
        /// Model name, or the class name with `--blank`
        name: String,

        /// Generate an empty request named NAME
        #[arg(long, default_value_t = false)]
        blank: bool,
    },
    /// Generate a model's route group, or one blank group
    Routes {
        /// Model name, or the group name with `--blank`
        name: String,

        /// Generate a group with a single placeholder route
        #[arg(long, default_value_t = false)]
        blank: bool,
    },
    /// Generate model, repository, use cases, routes and actions for a table
    Crud {
        /// Table name (e.g. `products`)
        table: String,

        #[arg(long)]
        label: Option<String>,

        #[arg(long)]
        plural_label: Option<String>,

        #[arg(long, default_value_t = false)]
        factory: bool,

        #[arg(long, default_value_t = false)]
        observer: bool,

        /// Columns matched by the `search` filter (comma-separated)
        #[arg(long, value_delimiter = ',')]
        filter_fields: Vec<String>,
    },
    /// Print what would be inferred for a table
    Inspect {
        table: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Run filter parameters against a JSON rows file, or print the SQL they produce
    Query {
        /// JSON array of row objects
        #[arg(long, required_unless_present = "sql")]
        rows: Option<PathBuf>,

        /// Table of the schema snapshot; required with `--sql`
        #[arg(long)]
        table: Option<String>,

        /// Filter entry `key=value` (repeatable), e.g. `price_gt=10`
        #[arg(short, long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,

        /// Filter map as a JSON object, for `_or` groups
        #[arg(long)]
        filters_json: Option<String>,

        /// Selected columns (comma-separated)
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,

        #[arg(long, default_value = "created_at")]
        order_column: String,

        #[arg(long, default_value = "asc")]
        order_direction: String,

        #[arg(long, default_value_t = 1)]
        page: u64,

        /// Page size (default: `default_per_page` from the config)
        #[arg(long)]
        per_page: Option<u64>,

        /// Return every row instead of a page
        #[arg(long, default_value_t = false)]
        all: bool,

        /// Columns matched by the `search` filter (comma-separated)
        #[arg(long, value_delimiter = ',')]
        search_fields: Vec<String>,

        /// Print parameterized SQL instead of evaluating rows
        #[arg(long, default_value_t = false)]
        sql: bool,

        /// Base URL of the page links
        #[arg(long, default_value = "/")]
        path: String,
    },
    /// Write a starter crudgen.toml if none exists
    Init {
        /// Root PHP namespace
        #[arg(long, default_value = "App")]
        namespace: String,

        /// Schema snapshot path written into the file
        #[arg(long, default_value = "schema.yaml")]
        schema_file: String,
    },
}

/// Output format of `inspect`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// Parse `key=value`
pub fn parse_filter(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim().to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got {s:?}")),
    }
}

/// Parse arguments, set up logging and run the command.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut log_config = LogConfig::from_env();
    if cli.verbose {
        log_config = log_config.verbose();
    }
    init_logging_with_config(&log_config)?;
    run(cli)
}

/// Run an already-parsed command line
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(cli.config.as_deref(), &cli.root)
        .with_context(|| format!("Failed to resolve configuration under {:?}", cli.root))?;
    tracing::debug!(root = %config.root.display(), namespace = %config.namespace, "resolved configuration");

    let prompt = prompt_for(&cli);

    match &cli.command {
        Commands::Init { namespace, schema_file } => init(&cli, &config, namespace, schema_file),
        Commands::Inspect { table, format } => {
            let schema = load_snapshot(&cli, &config, true)?;
            let inference = infer_model(&schema, table)
                .with_context(|| format!("Table '{table}' was not found in the schema"))?;
            let out = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&inference)?,
                OutputFormat::Yaml => serde_yaml::to_string(&inference)?,
            };
            println!("{out}");
            Ok(())
        }
        Commands::Query {
            rows,
            table,
            filters,
            filters_json,
            columns,
            order_column,
            order_direction,
            page,
            per_page,
            all,
            search_fields,
            sql,
            path,
        } => {
            let mut filter_entries: FilterMap = match filters_json {
                Some(json) => serde_json::from_str(json).context("Failed to parse --filters-json")?,
                None => FilterMap::new(),
            };
            for (key, value) in filters {
                filter_entries.insert(key.clone(), FilterValue::Scalar(value.clone()));
            }
            let filter = FilterSpec::new(columns.clone(), order_column.clone(), order_direction, filter_entries)?;
            let searchable: Vec<&str> = search_fields.iter().map(String::as_str).collect();

            if *sql {
                let schema = load_snapshot(&cli, &config, true)?;
                let Some(table) = table else {
                    bail!("--table is required with --sql");
                };
                if !schema.table_exists(table) {
                    bail!("Table '{table}' was not found in the schema");
                }
                let mut query = SqlQuery::new(table, &schema.list_columns(table));
                prepare(&mut query, &filter, &searchable);
                let pagination = PaginationSpec::new(*page, per_page.unwrap_or(config.default_per_page), !*all);
                let window = pagination
                    .paginate()
                    .then(|| (pagination.offset(), pagination.per_page()));
                let rendered = serde_json::json!({
                    "select": query.select_sql(filter.columns(), window),
                    "count": query.count_sql(),
                });
                println!("{}", serde_json::to_string_pretty(&rendered)?);
                return Ok(());
            }

            let Some(rows) = rows else {
                bail!("--rows is required unless --sql is given");
            };
            let content = std::fs::read_to_string(rows).with_context(|| format!("Failed to read rows file {rows:?}"))?;
            let data: Vec<serde_json::Value> =
                serde_json::from_str(&content).with_context(|| format!("Failed to parse rows file {rows:?}"))?;
            let pagination = PaginationSpec::new(*page, per_page.unwrap_or(config.default_per_page), !*all);
            let output = get_all(MemoryQuery::from_json(data), &filter, &pagination, &searchable, path);
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        _ => {
            let schema = load_snapshot(&cli, &config, needs_schema(&cli.command))?;
            let mut generator = Generator::new(config, &schema, prompt.as_ref()).dry_run(cli.dry_run);
            let artifacts = generate(&mut generator, &cli.command)?;
            report(&artifacts, cli.dry_run);
            Ok(())
        }
    }
}

fn generate(generator: &mut Generator<'_>, command: &Commands) -> anyhow::Result<Vec<GeneratedArtifact>> {
    let artifacts = match command {
        Commands::Model {
            table,
            label,
            plural_label,
            factory,
            observer,
        } => generator.generate_model(&model_request(table, label, plural_label, *factory, *observer))?,
        Commands::Repository {
            name,
            model,
            filter_fields,
        } => generator.generate_repository(&RepositoryRequest {
            name: name.clone(),
            model: model.clone(),
            filter_fields: filter_fields.clone(),
        })?,
        Commands::UseCases { name, blank, directory } => {
            if *blank {
                generator.generate_blank_use_case(name, directory.as_deref())?
            } else {
                generator.generate_use_cases(name)?
            }
        }
        Commands::Actions {
            name,
            blank,
            directory,
            with_routes,
        } => {
            if *blank {
                generator.generate_blank_action(name, directory.as_deref())?
            } else if *with_routes {
                generator.generate_actions_and_routes(name)?
            } else {
                generator.generate_actions(name)?
            }
        }
        Commands::Request { name, blank } => {
            if *blank {
                generator.generate_blank_request(name)?
            } else {
                generator.generate_request(name)?
            }
        }
        Commands::Routes { name, blank } => {
            if *blank {
                generator.generate_blank_routes(name)?
            } else {
                generator.generate_routes(name)?
            }
        }
        Commands::Crud {
            table,
            label,
            plural_label,
            factory,
            observer,
            filter_fields,
        } => generator.generate_crud(&CrudRequest {
            model: model_request(table, label, plural_label, *factory, *observer),
            filter_fields: filter_fields.clone(),
        })?,
        Commands::Inspect { .. } | Commands::Query { .. } | Commands::Init { .. } => Vec::new(),
    };
    Ok(artifacts)
}

/// Labels default to the title-cased table name
pub fn model_request(
    table: &str,
    label: &Option<String>,
    plural_label: &Option<String>,
    factory: bool,
    observer: bool,
) -> ModelRequest {
    ModelRequest {
        table: table.to_string(),
        label: label.clone().unwrap_or_else(|| title(&singular(table))),
        plural_label: plural_label.clone().unwrap_or_else(|| title(table)),
        factory,
        observer,
    }
}

/// `--yes` confirms everything; `--no-interaction` takes each default
pub(super) fn prompt_for(cli: &Cli) -> Box<dyn Prompt> {
    if cli.yes {
        Box::new(FixedPrompt(true))
    } else if cli.no_interaction {
        Box::new(DefaultPrompt)
    } else {
        Box::new(StdinPrompt)
    }
}

/// Whether a generator command reads table metadata.
///
/// A repository for a model without explicit `--filter-fields` infers its
/// searchable columns from the model's table.
pub(super) fn needs_schema(command: &Commands) -> bool {
    match command {
        Commands::Model { .. } | Commands::Crud { .. } | Commands::Request { blank: false, .. } => true,
        Commands::Actions { blank, .. } => !blank,
        Commands::Repository {
            model: Some(_),
            filter_fields,
            ..
        } => filter_fields.iter().all(|f| f.trim().is_empty()),
        _ => false,
    }
}

/// Load the schema snapshot from `--schema` or the config file.
///
/// Without one, commands that do not need table metadata get an empty snapshot.
fn load_snapshot(cli: &Cli, config: &GeneratorConfig, required: bool) -> anyhow::Result<SchemaSnapshot> {
    let path = cli.schema.clone().or_else(|| config.schema_path());
    match path {
        Some(path) => load_schema(&path).with_context(|| format!("Failed to load schema snapshot {path:?}")),
        None if required => bail!("No schema snapshot configured: pass --schema or set `schema` in {CONFIG_FILE_NAME}"),
        None => Ok(SchemaSnapshot::default()),
    }
}

fn init(cli: &Cli, config: &GeneratorConfig, namespace: &str, schema_file: &str) -> anyhow::Result<()> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.root.join(CONFIG_FILE_NAME));
    let content = render(
        "configuration",
        &ConfigTomlTemplateData {
            namespace: namespace.to_string(),
            schema: schema_file.to_string(),
            per_page: config.default_per_page,
        },
    )?;
    if cli.dry_run {
        println!("📝 Would write configuration → {path:?}");
        return Ok(());
    }
    if write_config_if_missing(&path, &content)? {
        println!("✅ Generated configuration → {path:?}");
    } else {
        println!("ℹ️  Configuration already present: {path:?}");
    }
    Ok(())
}

fn report(artifacts: &[GeneratedArtifact], dry_run: bool) {
    let count = |status: ArtifactStatus| artifacts.iter().filter(|a| a.status == status).count();
    if dry_run {
        println!("🔎 Dry run: {} planned, {} skipped", count(ArtifactStatus::Planned), count(ArtifactStatus::Skipped));
        return;
    }
    println!(
        "✨ Done: {} created, {} overwritten, {} updated, {} skipped",
        count(ArtifactStatus::Created),
        count(ArtifactStatus::Overwritten),
        count(ArtifactStatus::Updated),
        count(ArtifactStatus::Skipped)
    );
}
