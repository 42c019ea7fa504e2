//! Unit tests for CLI parsing

use super::commands::{needs_schema, prompt_for};
use crate::cli::{model_request, parse_filter, Cli, Commands, OutputFormat};
use crate::prompt::Prompt;
use clap::Parser;

#[test]
fn test_model_command_with_flags() {
    let cli = Cli::try_parse_from([
        "crudgen",
        "model",
        "products",
        "--label",
        "Product",
        "--factory",
        "--yes",
    ])
    .unwrap();

    assert!(cli.yes);
    match cli.command {
        Commands::Model {
            table,
            label,
            plural_label,
            factory,
            observer,
        } => {
            assert_eq!(table, "products");
            assert_eq!(label.as_deref(), Some("Product"));
            assert!(plural_label.is_none());
            assert!(factory);
            assert!(!observer);
        }
        _ => panic!("Expected Model command"),
    }
}

#[test]
fn test_global_options_after_subcommand() {
    let cli = Cli::try_parse_from([
        "crudgen",
        "routes",
        "Product",
        "--root",
        "/srv/shop",
        "--dry-run",
        "--schema",
        "db.yaml",
    ])
    .unwrap();
    assert!(cli.dry_run);
    assert_eq!(cli.root.to_string_lossy(), "/srv/shop");
    assert_eq!(cli.schema.unwrap().to_string_lossy(), "db.yaml");
}

#[test]
fn test_yes_conflicts_with_no_interaction() {
    assert!(Cli::try_parse_from(["crudgen", "crud", "products", "--yes", "--no-interaction"]).is_err());
}

#[test]
fn test_directory_requires_blank() {
    assert!(Cli::try_parse_from(["crudgen", "actions", "Product", "--directory", "Reports"]).is_err());
    assert!(Cli::try_parse_from(["crudgen", "actions", "Export", "--blank", "--directory", "Reports"]).is_ok());
}

#[test]
fn test_repository_filter_fields_are_comma_separated() {
    let cli = Cli::try_parse_from([
        "crudgen",
        "repository",
        "ProductRepository",
        "--model",
        "Product",
        "--filter-fields",
        "name,sku",
    ])
    .unwrap();
    match cli.command {
        Commands::Repository { filter_fields, .. } => assert_eq!(filter_fields, vec!["name", "sku"]),
        _ => panic!("Expected Repository command"),
    }
}

#[test]
fn test_repository_without_filter_fields_needs_schema() {
    let parse = |args: &[&str]| Cli::try_parse_from(args.iter().copied()).unwrap().command;

    assert!(needs_schema(&parse(&["crudgen", "repository", "ProductRepository", "--model", "Product"])));
    assert!(!needs_schema(&parse(&[
        "crudgen",
        "repository",
        "ProductRepository",
        "--model",
        "Product",
        "--filter-fields",
        "name",
    ])));
    assert!(!needs_schema(&parse(&["crudgen", "repository", "AuditRepository"])));
}

#[test]
fn test_yes_and_no_interaction_prompts() {
    let yes = Cli::try_parse_from(["crudgen", "--yes", "routes", "Product"]).unwrap();
    let prompt = prompt_for(&yes);
    assert!(prompt.confirm("Overwrite?", false).unwrap());

    let defaults = Cli::try_parse_from(["crudgen", "--no-interaction", "routes", "Product"]).unwrap();
    let prompt = prompt_for(&defaults);
    assert!(!prompt.confirm("Overwrite?", false).unwrap());
    assert!(prompt.confirm("Continue?", true).unwrap());
}

#[test]
fn test_query_command_filters() {
    let cli = Cli::try_parse_from([
        "crudgen",
        "query",
        "--rows",
        "rows.json",
        "-f",
        "price_gt=10",
        "--filter",
        "tags_in=a,b,c",
        "--per-page",
        "5",
    ])
    .unwrap();
    match cli.command {
        Commands::Query {
            filters, per_page, sql, ..
        } => {
            assert_eq!(
                filters,
                vec![
                    ("price_gt".to_string(), "10".to_string()),
                    ("tags_in".to_string(), "a,b,c".to_string())
                ]
            );
            assert_eq!(per_page, Some(5));
            assert!(!sql);
        }
        _ => panic!("Expected Query command"),
    }
}

#[test]
fn test_query_requires_rows_or_sql() {
    assert!(Cli::try_parse_from(["crudgen", "query"]).is_err());
    assert!(Cli::try_parse_from(["crudgen", "query", "--sql", "--table", "products"]).is_ok());
}

#[test]
fn test_inspect_format() {
    let cli = Cli::try_parse_from(["crudgen", "inspect", "products", "--format", "yaml"]).unwrap();
    match cli.command {
        Commands::Inspect { format, .. } => assert_eq!(format, OutputFormat::Yaml),
        _ => panic!("Expected Inspect command"),
    }
}

#[test]
fn test_parse_filter() {
    assert_eq!(parse_filter("a=b=c"), Ok(("a".to_string(), "b=c".to_string())));
    assert_eq!(parse_filter("name_null="), Ok(("name_null".to_string(), String::new())));
    assert!(parse_filter("novalue").is_err());
    assert!(parse_filter("=x").is_err());
}

#[test]
fn test_model_request_default_labels() {
    let request = model_request("product_categories", &None, &None, false, false);
    assert_eq!(request.label, "Product Category");
    assert_eq!(request.plural_label, "Product Categories");

    let request = model_request("products", &Some("Item".to_string()), &None, true, false);
    assert_eq!(request.label, "Item");
    assert!(request.factory);
}

#[test]
fn test_all_commands_parse() {
    let commands = vec![
        vec!["crudgen", "model", "products"],
        vec!["crudgen", "repository", "Report"],
        vec!["crudgen", "use-cases", "Product"],
        vec!["crudgen", "actions", "Product", "--with-routes"],
        vec!["crudgen", "request", "Product", "--blank"],
        vec!["crudgen", "routes", "Health", "--blank"],
        vec!["crudgen", "crud", "products", "--filter-fields", "name"],
        vec!["crudgen", "inspect", "products"],
        vec!["crudgen", "init"],
    ];

    for args in commands {
        let cli = Cli::try_parse_from(&args);
        assert!(cli.is_ok(), "Failed to parse command: {:?}", args);
    }
}
