fn main() -> anyhow::Result<()> {
    crudgen::cli::run_cli()
}
