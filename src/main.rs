fn main() -> anyhow::Result<()> {
    fitroute::cli::run_cli()
}
