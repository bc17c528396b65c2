mod cli;

fn main() -> anyhow::Result<()> {
    cli::run_from_env()
}
