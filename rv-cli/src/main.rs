//! rv-cli - prepare, validate and inspect the recycling dashboard datasets.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "rv-cli",
    version,
    about = "Recycling metrics dataset toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: rv_process::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    rv_process::run(cli.command)
}
