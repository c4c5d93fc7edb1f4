use clap::Parser;
use tracing::Level;

mod cli;
mod commands;
mod settings;
mod snapshot_files;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();
    commands::run_command(cli)
}
