use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use cheevo_types::AssetKind;

#[derive(Parser)]
#[command(
    name = "cheevo",
    about = "Compare generated, local and published achievement assets",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with reconcile settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Render values in hexadecimal
    #[arg(long, global = true)]
    pub hex: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show how the generated asset relates to the local and published ones
    Compare(CompareArgs),
    /// Write the generated asset into the local file
    Update(UpdateArgs),
    /// Remove the local copy
    Delete(DeleteArgs),
}

/// Snapshot files for the three slots. Missing files are empty slots.
#[derive(Args, Clone, Debug, Default)]
pub struct SourceArgs {
    #[arg(short, long)]
    pub generated: Option<PathBuf>,
    #[arg(short, long)]
    pub local: Option<PathBuf>,
    #[arg(short, long)]
    pub published: Option<PathBuf>,
    /// Asset kind; inferred from the snapshots when omitted
    #[arg(long)]
    pub kind: Option<AssetKind>,
    /// JSON object mapping addresses to code notes
    #[arg(long)]
    pub notes: Option<PathBuf>,
}

#[derive(Args, Clone, Debug)]
pub struct CompareArgs {
    #[command(flatten)]
    pub sources: SourceArgs,
}

#[derive(Args, Clone, Debug)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub sources: SourceArgs,
    /// Run the stricter validation pass
    #[arg(long)]
    pub validate_all: bool,
    /// First temporary id to offer if the asset has none
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub next_local_id: Option<u32>,
}

#[derive(Args, Clone, Debug)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub sources: SourceArgs,
}
