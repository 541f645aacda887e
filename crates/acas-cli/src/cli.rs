use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "acas",
    about = "Anchored content-addressable store",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Data directory holding the blob collection and ledger log
    /// [default: ./acas-data]
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the ACAS server daemon
    Serve(ServeArgs),
    /// Store a file and print its content address
    Put(PutArgs),
    /// Fetch content by address
    Get(GetArgs),
    /// Anchor a content address on the ledger
    Anchor(AnchorArgs),
    /// Store a batch file and an anchor file, then anchor the anchor file
    AnchorBatch(AnchorBatchArgs),
    /// List anchored addresses
    Anchors,
    /// Check that the store and ledger open and answer
    Warmup,
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Override the bind address
    #[arg(long)]
    pub bind: Option<String>,
}

#[derive(Args)]
pub struct PutArgs {
    pub file: PathBuf,
}

#[derive(Args)]
pub struct GetArgs {
    pub address: String,
    /// Write content here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct AnchorArgs {
    pub address: String,
}

#[derive(Args)]
pub struct AnchorBatchArgs {
    pub batch_file: PathBuf,
    pub anchor_file: PathBuf,
}
