//! seglog CLI: decode and verify transparency-log records.
//!
//! Records arrive as raw bytes (or hex text with `--hex`); the tool
//! decodes them with the strict record parsers and prints the result, or
//! recomputes a Merkle root from an audit proof and compares it against a
//! committed root.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use seglog_records::TreeType;
use std::path::PathBuf;

mod commands;

/// Inspect and verify seglog records.
#[derive(Parser)]
#[command(name = "seglog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Which Merkle tree a proof belongs to. The proof wire form does not say;
/// the caller must know.
#[derive(Clone, Copy, ValueEnum)]
enum TreeArg {
    /// Per-segment leaf tree
    Segment,
    /// Tree over segment checkpoints
    SegmentInfo,
}

impl From<TreeArg> for TreeType {
    fn from(arg: TreeArg) -> Self {
        match arg {
            TreeArg::Segment => TreeType::LogSegmentTree,
            TreeArg::SegmentInfo => TreeType::SegmentInfoTree,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Human,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a DigitallySigned envelope
    Signature {
        /// Record file (raw bytes, or hex text with --hex)
        file: PathBuf,

        /// Treat the input file as hex text
        #[arg(long)]
        hex: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: Format,
    },

    /// Decode a segment-info record
    SegmentInfo {
        file: PathBuf,

        #[arg(long)]
        hex: bool,

        #[arg(short, long, value_enum, default_value = "human")]
        format: Format,
    },

    /// Decode an audit proof
    Proof {
        /// Tree the proof was served for
        #[arg(short, long, value_enum)]
        tree: TreeArg,

        file: PathBuf,

        #[arg(long)]
        hex: bool,

        #[arg(short, long, value_enum, default_value = "human")]
        format: Format,
    },

    /// Recompute the root from an audit proof and compare it to a
    /// committed root
    VerifyProof {
        /// Tree the proof was served for
        #[arg(short, long, value_enum)]
        tree: TreeArg,

        /// Expected Merkle root, hex-encoded
        #[arg(short, long)]
        root: String,

        /// File holding the raw leaf data the proof is for
        #[arg(short, long)]
        leaf: PathBuf,

        /// Proof file (raw bytes, or hex text with --hex)
        file: PathBuf,

        #[arg(long)]
        hex: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Signature { file, hex, format } => {
            commands::inspect::signature(&file, hex, format)
        }
        Commands::SegmentInfo { file, hex, format } => {
            commands::inspect::segment_info(&file, hex, format)
        }
        Commands::Proof {
            tree,
            file,
            hex,
            format,
        } => commands::inspect::proof(tree.into(), &file, hex, format),
        Commands::VerifyProof {
            tree,
            root,
            leaf,
            file,
            hex,
        } => commands::verify::proof(tree.into(), &root, &leaf, &file, hex),
    }
}
