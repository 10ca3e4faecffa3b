//! Command-line interface definition.

use clap::{Parser, ValueEnum};
use std::{path::PathBuf, str::FromStr};

use crate::{
    error::ModeError, format::ReadFormat, kmer::KmerLength, traverse::DEFAULT_MIN_CONTIG_LEN,
};

/// Assemble short reads into contigs with a k-mer graph, or keep only reads
/// whose k-mers all recur.
#[derive(Parser, Debug)]
#[command(name = "kontig")]
#[command(version, author, about, long_about = None)]
pub struct Args {
    /// Reads file (one read per line, FASTA or FASTQ), or `-` for stdin
    pub path: PathBuf,

    /// Run mode: `filter` (or `g`) writes good reads, `contigs` (or `c`) assembles contigs
    #[arg(value_parser = parse_mode)]
    pub mode: Mode,

    /// K-mer length
    #[arg(value_parser = parse_k)]
    pub k: usize,

    /// Minimum contig length (contigs mode only)
    #[arg(default_value_t = DEFAULT_MIN_CONTIG_LEN)]
    pub min_contig_len: usize,

    /// Directory the output files are written to
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Output format for reads and contigs
    #[arg(short, long, value_enum, default_value = "lines")]
    pub format: OutputFormat,

    /// Input layout
    #[arg(short, long, value_enum, default_value = "auto")]
    pub input_format: ReadFormat,

    /// Build the graph over every full k-mer window, including each read's last
    #[arg(long)]
    pub full_windows: bool,

    /// Suppress the summary on stdout
    #[arg(short, long)]
    pub quiet: bool,

    /// Log progress to stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

/// What a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Keep reads whose k-mers all occur more than once.
    Filter,
    /// Prune branching k-mers and assemble contigs.
    Contigs,
}

impl FromStr for Mode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "filter" | "g" | "good-reads" => Ok(Self::Filter),
            "contigs" | "c" => Ok(Self::Contigs),
            _ => Err(ModeError {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Filter => write!(f, "filter"),
            Self::Contigs => write!(f, "contigs"),
        }
    }
}

/// Output format for reads and contigs.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One sequence per line
    #[default]
    Lines,
    /// FASTA records (>contig_{n} length={len})
    Fasta,
    /// JSON array of records
    Json,
}

fn parse_k(s: &str) -> Result<usize, String> {
    let k: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    KmerLength::new(k).map_err(|e| e.to_string())?;
    Ok(k)
}

fn parse_mode(s: &str) -> Result<Mode, String> {
    s.parse().map_err(|e: ModeError| e.to_string())
}
