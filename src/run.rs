//! Running the pipeline and writing its outputs.
//!
//! Filter mode builds the graph and writes every good read. Contigs mode
//! builds the graph, prunes branching k-mers, walks contigs and writes both
//! the contigs and their lengths. Each output file is opened in its own scope
//! and flushed before the next one is touched.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use bytes::Bytes;
use serde::Serialize;
use tracing::{info, info_span};

use crate::{
    cli::{Mode, OutputFormat},
    config::Config,
    construct::build_graph,
    error::AssemblyError,
    filter,
    kmer::{KmerLength, Windowing},
    prune::{remove_branching_nodes, PruneSummary},
    reader::read_sequences,
    stats::ContigStats,
    traverse::{contig_lengths, find_contigs, Contig},
};

/// Good reads, one per record.
pub const GOOD_READS_FILE: &str = "good_reads";
/// Assembled contigs, one per record.
pub const CONTIGS_FILE: &str = "output_contigs";
/// Contig lengths, one integer per line.
pub const CONTIG_LENGTHS_FILE: &str = "contig_lengths";

/// The result of assembling a set of reads.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// Contigs at or above the minimum length, in discovery order.
    pub contigs: Vec<Contig>,
    /// `contigs[i].len()` for every `i`.
    pub lengths: Vec<usize>,
    /// What pruning removed.
    pub pruned: PruneSummary,
    /// Nodes in the graph before pruning.
    pub nodes: usize,
}

impl Assembly {
    /// Length statistics, or `None` if no contig survived.
    pub fn stats(&self) -> Option<ContigStats> {
        ContigStats::from_lengths(&self.lengths)
    }
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub enum RunSummary {
    GoodReads {
        total: usize,
        accepted: usize,
        path: PathBuf,
    },
    Contigs {
        stats: Option<ContigStats>,
        pruned: PruneSummary,
        contigs_path: PathBuf,
        lengths_path: PathBuf,
    },
}

/// Builds, prunes and traverses a graph over `reads`.
///
/// # Errors
///
/// Returns [`AssemblyError::ReadTooShort`] if a read cannot hold its windows,
/// or [`AssemblyError::MissingNode`] if the graph turns out inconsistent.
pub fn assemble_contigs(
    reads: &[Bytes],
    k: KmerLength,
    min_len: usize,
    windowing: Windowing,
) -> Result<Assembly, AssemblyError> {
    let mut graph = build_graph(reads, k, windowing)?;
    let nodes = graph.len();
    let pruned = remove_branching_nodes(&mut graph)?;
    let contigs = find_contigs(&mut graph, min_len)?;
    let lengths = contig_lengths(&contigs);

    Ok(Assembly {
        contigs,
        lengths,
        pruned,
        nodes,
    })
}

/// Builds a graph over `reads` and keeps the reads whose k-mers all recur.
///
/// # Errors
///
/// Returns [`AssemblyError::ReadTooShort`] if a read cannot hold its windows.
pub fn filter_good_reads(
    reads: &[Bytes],
    k: KmerLength,
    windowing: Windowing,
) -> Result<Vec<Bytes>, AssemblyError> {
    let graph = build_graph(reads, k, windowing)?;
    Ok(filter::filter_good_reads(&graph, reads))
}

/// Reads the configured input, runs the configured mode and writes its files.
///
/// # Errors
///
/// Returns an [`AssemblyError`] if reading, assembling or writing fails.
pub fn run(config: &Config) -> Result<RunSummary, AssemblyError> {
    let _span = info_span!("run", mode = %config.mode, k = config.k.get()).entered();

    let reads = read_sequences(&config.input, config.input_format)?;

    match config.mode {
        Mode::Filter => {
            let good = filter_good_reads(&reads, config.k, config.windowing)?;
            let path = with_output_file(&config.out_dir, GOOD_READS_FILE, |buf| {
                write_records(buf, &good, "read", config.format)
            })?;
            info!(path = %path.display(), reads = good.len(), "good reads written");

            Ok(RunSummary::GoodReads {
                total: reads.len(),
                accepted: good.len(),
                path,
            })
        }
        Mode::Contigs => {
            let assembly =
                assemble_contigs(&reads, config.k, config.min_contig_len, config.windowing)?;
            let sequences: Vec<Bytes> = assembly
                .contigs
                .iter()
                .map(|c| c.sequence().clone())
                .collect();

            let contigs_path = with_output_file(&config.out_dir, CONTIGS_FILE, |buf| {
                write_records(buf, &sequences, "contig", config.format)
            })?;
            let lengths_path = with_output_file(&config.out_dir, CONTIG_LENGTHS_FILE, |buf| {
                write_lengths(buf, &assembly.lengths)
            })?;
            info!(
                contigs = assembly.contigs.len(),
                path = %contigs_path.display(),
                "contigs written"
            );

            Ok(RunSummary::Contigs {
                stats: assembly.stats(),
                pruned: assembly.pruned,
                contigs_path,
                lengths_path,
            })
        }
    }
}

/// A sequence with a name, used for JSON serialization.
#[derive(Serialize)]
struct SequenceRecord {
    name: String,
    length: usize,
    sequence: String,
}

/// Writes `sequences` in `format`. FASTA and JSON records are named
/// `{prefix}_{n}`, counting from 1.
///
/// # Errors
///
/// Returns an error if writing or serializing fails.
pub fn write_records<W: Write>(
    buf: &mut W,
    sequences: &[Bytes],
    prefix: &str,
    format: OutputFormat,
) -> Result<(), AssemblyError> {
    match format {
        OutputFormat::Lines => {
            for seq in sequences {
                buf.write_all(seq)?;
                writeln!(buf)?;
            }
        }
        OutputFormat::Fasta => {
            for (i, seq) in sequences.iter().enumerate() {
                writeln!(buf, ">{prefix}_{} length={}", i + 1, seq.len())?;
                buf.write_all(seq)?;
                writeln!(buf)?;
            }
        }
        OutputFormat::Json => {
            let records: Vec<SequenceRecord> = sequences
                .iter()
                .enumerate()
                .map(|(i, seq)| SequenceRecord {
                    name: format!("{prefix}_{}", i + 1),
                    length: seq.len(),
                    sequence: String::from_utf8_lossy(seq).into_owned(),
                })
                .collect();
            serde_json::to_writer_pretty(&mut *buf, &records)?;
            writeln!(buf)?;
        }
    }
    Ok(())
}

/// Writes one length per line.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_lengths<W: Write>(buf: &mut W, lengths: &[usize]) -> Result<(), AssemblyError> {
    for len in lengths {
        writeln!(buf, "{len}")?;
    }
    Ok(())
}

/// Creates `dir/name`, hands a buffered writer to `write`, then flushes.
///
/// The file is closed when this returns, on success or failure. Write errors
/// are reported against the file's path.
fn with_output_file<F>(dir: &Path, name: &str, write: F) -> Result<PathBuf, AssemblyError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), AssemblyError>,
{
    let path = dir.join(name);
    let at_path = |source: std::io::Error| AssemblyError::OutputWrite {
        source,
        path: path.clone(),
    };

    fs::create_dir_all(dir).map_err(at_path)?;
    let mut buf = BufWriter::new(File::create(&path).map_err(at_path)?);
    write(&mut buf).map_err(|e| match e {
        AssemblyError::WriteError { source } => at_path(source),
        other => other,
    })?;
    buf.flush().map_err(at_path)?;
    Ok(path)
}
