//! Builder pattern API for assembling reads.
//!
//! This module provides a fluent builder interface for configuring and running
//! either mode of the pipeline, on reads already in memory or on a file.
//!
//! # Example
//!
//! ```rust
//! use bytes::Bytes;
//! use kontig::builder::Assembler;
//!
//! let reads = vec![Bytes::from_static(b"AATGCA"), Bytes::from_static(b"ATGCAT")];
//! let assembly = Assembler::new().k(3)?.min_contig_len(1).assemble(&reads)?;
//!
//! assert_eq!(assembly.contigs[0].as_string(), "AATGCA");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::{
    cli::{Mode, OutputFormat},
    config::Config,
    error::{BuilderError, KmerLengthError},
    format::ReadFormat,
    input::Input,
    kmer::{KmerLength, Windowing},
    run::{self, assemble_contigs, filter_good_reads, Assembly, RunSummary},
    traverse::DEFAULT_MIN_CONTIG_LEN,
};

/// A builder for configuring assembly and filtering runs.
///
/// Use [`Assembler::new()`] to create a new builder, configure it with the
/// fluent API, then call [`assemble()`](Assembler::assemble),
/// [`filter()`](Assembler::filter) or [`run()`](Assembler::run).
///
/// # Example
///
/// ```rust,no_run
/// use kontig::builder::Assembler;
/// use kontig::cli::{Mode, OutputFormat};
///
/// let summary = Assembler::new()
///     .k(31)?
///     .mode(Mode::Contigs)
///     .min_contig_len(200)
///     .format(OutputFormat::Fasta)
///     .run("reads.txt", "out")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Assembler {
    k: Option<KmerLength>,
    mode: Mode,
    min_contig_len: usize,
    windowing: Windowing,
    format: OutputFormat,
    input_format: ReadFormat,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler {
    /// Creates a new `Assembler` builder with default settings.
    ///
    /// Default settings:
    /// - `k`: None (must be set before running)
    /// - `mode`: contigs
    /// - `min_contig_len`: 100
    /// - `windowing`: the final window of each read is left out
    /// - `format`: one sequence per line
    /// - `input_format`: detected from the file extension
    #[must_use]
    pub fn new() -> Self {
        Self {
            k: None,
            mode: Mode::Contigs,
            min_contig_len: DEFAULT_MIN_CONTIG_LEN,
            windowing: Windowing::default(),
            format: OutputFormat::default(),
            input_format: ReadFormat::default(),
        }
    }

    /// Sets the k-mer length.
    ///
    /// # Errors
    ///
    /// Returns [`KmerLengthError`] if `k` is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kontig::builder::Assembler;
    ///
    /// assert!(Assembler::new().k(0).is_err());
    /// let assembler = Assembler::new().k(21)?;
    /// # Ok::<(), kontig::error::KmerLengthError>(())
    /// ```
    pub fn k(mut self, k: usize) -> Result<Self, KmerLengthError> {
        self.k = Some(KmerLength::new(k)?);
        Ok(self)
    }

    /// Sets the k-mer length from a pre-validated `KmerLength`.
    #[must_use]
    pub fn k_validated(mut self, k: KmerLength) -> Self {
        self.k = Some(k);
        self
    }

    /// Sets the mode used by [`run()`](Self::run).
    #[must_use]
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the minimum length a contig needs to be reported.
    #[must_use]
    pub fn min_contig_len(mut self, min_contig_len: usize) -> Self {
        self.min_contig_len = min_contig_len;
        self
    }

    #[must_use]
    pub fn windowing(mut self, windowing: Windowing) -> Self {
        self.windowing = windowing;
        self
    }

    /// Sets the output format for [`run()`](Self::run).
    #[must_use]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn input_format(mut self, input_format: ReadFormat) -> Self {
        self.input_format = input_format;
        self
    }

    /// Assembles contigs from reads already in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if `k` has not been set, a read is shorter than `k`,
    /// or the graph is inconsistent.
    pub fn assemble(&self, reads: &[Bytes]) -> Result<Assembly, BuilderError> {
        let k = self.k.ok_or(BuilderError::KmerLengthNotSet)?;
        Ok(assemble_contigs(
            reads,
            k,
            self.min_contig_len,
            self.windowing,
        )?)
    }

    /// Keeps the reads whose k-mers all occur more than once.
    ///
    /// # Errors
    ///
    /// Returns an error if `k` has not been set or a read is shorter than `k`.
    pub fn filter(&self, reads: &[Bytes]) -> Result<Vec<Bytes>, BuilderError> {
        let k = self.k.ok_or(BuilderError::KmerLengthNotSet)?;
        Ok(filter_good_reads(reads, k, self.windowing)?)
    }

    /// Reads `path`, runs the configured mode and writes its files into
    /// `out_dir`. A path of `-` reads stdin.
    ///
    /// # Errors
    ///
    /// Returns an error if `k` has not been set, or reading, assembling or
    /// writing fails.
    pub fn run<P, Q>(&self, path: P, out_dir: Q) -> Result<RunSummary, BuilderError>
    where
        P: AsRef<Path>,
        Q: Into<PathBuf>,
    {
        let k = self.k.ok_or(BuilderError::KmerLengthNotSet)?;
        let config = Config {
            input: Input::from_path(path.as_ref()),
            mode: self.mode,
            k,
            min_contig_len: self.min_contig_len,
            windowing: self.windowing,
            out_dir: out_dir.into(),
            format: self.format,
            input_format: self.input_format,
        };
        Ok(run::run(&config)?)
    }
}
