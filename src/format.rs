//! Read file format detection and selection.
//!
//! Reads may come one per line (the plain layout short-read dumps use), or as
//! FASTA or FASTQ records.

use clap::ValueEnum;
use std::ffi::OsStr;
use std::path::Path;

/// Layout of the read input.
///
/// When set to `Auto`, the layout is picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReadFormat {
    /// Detect from the file extension.
    ///
    /// Detection rules:
    /// - `.fq`, `.fastq` -> FASTQ
    /// - `.fa`, `.fasta`, `.fna` -> FASTA
    /// - anything else, or stdin -> one read per line
    #[default]
    Auto,
    /// One read per line.
    Lines,
    /// FASTA records (`.fa`, `.fasta`, `.fna`).
    Fasta,
    /// FASTQ records (`.fq`, `.fastq`).
    Fastq,
}

impl ReadFormat {
    /// Detects the read format from a file path's extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use kontig::format::ReadFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(ReadFormat::from_extension(Path::new("reads.fq")), ReadFormat::Fastq);
    /// assert_eq!(ReadFormat::from_extension(Path::new("genome.FA")), ReadFormat::Fasta);
    /// assert_eq!(ReadFormat::from_extension(Path::new("reads.txt")), ReadFormat::Lines);
    /// ```
    #[must_use]
    pub fn from_extension(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase);

        match ext.as_deref() {
            Some("fq" | "fastq") => Self::Fastq,
            Some("fa" | "fasta" | "fna") => Self::Fasta,
            _ => Self::Lines,
        }
    }

    /// Resolves `Auto` to a concrete format.
    ///
    /// Explicit formats are returned unchanged; `Auto` with no path (stdin)
    /// means one read per line.
    #[must_use]
    pub fn resolve(self, path: Option<&Path>) -> Self {
        match self {
            Self::Auto => path.map_or(Self::Lines, Self::from_extension),
            other => other,
        }
    }
}

impl std::fmt::Display for ReadFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Lines => write!(f, "lines"),
            Self::Fasta => write!(f, "fasta"),
            Self::Fastq => write!(f, "fastq"),
        }
    }
}
