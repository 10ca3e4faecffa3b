//! Error types for kontig.
//!
//! This module provides exhaustive, strongly-typed errors for all operations
//! in the library, enabling precise error handling and informative messages.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in kontig operations.
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// K-mer length is zero.
    #[error("invalid k-mer length {k}: must be at least {min}")]
    InvalidKmerLength { k: usize, min: usize },

    /// A read is shorter than the k-mer length, so its window count would be negative.
    #[error("read {index} has length {len}, shorter than the k-mer length {k}")]
    ReadTooShort { index: usize, len: usize, k: usize },

    /// A k-mer that the graph should hold was not found.
    #[error("graph is inconsistent: k-mer '{kmer}' is referenced but not present")]
    MissingNode { kmer: String },

    /// Mode string was not recognised.
    #[error(transparent)]
    UnknownMode(#[from] ModeError),

    /// Failed to read the input file.
    #[error("failed to read input '{path}': {source}")]
    SequenceRead {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Failed to parse a sequence record.
    #[error("failed to parse sequence record: {details}")]
    SequenceParse { details: String },

    /// Failed to create or write an output file.
    #[error("failed to write output file '{path}': {source}")]
    OutputWrite {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Failed to write output.
    #[error("failed to write output: {source}")]
    WriteError {
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize JSON output.
    #[error("failed to serialize JSON: {source}")]
    JsonError {
        #[source]
        source: serde_json::Error,
    },
}

/// Broad category of an [`AssemblyError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad `k`, or a read that cannot hold a single k-mer.
    Config,
    /// The graph broke one of its own invariants.
    GraphConsistency,
    /// Unrecognised run mode.
    Mode,
    /// Reading input or writing output failed.
    Io,
}

impl AssemblyError {
    /// Returns the category this error belongs to.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidKmerLength { .. } | Self::ReadTooShort { .. } => ErrorKind::Config,
            Self::MissingNode { .. } => ErrorKind::GraphConsistency,
            Self::UnknownMode(_) => ErrorKind::Mode,
            Self::SequenceRead { .. }
            | Self::SequenceParse { .. }
            | Self::OutputWrite { .. }
            | Self::WriteError { .. }
            | Self::JsonError { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn missing_node(kmer: &[u8]) -> Self {
        Self::MissingNode {
            kmer: String::from_utf8_lossy(kmer).into_owned(),
        }
    }
}

/// Error for invalid k-mer length.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("k-mer length {k} is out of range: must be at least {min}")]
pub struct KmerLengthError {
    /// The invalid k value that was provided.
    pub k: usize,
    /// Minimum valid k-mer length.
    pub min: usize,
}

/// Error for an unrecognised run mode.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("mode '{value}' is not supported: expected 'filter' (or 'g') or 'contigs' (or 'c')")]
pub struct ModeError {
    /// The mode string that was provided.
    pub value: String,
}

impl From<std::io::Error> for AssemblyError {
    fn from(source: std::io::Error) -> Self {
        AssemblyError::WriteError { source }
    }
}

impl From<serde_json::Error> for AssemblyError {
    fn from(source: serde_json::Error) -> Self {
        AssemblyError::JsonError { source }
    }
}

impl From<KmerLengthError> for AssemblyError {
    fn from(err: KmerLengthError) -> Self {
        AssemblyError::InvalidKmerLength {
            k: err.k,
            min: err.min,
        }
    }
}

/// Errors that can occur when using the builder API.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// K-mer length was not set before running.
    #[error("k-mer length not set; call .k() first")]
    KmerLengthNotSet,

    /// Invalid k-mer length provided.
    #[error(transparent)]
    KmerLength(#[from] KmerLengthError),

    /// Error building, pruning, walking or writing.
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}
