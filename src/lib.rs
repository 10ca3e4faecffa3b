//! # kontig
//!
//! Short-read assembly over a k-mer graph.
//!
//! Every read is cut into overlapping k-mers. Each distinct k-mer becomes a
//! node that counts how often it was seen, and consecutive k-mers of a read
//! are linked both ways. From that graph kontig does one of two things:
//!
//! - **filter**: keep the reads whose k-mers all occur more than once;
//! - **contigs**: drop every k-mer with more than one successor or
//!   predecessor, then walk the unambiguous chains that remain into contigs.
//!
//! ## Quick Start
//!
//! ```rust
//! use bytes::Bytes;
//! use kontig::{assemble_contigs, kmer::{KmerLength, Windowing}};
//!
//! let reads = vec![Bytes::from_static(b"AATGCA"), Bytes::from_static(b"ATGCAT")];
//! let assembly = assemble_contigs(&reads, KmerLength::new(3)?, 1, Windowing::default())?;
//!
//! assert_eq!(assembly.lengths, vec![6]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The [`builder::Assembler`] offers the same through a fluent interface, and
//! the `kontig` binary wraps [`run::run`] with a command line.

pub mod builder;
pub mod cli;
pub mod config;
pub mod construct;
pub mod error;
pub mod filter;
pub mod format;
pub mod graph;
pub mod input;
pub mod kmer;
pub mod prune;
pub mod reader;
pub mod run;
pub mod stats;
pub mod traverse;

pub use run::{assemble_contigs, filter_good_reads};
