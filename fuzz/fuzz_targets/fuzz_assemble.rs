//! Fuzz target for the contig pipeline.
//!
//! The first byte picks `k`; the rest is split on newlines into reads. Any
//! input must either assemble or fail with a configuration error, never panic
//! or report an inconsistent graph.

#![no_main]

use bytes::Bytes;
use kontig::{
    assemble_contigs,
    error::ErrorKind,
    kmer::{KmerLength, Windowing},
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&first, rest)) = data.split_first() else {
        return;
    };
    let k = KmerLength::new(usize::from(first % 8) + 1).unwrap();
    let windowing = if first & 0x80 == 0 {
        Windowing::ExcludeFinal
    } else {
        Windowing::Full
    };
    let reads: Vec<Bytes> = rest
        .split(|&b| b == b'\n')
        .filter(|line| !line.is_empty())
        .map(Bytes::copy_from_slice)
        .collect();

    match assemble_contigs(&reads, k, 0, windowing) {
        Ok(assembly) => {
            assert_eq!(assembly.contigs.len(), assembly.lengths.len());
            for contig in &assembly.contigs {
                // Every contig is one k-mer plus one base per step.
                assert_eq!(contig.len(), k.get() + contig.extensions());
            }
        }
        Err(err) => {
            assert_eq!(err.kind(), ErrorKind::Config, "unexpected error: {err}");
        }
    }
});
