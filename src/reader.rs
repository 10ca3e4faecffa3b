//! Loading reads into memory.
//!
//! Every read becomes one [`Bytes`] buffer; k-mers sliced from it later share
//! that buffer.

use std::io::BufRead;

use bio::io::{fasta, fastq};
use bytes::Bytes;
use tracing::{debug, info};

use crate::{error::AssemblyError, format::ReadFormat, input::Input};

/// Reads every sequence from `input`.
///
/// # Errors
///
/// Returns [`AssemblyError::SequenceRead`] if the input cannot be opened and
/// [`AssemblyError::SequenceParse`] if a record is malformed.
pub fn read_sequences(input: &Input, format: ReadFormat) -> Result<Vec<Bytes>, AssemblyError> {
    let format = format.resolve(input.as_path());
    debug!(%input, %format, "reading sequences");

    let reader = input.open()?;
    let reads = match format {
        ReadFormat::Fasta => read_fasta(reader)?,
        ReadFormat::Fastq => read_fastq(reader)?,
        ReadFormat::Lines | ReadFormat::Auto => read_lines(reader)?,
    };

    info!(%input, reads = reads.len(), "sequences loaded");
    Ok(reads)
}

/// One read per line. Line terminators are stripped and blank lines skipped.
///
/// # Errors
///
/// Returns [`AssemblyError::SequenceParse`] on an I/O error mid-stream.
pub fn read_lines<R: BufRead>(mut reader: R) -> Result<Vec<Bytes>, AssemblyError> {
    let mut reads = Vec::new();
    let mut line = Vec::new();
    loop {
        line.clear();
        let n = reader
            .read_until(b'\n', &mut line)
            .map_err(|e| AssemblyError::SequenceParse {
                details: e.to_string(),
            })?;
        if n == 0 {
            break;
        }
        while matches!(line.last(), Some(b'\n' | b'\r')) {
            line.pop();
        }
        if !line.is_empty() {
            reads.push(Bytes::copy_from_slice(&line));
        }
    }
    Ok(reads)
}

/// # Errors
///
/// Returns [`AssemblyError::SequenceParse`] if a record is malformed.
pub fn read_fasta<R: BufRead>(reader: R) -> Result<Vec<Bytes>, AssemblyError> {
    fasta::Reader::from_bufread(reader)
        .records()
        .map(|record| {
            record
                .map(|r| Bytes::copy_from_slice(r.seq()))
                .map_err(|e| AssemblyError::SequenceParse {
                    details: e.to_string(),
                })
        })
        .collect()
}

/// # Errors
///
/// Returns [`AssemblyError::SequenceParse`] if a record is malformed.
pub fn read_fastq<R: BufRead>(reader: R) -> Result<Vec<Bytes>, AssemblyError> {
    fastq::Reader::from_bufread(reader)
        .records()
        .map(|record| {
            record
                .map(|r| Bytes::copy_from_slice(r.seq()))
                .map_err(|e| AssemblyError::SequenceParse {
                    details: e.to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    #[test]
    fn lines_strip_terminators_and_blanks() {
        let reads = read_lines(Cursor::new(b"ACGT\r\n\nGGCC\nTTA".to_vec())).unwrap();
        assert_eq!(
            reads,
            vec![
                Bytes::from_static(b"ACGT"),
                Bytes::from_static(b"GGCC"),
                Bytes::from_static(b"TTA"),
            ]
        );
    }

    #[test]
    fn fasta_records() {
        let reads = read_fasta(Cursor::new(b">a\nACGT\nAC\n>b\nGG\n".to_vec())).unwrap();
        assert_eq!(
            reads,
            vec![Bytes::from_static(b"ACGTAC"), Bytes::from_static(b"GG")]
        );
    }

    #[test]
    fn fastq_records() {
        let reads = read_fastq(Cursor::new(b"@r1\nACGT\n+\nIIII\n".to_vec())).unwrap();
        assert_eq!(reads, vec![Bytes::from_static(b"ACGT")]);
    }

    #[test]
    fn malformed_fasta_is_a_parse_error() {
        let err = read_fasta(Cursor::new(b"ACGT\n".to_vec())).unwrap_err();
        assert!(matches!(err, AssemblyError::SequenceParse { .. }));
    }

    #[test]
    fn detects_format_from_extension() {
        let mut file = NamedTempFile::with_suffix(".fa").unwrap();
        write!(file, ">r\nACGT\n").unwrap();
        file.flush().unwrap();

        let input = Input::File(file.path().to_path_buf());
        let reads = read_sequences(&input, ReadFormat::Auto).unwrap();
        assert_eq!(reads, vec![Bytes::from_static(b"ACGT")]);

        let as_lines = read_sequences(&input, ReadFormat::Lines).unwrap();
        assert_eq!(
            as_lines,
            vec![Bytes::from_static(b">r"), Bytes::from_static(b"ACGT")]
        );
    }
}
