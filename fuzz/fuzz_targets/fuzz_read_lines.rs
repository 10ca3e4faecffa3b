//! Fuzz target for line-oriented read input.
//!
//! Reads never keep a line terminator and blank lines are never reads.

#![no_main]

use kontig::reader::read_lines;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let reads = read_lines(data).unwrap();
    for read in reads {
        assert!(!read.is_empty());
        assert!(!read.contains(&b'\n'));
        assert!(!matches!(read.last(), Some(b'\r')));
    }
});
