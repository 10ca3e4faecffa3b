//! K-mer length and read windowing.
//!
//! A k-mer is a [`Bytes`] slice of a read, so k-mers taken from the same read
//! share its buffer instead of copying it.

use bytes::Bytes;

use crate::error::KmerLengthError;

/// Minimum valid k-mer length.
pub const MIN_K: usize = 1;

/// A validated k-mer length (`k >= 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KmerLength(usize);

impl KmerLength {
    /// Creates a new `KmerLength`.
    ///
    /// # Errors
    ///
    /// Returns [`KmerLengthError`] if `k` is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kontig::kmer::KmerLength;
    ///
    /// let k = KmerLength::new(21)?;
    /// assert_eq!(k.get(), 21);
    /// assert!(KmerLength::new(0).is_err());
    /// # Ok::<(), kontig::error::KmerLengthError>(())
    /// ```
    pub const fn new(k: usize) -> Result<Self, KmerLengthError> {
        if k < MIN_K {
            return Err(KmerLengthError { k, min: MIN_K });
        }
        Ok(Self(k))
    }

    /// Returns the length as a plain `usize`.
    pub const fn get(self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for KmerLength {
    type Error = KmerLengthError;

    fn try_from(k: usize) -> Result<Self, Self::Error> {
        Self::new(k)
    }
}

impl std::fmt::Display for KmerLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which k-mer windows of a read take part in graph construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Windowing {
    /// `len - k` windows: the last full window of every read is left out.
    #[default]
    ExcludeFinal,
    /// `len - k + 1` windows: every full window.
    Full,
}

impl Windowing {
    /// Number of windows this policy builds over for a read of length `len`.
    ///
    /// Returns `None` when `k > len`, where the count would be negative.
    pub const fn window_count(self, len: usize, k: KmerLength) -> Option<usize> {
        match len.checked_sub(k.get()) {
            Some(n) => match self {
                Self::ExcludeFinal => Some(n),
                Self::Full => Some(n + 1),
            },
            None => None,
        }
    }
}

/// Returns the k-mer starting at `start`, or `None` if it runs past the read.
pub fn window(read: &Bytes, start: usize, k: KmerLength) -> Option<Bytes> {
    let end = start.checked_add(k.get())?;
    (end <= read.len()).then(|| read.slice(start..end))
}

/// Iterates over every full k-mer window of `read`, `0..=len - k`.
pub fn full_windows(read: &Bytes, k: KmerLength) -> impl Iterator<Item = Bytes> + '_ {
    let count = Windowing::Full.window_count(read.len(), k).unwrap_or(0);
    (0..count).map(move |i| read.slice(i..i + k.get()))
}

/// Strips any trailing `\n` or `\r` from a read.
pub fn trim_line_terminator(read: &Bytes) -> Bytes {
    let end = read
        .iter()
        .rposition(|b| *b != b'\n' && *b != b'\r')
        .map_or(0, |i| i + 1);
    read.slice(..end)
}
