//! Where reads come from: a file, or stdin when the path is `-`.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use crate::error::AssemblyError;

/// Input source for reads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Input {
    /// Read from a file at the specified path.
    File(PathBuf),
    /// Read from standard input.
    #[default]
    Stdin,
}

impl Input {
    /// `-` means stdin, anything else is a file path.
    ///
    /// ```rust
    /// use kontig::input::Input;
    /// use std::path::Path;
    ///
    /// assert!(Input::from_path(Path::new("-")).is_stdin());
    /// assert_eq!(Input::from_path(Path::new("reads.txt")).as_path(), Some(Path::new("reads.txt")));
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            Self::Stdin
        } else {
            Self::File(path.to_path_buf())
        }
    }

    #[must_use]
    pub const fn is_stdin(&self) -> bool {
        matches!(self, Self::Stdin)
    }

    /// The file path, if this is a file input.
    #[must_use]
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Stdin => None,
        }
    }

    /// Opens the source for buffered reading.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::SequenceRead`] if the file cannot be opened.
    pub fn open(&self) -> Result<Box<dyn BufRead>, AssemblyError> {
        match self {
            Self::File(path) => {
                let file = File::open(path).map_err(|source| AssemblyError::SequenceRead {
                    source,
                    path: path.clone(),
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
            Self::Stdin => Ok(Box::new(io::stdin().lock())),
        }
    }
}

impl std::fmt::Display for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdin => write!(f, "<stdin>"),
        }
    }
}
