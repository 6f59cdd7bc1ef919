use std::fmt;
use std::path::PathBuf;

/// Errors from the data boundary: loading enemy, skill, and item
/// definitions from disk.
///
/// Everything inside a running battle fails softly (an `ActionResult` with
/// `success = false`, or a fallback transition); only the loaders can hit
/// hard errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// The data directory does not exist.
    DirectoryNotFound(PathBuf),
    /// Reading a file or directory entry failed.
    Io(String),
    /// A definition file did not parse.
    Parse { file: PathBuf, message: String },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::DirectoryNotFound(path) => {
                write!(f, "Data directory not found: {}", path.display())
            }
            DataError::Io(details) => write!(f, "I/O error while loading data: {}", details),
            DataError::Parse { file, message } => {
                write!(f, "Malformed data in {}: {}", file.display(), message)
            }
        }
    }
}

impl std::error::Error for DataError {}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        DataError::Io(err.to_string())
    }
}

/// Type alias for Results using DataError
pub type DataResult<T> = Result<T, DataError>;
