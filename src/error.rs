use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/** errors reported while generating an instance */
#[derive(Debug)]
pub enum Error {
    /// malformed or incomplete input text (graph description or fact file)
    Format(String),
    /// conflicting or invalid generation parameters
    Config(String),
    /// file that cannot be read or written
    Io {
        /// file concerned by the error
        path: PathBuf,
        /// underlying error
        source: io::Error,
    },
}

impl Error {
    /// builds a format error from a line number (starting at 1) and a message
    pub fn format_at(line:usize, msg:impl fmt::Display) -> Self {
        Error::Format(format!("line {}: {}", line, msg))
    }

    /// wraps an io error with the path it is about
    pub fn io(path:&Path, source:io::Error) -> Self {
        Error::Io { path: path.to_path_buf(), source }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Format(msg) => write!(f, "format error: {}", msg),
            Error::Config(msg) => write!(f, "config error: {}", msg),
            Error::Io { path, source } => write!(f, "io error on {}: {}", path.display(), source),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
