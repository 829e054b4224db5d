//! Error types for Classpatch
//!
//! `Display`/`Error` are implemented by hand (not via `thiserror`) because
//! `NoMatchingArtifact`'s field is named `source` but is a source *file*,
//! not an error cause; the derive would force it to implement
//! `std::error::Error`. The binary wraps these in `anyhow`.

/// Result type alias for Classpatch operations
pub type PatchResult<T> = Result<T, PatchError>;

/// Main error type for Classpatch operations
#[derive(Debug)]
pub enum PatchError {
    /// Destination specifier resolved to an empty path
    MissingPath,

    /// Destination specifier had a colon but no usable host
    MissingHost,

    /// An accepted source file has no compiled artifact in the source jar
    NoMatchingArtifact { source: String },

    /// Overlay delivery or remote execution failed
    TransportFailed { detail: String },

    /// A step of the destination-side merge chain failed
    MergeFailed {
        step: &'static str,
        detail: String,
    },

    /// IO error
    Io(std::io::Error),

    /// Jar read/write error
    Archive(zip::result::ZipError),
}

impl std::fmt::Display for PatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatchError::MissingPath => {
                write!(f, "destination has no path - expected PATH or [USER@]HOST:PATH")
            }
            PatchError::MissingHost => {
                write!(f, "destination has no host before ':' - expected [USER@]HOST:PATH")
            }
            PatchError::NoMatchingArtifact { source } => {
                write!(f, "no compiled artifact found for '{source}' in the source jar")
            }
            PatchError::TransportFailed { detail } => {
                write!(f, "transport failed: {detail}")
            }
            PatchError::MergeFailed { step, detail } => {
                write!(f, "merge failed at {step}: {detail}")
            }
            PatchError::Io(err) => write!(f, "IO error: {err}"),
            PatchError::Archive(err) => write!(f, "archive error: {err}"),
        }
    }
}

impl std::error::Error for PatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PatchError::Io(err) => Some(err),
            PatchError::Archive(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PatchError {
    fn from(err: std::io::Error) -> Self {
        PatchError::Io(err)
    }
}

impl From<zip::result::ZipError> for PatchError {
    fn from(err: zip::result::ZipError) -> Self {
        PatchError::Archive(err)
    }
}

impl PatchError {
    /// True for errors caused by malformed user input, which should be
    /// reported alongside a usage hint.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, PatchError::MissingPath | PatchError::MissingHost)
    }
}
