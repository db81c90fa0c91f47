//! Error types for packaging operations.
//!
//! Provides contextual error chaining, filesystem errors tagged with the path
//! that caused them, and dedicated variants for the resource editor
//! subprocess.
//!
//! # Features
//!
//! - **Context trait**: Add context to errors similar to anyhow
//! - **ErrorExt trait**: Filesystem operations with automatic path context
//! - **bail! macro**: Early return with formatted error messages
//!
//! # Example
//!
//! ```no_run
//! use jini::packager::{Error, ErrorExt, Result};
//! use std::path::Path;
//!
//! fn read_descriptor(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).fs_context("reading descriptor", path)
//! }
//! ```

use std::{
    fmt::Display,
    io,
    path::{self, PathBuf},
    time::Duration,
};
use thiserror::Error as DeriveError;

/// Errors returned by the packaging pipeline.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with context. Created by the [`Context`] trait.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// File system error with path context.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {path}: {error}")]
    Fs {
        /// Context describing the operation (e.g., "copying launcher")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// The external process could not be started or waited on.
    #[error("failed to run command {command}: {error}")]
    CommandFailed {
        /// Rendered command line
        command: String,
        /// The underlying error
        error: io::Error,
    },

    /// The external process did not exit within the allowed time.
    #[error("command {command} did not finish within {}s and was killed", .timeout.as_secs())]
    CommandTimedOut {
        /// Rendered command line
        command: String,
        /// Wait limit that expired
        timeout: Duration,
    },

    /// The resource editor exited with a non-zero status.
    ///
    /// Carries the editor's captured standard error verbatim so its own
    /// diagnostic is what the user sees.
    #[error("{0}")]
    ResourceEditorFailed(String),

    /// A bundled binary resource is not available from the provider.
    #[error("resource {name} not found in {location}")]
    ResourceNotFound {
        /// Resource name (e.g. "jini.exe")
        name: String,
        /// Where the provider looked
        location: String,
    },

    /// Two distinct artifacts would be staged under the same file name.
    #[error(
        "artifacts {} and {} share the file name {name}; only one can be placed in the library directory",
        .first.display(),
        .second.display()
    )]
    ArtifactNameCollision {
        /// Colliding base name
        name: String,
        /// Artifact seen first
        first: PathBuf,
        /// Artifact seen second
        second: PathBuf,
    },

    /// The packaging request violates an invariant.
    #[error("invalid packaging request: {0}")]
    InvalidRequest(String),

    /// Configured icon file does not exist.
    #[error("icon file {0} does not exist")]
    IconNotFound(PathBuf),

    /// Generic I/O error.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Error walking a directory artifact.
    #[error("{0}")]
    WalkdirError(#[from] walkdir::Error),

    /// Path prefix stripping error.
    #[error("{0}")]
    StripError(#[from] path::StripPrefixError),

    /// JSON serialization error.
    #[error("{0}")]
    JsonError(#[from] serde_json::error::Error),

    /// Invalid glob pattern.
    #[error("{0}")]
    GlobPattern(#[from] glob::PatternError),

    /// Glob execution error.
    #[error("{0}")]
    Glob(#[from] glob::GlobError),

    /// Generic error with custom message.
    #[error("{0}")]
    GenericError(String),
}

/// Convenient type alias for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for adding context to errors.
///
/// Similar to `anyhow::Context` but integrated with the packager's Error type.
pub trait Context<T> {
    /// Wraps an error with the message `f` produces.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

/// Extension trait for filesystem operations with automatic path context.
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// The `context` should be a present-tense verb phrase describing the operation,
    /// e.g., "reading file", "creating directory", "copying launcher".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

/// Macro for early return with error.
///
/// Converts the message into a [`Error::GenericError`] and returns immediately.
///
/// # Examples
///
/// ```ignore
/// bail!("operation failed");
/// bail!("invalid value: {}", value);
/// ```
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::packager::Error::GenericError($msg.into()))
    };
    ($err:expr $(,)?) => {
        return Err($crate::packager::Error::GenericError($err.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::packager::Error::GenericError(format!($fmt, $($arg)*)))
    };
}
