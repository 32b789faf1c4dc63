//! Error types for bundle conversion.
//!
//! Every step of a conversion reports failures through [`Error`]. Errors are
//! never wrapped on the way out: the first failing step's error is what the
//! caller receives, so its [`ErrorKind`] identifies the step class directly.
//!
//! # Example
//!
//! ```no_run
//! use script_bundler::bundler::{ErrorKind, create_app, ConversionRequest};
//!
//! # fn example() -> script_bundler::bundler::Result<()> {
//! let request = ConversionRequest::builder()
//!     .script("run.sh")
//!     .destination("MyApp.app")
//!     .build()?;
//!
//! match create_app(&request) {
//!     Ok(()) => println!("done"),
//!     Err(e) if e.kind() == ErrorKind::Permission => eprintln!("chmod failed: {e}"),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

use std::{io, path::PathBuf};
use thiserror::Error as DeriveError;

/// Errors returned by the bundler.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// File system error with path context.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {path}: {error}")]
    Io {
        /// Operation that failed (e.g., "creating MacOS directory")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// Reading or changing a file's permission bits failed.
    #[error("setting executable permission on {path}: {error}")]
    Permission {
        /// File whose permissions were being changed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// The icon source could not be read or is not a supported image.
    #[error("decoding icon image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The icon container could not be produced or written.
    #[error("{context}: {error}")]
    ImageEncode {
        /// What was being encoded or written
        context: String,
        /// The underlying error
        error: io::Error,
    },

    /// A conversion request is missing a required field or is malformed.
    #[error("invalid conversion request: {0}")]
    Configuration(String),
}

/// Error classes, one per failure category a conversion can surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Directory creation, copy or write failure.
    Io,
    /// Permission bits could not be read or written.
    Permission,
    /// Icon image could not be decoded.
    ImageDecode,
    /// Icon container could not be encoded or written.
    ImageEncode,
    /// Request construction failed.
    Configuration,
}

impl Error {
    /// Returns the failure category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io { .. } => ErrorKind::Io,
            Error::Permission { .. } => ErrorKind::Permission,
            Error::ImageDecode(_) => ErrorKind::ImageDecode,
            Error::ImageEncode { .. } => ErrorKind::ImageEncode,
            Error::Configuration(_) => ErrorKind::Configuration,
        }
    }

    pub(crate) fn encode(context: impl Into<String>, error: io::Error) -> Self {
        Error::ImageEncode {
            context: context.into(),
            error,
        }
    }
}

/// Convenient type alias for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for filesystem operations with automatic path context.
///
/// ```no_run
/// # use std::path::Path;
/// # use script_bundler::bundler::{ErrorExt, Result};
/// fn create_contents_dir(path: &Path) -> Result<()> {
///     std::fs::create_dir_all(path).fs_context("creating Contents directory", path)?;
///     Ok(())
/// }
/// ```
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// The `context` should be a present-tense verb phrase describing the operation,
    /// e.g., "reading file", "creating directory", "copying script".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Io {
            context,
            path: path.into(),
            error,
        })
    }
}

/// Macro for early return with a configuration error.
///
/// ```ignore
/// bail!("script path is required");
/// bail!("{} has no file name", path.display());
/// ```
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::Error::Configuration(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::Error::Configuration(format!($fmt, $($arg)*)))
    };
}
