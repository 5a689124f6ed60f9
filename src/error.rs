//! Error types for the Packy shell.

use packy_packer::PackError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the shell on top of [`PackError`].
#[derive(Debug, Error)]
pub enum ShellError {
    /// Validation or archiving failed; the message is shown verbatim.
    #[error(transparent)]
    Pack(#[from] PackError),

    /// An explicitly requested configuration file does not exist.
    #[error("config file {} not found", path.display())]
    ConfigNotFound {
        /// The requested path.
        path: PathBuf,
    },

    /// The configuration file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        /// The configuration file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::Config`].
    #[error("invalid config file {}: {source}", path.display())]
    ConfigParse {
        /// The configuration file path.
        path: PathBuf,
        /// The TOML decode failure.
        #[source]
        source: Box<toml::de::Error>,
    },

    /// Failed to write output.
    #[error("failed to write output")]
    WriteFailed {
        /// The underlying error that caused the write to fail.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`ShellError`].
pub type Result<T> = std::result::Result<T, ShellError>;
