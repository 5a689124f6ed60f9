//! Error types for pack validation and archiving.
//!
//! Each variant's message is the text the shell shows to the user verbatim,
//! so the wording is part of the contract.

use crate::manifest::ManifestIssues;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while validating or archiving a pack folder.
#[derive(Debug, Error)]
pub enum PackError {
    /// The caller supplied a blank folder path.
    #[error("folder path is required")]
    FolderPathRequired,

    /// No `manifest.json` exists in the candidate folder.
    #[error("manifest.json not found in folder")]
    ManifestNotFound {
        /// Path where the descriptor was expected.
        path: PathBuf,
    },

    /// The descriptor is not valid JSON for the manifest shape.
    #[error("manifest.json is not valid JSON: {source}")]
    ManifestParse {
        /// The underlying decode failure.
        #[source]
        source: serde_json::Error,
    },

    /// The descriptor decoded but violates the schema.
    #[error("{0}")]
    Validation(ManifestIssues),

    /// The source folder does not exist.
    #[error("folder path error: {} does not exist", path.display())]
    FolderNotFound {
        /// The missing folder.
        path: PathBuf,
    },

    /// The source path exists but is not a directory.
    #[error("folder path is not a directory")]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// The destination archive would be written inside the source folder.
    #[error("output zip cannot be inside the source folder")]
    InvalidDestination {
        /// The resolved destination path.
        destination: PathBuf,
        /// The resolved source folder.
        folder: PathBuf,
    },

    /// A filesystem operation failed; `stage` names the step.
    #[error("{stage}: {source}")]
    Io {
        /// The step that failed, e.g. `create zip`.
        stage: &'static str,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing an archive entry or finalising the archive failed.
    #[error("zip folder: {source}")]
    Archive {
        /// The underlying archive writer error.
        #[source]
        source: zip::result::ZipError,
    },
}

impl PackError {
    /// Wrap an I/O error with the name of the step that produced it.
    pub(crate) fn io(stage: &'static str) -> impl FnOnce(std::io::Error) -> Self {
        move |source| Self::Io { stage, source }
    }

    /// Return the collected issues when this is a validation failure.
    #[must_use]
    pub fn issues(&self) -> Option<&[String]> {
        match self {
            Self::Validation(issues) => Some(issues.as_slice()),
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for PackError {
    fn from(source: zip::result::ZipError) -> Self {
        Self::Archive { source }
    }
}

/// Result type alias using [`PackError`].
pub type Result<T> = std::result::Result<T, PackError>;
