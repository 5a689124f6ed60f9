//! ZIP archiving of pack folders.
//!
//! The [`Archiver`] turns an [`ArchiveRequest`] into a deflate-compressed ZIP
//! whose entry names are forward-slash paths relative to the source folder.
//! Empty directories are kept as explicit `name/` entries, and the archive
//! never contains itself.
//!
//! # Sub-modules
//!
//! - [`paths`] - Lexical path resolution and entry naming.
//! - [`writer`] - The depth-first tree walk that feeds the ZIP writer.

pub mod paths;
pub mod writer;

pub use writer::ArchiveSummary;

use crate::error::{PackError, Result};
use log::debug;
use std::borrow::Cow;
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use writer::TreeWriter;

/// Directory name used for the default packs root.
pub const PACKS_DIR_NAME: &str = "packs";

/// Extension given to default archive names.
const ARCHIVE_EXTENSION: &str = "zip";

/// Stem used when the source folder has no final component, e.g. `/`.
const FALLBACK_STEM: &str = "pack";

/// One request to archive a folder.
///
/// # Examples
///
/// ```
/// use packy_packer::archive::ArchiveRequest;
/// use std::path::Path;
///
/// let request = ArchiveRequest::new("packs/src/my_pack").with_destination("   ");
/// assert_eq!(request.destination(), None);
///
/// let request = ArchiveRequest::new("my_pack").with_destination("out/my_pack.zip");
/// assert_eq!(request.destination(), Some(Path::new("out/my_pack.zip")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRequest {
    /// Folder whose contents are archived.
    pub source_directory: PathBuf,
    /// Where to write the archive; blank or unset means the packs root.
    pub destination_path: Option<PathBuf>,
}

impl ArchiveRequest {
    /// Request an archive of `source_directory` at the default destination.
    #[must_use]
    pub fn new(source_directory: impl Into<PathBuf>) -> Self {
        Self {
            source_directory: source_directory.into(),
            destination_path: None,
        }
    }

    /// Set an explicit destination.
    #[must_use]
    pub fn with_destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination_path = Some(destination.into());
        self
    }

    /// Return the explicit destination, treating a blank path as unset.
    #[must_use]
    pub fn destination(&self) -> Option<&Path> {
        self.destination_path
            .as_deref()
            .filter(|path| !path.as_os_str().to_string_lossy().trim().is_empty())
    }
}

/// Creates pack archives, writing to `packs_root` by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archiver {
    packs_root: PathBuf,
}

impl Archiver {
    /// Create an archiver whose default destination root is `packs_root`.
    #[must_use]
    pub fn new(packs_root: impl Into<PathBuf>) -> Self {
        Self {
            packs_root: packs_root.into(),
        }
    }

    /// Create an archiver rooted at `packs/` next to the running program.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::Io`] if the executable path cannot be resolved.
    pub fn beside_executable() -> Result<Self> {
        let exe = std::env::current_exe().map_err(PackError::io("resolve executable path"))?;
        let dir = exe.parent().map_or_else(PathBuf::new, Path::to_path_buf);
        Ok(Self::new(dir.join(PACKS_DIR_NAME)))
    }

    /// Return the default destination root.
    #[must_use]
    pub fn packs_root(&self) -> &Path {
        &self.packs_root
    }

    /// Archive the requested folder and return the absolute archive path.
    ///
    /// An existing file at the destination is overwritten.
    ///
    /// # Errors
    ///
    /// - [`PackError::FolderNotFound`] / [`PackError::NotADirectory`] when
    ///   the source is missing or not a folder.
    /// - [`PackError::InvalidDestination`] when the destination lies inside
    ///   the source folder; nothing is written in that case.
    /// - [`PackError::Io`] / [`PackError::Archive`] for filesystem and ZIP
    ///   failures, labelled with the failing stage.
    pub fn archive(&self, request: &ArchiveRequest) -> Result<PathBuf> {
        ensure_directory(&request.source_directory)?;
        let folder = paths::absolute(&request.source_directory)
            .map_err(PackError::io("resolve folder path"))?;
        let destination = match request.destination() {
            Some(path) => path.to_path_buf(),
            None => self.default_destination(&folder)?,
        };
        let destination =
            paths::absolute(&destination).map_err(PackError::io("resolve output path"))?;
        if paths::is_strictly_inside(&destination, &folder) {
            return Err(PackError::InvalidDestination {
                destination,
                folder,
            });
        }

        debug!(
            "archiving {} into {}",
            folder.display(),
            destination.display()
        );
        let file = File::create(&destination).map_err(PackError::io("create zip"))?;
        let summary = TreeWriter::new(file, &folder, &destination).write_all()?;
        debug!(
            "wrote {} file(s) and {} directory entries to {}",
            summary.files,
            summary.directories,
            destination.display()
        );
        Ok(destination)
    }

    /// `<packs_root>/<folder name>.zip`, creating the packs root if needed.
    fn default_destination(&self, folder: &Path) -> Result<PathBuf> {
        fs::create_dir_all(&self.packs_root).map_err(PackError::io("create packs folder"))?;
        let stem = folder
            .file_name()
            .map_or(Cow::Borrowed(FALLBACK_STEM), |name| name.to_string_lossy());
        Ok(self
            .packs_root
            .join(format!("{stem}.{ARCHIVE_EXTENSION}")))
    }
}

fn ensure_directory(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(PackError::NotADirectory {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(PackError::FolderNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(PackError::io("folder path error")(e)),
    }
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;
