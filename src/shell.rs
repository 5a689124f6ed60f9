//! The actions behind the Packy front end.
//!
//! A front end collects a folder path and an optional output path as text,
//! then calls [`zip_pack`]. The lower-level [`validate_folder`] and
//! [`archive_folder`] are exposed for callers that drive the two steps
//! separately.

use log::info;
use packy_packer::archive::{ArchiveRequest, Archiver};
use packy_packer::{PackError, manifest};
use std::path::{Path, PathBuf};

/// Check that `folder` holds a valid `manifest.json`.
///
/// # Errors
///
/// Returns [`PackError::FolderPathRequired`] for a blank path, otherwise
/// whatever [`manifest::validate_folder`] reports.
pub fn validate_folder(folder: &Path) -> Result<(), PackError> {
    if is_blank(folder) {
        return Err(PackError::FolderPathRequired);
    }
    manifest::validate_folder(folder)
}

/// Archive `source` to `destination`, or to the archiver's packs root when
/// `destination` is `None` or blank.
///
/// # Errors
///
/// Returns [`PackError::FolderPathRequired`] for a blank source, otherwise
/// whatever [`Archiver::archive`] reports.
pub fn archive_folder(
    source: &Path,
    destination: Option<&Path>,
    archiver: &Archiver,
) -> Result<PathBuf, PackError> {
    if is_blank(source) {
        return Err(PackError::FolderPathRequired);
    }
    let mut request = ArchiveRequest::new(source);
    if let Some(path) = destination {
        request = request.with_destination(path);
    }
    archiver.archive(&request)
}

/// Validate `folder` and, if it passes, zip it.
///
/// Both inputs are trimmed first. On success returns the status line
/// `Saved zip: <path>`.
///
/// # Errors
///
/// Returns the first failing step's error; archiving is not attempted when
/// validation fails.
pub fn zip_pack(
    folder: &str,
    output: Option<&str>,
    archiver: &Archiver,
) -> Result<String, PackError> {
    let folder = folder.trim();
    if folder.is_empty() {
        return Err(PackError::FolderPathRequired);
    }
    let folder = Path::new(folder);
    validate_folder(folder)?;
    info!("{} passed validation", folder.display());

    let output = output.map(str::trim).filter(|path| !path.is_empty());
    let written = archive_folder(folder, output.map(Path::new), archiver)?;
    Ok(format!("Saved zip: {}", written.display()))
}

fn is_blank(path: &Path) -> bool {
    path.as_os_str().to_string_lossy().trim().is_empty()
}
