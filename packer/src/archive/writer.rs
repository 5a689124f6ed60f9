//! Depth-first folder walk feeding a ZIP writer.

use super::paths::entry_name;
use crate::error::{PackError, Result};
use chrono::{DateTime as UtcDateTime, Datelike, Timelike, Utc};
use log::trace;
use std::fs::{self, DirEntry, File, Metadata};
use std::io::{self, Seek, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Stage label for failures while walking or writing.
const STAGE: &str = "zip folder";

/// Entries at or above this size need ZIP64 extensions.
const LARGE_FILE_THRESHOLD: u64 = 0xFFFF_FFFF;

/// Counts of what was written to an archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// Number of file entries written.
    pub files: usize,
    /// Number of directory entries written.
    pub directories: usize,
}

/// Writes a folder tree into a ZIP stream, skipping the archive itself.
pub struct TreeWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    root: PathBuf,
    destination: PathBuf,
    destination_canonical: Option<PathBuf>,
    summary: ArchiveSummary,
}

impl<W: Write + Seek> TreeWriter<W> {
    /// Prepare to archive `root` into `sink`.
    ///
    /// `destination` is the absolute path `sink` writes to; entries that
    /// resolve to it are left out.
    pub fn new(sink: W, root: &Path, destination: &Path) -> Self {
        Self {
            zip: ZipWriter::new(sink),
            root: root.to_path_buf(),
            destination: destination.to_path_buf(),
            destination_canonical: fs::canonicalize(destination).ok(),
            summary: ArchiveSummary::default(),
        }
    }

    /// Walk the whole tree, finish the archive, and return the counts.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::Io`] (stage `zip folder`) for traversal and read
    /// failures, or [`PackError::Archive`] when the ZIP writer fails.
    pub fn write_all(mut self) -> Result<ArchiveSummary> {
        let root = self.root.clone();
        self.walk(&root)?;
        self.zip.finish()?;
        Ok(self.summary)
    }

    fn walk(&mut self, dir: &Path) -> Result<()> {
        for entry in sorted_entries(dir)? {
            let path = entry.path();
            if path == self.destination {
                trace!("skipping archive destination {}", path.display());
                continue;
            }
            let Some(name) = entry_name(&self.root, &path).map_err(PackError::io(STAGE))? else {
                continue;
            };
            let file_type = entry.file_type().map_err(PackError::io(STAGE))?;
            if file_type.is_dir() {
                self.add_directory(&path, &name)?;
                self.walk(&path)?;
                continue;
            }

            let metadata = fs::metadata(&path).map_err(PackError::io(STAGE))?;
            if metadata.is_dir() {
                trace!("not following directory symlink {}", path.display());
            } else if self.resolves_to_destination(&path) {
                trace!("skipping link to archive destination {}", path.display());
            } else {
                self.add_file(&path, &name, &metadata)?;
            }
        }
        Ok(())
    }

    fn resolves_to_destination(&self, path: &Path) -> bool {
        self.destination_canonical
            .as_ref()
            .is_some_and(|target| fs::canonicalize(path).is_ok_and(|resolved| &resolved == target))
    }

    fn add_directory(&mut self, path: &Path, name: &str) -> Result<()> {
        trace!("adding directory {name}/");
        let metadata = fs::metadata(path).map_err(PackError::io(STAGE))?;
        self.zip
            .add_directory(format!("{name}/"), entry_options(&metadata))?;
        self.summary.directories += 1;
        Ok(())
    }

    fn add_file(&mut self, path: &Path, name: &str, metadata: &Metadata) -> Result<()> {
        trace!("adding file {name} ({} bytes)", metadata.len());
        let options = entry_options(metadata)
            .compression_method(CompressionMethod::Deflated)
            .large_file(metadata.len() >= LARGE_FILE_THRESHOLD);
        self.zip.start_file(name, options)?;
        let mut source = File::open(path).map_err(PackError::io(STAGE))?;
        io::copy(&mut source, &mut self.zip).map_err(PackError::io(STAGE))?;
        self.summary.files += 1;
        Ok(())
    }
}

/// List a directory's children ordered by file name.
fn sorted_entries(dir: &Path) -> Result<Vec<DirEntry>> {
    let mut entries = fs::read_dir(dir)
        .and_then(|children| children.collect::<io::Result<Vec<_>>>())
        .map_err(PackError::io(STAGE))?;
    entries.sort_by_key(DirEntry::file_name);
    Ok(entries)
}

/// Options shared by file and directory entries.
fn entry_options(metadata: &Metadata) -> SimpleFileOptions {
    let options =
        SimpleFileOptions::default().last_modified_time(zip_timestamp(metadata.modified().ok()));
    with_permissions(options, metadata)
}

#[cfg(unix)]
fn with_permissions(options: SimpleFileOptions, metadata: &Metadata) -> SimpleFileOptions {
    use std::os::unix::fs::PermissionsExt;
    options.unix_permissions(metadata.permissions().mode())
}

#[cfg(not(unix))]
fn with_permissions(options: SimpleFileOptions, _metadata: &Metadata) -> SimpleFileOptions {
    options
}

/// Convert a modification time to a ZIP timestamp in UTC.
///
/// ZIP timestamps cannot express dates before 1980 or after 2107; those, and
/// unknown times, fall back to the ZIP epoch.
pub fn zip_timestamp(modified: Option<SystemTime>) -> DateTime {
    modified
        .and_then(|time| {
            let utc: UtcDateTime<Utc> = time.into();
            DateTime::from_date_and_time(
                u16::try_from(utc.year()).ok()?,
                u8::try_from(utc.month()).ok()?,
                u8::try_from(utc.day()).ok()?,
                u8::try_from(utc.hour()).ok()?,
                u8::try_from(utc.minute()).ok()?,
                u8::try_from(utc.second()).ok()?,
            )
            .ok()
        })
        .unwrap_or_default()
}
