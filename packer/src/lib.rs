//! Resource pack validation and archiving.
//!
//! This crate holds the two operations the Packy shell drives: checking that
//! a folder carries a well-formed `manifest.json`, and zipping the folder into
//! a portable archive.
//!
//! # Modules
//!
//! - [`manifest`] - Descriptor decoding and schema validation
//! - [`archive`] - Deterministic ZIP creation with path-safety checks
//! - [`error`] - The shared error type and result alias

pub mod archive;
pub mod error;
pub mod manifest;

pub use archive::{ArchiveRequest, Archiver};
pub use error::{PackError, Result};
pub use manifest::{Manifest, ManifestIssues, validate_folder};
