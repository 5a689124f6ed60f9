//! Schema rules for a decoded [`Manifest`].
//!
//! Rules run in a fixed order (format version, header, modules) and every
//! failure is recorded, so the resulting message lists all problems.

use super::format_version::is_supported_format_version;
use super::issues::ManifestIssues;
use super::uuid::is_canonical_uuid;
use super::{Manifest, ManifestHeader, ManifestModule};
use crate::error::Result;

/// Number of components in a version triplet.
const VERSION_LEN: usize = 3;

/// Return `true` for exactly three non-negative integers.
#[must_use]
pub fn is_version_triplet(version: &[i64]) -> bool {
    version.len() == VERSION_LEN && version.iter().all(|part| *part >= 0)
}

/// Collect every schema violation in `manifest`.
///
/// # Examples
///
/// ```
/// use packy_packer::manifest::{Manifest, check_manifest};
///
/// let issues = check_manifest(&Manifest::default());
/// assert_eq!(
///     issues.as_slice().first().map(String::as_str),
///     Some("format_version must be 1 or 2")
/// );
/// ```
#[must_use]
pub fn check_manifest(manifest: &Manifest) -> ManifestIssues {
    let mut issues = ManifestIssues::default();
    if !is_supported_format_version(manifest.format_version.as_ref()) {
        issues.push("format_version must be 1 or 2");
    }
    check_header(&manifest.header, &mut issues);
    check_modules(&manifest.modules, &mut issues);
    issues
}

/// Validate `manifest`, failing with every violation at once.
///
/// # Errors
///
/// Returns [`crate::PackError::Validation`] if any rule is violated.
pub fn validate_manifest(manifest: &Manifest) -> Result<()> {
    check_manifest(manifest).into_result()
}

fn check_header(header: &ManifestHeader, issues: &mut ManifestIssues) {
    if header.name.trim().is_empty() {
        issues.push("header.name is required");
    }
    if !is_canonical_uuid(&header.uuid) {
        issues.push("header.uuid must be a valid UUID");
    }
    if !is_version_triplet(&header.version) {
        issues.push("header.version must be 3 integers");
    }
    if !header.min_engine_version.is_empty() && !is_version_triplet(&header.min_engine_version)
    {
        issues.push("header.min_engine_version must be 3 integers");
    }
}

fn check_modules(modules: &[ManifestModule], issues: &mut ManifestIssues) {
    if modules.is_empty() {
        issues.push("modules must include at least one entry");
        return;
    }
    for (index, module) in modules.iter().enumerate() {
        if module.kind.trim().is_empty() {
            issues.push(format!("modules[{index}].type is required"));
        }
        if !is_canonical_uuid(&module.uuid) {
            issues.push(format!("modules[{index}].uuid must be a valid UUID"));
        }
        if !is_version_triplet(&module.version) {
            issues.push(format!("modules[{index}].version must be 3 integers"));
        }
    }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
