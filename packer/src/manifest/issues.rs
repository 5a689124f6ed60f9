//! Accumulator for schema violations.

use crate::error::{PackError, Result};
use std::fmt;

/// Delimiter placed between issues in the aggregated message.
pub const ISSUE_SEPARATOR: &str = "; ";

/// An ordered list of human-readable manifest violations.
///
/// Validation pushes every problem it finds and only decides at the end
/// whether the manifest passed, so callers always see the complete set.
///
/// # Examples
///
/// ```
/// use packy_packer::manifest::ManifestIssues;
///
/// let mut issues = ManifestIssues::default();
/// issues.push("header.name is required");
/// issues.push("modules must include at least one entry");
/// assert_eq!(
///     issues.to_string(),
///     "header.name is required; modules must include at least one entry"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestIssues(Vec<String>);

impl ManifestIssues {
    /// Record one violation.
    pub fn push(&mut self, issue: impl Into<String>) {
        self.0.push(issue.into());
    }

    /// Return `true` when no violations were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the number of recorded violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return the violations in the order they were found.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Consume the accumulator and return the violations.
    #[must_use]
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }

    /// Succeed when empty, otherwise fail with a single aggregated
    /// [`PackError::Validation`].
    ///
    /// # Errors
    ///
    /// Returns [`PackError::Validation`] if any issue was recorded.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(PackError::Validation(self))
        }
    }
}

impl fmt::Display for ManifestIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(ISSUE_SEPARATOR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_issues_pass() {
        assert!(ManifestIssues::default().into_result().is_ok());
    }

    #[test]
    fn recorded_issues_fail_as_one_error() {
        let mut issues = ManifestIssues::default();
        issues.push("a");
        issues.push("b");
        let err = issues.into_result().expect_err("two issues recorded");
        assert_eq!(err.issues(), Some(["a".to_owned(), "b".to_owned()].as_slice()));
        assert_eq!(err.to_string(), "a; b");
    }
}
