//! Lexical path resolution for archive requests.
//!
//! Paths are made absolute against the current directory and cleaned
//! component by component. Symlinks are not resolved.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Join `path` to the current directory if relative, then normalise it.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn absolute(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(normalize(path));
    }
    Ok(normalize(&std::env::current_dir()?.join(path)))
}

/// Drop `.` components and fold `..` into the preceding component.
///
/// `..` at the root stays at the root.
///
/// # Examples
///
/// ```
/// use packy_packer::archive::paths::normalize;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(normalize(Path::new("/tmp/./pack/../out.zip")), PathBuf::from("/tmp/out.zip"));
/// assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
/// ```
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                normalized.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
        }
    }
    normalized
}

/// Return `true` when `path` lies strictly below `folder`.
///
/// Both paths must already be absolute and normalised. The folder itself
/// does not count as being inside itself.
#[must_use]
pub fn is_strictly_inside(path: &Path, folder: &Path) -> bool {
    path != folder && path.starts_with(folder)
}

/// Build the archive entry name for `path` below `root`.
///
/// Components are joined with `/` whatever the host separator. Returns
/// `Ok(None)` for the root itself or a path outside it.
///
/// # Errors
///
/// Returns an [`io::ErrorKind::InvalidData`] error when a component is not
/// valid UTF-8, since ZIP entry names are stored as text.
pub fn entry_name(root: &Path, path: &Path) -> io::Result<Option<String>> {
    let Ok(relative) = path.strip_prefix(root) else {
        return Ok(None);
    };
    let parts = relative
        .components()
        .map(|component| {
            component.as_os_str().to_str().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("file name is not valid UTF-8: {}", path.display()),
                )
            })
        })
        .collect::<io::Result<Vec<_>>>()?;
    if parts.is_empty() {
        return Ok(None);
    }
    Ok(Some(parts.join("/")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/tmp/pack", "/tmp/pack")]
    #[case("/tmp/pack/", "/tmp/pack")]
    #[case("/tmp/./pack", "/tmp/pack")]
    #[case("/tmp/pack/sub/..", "/tmp/pack")]
    #[case("/tmp/pack/../../..", "/")]
    fn normalizes_lexically(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(Path::new(input)), PathBuf::from(expected));
    }

    #[test]
    fn relative_paths_are_joined_to_the_current_directory() {
        let cwd = std::env::current_dir().expect("current dir");
        let resolved = absolute(Path::new("pack/./out.zip")).expect("resolve");
        assert_eq!(resolved, normalize(&cwd.join("pack").join("out.zip")));
        assert!(resolved.is_absolute());
    }

    #[rstest]
    #[case("/tmp/pack/out.zip", "/tmp/pack", true)]
    #[case("/tmp/pack/sub/out.zip", "/tmp/pack", true)]
    #[case("/tmp/pack", "/tmp/pack", false)]
    #[case("/tmp/pack.zip", "/tmp/pack", false)]
    #[case("/tmp/packs/out.zip", "/tmp/pack", false)]
    #[case("/tmp/out.zip", "/tmp/pack", false)]
    fn detects_paths_inside_a_folder(
        #[case] path: &str,
        #[case] folder: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(
            is_strictly_inside(Path::new(path), Path::new(folder)),
            expected
        );
    }

    #[test]
    fn entry_names_use_forward_slashes() {
        let root = PathBuf::from("/tmp/pack");
        let nested = root.join("sub").join("deeper").join("b.txt");
        assert_eq!(
            entry_name(&root, &nested).expect("UTF-8 name").as_deref(),
            Some("sub/deeper/b.txt")
        );
    }

    #[test]
    fn root_has_no_entry_name() {
        let root = Path::new("/tmp/pack");
        assert_eq!(entry_name(root, root).expect("root"), None);
        assert_eq!(
            entry_name(root, Path::new("/elsewhere/a.txt")).expect("outside"),
            None
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_are_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let root = Path::new("/tmp/pack");
        let path = root.join(OsStr::from_bytes(b"bad\xff.txt"));
        let err = entry_name(root, &path).expect_err("lossy names are refused");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
