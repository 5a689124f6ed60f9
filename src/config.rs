//! Configuration loader for the Packy shell.
//!
//! Settings live in `packy.toml`. The only setting today is the packs root,
//! the directory archives go to when no output path is given. Resolution
//! order is: command-line override, `packs_dir` from the file, then a
//! `packs` directory beside the running program.

use crate::error::{Result, ShellError};
use packy_packer::archive::Archiver;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File name looked up in the current directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "packy.toml";

/// Shell configuration.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default destination root for archives.
    ///
    /// Blank values are treated as absent so a templated `packs_dir = ""`
    /// falls back to the directory beside the executable.
    pub packs_dir: Option<PathBuf>,
}

impl Config {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML decode error for malformed input or unknown keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use packy::Config;
    /// use std::path::Path;
    ///
    /// let config = Config::from_toml("packs_dir = \"/srv/packs\"\n").expect("valid TOML");
    /// assert_eq!(config.packs_dir(), Some(Path::new("/srv/packs")));
    /// ```
    pub fn from_toml(source: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Load configuration from `explicit`, or from [`DEFAULT_CONFIG_FILE`]
    /// in the current directory when it exists.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::ConfigNotFound`] when an explicit file is
    /// missing, [`ShellError::ConfigRead`] for other read failures, and
    /// [`ShellError::ConfigParse`] for invalid TOML.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_file(path, true),
            None => Self::load_file(Path::new(DEFAULT_CONFIG_FILE), false),
        }
    }

    fn load_file(path: &Path, required: bool) -> Result<Self> {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) if e.kind() == ErrorKind::NotFound && !required => {
                log::debug!("no {} found; using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ShellError::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(source) => {
                return Err(ShellError::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_toml(&source).map_err(|source| ShellError::ConfigParse {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }

    /// Return the configured packs root, ignoring blank values.
    #[must_use]
    pub fn packs_dir(&self) -> Option<&Path> {
        self.packs_dir
            .as_deref()
            .filter(|path| !path.as_os_str().to_string_lossy().trim().is_empty())
    }

    /// Build an [`Archiver`], preferring `override_dir` over the file
    /// setting and both over the directory beside the executable.
    ///
    /// # Errors
    ///
    /// Returns an error if the fallback needs the executable path and it
    /// cannot be resolved.
    pub fn archiver(&self, override_dir: Option<&Path>) -> Result<Archiver> {
        match override_dir.or_else(|| self.packs_dir()) {
            Some(dir) => Ok(Archiver::new(dir)),
            None => Ok(Archiver::beside_executable()?),
        }
    }
}
