//! Packy validates resource pack folders and zips them for distribution.
//!
//! The heavy lifting lives in [`packy_packer`]; this crate is the shell
//! around it: configuration, the validate-then-archive action, and the
//! `packy` command-line interface.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - `packy.toml` loading and packs-root resolution
//! - [`error`] - Shell-level error type
//! - [`shell`] - The validate and archive actions the CLI invokes

pub mod cli;
pub mod config;
pub mod error;
pub mod shell;

pub use config::Config;
pub use error::{Result, ShellError};
