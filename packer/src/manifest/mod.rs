//! Resource pack descriptor decoding and validation.
//!
//! A pack folder carries a `manifest.json` declaring its identity, version,
//! and modules. Decoding is lenient about missing or `null` fields so that
//! validation can report every problem in one pass. A field holding the
//! wrong JSON type is still a decode error, and the manifest, its header,
//! and each module must be JSON objects.
//!
//! # Sub-modules
//!
//! - [`format_version`] - Coercion of the loosely typed `format_version`.
//! - [`issues`] - The issue accumulator (`ManifestIssues`).
//! - [`uuid`] - Canonical UUID form check.
//! - [`validate`] - Schema rules applied to a decoded [`Manifest`].

pub mod format_version;
pub mod issues;
pub mod uuid;
pub mod validate;

pub use issues::ManifestIssues;
pub use validate::{check_manifest, validate_manifest};

use crate::error::{PackError, Result};
use log::{debug, trace};
use serde::de::value::MapAccessDeserializer;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::fs;
use std::marker::PhantomData;
use std::io::ErrorKind;
use std::path::Path;

/// File name of the descriptor inside a pack folder.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Decoded `manifest.json`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Manifest {
    /// Raw format version; see [`format_version::coerce_format_version`].
    #[serde(default)]
    pub format_version: Option<serde_json::Value>,
    /// Pack identity.
    #[serde(default, deserialize_with = "object_or_default")]
    pub header: ManifestHeader,
    /// Declared modules, in file order. A `null` entry decodes as an empty
    /// module.
    #[serde(default, deserialize_with = "object_entries")]
    pub modules: Vec<ManifestModule>,
}

/// The `header` object of a manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ManifestHeader {
    /// Display name; must not be blank.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Free-form description; may be empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Pack UUID in canonical form.
    #[serde(default, deserialize_with = "null_as_default")]
    pub uuid: String,
    /// Pack version triplet.
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: Vec<i64>,
    /// Optional minimum engine version triplet; empty when absent.
    #[serde(default, deserialize_with = "null_as_default")]
    pub min_engine_version: Vec<i64>,
}

/// One entry of the `modules` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ManifestModule {
    /// Module kind, e.g. `resources`; must not be blank.
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    /// Module UUID in canonical form.
    #[serde(default, deserialize_with = "null_as_default")]
    pub uuid: String,
    /// Module version triplet.
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: Vec<i64>,
}

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A value decoded only from a JSON object.
///
/// Derived struct impls also accept a positional array, which would let
/// `["name", "", "<uuid>", [1, 0, 0]]` stand in for a header.
struct ObjectOnly<T>(T);

impl<T: Default> ObjectOnly<T> {
    fn or_default(value: Option<Self>) -> T {
        value.map(|Self(inner)| inner).unwrap_or_default()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ObjectOnly<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ObjectVisitor(PhantomData))
    }
}

struct ObjectVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for ObjectVisitor<T> {
    type Value = ObjectOnly<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a JSON object")
    }

    fn visit_map<A>(self, map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        T::deserialize(MapAccessDeserializer::new(map)).map(ObjectOnly)
    }
}

/// Decode an object field, treating `null` like a missing field.
fn object_or_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<ObjectOnly<T>>::deserialize(deserializer).map(ObjectOnly::or_default)
}

/// Decode an array of objects; `null` entries and a `null` array are empty.
fn object_entries<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let entries = Option::<Vec<Option<ObjectOnly<T>>>>::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .map(ObjectOnly::or_default)
        .collect())
}

/// Decode a manifest from raw JSON bytes.
///
/// A top-level `null` decodes to an empty manifest, which validation then
/// rejects field by field. Any other non-object document is a decode error.
///
/// # Errors
///
/// Returns [`PackError::ManifestParse`] if the bytes are not JSON, the
/// document is not an object, or a field holds the wrong JSON type.
///
/// # Examples
///
/// ```
/// use packy_packer::manifest::parse_manifest;
///
/// let manifest = parse_manifest(br#"{"format_version": 2, "modules": []}"#)
///     .expect("valid JSON");
/// assert!(manifest.modules.is_empty());
/// assert!(parse_manifest(b"{not json").is_err());
/// ```
pub fn parse_manifest(bytes: &[u8]) -> Result<Manifest> {
    serde_json::from_slice::<Option<ObjectOnly<Manifest>>>(bytes)
        .map(ObjectOnly::or_default)
        .map_err(|source| PackError::ManifestParse { source })
}

/// Read and decode `<folder>/manifest.json`.
///
/// # Errors
///
/// Returns [`PackError::ManifestNotFound`] when the file does not exist,
/// [`PackError::Io`] for other read failures, and
/// [`PackError::ManifestParse`] when decoding fails.
pub fn read_manifest(folder: &Path) -> Result<Manifest> {
    let path = folder.join(MANIFEST_FILE_NAME);
    trace!("reading manifest from {}", path.display());
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(PackError::ManifestNotFound { path });
        }
        Err(e) => return Err(PackError::io("read manifest")(e)),
    };
    parse_manifest(&bytes)
}

/// Check that `folder` contains a valid `manifest.json`.
///
/// # Errors
///
/// Returns any error from [`read_manifest`], or
/// [`PackError::Validation`] listing every violated rule.
pub fn validate_folder(folder: &Path) -> Result<()> {
    let manifest = read_manifest(folder)?;
    let issues = check_manifest(&manifest);
    debug!(
        "validated {} with {} issue(s)",
        folder.display(),
        issues.len()
    );
    issues.into_result()
}
