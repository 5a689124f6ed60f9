//! Behaviour-driven tests for pack validation and archiving.
//!
//! Scenarios live in `tests/features/` and drive the public API of
//! `packy-packer` against real temporary folders.

use packy_packer::archive::{ArchiveRequest, Archiver};
use packy_packer::error::PackError;
use packy_packer::manifest::{MANIFEST_FILE_NAME, validate_folder};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// World types
// ---------------------------------------------------------------------------

#[derive(Default)]
struct PackWorld {
    temp_dir: Option<TempDir>,
    manifest: Option<Value>,
    validation: Option<Result<(), PackError>>,
    archive: Option<Result<PathBuf, PackError>>,
    attempted_destination: Option<PathBuf>,
}

#[fixture]
fn world() -> PackWorld {
    PackWorld {
        temp_dir: Some(TempDir::new().expect("temp dir")),
        ..PackWorld::default()
    }
}

fn root(world: &PackWorld) -> PathBuf {
    world
        .temp_dir
        .as_ref()
        .expect("temp_dir set")
        .path()
        .to_path_buf()
}

fn pack_dir(world: &PackWorld) -> PathBuf {
    root(world).join("pack")
}

fn valid_manifest() -> Value {
    json!({
        "format_version": 2,
        "header": {
            "name": "Behaviour Pack",
            "description": "",
            "uuid": "01234567-89AB-CDEF-0123-456789ABCDEF",
            "version": [1, 0, 0]
        },
        "modules": [
            {"type": "resources", "uuid": "fedcba98-7654-3210-fedc-ba9876543210", "version": [1, 0, 0]}
        ]
    })
}

fn validation_error(world: &PackWorld) -> &PackError {
    world
        .validation
        .as_ref()
        .expect("validation ran")
        .as_ref()
        .expect_err("validation failed")
}

fn archive_entries(world: &PackWorld) -> zip::ZipArchive<fs::File> {
    let path = world
        .archive
        .as_ref()
        .expect("archive ran")
        .as_ref()
        .expect("archive succeeded");
    zip::ZipArchive::new(fs::File::open(path).expect("open")).expect("read zip")
}

fn run_archive(world: &mut PackWorld, destination: Option<PathBuf>) {
    let archiver = Archiver::new(root(world).join("packs"));
    let mut request = ArchiveRequest::new(pack_dir(world));
    if let Some(path) = destination {
        world.attempted_destination = Some(path.clone());
        request = request.with_destination(path);
    }
    world.archive = Some(archiver.archive(&request));
}

// ---------------------------------------------------------------------------
// Step definitions
// ---------------------------------------------------------------------------

#[given("a pack folder with a valid manifest")]
fn given_valid_manifest(world: &mut PackWorld) {
    fs::create_dir_all(pack_dir(world)).expect("mkdir");
    world.manifest = Some(valid_manifest());
}

#[given("an empty pack folder")]
fn given_empty_folder(world: &mut PackWorld) {
    fs::create_dir_all(pack_dir(world)).expect("mkdir");
}

#[given("a pack folder whose manifest contains \"{raw}\"")]
fn given_raw_manifest(world: &mut PackWorld, raw: String) {
    let dir = pack_dir(world);
    fs::create_dir_all(&dir).expect("mkdir");
    fs::write(dir.join(MANIFEST_FILE_NAME), raw).expect("write manifest");
}

#[given("the manifest format version is {version}")]
fn given_format_version(world: &mut PackWorld, version: i64) {
    let manifest = world.manifest.as_mut().expect("manifest set");
    manifest["format_version"] = json!(version);
}

#[given("the manifest has no modules")]
fn given_no_modules(world: &mut PackWorld) {
    let manifest = world.manifest.as_mut().expect("manifest set");
    manifest["modules"] = json!([]);
}

#[given("a pack folder containing \"{a}\", \"{b}\", and an empty \"{empty}\"")]
fn given_pack_tree(world: &mut PackWorld, a: String, b: String, empty: String) {
    let dir = pack_dir(world);
    fs::create_dir_all(dir.join(&empty)).expect("mkdir empty");
    for name in [a, b] {
        let path = dir.join(&name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir parent");
        }
        fs::write(&path, format!("content of {name}")).expect("write file");
    }
}

#[when("the folder is validated")]
fn when_validated(world: &mut PackWorld) {
    let dir = pack_dir(world);
    if let Some(manifest) = &world.manifest {
        fs::write(dir.join(MANIFEST_FILE_NAME), manifest.to_string()).expect("write manifest");
    }
    world.validation = Some(validate_folder(&dir));
}

#[when("the folder is archived to a sibling zip")]
fn when_archived_to_sibling(world: &mut PackWorld) {
    let destination = root(world).join("pack-out.zip");
    run_archive(world, Some(destination));
}

#[when("the folder is archived to \"{name}\" inside itself")]
fn when_archived_inside(world: &mut PackWorld, name: String) {
    let destination = pack_dir(world).join(name);
    run_archive(world, Some(destination));
}

#[when("the folder is archived without a destination")]
fn when_archived_default(world: &mut PackWorld) {
    run_archive(world, None);
}

#[then("validation succeeds")]
fn then_validation_succeeds(world: &mut PackWorld) {
    let outcome = world.validation.as_ref().expect("validation ran");
    assert!(outcome.is_ok(), "unexpected error: {outcome:?}");
}

#[then("the error message is \"{message}\"")]
fn then_error_message(world: &mut PackWorld, message: String) {
    assert_eq!(validation_error(world).to_string(), message);
}

#[then("the error is a parse error")]
fn then_parse_error(world: &mut PackWorld) {
    assert!(matches!(
        validation_error(world),
        PackError::ManifestParse { .. }
    ));
}

#[then("the archive holds exactly the entries \"{names}\"")]
fn then_archive_entries(world: &mut PackWorld, names: String) {
    let archive = archive_entries(world);
    let mut actual: Vec<String> = archive.file_names().map(str::to_owned).collect();
    actual.sort();
    let expected: Vec<String> = names.split(", ").map(str::to_owned).collect();
    assert_eq!(actual, expected);
}

#[then("the archive entry \"{name}\" has the original content")]
fn then_entry_content(world: &mut PackWorld, name: String) {
    let mut archive = archive_entries(world);
    let mut entry = archive.by_name(&name).expect("entry present");
    let mut content = String::new();
    entry.read_to_string(&mut content).expect("read entry");
    assert_eq!(content, format!("content of {name}"));
}

#[then("archiving fails because the destination is inside the source")]
fn then_invalid_destination(world: &mut PackWorld) {
    let outcome = world.archive.as_ref().expect("archive ran");
    assert!(matches!(
        outcome,
        Err(PackError::InvalidDestination { .. })
    ));
}

#[then("no archive file exists")]
fn then_no_archive(world: &mut PackWorld) {
    let destination = world
        .attempted_destination
        .as_ref()
        .expect("destination recorded");
    assert!(!destination.exists());
}

#[then("the archive is written to the packs directory as \"{name}\"")]
fn then_default_destination(world: &mut PackWorld, name: String) {
    let outcome = world.archive.as_ref().expect("archive ran");
    let written = outcome.as_ref().expect("archive succeeded");
    assert_eq!(written, &root(world).join("packs").join(name));
    assert!(written.is_file());
}

// ---------------------------------------------------------------------------
// Scenario bindings
// ---------------------------------------------------------------------------

#[scenario(
    path = "tests/features/pack_validation.feature",
    name = "A well-formed manifest passes validation"
)]
fn scenario_valid_manifest(world: PackWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/pack_validation.feature",
    name = "A folder without a manifest is reported as not found"
)]
fn scenario_missing_manifest(world: PackWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/pack_validation.feature",
    name = "A manifest that is not JSON is a parse error"
)]
fn scenario_invalid_json(world: PackWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/pack_validation.feature",
    name = "An unsupported format version is the only issue"
)]
fn scenario_unsupported_format_version(world: PackWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/pack_validation.feature",
    name = "An empty module list is reported without per-module issues"
)]
fn scenario_empty_modules(world: PackWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/pack_archive.feature",
    name = "Archive a pack folder with nested and empty directories"
)]
fn scenario_archive_round_trip(world: PackWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/pack_archive.feature",
    name = "An archive inside its own source folder is rejected"
)]
fn scenario_reject_self_inclusion(world: PackWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/pack_archive.feature",
    name = "The default destination is the packs directory"
)]
fn scenario_default_destination(world: PackWorld) {
    let _ = world;
}
