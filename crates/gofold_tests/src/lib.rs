//! gofold_tests: Go source fixtures shared by the end-to-end tests.
//!
//! Fixtures live in `testdata/` next to this crate's manifest.

use std::path::{Path, PathBuf};

/// The fixture directory.
pub fn testdata_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

pub fn fixture_path(name: &str) -> PathBuf {
    testdata_dir().join(name)
}

/// Read a fixture. Panics when it is missing, since a test cannot
/// continue without its input.
pub fn fixture(name: &str) -> String {
    let path = fixture_path(name);
    match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) => panic!("cannot read fixture {}: {}", path.display(), err),
    }
}

/// Names of all `.go` fixtures, sorted.
pub fn go_fixtures() -> Vec<String> {
    let entries = match std::fs::read_dir(testdata_dir()) {
        Ok(entries) => entries,
        Err(err) => panic!("cannot list testdata: {}", err),
    };
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".go"))
        .collect();
    names.sort();
    names
}
