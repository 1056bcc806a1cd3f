use std::fs;
use std::path::{Path, PathBuf};

/// Absolute path of a file under `fixtures/`.
pub fn fixture_path(name: &str) -> PathBuf {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name);

    assert!(path.exists(), "fixture does not exist: {:?}", path);

    path
}

pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("failed to read output file")
        .lines()
        .map(str::to_string)
        .collect()
}
