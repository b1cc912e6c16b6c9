use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;

pub const TEST_API_KEY: &str = "test-key";

pub fn fixture_path(relative: impl AsRef<Path>) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

pub fn read_fixture(relative: impl AsRef<Path>) -> String {
    fs::read_to_string(fixture_path(relative)).expect("fixture file should be readable")
}

#[allow(dead_code)]
pub fn read_json_fixture(relative: impl AsRef<Path>) -> Value {
    serde_json::from_str(&read_fixture(relative)).expect("fixture should be valid JSON")
}

#[allow(dead_code)]
pub fn fmp(base_url: &str) -> fmpkit::Fmp {
    let config = fmpkit::FmpConfig::new(TEST_API_KEY).with_base_url(base_url);
    fmpkit::Fmp::with_config(config).unwrap()
}
