use std::fs;
use std::path::PathBuf;

pub fn get_test_file_path(file: &str) -> String {
    PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap())
        .join(file)
        .to_str()
        .unwrap()
        .to_string()
}

pub fn read_test_file(file: &str) -> String {
    let path = get_test_file_path(file);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {}: {}", path, e))
}
