#![allow(dead_code)]

pub mod temp_files {
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Schema snapshot shared by the integration tests
    pub fn shop_schema_path() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/shop_schema.yaml")
    }

    /// Empty project root removed when dropped
    pub fn temp_project() -> tempfile::TempDir {
        tempfile::Builder::new()
            .prefix("crudgen_test_")
            .tempdir()
            .unwrap()
    }

    /// Write `content` under `root`, creating parent directories
    pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn read_file(root: &Path, relative: &str) -> String {
        fs::read_to_string(root.join(relative))
            .unwrap_or_else(|e| panic!("failed to read {relative}: {e}"))
    }
}
