//! Config paths and file helpers.

use std::{
    fs,
    io::{Read, Write},
    path::{Path, PathBuf},
};

/// Path: <config_dir>/ffl-engine/config.json
pub fn default_config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".config");
        home
    });
    base.join("ffl-engine").join("config.json")
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_path() {
        let path = default_config_path();
        let path_str = path.to_string_lossy();

        assert!(path_str.contains("ffl-engine"));
        assert!(path_str.ends_with("config.json"));
    }

    #[test]
    fn test_try_read_to_string_existing_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("rules.json");

        fs::write(&file_path, "{}").unwrap();

        assert_eq!(try_read_to_string(&file_path), Some("{}".to_string()));
    }

    #[test]
    fn test_try_read_to_string_nonexistent_file() {
        let dir = tempdir().unwrap();
        assert_eq!(try_read_to_string(&dir.path().join("missing.json")), None);
    }

    #[test]
    fn test_write_string_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("nested").join("config.json");

        write_string(&file_path, "{\"scorerCacheCapacity\": 4}").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "{\"scorerCacheCapacity\": 4}");
    }
}
