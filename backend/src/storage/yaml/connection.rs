use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Manages the data directory that YAML files live in
#[derive(Clone, Debug)]
pub struct YamlConnection {
    base_directory: PathBuf,
}

impl YamlConnection {
    /// Create a connection, creating the directory if it doesn't exist
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {:?}", base_path))?;
            info!("Created data directory: {:?}", base_path);
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.base_directory.join(file_name)
    }

    /// Serialize `value` to `path` via a temp file and rename
    pub fn write_yaml_atomic<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let yaml_content = serde_yaml::to_string(value)?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)
            .with_context(|| format!("Failed to write {:?}", temp_path))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to replace {:?}", path))?;

        debug!("Saved {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("fundflow").join("data");

        let connection = YamlConnection::new(&nested).unwrap();

        assert!(nested.exists());
        assert_eq!(connection.file_path("x.yaml"), nested.join("x.yaml"));
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let connection = YamlConnection::new(temp_dir.path()).unwrap();
        let path = connection.file_path("values.yaml");

        let mut values = BTreeMap::new();
        values.insert("overhead", 250_000);
        connection.write_yaml_atomic(&path, &values).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("overhead: 250000"));
    }
}
