//! # YAML Override Repository
//!
//! Keeps every override in a single `overrides.yaml`:
//!
//! ```yaml
//! increments:
//!   emp-001: 10.0
//! employee_overrides:
//!   emp-002:
//!     role: Program Lead
//!     city: Lucknow
//! donor_preferences:
//!   donor-saras:
//!     - program_id: dsp
//!       weight: 70.0
//! ```

use anyhow::{anyhow, Context, Result};
use shared::{DonorPreference, EmployeeOverride, OverrideSet};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::debug;

use super::connection::YamlConnection;
use crate::storage::traits::OverrideStorage;

const OVERRIDES_FILE: &str = "overrides.yaml";

pub struct YamlOverrideRepository {
    connection: YamlConnection,
    /// Serializes read-modify-write cycles on the file
    write_lock: Mutex<()>,
}

impl YamlOverrideRepository {
    pub fn new(connection: YamlConnection) -> Self {
        Self {
            connection,
            write_lock: Mutex::new(()),
        }
    }

    fn overrides_path(&self) -> PathBuf {
        self.connection.file_path(OVERRIDES_FILE)
    }

    /// A missing file is an empty override set
    fn read_overrides(&self) -> Result<OverrideSet> {
        let path = self.overrides_path();
        if !path.exists() {
            debug!("No overrides file at {:?}, starting empty", path);
            return Ok(OverrideSet::default());
        }

        let yaml_content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {:?}", path))?;
        let overrides = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(overrides)
    }

    fn update<R>(&self, apply: impl FnOnce(&mut OverrideSet) -> R) -> Result<R> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow!("Override file lock poisoned"))?;

        let mut overrides = self.read_overrides()?;
        let outcome = apply(&mut overrides);
        self.connection
            .write_yaml_atomic(&self.overrides_path(), &overrides)?;
        Ok(outcome)
    }
}

impl OverrideStorage for YamlOverrideRepository {
    fn load_overrides(&self) -> Result<OverrideSet> {
        self.read_overrides()
    }

    fn set_increment(&self, employee_id: &str, increment: f64) -> Result<()> {
        self.update(|overrides| {
            overrides
                .increments
                .insert(employee_id.to_string(), increment);
        })?;
        debug!("Stored {}% increment for employee {}", increment, employee_id);
        Ok(())
    }

    fn remove_increment(&self, employee_id: &str) -> Result<bool> {
        self.update(|overrides| overrides.increments.remove(employee_id).is_some())
    }

    fn clear_increments(&self) -> Result<()> {
        self.update(|overrides| overrides.increments.clear())?;
        debug!("Cleared all stored increments");
        Ok(())
    }

    fn set_employee_override(&self, employee_id: &str, employee_override: &EmployeeOverride) -> Result<()> {
        self.update(|overrides| {
            overrides
                .employee_overrides
                .insert(employee_id.to_string(), employee_override.clone());
        })
    }

    fn set_donor_preferences(&self, donor_id: &str, preferences: &[DonorPreference]) -> Result<()> {
        self.update(|overrides| {
            overrides
                .donor_preferences
                .insert(donor_id.to_string(), preferences.to_vec());
        })
    }

    fn remove_donor_preferences(&self, donor_id: &str) -> Result<bool> {
        self.update(|overrides| overrides.donor_preferences.remove(donor_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::City;
    use tempfile::TempDir;

    fn create_test_repository() -> (TempDir, YamlOverrideRepository) {
        let temp_dir = TempDir::new().unwrap();
        let connection = YamlConnection::new(temp_dir.path()).unwrap();
        (temp_dir, YamlOverrideRepository::new(connection))
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let (_temp_dir, repository) = create_test_repository();
        assert_eq!(repository.load_overrides().unwrap(), OverrideSet::default());
    }

    #[test]
    fn test_overrides_survive_a_new_repository() {
        let (temp_dir, repository) = create_test_repository();

        repository.set_increment("emp-001", 12.5).unwrap();
        repository
            .set_employee_override(
                "emp-002",
                &EmployeeOverride {
                    role: Some("Program Lead".to_string()),
                    city: Some(City::Lucknow),
                    program_id: None,
                },
            )
            .unwrap();
        repository
            .set_donor_preferences(
                "donor-saras",
                &[DonorPreference {
                    program_id: "dsp".to_string(),
                    weight: 70.0,
                }],
            )
            .unwrap();

        let reopened = YamlOverrideRepository::new(YamlConnection::new(temp_dir.path()).unwrap());
        let overrides = reopened.load_overrides().unwrap();

        assert_eq!(overrides.increments["emp-001"], 12.5);
        assert_eq!(overrides.employee_overrides["emp-002"].city, Some(City::Lucknow));
        assert_eq!(overrides.donor_preferences["donor-saras"][0].weight, 70.0);
    }

    #[test]
    fn test_remove_and_clear() {
        let (_temp_dir, repository) = create_test_repository();
        repository.set_increment("emp-001", 10.0).unwrap();
        repository.set_increment("emp-002", 20.0).unwrap();

        assert!(repository.remove_increment("emp-001").unwrap());
        assert!(!repository.remove_increment("emp-001").unwrap());
        assert_eq!(repository.load_overrides().unwrap().increments.len(), 1);

        repository.clear_increments().unwrap();
        assert!(repository.load_overrides().unwrap().increments.is_empty());
        assert!(!repository.remove_donor_preferences("donor-x").unwrap());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let (temp_dir, repository) = create_test_repository();
        fs::write(temp_dir.path().join(OVERRIDES_FILE), "increments: [not, a, map").unwrap();

        assert!(repository.load_overrides().is_err());
    }
}
