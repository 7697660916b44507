//! In-memory override store. Contents live as long as the process.

use anyhow::{anyhow, Result};
use shared::{DonorPreference, EmployeeOverride, OverrideSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::traits::OverrideStorage;

#[derive(Default)]
pub struct InMemoryOverrideStore {
    overrides: RwLock<OverrideSet>,
}

impl InMemoryOverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing override set
    pub fn with_overrides(overrides: OverrideSet) -> Self {
        Self {
            overrides: RwLock::new(overrides),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, OverrideSet>> {
        self.overrides
            .read()
            .map_err(|_| anyhow!("Override store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, OverrideSet>> {
        self.overrides
            .write()
            .map_err(|_| anyhow!("Override store lock poisoned"))
    }
}

impl OverrideStorage for InMemoryOverrideStore {
    fn load_overrides(&self) -> Result<OverrideSet> {
        Ok(self.read()?.clone())
    }

    fn set_increment(&self, employee_id: &str, increment: f64) -> Result<()> {
        self.write()?
            .increments
            .insert(employee_id.to_string(), increment);
        Ok(())
    }

    fn remove_increment(&self, employee_id: &str) -> Result<bool> {
        Ok(self.write()?.increments.remove(employee_id).is_some())
    }

    fn clear_increments(&self) -> Result<()> {
        self.write()?.increments.clear();
        Ok(())
    }

    fn set_employee_override(&self, employee_id: &str, employee_override: &EmployeeOverride) -> Result<()> {
        self.write()?
            .employee_overrides
            .insert(employee_id.to_string(), employee_override.clone());
        Ok(())
    }

    fn set_donor_preferences(&self, donor_id: &str, preferences: &[DonorPreference]) -> Result<()> {
        self.write()?
            .donor_preferences
            .insert(donor_id.to_string(), preferences.to_vec());
        Ok(())
    }

    fn remove_donor_preferences(&self, donor_id: &str) -> Result<bool> {
        Ok(self.write()?.donor_preferences.remove(donor_id).is_some())
    }
}
