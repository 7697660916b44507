//! # Storage Traits

use anyhow::Result;
use shared::{DonorPreference, EmployeeOverride, OverrideSet};

/// Keyed store for what-if overrides.
///
/// Implementations replace whole values; merging partial updates is the
/// override service's job.
pub trait OverrideStorage: Send + Sync {
    /// Snapshot of every stored override
    fn load_overrides(&self) -> Result<OverrideSet>;

    /// Store an increment percentage for an employee
    fn set_increment(&self, employee_id: &str, increment: f64) -> Result<()>;

    /// Remove one employee's increment. Returns true if one was stored.
    fn remove_increment(&self, employee_id: &str) -> Result<bool>;

    /// Remove every stored increment
    fn clear_increments(&self) -> Result<()>;

    /// Store (replace) the profile override for an employee
    fn set_employee_override(&self, employee_id: &str, employee_override: &EmployeeOverride) -> Result<()>;

    /// Store (replace) a donor's preference list
    fn set_donor_preferences(&self, donor_id: &str, preferences: &[DonorPreference]) -> Result<()>;

    /// Remove a donor's preference override. Returns true if one was stored.
    fn remove_donor_preferences(&self, donor_id: &str) -> Result<bool>;
}
