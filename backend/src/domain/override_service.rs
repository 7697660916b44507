//! Override service: the layer between user-entered what-if overrides and the
//! engine.
//!
//! Overrides are stored through an injected `OverrideStorage` and merged into
//! base snapshots here, so the simulation engine only ever sees fully-merged
//! entities and never touches storage.
//!
//! ## Merge order for employees
//!
//! 1. Planned increment: salary is projected and PF/TDS recomputed
//! 2. Profile override: role, city (which also sets geography) and program

use anyhow::Result;
use shared::{Dataset, Donor, DonorPreference, Employee, EmployeeOverride, OverrideSet, Program};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::models::OverrideValidationError;
use crate::domain::payroll::{projected_salary, with_salary};
use crate::storage::OverrideStorage;

pub const MAX_INCREMENT_PERCENT: f64 = 100.0;
pub const MAX_TOTAL_WEIGHT: f64 = 100.0;
/// Slack for float sums of decimal weights (0.2 + 83.9 + 15.9 is not exactly 100)
pub const WEIGHT_EPSILON: f64 = 1e-9;

/// Errors from override updates: either the request was invalid or the store failed
#[derive(Debug, thiserror::Error)]
pub enum OverrideError {
    #[error(transparent)]
    Validation(#[from] OverrideValidationError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[derive(Clone)]
pub struct OverrideService {
    store: Arc<dyn OverrideStorage>,
}

impl OverrideService {
    pub fn new(store: Arc<dyn OverrideStorage>) -> Self {
        Self { store }
    }

    pub fn overrides(&self) -> Result<OverrideSet> {
        self.store.load_overrides()
    }

    /// Store a planned increment, clamped to 0-100%. Returns the stored value.
    pub fn set_increment(&self, employee_id: &str, increment: f64) -> Result<f64, OverrideError> {
        if !increment.is_finite() {
            return Err(OverrideValidationError::InvalidIncrement.into());
        }

        let clamped = increment.clamp(0.0, MAX_INCREMENT_PERCENT);
        if clamped != increment {
            warn!(
                "Clamped increment for employee {} from {} to {}",
                employee_id, increment, clamped
            );
        }

        self.store.set_increment(employee_id, clamped)?;
        info!("Set {}% increment for employee {}", clamped, employee_id);
        Ok(clamped)
    }

    pub fn reset_increment(&self, employee_id: &str) -> Result<bool> {
        let removed = self.store.remove_increment(employee_id)?;
        info!("Reset increment for employee {} (was set: {})", employee_id, removed);
        Ok(removed)
    }

    pub fn reset_all_increments(&self) -> Result<()> {
        self.store.clear_increments()?;
        info!("Reset all increments");
        Ok(())
    }

    /// Merge `update` into the employee's existing override. Fields set in
    /// `update` win; unset fields keep what was stored before.
    pub fn set_employee_override(
        &self,
        employee_id: &str,
        update: EmployeeOverride,
    ) -> Result<EmployeeOverride, OverrideError> {
        let existing = self
            .store
            .load_overrides()?
            .employee_overrides
            .remove(employee_id)
            .unwrap_or_default();

        let merged = EmployeeOverride {
            role: non_empty(update.role).or(existing.role),
            city: update.city.or(existing.city),
            program_id: non_empty(update.program_id).or(existing.program_id),
        };

        self.store.set_employee_override(employee_id, &merged)?;
        info!("Updated profile override for employee {}: {:?}", employee_id, merged);
        Ok(merged)
    }

    /// Replace a donor's preferences. An empty list removes the override.
    pub fn set_donor_preferences(
        &self,
        donor_id: &str,
        preferences: Vec<DonorPreference>,
        programs: &[Program],
    ) -> Result<(), OverrideError> {
        if preferences.is_empty() {
            self.store.remove_donor_preferences(donor_id)?;
            info!("Cleared preference override for donor {}", donor_id);
            return Ok(());
        }

        validate_preferences(&preferences, programs)?;
        self.store.set_donor_preferences(donor_id, &preferences)?;
        info!(
            "Set {} preferences for donor {}",
            preferences.len(),
            donor_id
        );
        Ok(())
    }

    pub fn effective_employees(&self, base: &[Employee]) -> Result<Vec<Employee>> {
        let overrides = self.store.load_overrides()?;
        let employees = apply_increments(base, &overrides.increments);
        Ok(apply_employee_overrides(&employees, &overrides.employee_overrides))
    }

    pub fn effective_donors(&self, base: &[Donor]) -> Result<Vec<Donor>> {
        let overrides = self.store.load_overrides()?;
        Ok(apply_donor_preference_overrides(base, &overrides.donor_preferences))
    }
}

pub fn ensure_known_employee(dataset: &Dataset, employee_id: &str) -> Result<(), OverrideValidationError> {
    if dataset.employees.iter().any(|employee| employee.id == employee_id) {
        Ok(())
    } else {
        Err(OverrideValidationError::UnknownEmployee(employee_id.to_string()))
    }
}

pub fn ensure_known_donor(dataset: &Dataset, donor_id: &str) -> Result<(), OverrideValidationError> {
    if dataset.donors.iter().any(|donor| donor.id == donor_id) {
        Ok(())
    } else {
        Err(OverrideValidationError::UnknownDonor(donor_id.to_string()))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Weights must each be 0-100, add up to at most 100, and point at known programs
pub fn validate_preferences(
    preferences: &[DonorPreference],
    programs: &[Program],
) -> Result<(), OverrideValidationError> {
    let known: HashSet<&str> = programs.iter().map(|p| p.id.as_str()).collect();

    for preference in preferences {
        if !(0.0..=100.0).contains(&preference.weight) {
            return Err(OverrideValidationError::WeightOutOfRange {
                program_id: preference.program_id.clone(),
                weight: preference.weight,
            });
        }
        if !known.contains(preference.program_id.as_str()) {
            return Err(OverrideValidationError::UnknownProgram(
                preference.program_id.clone(),
            ));
        }
    }

    let total: f64 = preferences.iter().map(|p| p.weight).sum();
    if total > MAX_TOTAL_WEIGHT + WEIGHT_EPSILON {
        return Err(OverrideValidationError::TotalWeightExceeded { total });
    }

    Ok(())
}

/// Fold planned increments into salaries. Employees without a positive
/// increment keep their salary and get `planned_increment = 0`.
pub fn apply_increments(employees: &[Employee], increments: &BTreeMap<String, f64>) -> Vec<Employee> {
    employees
        .iter()
        .map(|employee| {
            let increment = increments.get(&employee.id).copied().unwrap_or(0.0);
            if increment > 0.0 {
                let mut raised = with_salary(employee, projected_salary(employee.monthly_salary, increment));
                raised.planned_increment = increment;
                raised
            } else {
                Employee {
                    planned_increment: 0.0,
                    ..employee.clone()
                }
            }
        })
        .collect()
}

pub fn apply_employee_overrides(
    employees: &[Employee],
    overrides: &BTreeMap<String, EmployeeOverride>,
) -> Vec<Employee> {
    employees
        .iter()
        .map(|employee| {
            let Some(employee_override) = overrides.get(&employee.id) else {
                return employee.clone();
            };

            let mut updated = employee.clone();
            if let Some(role) = &employee_override.role {
                updated.role = role.clone();
            }
            if let Some(program_id) = &employee_override.program_id {
                updated.program_id = program_id.clone();
            }
            if let Some(city) = employee_override.city {
                updated.city = city;
                updated.geography = city.geography();
            }
            updated
        })
        .collect()
}

/// A non-empty override replaces the donor's preference list entirely
pub fn apply_donor_preference_overrides(
    donors: &[Donor],
    overrides: &BTreeMap<String, Vec<DonorPreference>>,
) -> Vec<Donor> {
    donors
        .iter()
        .map(|donor| match overrides.get(&donor.id) {
            Some(preferences) if !preferences.is_empty() => Donor {
                preferences: preferences.clone(),
                ..donor.clone()
            },
            _ => donor.clone(),
        })
        .collect()
}
