//! What-if scenarios layered on top of the override-merged dataset.
//!
//! A scenario scales salaries, donor contributions and overhead by the
//! preset's multipliers times the caller's manual multipliers, then runs the
//! same engine as the plain simulation. A baseline run is returned alongside
//! so the two can be compared.

use chrono::{Local, NaiveDate};
use shared::{
    Dataset, Donor, Employee, IncrementSummary, OverrideSet, ScenarioAdjustment, ScenarioPreset,
    ScenarioSimulationResponse,
};
use std::collections::BTreeMap;
use tracing::info;

use crate::domain::models::ScenarioError;
use crate::domain::override_service::{
    apply_donor_preference_overrides, apply_employee_overrides, apply_increments,
};
use crate::domain::payroll::{with_salary, PF_RATE};
use crate::domain::simulation_service::SimulationService;

pub const CURRENT_SCENARIO: &str = "current";

fn preset(
    id: &str,
    name: &str,
    description: &str,
    impact: &str,
    multipliers: (f64, f64, f64),
) -> ScenarioPreset {
    let (donor_multiplier, salary_multiplier, overhead_multiplier) = multipliers;
    ScenarioPreset {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        impact: impact.to_string(),
        donor_multiplier,
        salary_multiplier,
        overhead_multiplier,
    }
}

/// The built-in presets, `current` first
pub fn scenario_presets() -> Vec<ScenarioPreset> {
    vec![
        preset(
            CURRENT_SCENARIO,
            "Current State",
            "Your actual funding and costs as they are today",
            "Shows your real financial position with no changes",
            (1.0, 1.0, 1.0),
        ),
        preset(
            "new-hire",
            "New Hire Planning",
            "Planning to hire 2-3 new employees",
            "Increases salaries by 15%, maintains current funding",
            (1.0, 1.15, 1.05),
        ),
        preset(
            "donor-exit",
            "Donor Exit Scenario",
            "What if a major donor withdraws?",
            "Reduces funding by 20%, maintains current costs",
            (0.8, 1.0, 1.0),
        ),
        preset(
            "salary-increment",
            "Annual Increment",
            "Planning 10% annual salary increases",
            "Increases all salaries by 10%, maintains funding",
            (1.0, 1.1, 1.0),
        ),
        preset(
            "expansion",
            "Program Expansion",
            "Adding new geography or program",
            "Increases funding 15%, costs 12%, overhead 10%",
            (1.15, 1.12, 1.1),
        ),
        preset(
            "emergency",
            "Emergency Mode",
            "Cost-cutting to extend runway",
            "Reduces costs 10%, funding may drop 5%",
            (0.95, 0.9, 0.85),
        ),
        preset(
            "custom",
            "Custom Scenario",
            "Adjust all parameters manually",
            "Full control over all financial variables",
            (1.0, 1.0, 1.0),
        ),
    ]
}

pub fn find_preset(scenario_id: &str) -> Result<ScenarioPreset, ScenarioError> {
    scenario_presets()
        .into_iter()
        .find(|preset| preset.id == scenario_id)
        .ok_or_else(|| ScenarioError::UnknownScenario(scenario_id.to_string()))
}

fn check_multiplier(name: &'static str, value: f64) -> Result<(), ScenarioError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ScenarioError::InvalidMultiplier { name, value })
    }
}

/// Inputs after a scenario's multipliers have been applied
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustedInputs {
    pub employees: Vec<Employee>,
    pub donors: Vec<Donor>,
    pub operational_overhead: f64,
}

/// Scale employees, donors and overhead. Salaries and contributions are
/// rounded after scaling and PF/TDS follow the new salary.
pub fn adjust_inputs(
    preset: &ScenarioPreset,
    adjustment: &ScenarioAdjustment,
    employees: &[Employee],
    donors: &[Donor],
    manual_overhead: f64,
) -> Result<AdjustedInputs, ScenarioError> {
    check_multiplier("salary_multiplier", adjustment.salary_multiplier)?;
    check_multiplier("donor_multiplier", adjustment.donor_multiplier)?;
    if !manual_overhead.is_finite() || manual_overhead < 0.0 {
        return Err(ScenarioError::InvalidOverhead(manual_overhead));
    }

    let salary_multiplier = adjustment.salary_multiplier * preset.salary_multiplier;
    let donor_multiplier = adjustment.donor_multiplier * preset.donor_multiplier;

    let employees = employees
        .iter()
        .map(|employee| with_salary(employee, (employee.monthly_salary * salary_multiplier).round()))
        .collect();
    let donors = donors
        .iter()
        .map(|donor| Donor {
            contribution_amount: (donor.contribution_amount * donor_multiplier).round(),
            ..donor.clone()
        })
        .collect();

    Ok(AdjustedInputs {
        employees,
        donors,
        operational_overhead: (manual_overhead * preset.overhead_multiplier).round(),
    })
}

/// Headline numbers for planned increments against the unmodified payroll
pub fn increment_summary(
    base_employees: &[Employee],
    increments: &BTreeMap<String, f64>,
) -> IncrementSummary {
    let mut employees_with_increments = 0;
    let mut increment_total = 0.0;
    let mut additional_annual_cost = 0.0;

    for employee in base_employees {
        let increment = increments.get(&employee.id).copied().unwrap_or(0.0);
        if increment <= 0.0 {
            continue;
        }
        employees_with_increments += 1;
        increment_total += increment;

        let increase = employee.monthly_salary * 12.0 * (increment / 100.0);
        additional_annual_cost += increase + increase * PF_RATE;
    }

    let average_increment = if employees_with_increments > 0 {
        increment_total / employees_with_increments as f64
    } else {
        0.0
    };

    IncrementSummary {
        employees_with_increments,
        total_employees: base_employees.len(),
        average_increment,
        additional_annual_cost,
    }
}

#[derive(Clone, Default)]
pub struct ScenarioService {
    simulation_service: SimulationService,
}

impl ScenarioService {
    pub fn new(simulation_service: SimulationService) -> Self {
        Self { simulation_service }
    }

    pub fn presets(&self) -> Vec<ScenarioPreset> {
        scenario_presets()
    }

    pub fn simulate(
        &self,
        adjustment: &ScenarioAdjustment,
        dataset: &Dataset,
        overrides: &OverrideSet,
    ) -> Result<ScenarioSimulationResponse, ScenarioError> {
        self.simulate_as_of(adjustment, dataset, overrides, Local::now().date_naive())
    }

    /// The baseline uses base employees without increments, override-merged
    /// donors and the configured overhead. The scenario run uses fully-merged
    /// employees and donors with the adjustment applied.
    pub fn simulate_as_of(
        &self,
        adjustment: &ScenarioAdjustment,
        dataset: &Dataset,
        overrides: &OverrideSet,
        today: NaiveDate,
    ) -> Result<ScenarioSimulationResponse, ScenarioError> {
        let scenario = find_preset(&adjustment.scenario_id)?;
        let default_overhead = self.simulation_service.config().operational_overhead;

        let donors = apply_donor_preference_overrides(&dataset.donors, &overrides.donor_preferences);
        let employees = apply_employee_overrides(
            &apply_increments(&dataset.employees, &overrides.increments),
            &overrides.employee_overrides,
        );

        let adjusted = adjust_inputs(
            &scenario,
            adjustment,
            &employees,
            &donors,
            adjustment.manual_overhead.unwrap_or(default_overhead),
        )?;

        let baseline = self.simulation_service.run_simulation_as_of(
            &donors,
            &dataset.programs,
            &dataset.employees,
            Some(default_overhead),
            today,
        );
        let simulation = self.simulation_service.run_simulation_as_of(
            &adjusted.donors,
            &dataset.programs,
            &adjusted.employees,
            Some(adjusted.operational_overhead),
            today,
        );

        info!(
            "Simulated scenario {}: runway {:.2} months against baseline {:.2}",
            scenario.id, simulation.runway_months, baseline.runway_months
        );

        Ok(ScenarioSimulationResponse {
            scenario,
            baseline,
            simulation,
            increment_summary: increment_summary(&dataset.employees, &overrides.increments),
        })
    }
}
