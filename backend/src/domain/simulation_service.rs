//! Simulation orchestration.
//!
//! `run_simulation` is the single entry point that turns donors, programs and
//! employees into a full `SimulationResult`. It is pure: it keeps no state
//! between calls and only depends on its arguments (the depletion dates are
//! relative to the `today` it is given). Callers re-run it whenever an input
//! changes.

use chrono::{Local, NaiveDate};
use shared::{
    AllocationLine, Donor, DonorAllocationSummary, Employee, Program, SimulationResult,
};
use tracing::debug;

use crate::domain::allocation::{build_allocation_lines, compute_general_fund};
use crate::domain::donor_economics::compute_net;
use crate::domain::geography::aggregate_by_geography;
use crate::domain::payroll::{compute_monthly_burn, compute_runway_months};
use crate::domain::runway::project_donor_runways;
use crate::domain::scoring::rank_donors;
use crate::domain::strategy::{generate_strategies, SimulationTotals};

/// Fixed monthly operational overhead used when the caller gives none
pub const OPERATIONAL_OVERHEAD: f64 = 250_000.0;

/// Configuration for the simulation service
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub operational_overhead: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            operational_overhead: OPERATIONAL_OVERHEAD,
        }
    }
}

/// Service wrapper around `run_simulation` that supplies configured defaults
#[derive(Clone, Default)]
pub struct SimulationService {
    config: SimulationConfig,
}

impl SimulationService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run a simulation dated today (local time)
    pub fn run_simulation(
        &self,
        donors: &[Donor],
        programs: &[Program],
        employees: &[Employee],
        operational_overhead: Option<f64>,
    ) -> SimulationResult {
        self.run_simulation_as_of(
            donors,
            programs,
            employees,
            operational_overhead,
            Local::now().date_naive(),
        )
    }

    pub fn run_simulation_as_of(
        &self,
        donors: &[Donor],
        programs: &[Program],
        employees: &[Employee],
        operational_overhead: Option<f64>,
        today: NaiveDate,
    ) -> SimulationResult {
        let overhead = operational_overhead.unwrap_or(self.config.operational_overhead);
        run_simulation(donors, programs, employees, overhead, today)
    }
}

pub fn run_simulation(
    donors: &[Donor],
    programs: &[Program],
    employees: &[Employee],
    operational_overhead: f64,
    today: NaiveDate,
) -> SimulationResult {
    let mut allocations: Vec<AllocationLine> = Vec::new();
    let mut donor_summaries: Vec<DonorAllocationSummary> = Vec::with_capacity(donors.len());
    let mut total_contributions = 0.0;
    let mut total_admin_cost = 0.0;
    let mut total_net_funding = 0.0;
    let mut general_fund_total = 0.0;

    for donor in donors {
        let net = compute_net(donor);
        let donor_allocations = build_allocation_lines(donor, net.net_amount);
        let general_fund_amount = compute_general_fund(donor, net.net_amount);
        let allocated_amount: f64 = donor_allocations.iter().map(|line| line.amount).sum();

        allocations.extend(donor_allocations);
        donor_summaries.push(DonorAllocationSummary {
            donor_id: donor.id.clone(),
            donor_name: donor.name.clone(),
            donor_type: donor.donor_type,
            contribution_amount: donor.contribution_amount,
            admin_percent: net.admin_percent,
            admin_amount: net.admin_amount,
            net_amount: net.net_amount,
            allocated_amount,
            general_fund_amount,
        });

        total_contributions += donor.contribution_amount;
        total_admin_cost += net.admin_amount;
        total_net_funding += net.net_amount;
        general_fund_total += general_fund_amount;
    }

    let total_allocated: f64 = allocations.iter().map(|line| line.amount).sum();
    let geography_allocations = aggregate_by_geography(programs, &allocations);
    let monthly_burn = compute_monthly_burn(employees, operational_overhead);
    let total_monthly_funding = total_net_funding / 12.0;
    let runway_months = compute_runway_months(total_monthly_funding, monthly_burn);

    let donor_scores = rank_donors(donors);
    let donor_runways = project_donor_runways(donors, &donor_summaries, monthly_burn, today);
    let allocation_strategies = generate_strategies(
        &donor_scores,
        SimulationTotals {
            total_admin_cost,
            runway_months,
        },
    );

    debug!(
        "Simulated {} donors, {} employees: net {:.2}, burn {:.2}, runway {:.2} months",
        donors.len(),
        employees.len(),
        total_net_funding,
        monthly_burn,
        runway_months
    );

    SimulationResult {
        total_contributions,
        total_admin_cost,
        total_net_funding,
        total_allocated,
        general_fund_total,
        allocations,
        donor_summaries,
        geography_allocations,
        monthly_burn,
        runway_months,
        donor_scores,
        donor_runways,
        allocation_strategies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_utils::{
        assert_close, create_test_donor, create_test_employee, create_test_programs, test_date,
        with_preferences,
    };
    use shared::{DonorType, Geography, RunwayStatus};

    fn create_test_service() -> SimulationService {
        SimulationService::new()
    }

    fn sample_donors() -> Vec<Donor> {
        let mut aurora = with_preferences(
            create_test_donor("aurora", DonorType::International, 2_500_000.0),
            &[("dsp", 50.0), ("mrs", 30.0), ("cd", 20.0)],
        );
        aurora.admin_overhead_percent = 18.0;
        aurora.fcra_approved = true;

        let saras = with_preferences(
            create_test_donor("saras", DonorType::National, 1_200_000.0),
            &[("dsp", 60.0), ("mrs", 20.0)],
        );
        let mehra = with_preferences(
            create_test_donor("mehra", DonorType::Hni, 800_000.0),
            &[("dsp", 70.0)],
        );

        vec![aurora, saras, mehra]
    }

    #[test]
    fn test_single_donor_end_to_end() {
        let donor = with_preferences(
            create_test_donor("aurora", DonorType::International, 1_000_000.0),
            &[("dsp", 50.0)],
        );

        let result = run_simulation(&[donor], &create_test_programs(), &[], 250_000.0, test_date());

        assert_close(result.total_contributions, 1_000_000.0);
        assert_close(result.total_admin_cost, 180_000.0);
        assert_close(result.total_net_funding, 820_000.0);
        assert_close(result.total_allocated, 410_000.0);
        assert_close(result.general_fund_total, 410_000.0);
        assert_eq!(result.allocations.len(), 1);
        assert_close(result.allocations[0].amount, 410_000.0);

        let summary = &result.donor_summaries[0];
        assert_close(summary.admin_percent, 0.18);
        assert_close(summary.allocated_amount, 410_000.0);
        assert_close(summary.general_fund_amount, 410_000.0);

        assert_eq!(result.geography_allocations.len(), 1);
        assert_eq!(result.geography_allocations[0].geography, Geography::DelhiNcr);
    }

    #[test]
    fn test_burn_and_runway_from_employees() {
        let employees = vec![
            create_test_employee("e1", 50_000.0),
            create_test_employee("e2", 40_000.0),
        ];
        let donor = create_test_donor("saras", DonorType::National, 12_000_000.0);

        let result = run_simulation(&[donor], &create_test_programs(), &employees, 250_000.0, test_date());

        assert_close(result.monthly_burn, 359_800.0);
        // net 10,560,000 / 12 = 880,000 a month against 359,800 burn
        assert_close(result.runway_months, 880_000.0 / 359_800.0);
        assert_close(result.donor_runways[0].runway_months, 10_560_000.0 / 359_800.0);
        assert_eq!(result.donor_runways[0].status, RunwayStatus::Healthy);
    }

    #[test]
    fn test_summaries_follow_donor_order_and_conserve_funds() {
        let donors = sample_donors();
        let result = run_simulation(&donors, &create_test_programs(), &[], 250_000.0, test_date());

        let ids: Vec<&str> = result.donor_summaries.iter().map(|s| s.donor_id.as_str()).collect();
        assert_eq!(ids, vec!["aurora", "saras", "mehra"]);

        for summary in &result.donor_summaries {
            assert_close(summary.admin_amount + summary.net_amount, summary.contribution_amount);
            assert_close(summary.allocated_amount + summary.general_fund_amount, summary.net_amount);
        }

        let geography_total: f64 = result.geography_allocations.iter().map(|g| g.amount).sum();
        assert_close(geography_total, result.total_allocated);
        assert_close(
            result.total_allocated + result.general_fund_total,
            result.total_net_funding,
        );
    }

    #[test]
    fn test_scores_runways_and_strategies_are_populated() {
        let donors = sample_donors();
        let employees = vec![create_test_employee("e1", 60_000.0)];
        let result = run_simulation(&donors, &create_test_programs(), &employees, 250_000.0, test_date());

        assert_eq!(result.donor_scores.len(), 3);
        let rankings: Vec<usize> = result.donor_scores.iter().map(|s| s.ranking).collect();
        assert_eq!(rankings, vec![1, 2, 3]);

        assert_eq!(result.donor_runways.len(), 3);
        assert!(result
            .donor_runways
            .windows(2)
            .all(|w| w[0].runway_months >= w[1].runway_months));
        assert_eq!(result.donor_runways[0].donor_id, "aurora");

        assert_eq!(result.allocation_strategies.len(), 3);
        assert_close(result.allocation_strategies[0].expected_admin_cost, result.total_admin_cost);
        assert_close(result.allocation_strategies[0].expected_runway, result.runway_months);
    }

    #[test]
    fn test_no_employees_and_no_overhead_gives_zero_runway() {
        let result = run_simulation(&sample_donors(), &create_test_programs(), &[], 0.0, test_date());

        assert_eq!(result.monthly_burn, 0.0);
        assert_eq!(result.runway_months, 0.0);
        assert!(result.donor_runways.iter().all(|r| r.runway_months == 0.0));
    }

    #[test]
    fn test_empty_inputs() {
        let result = run_simulation(&[], &[], &[], 250_000.0, test_date());

        assert_eq!(result.total_contributions, 0.0);
        assert!(result.allocations.is_empty());
        assert!(result.geography_allocations.is_empty());
        assert_eq!(result.monthly_burn, 250_000.0);
        assert_eq!(result.runway_months, 0.0);
        assert_eq!(result.allocation_strategies.len(), 3);
    }

    #[test]
    fn test_identical_inputs_identical_outputs() {
        let donors = sample_donors();
        let employees = vec![create_test_employee("e1", 45_000.0)];
        let programs = create_test_programs();

        let first = run_simulation(&donors, &programs, &employees, 250_000.0, test_date());
        let second = run_simulation(&donors, &programs, &employees, 250_000.0, test_date());

        assert_eq!(first, second);
    }

    #[test]
    fn test_service_uses_configured_overhead_by_default() {
        let service = create_test_service();
        let result = service.run_simulation_as_of(&[], &[], &[], None, test_date());
        assert_eq!(result.monthly_burn, OPERATIONAL_OVERHEAD);

        let service = SimulationService::with_config(SimulationConfig {
            operational_overhead: 100_000.0,
        });
        let result = service.run_simulation_as_of(&[], &[], &[], None, test_date());
        assert_eq!(result.monthly_burn, 100_000.0);

        let result = service.run_simulation_as_of(&[], &[], &[], Some(5_000.0), test_date());
        assert_eq!(result.monthly_burn, 5_000.0);
    }
}
