use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Region a program (and the employees working on it) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Geography {
    #[serde(rename = "Delhi NCR")]
    DelhiNcr,
    #[serde(rename = "Uttar Pradesh")]
    UttarPradesh,
    #[serde(rename = "Bihar")]
    Bihar,
}

impl fmt::Display for Geography {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Geography::DelhiNcr => write!(f, "Delhi NCR"),
            Geography::UttarPradesh => write!(f, "Uttar Pradesh"),
            Geography::Bihar => write!(f, "Bihar"),
        }
    }
}

/// City where a program operates. Every city sits in exactly one geography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    Delhi,
    Prayagraj,
    Banaras,
    Lucknow,
    Gaya,
    Muzaffarpur,
}

impl City {
    pub fn geography(&self) -> Geography {
        match self {
            City::Delhi => Geography::DelhiNcr,
            City::Prayagraj | City::Banaras | City::Lucknow => Geography::UttarPradesh,
            City::Gaya | City::Muzaffarpur => Geography::Bihar,
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Donor category; each type implies a baseline admin rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DonorType {
    International,
    #[serde(alias = "India")]
    National,
    #[serde(rename = "CSR")]
    Csr,
    #[serde(rename = "HNI")]
    Hni,
}

impl fmt::Display for DonorType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DonorType::International => write!(f, "International"),
            DonorType::National => write!(f, "National"),
            DonorType::Csr => write!(f, "CSR"),
            DonorType::Hni => write!(f, "HNI"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: String,
    pub name: String,
    pub description: String,
    pub geography: Geography,
    pub cities: Vec<City>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub role: String,
    pub joining_date: NaiveDate,
    pub monthly_salary: f64,
    /// Provident fund, 12% of monthly salary
    pub pf_contribution: f64,
    /// Tax deducted at source, 10% of monthly salary
    pub tds_deduction: f64,
    pub geography: Geography,
    pub city: City,
    pub program_id: String,
    pub photo_url: String,
    /// Percentage increment already folded into `monthly_salary` (0 when none)
    #[serde(default)]
    pub planned_increment: f64,
}

/// Share of a donor's net amount earmarked for one program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorPreference {
    pub program_id: String,
    /// Percentage points, 0-100
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donor {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub donor_type: DonorType,
    pub contribution_amount: f64,
    /// Explicit admin percentage; 0 means "use the type baseline"
    pub admin_overhead_percent: f64,
    pub fcra_approved: bool,
    pub preferences: Vec<DonorPreference>,
}

/// Baseline snapshot of everything the engine consumes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub programs: Vec<Program>,
    pub donors: Vec<Donor>,
    pub employees: Vec<Employee>,
}

// ── Derived simulation records ────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationLine {
    pub donor_id: String,
    pub program_id: String,
    pub weight: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorAllocationSummary {
    pub donor_id: String,
    pub donor_name: String,
    pub donor_type: DonorType,
    pub contribution_amount: f64,
    /// Resolved admin rate as a fraction (0.18 = 18%)
    pub admin_percent: f64,
    pub admin_amount: f64,
    pub net_amount: f64,
    pub allocated_amount: f64,
    pub general_fund_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeographyAllocation {
    pub geography: Geography,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorScore {
    pub donor_id: String,
    pub donor_name: String,
    /// 0-100, higher means lower admin overhead
    pub admin_score: f64,
    /// Sum of preference weights
    pub preference_score: f64,
    /// 0-100, contribution size against a fixed ceiling
    pub balance_score: f64,
    pub fcra_bonus: f64,
    pub total_score: f64,
    /// 1-based position after sorting by total score
    pub ranking: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunwayStatus {
    Healthy,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorRunway {
    pub donor_id: String,
    pub donor_name: String,
    pub available_funds: f64,
    pub monthly_allocation: f64,
    pub runway_months: f64,
    pub depletion_date: NaiveDate,
    pub status: RunwayStatus,
}

/// Where a donor's admin rate sits relative to its type baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminWatchStatus {
    /// More than 10% below the baseline
    Safe,
    Warning,
    /// More than 10% above the baseline
    Critical,
}

/// One donor's admin rate compared with the baseline for its type, in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminWatchEntry {
    pub donor_id: String,
    pub donor_name: String,
    pub donor_type: DonorType,
    pub baseline_percent: f64,
    pub actual_percent: f64,
    /// `actual_percent - baseline_percent`
    pub difference: f64,
    pub percent_of_baseline: f64,
    pub status: AdminWatchStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationStrategy {
    pub scenario_name: String,
    pub description: String,
    /// Donor IDs in the order they should be drawn on
    pub donor_order: Vec<String>,
    pub expected_admin_cost: f64,
    pub expected_runway: f64,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub total_contributions: f64,
    pub total_admin_cost: f64,
    pub total_net_funding: f64,
    pub total_allocated: f64,
    pub general_fund_total: f64,
    pub allocations: Vec<AllocationLine>,
    pub donor_summaries: Vec<DonorAllocationSummary>,
    pub geography_allocations: Vec<GeographyAllocation>,
    pub monthly_burn: f64,
    pub runway_months: f64,
    pub donor_scores: Vec<DonorScore>,
    pub donor_runways: Vec<DonorRunway>,
    pub allocation_strategies: Vec<AllocationStrategy>,
}

// ── Overrides ─────────────────────────────────────────────────────

/// Profile changes layered over a base employee. Unset fields keep the base value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EmployeeOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Moving an employee to a city also moves them to that city's geography
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<City>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_id: Option<String>,
}

/// Every user-entered what-if override, keyed by entity ID
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OverrideSet {
    /// employee_id -> increment percent (0-100)
    #[serde(default)]
    pub increments: BTreeMap<String, f64>,
    #[serde(default)]
    pub employee_overrides: BTreeMap<String, EmployeeOverride>,
    /// donor_id -> replacement preference list
    #[serde(default)]
    pub donor_preferences: BTreeMap<String, Vec<DonorPreference>>,
}

// ── Scenarios ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPreset {
    pub id: String,
    pub name: String,
    pub description: String,
    pub impact: String,
    pub donor_multiplier: f64,
    pub salary_multiplier: f64,
    pub overhead_multiplier: f64,
}

/// What-if knobs applied on top of a preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAdjustment {
    pub scenario_id: String,
    #[serde(default = "default_multiplier")]
    pub salary_multiplier: f64,
    #[serde(default = "default_multiplier")]
    pub donor_multiplier: f64,
    /// Monthly operational overhead before the preset multiplier; None uses the configured default
    #[serde(default)]
    pub manual_overhead: Option<f64>,
}

fn default_multiplier() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IncrementSummary {
    pub employees_with_increments: usize,
    pub total_employees: usize,
    pub average_increment: f64,
    /// Extra yearly salary plus PF on that extra
    pub additional_annual_cost: f64,
}

// ── REST requests/responses ───────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSimulationRequest {
    pub donors: Vec<Donor>,
    pub programs: Vec<Program>,
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub operational_overhead: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSimulationResponse {
    pub scenario: ScenarioPreset,
    pub baseline: SimulationResult,
    pub simulation: SimulationResult,
    pub increment_summary: IncrementSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetIncrementRequest {
    pub increment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetDonorPreferencesRequest {
    pub preferences: Vec<DonorPreference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideUpdateResponse {
    pub overrides: OverrideSet,
    pub success_message: String,
}
