//! Per-donor runway projection.
//!
//! Answers "how long would this donor alone sustain the whole organization":
//! each donor's net funds are measured against the aggregate monthly burn, not
//! a donor-specific share of it.

use chrono::{Months, NaiveDate};
use shared::{Donor, DonorAllocationSummary, DonorRunway, RunwayStatus};

use crate::domain::payroll::compute_runway_months;
use crate::domain::scoring::sort_descending_by;

/// Months in the amortization period used for `monthly_allocation`
pub const ALLOCATION_PERIOD_MONTHS: f64 = 12.0;
pub const HEALTHY_RUNWAY_MONTHS: f64 = 12.0;
pub const WARNING_RUNWAY_MONTHS: f64 = 6.0;

/// healthy above 12 months, warning above 6, critical otherwise
pub fn classify_runway(runway_months: f64) -> RunwayStatus {
    if runway_months > HEALTHY_RUNWAY_MONTHS {
        RunwayStatus::Healthy
    } else if runway_months > WARNING_RUNWAY_MONTHS {
        RunwayStatus::Warning
    } else {
        RunwayStatus::Critical
    }
}

/// `today` moved by the whole months of `runway_months`.
///
/// Month arithmetic clamps to the last day of shorter months (Jan 31 + 1 month
/// is Feb 28/29). The dashboard this replaces used JavaScript `Date.setMonth`
/// on a UTC date, which rolls the overflow into the next month instead
/// (Jan 31 + 1 month is Mar 3), so dates near month end can differ by a few
/// days. Dates beyond chrono's range saturate.
pub fn estimate_depletion_date(today: NaiveDate, runway_months: f64) -> NaiveDate {
    let whole_months = runway_months.floor();

    if whole_months >= 0.0 {
        let months = whole_months.min(u32::MAX as f64) as u32;
        today
            .checked_add_months(Months::new(months))
            .unwrap_or(NaiveDate::MAX)
    } else {
        let months = (-whole_months).min(u32::MAX as f64) as u32;
        today
            .checked_sub_months(Months::new(months))
            .unwrap_or(NaiveDate::MIN)
    }
}

pub fn compute_donor_runway(
    donor: &Donor,
    monthly_burn: f64,
    summary: &DonorAllocationSummary,
    today: NaiveDate,
) -> DonorRunway {
    let available_funds = summary.net_amount;
    let monthly_allocation = available_funds / ALLOCATION_PERIOD_MONTHS;
    let runway_months = compute_runway_months(available_funds, monthly_burn);

    DonorRunway {
        donor_id: donor.id.clone(),
        donor_name: donor.name.clone(),
        available_funds,
        monthly_allocation,
        runway_months,
        depletion_date: estimate_depletion_date(today, runway_months),
        status: classify_runway(runway_months),
    }
}

/// One runway per donor, longest runway first.
///
/// `summaries` must be index-aligned with `donors`.
pub fn project_donor_runways(
    donors: &[Donor],
    summaries: &[DonorAllocationSummary],
    monthly_burn: f64,
    today: NaiveDate,
) -> Vec<DonorRunway> {
    let mut runways: Vec<DonorRunway> = donors
        .iter()
        .zip(summaries)
        .map(|(donor, summary)| compute_donor_runway(donor, monthly_burn, summary, today))
        .collect();

    sort_descending_by(&mut runways, |runway| runway.runway_months);
    runways
}
