//! Donor economics: how much of a contribution survives admin overhead.
//!
//! Every donor type carries a baseline admin rate. A donor may carry its own
//! `admin_overhead_percent`; a positive value replaces the baseline, while zero
//! or a negative value falls back to it. The fallback is a policy, not an
//! error, so a donor can never accidentally end up with a zero admin rate.

use shared::{AdminWatchEntry, AdminWatchStatus, Donor, DonorType};

use crate::domain::scoring::sort_descending_by;

/// Relative distance from the baseline that still counts as "on baseline"
pub const ADMIN_WATCH_BAND: f64 = 0.10;

/// Baseline admin rate (fraction of the contribution) for a donor type
pub fn baseline_admin_rate(donor_type: DonorType) -> f64 {
    match donor_type {
        DonorType::International => 0.18,
        DonorType::National => 0.12,
        DonorType::Csr => 0.15,
        DonorType::Hni => 0.10,
    }
}

/// Admin rate that applies to this donor, as a fraction
pub fn resolve_admin_rate(donor: &Donor) -> f64 {
    if donor.admin_overhead_percent > 0.0 {
        donor.admin_overhead_percent / 100.0
    } else {
        baseline_admin_rate(donor.donor_type)
    }
}

/// Baseline admin rate for a donor type, in percent
pub fn baseline_admin_percent(donor_type: DonorType) -> f64 {
    baseline_admin_rate(donor_type) * 100.0
}

/// Compare an admin percentage with its baseline using a ±10% band
pub fn classify_admin_rate(actual_percent: f64, baseline_percent: f64) -> AdminWatchStatus {
    if actual_percent < baseline_percent * (1.0 - ADMIN_WATCH_BAND) {
        AdminWatchStatus::Safe
    } else if actual_percent > baseline_percent * (1.0 + ADMIN_WATCH_BAND) {
        AdminWatchStatus::Critical
    } else {
        AdminWatchStatus::Warning
    }
}

/// Every donor's effective admin rate against its type baseline, furthest
/// from the baseline first. Ties keep input order.
pub fn admin_watchlist(donors: &[Donor]) -> Vec<AdminWatchEntry> {
    let mut entries: Vec<AdminWatchEntry> = donors
        .iter()
        .map(|donor| {
            let baseline_percent = baseline_admin_percent(donor.donor_type);
            let actual_percent = resolve_admin_rate(donor) * 100.0;
            AdminWatchEntry {
                donor_id: donor.id.clone(),
                donor_name: donor.name.clone(),
                donor_type: donor.donor_type,
                baseline_percent,
                actual_percent,
                difference: actual_percent - baseline_percent,
                percent_of_baseline: actual_percent / baseline_percent * 100.0,
                status: classify_admin_rate(actual_percent, baseline_percent),
            }
        })
        .collect();

    sort_descending_by(&mut entries, |entry| entry.difference.abs());
    entries
}

/// Admin deduction and the remaining net amount for one donor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DonorNet {
    pub admin_percent: f64,
    pub admin_amount: f64,
    pub net_amount: f64,
}

pub fn compute_net(donor: &Donor) -> DonorNet {
    let admin_percent = resolve_admin_rate(donor);
    let admin_amount = donor.contribution_amount * admin_percent;
    // Net is the remainder, never an independent product
    let net_amount = donor.contribution_amount - admin_amount;

    DonorNet {
        admin_percent,
        admin_amount,
        net_amount,
    }
}
