//! Donor scoring and ranking.
//!
//! Each donor gets four component scores:
//!
//! - **admin**: 100 at a 0% admin rate, 0 at 25% or more, linear in between
//! - **preference**: the donor's total preference weight (coverage of its funds)
//! - **balance**: contribution size against a 3-crore reference, capped at 100
//! - **FCRA bonus**: 10 for FCRA-approved donors
//!
//! The total is a weighted sum (0.35 / 0.30 / 0.25 / 0.10) of the unrounded
//! components, rounded to a whole score. A score depends on the donor alone;
//! only the ranking looks at the whole set.

use shared::{Donor, DonorScore};
use std::cmp::Ordering;

use crate::domain::allocation::total_preference_weight;
use crate::domain::donor_economics::resolve_admin_rate;

/// Admin rate at which the admin score reaches zero
pub const ADMIN_RATE_CEILING: f64 = 0.25;
/// Contribution that earns a full balance score (3 crore)
pub const BALANCE_REFERENCE_CONTRIBUTION: f64 = 30_000_000.0;
pub const FCRA_BONUS_POINTS: f64 = 10.0;

pub const ADMIN_WEIGHT: f64 = 0.35;
pub const PREFERENCE_WEIGHT: f64 = 0.30;
pub const BALANCE_WEIGHT: f64 = 0.25;
pub const FCRA_WEIGHT: f64 = 0.10;

pub fn score_donor(donor: &Donor) -> DonorScore {
    let admin_rate = resolve_admin_rate(donor);
    let admin_score =
        ((ADMIN_RATE_CEILING - admin_rate) / ADMIN_RATE_CEILING * 100.0).clamp(0.0, 100.0);

    let preference_score = total_preference_weight(donor);

    let balance_score =
        (donor.contribution_amount / BALANCE_REFERENCE_CONTRIBUTION * 100.0).min(100.0);

    let fcra_bonus = if donor.fcra_approved {
        FCRA_BONUS_POINTS
    } else {
        0.0
    };

    let total_score = admin_score * ADMIN_WEIGHT
        + preference_score * PREFERENCE_WEIGHT
        + balance_score * BALANCE_WEIGHT
        + fcra_bonus * FCRA_WEIGHT;

    DonorScore {
        donor_id: donor.id.clone(),
        donor_name: donor.name.clone(),
        admin_score: admin_score.round(),
        preference_score: preference_score.round(),
        balance_score: balance_score.round(),
        fcra_bonus,
        total_score: total_score.round(),
        ranking: 0,
    }
}

/// Score every donor and rank them by total score, highest first.
///
/// The sort is stable, so donors with equal totals keep their input order.
pub fn rank_donors(donors: &[Donor]) -> Vec<DonorScore> {
    let mut scores: Vec<DonorScore> = donors.iter().map(score_donor).collect();
    sort_descending_by(&mut scores, |score| score.total_score);

    for (index, score) in scores.iter_mut().enumerate() {
        score.ranking = index + 1;
    }

    scores
}

/// Stable descending sort on one numeric field
pub(crate) fn sort_descending_by<T>(items: &mut [T], key: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
}
