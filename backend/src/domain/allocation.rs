//! Allocation calculator: splits a donor's net amount across its program
//! preferences, leaving the unclaimed remainder in the general fund.
//!
//! Total weight above 100 is not rejected here. Lines are still produced for
//! every preference (so the lines can add up to more than the net amount) and
//! the general fund clamps to zero.

use shared::{AllocationLine, Donor};

/// Sum of the donor's preference weights, in percentage points
pub fn total_preference_weight(donor: &Donor) -> f64 {
    donor.preferences.iter().map(|p| p.weight).sum()
}

/// One line per preference, in preference order
pub fn build_allocation_lines(donor: &Donor, net_amount: f64) -> Vec<AllocationLine> {
    donor
        .preferences
        .iter()
        .map(|preference| AllocationLine {
            donor_id: donor.id.clone(),
            program_id: preference.program_id.clone(),
            weight: preference.weight,
            amount: net_amount * (preference.weight / 100.0),
        })
        .collect()
}

/// Unrestricted share of the net amount
pub fn compute_general_fund(donor: &Donor, net_amount: f64) -> f64 {
    let remainder = (100.0 - total_preference_weight(donor)).max(0.0);
    net_amount * (remainder / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::donor_economics::compute_net;
    use crate::domain::test_utils::{assert_close, create_test_donor, with_preferences};
    use shared::DonorType;

    #[test]
    fn test_single_preference_splits_net_in_half() {
        let donor = with_preferences(
            create_test_donor("aurora", DonorType::International, 1_000_000.0),
            &[("dsp", 50.0)],
        );
        let net = compute_net(&donor).net_amount;

        let lines = build_allocation_lines(&donor, net);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].donor_id, "aurora");
        assert_eq!(lines[0].program_id, "dsp");
        assert_close(lines[0].amount, 410_000.0);
        assert_close(compute_general_fund(&donor, net), 410_000.0);
    }

    #[test]
    fn test_lines_keep_preference_order() {
        let donor = with_preferences(
            create_test_donor("d", DonorType::Csr, 100.0),
            &[("mrs", 50.0), ("cd", 35.0), ("dsp", 5.0)],
        );
        let program_ids: Vec<_> = build_allocation_lines(&donor, 100.0)
            .into_iter()
            .map(|line| line.program_id)
            .collect();
        assert_eq!(program_ids, vec!["mrs", "cd", "dsp"]);
    }

    #[test]
    fn test_repeated_program_is_not_deduplicated() {
        let donor = with_preferences(
            create_test_donor("d", DonorType::Csr, 100.0),
            &[("dsp", 20.0), ("dsp", 30.0)],
        );
        let lines = build_allocation_lines(&donor, 1_000.0);
        assert_eq!(lines.len(), 2);
        assert_close(lines[0].amount + lines[1].amount, 500.0);
    }

    #[test]
    fn test_no_preferences_goes_entirely_to_general_fund() {
        let donor = create_test_donor("d", DonorType::Hni, 800_000.0);
        assert!(build_allocation_lines(&donor, 720_000.0).is_empty());
        assert_close(compute_general_fund(&donor, 720_000.0), 720_000.0);
    }

    #[test]
    fn test_over_allocated_donor_clamps_general_fund() {
        let donor = with_preferences(
            create_test_donor("d", DonorType::National, 100.0),
            &[("dsp", 80.0), ("mrs", 40.0)],
        );
        let allocated: f64 = build_allocation_lines(&donor, 1_000.0)
            .iter()
            .map(|line| line.amount)
            .sum();

        assert_close(allocated, 1_200.0);
        assert_eq!(compute_general_fund(&donor, 1_000.0), 0.0);
    }

    #[test]
    fn test_lines_plus_general_fund_equal_net() {
        let weight_sets: [&[(&str, f64)]; 4] = [
            &[],
            &[("dsp", 50.0), ("mrs", 30.0), ("cd", 20.0)],
            &[("dsp", 60.0), ("mrs", 20.0)],
            &[("cd", 33.3), ("mrs", 33.3), ("dsp", 33.3)],
        ];

        for weights in weight_sets {
            let donor = with_preferences(
                create_test_donor("d", DonorType::International, 2_500_000.0),
                weights,
            );
            let net = compute_net(&donor).net_amount;
            let allocated: f64 = build_allocation_lines(&donor, net)
                .iter()
                .map(|line| line.amount)
                .sum();
            assert_close(allocated + compute_general_fund(&donor, net), net);
        }
    }
}
