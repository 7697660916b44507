//! Rolls allocation lines up to geography totals.

use shared::{AllocationLine, Geography, GeographyAllocation, Program};
use std::collections::HashMap;
use tracing::debug;

/// Sum allocation amounts by the geography of each line's program.
///
/// Lines pointing at a program that is not in `programs` are dropped; donor
/// preference edits can run ahead of the program list. Geographies come out in
/// the order they are first reached.
pub fn aggregate_by_geography(
    programs: &[Program],
    allocations: &[AllocationLine],
) -> Vec<GeographyAllocation> {
    let geography_by_program: HashMap<&str, Geography> = programs
        .iter()
        .map(|program| (program.id.as_str(), program.geography))
        .collect();

    let mut totals: Vec<GeographyAllocation> = Vec::new();

    for allocation in allocations {
        let Some(geography) = geography_by_program.get(allocation.program_id.as_str()) else {
            debug!(
                "Dropping allocation from donor {} to unknown program {}",
                allocation.donor_id, allocation.program_id
            );
            continue;
        };

        match totals.iter_mut().find(|total| total.geography == *geography) {
            Some(total) => total.amount += allocation.amount,
            None => totals.push(GeographyAllocation {
                geography: *geography,
                amount: allocation.amount,
            }),
        }
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_utils::{assert_close, create_test_programs};

    fn line(donor_id: &str, program_id: &str, amount: f64) -> AllocationLine {
        AllocationLine {
            donor_id: donor_id.to_string(),
            program_id: program_id.to_string(),
            weight: 0.0,
            amount,
        }
    }

    #[test]
    fn test_groups_by_program_geography() {
        let programs = create_test_programs();
        let lines = vec![
            line("a", "mrs", 100.0),
            line("a", "dsp", 50.0),
            line("b", "mrs", 25.0),
            line("b", "cd", 10.0),
        ];

        let totals = aggregate_by_geography(&programs, &lines);

        assert_eq!(totals.len(), 3);
        assert_eq!(totals[0].geography, Geography::UttarPradesh);
        assert_close(totals[0].amount, 125.0);
        assert_eq!(totals[1].geography, Geography::DelhiNcr);
        assert_close(totals[1].amount, 50.0);
        assert_eq!(totals[2].geography, Geography::Bihar);
        assert_close(totals[2].amount, 10.0);
    }

    #[test]
    fn test_unknown_program_is_dropped() {
        let programs = create_test_programs();
        let lines = vec![line("a", "dsp", 40.0), line("a", "retired-program", 60.0)];

        let totals = aggregate_by_geography(&programs, &lines);

        assert_eq!(totals.len(), 1);
        assert_close(totals[0].amount, 40.0);
    }

    #[test]
    fn test_geography_total_matches_allocated_when_all_programs_known() {
        let programs = create_test_programs();
        let lines = vec![
            line("a", "dsp", 1_025_000.0),
            line("a", "mrs", 615_000.0),
            line("a", "cd", 410_000.0),
            line("b", "dsp", 633_600.0),
            line("b", "mrs", 211_200.0),
        ];
        let allocated: f64 = lines.iter().map(|l| l.amount).sum();

        let geography_total: f64 = aggregate_by_geography(&programs, &lines)
            .iter()
            .map(|g| g.amount)
            .sum();

        assert_close(geography_total, allocated);
    }

    #[test]
    fn test_no_lines_no_geographies() {
        assert!(aggregate_by_geography(&create_test_programs(), &[]).is_empty());
    }
}
