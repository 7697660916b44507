//! Allocation strategy generator.
//!
//! Produces three named orderings of the scored donors. The expected admin
//! cost and runway for the conservative and preference-strict strategies are
//! flat heuristic adjustments of the simulated totals; they are guidance
//! figures, not the result of re-running the allocation under each ordering.

use shared::{AllocationStrategy, DonorScore, RiskLevel};

use crate::domain::scoring::sort_descending_by;

pub const OPTIMAL: &str = "Optimal";
pub const CONSERVATIVE: &str = "Conservative";
pub const PREFERENCE_STRICT: &str = "Preference-Strict";

/// Estimated admin saving when drawing on low-overhead donors first
pub const CONSERVATIVE_ADMIN_REDUCTION: f64 = 0.10;
pub const CONSERVATIVE_RUNWAY_GAIN: f64 = 0.15;
pub const PREFERENCE_ADMIN_MULTIPLIER: f64 = 1.05;
pub const PREFERENCE_RUNWAY_MULTIPLIER: f64 = 0.95;

/// Admin score above which the top donor counts as admin-efficient
const EXCELLENT_ADMIN_SCORE: f64 = 70.0;
/// Admin score below which preference-first ordering is high risk
const PREFERENCE_RISK_ADMIN_SCORE: f64 = 50.0;

/// Simulation totals the strategies are derived from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationTotals {
    pub total_admin_cost: f64,
    pub runway_months: f64,
}

pub fn generate_strategies(
    donor_scores: &[DonorScore],
    totals: SimulationTotals,
) -> Vec<AllocationStrategy> {
    vec![
        optimal_strategy(donor_scores, totals),
        conservative_strategy(donor_scores, totals),
        preference_strict_strategy(donor_scores, totals),
    ]
}

fn sorted_by(donor_scores: &[DonorScore], key: impl Fn(&DonorScore) -> f64) -> Vec<DonorScore> {
    let mut sorted = donor_scores.to_vec();
    sort_descending_by(&mut sorted, key);
    sorted
}

fn donor_order(sorted: &[DonorScore]) -> Vec<String> {
    sorted.iter().map(|score| score.donor_id.clone()).collect()
}

fn optimal_strategy(donor_scores: &[DonorScore], totals: SimulationTotals) -> AllocationStrategy {
    let sorted = sorted_by(donor_scores, |score| score.total_score);

    let mut recommendations = Vec::new();
    match sorted.first() {
        Some(top) => recommendations.push(format!(
            "Use {} first (highest overall score: {}/100)",
            top.donor_name, top.total_score
        )),
        None => recommendations.push("No donors available to draw on".to_string()),
    }
    recommendations.push("Prioritize donors with admin rates below 15%".to_string());
    recommendations.push("Maintain at least 3 months reserve from general fund".to_string());
    match sorted.first() {
        Some(top) if top.admin_score > EXCELLENT_ADMIN_SCORE => recommendations.push(format!(
            "{} offers excellent admin efficiency",
            top.donor_name
        )),
        _ => recommendations.push("Consider negotiating lower admin rates with top donors".to_string()),
    }

    AllocationStrategy {
        scenario_name: OPTIMAL.to_string(),
        description: "Balanced approach optimizing cost, preferences, and flexibility".to_string(),
        donor_order: donor_order(&sorted),
        expected_admin_cost: totals.total_admin_cost,
        expected_runway: totals.runway_months,
        risk_level: RiskLevel::Low,
        recommendations,
    }
}

fn conservative_strategy(
    donor_scores: &[DonorScore],
    totals: SimulationTotals,
) -> AllocationStrategy {
    let sorted = sorted_by(donor_scores, |score| score.admin_score);
    let admin_reduction = totals.total_admin_cost * CONSERVATIVE_ADMIN_REDUCTION;
    let runway_gain = totals.runway_months * CONSERVATIVE_RUNWAY_GAIN;

    let mut recommendations = Vec::new();
    if let Some(top) = sorted.first() {
        recommendations.push(format!("Start with {} (lowest admin overhead)", top.donor_name));
    }
    recommendations.push(format!("Could save approx. {:.0} in admin costs", admin_reduction));
    recommendations.push(format!("Extend runway by ~{:.1} months", runway_gain));
    recommendations.push("Review all donors with admin rates above 15%".to_string());

    AllocationStrategy {
        scenario_name: CONSERVATIVE.to_string(),
        description: "Minimize admin overhead and maximize runway".to_string(),
        donor_order: donor_order(&sorted),
        expected_admin_cost: totals.total_admin_cost - admin_reduction,
        expected_runway: totals.runway_months + runway_gain,
        risk_level: RiskLevel::Medium,
        recommendations,
    }
}

fn preference_strict_strategy(
    donor_scores: &[DonorScore],
    totals: SimulationTotals,
) -> AllocationStrategy {
    let sorted = sorted_by(donor_scores, |score| score.preference_score);
    let risk_level = match sorted.first() {
        Some(top) if top.admin_score < PREFERENCE_RISK_ADMIN_SCORE => RiskLevel::High,
        _ => RiskLevel::Medium,
    };

    let mut recommendations = Vec::new();
    if let Some(top) = sorted.first() {
        recommendations.push(format!(
            "Prioritize {} (best preference alignment)",
            top.donor_name
        ));
    }
    recommendations.push("Ensure all program preferences are met".to_string());
    recommendations.push("May incur higher admin costs for better donor relations".to_string());
    recommendations.push(match risk_level {
        RiskLevel::High => "Warning: This approach may reduce cost efficiency".to_string(),
        _ => "Maintains good balance between preferences and costs".to_string(),
    });

    AllocationStrategy {
        scenario_name: PREFERENCE_STRICT.to_string(),
        description: "Strictly honor all donor program preferences".to_string(),
        donor_order: donor_order(&sorted),
        expected_admin_cost: totals.total_admin_cost * PREFERENCE_ADMIN_MULTIPLIER,
        expected_runway: totals.runway_months * PREFERENCE_RUNWAY_MULTIPLIER,
        risk_level,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_utils::assert_close;

    fn score(id: &str, admin: f64, preference: f64, total: f64) -> DonorScore {
        DonorScore {
            donor_id: id.to_string(),
            donor_name: format!("Donor {}", id),
            admin_score: admin,
            preference_score: preference,
            balance_score: 0.0,
            fcra_bonus: 0.0,
            total_score: total,
            ranking: 0,
        }
    }

    fn totals() -> SimulationTotals {
        SimulationTotals {
            total_admin_cost: 1_000_000.0,
            runway_months: 10.0,
        }
    }

    fn sample_scores() -> Vec<DonorScore> {
        vec![
            score("a", 28.0, 100.0, 55.0),
            score("b", 80.0, 40.0, 60.0),
            score("c", 52.0, 70.0, 45.0),
        ]
    }

    #[test]
    fn test_three_strategies_in_fixed_order() {
        let strategies = generate_strategies(&sample_scores(), totals());
        let names: Vec<&str> = strategies.iter().map(|s| s.scenario_name.as_str()).collect();
        assert_eq!(names, vec![OPTIMAL, CONSERVATIVE, PREFERENCE_STRICT]);
    }

    #[test]
    fn test_optimal_uses_actual_totals_and_total_score_order() {
        let optimal = &generate_strategies(&sample_scores(), totals())[0];

        assert_eq!(optimal.donor_order, vec!["b", "a", "c"]);
        assert_eq!(optimal.expected_admin_cost, 1_000_000.0);
        assert_eq!(optimal.expected_runway, 10.0);
        assert_eq!(optimal.risk_level, RiskLevel::Low);
        assert_eq!(
            optimal.recommendations[0],
            "Use Donor b first (highest overall score: 60/100)"
        );
        assert_eq!(optimal.recommendations[3], "Donor b offers excellent admin efficiency");
    }

    #[test]
    fn test_conservative_adjusts_totals() {
        let conservative = &generate_strategies(&sample_scores(), totals())[1];

        assert_eq!(conservative.donor_order, vec!["b", "c", "a"]);
        assert_close(conservative.expected_admin_cost, 900_000.0);
        assert_close(conservative.expected_runway, 11.5);
        assert_eq!(conservative.risk_level, RiskLevel::Medium);
        assert!(conservative
            .recommendations
            .contains(&"Could save approx. 100000 in admin costs".to_string()));
        assert!(conservative
            .recommendations
            .contains(&"Extend runway by ~1.5 months".to_string()));
    }

    #[test]
    fn test_preference_strict_is_high_risk_when_top_donor_is_costly() {
        let strict = &generate_strategies(&sample_scores(), totals())[2];

        assert_eq!(strict.donor_order, vec!["a", "c", "b"]);
        assert_close(strict.expected_admin_cost, 1_050_000.0);
        assert_close(strict.expected_runway, 9.5);
        assert_eq!(strict.risk_level, RiskLevel::High);
        assert!(strict.recommendations[3].starts_with("Warning"));
    }

    #[test]
    fn test_preference_strict_is_medium_risk_when_top_donor_is_efficient() {
        let scores = vec![score("a", 50.0, 100.0, 55.0), score("b", 10.0, 40.0, 60.0)];
        let strict = &generate_strategies(&scores, totals())[2];
        assert_eq!(strict.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_ties_keep_incoming_order() {
        let scores = vec![score("x", 40.0, 50.0, 30.0), score("y", 40.0, 50.0, 30.0)];
        for strategy in generate_strategies(&scores, totals()) {
            assert_eq!(strategy.donor_order, vec!["x", "y"]);
        }
    }

    #[test]
    fn test_no_donors_still_yields_three_strategies() {
        let strategies = generate_strategies(&[], totals());

        assert_eq!(strategies.len(), 3);
        assert!(strategies.iter().all(|s| s.donor_order.is_empty()));
        assert_eq!(strategies[2].risk_level, RiskLevel::Medium);
        assert_eq!(strategies[0].recommendations[0], "No donors available to draw on");
    }
}
