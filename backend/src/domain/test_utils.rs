//! Builders for domain tests.

use chrono::NaiveDate;
use shared::{City, Donor, DonorPreference, DonorType, Employee, Geography, Program};

pub const EPSILON: f64 = 1e-6;

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

pub fn create_test_donor(id: &str, donor_type: DonorType, contribution_amount: f64) -> Donor {
    Donor {
        id: id.to_string(),
        name: format!("Donor {}", id),
        donor_type,
        contribution_amount,
        admin_overhead_percent: 0.0,
        fcra_approved: false,
        preferences: Vec::new(),
    }
}

pub fn with_preferences(mut donor: Donor, preferences: &[(&str, f64)]) -> Donor {
    donor.preferences = preferences
        .iter()
        .map(|(program_id, weight)| DonorPreference {
            program_id: program_id.to_string(),
            weight: *weight,
        })
        .collect();
    donor
}

/// Employee with the 12% PF / 10% TDS deductions already derived
pub fn create_test_employee(id: &str, monthly_salary: f64) -> Employee {
    Employee {
        id: id.to_string(),
        name: format!("Employee {}", id),
        role: "Field Coordinator".to_string(),
        joining_date: NaiveDate::from_ymd_opt(2022, 4, 1).unwrap(),
        monthly_salary,
        pf_contribution: monthly_salary * 0.12,
        tds_deduction: monthly_salary * 0.10,
        geography: Geography::DelhiNcr,
        city: City::Delhi,
        program_id: "dsp".to_string(),
        photo_url: String::new(),
        planned_increment: 0.0,
    }
}

/// The three programs the dashboard ships with
pub fn create_test_programs() -> Vec<Program> {
    vec![
        Program {
            id: "dsp".to_string(),
            name: "DSP".to_string(),
            description: "Digital Skills Program".to_string(),
            geography: Geography::DelhiNcr,
            cities: vec![City::Delhi],
        },
        Program {
            id: "mrs".to_string(),
            name: "MRS".to_string(),
            description: "Maternal and Reproductive Support".to_string(),
            geography: Geography::UttarPradesh,
            cities: vec![City::Lucknow, City::Prayagraj],
        },
        Program {
            id: "cd".to_string(),
            name: "C&D".to_string(),
            description: "Community Development".to_string(),
            geography: Geography::Bihar,
            cities: vec![City::Gaya, City::Muzaffarpur],
        },
    ]
}

pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}
