//! Payroll and burn: what the organization spends each month and how many
//! months a funding figure covers it.

use shared::Employee;

/// Provident fund share of monthly salary
pub const PF_RATE: f64 = 0.12;
/// Tax deducted at source share of monthly salary
pub const TDS_RATE: f64 = 0.10;

/// Total recurring monthly cost: salary plus statutory deductions for every
/// employee, plus a flat operational overhead.
pub fn compute_monthly_burn(employees: &[Employee], operational_overhead: f64) -> f64 {
    let payroll: f64 = employees
        .iter()
        .map(|employee| {
            employee.monthly_salary + employee.pf_contribution + employee.tds_deduction
        })
        .sum();

    payroll + operational_overhead
}

/// Months `total_monthly_funding` covers at `monthly_burn`.
///
/// A burn of zero or less yields 0 instead of Infinity/NaN.
pub fn compute_runway_months(total_monthly_funding: f64, monthly_burn: f64) -> f64 {
    if monthly_burn <= 0.0 {
        return 0.0;
    }

    total_monthly_funding / monthly_burn
}

/// PF and TDS for a salary, rounded to whole currency units
pub fn statutory_deductions(monthly_salary: f64) -> (f64, f64) {
    (
        (monthly_salary * PF_RATE).round(),
        (monthly_salary * TDS_RATE).round(),
    )
}

/// Monthly salary after a percentage increment, rounded
pub fn projected_salary(monthly_salary: f64, increment_percent: f64) -> f64 {
    (monthly_salary * (1.0 + increment_percent / 100.0)).round()
}

/// Returns a copy of the employee earning `monthly_salary`, with PF and TDS
/// recomputed to match.
pub fn with_salary(employee: &Employee, monthly_salary: f64) -> Employee {
    let (pf_contribution, tds_deduction) = statutory_deductions(monthly_salary);
    Employee {
        monthly_salary,
        pf_contribution,
        tds_deduction,
        ..employee.clone()
    }
}
