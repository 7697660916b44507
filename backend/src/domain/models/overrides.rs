#[derive(Debug, thiserror::Error, PartialEq)]
pub enum OverrideValidationError {
    #[error("Preference weight {weight} for program '{program_id}' must be between 0 and 100")]
    WeightOutOfRange { program_id: String, weight: f64 },
    #[error("Preference weights add up to {total}, which exceeds 100")]
    TotalWeightExceeded { total: f64 },
    #[error("Unknown program '{0}'")]
    UnknownProgram(String),
    #[error("Unknown donor '{0}'")]
    UnknownDonor(String),
    #[error("Unknown employee '{0}'")]
    UnknownEmployee(String),
    #[error("Increment must be a number")]
    InvalidIncrement,
}
