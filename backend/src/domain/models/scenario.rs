#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ScenarioError {
    #[error("Unknown scenario '{0}'")]
    UnknownScenario(String),
    #[error("Multiplier {name} must be a non-negative number, got {value}")]
    InvalidMultiplier { name: &'static str, value: f64 },
    #[error("Operational overhead must be a non-negative number, got {0}")]
    InvalidOverhead(f64),
}
