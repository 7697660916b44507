pub mod overrides;
pub mod scenario;

pub use overrides::OverrideValidationError;
pub use scenario::ScenarioError;
