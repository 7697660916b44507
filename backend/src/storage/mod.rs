//! # Storage Module
//!
//! Persistence for the two pieces of state the dashboard keeps outside the
//! engine: the baseline dataset (programs, donors, employees) and the
//! user-entered what-if overrides.
//!
//! The domain layer only sees the `OverrideStorage` trait, so the override
//! store can be swapped (in-memory for tests and ephemeral sessions, YAML
//! files for a local install) without touching the override service.

pub mod memory;
pub mod traits;
pub mod yaml;

pub use memory::InMemoryOverrideStore;
pub use traits::OverrideStorage;
pub use yaml::{DatasetRepository, YamlConnection, YamlOverrideRepository};
