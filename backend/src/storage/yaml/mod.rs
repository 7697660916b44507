//! # YAML Storage Module
//!
//! File-based storage rooted at one data directory:
//!
//! ```text
//! data/
//! ├── dataset.yaml      ← baseline programs, donors and employees
//! └── overrides.yaml    ← increments, employee overrides, donor preferences
//! ```
//!
//! Writes go to a temp file that is then renamed over the target.

pub mod connection;
pub mod dataset_repository;
pub mod override_repository;

pub use connection::YamlConnection;
pub use dataset_repository::DatasetRepository;
pub use override_repository::YamlOverrideRepository;
