//! # Domain Module
//!
//! Business logic for funding allocation and runway simulation.
//!
//! The engine modules are pure functions over shared DTOs. Services wrap them
//! with configuration and override storage, but the engine itself never reads
//! storage or the clock unless handed a date.
//!
//! ## Module Organization
//!
//! - **donor_economics**: admin rate resolution, net amounts per donor, and the admin-rate watchlist
//! - **allocation**: preference-weighted program allocation and general fund
//! - **geography**: allocation totals per region
//! - **payroll**: monthly burn, statutory deductions and runway months
//! - **scoring**: donor quality scores and ranking
//! - **runway**: per-donor runway, depletion date and status
//! - **strategy**: the three named allocation strategies
//! - **simulation_service**: the single entry point that runs everything above
//! - **override_service**: what-if overrides and merging them into a snapshot
//! - **scenario**: preset scenarios compared against a baseline run
//!
//! ## Business Rules
//!
//! - A donor's admin amount and net amount always add up to the contribution
//! - Allocated amount plus general fund equals net whenever weights total at most 100
//! - Zero or negative monthly burn yields a runway of 0, never Infinity
//! - Identical inputs give identical results, except depletion dates which follow `today`

pub mod allocation;
pub mod donor_economics;
pub mod geography;
pub mod models;
pub mod override_service;
pub mod payroll;
pub mod runway;
pub mod scenario;
pub mod scoring;
pub mod simulation_service;
pub mod strategy;

#[cfg(test)]
pub(crate) mod test_utils;

pub use models::{OverrideValidationError, ScenarioError};
pub use override_service::{OverrideError, OverrideService};
pub use scenario::ScenarioService;
pub use simulation_service::{run_simulation, SimulationConfig, SimulationService};
