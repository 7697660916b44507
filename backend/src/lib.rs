//! # FundFlow Backend
//!
//! Allocation and runway simulation for a nonprofit's donors, programs and
//! payroll, served over a small JSON API.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST handlers)
//!     ↓
//! Domain Layer (simulation engine, override and scenario services)
//!     ↓
//! Storage Layer (baseline dataset, override store)
//! ```
//!
//! The simulation engine is pure. Everything stateful (the loaded dataset and
//! the override store) is owned by `AppState` and handed to the engine as
//! fully-merged snapshots.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{http::Method, Router};
use shared::Dataset;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::domain::{OverrideService, ScenarioService, SimulationConfig, SimulationService};
use crate::io::rest::{override_apis, simulation_apis};
use crate::storage::{DatasetRepository, OverrideStorage, YamlConnection, YamlOverrideRepository};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub simulation_service: SimulationService,
    pub scenario_service: ScenarioService,
    pub override_service: OverrideService,
    /// Baseline snapshot; never mutated after startup
    pub dataset: Arc<Dataset>,
}

impl AppState {
    pub fn new(
        dataset: Dataset,
        override_store: Arc<dyn OverrideStorage>,
        simulation_config: SimulationConfig,
    ) -> Self {
        let simulation_service = SimulationService::with_config(simulation_config);
        Self {
            scenario_service: ScenarioService::new(simulation_service.clone()),
            simulation_service,
            override_service: OverrideService::new(override_store),
            dataset: Arc::new(dataset),
        }
    }
}

/// Load the dataset and open the override store described by `config`.
///
/// A missing dataset file is logged and replaced by an empty dataset so the
/// server still starts. A dataset that exists but cannot be read or parsed is
/// an error, as is an unusable data directory.
pub fn initialize_backend(config: &ServerConfig) -> Result<AppState> {
    let dataset = if config.dataset_path.exists() {
        info!("Loading dataset from {:?}", config.dataset_path);
        DatasetRepository::new(&config.dataset_path).load_dataset()?
    } else {
        warn!(
            "No dataset at {:?}; starting with an empty dataset",
            config.dataset_path
        );
        Dataset::default()
    };

    info!("Setting up override store in {:?}", config.data_dir);
    let connection = YamlConnection::new(&config.data_dir)?;
    let override_store: Arc<dyn OverrideStorage> = Arc::new(YamlOverrideRepository::new(connection));

    Ok(AppState::new(dataset, override_store, config.simulation.clone()))
}

/// Create the Axum router with all routes under `/api`
pub fn create_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .merge(simulation_apis::router())
        .merge(override_apis::router());

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
