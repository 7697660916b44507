//! # REST API for Simulations
//!
//! Ad-hoc simulations over caller-supplied snapshots, the override-merged
//! baseline dataset, the admin-rate watchlist, and preset scenarios.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use shared::{Dataset, RunSimulationRequest, ScenarioAdjustment};
use tracing::info;

use crate::domain::donor_economics::admin_watchlist;
use crate::io::rest::{bad_request, internal_error};
use crate::AppState;

/// Create a router for simulation related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/simulation", post(run_simulation))
        .route("/simulation/scenario", post(run_scenario))
        .route("/dataset", get(get_dataset))
        .route("/admin-watchlist", get(get_admin_watchlist))
        .route("/scenarios", get(list_scenarios))
}

/// Simulate exactly the donors, programs and employees in the request
pub async fn run_simulation(
    State(state): State<AppState>,
    Json(request): Json<RunSimulationRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/simulation - {} donors, {} programs, {} employees",
        request.donors.len(),
        request.programs.len(),
        request.employees.len()
    );

    let result = state.simulation_service.run_simulation(
        &request.donors,
        &request.programs,
        &request.employees,
        request.operational_overhead,
    );
    (StatusCode::OK, Json(result)).into_response()
}

/// Baseline dataset with every stored override merged in
pub async fn get_dataset(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/dataset");

    let employees = match state.override_service.effective_employees(&state.dataset.employees) {
        Ok(employees) => employees,
        Err(e) => return internal_error("Failed to load overrides", e),
    };
    let donors = match state.override_service.effective_donors(&state.dataset.donors) {
        Ok(donors) => donors,
        Err(e) => return internal_error("Failed to load overrides", e),
    };

    let dataset = Dataset {
        programs: state.dataset.programs.clone(),
        donors,
        employees,
    };
    (StatusCode::OK, Json(dataset)).into_response()
}

/// Admin rates of the merged donors against their type baselines
pub async fn get_admin_watchlist(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/admin-watchlist");

    match state.override_service.effective_donors(&state.dataset.donors) {
        Ok(donors) => (StatusCode::OK, Json(admin_watchlist(&donors))).into_response(),
        Err(e) => internal_error("Failed to load overrides", e),
    }
}

pub async fn list_scenarios(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/scenarios");
    (StatusCode::OK, Json(state.scenario_service.presets())).into_response()
}

/// Run a preset scenario against the merged dataset, with a baseline for comparison
pub async fn run_scenario(
    State(state): State<AppState>,
    Json(adjustment): Json<ScenarioAdjustment>,
) -> impl IntoResponse {
    info!("POST /api/simulation/scenario - request: {:?}", adjustment);

    let overrides = match state.override_service.overrides() {
        Ok(overrides) => overrides,
        Err(e) => return internal_error("Failed to load overrides", e),
    };

    match state
        .scenario_service
        .simulate(&adjustment, &state.dataset, &overrides)
    {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => bad_request(e),
    }
}
