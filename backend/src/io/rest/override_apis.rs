//! # REST API for What-If Overrides
//!
//! Planned increments, employee profile overrides and donor preference
//! overrides. Every write answers with the full override set so clients can
//! refresh in one round trip.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{delete, get, put},
    Router,
};
use shared::{EmployeeOverride, OverrideUpdateResponse, SetDonorPreferencesRequest, SetIncrementRequest};
use tracing::info;

use crate::domain::override_service::{ensure_known_donor, ensure_known_employee};
use crate::domain::{OverrideError, OverrideValidationError};
use crate::io::rest::{bad_request, internal_error};
use crate::AppState;

/// Create a router for override related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/overrides", get(get_overrides))
        .route("/overrides/increments", delete(reset_all_increments))
        .route(
            "/overrides/increments/:employee_id",
            put(set_increment).delete(reset_increment),
        )
        .route("/overrides/employees/:employee_id", put(set_employee_override))
        .route(
            "/overrides/donors/:donor_id/preferences",
            put(set_donor_preferences),
        )
}

fn override_error_response(error: OverrideError) -> Response {
    match error {
        OverrideError::Validation(e) => bad_request(e),
        OverrideError::Storage(e) => internal_error("Failed to store override", e),
    }
}

/// Current override set wrapped with a confirmation message
fn updated(state: &AppState, success_message: String) -> Response {
    match state.override_service.overrides() {
        Ok(overrides) => (
            StatusCode::OK,
            Json(OverrideUpdateResponse {
                overrides,
                success_message,
            }),
        )
            .into_response(),
        Err(e) => internal_error("Failed to load overrides", e),
    }
}

pub async fn get_overrides(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/overrides");

    match state.override_service.overrides() {
        Ok(overrides) => (StatusCode::OK, Json(overrides)).into_response(),
        Err(e) => internal_error("Failed to load overrides", e),
    }
}

/// Set a planned increment; values outside 0-100 are clamped
pub async fn set_increment(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Json(request): Json<SetIncrementRequest>,
) -> impl IntoResponse {
    info!("PUT /api/overrides/increments/{} - request: {:?}", employee_id, request);

    if let Err(e) = ensure_known_employee(&state.dataset, &employee_id) {
        return bad_request(e);
    }

    match state.override_service.set_increment(&employee_id, request.increment) {
        Ok(stored) => updated(&state, format!("Set {}% increment for {}", stored, employee_id)),
        Err(e) => override_error_response(e),
    }
}

pub async fn reset_increment(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/overrides/increments/{}", employee_id);

    match state.override_service.reset_increment(&employee_id) {
        Ok(_) => updated(&state, format!("Reset increment for {}", employee_id)),
        Err(e) => internal_error("Failed to reset increment", e),
    }
}

pub async fn reset_all_increments(State(state): State<AppState>) -> impl IntoResponse {
    info!("DELETE /api/overrides/increments");

    match state.override_service.reset_all_increments() {
        Ok(()) => updated(&state, "Reset all increments".to_string()),
        Err(e) => internal_error("Failed to reset increments", e),
    }
}

/// Merge a profile override (role, city, program) into the employee's existing one
pub async fn set_employee_override(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Json(request): Json<EmployeeOverride>,
) -> impl IntoResponse {
    info!("PUT /api/overrides/employees/{} - request: {:?}", employee_id, request);

    if let Err(e) = ensure_known_employee(&state.dataset, &employee_id) {
        return bad_request(e);
    }
    // Blank fields keep the stored value, so only a real program ID is checked
    if let Some(program_id) = request.program_id.as_ref().filter(|id| !id.trim().is_empty()) {
        if !state.dataset.programs.iter().any(|program| &program.id == program_id) {
            return bad_request(OverrideValidationError::UnknownProgram(program_id.clone()));
        }
    }

    match state.override_service.set_employee_override(&employee_id, request) {
        Ok(_) => updated(&state, format!("Updated profile for {}", employee_id)),
        Err(e) => override_error_response(e),
    }
}

/// Replace a donor's preferences; an empty list restores the baseline ones
pub async fn set_donor_preferences(
    State(state): State<AppState>,
    Path(donor_id): Path<String>,
    Json(request): Json<SetDonorPreferencesRequest>,
) -> impl IntoResponse {
    info!("PUT /api/overrides/donors/{}/preferences - request: {:?}", donor_id, request);

    if let Err(e) = ensure_known_donor(&state.dataset, &donor_id) {
        return bad_request(e);
    }

    match state.override_service.set_donor_preferences(
        &donor_id,
        request.preferences,
        &state.dataset.programs,
    ) {
        Ok(()) => updated(&state, format!("Updated preferences for {}", donor_id)),
        Err(e) => override_error_response(e),
    }
}
