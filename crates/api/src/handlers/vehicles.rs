//! Handlers for the `/vehicles` resource.
//!
//! Each handler shape-validates the payload, runs the matching use case,
//! and wraps the outcome in the standard response envelope. Uniqueness and
//! existence are the use cases' concern, not the handlers'.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use fleetreg_core::types::VehicleId;
use fleetreg_core::vehicle::{self, NewVehicle, VehicleChanges};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /vehicles
// ---------------------------------------------------------------------------

/// Register a new vehicle.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewVehicle>,
) -> AppResult<impl IntoResponse> {
    vehicle::validate_new(&input)?;

    let created = state.create_vehicle.execute(input).await?;

    tracing::info!(vehicle_id = %created.id, "Vehicle created via API");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// GET /vehicles
// ---------------------------------------------------------------------------

/// List all registered vehicles.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let vehicles = state.get_all_vehicles.execute().await?;
    Ok(Json(DataResponse { data: vehicles }))
}

// ---------------------------------------------------------------------------
// GET /vehicles/{id}
// ---------------------------------------------------------------------------

/// Get a single vehicle by id.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<VehicleId>,
) -> AppResult<impl IntoResponse> {
    let found = state.get_vehicle_by_id.execute(id).await?;
    Ok(Json(DataResponse { data: found }))
}

// ---------------------------------------------------------------------------
// PUT /vehicles/{id}
// ---------------------------------------------------------------------------

/// Apply a partial update to a vehicle. Absent fields are left untouched.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<VehicleId>,
    Json(changes): Json<VehicleChanges>,
) -> AppResult<impl IntoResponse> {
    vehicle::validate_changes(&changes)?;

    let updated = state.update_vehicle.execute(id, changes).await?;
    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// DELETE /vehicles/{id}
// ---------------------------------------------------------------------------

/// Remove a vehicle.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<VehicleId>,
) -> AppResult<impl IntoResponse> {
    state.delete_vehicle.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
