//! Doctor endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use domain::models::{CreateDoctorRequest, Doctor, Page, UpdateDoctorRequest};
use shared::pagination::PageParams;

use crate::app::AppState;
use crate::error::ApiError;

use super::check_page_params;

/// Register a doctor.
///
/// POST /api/v1/doctors
pub async fn create_doctor(
    State(state): State<AppState>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<Json<Doctor>, ApiError> {
    request.validate()?;
    let doctor = state.doctors.create(request).await?;
    Ok(Json(doctor))
}

/// List doctors, newest first.
///
/// GET /api/v1/doctors?page=1&limit=10
pub async fn list_doctors(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Doctor>>, ApiError> {
    check_page_params(&params)?;
    let page = state.doctors.list(params).await?;
    Ok(Json(page))
}

/// Get a doctor by id.
///
/// GET /api/v1/doctors/:id
pub async fn get_doctor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Doctor>, ApiError> {
    let doctor = state.doctors.get(id).await?;
    Ok(Json(doctor))
}

/// Patch a doctor.
///
/// PATCH /api/v1/doctors/:id
pub async fn update_doctor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateDoctorRequest>,
) -> Result<Json<Doctor>, ApiError> {
    patch.validate()?;
    let doctor = state.doctors.update(id, patch).await?;
    Ok(Json(doctor))
}

/// Delete a doctor, returning its last known value.
///
/// DELETE /api/v1/doctors/:id
pub async fn delete_doctor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Doctor>, ApiError> {
    let doctor = state.doctors.delete(id).await?;
    Ok(Json(doctor))
}
