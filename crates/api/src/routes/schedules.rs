//! Schedule endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use domain::models::{CreateScheduleRequest, Page, Schedule, ScheduleDetails};
use shared::pagination::PageParams;

use crate::app::AppState;
use crate::error::ApiError;

use super::check_page_params;

/// Book an appointment.
///
/// POST /api/v1/schedules
pub async fn create_schedule(
    State(state): State<AppState>,
    Json(request): Json<CreateScheduleRequest>,
) -> Result<Json<Schedule>, ApiError> {
    request.validate()?;
    let schedule = state.schedules.create(request).await?;
    Ok(Json(schedule))
}

/// List appointments, newest first.
///
/// GET /api/v1/schedules?page=1&limit=10
pub async fn list_schedules(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Schedule>>, ApiError> {
    check_page_params(&params)?;
    let page = state.schedules.list(params).await?;
    Ok(Json(page))
}

/// Get an appointment by id.
///
/// GET /api/v1/schedules/:id
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Schedule>, ApiError> {
    let schedule = state.schedules.get(id).await?;
    Ok(Json(schedule))
}

/// Cancel an appointment, returning it with its customer and doctor as
/// they stood immediately before deletion.
///
/// DELETE /api/v1/schedules/:id
pub async fn delete_schedule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ScheduleDetails>, ApiError> {
    let details = state.schedules.delete(id).await?;
    Ok(Json(details))
}
