//! Customer endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use domain::models::{CreateCustomerRequest, Customer, Page, UpdateCustomerRequest};
use shared::pagination::PageParams;

use crate::app::AppState;
use crate::error::ApiError;

use super::check_page_params;

/// Register a customer.
///
/// POST /api/v1/customers
pub async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<Json<Customer>, ApiError> {
    request.validate()?;
    let customer = state.customers.create(request).await?;
    Ok(Json(customer))
}

/// List customers, newest first.
///
/// GET /api/v1/customers?page=1&limit=10
pub async fn list_customers(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Customer>>, ApiError> {
    check_page_params(&params)?;
    let page = state.customers.list(params).await?;
    Ok(Json(page))
}

/// Get a customer by id.
///
/// GET /api/v1/customers/:id
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Customer>, ApiError> {
    let customer = state.customers.get(id).await?;
    Ok(Json(customer))
}

/// Patch a customer.
///
/// PATCH /api/v1/customers/:id
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateCustomerRequest>,
) -> Result<Json<Customer>, ApiError> {
    patch.validate()?;
    let customer = state.customers.update(id, patch).await?;
    Ok(Json(customer))
}

/// Delete a customer, returning its last known value.
///
/// DELETE /api/v1/customers/:id
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Customer>, ApiError> {
    let customer = state.customers.delete(id).await?;
    Ok(Json(customer))
}
