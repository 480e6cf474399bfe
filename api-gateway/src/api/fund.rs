//! Fund API handlers
//!
//! Handles the fund resource:
//! - List funds
//! - Get fund details
//! - Create a fund
//! - Update fund performance
//! - Delete a fund

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::Method,
    Json,
};
use common::model::fund::InvestmentFund;
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::api::response::{Created, MessageResponse};
use crate::error::ApiError;
use crate::AppState;

/// Create fund request
///
/// Only used to document the payload; bodies are validated field by field so
/// that numeric strings are accepted and every missing field is reported.
#[derive(Debug, Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct CreateFundRequest {
    /// Fund name, unique across funds
    #[schema(example = "Tech Fund")]
    pub name: String,
    /// Name of the fund manager
    #[schema(example = "Alice")]
    pub manager_name: String,
    /// Description of the fund
    #[schema(example = "Investing in tech companies")]
    pub description: String,
    /// Net asset value
    #[schema(example = 500000.0)]
    pub nav: f64,
    /// Performance as a percentage
    #[schema(example = 12.5)]
    pub performance: f64,
    /// Creation date (YYYY-MM-DD); defaults to today
    #[schema(example = "2024-01-31")]
    pub date_of_creation: Option<String>,
}

/// Update performance request
#[derive(Debug, Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct UpdatePerformanceRequest {
    /// New performance figure
    #[schema(example = 15.0)]
    pub performance: f64,
}

// Non-numeric ids can never match a fund
fn fund_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| ApiError::NotFound(rejection.body_text()))
}

/// List all funds
#[utoipa::path(
    get,
    path = "/funds",
    responses(
        (status = 200, description = "All funds, ordered by id", body = [InvestmentFund]),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "fund"
)]
pub async fn list_funds(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<InvestmentFund>>, ApiError> {
    let funds = state.fund_service.list_funds().await?;
    Ok(Json(funds))
}

/// Get a fund by ID
#[utoipa::path(
    get,
    path = "/funds/{id}",
    params(
        ("id" = i64, Path, description = "Fund ID")
    ),
    responses(
        (status = 200, description = "Fund details retrieved successfully", body = InvestmentFund),
        (status = 404, description = "Fund not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "fund"
)]
pub async fn get_fund(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<InvestmentFund>, ApiError> {
    let id = fund_id(path)?;
    let fund = state.fund_service.get_fund(id).await?;
    Ok(Json(fund))
}

/// Create a new fund
#[utoipa::path(
    post,
    path = "/funds",
    request_body = CreateFundRequest,
    responses(
        (status = 201, description = "Fund successfully created", body = InvestmentFund),
        (status = 400, description = "Missing fields or non-numeric nav/performance", body = crate::error::ErrorResponse),
        (status = 409, description = "A fund with this name already exists", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "fund"
)]
pub async fn create_fund(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Created<InvestmentFund>, ApiError> {
    let Json(payload) = body?;
    let fund = state.fund_service.create_fund(&payload).await?;
    Ok(Created(fund))
}

/// Update the performance of a fund
///
/// Only `performance` is applied; other keys in the body are ignored.
#[utoipa::path(
    put,
    path = "/funds/{id}",
    params(
        ("id" = i64, Path, description = "Fund ID")
    ),
    request_body = UpdatePerformanceRequest,
    responses(
        (status = 200, description = "Performance updated", body = InvestmentFund),
        (status = 400, description = "Missing or non-numeric performance", body = crate::error::ErrorResponse),
        (status = 404, description = "Fund not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "fund"
)]
pub async fn update_fund_performance(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<InvestmentFund>, ApiError> {
    let id = fund_id(path)?;

    // An unknown fund is reported as such even when the body is unreadable
    let payload = match body {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            state.fund_service.get_fund(id).await?;
            return Err(rejection.into());
        }
    };

    let fund = state.fund_service.update_performance(id, &payload).await?;
    Ok(Json(fund))
}

/// Delete a fund
#[utoipa::path(
    delete,
    path = "/funds/{id}",
    params(
        ("id" = i64, Path, description = "Fund ID")
    ),
    responses(
        (status = 200, description = "Fund deleted", body = MessageResponse),
        (status = 404, description = "Fund not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "fund"
)]
pub async fn delete_fund(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<MessageResponse, ApiError> {
    let id = fund_id(path)?;
    state.fund_service.delete_fund(id).await?;
    Ok(MessageResponse::new("Fund deleted successfully"))
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound("no route".to_string())
}

/// Fallback for known routes called with an unsupported method
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method.to_string())
}
