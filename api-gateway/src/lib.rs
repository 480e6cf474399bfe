//! HTTP gateway for the fund service

pub mod api;
pub mod error;
pub mod config;
pub mod trace;

use std::sync::Arc;

use axum::{routing::get, Router};
use fund_service::FundService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::fund::{
    create_fund, delete_fund, get_fund, list_funds, method_not_allowed, not_found, update_fund_performance,
};
use crate::api::health::health_check;
use crate::trace::RequestIdMakeSpan;

/// App state shared across handlers
pub struct AppState {
    /// Fund service
    pub fund_service: Arc<FundService>,
}

impl AppState {
    pub fn new(fund_service: FundService) -> Self {
        Self {
            fund_service: Arc::new(fund_service),
        }
    }
}

/// API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        api::fund::list_funds,
        api::fund::get_fund,
        api::fund::create_fund,
        api::fund::update_fund_performance,
        api::fund::delete_fund,
        api::health::health_check,
    ),
    components(
        schemas(
            common::model::fund::InvestmentFund,
            api::fund::CreateFundRequest,
            api::fund::UpdatePerformanceRequest,
            api::response::MessageResponse,
            api::health::HealthResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "fund", description = "Investment fund management endpoints"),
        (name = "health", description = "Service health")
    ),
    info(
        title = "Fund Tracker API",
        version = "1.0.0",
        description = "API for creating, listing, updating and deleting investment funds"
    )
)]
pub struct ApiDoc;

/// Build the application router
///
/// `log_level` is the level at which request spans and events are traced.
pub fn app(state: Arc<AppState>, log_level: Level) -> Router {
    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/funds", get(list_funds).post(create_fund))
        .route(
            "/funds/:id",
            get(get_fund).put(update_fund_performance).delete(delete_fund),
        )
        .route("/health", get(health_check));

    let swagger_ui = SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(api_routes)
        .merge(swagger_ui)
        // Applies to the routes above, so it must follow every merge
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(RequestIdMakeSpan::new(log_level))
                .on_request(DefaultOnRequest::new().level(log_level))
                .on_response(DefaultOnResponse::new().level(log_level)),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
