//! # API REST
//!
//! REST API implementation for the symptom checker.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Uses `api-shared` for the wire types and `symptom-core` for matching.

#![warn(rust_2018_idioms)]

use api_shared::{
    CheckSymptomsReq, CheckSymptomsRes, ConditionDto, HealthRes, HealthService,
    ListConditionsRes, ListSymptomsRes, MatchResultDto, EMPTY_SELECTION_MESSAGE,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use symptom_core::{MatchTier, SymptomCheckerService};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state for the REST API server
///
/// Holds the symptom checker service; its catalog is shared, so cloning the state per
/// request is cheap.
#[derive(Clone)]
pub struct AppState {
    service: SymptomCheckerService,
}

impl AppState {
    pub fn new(service: SymptomCheckerService) -> Self {
        Self { service }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, list_symptoms, list_conditions, check_symptoms),
    components(schemas(
        HealthRes,
        ListSymptomsRes,
        ListConditionsRes,
        ConditionDto,
        CheckSymptomsReq,
        CheckSymptomsRes,
        MatchResultDto,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/symptoms", get(list_symptoms))
        .route("/conditions", get(list_conditions))
        .route("/check", post(check_symptoms))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/symptoms",
    responses(
        (status = 200, description = "Checklist of selectable symptoms", body = ListSymptomsRes)
    )
)]
/// List every symptom a user can select
///
/// Baseline vocabulary first, then any additional symptom named by the loaded catalog, in
/// first-seen order.
#[axum::debug_handler]
async fn list_symptoms(State(state): State<AppState>) -> Json<ListSymptomsRes> {
    Json(ListSymptomsRes {
        symptoms: state.service.all_symptoms().to_vec(),
    })
}

#[utoipa::path(
    get,
    path = "/conditions",
    responses(
        (status = 200, description = "Loaded condition catalog", body = ListConditionsRes)
    )
)]
#[axum::debug_handler]
async fn list_conditions(State(state): State<AppState>) -> Json<ListConditionsRes> {
    Json(ListConditionsRes {
        source: state.service.source().to_string(),
        conditions: state.service.conditions().iter().map(Into::into).collect(),
    })
}

#[utoipa::path(
    post,
    path = "/check",
    request_body = CheckSymptomsReq,
    responses(
        (status = 200, description = "Up to three ranked conditions", body = CheckSymptomsRes),
        (status = 400, description = "No symptoms selected")
    )
)]
/// Check selected symptoms against the catalog
///
/// Returns conditions matching three or more selected symptoms; when none do, the closest
/// conditions with at least one match. A selection matching nothing returns an empty list
/// with a message.
///
/// # Errors
/// Returns `400 Bad Request` if no symptoms are selected.
#[axum::debug_handler]
async fn check_symptoms(
    State(state): State<AppState>,
    Json(req): Json<CheckSymptomsReq>,
) -> Result<Json<CheckSymptomsRes>, (StatusCode, &'static str)> {
    let report = state.service.check(&req.symptoms);
    tracing::debug!(
        selected = req.symptoms.len(),
        tier = report.tier.as_str(),
        results = report.results.len(),
        "checked symptoms"
    );

    if report.tier == MatchTier::EmptySelection {
        return Err((StatusCode::BAD_REQUEST, EMPTY_SELECTION_MESSAGE));
    }

    Ok(Json(report.into()))
}
