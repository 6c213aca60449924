use crate::infra::{AppState, InMemorySchoolStore};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{DateTime, Utc};
use school_ledger::enrollment::dashboard::{dashboard_router, DashboardState, SchoolStore};
use school_ledger::enrollment::{Aggregator, DerivedAggregate, FeeEntry};
use school_ledger::error::AppError;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub(crate) struct SummaryResponse {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) school_count: usize,
    pub(crate) aggregate: DerivedAggregate,
    pub(crate) fees: Vec<FeeEntry>,
}

pub(crate) fn with_dashboard_routes(
    state: Arc<DashboardState<InMemorySchoolStore>>,
) -> axum::Router {
    let summary = axum::Router::new()
        .route("/api/v1/schools/summary", axum::routing::get(summary_endpoint))
        .with_state(state.clone());

    dashboard_router(state)
        .merge(summary)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn summary_endpoint(
    State(state): State<Arc<DashboardState<InMemorySchoolStore>>>,
) -> Result<Json<SummaryResponse>, AppError> {
    let schools = state.store().schools()?;
    let aggregator = Aggregator::new(state.fees().clone());
    let aggregate = aggregator.aggregate_across(schools.iter().map(|school| &school.candidates));

    Ok(Json(SummaryResponse {
        generated_at: Utc::now(),
        school_count: schools.len(),
        aggregate,
        fees: state.fees().entries(),
    }))
}
