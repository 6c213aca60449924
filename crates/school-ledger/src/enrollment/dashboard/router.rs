use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::super::aggregate::Aggregator;
use super::super::domain::SchoolId;
use super::super::fees::FeeSchedule;
use super::super::report::build_report;
use super::controller::{DashboardController, DashboardError};
use super::store::{SchoolStore, StoreError};
use super::views::PanelVisibility;

/// Shared state for the dashboard endpoints.
pub struct DashboardState<S> {
    store: Arc<S>,
    fees: Arc<FeeSchedule>,
    writes: Mutex<()>,
}

impl<S> DashboardState<S>
where
    S: SchoolStore + 'static,
{
    pub fn new(store: Arc<S>, fees: Arc<FeeSchedule>) -> Self {
        Self {
            store,
            fees,
            writes: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn fees(&self) -> &Arc<FeeSchedule> {
        &self.fees
    }

    fn controller(&self, school_id: &SchoolId) -> Result<DashboardController<S>, DashboardError> {
        DashboardController::open(self.store.clone(), self.fees.clone(), school_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateChange {
    pub category: String,
    pub delta: i64,
}

/// Router builder exposing the fee table, report, dashboard and mutations.
pub fn dashboard_router<S>(state: Arc<DashboardState<S>>) -> Router
where
    S: SchoolStore + 'static,
{
    Router::new()
        .route("/api/v1/fees", get(fees_handler::<S>))
        .route("/api/v1/schools/report", get(report_handler::<S>))
        .route(
            "/api/v1/schools/:school_id/dashboard",
            get(dashboard_handler::<S>),
        )
        .route(
            "/api/v1/schools/:school_id/candidates",
            post(candidates_handler::<S>),
        )
        .with_state(state)
}

pub(crate) async fn fees_handler<S>(State(state): State<Arc<DashboardState<S>>>) -> Response
where
    S: SchoolStore + 'static,
{
    (StatusCode::OK, axum::Json(state.fees.entries())).into_response()
}

pub(crate) async fn report_handler<S>(State(state): State<Arc<DashboardState<S>>>) -> Response
where
    S: SchoolStore + 'static,
{
    match state.store.schools() {
        Ok(schools) => {
            let aggregator = Aggregator::new(state.fees.clone());
            let report = build_report(&aggregator, &schools);
            (StatusCode::OK, axum::Json(report)).into_response()
        }
        Err(err) => error_response(DashboardError::Store(err)),
    }
}

pub(crate) async fn dashboard_handler<S>(
    State(state): State<Arc<DashboardState<S>>>,
    Path(school_id): Path<String>,
    Query(panels): Query<PanelVisibility>,
) -> Response
where
    S: SchoolStore + 'static,
{
    let id = SchoolId(school_id);
    let view = state
        .controller(&id)
        .map(|controller| controller.with_panels(panels))
        .and_then(|controller| controller.render_from_store());

    match view {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn candidates_handler<S>(
    State(state): State<Arc<DashboardState<S>>>,
    Path(school_id): Path<String>,
    axum::Json(change): axum::Json<CandidateChange>,
) -> Response
where
    S: SchoolStore + 'static,
{
    let id = SchoolId(school_id);
    let result = {
        let _guard = state
            .writes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        state
            .controller(&id)
            .and_then(|mut controller| controller.adjust_code(&change.category, change.delta))
    };

    match result {
        Ok(view) => {
            info!(
                school = %view.school_id,
                category = %view.category,
                delta = change.delta,
                count = view.count,
                "candidate count updated"
            );
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: DashboardError) -> Response {
    let status = match &err {
        DashboardError::Ledger(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DashboardError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
        DashboardError::Store(StoreError::Unavailable(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": err.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
