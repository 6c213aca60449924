use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySchoolStore};
use crate::routes::with_dashboard_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use school_ledger::config::AppConfig;
use school_ledger::enrollment::dashboard::DashboardState;
use school_ledger::error::AppError;
use school_ledger::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemorySchoolStore::from_config(&config.ledger)?);
    let fees = Arc::new(config.ledger.fees.clone());
    let dashboard_state = Arc::new(DashboardState::new(store, fees));

    let app = with_dashboard_routes(dashboard_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "candidate ledger service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
