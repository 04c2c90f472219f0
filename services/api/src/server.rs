use crate::cli::ServeArgs;
use crate::infra::{load_model, AppState};
use crate::routes::with_operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use risk_scoring::config::AppConfig;
use risk_scoring::error::AppError;
use risk_scoring::telemetry;
use risk_scoring::ClinicalPredictor;
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

    // A missing or invalid artifact stops startup before the port is bound.
    let model = load_model(&config, args.model.take())?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        model: Arc::new(model.metadata().clone()),
    };

    let predictor = Arc::new(ClinicalPredictor::new(Arc::new(model)));

    let app = with_operational_routes(predictor)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "risk scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
