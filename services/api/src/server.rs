use crate::cli::ServeArgs;
use crate::infra::{
    statutory_evaluation_config, AppState, InMemoryNotificationPublisher,
    InMemoryScreeningRepository,
};
use crate::routes::with_relief_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use clearny::config::AppConfig;
use clearny::error::AppError;
use clearny::telemetry;
use clearny::workflows::relief::ReliefScreeningService;
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

    let repository = Arc::new(InMemoryScreeningRepository::default());
    let notifications = Arc::new(InMemoryNotificationPublisher::default());
    let screening_service = Arc::new(ReliefScreeningService::new(
        repository,
        notifications,
        statutory_evaluation_config(),
    ));

    let app = with_relief_routes(screening_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "record relief screening service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
