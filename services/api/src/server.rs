use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState, InMemoryWeighRepository};
use crate::routes::with_weigh_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tow_compliance::config::AppConfig;
use tow_compliance::error::AppError;
use tow_compliance::telemetry;
use tow_compliance::workflows::weigh::WeighService;
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

    let catalog = load_catalog(config.catalog.path.as_deref())?;
    let repository = Arc::new(InMemoryWeighRepository::default());
    let weigh_service = Arc::new(WeighService::new(
        repository,
        Arc::new(catalog),
        config.engine,
    ));

    let app = with_weigh_routes(weigh_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        gcm_policy = ?config.engine.gcm_policy,
        %addr,
        "tow compliance service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
