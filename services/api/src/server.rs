use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryProfileStore, InMemorySchemeCatalog};
use crate::routes::with_eligibility_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use scheme_finder::config::AppConfig;
use scheme_finder::error::AppError;
use scheme_finder::telemetry;
use scheme_finder::workflows::eligibility::{
    EligibilityService, EligibilityServiceError, SchemeCatalog, SchemeCatalogFile,
};
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
    if let Some(catalog) = args.catalog.take() {
        config.catalog.seed_path = Some(catalog);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(InMemorySchemeCatalog::default());
    match &config.catalog.seed_path {
        Some(path) => {
            let schemes = SchemeCatalogFile::from_path(path)?;
            let seeded = catalog
                .insert_many(schemes)
                .map_err(EligibilityServiceError::from)?;
            info!(seeded, path = %path.display(), "seeded scheme catalog");
        }
        None => info!("starting with an empty scheme catalog"),
    }

    let profiles = Arc::new(InMemoryProfileStore::default());
    let service = Arc::new(EligibilityService::new(catalog, profiles));

    let app = with_eligibility_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "scheme finder ready");

    axum::serve(listener, app).await?;
    Ok(())
}
