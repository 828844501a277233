use crate::cli::ServeArgs;
use crate::demo::seed_demo_leads;
use crate::infra::{build_lead_service, random_source, AppState};
use crate::routes::with_lead_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use flipfinder::config::AppConfig;
use flipfinder::error::AppError;
use flipfinder::telemetry;
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
    if let Some(seed) = args.seed {
        config.scoring.seed = Some(seed);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let lead_service = Arc::new(build_lead_service(&config.scoring)?);
    if let Some(count) = args.demo_leads {
        let random = random_source(config.scoring.seed);
        let seeded = seed_demo_leads(&lead_service, count, random.as_ref())?;
        info!(seeded, "pipeline pre-loaded with demo leads");
    }

    let app = with_lead_routes(lead_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        bucket_policy = %config.scoring.bucket_policy,
        "flipfinder lead service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
