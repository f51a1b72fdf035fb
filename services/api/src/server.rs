use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySessionRepository};
use crate::routes::with_conversation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use difficult_ai_core::config::AppConfig;
use difficult_ai_core::error::AppError;
use difficult_ai_core::telemetry;
use difficult_ai_core::workflows::conversation::ConversationService;
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

    let repository = Arc::new(InMemorySessionRepository::default());
    let conversation_service = Arc::new(ConversationService::new(
        repository,
        config.scoring.schema,
        config.scoring.difficulty_scale,
    ));

    let app = with_conversation_routes(conversation_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        schema = %config.scoring.schema,
        scale = %config.scoring.difficulty_scale,
        "difficult conversation service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
