use std::net::SocketAddr;
use std::sync::Arc;

use applyflow::api::{create_router, AppState};
use applyflow::application::SubmissionService;
use applyflow::infrastructure::{Config, HttpCandidateService};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env();

    let candidate_api = Arc::new(HttpCandidateService::new(&config.internal_api)?);
    let submission_service = Arc::new(SubmissionService::new(candidate_api));
    info!(base_url = %config.internal_api.base_url, "Internal API client initialized");

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let state = AppState::new(submission_service, config);
    let app = create_router(state);

    info!("API server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
