use std::sync::Arc;

use leave_engine::api::{AppState, create_router};
use leave_engine::clock::SystemClock;
use leave_engine::config::{ConfigLoader, ServiceSettings};
use leave_engine::policy::LeavePolicyEngine;
use leave_engine::telemetry;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = ServiceSettings::from_env()?;
    telemetry::init(&settings.log_level)?;

    let loader = ConfigLoader::load(&settings.config_dir)?;
    let engine = LeavePolicyEngine::from_loader(&loader, Arc::new(SystemClock))?;
    info!(
        policy = %engine.policy().name,
        config_dir = %settings.config_dir.display(),
        "Leave policy loaded"
    );

    let app = create_router(AppState::new(engine));
    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    info!(addr = %settings.bind_addr, "Leave engine listening");

    axum::serve(listener, app).await?;
    Ok(())
}
