use tokio::net::TcpListener;
use tracing::{info, warn};

use wheel_backend::config::Config;
use wheel_backend::{logging, routes, storage, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::from_path(".env").ok();
    logging::setup();

    let config = Config::from_env()?;
    let store = storage::build_store(&config);

    let static_dir = if config.static_dir.exists() {
        Some(config.static_dir.clone())
    } else {
        warn!("Static directory {:?} not found; serving the API only", config.static_dir);
        None
    };

    if config.environment.exposes_error_details() {
        warn!("Development mode: error details are included in responses");
    }

    let app = routes::app(AppState::new(store, &config), static_dir);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
