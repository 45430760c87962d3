//! Hourglass - A countdown timer service with a one-shot warning threshold
//! 
//! This is the main entry point for the hourglass application.

use tokio::net::TcpListener;
use tracing::{error, info};

use hourglass::{
    api::create_router,
    config::Config,
    state::{AppState, ControlError},
    tasks::event_log_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("hourglass={},tower_http=info", config.log_level()))
        .init();

    info!("Starting hourglass server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}", config.host, config.port);

    // Create application state
    let state = AppState::new(config.port, config.host.clone());

    // Log countdown events to the console
    tokio::spawn(event_log_task(state.subscribe()));

    if let Some(inputs) = config.autostart() {
        match state.start_countdown(&inputs) {
            Ok(_) => info!("Launch countdown started"),
            Err(ControlError::Validation(e)) => {
                error!("Invalid launch countdown: {}", e);
                std::process::exit(2);
            }
            Err(e) => return Err(e.into()),
        }
    }

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start   - Start a countdown");
    info!("  POST /reset   - Stop and clear the countdown");
    info!("  GET  /status  - Current countdown and server status");
    info!("  GET  /events  - Server-sent countdown events");
    info!("  GET  /health  - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            match result {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => error!("Failed to listen for shutdown signals: {}", e),
            }
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
