mod app;
mod config;
mod domain;
mod engine;
mod error;
mod logging;
mod middleware;
mod routes;
mod services;

use anyhow::Result;

use services::{GeminiClient, WeatherClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        "Starting AgriSense backend"
    );

    // Create external service clients
    let gemini = GeminiClient::new(&settings)?;
    let weather = WeatherClient::new(&settings)?;

    // Optionally check AI service health (non-blocking)
    if gemini.is_configured() {
        tokio::spawn({
            let gemini = gemini.clone();
            async move {
                match gemini.health_check().await {
                    Ok(()) => tracing::info!("Gemini API is reachable"),
                    Err(e) => tracing::warn!(
                        error = %e,
                        "Gemini health check failed - fallback engine will cover until it recovers"
                    ),
                }
            }
        });
    }

    // Create application state
    let state = app::AppState::new(settings.clone(), gemini, weather);

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
