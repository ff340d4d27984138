// relay/src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use anyhow::Context;
use order_relay::config::RelayConfig;
use order_relay::state::AppState;
use order_relay::web::configure_app_routes;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting order relay server...");

  let app_config = match RelayConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load relay configuration.");
      return Err(e).context("configuration error");
    }
  };
  if app_config.webhook_url.is_none() {
    tracing::warn!("WEBHOOK_URL is not set; order requests will fail until it is configured.");
  }

  let app_state = AppState::from_config(app_config.clone()).context("failed to build application state")?;
  tracing::info!(products = app_state.catalog.len(), "Catalog ready.");

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("failed to bind {}", server_address))?
  .run()
  .await
  .context("server terminated with an error")
}
