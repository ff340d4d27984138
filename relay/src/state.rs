// relay/src/state.rs
use crate::config::RelayConfig;
use crate::errors::{AppError, Result};
use orderform::{Catalog, HttpTransport, ReqwestTransport};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub config: Arc<RelayConfig>,
  pub catalog: Arc<Catalog>,
  pub transport: Arc<dyn HttpTransport>,
}

impl AppState {
  /// Loads the catalog and builds the outbound client described by `config`.
  pub fn from_config(config: Arc<RelayConfig>) -> Result<Self> {
    let catalog = match &config.catalog_path {
      Some(path) => Catalog::from_path(path)?,
      None => Catalog::builtin()?,
    };
    let transport = ReqwestTransport::new(config.webhook_timeout).map_err(|e| AppError::Config(e.to_string()))?;

    Ok(Self {
      config,
      catalog: Arc::new(catalog),
      transport: Arc::new(transport),
    })
  }
}
