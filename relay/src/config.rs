// relay/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RelayConfig {
  pub server_host: String,
  pub server_port: u16,

  /// Destination for forwarded orders. Missing is not a startup error:
  /// every order request answers 500 until it is set.
  pub webhook_url: Option<String>,
  pub webhook_timeout: Option<Duration>,

  /// Shared secret for the `X-ORDER-KEY` check. Only enforced when
  /// `require_order_key` is on.
  pub order_key: Option<String>,
  pub require_order_key: bool,

  /// JSON catalog to serve; the embedded catalog is used when absent.
  pub catalog_path: Option<String>,
}

impl RelayConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };
    // Set-but-blank counts as unset.
    let optional_env = |var_name: &str| get_env(var_name).ok().filter(|v| !v.trim().is_empty());

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

    let webhook_url = optional_env("WEBHOOK_URL").or_else(|| optional_env("MAKE_WEBHOOK_URL"));
    let webhook_timeout = optional_env("WEBHOOK_TIMEOUT_SECS")
      .map(|raw| {
        raw
          .parse::<u64>()
          .map(Duration::from_secs)
          .map_err(|e| AppError::Config(format!("Invalid WEBHOOK_TIMEOUT_SECS: {}", e)))
      })
      .transpose()?;

    let order_key = optional_env("ORDER_KEY");
    let require_order_key = get_env("REQUIRE_ORDER_KEY")
      .unwrap_or_else(|_| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid REQUIRE_ORDER_KEY value: {}", e)))?;
    if require_order_key && order_key.is_none() {
      return Err(AppError::Config(
        "REQUIRE_ORDER_KEY is set but ORDER_KEY is missing".to_string(),
      ));
    }

    let catalog_path = optional_env("CATALOG_PATH");

    tracing::info!(
      webhook_configured = webhook_url.is_some(),
      require_order_key,
      catalog_path = ?catalog_path,
      "Relay configuration loaded successfully."
    );
    // The webhook URL and order key are secrets; never log their values.

    Ok(Self {
      server_host,
      server_port,
      webhook_url,
      webhook_timeout,
      order_key,
      require_order_key,
      catalog_path,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
