// tests/config_tests.rs
mod common;

use order_relay::config::RelayConfig;
use order_relay::errors::AppError;
use order_relay::state::AppState;
use serial_test::serial;
use std::env;
use std::sync::Arc;
use std::time::Duration;

const VARS: &[&str] = &[
  "SERVER_HOST",
  "SERVER_PORT",
  "WEBHOOK_URL",
  "MAKE_WEBHOOK_URL",
  "WEBHOOK_TIMEOUT_SECS",
  "ORDER_KEY",
  "REQUIRE_ORDER_KEY",
  "CATALOG_PATH",
];

fn clear_env() {
  for var in VARS {
    env::remove_var(var);
  }
}

#[test]
#[serial]
fn test_defaults_when_nothing_is_set() {
  common::setup_tracing();
  clear_env();
  let config = RelayConfig::from_env().expect("defaults load");
  assert_eq!(config.bind_address(), "127.0.0.1:8080");
  assert!(config.webhook_url.is_none());
  assert!(config.webhook_timeout.is_none());
  assert!(!config.require_order_key);
  assert!(config.catalog_path.is_none());
}

#[test]
#[serial]
fn test_webhook_url_and_legacy_name() {
  clear_env();
  env::set_var("MAKE_WEBHOOK_URL", "https://hook.example/legacy");
  assert_eq!(
    RelayConfig::from_env().unwrap().webhook_url.as_deref(),
    Some("https://hook.example/legacy")
  );

  env::set_var("WEBHOOK_URL", "https://hook.example/current");
  assert_eq!(
    RelayConfig::from_env().unwrap().webhook_url.as_deref(),
    Some("https://hook.example/current")
  );

  // Blank counts as missing.
  env::set_var("WEBHOOK_URL", "  ");
  env::remove_var("MAKE_WEBHOOK_URL");
  assert!(RelayConfig::from_env().unwrap().webhook_url.is_none());
  clear_env();
}

#[test]
#[serial]
fn test_invalid_values_are_config_errors() {
  clear_env();
  env::set_var("SERVER_PORT", "eighty");
  assert!(matches!(RelayConfig::from_env(), Err(AppError::Config(_))));
  env::remove_var("SERVER_PORT");

  env::set_var("WEBHOOK_TIMEOUT_SECS", "soon");
  assert!(matches!(RelayConfig::from_env(), Err(AppError::Config(_))));
  env::set_var("WEBHOOK_TIMEOUT_SECS", "15");
  assert_eq!(
    RelayConfig::from_env().unwrap().webhook_timeout,
    Some(Duration::from_secs(15))
  );
  clear_env();
}

#[test]
#[serial]
fn test_required_order_key_needs_a_key() {
  clear_env();
  env::set_var("REQUIRE_ORDER_KEY", "true");
  assert!(matches!(RelayConfig::from_env(), Err(AppError::Config(_))));

  env::set_var("ORDER_KEY", "s3cret");
  let config = RelayConfig::from_env().unwrap();
  assert!(config.require_order_key);
  assert_eq!(config.order_key.as_deref(), Some("s3cret"));
  clear_env();
}

#[test]
#[serial]
fn test_state_loads_catalog_from_configured_path() {
  clear_env();
  let path = env::temp_dir().join(format!("order_relay_catalog_{}.json", std::process::id()));
  std::fs::write(
    &path,
    r#"{"products":[{"id":"X1","name":"Only thing","moq":3}],"visibility":{"default":["X1"]}}"#,
  )
  .unwrap();

  let mut config = common::test_config(None);
  config.catalog_path = Some(path.display().to_string());
  let state = AppState::from_config(Arc::new(config)).expect("state builds");
  assert_eq!(state.catalog.len(), 1);
  assert_eq!(state.catalog.get("X1").map(|p| p.moq), Some(3));

  let mut broken = common::test_config(None);
  broken.catalog_path = Some(path.with_extension("missing").display().to_string());
  assert!(matches!(
    AppState::from_config(Arc::new(broken)),
    Err(AppError::Catalog(_))
  ));

  std::fs::remove_file(&path).ok();
}
