// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use order_relay::config::RelayConfig;
use order_relay::state::AppState;
use orderform::error::TransportError;
use orderform::transport::{HttpTransport, TransportResponse};
use orderform::Catalog;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::Level;

pub const WEBHOOK_URL: &str = "http://webhook.test/hook";

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

pub fn test_config(webhook_url: Option<&str>) -> RelayConfig {
  RelayConfig {
    server_host: "127.0.0.1".to_string(),
    server_port: 0,
    webhook_url: webhook_url.map(String::from),
    webhook_timeout: None,
    order_key: None,
    require_order_key: false,
    catalog_path: None,
  }
}

pub fn test_state(config: RelayConfig, transport: Arc<StubTransport>) -> AppState {
  AppState {
    config: Arc::new(config),
    catalog: Arc::new(Catalog::builtin().expect("builtin catalog")),
    transport,
  }
}

#[derive(Debug, Clone)]
pub struct RecordedPost {
  pub url: String,
  pub content_type: String,
  pub body: Vec<u8>,
}

/// Answers every call with one fixed outcome and records what was sent.
#[derive(Debug)]
pub struct StubTransport {
  outcome: Result<TransportResponse, String>,
  posts: Mutex<Vec<RecordedPost>>,
}

impl StubTransport {
  pub fn answering(status: u16, body: &str) -> Self {
    Self {
      outcome: Ok(TransportResponse {
        status,
        body: body.to_string(),
      }),
      posts: Mutex::new(Vec::new()),
    }
  }

  pub fn failing(message: &str) -> Self {
    Self {
      outcome: Err(message.to_string()),
      posts: Mutex::new(Vec::new()),
    }
  }

  pub fn posts(&self) -> Vec<RecordedPost> {
    self.posts.lock().clone()
  }
}

#[async_trait]
impl HttpTransport for StubTransport {
  async fn post(
    &self,
    url: &str,
    content_type: &str,
    _headers: &[(String, String)],
    body: Vec<u8>,
  ) -> Result<TransportResponse, TransportError> {
    self.posts.lock().push(RecordedPost {
      url: url.to_string(),
      content_type: content_type.to_string(),
      body,
    });
    match &self.outcome {
      Ok(response) => Ok(response.clone()),
      Err(message) => Err(TransportError::Request {
        url: url.to_string(),
        source: anyhow::anyhow!(message.clone()),
      }),
    }
  }
}

pub const SAMPLE_ORDER: &str = r#"{"source":"liff","order_id":"liff-1718000000000","store_code":"HN_Robson","line_user_id":"U1","line_user_name":"Jane","items":[{"sku":"HNPB13","qty":2}]}"#;
