// orderform/src/transport.rs

//! One outbound POST, awaited to completion. Used by the form to reach the
//! relay and by the relay to reach the webhook.

use crate::error::TransportError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
  pub status: u16,
  pub body: String,
}

impl TransportResponse {
  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
  async fn post(
    &self,
    url: &str,
    content_type: &str,
    headers: &[(String, String)],
    body: Vec<u8>,
  ) -> Result<TransportResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
  client: reqwest::Client,
}

impl ReqwestTransport {
  pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
      builder = builder.timeout(timeout);
    }
    let client = builder
      .build()
      .map_err(|e| TransportError::Setup(e.to_string()))?;
    Ok(Self { client })
  }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
  #[instrument(name = "transport::post", skip(self, url, headers, body), fields(body_len = body.len()), err(Display))]
  async fn post(
    &self,
    url: &str,
    content_type: &str,
    headers: &[(String, String)],
    body: Vec<u8>,
  ) -> Result<TransportResponse, TransportError> {
    let mut request = self
      .client
      .post(url)
      .header(reqwest::header::CONTENT_TYPE, content_type)
      .body(body);
    for (name, value) in headers {
      request = request.header(name.as_str(), value.as_str());
    }

    // reqwest errors embed the request URL in their message.
    let response = request.send().await.map_err(|e| TransportError::Request {
      url: url.to_string(),
      source: e.without_url().into(),
    })?;
    let status = response.status().as_u16();
    // An unreadable body still carries a meaningful status.
    let body = response.text().await.unwrap_or_else(|e| {
      warn!(error = %e, status, "Outbound response body could not be read.");
      String::new()
    });
    debug!(status, "Outbound response received.");

    Ok(TransportResponse { status, body })
  }
}
