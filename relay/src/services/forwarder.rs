// relay/src/services/forwarder.rs

use crate::errors::{AppError, Result as AppResult};
use crate::models::RelayEnvelope;
use orderform::transport::{HttpTransport, JSON_CONTENT_TYPE};
use orderform::TransportError;
use tracing::{info, instrument, warn};

/// Sends the order bytes to the webhook exactly once and wraps whatever
/// comes back. Non-2xx answers are not errors here; they are reported in
/// the envelope with `ok: false`.
#[instrument(name = "forwarder::forward_order", skip(transport, webhook_url, payload), fields(payload_bytes = payload.len()))]
pub async fn forward_order(
  transport: &dyn HttpTransport,
  webhook_url: &str,
  payload: Vec<u8>,
) -> AppResult<RelayEnvelope> {
  let response = transport
    .post(webhook_url, JSON_CONTENT_TYPE, &[], payload)
    .await
    .map_err(|e| match e {
      // Only the cause goes back to the caller; the URL stays server-side.
      TransportError::Request { source, .. } => AppError::Relay(source.to_string()),
      other => AppError::Relay(other.to_string()),
    })?;

  let envelope = RelayEnvelope::relayed(response.status, response.body);
  if envelope.ok {
    info!(webhook_status = response.status, "Order relayed to webhook.");
  } else {
    warn!(webhook_status = response.status, "Webhook answered with a non-success status.");
  }
  Ok(envelope)
}
