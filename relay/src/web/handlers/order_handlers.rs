// relay/src/web/handlers/order_handlers.rs

use actix_web::{web, FromRequest, HttpRequest, HttpResponse};
use orderform::checkout::ORDER_KEY_HEADER;
use tracing::{info, instrument, warn};

use crate::config::RelayConfig;
use crate::errors::AppError;
use crate::services::forwarder;
use crate::state::AppState;

// --- Extractor for the optional shared-secret header ---
#[derive(Debug, Default)]
pub struct OrderKey(pub Option<String>);

// Never fails: whether a missing key matters is decided by the handler.
impl FromRequest for OrderKey {
  type Error = AppError;
  type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    let key = req
      .headers()
      .get(ORDER_KEY_HEADER)
      .and_then(|value| value.to_str().ok())
      .filter(|value| !value.is_empty())
      .map(String::from);
    futures_util::future::ready(Ok(OrderKey(key)))
  }
}

fn authorize(config: &RelayConfig, presented: &OrderKey) -> Result<(), AppError> {
  if !config.require_order_key {
    return Ok(());
  }
  match (&config.order_key, &presented.0) {
    (Some(expected), Some(given)) if expected == given => Ok(()),
    _ => {
      warn!(key_present = presented.0.is_some(), "Order key check failed.");
      Err(AppError::Unauthorized)
    }
  }
}

// --- Handler Implementation ---

#[instrument(
    name = "handler::relay_order",
    skip(app_state, order_key, body),
    fields(payload_bytes = body.len())
)]
pub async fn relay_order_handler(
  app_state: web::Data<AppState>,
  order_key: OrderKey,
  body: web::Bytes,
) -> Result<HttpResponse, AppError> {
  authorize(&app_state.config, &order_key)?;

  // Checked before anything touches the network.
  let webhook_url = app_state
    .config
    .webhook_url
    .as_deref()
    .ok_or_else(|| AppError::ConfigurationMissing("WEBHOOK_URL missing".to_string()))?;

  match serde_json::from_slice::<serde_json::Value>(&body) {
    Ok(serde_json::Value::Object(order)) => {
      info!(
        order_id = ?order.get("order_id").and_then(|v| v.as_str()),
        store_code = ?order.get("store_code").and_then(|v| v.as_str()),
        "Relaying order."
      );
    }
    Ok(_) => return Err(AppError::MalformedPayload("expected a JSON object".to_string())),
    Err(e) => return Err(AppError::MalformedPayload(e.to_string())),
  }

  // The original bytes go out, not a re-encoding.
  let envelope = forwarder::forward_order(app_state.transport.as_ref(), webhook_url, body.to_vec()).await?;

  let mut response = if envelope.ok {
    HttpResponse::Ok()
  } else {
    HttpResponse::BadGateway()
  };
  let pretty = serde_json::to_string_pretty(&envelope).map_err(|e| AppError::Internal(e.to_string()))?;
  Ok(response.content_type("application/json").body(pretty))
}

pub async fn preflight_handler() -> HttpResponse {
  HttpResponse::Ok().finish()
}

pub async fn method_not_allowed_handler(req: HttpRequest) -> Result<HttpResponse, AppError> {
  warn!(method = %req.method(), path = %req.path(), "Unsupported method on order endpoint.");
  Err(AppError::MethodNotAllowed)
}
