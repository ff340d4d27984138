// relay/src/models/relay_envelope.rs

use serde::Serialize;

/// Body of every `/api/order` response. Successful relays fill the
/// `make_*` fields, local failures fill `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayEnvelope {
  pub ok: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub make_status: Option<u16>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub make_body: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl RelayEnvelope {
  pub fn relayed(status: u16, body: String) -> Self {
    Self {
      ok: (200..300).contains(&status),
      make_status: Some(status),
      make_body: Some(body),
      error: None,
    }
  }
}
