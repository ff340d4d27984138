// orderform/src/order.rs

use crate::catalog::StoreCode;
use crate::session::Identity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
  pub sku: String,
  pub qty: u64,
}

/// Submission-time snapshot of the cart, in the shape the webhook consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
  pub source: String,
  /// `<source>-<unix millis>`. A downstream idempotency hint, not enforced here.
  pub order_id: String,
  pub store_code: String,
  #[serde(rename = "line_user_id")]
  pub user_id: Option<String>,
  #[serde(rename = "line_user_name")]
  pub user_name: Option<String>,
  pub items: Vec<OrderItem>,
}

impl Order {
  pub fn new(
    source: &str,
    submitted_at: DateTime<Utc>,
    store: &StoreCode,
    identity: Option<&Identity>,
    items: Vec<OrderItem>,
  ) -> Self {
    Self {
      source: source.to_string(),
      order_id: order_id_for(source, submitted_at),
      store_code: store.as_str().to_string(),
      user_id: identity.map(|i| i.user_id.clone()),
      user_name: identity.map(|i| i.display_name.clone()),
      items,
    }
  }

  pub fn total_quantity(&self) -> u64 {
    self.items.iter().fold(0u64, |total, i| total.saturating_add(i.qty))
  }
}

pub fn order_id_for(source: &str, submitted_at: DateTime<Utc>) -> String {
  format!("{}-{}", source, submitted_at.timestamp_millis())
}
