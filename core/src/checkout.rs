// orderform/src/checkout.rs

//! The order form flow: session on load, cart edits, one submission.
//!
//! ```text
//! Loading -> Ready -> Submitting -> Complete
//!                         \-> Ready (with error)
//! ```
//!
//! One flow serves every store; what differs per store is only the set of
//! visible products, which comes from the catalog's visibility rule.

use crate::cart::Cart;
use crate::catalog::{Catalog, Product, StoreCode};
use crate::error::SubmitError;
use crate::order::Order;
use crate::session::{self, Identity, Profile, SessionHost, SessionOutcome};
use crate::transport::{HttpTransport, TransportResponse, JSON_CONTENT_TYPE};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

pub const ORDER_KEY_HEADER: &str = "X-ORDER-KEY";
pub const DEFAULT_ORDER_SOURCE: &str = "liff";
pub const DEFAULT_CLOSE_DELAY: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone)]
pub struct FormConfig {
  /// Where orders are posted, normally the relay's `/api/order`.
  pub relay_endpoint: String,
  /// Tag written into `Order::source` and used as the order id prefix.
  pub source: String,
  /// Shared secret sent as `X-ORDER-KEY` when the relay checks it.
  pub order_key: Option<String>,
  /// Identity used when the host session cannot be acquired.
  /// `None` refuses submissions after a session failure instead.
  pub anonymous_fallback: Option<Profile>,
  pub close_delay: Duration,
}

impl FormConfig {
  pub fn new(relay_endpoint: impl Into<String>) -> Self {
    Self {
      relay_endpoint: relay_endpoint.into(),
      source: DEFAULT_ORDER_SOURCE.to_string(),
      order_key: None,
      anonymous_fallback: Some(Profile {
        display_name: "Test user".to_string(),
        user_id: "TEST_ID".to_string(),
      }),
      close_delay: DEFAULT_CLOSE_DELAY,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
  Loading,
  /// Editable. `error` carries the last user-visible failure, if any.
  Ready { error: Option<String> },
  Submitting,
  /// Terminal for the session.
  Complete { order_id: String },
}

pub struct OrderForm {
  catalog: Arc<Catalog>,
  host: Arc<dyn SessionHost>,
  transport: Arc<dyn HttpTransport>,
  config: FormConfig,
  store: StoreCode,
  cart: Cart,
  identity: Option<Identity>,
  session_failed: bool,
  state: FormState,
  sending: bool,
}

impl OrderForm {
  pub fn new(
    catalog: Arc<Catalog>,
    host: Arc<dyn SessionHost>,
    transport: Arc<dyn HttpTransport>,
    config: FormConfig,
    store: StoreCode,
  ) -> Self {
    Self {
      catalog,
      host,
      transport,
      config,
      store,
      cart: Cart::new(),
      identity: None,
      session_failed: false,
      state: FormState::Loading,
      sending: false,
    }
  }

  /// Acquires the host session and moves to `Ready`. Session failures never
  /// block this transition.
  #[instrument(name = "OrderForm::load", skip(self), fields(store = %self.store))]
  pub async fn load(&mut self) -> &FormState {
    if self.state != FormState::Loading {
      warn!(state = ?self.state, "load called after the form left Loading; ignoring.");
      return &self.state;
    }

    let error = match session::acquire(self.host.as_ref()).await {
      SessionOutcome::SignedIn(identity) => {
        self.identity = Some(identity);
        None
      }
      SessionOutcome::SignedOut => None,
      SessionOutcome::Failed(e) => {
        self.session_failed = true;
        match &self.config.anonymous_fallback {
          Some(placeholder) => {
            warn!(error = %e, "Continuing with the anonymous fallback identity.");
            self.identity = Some(Identity::anonymous(placeholder));
          }
          None => warn!(error = %e, "Anonymous fallback disabled; submissions will be refused."),
        }
        Some(e.to_string())
      }
    };

    self.state = FormState::Ready { error };
    info!(signed_in = self.identity.is_some(), "Order form ready.");
    &self.state
  }

  pub fn state(&self) -> &FormState {
    &self.state
  }

  pub fn is_sending(&self) -> bool {
    self.sending
  }

  pub fn identity(&self) -> Option<&Identity> {
    self.identity.as_ref()
  }

  pub fn store(&self) -> &StoreCode {
    &self.store
  }

  pub fn cart(&self) -> &Cart {
    &self.cart
  }

  pub fn visible_products(&self) -> Vec<&Product> {
    self.catalog.visible_for(&self.store)
  }

  /// Units requested across the products this store offers. Cart entries
  /// for anything else are never submitted and are not counted.
  pub fn total_quantity(&self) -> u64 {
    self
      .visible_products()
      .iter()
      .filter_map(|p| self.cart.quantity(&p.id))
      .fold(0u64, |total, q| total.saturating_add(q))
  }

  /// Applies a picker change. Edits after completion are refused.
  pub fn set_quantity(&mut self, product_id: &str, raw_value: &str) -> Result<(), SubmitError> {
    if let FormState::Complete { .. } = self.state {
      return Err(SubmitError::AlreadyComplete);
    }
    self.cart.set_quantity(product_id, raw_value);
    Ok(())
  }

  /// Validates the cart, builds an order and posts it to the relay.
  ///
  /// On failure the form goes back to `Ready` with the error message set and
  /// the cart untouched, so the user can correct it and submit again.
  ///
  /// Inside the host client a successful call only returns after
  /// `FormConfig::close_delay` has elapsed and the window was asked to close.
  /// The state is already `Complete` during that wait.
  #[instrument(name = "OrderForm::submit", skip(self), fields(store = %self.store, total = self.total_quantity()))]
  pub async fn submit(&mut self) -> Result<Order, SubmitError> {
    match self.state {
      FormState::Loading => return Err(SubmitError::NotReady),
      FormState::Complete { .. } => return Err(SubmitError::AlreadyComplete),
      FormState::Submitting => return Err(SubmitError::AlreadySending),
      FormState::Ready { .. } => {}
    }
    if self.sending {
      return Err(SubmitError::AlreadySending);
    }
    if self.total_quantity() == 0 {
      return Err(SubmitError::NothingToSubmit);
    }
    if self.session_failed && self.identity.is_none() {
      return self.fail(SubmitError::IdentityRequired);
    }

    self.sending = true;
    self.state = FormState::Submitting;

    let items = match self.cart.validate_for_submission(self.catalog.visible_for(&self.store)) {
      Ok(items) => items,
      Err(e) => return self.fail(e.into()),
    };
    let order = Order::new(
      &self.config.source,
      Utc::now(),
      &self.store,
      self.identity.as_ref(),
      items,
    );

    let response = match self.post(&order).await {
      Ok(response) => response,
      Err(e) => return self.fail(e),
    };
    if !response.is_success() {
      return self.fail(SubmitError::Rejected {
        status: response.status,
        body: response.body,
      });
    }

    info!(order_id = %order.order_id, items = order.items.len(), "Order submitted.");
    self.sending = false;
    self.state = FormState::Complete {
      order_id: order.order_id.clone(),
    };
    self.close_host_window().await;
    Ok(order)
  }

  async fn post(&self, order: &Order) -> Result<TransportResponse, SubmitError> {
    let body = serde_json::to_vec(order)?;
    let headers: Vec<(String, String)> = self
      .config
      .order_key
      .iter()
      .map(|key| (ORDER_KEY_HEADER.to_string(), key.clone()))
      .collect();

    let response = self
      .transport
      .post(&self.config.relay_endpoint, JSON_CONTENT_TYPE, &headers, body)
      .await?;
    Ok(response)
  }

  fn fail(&mut self, err: SubmitError) -> Result<Order, SubmitError> {
    warn!(error = %err, "Order submission failed.");
    self.sending = false;
    self.state = FormState::Ready {
      error: Some(err.to_string()),
    };
    Err(err)
  }

  async fn close_host_window(&self) {
    if !self.host.is_in_client() {
      return;
    }
    tokio::time::sleep(self.config.close_delay).await;
    if let Err(e) = self.host.close_window() {
      error!(error = %e, "Host window could not be closed after submission.");
    }
  }
}
