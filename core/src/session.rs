// orderform/src/session.rs

//! Capability interface over the messaging-app host SDK.
//!
//! The form only needs two things from the host: an optional user identity
//! before submission, and the ability to close the hosting window once the
//! order went through. Everything else the SDK does stays behind this trait.

use crate::error::SessionError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
  pub display_name: String,
  pub user_id: String,
}

#[async_trait]
pub trait SessionHost: Send + Sync {
  async fn init(&self) -> Result<(), SessionError>;

  fn is_logged_in(&self) -> bool;

  /// Starts the host login flow. The page usually navigates away.
  fn login(&self) -> Result<(), SessionError>;

  fn is_in_client(&self) -> bool;

  async fn get_profile(&self) -> Result<Profile, SessionError>;

  fn close_window(&self) -> Result<(), SessionError>;
}

/// Who the order is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
  pub display_name: String,
  pub user_id: String,
  pub anonymous: bool,
}

impl From<Profile> for Identity {
  fn from(p: Profile) -> Self {
    Identity {
      display_name: p.display_name,
      user_id: p.user_id,
      anonymous: false,
    }
  }
}

impl Identity {
  pub fn anonymous(placeholder: &Profile) -> Self {
    Identity {
      display_name: placeholder.display_name.clone(),
      user_id: placeholder.user_id.clone(),
      anonymous: true,
    }
  }
}

/// Outcome of talking to the host on load.
#[derive(Debug)]
pub enum SessionOutcome {
  SignedIn(Identity),
  /// Init worked but there is no profile yet (login was started, or we are
  /// inside the client without a session).
  SignedOut,
  Failed(SessionError),
}

/// Runs the host handshake: init, then login or profile lookup.
#[instrument(name = "session::acquire", skip(host))]
pub async fn acquire(host: &dyn SessionHost) -> SessionOutcome {
  if let Err(e) = host.init().await {
    warn!(error = %e, "Host session init failed.");
    return SessionOutcome::Failed(e);
  }

  if !host.is_logged_in() {
    if !host.is_in_client() {
      info!("Not logged in outside the client; starting host login.");
      if let Err(e) = host.login() {
        warn!(error = %e, "Host login could not be started.");
        return SessionOutcome::Failed(e);
      }
    }
    return SessionOutcome::SignedOut;
  }

  match host.get_profile().await {
    Ok(profile) => {
      info!(user_id = %profile.user_id, "Host profile acquired.");
      SessionOutcome::SignedIn(profile.into())
    }
    Err(e) => {
      warn!(error = %e, "Host profile lookup failed.");
      SessionOutcome::Failed(e)
    }
  }
}
