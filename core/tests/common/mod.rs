// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use orderform::catalog::{Catalog, Product, VisibilityGroup, VisibilityRule};
use orderform::error::{SessionError, TransportError};
use orderform::session::{Profile, SessionHost};
use orderform::transport::{HttpTransport, TransportResponse};
use parking_lot::Mutex;
use std::collections::VecDeque;
use tracing::Level;

// --- Tracing ---
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

// --- Catalogs ---
pub fn product(id: &str, moq: u32) -> Product {
  Product {
    id: id.to_string(),
    name: format!("Product {}", id),
    moq,
    quantity_options: vec![moq, moq + 1, moq + 5],
  }
}

/// `A` (moq 5) for everyone, `B` (moq 1) and `C` (moq 2) for store `S1` only.
pub fn small_catalog() -> Catalog {
  Catalog::new(
    vec![product("A", 5), product("B", 1), product("C", 2)],
    VisibilityRule {
      default: vec!["A".to_string()],
      groups: vec![VisibilityGroup {
        name: "s1".to_string(),
        stores: vec!["S1".to_string()],
        products: vec!["C".to_string(), "B".to_string()],
      }],
    },
  )
  .expect("small catalog is valid")
}

// --- Host session double ---
#[derive(Debug, Clone)]
pub struct HostScript {
  pub init_fails: bool,
  pub logged_in: bool,
  pub in_client: bool,
  pub profile_fails: bool,
  pub profile: Profile,
}

impl Default for HostScript {
  fn default() -> Self {
    Self {
      init_fails: false,
      logged_in: true,
      in_client: false,
      profile_fails: false,
      profile: Profile {
        display_name: "Jane".to_string(),
        user_id: "U-jane".to_string(),
      },
    }
  }
}

#[derive(Debug)]
pub struct ScriptedHost {
  pub script: HostScript,
  pub calls: Mutex<Vec<&'static str>>,
}

impl ScriptedHost {
  pub fn new(script: HostScript) -> Self {
    Self {
      script,
      calls: Mutex::new(Vec::new()),
    }
  }

  pub fn calls(&self) -> Vec<&'static str> {
    self.calls.lock().clone()
  }
}

#[async_trait]
impl SessionHost for ScriptedHost {
  async fn init(&self) -> Result<(), SessionError> {
    self.calls.lock().push("init");
    if self.script.init_fails {
      return Err(SessionError::Unavailable("host SDK not loaded".to_string()));
    }
    Ok(())
  }

  fn is_logged_in(&self) -> bool {
    self.calls.lock().push("is_logged_in");
    self.script.logged_in
  }

  fn login(&self) -> Result<(), SessionError> {
    self.calls.lock().push("login");
    Ok(())
  }

  fn is_in_client(&self) -> bool {
    self.calls.lock().push("is_in_client");
    self.script.in_client
  }

  async fn get_profile(&self) -> Result<Profile, SessionError> {
    self.calls.lock().push("get_profile");
    if self.script.profile_fails {
      return Err(SessionError::Unavailable("profile scope missing".to_string()));
    }
    Ok(self.script.profile.clone())
  }

  fn close_window(&self) -> Result<(), SessionError> {
    self.calls.lock().push("close_window");
    Ok(())
  }
}

// --- Transport double ---
#[derive(Debug, Clone)]
pub struct RecordedPost {
  pub url: String,
  pub content_type: String,
  pub headers: Vec<(String, String)>,
  pub body: Vec<u8>,
}

impl RecordedPost {
  pub fn json(&self) -> serde_json::Value {
    serde_json::from_slice(&self.body).expect("recorded body is JSON")
  }
}

/// Replies from a queue; an empty queue answers 200 "ok".
#[derive(Debug, Default)]
pub struct StubTransport {
  pub replies: Mutex<VecDeque<Result<TransportResponse, String>>>,
  pub posts: Mutex<Vec<RecordedPost>>,
}

impl StubTransport {
  pub fn replying(replies: Vec<Result<TransportResponse, String>>) -> Self {
    Self {
      replies: Mutex::new(replies.into()),
      posts: Mutex::new(Vec::new()),
    }
  }

  pub fn posts(&self) -> Vec<RecordedPost> {
    self.posts.lock().clone()
  }
}

pub fn reply(status: u16, body: &str) -> Result<TransportResponse, String> {
  Ok(TransportResponse {
    status,
    body: body.to_string(),
  })
}

#[async_trait]
impl HttpTransport for StubTransport {
  async fn post(
    &self,
    url: &str,
    content_type: &str,
    headers: &[(String, String)],
    body: Vec<u8>,
  ) -> Result<TransportResponse, TransportError> {
    self.posts.lock().push(RecordedPost {
      url: url.to_string(),
      content_type: content_type.to_string(),
      headers: headers.to_vec(),
      body,
    });
    match self.replies.lock().pop_front() {
      Some(Ok(response)) => Ok(response),
      Some(Err(message)) => Err(TransportError::Request {
        url: url.to_string(),
        source: anyhow::anyhow!(message),
      }),
      None => Ok(TransportResponse {
        status: 200,
        body: "ok".to_string(),
      }),
    }
  }
}
