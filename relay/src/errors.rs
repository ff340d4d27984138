// relay/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use orderform::CatalogError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  /// A setting the request needs is absent (e.g. the webhook URL).
  #[error("{0}")]
  ConfigurationMissing(String),

  /// The outbound call to the webhook could not be made.
  #[error("{0}")]
  Relay(String),

  #[error("Method not allowed")]
  MethodNotAllowed,

  #[error("Unauthorized")]
  Unauthorized,

  #[error("Malformed order payload: {0}")]
  MalformedPayload(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Catalog Error: {0}")]
  Catalog(#[from] CatalogError),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
      AppError::Unauthorized => StatusCode::UNAUTHORIZED,
      AppError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
      AppError::ConfigurationMissing(_)
      | AppError::Relay(_)
      | AppError::Config(_)
      | AppError::Catalog(_)
      | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, "Rejecting request");
    }
    // Every failure uses the same envelope as a relayed order.
    HttpResponse::build(status).json(json!({ "ok": false, "error": self.to_string() }))
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
