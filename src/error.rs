//! Errors surfaced by the HTTP/WebSocket layer.
//!
//! Grading never fails; these cover lookups of unknown ids and requests that
//! do not fit the current exam state.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use tracing::warn;

use crate::protocol::ErrorOut;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
  /// Unknown exercise, question or exam id.
  NotFound(String),
  /// Request is malformed or cannot be satisfied with the current settings.
  BadRequest(String),
  /// Request conflicts with the resource state (e.g. answering a finished exam).
  Conflict(String),
}

impl AppError {
  pub fn status(&self) -> StatusCode {
    match self {
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
      AppError::Conflict(_) => StatusCode::CONFLICT,
    }
  }
}

impl std::fmt::Display for AppError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
      AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
      AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
    }
  }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let status = self.status();
    warn!(target: "algebra_trainer", status = status.as_u16(), error = %self, "Request failed");
    (status, Json(ErrorOut { message: self.to_string() })).into_response()
  }
}
