//! Error handling for the prorata web layer
//!
//! Converts calculator errors and extractor rejections into HTTP responses with
//! a JSON body naming the offending field where one is known.

use axum::{
    Json,
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use prorata_calculator::ProrationError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebError {
    /// Input rejected by the calculator (422 Unprocessable Entity)
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ProrationError),

    /// Body that could not be read at all: wrong content type, malformed JSON
    #[error("Malformed request: {message}")]
    Malformed { status: StatusCode, message: String },
}

/// JSON body returned for every error.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    /// Human readable description.
    pub error: String,
    /// Offending input field, when the error concerns a single field.
    pub field: Option<&'static str>,
}

impl WebError {
    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Malformed { status, .. } => *status,
        }
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Malformed { status: rejection.status(), message: rejection.body_text() }
    }
}

impl From<FormRejection> for WebError {
    fn from(rejection: FormRejection) -> Self {
        Self::Malformed { status: rejection.status(), message: rejection.body_text() }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            Self::InvalidInput(err) => ErrorBody { error: err.to_string(), field: Some(err.field()) },
            Self::Malformed { .. } => ErrorBody { error: self.to_string(), field: None },
        };
        (status, Json(body)).into_response()
    }
}
