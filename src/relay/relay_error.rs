use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use super::route_update::RouteSubmissionResult;

/// The invocation payload is missing a field or has one of the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("invocation payload must be a JSON object")]
    NotAnObject,
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("invalid field '{0}': {1}")]
    InvalidField(&'static str, String),
}

/// Failure reported by (or on the way to) the control plane.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ControlPlaneError {
    /// Service error code such as `AccessDenied` or `SlowDown`, when known.
    pub code: Option<String>,
    pub message: String,
}

impl ControlPlaneError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid input: {0}")]
    Input(#[from] InputError),
    #[error("control plane request failed: {0}")]
    ExternalService(#[from] ControlPlaneError),
}

impl RelayError {
    pub fn error_type(&self) -> &'static str {
        match self {
            RelayError::Input(_) => "InputError",
            RelayError::ExternalService(_) => "ExternalServiceError",
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            RelayError::Input(_) => StatusCode::BAD_REQUEST,
            RelayError::ExternalService(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    #[serde(flatten)]
    pub result: RouteSubmissionResult,
    pub error_type: String,
    pub request_id: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let status_code = self.http_status();

        let body = ErrorBody {
            result: RouteSubmissionResult::error(self.to_string()),
            error_type: self.error_type().to_string(),
            request_id,
        };

        let header = HeaderValue::from_str(&body.request_id);
        let mut response = (status_code, Json(body)).into_response();
        if let Ok(value) = header {
            response.headers_mut().insert("x-request-id", value);
        }

        response
    }
}
