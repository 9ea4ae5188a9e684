use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::relay_error::InputError;

pub const ACCOUNT_ID: &str = "account_id";
pub const MRAP_ARN: &str = "mrap_arn";
pub const ROUTES: &str = "routes";

/// One route change for a regional bucket behind a multi-region access point.
///
/// The payload is owned by the control-plane API contract and passes through
/// the relay untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteUpdate(Value);

impl RouteUpdate {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteUpdateRequest {
    pub account_id: String,
    pub access_point_arn: String,
    pub routes: Vec<RouteUpdate>,
}

impl RouteUpdateRequest {
    /// Validates the loosely typed invocation payload.
    ///
    /// Fields are checked in the order `account_id`, `mrap_arn`, `routes`;
    /// the first problem found is returned. Unknown fields are ignored.
    pub fn from_event(event: Value) -> Result<Self, InputError> {
        let Value::Object(mut fields) = event else {
            return Err(InputError::NotAnObject);
        };

        let account_id = take_string(&mut fields, ACCOUNT_ID)?;
        let access_point_arn = take_string(&mut fields, MRAP_ARN)?;
        let routes = match take(&mut fields, ROUTES)? {
            Value::Array(routes) => routes.into_iter().map(RouteUpdate).collect(),
            other => {
                return Err(InputError::InvalidField(
                    ROUTES,
                    format!("expected an array, found {}", kind(&other)),
                ))
            }
        };

        Ok(Self {
            account_id,
            access_point_arn,
            routes,
        })
    }
}

// null counts as absent
fn take(fields: &mut Map<String, Value>, name: &'static str) -> Result<Value, InputError> {
    match fields.remove(name) {
        None | Some(Value::Null) => Err(InputError::MissingField(name)),
        Some(value) => Ok(value),
    }
}

fn take_string(fields: &mut Map<String, Value>, name: &'static str) -> Result<String, InputError> {
    match take(fields, name)? {
        Value::String(s) if s.is_empty() => {
            Err(InputError::InvalidField(name, "must not be empty".to_string()))
        }
        Value::String(s) => Ok(s),
        other => Err(InputError::InvalidField(
            name,
            format!("expected a string, found {}", kind(&other)),
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSubmissionResult {
    pub status: SubmissionStatus,
    pub routes: Vec<RouteUpdate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl RouteSubmissionResult {
    pub fn ok(routes: Vec<RouteUpdate>) -> Self {
        Self {
            status: SubmissionStatus::Ok,
            routes,
            error_detail: None,
        }
    }

    pub fn error(detail: String) -> Self {
        Self {
            status: SubmissionStatus::Error,
            routes: Vec::new(),
            error_detail: Some(detail),
        }
    }
}
