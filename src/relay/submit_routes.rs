use std::sync::Arc;

use axum::{Extension, Json};
use serde_json::Value;

use super::relay_error::RelayError;
use super::route_relay::RouteRelay;
use super::route_update::RouteSubmissionResult;

pub async fn handle(
    relay: Extension<Arc<RouteRelay>>,
    Json(payload): Json<Value>,
) -> Result<Json<RouteSubmissionResult>, RelayError> {
    let result = relay.handle_event(payload).await?;
    Ok(Json(result))
}
