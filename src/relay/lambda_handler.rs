use lambda_runtime::{Diagnostic, LambdaEvent};
use serde_json::Value;
use tracing::info;

use super::relay_error::RelayError;
use super::route_relay::RouteRelay;
use super::route_update::RouteSubmissionResult;

/// Runs one Lambda invocation through the relay.
///
/// Errors are reported to the runtime with `InputError` or
/// `ExternalServiceError` as the error type.
pub async fn handle(
    relay: &RouteRelay,
    event: LambdaEvent<Value>,
) -> Result<RouteSubmissionResult, Diagnostic> {
    let (payload, context) = event.into_parts();
    info!("Handling invocation {}", context.request_id);

    relay.handle_event(payload).await.map_err(diagnostic)
}

fn diagnostic(err: RelayError) -> Diagnostic {
    Diagnostic {
        error_type: err.error_type().to_string(),
        error_message: err.to_string(),
    }
}
