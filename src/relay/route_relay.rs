use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info};

use super::control_plane::ControlPlane;
use super::relay_error::RelayError;
use super::route_update::{RouteSubmissionResult, RouteUpdateRequest};

/// Forwards route updates to the control plane, one call per request.
///
/// Holds no state besides the control-plane handle, so a single instance is
/// shared by every invocation in the process.
#[derive(Clone)]
pub struct RouteRelay {
    control_plane: Arc<dyn ControlPlane>,
}

impl RouteRelay {
    pub fn new(control_plane: Arc<dyn ControlPlane>) -> Self {
        Self { control_plane }
    }

    /// Parses a raw invocation payload and submits it.
    pub async fn handle_event(&self, event: Value) -> Result<RouteSubmissionResult, RelayError> {
        let request = RouteUpdateRequest::from_event(event).inspect_err(|e| {
            error!("Rejected invocation payload: {}", e);
        })?;
        self.submit(request).await
    }

    pub async fn submit(
        &self,
        request: RouteUpdateRequest,
    ) -> Result<RouteSubmissionResult, RelayError> {
        info!(
            "Submitting {} route update(s) for {} in account {}",
            request.routes.len(),
            request.access_point_arn,
            request.account_id
        );
        debug!("Route updates: {:?}", request.routes);

        if let Err(e) = self
            .control_plane
            .submit_routes(&request.account_id, &request.access_point_arn, &request.routes)
            .await
        {
            error!(
                "Route submission for {} failed: {}",
                request.access_point_arn, e
            );
            return Err(RelayError::ExternalService(e));
        }

        info!("Route submission for {} accepted", request.access_point_arn);
        Ok(RouteSubmissionResult::ok(request.routes))
    }
}
