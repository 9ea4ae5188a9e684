#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mrap_relay::relay::control_plane::ControlPlane;
use mrap_relay::relay::relay_error::ControlPlaneError;
use mrap_relay::relay::route_relay::RouteRelay;
use mrap_relay::relay::route_update::RouteUpdate;
use serde_json::{json, Value};

pub const ACCOUNT_ID: &str = "111122223333";
pub const MRAP_ARN: &str = "arn:aws:s3::111122223333:accesspoint/mfzwi23gnjvgw.mrap";

#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedRoutes {
    pub account_id: String,
    pub mrap_arn: String,
    pub routes: Vec<RouteUpdate>,
}

/// Control plane stand-in that records every call and optionally fails.
#[derive(Default)]
pub struct RecordingControlPlane {
    calls: Mutex<Vec<SubmittedRoutes>>,
    failure: Option<ControlPlaneError>,
}

impl RecordingControlPlane {
    pub fn failing(failure: ControlPlaneError) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: Some(failure),
        }
    }

    pub fn calls(&self) -> Vec<SubmittedRoutes> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ControlPlane for RecordingControlPlane {
    async fn submit_routes(
        &self,
        account_id: &str,
        mrap_arn: &str,
        routes: &[RouteUpdate],
    ) -> Result<(), ControlPlaneError> {
        self.calls.lock().unwrap().push(SubmittedRoutes {
            account_id: account_id.to_string(),
            mrap_arn: mrap_arn.to_string(),
            routes: routes.to_vec(),
        });

        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }
}

pub fn relay_with(control_plane: Arc<RecordingControlPlane>) -> RouteRelay {
    RouteRelay::new(control_plane)
}

pub fn active_route() -> Value {
    json!({
        "Bucket": "bucket-use1",
        "Region": "us-east-1",
        "TrafficDialPercentage": 100
    })
}

pub fn event_with_routes(routes: Value) -> Value {
    json!({
        "account_id": ACCOUNT_ID,
        "mrap_arn": MRAP_ARN,
        "routes": routes,
    })
}

pub fn throttled() -> ControlPlaneError {
    ControlPlaneError::with_code(
        "SlowDown",
        "service error: SlowDown: Please reduce your request rate.",
    )
}
