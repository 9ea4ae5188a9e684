use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, ConfigLoader, SdkConfig};
use aws_sdk_s3control::config::Region;
use aws_sdk_s3control::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3control::types::MultiRegionAccessPointRoute;
use aws_sdk_s3control::Client;
use serde_json::{Map, Value};
use tracing::debug;

use super::relay_error::ControlPlaneError;
use super::route_update::RouteUpdate;
use crate::config::Config;

/// Applies route changes to a multi-region access point.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    async fn submit_routes(
        &self,
        account_id: &str,
        mrap_arn: &str,
        routes: &[RouteUpdate],
    ) -> Result<(), ControlPlaneError>;
}

/// S3 Control client for `SubmitMultiRegionAccessPointRoutes`.
///
/// SDK retries are disabled: every call is a single attempt and its failure
/// reaches the caller as-is.
#[derive(Clone)]
pub struct S3ControlPlane {
    client: Client,
}

impl S3ControlPlane {
    pub async fn from_config(config: &Config) -> Self {
        Self::from_sdk_config(&sdk_config_loader(config).load().await)
    }

    pub fn from_sdk_config(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

/// Region, endpoint override and retry policy for the control-plane client.
///
/// Credentials and the HTTP client are left to the SDK defaults.
pub fn sdk_config_loader(config: &Config) -> ConfigLoader {
    let loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.control_plane_region.clone()))
        .retry_config(RetryConfig::disabled());

    match &config.endpoint_url {
        Some(endpoint) => loader.endpoint_url(endpoint.clone()),
        None => loader,
    }
}

#[async_trait]
impl ControlPlane for S3ControlPlane {
    async fn submit_routes(
        &self,
        account_id: &str,
        mrap_arn: &str,
        routes: &[RouteUpdate],
    ) -> Result<(), ControlPlaneError> {
        let route_updates = routes
            .iter()
            .map(to_sdk_route)
            .collect::<Result<Vec<_>, _>>()?;

        let output = self
            .client
            .submit_multi_region_access_point_routes()
            .account_id(account_id)
            .mrap(mrap_arn)
            .set_route_updates(Some(route_updates))
            .send()
            .await
            .map_err(|err| {
                let message = DisplayErrorContext(&err).to_string();
                match err.code() {
                    Some(code) => ControlPlaneError::with_code(code, message),
                    None => ControlPlaneError::new(message),
                }
            })?;

        debug!("SubmitMultiRegionAccessPointRoutes response: {:?}", output);
        Ok(())
    }
}

const ROUTE_FIELDS: [&str; 3] = ["Bucket", "Region", "TrafficDialPercentage"];

/// Maps a pass-through route onto the SDK shape.
///
/// Only `Bucket`, `Region` and `TrafficDialPercentage` exist in the API. Any
/// other key is rejected rather than dropped, so what is sent is always the
/// route that gets echoed back. Every shape problem fails with
/// `InvalidParameter` before anything is sent.
pub fn to_sdk_route(route: &RouteUpdate) -> Result<MultiRegionAccessPointRoute, ControlPlaneError> {
    let fields = route
        .as_value()
        .as_object()
        .ok_or_else(|| invalid_parameter("route update must be an object"))?;

    if let Some(unknown) = fields
        .keys()
        .find(|key| !ROUTE_FIELDS.contains(&key.as_str()))
    {
        return Err(invalid_parameter(format!(
            "unknown route update field {}, expected one of {}",
            unknown,
            ROUTE_FIELDS.join(", ")
        )));
    }

    let bucket = optional_string(fields, "Bucket")?;
    let region = optional_string(fields, "Region")?;
    let traffic_dial_percentage = fields
        .get("TrafficDialPercentage")
        .ok_or_else(|| invalid_parameter("route update is missing TrafficDialPercentage"))?
        .as_i64()
        .and_then(|dial| i32::try_from(dial).ok())
        .ok_or_else(|| invalid_parameter("TrafficDialPercentage must be an integer"))?;

    MultiRegionAccessPointRoute::builder()
        .set_bucket(bucket)
        .set_region(region)
        .traffic_dial_percentage(traffic_dial_percentage)
        .build()
        .map_err(|err| invalid_parameter(err.to_string()))
}

fn optional_string(
    fields: &Map<String, Value>,
    name: &str,
) -> Result<Option<String>, ControlPlaneError> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(invalid_parameter(format!("{} must be a string", name))),
    }
}

fn invalid_parameter(message: impl Into<String>) -> ControlPlaneError {
    ControlPlaneError::with_code("InvalidParameter", message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_sdk_route() {
        let route = RouteUpdate::new(json!({
            "Bucket": "bucket-use1",
            "Region": "us-east-1",
            "TrafficDialPercentage": 100
        }));

        let sdk_route = to_sdk_route(&route).unwrap();
        assert_eq!(sdk_route.bucket(), Some("bucket-use1"));
        assert_eq!(sdk_route.region(), Some("us-east-1"));
    }

    #[test]
    fn test_to_sdk_route_bucket_only() {
        let route = RouteUpdate::new(json!({"Bucket": "bucket-usw2", "TrafficDialPercentage": 0}));

        let sdk_route = to_sdk_route(&route).unwrap();
        assert_eq!(sdk_route.bucket(), Some("bucket-usw2"));
        assert_eq!(sdk_route.region(), None);
    }

    #[test]
    fn test_to_sdk_route_rejects_unrepresentable() {
        let cases = [
            json!("bucket-use1"),
            json!({"Bucket": "bucket-use1"}),
            json!({"Bucket": "bucket-use1", "TrafficDialPercentage": "100"}),
            json!({"Bucket": 7, "TrafficDialPercentage": 100}),
            json!({"Bucket": "bucket-use1", "TrafficDial": {"status": "ACTIVE"}}),
            json!({
                "Bucket": "bucket-use1",
                "TrafficDialPercentage": 100,
                "TrafficDial": {"status": "PASSIVE"},
                "Bukcet": "typo-bucket"
            }),
            json!({"Bucket": "bucket-use1", "Region": "us-east-1", "TrafficDialPercentage": 100, "Weight": 1}),
        ];

        for case in cases {
            let err = to_sdk_route(&RouteUpdate::new(case)).unwrap_err();
            assert_eq!(err.code.as_deref(), Some("InvalidParameter"));
        }
    }
}
