//! Google Maps operations exposed as host-callable tools.

use async_trait::async_trait;
use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::maps::{
    DirectionsRequest, DistanceMatrixRequest, GeocodeRequest, MapsClient, NearbySearchRequest,
    Outcome, PlaceDetailsRequest, PlacesSearchRequest, ReverseGeocodeRequest, TimezoneRequest,
};
use crate::tool::{Tool, ToolError, ToolResult};

/// The Google Maps tools, one per adapter operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapsToolKind {
    Geocode,
    ReverseGeocode,
    PlacesSearch,
    NearbySearch,
    PlaceDetails,
    GetDirections,
    DistanceMatrix,
    TimezoneLookup,
}

impl MapsToolKind {
    pub const ALL: [MapsToolKind; 8] = [
        MapsToolKind::Geocode,
        MapsToolKind::ReverseGeocode,
        MapsToolKind::PlacesSearch,
        MapsToolKind::NearbySearch,
        MapsToolKind::PlaceDetails,
        MapsToolKind::GetDirections,
        MapsToolKind::DistanceMatrix,
        MapsToolKind::TimezoneLookup,
    ];

    /// Stable name the host calls the tool by.
    pub fn name(&self) -> &'static str {
        match self {
            MapsToolKind::Geocode => "geocode",
            MapsToolKind::ReverseGeocode => "reverse_geocode",
            MapsToolKind::PlacesSearch => "places_search",
            MapsToolKind::NearbySearch => "nearby_search",
            MapsToolKind::PlaceDetails => "place_details",
            MapsToolKind::GetDirections => "get_directions",
            MapsToolKind::DistanceMatrix => "distance_matrix",
            MapsToolKind::TimezoneLookup => "timezone_lookup",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn description(&self) -> &'static str {
        match self {
            MapsToolKind::Geocode => {
                "Convert an address or place name into geographic coordinates (latitude/longitude)."
            }
            MapsToolKind::ReverseGeocode => {
                "Convert geographic coordinates into a human-readable address."
            }
            MapsToolKind::PlacesSearch => "Search for places using Google Places API.",
            MapsToolKind::NearbySearch => "Find places within a specified area.",
            MapsToolKind::PlaceDetails => "Get detailed information about a specific place.",
            MapsToolKind::GetDirections => "Get directions between two locations.",
            MapsToolKind::DistanceMatrix => {
                "Calculate distance and time between multiple origins and destinations."
            }
            MapsToolKind::TimezoneLookup => "Get timezone information for a location.",
        }
    }

    /// JSON Schema of the tool's arguments.
    pub fn parameters_schema(&self) -> Value {
        match self {
            MapsToolKind::Geocode => schema::<GeocodeRequest>(),
            MapsToolKind::ReverseGeocode => schema::<ReverseGeocodeRequest>(),
            MapsToolKind::PlacesSearch => schema::<PlacesSearchRequest>(),
            MapsToolKind::NearbySearch => schema::<NearbySearchRequest>(),
            MapsToolKind::PlaceDetails => schema::<PlaceDetailsRequest>(),
            MapsToolKind::GetDirections => schema::<DirectionsRequest>(),
            MapsToolKind::DistanceMatrix => schema::<DistanceMatrixRequest>(),
            MapsToolKind::TimezoneLookup => schema::<TimezoneRequest>(),
        }
    }
}

fn schema<T: JsonSchema>() -> Value {
    serde_json::to_value(schema_for!(T)).unwrap_or_else(|_| serde_json::json!({"type": "object"}))
}

fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

fn into_result<T: Serialize>(outcome: Outcome<T>) -> Result<ToolResult, ToolError> {
    let error = outcome.error().map(str::to_string);
    let output = serde_json::to_value(&outcome)
        .map_err(|e| ToolError::ExecutionFailed(format!("Failed to serialize result: {}", e)))?;
    Ok(ToolResult { output, error })
}

/// A Google Maps operation wrapped as a [`Tool`].
#[derive(Debug, Clone)]
pub struct MapsTool {
    kind: MapsToolKind,
    client: Arc<MapsClient>,
}

impl MapsTool {
    pub fn new(kind: MapsToolKind, client: Arc<MapsClient>) -> Self {
        Self { kind, client }
    }

    pub fn kind(&self) -> MapsToolKind {
        self.kind
    }
}

#[async_trait]
impl Tool for MapsTool {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn description(&self) -> &str {
        self.kind.description()
    }

    fn parameters_schema(&self) -> Value {
        self.kind.parameters_schema()
    }

    async fn execute(&self, args: Value) -> Result<ToolResult, ToolError> {
        let client = &self.client;
        match self.kind {
            MapsToolKind::Geocode => into_result(client.geocode(&parse_args(args)?).await?),
            MapsToolKind::ReverseGeocode => {
                into_result(client.reverse_geocode(&parse_args(args)?).await?)
            }
            MapsToolKind::PlacesSearch => {
                into_result(client.places_search(&parse_args(args)?).await?)
            }
            MapsToolKind::NearbySearch => {
                into_result(client.nearby_search(&parse_args(args)?).await?)
            }
            MapsToolKind::PlaceDetails => {
                into_result(client.place_details(&parse_args(args)?).await?)
            }
            MapsToolKind::GetDirections => {
                into_result(client.get_directions(&parse_args(args)?).await?)
            }
            MapsToolKind::DistanceMatrix => {
                into_result(client.distance_matrix(&parse_args(args)?).await?)
            }
            MapsToolKind::TimezoneLookup => {
                into_result(client.timezone_lookup(&parse_args(args)?).await?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::client::MockTransport;
    use crate::maps::{MapsConfig, MapsError, INVALID_MODE_MESSAGE};
    use serde_json::json;

    fn tool(kind: MapsToolKind, transport: MockTransport, api_key: Option<&str>) -> MapsTool {
        let config = MapsConfig {
            api_key: api_key.map(str::to_string),
            ..MapsConfig::default()
        };
        let client = MapsClient::with_transport(config, Arc::new(transport));
        MapsTool::new(kind, Arc::new(client))
    }

    #[test]
    fn test_names_round_trip() {
        for kind in MapsToolKind::ALL {
            assert_eq!(MapsToolKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(MapsToolKind::from_name("route_planner"), None);
    }

    #[test]
    fn test_schema_lists_arguments() {
        let schema = MapsToolKind::NearbySearch.parameters_schema();
        let properties = schema["properties"].as_object().unwrap();
        assert!(properties.contains_key("location"));
        assert!(properties.contains_key("radius"));
        assert!(properties.contains_key("place_type"));
        assert_eq!(schema["required"], json!(["location"]));
    }

    #[tokio::test]
    async fn test_execute_returns_reshaped_output() {
        let mut transport = MockTransport::new();
        transport.expect_get_json().returning(|_, _| {
            Ok(json!({
                "status": "OK",
                "timeZoneId": "Europe/Paris",
                "timeZoneName": "Central European Standard Time",
                "dstOffset": 0,
                "rawOffset": 3600
            }))
        });

        let tool = tool(MapsToolKind::TimezoneLookup, transport, Some("test_api_key"));
        let result = tool
            .execute(json!({"location": "48.8566,2.3522", "timestamp": 1609459200}))
            .await
            .unwrap();
        assert!(!result.is_error());
        assert_eq!(result.output["timezone_id"], "Europe/Paris");
        assert_eq!(result.output["raw_offset"], 3600);
    }

    #[tokio::test]
    async fn test_execute_logical_error_is_data() {
        let mut transport = MockTransport::new();
        transport.expect_get_json().never();

        let tool = tool(MapsToolKind::GetDirections, transport, Some("test_api_key"));
        let result = tool
            .execute(json!({"origin": "A", "destination": "B", "mode": "flying"}))
            .await
            .unwrap();
        assert_eq!(result.error.as_deref(), Some(INVALID_MODE_MESSAGE));
        assert_eq!(result.output, json!({"error": INVALID_MODE_MESSAGE}));
    }

    #[tokio::test]
    async fn test_execute_missing_key_is_error() {
        let mut transport = MockTransport::new();
        transport.expect_get_json().never();

        let tool = tool(MapsToolKind::Geocode, transport, None);
        let result = tool.execute(json!({"query": "Paris"})).await;
        assert!(matches!(
            result,
            Err(ToolError::Maps(MapsError::MissingApiKey))
        ));
    }

    #[tokio::test]
    async fn test_execute_rejects_bad_arguments() {
        let mut transport = MockTransport::new();
        transport.expect_get_json().never();

        let tool = tool(MapsToolKind::ReverseGeocode, transport, Some("test_api_key"));
        let result = tool.execute(json!({"latitude": "north"})).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}
