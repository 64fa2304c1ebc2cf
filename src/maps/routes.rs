use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::{Endpoint, MapsClient, MapsError, Query};
use super::status::{ApiStatus, Outcome};
use super::types::{DirectionsRequest, DistanceMatrixRequest, TextValue, TravelMode};

/// Only the first leg of the first route is read; the rest stay undecoded.
#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RouteWire {
    #[serde(default)]
    legs: Vec<Value>,
    overview_polyline: PolylineWire,
}

#[derive(Debug, Deserialize)]
struct PolylineWire {
    points: String,
}

#[derive(Debug, Deserialize)]
struct LegWire {
    start_address: String,
    end_address: String,
    distance: TextValue,
    duration: TextValue,
    steps: Vec<StepWire>,
}

#[derive(Debug, Deserialize)]
struct StepWire {
    html_instructions: String,
    distance: TextValue,
    duration: TextValue,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixResponse {
    origin_addresses: Vec<String>,
    destination_addresses: Vec<String>,
    rows: Vec<RowWire>,
}

#[derive(Debug, Deserialize)]
struct RowWire {
    elements: Vec<ElementWire>,
}

#[derive(Debug, Deserialize)]
struct ElementWire {
    status: ApiStatus,
    #[serde(default)]
    distance: Option<TextValue>,
    #[serde(default)]
    duration: Option<TextValue>,
}

/// One step of a directions leg.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionStep {
    /// HTML formatted instruction
    pub instruction: String,
    pub distance: String,
    pub duration: String,
}

/// First leg of the first route between two locations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Directions {
    pub start_address: String,
    pub end_address: String,
    pub distance: String,
    pub duration: String,
    pub steps: Vec<DirectionStep>,
    /// Encoded polyline of the whole route
    pub overview_polyline: String,
}

/// One origin/destination pair of a distance matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MatrixEntry {
    Route {
        origin: String,
        destination: String,
        distance: String,
        duration: String,
    },
    /// The pair failed; `error` is the element status.
    Failed {
        origin: String,
        destination: String,
        error: String,
    },
}

/// Flattened origin × destination results, row-major.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceMatrix {
    pub results: Vec<MatrixEntry>,
}

impl MapsClient {
    /// Gets directions between two locations.
    pub async fn get_directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Outcome<Directions>, MapsError> {
        let key = self.api_key()?;
        let mode: TravelMode = match request.mode.parse() {
            Ok(mode) => mode,
            Err(message) => return Ok(Outcome::failure(message)),
        };

        let query: Query = vec![
            ("origin", request.origin.clone()),
            ("destination", request.destination.clone()),
            ("mode", mode.to_string()),
            ("key", key),
        ];

        let response: DirectionsResponse =
            match self.fetch("Directions", Endpoint::Directions, query).await? {
                Outcome::Success(response) => response,
                Outcome::Failure { error } => return Ok(Outcome::Failure { error }),
            };

        let Some(route) = response.routes.into_iter().next() else {
            return Ok(Outcome::failure("No routes found"));
        };
        let route: RouteWire = serde_json::from_value(route)?;
        let leg = route
            .legs
            .into_iter()
            .next()
            .ok_or_else(|| MapsError::MalformedResponse("route has no legs".to_string()))?;
        let leg: LegWire = serde_json::from_value(leg)?;

        Ok(Outcome::Success(Directions {
            start_address: leg.start_address,
            end_address: leg.end_address,
            distance: leg.distance.text,
            duration: leg.duration.text,
            steps: leg
                .steps
                .into_iter()
                .map(|step| DirectionStep {
                    instruction: step.html_instructions,
                    distance: step.distance.text,
                    duration: step.duration.text,
                })
                .collect(),
            overview_polyline: route.overview_polyline.points,
        }))
    }

    /// Calculates distance and travel time for every origin/destination pair.
    pub async fn distance_matrix(
        &self,
        request: &DistanceMatrixRequest,
    ) -> Result<Outcome<DistanceMatrix>, MapsError> {
        let key = self.api_key()?;
        let mode: TravelMode = match request.mode.parse() {
            Ok(mode) => mode,
            Err(message) => return Ok(Outcome::failure(message)),
        };

        let query: Query = vec![
            ("origins", request.origins.join("|")),
            ("destinations", request.destinations.join("|")),
            ("mode", mode.to_string()),
            ("key", key),
        ];

        let response: DistanceMatrixResponse = match self
            .fetch("Distance matrix", Endpoint::DistanceMatrix, query)
            .await?
        {
            Outcome::Success(response) => response,
            Outcome::Failure { error } => return Ok(Outcome::Failure { error }),
        };

        let mut results = Vec::new();
        for (i, row) in response.rows.into_iter().enumerate() {
            let origin = address_at(&response.origin_addresses, i, "origin")?;
            for (j, element) in row.elements.into_iter().enumerate() {
                let destination = address_at(&response.destination_addresses, j, "destination")?;
                results.push(matrix_entry(origin.clone(), destination, element)?);
            }
        }

        Ok(Outcome::Success(DistanceMatrix { results }))
    }
}

fn address_at(addresses: &[String], index: usize, kind: &str) -> Result<String, MapsError> {
    addresses.get(index).cloned().ok_or_else(|| {
        MapsError::MalformedResponse(format!("no {} address at index {}", kind, index))
    })
}

fn matrix_entry(
    origin: String,
    destination: String,
    element: ElementWire,
) -> Result<MatrixEntry, MapsError> {
    if !element.status.is_ok() {
        return Ok(MatrixEntry::Failed {
            origin,
            destination,
            error: element.status.to_string(),
        });
    }

    match (element.distance, element.duration) {
        (Some(distance), Some(duration)) => Ok(MatrixEntry::Route {
            origin,
            destination,
            distance: distance.text,
            duration: duration.text,
        }),
        _ => Err(MapsError::MalformedResponse(
            "OK element without distance or duration".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::client::MockTransport;
    use crate::maps::types::INVALID_MODE_MESSAGE;
    use crate::maps::MapsConfig;
    use serde_json::json;
    use std::sync::Arc;

    fn client_with(transport: MockTransport) -> MapsClient {
        let config = MapsConfig {
            api_key: Some("test_api_key".to_string()),
            ..MapsConfig::default()
        };
        MapsClient::with_transport(config, Arc::new(transport))
    }

    fn directions_response() -> Value {
        json!({
            "status": "OK",
            "routes": [{
                "legs": [{
                    "start_address": "San Francisco, CA, USA",
                    "end_address": "Los Angeles, CA, USA",
                    "distance": {"text": "383 mi", "value": 617000},
                    "duration": {"text": "6 hours 30 mins", "value": 23400},
                    "steps": [{
                        "html_instructions": "Head south on US-101 S",
                        "distance": {"text": "50 mi", "value": 80467},
                        "duration": {"text": "1 hour", "value": 3600}
                    }]
                }],
                "overview_polyline": {"points": "encoded_polyline_data"}
            }]
        })
    }

    #[tokio::test]
    async fn test_get_directions_success() {
        let mut transport = MockTransport::new();
        transport
            .expect_get_json()
            .withf(|url, query| {
                url.ends_with("/directions/json")
                    && *query
                        == vec![
                            ("origin", "San Francisco, CA".to_string()),
                            ("destination", "Los Angeles, CA".to_string()),
                            ("mode", "driving".to_string()),
                            ("key", "test_api_key".to_string()),
                        ]
            })
            .times(1)
            .returning(|_, _| Ok(directions_response()));

        let outcome = client_with(transport)
            .get_directions(&DirectionsRequest::new("San Francisco, CA", "Los Angeles, CA"))
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({
                "start_address": "San Francisco, CA, USA",
                "end_address": "Los Angeles, CA, USA",
                "distance": "383 mi",
                "duration": "6 hours 30 mins",
                "steps": [{
                    "instruction": "Head south on US-101 S",
                    "distance": "50 mi",
                    "duration": "1 hour"
                }],
                "overview_polyline": "encoded_polyline_data"
            })
        );
    }

    #[tokio::test]
    async fn test_get_directions_invalid_mode() {
        let mut transport = MockTransport::new();
        transport.expect_get_json().never();

        let request = DirectionsRequest::new("A", "B").with_mode("flying");
        let outcome = client_with(transport).get_directions(&request).await.unwrap();
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"error": INVALID_MODE_MESSAGE})
        );
    }

    #[tokio::test]
    async fn test_get_directions_no_routes() {
        let mut transport = MockTransport::new();
        transport
            .expect_get_json()
            .returning(|_, _| Ok(json!({"status": "OK", "routes": []})));

        let outcome = client_with(transport)
            .get_directions(&DirectionsRequest::new("A", "B").with_mode("walking"))
            .await
            .unwrap();
        assert_eq!(outcome.error(), Some("No routes found"));
    }

    #[tokio::test]
    async fn test_get_directions_status_error() {
        let mut transport = MockTransport::new();
        transport
            .expect_get_json()
            .returning(|_, _| Ok(json!({"status": "NOT_FOUND", "routes": []})));

        let outcome = client_with(transport)
            .get_directions(&DirectionsRequest::new("Nowhere", "Elsewhere"))
            .await
            .unwrap();
        assert_eq!(outcome.error(), Some("Directions failed: NOT_FOUND"));
    }

    #[tokio::test]
    async fn test_get_directions_route_without_legs() {
        let mut transport = MockTransport::new();
        transport.expect_get_json().returning(|_, _| {
            Ok(json!({
                "status": "OK",
                "routes": [{"legs": [], "overview_polyline": {"points": ""}}]
            }))
        });

        let result = client_with(transport)
            .get_directions(&DirectionsRequest::new("A", "B"))
            .await;
        assert!(matches!(result, Err(MapsError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_get_directions_ignores_partial_alternatives() {
        let mut transport = MockTransport::new();
        transport.expect_get_json().returning(|_, _| {
            let mut response = directions_response();
            response["routes"]
                .as_array_mut()
                .unwrap()
                .push(json!({"summary": "alt"}));
            response["routes"][0]["legs"]
                .as_array_mut()
                .unwrap()
                .push(json!({"start_address": "Los Angeles, CA, USA"}));
            Ok(response)
        });

        let outcome = client_with(transport)
            .get_directions(&DirectionsRequest::new("San Francisco, CA", "Los Angeles, CA"))
            .await
            .unwrap();
        let directions = outcome.success().unwrap();
        assert_eq!(directions.distance, "383 mi");
        assert_eq!(directions.overview_polyline, "encoded_polyline_data");
    }

    #[tokio::test]
    async fn test_distance_matrix_success() {
        let mut transport = MockTransport::new();
        transport
            .expect_get_json()
            .withf(|url, query| {
                url.ends_with("/distancematrix/json")
                    && *query
                        == vec![
                            ("origins", "San Francisco, CA|Oakland, CA".to_string()),
                            ("destinations", "Los Angeles, CA".to_string()),
                            ("mode", "transit".to_string()),
                            ("key", "test_api_key".to_string()),
                        ]
            })
            .times(1)
            .returning(|_, _| {
                Ok(json!({
                    "status": "OK",
                    "origin_addresses": ["San Francisco, CA, USA", "Oakland, CA, USA"],
                    "destination_addresses": ["Los Angeles, CA, USA"],
                    "rows": [
                        {"elements": [{
                            "status": "OK",
                            "distance": {"text": "383 mi", "value": 617000},
                            "duration": {"text": "6 hours 30 mins", "value": 23400}
                        }]},
                        {"elements": [{"status": "ZERO_RESULTS"}]}
                    ]
                }))
            });

        let request = DistanceMatrixRequest::new(
            vec!["San Francisco, CA".to_string(), "Oakland, CA".to_string()],
            vec!["Los Angeles, CA".to_string()],
        )
        .with_mode("transit");
        let outcome = client_with(transport).distance_matrix(&request).await.unwrap();

        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({
                "results": [
                    {
                        "origin": "San Francisco, CA, USA",
                        "destination": "Los Angeles, CA, USA",
                        "distance": "383 mi",
                        "duration": "6 hours 30 mins"
                    },
                    {
                        "origin": "Oakland, CA, USA",
                        "destination": "Los Angeles, CA, USA",
                        "error": "ZERO_RESULTS"
                    }
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_distance_matrix_element_error() {
        let mut transport = MockTransport::new();
        transport.expect_get_json().returning(|_, _| {
            Ok(json!({
                "status": "OK",
                "origin_addresses": ["San Francisco, CA, USA"],
                "destination_addresses": ["InvalidDestination"],
                "rows": [{"elements": [{"status": "NOT_FOUND"}]}]
            }))
        });

        let request = DistanceMatrixRequest::new(
            vec!["San Francisco, CA".to_string()],
            vec!["InvalidDestination".to_string()],
        );
        let outcome = client_with(transport).distance_matrix(&request).await.unwrap();
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({
                "results": [{
                    "origin": "San Francisco, CA, USA",
                    "destination": "InvalidDestination",
                    "error": "NOT_FOUND"
                }]
            })
        );
    }

    #[tokio::test]
    async fn test_distance_matrix_invalid_mode() {
        let mut transport = MockTransport::new();
        transport.expect_get_json().never();

        let request = DistanceMatrixRequest::new(vec!["A".to_string()], vec!["B".to_string()])
            .with_mode("teleport");
        let outcome = client_with(transport).distance_matrix(&request).await.unwrap();
        assert_eq!(outcome.error(), Some(INVALID_MODE_MESSAGE));
    }

    #[tokio::test]
    async fn test_distance_matrix_status_error() {
        let mut transport = MockTransport::new();
        transport.expect_get_json().returning(|_, _| {
            Ok(json!({"status": "MAX_ELEMENTS_EXCEEDED", "error_message": "Too many elements"}))
        });

        let request = DistanceMatrixRequest::new(vec!["A".to_string()], vec!["B".to_string()]);
        let outcome = client_with(transport).distance_matrix(&request).await.unwrap();
        assert_eq!(
            outcome.error(),
            Some("Distance matrix failed: Too many elements")
        );
    }

    #[tokio::test]
    async fn test_distance_matrix_missing_address_is_malformed() {
        let mut transport = MockTransport::new();
        transport.expect_get_json().returning(|_, _| {
            Ok(json!({
                "status": "OK",
                "origin_addresses": [],
                "destination_addresses": ["B"],
                "rows": [{"elements": [{"status": "NOT_FOUND"}]}]
            }))
        });

        let request = DistanceMatrixRequest::new(vec!["A".to_string()], vec!["B".to_string()]);
        let result = client_with(transport).distance_matrix(&request).await;
        assert!(matches!(result, Err(MapsError::MalformedResponse(_))));
    }
}
