use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::config::MapsConfig;
use super::status::{ApiStatus, Outcome};

/// Query parameters in the order they are sent upstream.
pub type Query = Vec<(&'static str, String)>;

/// Errors that abort a maps call instead of producing an [`Outcome`].
#[derive(Debug, thiserror::Error)]
pub enum MapsError {
    /// No API key was configured
    #[error("GOOGLE_MAPS_API_KEY environment variable is required")]
    MissingApiKey,
    /// The request never completed
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-success HTTP status
    #[error("HTTP error: {status} - {body}")]
    HttpStatus { status: u16, body: String },
    /// The response body was not the expected JSON
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),
    /// The response decoded but is missing data the reshaping depends on
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Google Maps endpoints used by the tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Geocode,
    TextSearch,
    NearbySearch,
    PlaceDetails,
    Directions,
    DistanceMatrix,
    Timezone,
}

impl Endpoint {
    /// Path relative to the base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Geocode => "geocode/json",
            Endpoint::TextSearch => "place/textsearch/json",
            Endpoint::NearbySearch => "place/nearbysearch/json",
            Endpoint::PlaceDetails => "place/details/json",
            Endpoint::Directions => "directions/json",
            Endpoint::DistanceMatrix => "distancematrix/json",
            Endpoint::Timezone => "timezone/json",
        }
    }
}

/// Performs the single GET each tool call needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a GET with the given query and decodes the body as JSON.
    async fn get_json(&self, url: &str, query: &Query) -> Result<Value, MapsError>;
}

/// [`Transport`] backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport, applying the timeout when one is given.
    pub fn new(timeout: Option<Duration>) -> Result<Self, MapsError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get_json(&self, url: &str, query: &Query) -> Result<Value, MapsError> {
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MapsError::HttpStatus {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Status fields shared by every Google Maps response.
#[derive(Debug, Deserialize)]
struct Envelope {
    status: ApiStatus,
    #[serde(default)]
    error_message: Option<String>,
}

/// Client for the Google Maps web services.
///
/// Holds no per-call state, so one instance can serve concurrent calls.
#[derive(Clone)]
pub struct MapsClient {
    config: MapsConfig,
    transport: Arc<dyn Transport>,
}

impl MapsClient {
    /// Creates a builder.
    pub fn builder() -> super::MapsClientBuilder {
        super::MapsClientBuilder::new()
    }

    /// Creates a client from a configuration and a transport.
    pub fn with_transport(config: MapsConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &MapsConfig {
        &self.config
    }

    /// Returns the API key or fails before any request is made.
    pub(crate) fn api_key(&self) -> Result<String, MapsError> {
        self.config.api_key()
    }

    /// Sends one request and checks the top-level status.
    ///
    /// A non-OK status becomes `"{action} failed: {message}"`, preferring the
    /// service's `error_message` over the bare status code.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        action: &str,
        endpoint: Endpoint,
        query: Query,
    ) -> Result<Outcome<T>, MapsError> {
        let url = format!("{}{}", self.config.base_url(), endpoint.path());
        debug!(
            endpoint = endpoint.path(),
            params = ?redacted(&query),
            "Calling Google Maps"
        );

        let body = self.transport.get_json(&url, &query).await?;
        let envelope = Envelope::deserialize(&body)?;

        if !envelope.status.is_ok() {
            warn!(endpoint = endpoint.path(), status = %envelope.status, "Google Maps request failed");
            let message = envelope
                .error_message
                .unwrap_or_else(|| envelope.status.to_string());
            return Ok(Outcome::failure(format!("{} failed: {}", action, message)));
        }

        Ok(Outcome::Success(serde_json::from_value(body)?))
    }
}

impl std::fmt::Debug for MapsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapsClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Query parameters safe to log.
fn redacted(query: &Query) -> Vec<(&'static str, &str)> {
    query
        .iter()
        .filter(|(name, _)| *name != "key")
        .map(|(name, value)| (*name, value.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client_with(transport: MockTransport) -> MapsClient {
        let config = MapsConfig {
            api_key: Some("test_api_key".to_string()),
            ..MapsConfig::default()
        };
        MapsClient::with_transport(config, Arc::new(transport))
    }

    #[derive(Debug, Deserialize)]
    struct Body {
        value: u32,
    }

    #[tokio::test]
    async fn test_fetch_builds_url_from_base_and_endpoint() {
        let mut transport = MockTransport::new();
        transport
            .expect_get_json()
            .withf(|url, _| url == "https://maps.googleapis.com/maps/api/timezone/json")
            .times(1)
            .returning(|_, _| Ok(json!({"status": "OK", "value": 7})));

        let outcome: Outcome<Body> = client_with(transport)
            .fetch("Timezone lookup", Endpoint::Timezone, vec![])
            .await
            .unwrap();
        assert_eq!(outcome.success().map(|b| b.value), Some(7));
    }

    #[tokio::test]
    async fn test_fetch_prefers_error_message() {
        let mut transport = MockTransport::new();
        transport.expect_get_json().returning(|_, _| {
            Ok(json!({"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid."}))
        });

        let outcome: Outcome<Body> = client_with(transport)
            .fetch("Geocoding", Endpoint::Geocode, vec![])
            .await
            .unwrap();
        assert_eq!(
            outcome.error(),
            Some("Geocoding failed: The provided API key is invalid.")
        );
    }

    #[tokio::test]
    async fn test_fetch_falls_back_to_status() {
        let mut transport = MockTransport::new();
        transport
            .expect_get_json()
            .returning(|_, _| Ok(json!({"status": "OVER_QUERY_LIMIT"})));

        let outcome: Outcome<Body> = client_with(transport)
            .fetch("Directions", Endpoint::Directions, vec![])
            .await
            .unwrap();
        assert_eq!(outcome.error(), Some("Directions failed: OVER_QUERY_LIMIT"));
    }

    #[tokio::test]
    async fn test_fetch_without_status_is_decode_error() {
        let mut transport = MockTransport::new();
        transport
            .expect_get_json()
            .returning(|_, _| Ok(json!({"results": []})));

        let result: Result<Outcome<Body>, _> = client_with(transport)
            .fetch("Geocoding", Endpoint::Geocode, vec![])
            .await;
        assert!(matches!(result, Err(MapsError::Decode(_))));
    }

    #[tokio::test]
    async fn test_transport_errors_propagate() {
        let mut transport = MockTransport::new();
        transport.expect_get_json().returning(|_, _| {
            Err(MapsError::HttpStatus {
                status: 503,
                body: "unavailable".to_string(),
            })
        });

        let result: Result<Outcome<Body>, _> = client_with(transport)
            .fetch("Geocoding", Endpoint::Geocode, vec![])
            .await;
        assert!(matches!(
            result,
            Err(MapsError::HttpStatus { status: 503, .. })
        ));
    }

    #[test]
    fn test_redacted_drops_key() {
        let query: Query = vec![
            ("address", "Paris".to_string()),
            ("key", "secret".to_string()),
        ];
        assert_eq!(redacted(&query), vec![("address", "Paris")]);
    }
}
