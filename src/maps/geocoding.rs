use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::{Endpoint, MapsClient, MapsError, Query};
use super::status::Outcome;
use super::types::{GeocodeRequest, ReverseGeocodeRequest};

const NO_RESULTS: &str = "No results found";

/// Only the first result is read, so the rest stay undecoded.
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResultWire {
    formatted_address: String,
    geometry: GeometryWire,
    #[serde(default)]
    place_id: Option<String>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ReverseGeocodeResultWire {
    formatted_address: String,
    #[serde(default)]
    place_id: Option<String>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    address_components: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct GeometryWire {
    location: LatLngWire,
}

#[derive(Debug, Deserialize)]
struct LatLngWire {
    lat: f64,
    lng: f64,
}

/// First forward geocoding match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub place_id: Option<String>,
    pub types: Vec<String>,
}

/// First reverse geocoding match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReverseGeocodeResult {
    pub formatted_address: String,
    /// Address components exactly as returned by the service
    pub address_components: Vec<Value>,
    pub place_id: Option<String>,
    pub types: Vec<String>,
}

impl MapsClient {
    /// Converts an address or place name into coordinates.
    pub async fn geocode(
        &self,
        request: &GeocodeRequest,
    ) -> Result<Outcome<GeocodeResult>, MapsError> {
        let key = self.api_key()?;
        let query: Query = vec![("address", request.query.clone()), ("key", key)];

        let response: GeocodeResponse =
            match self.fetch("Geocoding", Endpoint::Geocode, query).await? {
                Outcome::Success(response) => response,
                Outcome::Failure { error } => return Ok(Outcome::Failure { error }),
            };

        let Some(first) = response.results.into_iter().next() else {
            return Ok(Outcome::failure(NO_RESULTS));
        };
        let first: GeocodeResultWire = serde_json::from_value(first)?;

        Ok(Outcome::Success(GeocodeResult {
            formatted_address: first.formatted_address,
            latitude: first.geometry.location.lat,
            longitude: first.geometry.location.lng,
            place_id: first.place_id,
            types: first.types,
        }))
    }

    /// Converts coordinates into a human-readable address.
    pub async fn reverse_geocode(
        &self,
        request: &ReverseGeocodeRequest,
    ) -> Result<Outcome<ReverseGeocodeResult>, MapsError> {
        let key = self.api_key()?;
        let query: Query = vec![
            (
                "latlng",
                format!("{},{}", request.latitude, request.longitude),
            ),
            ("key", key),
        ];

        let response: GeocodeResponse =
            match self.fetch("Reverse geocoding", Endpoint::Geocode, query).await? {
                Outcome::Success(response) => response,
                Outcome::Failure { error } => return Ok(Outcome::Failure { error }),
            };

        let Some(first) = response.results.into_iter().next() else {
            return Ok(Outcome::failure(NO_RESULTS));
        };
        let first: ReverseGeocodeResultWire = serde_json::from_value(first)?;

        Ok(Outcome::Success(ReverseGeocodeResult {
            formatted_address: first.formatted_address,
            address_components: first.address_components,
            place_id: first.place_id,
            types: first.types,
        }))
    }
}
