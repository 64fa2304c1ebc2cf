use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::{Endpoint, MapsClient, MapsError, Query};
use super::status::Outcome;
use super::types::{
    DEFAULT_SEARCH_RADIUS, Geometry, Location, NearbySearchRequest, PlaceDetailsRequest, PlacesSearchRequest,
};

/// Maximum number of text search results returned.
pub const MAX_SEARCH_RESULTS: usize = 10;
/// Maximum number of nearby search results returned.
pub const MAX_NEARBY_RESULTS: usize = 20;
/// Maximum number of reviews returned with place details.
pub const MAX_REVIEWS: usize = 5;
/// Largest radius the nearby search endpoint accepts, in meters.
pub const MAX_NEARBY_RADIUS: u32 = 50_000;

/// Fields requested from the place details endpoint.
pub const PLACE_DETAILS_FIELDS: &str = "name,formatted_address,formatted_phone_number,rating,opening_hours,website,reviews,photos,geometry";

#[derive(Debug, Deserialize)]
struct PlaceListResponse {
    #[serde(default)]
    results: Vec<PlaceWire>,
}

#[derive(Debug, Deserialize)]
struct PlaceWire {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    place_id: Option<String>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    geometry: Geometry,
    #[serde(default)]
    vicinity: Option<String>,
    #[serde(default)]
    price_level: Option<i64>,
    #[serde(default)]
    opening_hours: Option<OpeningHoursWire>,
}

#[derive(Debug, Deserialize)]
struct OpeningHoursWire {
    #[serde(default)]
    open_now: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct PlaceDetailsResponse {
    #[serde(default)]
    result: PlaceDetailsWire,
}

#[derive(Debug, Default, Deserialize)]
struct PlaceDetailsWire {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    formatted_phone_number: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    opening_hours: Option<Value>,
    #[serde(default)]
    reviews: Vec<Value>,
    #[serde(default)]
    geometry: Geometry,
}

/// A text search match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceSummary {
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub rating: Option<f64>,
    pub place_id: Option<String>,
    pub types: Vec<String>,
    pub geometry: Location,
}

/// Text search matches, capped at [`MAX_SEARCH_RESULTS`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacesSearchResult {
    pub results: Vec<PlaceSummary>,
    /// Number of matches the service returned before truncation
    pub total_results: usize,
}

/// A nearby search match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyPlace {
    pub name: Option<String>,
    pub place_id: Option<String>,
    pub rating: Option<f64>,
    pub vicinity: Option<String>,
    pub types: Vec<String>,
    pub geometry: Location,
    pub price_level: Option<i64>,
    /// The `open_now` flag of the place's opening hours
    pub opening_hours: Option<bool>,
}

/// Nearby search matches, capped at [`MAX_NEARBY_RESULTS`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbySearchResult {
    pub results: Vec<NearbyPlace>,
    pub total_results: usize,
}

/// Details of a single place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceDetails {
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub phone_number: Option<String>,
    pub rating: Option<f64>,
    pub website: Option<String>,
    pub opening_hours: Option<Value>,
    /// At most [`MAX_REVIEWS`] reviews, as returned by the service
    pub reviews: Vec<Value>,
    pub geometry: Location,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl MapsClient {
    /// Searches places by free text, optionally biased towards a location.
    pub async fn places_search(
        &self,
        request: &PlacesSearchRequest,
    ) -> Result<Outcome<PlacesSearchResult>, MapsError> {
        let key = self.api_key()?;
        let mut query: Query = vec![("query", request.query.clone()), ("key", key)];

        // The radius only means something next to a location bias.
        if let Some(location) = non_empty(request.location.as_deref()) {
            query.push(("location", location.to_string()));
            let radius = request.radius.unwrap_or(DEFAULT_SEARCH_RADIUS);
            query.push(("radius", radius.to_string()));
        }

        let outcome: Outcome<PlaceListResponse> = self
            .fetch("Places search", Endpoint::TextSearch, query)
            .await?;

        Ok(outcome.map(|response| {
            let total_results = response.results.len();
            let results = response
                .results
                .into_iter()
                .take(MAX_SEARCH_RESULTS)
                .map(|place| PlaceSummary {
                    name: place.name,
                    formatted_address: place.formatted_address,
                    rating: place.rating,
                    place_id: place.place_id,
                    types: place.types,
                    geometry: place.geometry.location,
                })
                .collect();
            PlacesSearchResult {
                results,
                total_results,
            }
        }))
    }

    /// Finds places around a location. Radii above 50 km are clamped.
    pub async fn nearby_search(
        &self,
        request: &NearbySearchRequest,
    ) -> Result<Outcome<NearbySearchResult>, MapsError> {
        let key = self.api_key()?;
        let mut query: Query = vec![
            ("location", request.location.clone()),
            ("radius", request.radius.min(MAX_NEARBY_RADIUS).to_string()),
            ("key", key),
        ];
        if let Some(place_type) = non_empty(request.place_type.as_deref()) {
            query.push(("type", place_type.to_string()));
        }

        let outcome: Outcome<PlaceListResponse> = self
            .fetch("Nearby search", Endpoint::NearbySearch, query)
            .await?;

        Ok(outcome.map(|response| {
            let total_results = response.results.len();
            let results = response
                .results
                .into_iter()
                .take(MAX_NEARBY_RESULTS)
                .map(|place| NearbyPlace {
                    name: place.name,
                    place_id: place.place_id,
                    rating: place.rating,
                    vicinity: place.vicinity,
                    types: place.types,
                    geometry: place.geometry.location,
                    price_level: place.price_level,
                    opening_hours: place.opening_hours.and_then(|hours| hours.open_now),
                })
                .collect();
            NearbySearchResult {
                results,
                total_results,
            }
        }))
    }

    /// Looks up a place by id using a fixed field mask.
    pub async fn place_details(
        &self,
        request: &PlaceDetailsRequest,
    ) -> Result<Outcome<PlaceDetails>, MapsError> {
        let key = self.api_key()?;
        let query: Query = vec![
            ("place_id", request.place_id.clone()),
            ("fields", PLACE_DETAILS_FIELDS.to_string()),
            ("key", key),
        ];

        let outcome: Outcome<PlaceDetailsResponse> = self
            .fetch("Place details", Endpoint::PlaceDetails, query)
            .await?;

        Ok(outcome.map(|response| {
            let place = response.result;
            PlaceDetails {
                name: place.name,
                formatted_address: place.formatted_address,
                phone_number: place.formatted_phone_number,
                rating: place.rating,
                website: place.website,
                opening_hours: place.opening_hours,
                reviews: place.reviews.into_iter().take(MAX_REVIEWS).collect(),
                geometry: place.geometry.location,
            }
        }))
    }
}
