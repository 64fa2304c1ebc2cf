//! Request types and values shared by several tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Message returned when a travel mode is not recognized.
pub const INVALID_MODE_MESSAGE: &str =
    "Invalid mode. Must be one of: driving, walking, transit, bicycling";

/// Travel modes accepted by the directions and distance matrix tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Transit,
    Bicycling,
}

impl TravelMode {
    pub const ALL: [TravelMode; 4] = [
        TravelMode::Driving,
        TravelMode::Walking,
        TravelMode::Transit,
        TravelMode::Bicycling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Transit => "transit",
            TravelMode::Bicycling => "bicycling",
        }
    }
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        TravelMode::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == mode)
            .ok_or_else(|| INVALID_MODE_MESSAGE.to_string())
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_mode() -> String {
    TravelMode::default().as_str().to_string()
}

/// A `geometry.location` object, `{}` when the service omitted it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

/// Upstream `geometry` wrapper.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Geometry {
    #[serde(default)]
    pub location: Location,
}

/// Upstream `{ "text": ..., "value": ... }` pair; only the text is surfaced.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TextValue {
    pub text: String,
}

/// Arguments for `geocode`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GeocodeRequest {
    /// The address or place name to geocode
    pub query: String,
}

impl GeocodeRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

/// Arguments for `reverse_geocode`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReverseGeocodeRequest {
    /// The latitude coordinate
    pub latitude: f64,
    /// The longitude coordinate
    pub longitude: f64,
}

impl ReverseGeocodeRequest {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Text search radius used when a location bias is given without one.
pub const DEFAULT_SEARCH_RADIUS: u32 = 5000;

fn default_search_radius() -> Option<u32> {
    Some(DEFAULT_SEARCH_RADIUS)
}

/// Arguments for `places_search`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PlacesSearchRequest {
    /// The search query (e.g., "restaurants", "gas stations")
    pub query: String,
    /// Optional location bias as "latitude,longitude"
    #[serde(default)]
    pub location: Option<String>,
    /// Search radius in meters, only sent together with a location (default: 5000)
    #[serde(default = "default_search_radius")]
    pub radius: Option<u32>,
}

impl PlacesSearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            location: None,
            radius: default_search_radius(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = Some(radius);
        self
    }
}

fn default_nearby_radius() -> u32 {
    1500
}

/// Arguments for `nearby_search`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NearbySearchRequest {
    /// The latitude/longitude around which to search (format: "lat,lng")
    pub location: String,
    /// The search radius in meters (default: 1500, max: 50000)
    #[serde(default = "default_nearby_radius")]
    pub radius: u32,
    /// Optional place type to filter results (e.g., "restaurant", "gas_station")
    #[serde(default)]
    pub place_type: Option<String>,
}

impl NearbySearchRequest {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            radius: default_nearby_radius(),
            place_type: None,
        }
    }

    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_place_type(mut self, place_type: impl Into<String>) -> Self {
        self.place_type = Some(place_type.into());
        self
    }
}

/// Arguments for `place_details`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PlaceDetailsRequest {
    /// The unique identifier for a place
    pub place_id: String,
}

impl PlaceDetailsRequest {
    pub fn new(place_id: impl Into<String>) -> Self {
        Self {
            place_id: place_id.into(),
        }
    }
}

/// Arguments for `get_directions`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DirectionsRequest {
    /// Starting location (address or coordinates)
    pub origin: String,
    /// Ending location (address or coordinates)
    pub destination: String,
    /// Travel mode (driving, walking, transit, bicycling)
    #[serde(default = "default_mode")]
    pub mode: String,
}

impl DirectionsRequest {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            mode: default_mode(),
        }
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = mode.into();
        self
    }
}

/// Arguments for `distance_matrix`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DistanceMatrixRequest {
    /// List of origin locations
    pub origins: Vec<String>,
    /// List of destination locations
    pub destinations: Vec<String>,
    /// Travel mode (driving, walking, transit, bicycling)
    #[serde(default = "default_mode")]
    pub mode: String,
}

impl DistanceMatrixRequest {
    pub fn new(origins: Vec<String>, destinations: Vec<String>) -> Self {
        Self {
            origins,
            destinations,
            mode: default_mode(),
        }
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = mode.into();
        self
    }
}

/// Arguments for `timezone_lookup`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TimezoneRequest {
    /// The latitude/longitude (format: "lat,lng")
    pub location: String,
    /// Optional UNIX timestamp (default: current time)
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl TimezoneRequest {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            timestamp: None,
        }
    }

    pub fn at(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}
