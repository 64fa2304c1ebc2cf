//! Google Maps web service adapter.
//!
//! Every operation on [`MapsClient`] issues exactly one GET, checks the
//! response `status` and reshapes the body into a flat result. Logical
//! failures come back as [`Outcome::Failure`]; only a missing API key and
//! transport problems are returned as [`MapsError`].

pub mod client;
pub mod config;
pub mod geocoding;
pub mod places;
pub mod routes;
pub mod status;
pub mod timezone;
pub mod types;

pub use client::{Endpoint, MapsClient, MapsError, Query, ReqwestTransport, Transport};
pub use config::{API_KEY_ENV, DEFAULT_BASE_URL, MapsClientBuilder, MapsConfig};
pub use geocoding::{GeocodeResult, ReverseGeocodeResult};
pub use places::{NearbyPlace, NearbySearchResult, PlaceDetails, PlaceSummary, PlacesSearchResult};
pub use routes::{DirectionStep, Directions, DistanceMatrix, MatrixEntry};
pub use status::{ApiStatus, Outcome};
pub use timezone::TimezoneInfo;
pub use types::{
    DirectionsRequest, DistanceMatrixRequest, GeocodeRequest, INVALID_MODE_MESSAGE, Location,
    NearbySearchRequest, PlaceDetailsRequest, PlacesSearchRequest, ReverseGeocodeRequest,
    TimezoneRequest, TravelMode,
};
