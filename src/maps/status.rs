use serde::{Deserialize, Serialize};
use std::fmt;

/// Status codes reported by the Google Maps web services.
///
/// Every response carries one at the top level; distance matrix elements
/// carry their own. Unknown codes are kept verbatim in [`ApiStatus::Other`]
/// so the surfaced text always matches what the service sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApiStatus {
    Ok,
    ZeroResults,
    NotFound,
    InvalidRequest,
    OverQueryLimit,
    OverDailyLimit,
    RequestDenied,
    MaxWaypointsExceeded,
    MaxRouteLengthExceeded,
    MaxElementsExceeded,
    MaxDimensionsExceeded,
    UnknownError,
    Other(String),
}

impl ApiStatus {
    /// The exact wire string for this status.
    pub fn as_str(&self) -> &str {
        match self {
            ApiStatus::Ok => "OK",
            ApiStatus::ZeroResults => "ZERO_RESULTS",
            ApiStatus::NotFound => "NOT_FOUND",
            ApiStatus::InvalidRequest => "INVALID_REQUEST",
            ApiStatus::OverQueryLimit => "OVER_QUERY_LIMIT",
            ApiStatus::OverDailyLimit => "OVER_DAILY_LIMIT",
            ApiStatus::RequestDenied => "REQUEST_DENIED",
            ApiStatus::MaxWaypointsExceeded => "MAX_WAYPOINTS_EXCEEDED",
            ApiStatus::MaxRouteLengthExceeded => "MAX_ROUTE_LENGTH_EXCEEDED",
            ApiStatus::MaxElementsExceeded => "MAX_ELEMENTS_EXCEEDED",
            ApiStatus::MaxDimensionsExceeded => "MAX_DIMENSIONS_EXCEEDED",
            ApiStatus::UnknownError => "UNKNOWN_ERROR",
            ApiStatus::Other(status) => status,
        }
    }

    /// Returns true only for `OK`.
    pub fn is_ok(&self) -> bool {
        matches!(self, ApiStatus::Ok)
    }
}

impl From<String> for ApiStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "OK" => ApiStatus::Ok,
            "ZERO_RESULTS" => ApiStatus::ZeroResults,
            "NOT_FOUND" => ApiStatus::NotFound,
            "INVALID_REQUEST" => ApiStatus::InvalidRequest,
            "OVER_QUERY_LIMIT" => ApiStatus::OverQueryLimit,
            "OVER_DAILY_LIMIT" => ApiStatus::OverDailyLimit,
            "REQUEST_DENIED" => ApiStatus::RequestDenied,
            "MAX_WAYPOINTS_EXCEEDED" => ApiStatus::MaxWaypointsExceeded,
            "MAX_ROUTE_LENGTH_EXCEEDED" => ApiStatus::MaxRouteLengthExceeded,
            "MAX_ELEMENTS_EXCEEDED" => ApiStatus::MaxElementsExceeded,
            "MAX_DIMENSIONS_EXCEEDED" => ApiStatus::MaxDimensionsExceeded,
            "UNKNOWN_ERROR" => ApiStatus::UnknownError,
            _ => ApiStatus::Other(status),
        }
    }
}

impl From<ApiStatus> for String {
    fn from(status: ApiStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of a single maps tool call.
///
/// Serializes either as the tool's flat payload or as `{"error": "..."}`,
/// never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome<T> {
    /// The upstream call succeeded and was reshaped.
    Success(T),
    /// A logical failure: bad local input, non-OK status or no results.
    Failure {
        /// Human readable failure message
        error: String,
    },
}

impl<T> Outcome<T> {
    /// Creates a failure outcome.
    pub fn failure(error: impl Into<String>) -> Self {
        Outcome::Failure {
            error: error.into(),
        }
    }

    /// Returns the error message for a failure.
    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure { error } => Some(error),
        }
    }

    /// Returns the payload for a success.
    pub fn success(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Maps the success payload, leaving failures untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure { error } => Outcome::Failure { error },
        }
    }
}
