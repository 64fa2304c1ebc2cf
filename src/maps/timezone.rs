use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::client::{Endpoint, MapsClient, MapsError, Query};
use super::status::Outcome;
use super::types::TimezoneRequest;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimezoneResponse {
    #[serde(default)]
    time_zone_id: Option<String>,
    #[serde(default)]
    time_zone_name: Option<String>,
    #[serde(default)]
    dst_offset: Option<i64>,
    #[serde(default)]
    raw_offset: Option<i64>,
}

/// Time zone of a location at a given instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimezoneInfo {
    /// IANA time zone id, e.g. `America/Los_Angeles`
    pub timezone_id: Option<String>,
    pub timezone_name: Option<String>,
    /// Daylight saving offset in seconds
    pub dst_offset: Option<i64>,
    /// Offset from UTC in seconds, without daylight saving
    pub raw_offset: Option<i64>,
}

impl MapsClient {
    /// Looks up the time zone of a location, at the current time by default.
    pub async fn timezone_lookup(
        &self,
        request: &TimezoneRequest,
    ) -> Result<Outcome<TimezoneInfo>, MapsError> {
        let key = self.api_key()?;
        let timestamp = request
            .timestamp
            .unwrap_or_else(|| Utc::now().timestamp());

        let query: Query = vec![
            ("location", request.location.clone()),
            ("timestamp", timestamp.to_string()),
            ("key", key),
        ];

        let outcome: Outcome<TimezoneResponse> = self
            .fetch("Timezone lookup", Endpoint::Timezone, query)
            .await?;

        Ok(outcome.map(|response| TimezoneInfo {
            timezone_id: response.time_zone_id,
            timezone_name: response.time_zone_name,
            dst_offset: response.dst_offset,
            raw_offset: response.raw_offset,
        }))
    }
}
