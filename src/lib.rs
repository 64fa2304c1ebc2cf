//! # maps-tools
//!
//! Google Maps web services exposed as tools an agent host can call by name.
//!
//! ## Features
//!
//! - **Maps adapter**: geocoding, reverse geocoding, text and nearby place
//!   search, place details, directions, distance matrix and timezone lookup
//! - **Tool System**: every operation registered as a [`Tool`] with a JSON
//!   Schema for its arguments
//! - **MCP Support**: serve the tools to a Model Context Protocol host over stdio
//!
//! Logical failures (a non-`OK` status, no results, an invalid travel mode)
//! come back as data: a result whose only field is `error`. A missing API key
//! or a transport failure is returned as an `Err` instead.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use maps_tools::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads GOOGLE_MAPS_API_KEY when no key is given
//!     let client = MapsClient::builder().build()?;
//!
//!     let outcome = client
//!         .geocode(&GeocodeRequest::new("1600 Amphitheatre Parkway, Mountain View, CA"))
//!         .await?;
//!
//!     match outcome {
//!         Outcome::Success(place) => println!("{}, {}", place.latitude, place.longitude),
//!         Outcome::Failure { error } => eprintln!("{}", error),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod maps;
pub mod mcp;
pub mod tool;

// Re-exports for convenient usage
pub use error::AppError;
pub use maps::{MapsClient, MapsClientBuilder, MapsConfig, MapsError, Outcome, ApiStatus, TravelMode};
pub use mcp::{McpError, McpServer};
pub use tool::{Tool, ToolRegistry, ToolExecutor, ToolCall, ToolDefinition, ToolResult, ToolError, DynTool, MapsTool, MapsToolKind};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::maps::{
        DirectionsRequest, DistanceMatrixRequest, GeocodeRequest, MapsClient, MapsClientBuilder,
        NearbySearchRequest, Outcome, PlaceDetailsRequest, PlacesSearchRequest,
        ReverseGeocodeRequest, TimezoneRequest,
    };
    pub use crate::mcp::McpServer;
    pub use crate::tool::{Tool, ToolCall, ToolExecutor, ToolRegistry, ToolResult, ToolError};
}
