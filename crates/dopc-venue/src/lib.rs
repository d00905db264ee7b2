//! HTTP client for the venue-data provider.
//!
//! Fetches a venue's static (location) and dynamic (delivery pricing)
//! records and assembles them into the [`dopc_core::VenueData`] snapshot the
//! pricing core consumes.

mod client;
mod error;
mod retry;
mod types;

pub use client::VenueClient;
pub use error::VenueError;
pub use types::{DynamicVenueResponse, StaticVenueResponse};
