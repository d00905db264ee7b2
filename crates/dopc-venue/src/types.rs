//! Venue-data provider response types.
//!
//! All types model the JSON structures returned by the provider's
//! `/venues/{venue_slug}/static` and `/venues/{venue_slug}/dynamic`
//! endpoints. Both wrap their payload in a `venue_raw` envelope.

use serde::Deserialize;

use dopc_core::DistanceRange;

/// Static lookup: `{ "venue_raw": { "location": { "coordinates": [lon, lat] } } }`.
#[derive(Debug, Deserialize)]
pub struct StaticVenueResponse {
    pub venue_raw: StaticVenueRaw,
}

#[derive(Debug, Deserialize)]
pub struct StaticVenueRaw {
    pub location: VenueLocation,
}

#[derive(Debug, Deserialize)]
pub struct VenueLocation {
    /// `[lon, lat]` in decimal degrees.
    pub coordinates: [f64; 2],
}

/// Dynamic lookup: `{ "venue_raw": { "delivery_specs": { ... } } }`.
#[derive(Debug, Deserialize)]
pub struct DynamicVenueResponse {
    pub venue_raw: DynamicVenueRaw,
}

#[derive(Debug, Deserialize)]
pub struct DynamicVenueRaw {
    pub delivery_specs: DeliverySpecs,
}

#[derive(Debug, Deserialize)]
pub struct DeliverySpecs {
    pub order_minimum_no_surcharge: i64,
    pub delivery_pricing: DeliveryPricing,
}

#[derive(Debug, Deserialize)]
pub struct DeliveryPricing {
    pub base_price: i64,
    pub distance_ranges: Vec<DistanceRange>,
}
