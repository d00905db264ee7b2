//! HTTP client for the venue-data provider REST API.
//!
//! Wraps `reqwest` with provider-specific error handling and typed response
//! deserialization. A venue is described by two records — static (location)
//! and dynamic (delivery pricing) — fetched concurrently and assembled into
//! one [`VenueData`] snapshot per pricing request.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use dopc_core::{Coordinate, VenueData};

use crate::error::VenueError;
use crate::retry::retry_with_backoff;
use crate::types::{DynamicVenueResponse, StaticVenueResponse};

const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_BACKOFF_BASE_MS: u64 = 1_000;

/// Client for the venue-data provider.
///
/// Manages the HTTP client, base URL, and retry policy. Use
/// [`VenueClient::new`] with the configured provider URL, or point it at a
/// mock server in tests.
pub struct VenueClient {
    client: Client,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl VenueClient {
    /// Creates a new client with the default retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`VenueError::Config`] if `base_url` is not
    /// a valid URL.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, VenueError> {
        Self::with_retry_policy(
            base_url,
            timeout_secs,
            DEFAULT_MAX_RETRIES,
            DEFAULT_BACKOFF_BASE_MS,
        )
    }

    /// Creates a new client with an explicit retry policy.
    ///
    /// `max_retries` counts additional attempts after the first; pass 0 to
    /// disable retries entirely (useful in tests).
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`VenueError::Config`] if `base_url` is not
    /// a valid URL.
    pub fn with_retry_policy(
        base_url: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, VenueError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("dopc/0.1 (delivery-order-pricing)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // venue paths append to the root rather than replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| VenueError::Config(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            base_url,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Fetches and assembles a venue's pricing snapshot.
    ///
    /// Issues the static and dynamic lookups concurrently and awaits both;
    /// the snapshot only exists once both records arrive.
    ///
    /// # Errors
    ///
    /// - [`VenueError::NotFound`] if the provider has no venue for the slug.
    /// - [`VenueError::Http`] on network failure or non-2xx HTTP status.
    /// - [`VenueError::Deserialize`] if either response does not match the
    ///   expected shape.
    pub async fn fetch_venue(&self, venue_slug: &str) -> Result<VenueData, VenueError> {
        let (static_data, dynamic_data) = tokio::try_join!(
            self.fetch_static(venue_slug),
            self.fetch_dynamic(venue_slug)
        )?;

        let [lon, lat] = static_data.venue_raw.location.coordinates;
        let specs = dynamic_data.venue_raw.delivery_specs;

        Ok(VenueData {
            venue_location: Coordinate { lon, lat },
            order_minimum_no_surcharge: specs.order_minimum_no_surcharge,
            base_price: specs.delivery_pricing.base_price,
            distance_ranges: specs.delivery_pricing.distance_ranges,
        })
    }

    /// Fetches the static record (venue location) for a slug.
    ///
    /// # Errors
    ///
    /// Same conditions as [`VenueClient::fetch_venue`].
    pub async fn fetch_static(&self, venue_slug: &str) -> Result<StaticVenueResponse, VenueError> {
        let url = self.venue_url(venue_slug, "static")?;
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.get_json(url.clone(), venue_slug)
        })
        .await
    }

    /// Fetches the dynamic record (delivery specs) for a slug.
    ///
    /// # Errors
    ///
    /// Same conditions as [`VenueClient::fetch_venue`].
    pub async fn fetch_dynamic(
        &self,
        venue_slug: &str,
    ) -> Result<DynamicVenueResponse, VenueError> {
        let url = self.venue_url(venue_slug, "dynamic")?;
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.get_json(url.clone(), venue_slug)
        })
        .await
    }

    /// Builds `{base}/home-assignment-api/v1/venues/{venue_slug}/{record}`
    /// with the slug percent-encoded as a single path segment.
    fn venue_url(&self, venue_slug: &str, record: &str) -> Result<Url, VenueError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                VenueError::Config(format!("base URL '{}' cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(["home-assignment-api", "v1", "venues", venue_slug, record]);
        Ok(url)
    }

    /// Sends a GET request, maps 404 to a missing venue, asserts a 2xx
    /// status, and parses the response body as JSON.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        venue_slug: &str,
    ) -> Result<T, VenueError> {
        let response = self.client.get(url.clone()).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(VenueError::NotFound(venue_slug.to_owned()));
        }
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| VenueError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}
