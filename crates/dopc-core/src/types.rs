//! Shared data model for delivery order pricing.
//!
//! Money is carried as integer minor currency units throughout; distances
//! are whole meters. Venue data is an immutable snapshot assembled by the
//! venue client once per pricing request.

use serde::{Deserialize, Serialize};

/// A point on the globe in decimal degrees.
///
/// The upstream provider ships coordinates as a `[lon, lat]` array; the
/// venue client converts into this named form at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

/// One tier of a venue's distance-based fee schedule.
///
/// `min` is an inclusive lower bound and `max` an exclusive upper bound,
/// both in meters. A `max` of 0 is the provider's marker for the terminal
/// tier: it has no upper bound and any distance at or past its `min` is
/// undeliverable. Tiers are matched strictly in sequence order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceRange {
    pub min: i64,
    pub max: i64,
    /// Flat surcharge added on top of the base price within this tier.
    pub a: i64,
    /// Linear rate applied per 10 meters of delivery distance.
    pub b: f64,
}

/// Upper bound of a [`DistanceRange`], with the wire sentinel made explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeMax {
    /// Exclusive upper bound in meters.
    Bounded(i64),
    /// Wire value 0: no upper bound; distances in this tier are undeliverable.
    Terminal,
}

impl DistanceRange {
    /// The tier's upper bound as a tagged value, so callers never compare
    /// against the literal 0 sentinel.
    #[must_use]
    pub fn max_bound(&self) -> RangeMax {
        if self.max == 0 {
            RangeMax::Terminal
        } else {
            RangeMax::Bounded(self.max)
        }
    }
}

/// Venue pricing snapshot assembled from the provider's static and dynamic
/// lookups. Owned by a single pricing call; never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueData {
    pub venue_location: Coordinate,
    /// Cart value below which a small-order surcharge applies.
    pub order_minimum_no_surcharge: i64,
    /// Flat base delivery fee.
    pub base_price: i64,
    pub distance_ranges: Vec<DistanceRange>,
}

/// A validated pricing request, produced by the server's query validation.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryOrderInput {
    pub venue_slug: String,
    pub cart_value: i64,
    pub user_lat: f64,
    pub user_lon: f64,
}

/// Price breakdown returned to the caller.
///
/// Invariant: `total_price == cart_value + small_order_surcharge +
/// delivery.fee`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryOrderPriceResponse {
    pub total_price: i64,
    pub small_order_surcharge: i64,
    pub cart_value: i64,
    pub delivery: DeliveryBreakdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryBreakdown {
    pub fee: i64,
    /// Great-circle distance from venue to user, in meters.
    pub distance: i64,
}
