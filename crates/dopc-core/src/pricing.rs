//! Fee schedule evaluation and order price composition.
//!
//! Pure functions only. Failures surface as [`PricingError`] variants and
//! propagate to the caller untouched; the HTTP layer alone decides what a
//! user sees.

use thiserror::Error;

use crate::distance::delivery_distance;
use crate::types::{
    DeliveryBreakdown, DeliveryOrderInput, DeliveryOrderPriceResponse, DistanceRange, RangeMax,
    VenueData,
};

/// Failures of the pricing pipeline.
///
/// Callers branch on the variant, not the message: only
/// [`PricingError::DistanceTooLong`] is a client-visible condition, the rest
/// indicate malformed venue data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("No distance ranges defined")]
    EmptyDistanceRanges,

    #[error("Negative values in distance ranges")]
    NegativeDistanceRanges,

    #[error("Delivery distance is too long")]
    DistanceTooLong,

    /// The schedule has a coverage gap: no tier matched the distance.
    #[error("Unable to calculate delivery fee")]
    NoMatchingRange,
}

/// Rejects structurally malformed fee schedules.
///
/// A schedule must be non-empty and free of negative values; the terminal
/// sentinel (`max == 0`) is exempt from the negativity check. Overlaps,
/// gaps, and ordering are deliberately not validated — the provider's
/// sequence order is authoritative.
///
/// # Errors
///
/// [`PricingError::EmptyDistanceRanges`] for a zero-length schedule,
/// [`PricingError::NegativeDistanceRanges`] if any `min`, `a`, `b`, or
/// non-sentinel `max` is negative.
pub fn validate_distance_ranges(ranges: &[DistanceRange]) -> Result<(), PricingError> {
    if ranges.is_empty() {
        return Err(PricingError::EmptyDistanceRanges);
    }

    let has_negative = ranges
        .iter()
        .any(|r| r.min < 0 || (r.max < 0 && r.max != 0) || r.a < 0 || r.b < 0.0);

    if has_negative {
        return Err(PricingError::NegativeDistanceRanges);
    }

    Ok(())
}

/// Computes the delivery fee for a distance against a venue's schedule.
///
/// Tiers are evaluated in sequence order and the first structural match
/// wins. A bounded tier matches `min <= distance < max` (the upper bound is
/// exclusive, so a distance equal to `max` falls through to the next tier)
/// and yields `base_price + a + round(b × distance / 10)`, the linear term
/// rounded to the nearest integer once. Reaching the terminal tier means
/// the venue does not deliver that far.
///
/// # Errors
///
/// Propagates [`validate_distance_ranges`] failures unchanged; returns
/// [`PricingError::DistanceTooLong`] when the terminal tier is reached and
/// [`PricingError::NoMatchingRange`] when no tier covers the distance.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn delivery_fee(
    distance: i64,
    base_price: i64,
    ranges: &[DistanceRange],
) -> Result<i64, PricingError> {
    validate_distance_ranges(ranges)?;

    for range in ranges {
        match range.max_bound() {
            RangeMax::Terminal if distance >= range.min => {
                return Err(PricingError::DistanceTooLong);
            }
            RangeMax::Bounded(max) if distance >= range.min && distance < max => {
                let linear = (range.b * distance as f64 / 10.0).round() as i64;
                return Ok(base_price + range.a + linear);
            }
            _ => {}
        }
    }

    Err(PricingError::NoMatchingRange)
}

/// Shortfall below the venue's order minimum, floored at zero.
#[must_use]
pub fn small_order_surcharge(cart_value: i64, order_minimum: i64) -> i64 {
    (order_minimum - cart_value).max(0)
}

/// Prices a delivery order against a venue snapshot.
///
/// Runs the full pipeline — distance, fee, surcharge — and assembles the
/// response with `total_price = fee + surcharge + cart_value`.
///
/// # Errors
///
/// Any [`delivery_fee`] failure, verbatim.
pub fn price_delivery_order(
    order: &DeliveryOrderInput,
    venue: &VenueData,
) -> Result<DeliveryOrderPriceResponse, PricingError> {
    let distance = delivery_distance(venue.venue_location, order.user_lat, order.user_lon);
    let fee = delivery_fee(distance, venue.base_price, &venue.distance_ranges)?;
    let surcharge = small_order_surcharge(order.cart_value, venue.order_minimum_no_surcharge);

    Ok(DeliveryOrderPriceResponse {
        total_price: fee + surcharge + order.cart_value,
        small_order_surcharge: surcharge,
        cart_value: order.cart_value,
        delivery: DeliveryBreakdown { fee, distance },
    })
}
