//! Great-circle distance between venue and user.

use crate::types::Coordinate;

/// Mean Earth radius in meters, as used by the upstream pricing contract.
const EARTH_RADIUS_M: f64 = 6_373_000.0;

/// Haversine distance from the venue to the user, rounded to whole meters.
///
/// Defined for every valid coordinate pair: identical points yield 0 and the
/// formula is symmetric under a sign flip of all four inputs. Rounding is
/// applied once, at the end, to the nearest meter.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn delivery_distance(venue_location: Coordinate, user_lat: f64, user_lon: f64) -> i64 {
    let lat_diff = (venue_location.lat - user_lat).to_radians();
    let lon_diff = (venue_location.lon - user_lon).to_radians();

    let a = (lat_diff / 2.0).sin().powi(2)
        + user_lat.to_radians().cos()
            * venue_location.lat.to_radians().cos()
            * (lon_diff / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    (c * EARTH_RADIUS_M).round() as i64
}
