use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use dopc_core::{price_delivery_order, DeliveryOrderInput, DeliveryOrderPriceResponse};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

const MAX_VENUE_SLUG_LEN: usize = 200;

/// Raw query parameters, before coercion.
///
/// Query values arrive as strings; [`validate_query`] coerces them into a
/// [`DeliveryOrderInput`], collecting one message per failed field so a
/// client sees everything wrong with the request at once.
#[derive(Debug, Default, Deserialize)]
pub(super) struct PriceQuery {
    venue_slug: Option<String>,
    cart_value: Option<String>,
    user_lat: Option<String>,
    user_lon: Option<String>,
}

pub(super) async fn get_delivery_order_price(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<PriceQuery>,
) -> Result<Json<DeliveryOrderPriceResponse>, ApiError> {
    let order = validate_query(query).map_err(|details| ApiError::InvalidInput { details })?;

    tracing::info!(
        request_id = %req_id.0,
        venue_slug = %order.venue_slug,
        cart_value = order.cart_value,
        "pricing delivery order"
    );

    let venue = state.venue.fetch_venue(&order.venue_slug).await?;
    let response = price_delivery_order(&order, &venue)?;
    Ok(Json(response))
}

fn validate_query(query: PriceQuery) -> Result<DeliveryOrderInput, Vec<String>> {
    let mut details = Vec::new();

    let venue_slug = match query.venue_slug {
        Some(slug) if slug.is_empty() => {
            details.push("Venue slug is required".to_owned());
            None
        }
        Some(slug) if slug.len() > MAX_VENUE_SLUG_LEN => {
            details.push("Venue slug must be at most 200 characters".to_owned());
            None
        }
        Some(slug) => Some(slug),
        None => {
            details.push("Venue slug is required".to_owned());
            None
        }
    };

    let cart_value = match query.cart_value.as_deref() {
        None => {
            details.push("Cart value is required".to_owned());
            None
        }
        Some(raw) => match raw.parse::<i64>() {
            Err(_) => {
                details.push("Cart value must be an integer".to_owned());
                None
            }
            Ok(value) if value <= 0 => {
                details.push("Cart value must be positive".to_owned());
                None
            }
            Ok(value) => Some(value),
        },
    };

    let user_lat = parse_coordinate(
        query.user_lat.as_deref(),
        90.0,
        "Latitude is required",
        "Latitude must be between -90 and 90",
        &mut details,
    );
    let user_lon = parse_coordinate(
        query.user_lon.as_deref(),
        180.0,
        "Longitude is required",
        "Longitude must be between -180 and 180",
        &mut details,
    );

    match (venue_slug, cart_value, user_lat, user_lon) {
        (Some(venue_slug), Some(cart_value), Some(user_lat), Some(user_lon))
            if details.is_empty() =>
        {
            Ok(DeliveryOrderInput {
                venue_slug,
                cart_value,
                user_lat,
                user_lon,
            })
        }
        _ => Err(details),
    }
}

/// Parses a decimal-degree value, accepting only `|value| <= bound`.
///
/// An unparseable value reports the same range message as an out-of-range
/// one: either way the client did not send a usable coordinate.
fn parse_coordinate(
    raw: Option<&str>,
    bound: f64,
    required_msg: &str,
    range_msg: &str,
    details: &mut Vec<String>,
) -> Option<f64> {
    match raw {
        None => {
            details.push(required_msg.to_owned());
            None
        }
        Some(raw) => match raw.parse::<f64>() {
            Ok(value) if value.abs() <= bound => Some(value),
            _ => {
                details.push(range_msg.to_owned());
                None
            }
        },
    }
}
