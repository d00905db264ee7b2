mod price;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use dopc_core::PricingError;
use dopc_venue::{VenueClient, VenueError};

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub venue: Arc<VenueClient>,
}

/// API failure, rendered to the exact wire shapes the endpoint contract
/// fixes. The underlying cause is logged where the conversion happens;
/// everything that is not a client mistake collapses to a generic 500.
#[derive(Debug, PartialEq, Eq)]
pub enum ApiError {
    /// Request validation failed; one message per failed field.
    InvalidInput { details: Vec<String> },
    /// The requested venue does not exist.
    NotFound { message: String },
    /// A well-formed request the venue cannot serve (delivery too far).
    BadRequest { message: String },
    /// Anything else: upstream trouble or malformed venue data.
    Internal,
}

#[derive(Debug, Serialize)]
struct DetailsBody {
    error: &'static str,
    details: Vec<String>,
}

#[derive(Debug, Serialize)]
struct MessageBody {
    error: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidInput { details } => (
                StatusCode::BAD_REQUEST,
                Json(DetailsBody {
                    error: "Invalid input",
                    details,
                }),
            )
                .into_response(),
            ApiError::NotFound { message } => (
                StatusCode::NOT_FOUND,
                Json(MessageBody {
                    error: "Not Found",
                    message,
                }),
            )
                .into_response(),
            ApiError::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                Json(MessageBody {
                    error: "Bad Request",
                    message,
                }),
            )
                .into_response(),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageBody {
                    error: "Internal Server Error",
                    message: "An unexpected error occured".to_owned(),
                }),
            )
                .into_response(),
        }
    }
}

impl From<VenueError> for ApiError {
    fn from(err: VenueError) -> Self {
        match err {
            VenueError::NotFound(_) => ApiError::NotFound {
                message: err.to_string(),
            },
            other => {
                tracing::error!(error = %other, "venue data fetch failed");
                ApiError::Internal
            }
        }
    }
}

impl From<PricingError> for ApiError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::DistanceTooLong => ApiError::BadRequest {
                message: err.to_string(),
            },
            other => {
                tracing::error!(error = %other, "pricing failed on provider venue data");
                ApiError::Internal
            }
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route(
            "/api/v1/delivery-order-price",
            get(price::get_delivery_order_price),
        )
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SLUG: &str = "home-assignment-venue-helsinki";

    fn test_app(base_url: &str) -> Router {
        let venue = VenueClient::with_retry_policy(base_url, 30, 0, 0).expect("venue client");
        build_app(AppState {
            venue: Arc::new(venue),
        })
    }

    fn static_body() -> serde_json::Value {
        serde_json::json!({
            "venue_raw": {
                "location": { "coordinates": [24.92813512, 60.17012143] }
            }
        })
    }

    fn dynamic_body(distance_ranges: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "venue_raw": {
                "delivery_specs": {
                    "order_minimum_no_surcharge": 1000,
                    "delivery_pricing": {
                        "base_price": 190,
                        "distance_ranges": distance_ranges
                    }
                }
            }
        })
    }

    fn standard_ranges() -> serde_json::Value {
        serde_json::json!([
            { "min": 0, "max": 500, "a": 0, "b": 0, "flag": null },
            { "min": 500, "max": 1000, "a": 100, "b": 1, "flag": null },
            { "min": 1000, "max": 0, "a": 0, "b": 0, "flag": null }
        ])
    }

    async fn mount_venue(server: &MockServer, ranges: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!(
                "/home-assignment-api/v1/venues/{SLUG}/static"
            )))
            .respond_with(ResponseTemplate::new(200).set_body_json(static_body()))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!(
                "/home-assignment-api/v1/venues/{SLUG}/dynamic"
            )))
            .respond_with(ResponseTemplate::new(200).set_body_json(dynamic_body(ranges)))
            .mount(server)
            .await;
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = serde_json::from_slice(&body).expect("json parse");
        (status, json)
    }

    // -------------------------------------------------------------------------
    // ApiError — unit tests (no upstream)
    // -------------------------------------------------------------------------

    #[test]
    fn invalid_input_maps_to_bad_request() {
        let response = ApiError::InvalidInput {
            details: vec!["Cart value must be positive".to_owned()],
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn venue_not_found_maps_to_not_found() {
        let err: ApiError = VenueError::NotFound("missing".to_owned()).into();
        assert_eq!(
            err,
            ApiError::NotFound {
                message: "No venue with slug of 'missing' was found".to_owned()
            }
        );
    }

    #[test]
    fn distance_too_long_maps_to_bad_request() {
        let err: ApiError = PricingError::DistanceTooLong.into();
        assert_eq!(
            err,
            ApiError::BadRequest {
                message: "Delivery distance is too long".to_owned()
            }
        );
    }

    #[test]
    fn schedule_failures_collapse_to_internal() {
        assert_eq!(
            ApiError::from(PricingError::EmptyDistanceRanges),
            ApiError::Internal
        );
        assert_eq!(
            ApiError::from(PricingError::NoMatchingRange),
            ApiError::Internal
        );
    }

    // -------------------------------------------------------------------------
    // Routes — integration tests against a mocked venue provider
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn health_returns_ok() {
        let server = MockServer::start().await;
        let (status, json) = get_json(test_app(&server.uri()), "/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn prices_order_end_to_end() {
        let server = MockServer::start().await;
        mount_venue(&server, standard_ranges()).await;

        let (status, json) = get_json(
            test_app(&server.uri()),
            &format!(
                "/api/v1/delivery-order-price?venue_slug={SLUG}&cart_value=1000&user_lat=60.17094&user_lon=24.93087"
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_price"], 1190);
        assert_eq!(json["small_order_surcharge"], 0);
        assert_eq!(json["cart_value"], 1000);
        assert_eq!(json["delivery"]["fee"], 190);
        assert_eq!(json["delivery"]["distance"], 177);
    }

    #[tokio::test]
    async fn small_order_carries_surcharge() {
        let server = MockServer::start().await;
        mount_venue(&server, standard_ranges()).await;

        let (status, json) = get_json(
            test_app(&server.uri()),
            &format!(
                "/api/v1/delivery-order-price?venue_slug={SLUG}&cart_value=800&user_lat=60.17094&user_lon=24.93087"
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["small_order_surcharge"], 200);
        assert_eq!(json["total_price"], 1190);
    }

    #[tokio::test]
    async fn invalid_query_returns_field_details() {
        let server = MockServer::start().await;

        let (status, json) = get_json(
            test_app(&server.uri()),
            "/api/v1/delivery-order-price?venue_slug=&cart_value=-5&user_lat=91&user_lon=24.93087",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid input");
        let details: Vec<String> = json["details"]
            .as_array()
            .expect("details array")
            .iter()
            .map(|d| d.as_str().expect("detail string").to_owned())
            .collect();
        assert!(details.contains(&"Venue slug is required".to_owned()));
        assert!(details.contains(&"Cart value must be positive".to_owned()));
        assert!(details.contains(&"Latitude must be between -90 and 90".to_owned()));
    }

    #[tokio::test]
    async fn missing_parameters_are_each_reported() {
        let server = MockServer::start().await;

        let (status, json) =
            get_json(test_app(&server.uri()), "/api/v1/delivery-order-price").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let details = json["details"].as_array().expect("details array");
        assert_eq!(details.len(), 4, "one message per missing field: {details:?}");
    }

    #[tokio::test]
    async fn unknown_venue_returns_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let (status, json) = get_json(
            test_app(&server.uri()),
            "/api/v1/delivery-order-price?venue_slug=nope&cart_value=1000&user_lat=60.17094&user_lon=24.93087",
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Not Found");
        assert_eq!(json["message"], "No venue with slug of 'nope' was found");
    }

    #[tokio::test]
    async fn undeliverable_distance_returns_bad_request() {
        let server = MockServer::start().await;
        mount_venue(&server, standard_ranges()).await;

        let (status, json) = get_json(
            test_app(&server.uri()),
            &format!(
                "/api/v1/delivery-order-price?venue_slug={SLUG}&cart_value=1000&user_lat=61.17551736&user_lon=24.93087"
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Bad Request");
        assert_eq!(json["message"], "Delivery distance is too long");
    }

    #[tokio::test]
    async fn malformed_venue_schedule_returns_generic_internal_error() {
        let server = MockServer::start().await;
        mount_venue(&server, serde_json::json!([])).await;

        let (status, json) = get_json(
            test_app(&server.uri()),
            &format!(
                "/api/v1/delivery-order-price?venue_slug={SLUG}&cart_value=1000&user_lat=60.17094&user_lon=24.93087"
            ),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Internal Server Error");
        assert_eq!(json["message"], "An unexpected error occured");
    }

    #[tokio::test]
    async fn upstream_failure_returns_generic_internal_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (status, json) = get_json(
            test_app(&server.uri()),
            &format!(
                "/api/v1/delivery-order-price?venue_slug={SLUG}&cart_value=1000&user_lat=60.17094&user_lon=24.93087"
            ),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], "An unexpected error occured");
    }

    #[tokio::test]
    async fn responses_carry_a_request_id() {
        let server = MockServer::start().await;

        let response = test_app(&server.uri())
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn provided_request_id_is_echoed() {
        let server = MockServer::start().await;

        let response = test_app(&server.uri())
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header("x-request-id", "test-id-123")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(
            response.headers().get("x-request-id").map(|v| v.to_str().expect("ascii")),
            Some("test-id-123")
        );
    }
}
