//! Pure pricing core for the delivery order price calculator.
//!
//! Everything in this crate is synchronous and side-effect-free: the pricing
//! pipeline (distance → schedule validation → fee lookup → surcharge/total)
//! is a deterministic function of its inputs. I/O lives in the `dopc-venue`
//! and `dopc-server` crates.

mod app_config;
mod config;
mod distance;
mod pricing;
mod types;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use distance::delivery_distance;
pub use pricing::{
    delivery_fee, price_delivery_order, small_order_surcharge, validate_distance_ranges,
    PricingError,
};
pub use types::{
    Coordinate, DeliveryBreakdown, DeliveryOrderInput, DeliveryOrderPriceResponse, DistanceRange,
    RangeMax, VenueData,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
