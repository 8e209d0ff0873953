//! Pricing and estimation for parcel deliveries and vehicle bookings.
//!
//! Every function here is pure: no I/O, no shared state. The only
//! non-determinism is the random fallback of the distance estimator, and the
//! generator for it is always passed in by the caller.

pub mod booking;
pub mod distance;
pub mod fee;

pub use booking::{
    compute_booking, compute_booking_from_strs, parse_date_time, BookingQuote, ADVANCE_RATIO,
};
pub use distance::{estimate_distance, estimate_distance_with, known_distance};
pub use fee::{
    calculate_fee, price_breakdown, NumberInput, PriceBreakdown, Weight, DISTANCE_RATE_PER_KM,
    MINIMUM_FEE, WEIGHT_RATE_PER_KG,
};
