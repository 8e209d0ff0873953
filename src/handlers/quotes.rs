use axum::Json;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::handlers::require_text;
use crate::pricing::{
    compute_booking_from_strs, estimate_distance_with, price_breakdown, BookingQuote,
    NumberInput, PriceBreakdown, Weight,
};

#[derive(Debug, Deserialize)]
pub struct ParcelQuoteRequest {
    pub pickup_location: String,
    pub drop_location: String,
    #[serde(default)]
    pub weight: Weight,
}

#[derive(Debug, Serialize)]
pub struct ParcelQuote {
    pub distance_km: u32,
    pub fee: f64,
    pub breakdown: PriceBreakdown,
}

/// Estimate distance and fee for a parcel route
pub fn quote_parcel<R: Rng>(
    pickup: &str,
    drop: &str,
    weight: Weight,
    rng: &mut R,
) -> ParcelQuote {
    let distance_km = estimate_distance_with(pickup, drop, rng);
    let breakdown = price_breakdown(weight, distance_km);

    ParcelQuote {
        distance_km,
        fee: breakdown.total,
        breakdown,
    }
}

/// Quote a parcel delivery without posting it
pub async fn parcel_quote(Json(payload): Json<ParcelQuoteRequest>) -> AppResult<Json<ParcelQuote>> {
    require_text(&payload.pickup_location, "Pickup location")?;
    require_text(&payload.drop_location, "Drop location")?;

    let quote = quote_parcel(
        &payload.pickup_location,
        &payload.drop_location,
        payload.weight,
        &mut rand::thread_rng(),
    );

    Ok(Json(quote))
}

#[derive(Debug, Deserialize)]
pub struct BookingQuoteRequest {
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub price_per_hour: Option<NumberInput>,
}

/// Quote a rental window. Unparsable or inverted windows quote as zero,
/// and a missing or unreadable rate prices at zero.
pub async fn booking_quote(Json(payload): Json<BookingQuoteRequest>) -> Json<BookingQuote> {
    let price_per_hour = payload
        .price_per_hour
        .map(|rate| rate.value())
        .unwrap_or_default();

    Json(compute_booking_from_strs(
        payload.start_time.as_deref().unwrap_or_default(),
        payload.end_time.as_deref().unwrap_or_default(),
        price_per_hour,
    ))
}
