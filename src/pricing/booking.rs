use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

/// Share of the total price collected when a booking is placed
pub const ADVANCE_RATIO: f64 = 0.5;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Accepted layouts for date-times without an offset, read as UTC
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Billable duration and price split for a rental window.
/// The all-zero value is the degenerate quote for an empty or inverted window.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BookingQuote {
    pub duration_hours: i64,
    pub total_price: f64,
    pub advance: f64,
    pub remaining: f64,
}

impl BookingQuote {
    pub fn is_empty(&self) -> bool {
        self.duration_hours == 0
    }
}

/// Quote a booking from `start` to `end` at `price_per_hour`.
///
/// Duration is the elapsed time rounded up to whole hours, measured in
/// milliseconds. When `end` is not after `start` the zero quote is returned.
/// A non-finite hourly rate is treated as 0.
pub fn compute_booking(start: DateTime<Utc>, end: DateTime<Utc>, price_per_hour: f64) -> BookingQuote {
    let span_ms = (end - start).num_milliseconds();
    if span_ms <= 0 {
        return BookingQuote::default();
    }

    let duration_hours = (span_ms + MILLIS_PER_HOUR - 1) / MILLIS_PER_HOUR;
    // A non-finite rate, or one large enough to overflow, prices at zero
    let total_price = duration_hours as f64 * price_per_hour;
    let total_price = if total_price.is_finite() { total_price } else { 0.0 };
    let advance = round_half_up(total_price * ADVANCE_RATIO);

    BookingQuote {
        duration_hours,
        total_price,
        advance,
        remaining: total_price - advance,
    }
}

/// Quote a booking from form-entered date-times.
/// Either input failing to parse yields the zero quote.
pub fn compute_booking_from_strs(start: &str, end: &str, price_per_hour: f64) -> BookingQuote {
    match (parse_date_time(start), parse_date_time(end)) {
        (Some(start), Some(end)) => compute_booking(start, end, price_per_hour),
        _ => BookingQuote::default(),
    }
}

/// Parse RFC 3339, or a local `YYYY-MM-DDTHH:MM[:SS]` value taken as UTC
pub fn parse_date_time(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Round to the nearest integer with halves going up (towards +inf)
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}
