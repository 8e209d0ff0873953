//! Quote endpoints driven through the real router.
//!
//! Quotes never touch the database, so the state carries a disconnected handle.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt;

use marketplace_backend::{routes::create_router, AppState, Config};

fn app() -> Router {
    let config = Config {
        database_url: "postgres://unused".to_string(),
        db_max_connections: 1,
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        rate_limit_burst: 100,
        rate_limit_period_ms: 600,
    };

    create_router(AppState {
        db: DatabaseConnection::Disconnected,
        config,
    })
}

async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

// ============================================================================
// Parcel quotes
// ============================================================================

#[tokio::test]
async fn parcel_quote_known_route() {
    let (status, body) = post_json(
        "/api/quotes/parcel",
        json!({
            "pickup_location": "Mumbai, India",
            "drop_location": "Pune, Maharashtra",
            "weight": "2.5"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["distance_km"], 150);
    assert_eq!(body["fee"], 325.0);
    assert_eq!(body["breakdown"]["weight_cost"], 25.0);
    assert_eq!(body["breakdown"]["distance_cost"], 300.0);
    assert_eq!(body["breakdown"]["is_minimum"], false);
}

#[tokio::test]
async fn parcel_quote_accepts_numeric_weight() {
    let (status, body) = post_json(
        "/api/quotes/parcel",
        json!({
            "pickup_location": "Delhi",
            "drop_location": "Kolkata",
            "weight": 10
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["distance_km"], 1470);
    assert_eq!(body["fee"], 3040.0);
}

#[tokio::test]
async fn parcel_quote_unknown_route_in_range() {
    let (status, body) = post_json(
        "/api/quotes/parcel",
        json!({
            "pickup_location": "Jaipur",
            "drop_location": "Lucknow",
            "weight": "not a number"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let km = body["distance_km"].as_u64().unwrap();
    assert!((50..550).contains(&km));
    assert_eq!(body["breakdown"]["weight_cost"], 0.0);
    assert_eq!(body["fee"].as_f64().unwrap(), km as f64 * 2.0);
}

#[tokio::test]
async fn parcel_quote_requires_locations() {
    let (status, body) = post_json(
        "/api/quotes/parcel",
        json!({
            "pickup_location": "  ",
            "drop_location": "Pune",
            "weight": "1"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Pickup location is required");
}

#[tokio::test]
async fn parcel_quote_null_weight_is_zero() {
    let (status, body) = post_json(
        "/api/quotes/parcel",
        json!({
            "pickup_location": "Mumbai",
            "drop_location": "Pune",
            "weight": null
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["breakdown"]["weight_cost"], 0.0);
    assert_eq!(body["fee"], 300.0);
}

#[tokio::test]
async fn parcel_quote_missing_weight_matches_null() {
    let (status, body) = post_json(
        "/api/quotes/parcel",
        json!({
            "pickup_location": "Mumbai",
            "drop_location": "Pune"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fee"], 300.0);
}

// ============================================================================
// Booking quotes
// ============================================================================

#[tokio::test]
async fn booking_quote_rounds_up_partial_hour() {
    let (status, body) = post_json(
        "/api/quotes/booking",
        json!({
            "start_time": "2024-01-01T10:00",
            "end_time": "2024-01-01T10:30",
            "price_per_hour": 100.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["duration_hours"], 1);
    assert_eq!(body["total_price"], 100.0);
    assert_eq!(body["advance"], 50.0);
    assert_eq!(body["remaining"], 50.0);
}

#[tokio::test]
async fn booking_quote_inverted_window_is_zero() {
    let (status, body) = post_json(
        "/api/quotes/booking",
        json!({
            "start_time": "2024-01-01T10:00",
            "end_time": "2024-01-01T09:00",
            "price_per_hour": 200.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["duration_hours"], 0);
    assert_eq!(body["total_price"], 0.0);
    assert_eq!(body["advance"], 0.0);
    assert_eq!(body["remaining"], 0.0);
}

#[tokio::test]
async fn booking_quote_malformed_dates_are_zero() {
    let (status, body) = post_json(
        "/api/quotes/booking",
        json!({
            "start_time": "tomorrow",
            "end_time": "2024-01-01T12:00",
            "price_per_hour": 200.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["duration_hours"], 0);
}

#[tokio::test]
async fn booking_quote_missing_rate_is_zero_price() {
    let (status, body) = post_json(
        "/api/quotes/booking",
        json!({
            "start_time": "2024-01-01T10:00",
            "end_time": "2024-01-01T12:00"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["duration_hours"], 2);
    assert_eq!(body["total_price"], 0.0);
    assert_eq!(body["advance"], 0.0);
}

#[tokio::test]
async fn booking_quote_reads_text_rate() {
    let (status, body) = post_json(
        "/api/quotes/booking",
        json!({
            "start_time": "2024-01-01T10:00",
            "end_time": "2024-01-01T12:00",
            "price_per_hour": "150/hr"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_price"], 300.0);
    assert_eq!(body["advance"], 150.0);

    let (status, body) = post_json(
        "/api/quotes/booking",
        json!({
            "start_time": "2024-01-01T10:00",
            "end_time": "2024-01-01T12:00",
            "price_per_hour": null
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_price"], 0.0);
}

#[tokio::test]
async fn booking_quote_missing_dates_are_zero() {
    let (status, body) = post_json("/api/quotes/booking", json!({ "price_per_hour": 100 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["duration_hours"], 0);
    assert_eq!(body["total_price"], 0.0);
}
