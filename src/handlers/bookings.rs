use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::booking::{self, BookingStatus, PaymentStatus};
use crate::entities::{profile, vehicle};
use crate::error::{AppError, AppResult};
use crate::handlers::require_text;
use crate::handlers::vehicles::{find_vehicle, set_vehicle_availability, VehicleSummary};
use crate::pricing::{compute_booking, parse_date_time, BookingQuote};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub start_time: String,
    pub end_time: String,
    pub aadhar_number: String,
    pub license_number: String,
}

#[derive(Debug, Serialize)]
pub struct CreateBookingResponse {
    pub booking: booking::Model,
    pub quote: BookingQuote,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    #[serde(flatten)]
    pub booking: booking::Model,
    pub vehicle: Option<VehicleSummary>,
}

/// Aadhar numbers are entered as three space-separated groups of four digits
pub(crate) fn is_valid_aadhar(number: &str) -> bool {
    let bytes = number.as_bytes();
    bytes.len() == 14
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 9 => b.is_ascii_whitespace(),
            _ => b.is_ascii_digit(),
        })
}

/// Book a vehicle and collect the advance
pub async fn create_booking(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookingRequest>,
) -> AppResult<Json<CreateBookingResponse>> {
    let vehicle = find_vehicle(&state.db, payload.vehicle_id).await?;

    if vehicle.owner_id == payload.user_id {
        return Err(AppError::Forbidden(
            "You cannot book your own vehicle".to_string(),
        ));
    }

    if !vehicle.is_available {
        return Err(AppError::Conflict(
            "Vehicle is currently booked".to_string(),
        ));
    }

    if !is_valid_aadhar(&payload.aadhar_number) {
        return Err(AppError::BadRequest(
            "Aadhar number must be in the form 1234 5678 9012".to_string(),
        ));
    }
    require_text(&payload.license_number, "Driving license number")?;

    let (start, end) = match (
        parse_date_time(&payload.start_time),
        parse_date_time(&payload.end_time),
    ) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            return Err(AppError::BadRequest(
                "Please select valid dates and times".to_string(),
            ))
        }
    };

    let quote = compute_booking(start, end, vehicle.price_per_hour);
    if quote.total_price <= 0.0 {
        return Err(AppError::BadRequest(
            "Please select valid dates and times".to_string(),
        ));
    }

    profile::Entity::find_by_id(payload.user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    let new_booking = booking::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(payload.user_id),
        vehicle_id: Set(vehicle.id),
        start_time: Set(start.into()),
        end_time: Set(end.into()),
        total_price: Set(quote.total_price),
        advance_amount: Set(quote.advance),
        aadhar_number: Set(Some(payload.aadhar_number.clone())),
        license_number: Set(Some(payload.license_number.trim().to_string())),
        status: Set(BookingStatus::Confirmed),
        payment_status: Set(PaymentStatus::AdvancePaid),
        ..Default::default()
    };

    let booking = new_booking.insert(&state.db).await?;

    // Not transactional with the insert above
    set_vehicle_availability(&state.db, vehicle.id, false).await?;

    tracing::info!(
        booking_id = %booking.id,
        vehicle_id = %vehicle.id,
        duration_hours = quote.duration_hours,
        total_price = quote.total_price,
        advance = quote.advance,
        "Booking confirmed, advance collected"
    );

    Ok(Json(CreateBookingResponse { booking, quote }))
}

/// List bookings made by a renter, newest first
pub async fn user_bookings(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    let rows = booking::Entity::find()
        .filter(booking::Column::UserId.eq(user_id))
        .order_by_desc(booking::Column::CreatedAt)
        .find_also_related(vehicle::Entity)
        .all(&state.db)
        .await?;

    let responses = rows
        .into_iter()
        .map(|(booking, vehicle)| BookingResponse {
            booking,
            vehicle: vehicle.as_ref().map(VehicleSummary::from),
        })
        .collect();

    Ok(Json(responses))
}

/// Mark a confirmed booking as completed and release the vehicle
pub async fn complete_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> AppResult<Json<booking::Model>> {
    let booking = booking::Entity::find_by_id(booking_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if booking.status != BookingStatus::Confirmed {
        return Err(AppError::Conflict(
            "Only confirmed bookings can be completed".to_string(),
        ));
    }

    let vehicle_id = booking.vehicle_id;
    let mut active: booking::ActiveModel = booking.into();
    active.status = Set(BookingStatus::Completed);
    // Remaining amount is settled at handover
    active.payment_status = Set(PaymentStatus::Paid);
    active.updated_at = Set(Utc::now().into());

    let result = active.update(&state.db).await?;

    set_vehicle_availability(&state.db, vehicle_id, true).await?;

    tracing::info!(booking_id = %result.id, vehicle_id = %vehicle_id, "Booking completed");

    Ok(Json(result))
}
