use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::parcel::{self, ParcelStatus};
use crate::entities::{accepted_parcel, profile};
use crate::error::{AppError, AppResult};
use crate::handlers::quotes::{quote_parcel, ParcelQuote};
use crate::handlers::require_text;
use crate::pricing::{PriceBreakdown, Weight, NumberInput};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateParcelRequest {
    pub sender_id: Uuid,
    pub pickup_location: String,
    pub drop_location: String,
    pub weight: Option<NumberInput>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateParcelResponse {
    pub parcel: parcel::Model,
    pub breakdown: PriceBreakdown,
}

#[derive(Debug, Serialize)]
pub struct ParcelResponse {
    #[serde(flatten)]
    pub parcel: parcel::Model,
    pub sender_name: Option<String>,
}

/// Heaviest parcel a carrier can be asked to take, in kg
pub const MAX_PARCEL_WEIGHT_KG: f64 = 50.0;

/// Resolve the submitted weight, rejecting missing, blank, non-positive or
/// oversized values
pub(crate) fn parcel_weight(input: Option<NumberInput>) -> AppResult<Weight> {
    let input = input
        .filter(|w| !w.is_blank())
        .ok_or_else(|| AppError::BadRequest("Weight is required".to_string()))?;

    let weight = Weight::from(input);
    if weight.kg() <= 0.0 {
        return Err(AppError::BadRequest(
            "Weight must be greater than 0".to_string(),
        ));
    }
    if weight.kg() > MAX_PARCEL_WEIGHT_KG {
        return Err(AppError::BadRequest(format!(
            "Weight cannot exceed {} kg",
            MAX_PARCEL_WEIGHT_KG
        )));
    }
    Ok(weight)
}

/// Post a parcel delivery request
pub async fn create_parcel(
    State(state): State<AppState>,
    Json(payload): Json<CreateParcelRequest>,
) -> AppResult<Json<CreateParcelResponse>> {
    require_text(&payload.pickup_location, "Pickup location")?;
    require_text(&payload.drop_location, "Drop location")?;
    let weight = parcel_weight(payload.weight)?;

    let ParcelQuote {
        distance_km,
        fee,
        breakdown,
    } = quote_parcel(
        &payload.pickup_location,
        &payload.drop_location,
        weight,
        &mut rand::thread_rng(),
    );

    profile::Entity::find_by_id(payload.sender_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Sender profile not found".to_string()))?;

    let distance = i32::try_from(distance_km)
        .map_err(|_| AppError::Internal(format!("Distance out of range: {}", distance_km)))?;

    let new_parcel = parcel::ActiveModel {
        id: Set(Uuid::new_v4()),
        sender_id: Set(payload.sender_id),
        pickup_location: Set(payload.pickup_location.trim().to_string()),
        drop_location: Set(payload.drop_location.trim().to_string()),
        weight: Set(weight.kg()),
        description: Set(payload
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())),
        distance: Set(distance),
        fee: Set(fee),
        status: Set(ParcelStatus::Open),
        ..Default::default()
    };

    let parcel = new_parcel.insert(&state.db).await?;
    tracing::info!(
        parcel_id = %parcel.id,
        sender_id = %parcel.sender_id,
        distance_km,
        fee,
        "Parcel request posted"
    );

    Ok(Json(CreateParcelResponse { parcel, breakdown }))
}

/// List open parcel requests, newest first
pub async fn list_open_parcels(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ParcelResponse>>> {
    let rows = parcel::Entity::find()
        .filter(parcel::Column::Status.eq(ParcelStatus::Open))
        .order_by_desc(parcel::Column::CreatedAt)
        .find_also_related(profile::Entity)
        .all(&state.db)
        .await?;

    let responses = rows
        .into_iter()
        .map(|(parcel, sender)| ParcelResponse {
            parcel,
            sender_name: sender.map(|s| s.full_name),
        })
        .collect();

    Ok(Json(responses))
}

#[derive(Debug, Deserialize)]
pub struct AcceptParcelRequest {
    pub carrier_user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct AcceptParcelResponse {
    pub acceptance: accepted_parcel::Model,
    pub parcel: parcel::Model,
}

fn already_accepted_error() -> AppError {
    AppError::Conflict("Parcel has already been accepted".to_string())
}

/// A unique violation on `accepted_parcel.parcel_id` means a concurrent accept won
fn acceptance_insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => already_accepted_error(),
        _ => AppError::Database(err),
    }
}

/// Accept an open parcel as its carrier
pub async fn accept_parcel(
    State(state): State<AppState>,
    Path(parcel_id): Path<Uuid>,
    Json(payload): Json<AcceptParcelRequest>,
) -> AppResult<Json<AcceptParcelResponse>> {
    let parcel = parcel::Entity::find_by_id(parcel_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Parcel not found".to_string()))?;

    if parcel.status != ParcelStatus::Open {
        return Err(already_accepted_error());
    }

    if parcel.sender_id == payload.carrier_user_id {
        return Err(AppError::Forbidden(
            "You cannot carry your own parcel".to_string(),
        ));
    }

    profile::Entity::find_by_id(payload.carrier_user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Carrier profile not found".to_string()))?;

    let already_accepted = accepted_parcel::Entity::find()
        .filter(accepted_parcel::Column::ParcelId.eq(parcel.id))
        .one(&state.db)
        .await?;
    if already_accepted.is_some() {
        return Err(already_accepted_error());
    }

    // Another carrier can still win between the check and this insert
    let acceptance = accepted_parcel::ActiveModel {
        id: Set(Uuid::new_v4()),
        parcel_id: Set(parcel.id),
        carrier_user_id: Set(payload.carrier_user_id),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(acceptance_insert_error)?;

    let mut active: parcel::ActiveModel = parcel.into();
    active.status = Set(ParcelStatus::Accepted);
    active.updated_at = Set(Utc::now().into());
    let parcel = active.update(&state.db).await?;

    tracing::info!(
        parcel_id = %parcel.id,
        carrier_user_id = %acceptance.carrier_user_id,
        "Parcel accepted"
    );

    Ok(Json(AcceptParcelResponse { acceptance, parcel }))
}

/// List parcels posted by a sender, newest first
pub async fn sender_parcels(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<parcel::Model>>> {
    let parcels = parcel::Entity::find()
        .filter(parcel::Column::SenderId.eq(user_id))
        .order_by_desc(parcel::Column::CreatedAt)
        .all(&state.db)
        .await?;

    Ok(Json(parcels))
}

#[derive(Debug, Serialize)]
pub struct DeliveryResponse {
    pub accepted_at: chrono::DateTime<Utc>,
    pub parcel: parcel::Model,
}

/// List parcels a carrier has accepted, most recent first
pub async fn carrier_deliveries(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<DeliveryResponse>>> {
    let rows = accepted_parcel::Entity::find()
        .filter(accepted_parcel::Column::CarrierUserId.eq(user_id))
        .order_by_desc(accepted_parcel::Column::AcceptedAt)
        .find_also_related(parcel::Entity)
        .all(&state.db)
        .await?;

    let responses = rows
        .into_iter()
        .filter_map(|(acceptance, parcel)| {
            Some(DeliveryResponse {
                accepted_at: acceptance.accepted_at.with_timezone(&Utc),
                parcel: parcel?,
            })
        })
        .collect();

    Ok(Json(responses))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parcel_weight_required() {
        assert!(parcel_weight(None).is_err());
        assert!(parcel_weight(Some(NumberInput::Text("  ".to_string()))).is_err());
    }

    #[test]
    fn test_parcel_weight_positive() {
        let err = parcel_weight(Some(NumberInput::Text("abc".to_string()))).unwrap_err();
        assert_eq!(err.to_string(), "Weight must be greater than 0");
        assert!(parcel_weight(Some(NumberInput::Number(-1.0))).is_err());
    }

    #[test]
    fn test_parcel_weight_lenient_text() {
        let weight = parcel_weight(Some(NumberInput::Text("2.5 kg".to_string()))).unwrap();
        assert_eq!(weight.kg(), 2.5);
        let weight = parcel_weight(Some(NumberInput::Number(4.0))).unwrap();
        assert_eq!(weight.kg(), 4.0);
    }

    #[test]
    fn test_acceptance_insert_error_passes_other_errors_through() {
        let err = acceptance_insert_error(DbErr::Custom("connection reset".to_string()));
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_parcel_weight_upper_bound() {
        assert_eq!(
            parcel_weight(Some(NumberInput::Number(50.0))).unwrap().kg(),
            50.0
        );
        let err = parcel_weight(Some(NumberInput::Text("50.5kg".to_string()))).unwrap_err();
        assert_eq!(err.to_string(), "Weight cannot exceed 50 kg");
    }

    #[test]
    fn test_parcel_weight_null_is_missing() {
        let err = parcel_weight(Some(NumberInput::Other(serde::de::IgnoredAny))).unwrap_err();
        assert_eq!(err.to_string(), "Weight is required");
    }
}
