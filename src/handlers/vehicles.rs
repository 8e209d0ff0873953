use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::booking::{self, BookingStatus};
use crate::entities::{profile, vehicle};
use crate::error::{AppError, AppResult};
use crate::handlers::require_text;
use crate::utils::location::location_contains;
use crate::AppState;

// ============ Search ============

/// Hourly price buckets offered by the vehicle search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum PriceRange {
    All,
    /// Up to 500 inclusive
    UpTo500,
    /// Above 500, up to 1000 inclusive
    From500To1000,
    Above1000,
}

impl FromStr for PriceRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // A literal '+' arrives as a space once the query string is decoded
        match s.trim() {
            "" | "all" => Ok(PriceRange::All),
            "0-500" => Ok(PriceRange::UpTo500),
            "500-1000" => Ok(PriceRange::From500To1000),
            "1000+" | "1000" => Ok(PriceRange::Above1000),
            other => Err(format!("Unknown price range: {}", other)),
        }
    }
}

impl TryFrom<String> for PriceRange {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl PriceRange {
    pub fn contains(self, price_per_hour: f64) -> bool {
        match self {
            PriceRange::All => true,
            PriceRange::UpTo500 => price_per_hour <= 500.0,
            PriceRange::From500To1000 => price_per_hour > 500.0 && price_per_hour <= 1000.0,
            PriceRange::Above1000 => price_per_hour > 1000.0,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct VehicleSearch {
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    pub price_range: Option<PriceRange>,
}

impl VehicleSearch {
    pub fn matches(&self, vehicle: &vehicle::Model) -> bool {
        if let Some(location) = self.location.as_deref().filter(|l| !l.is_empty()) {
            if !location_contains(&vehicle.location, location) {
                return false;
            }
        }

        if let Some(vehicle_type) = self.vehicle_type.as_deref() {
            if vehicle_type != "all" && vehicle.vehicle_type != vehicle_type {
                return false;
            }
        }

        self.price_range
            .map_or(true, |range| range.contains(vehicle.price_per_hour))
    }
}

/// List available vehicles, newest first
pub async fn list_vehicles(
    State(state): State<AppState>,
    Query(search): Query<VehicleSearch>,
) -> AppResult<Json<Vec<vehicle::Model>>> {
    let vehicles = vehicle::Entity::find()
        .filter(vehicle::Column::IsAvailable.eq(true))
        .order_by_desc(vehicle::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let matching = vehicles.into_iter().filter(|v| search.matches(v)).collect();

    Ok(Json(matching))
}

/// Get vehicle details
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
) -> AppResult<Json<vehicle::Model>> {
    let vehicle = find_vehicle(&state.db, vehicle_id).await?;
    Ok(Json(vehicle))
}

// ============ Listing Management ============

#[derive(Debug, Deserialize)]
pub struct CreateVehicleRequest {
    pub owner_id: Uuid,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub brand: String,
    pub model: String,
    pub number_plate: String,
    pub price_per_hour: f64,
    pub location: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateVehicleRequest {
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub number_plate: Option<String>,
    pub price_per_hour: Option<f64>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
}

pub(crate) fn normalize_number_plate(plate: &str) -> String {
    plate.trim().to_uppercase()
}

/// Blank image URLs are stored as null
pub(crate) fn normalize_image_url(url: Option<String>) -> Option<String> {
    url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty())
}

fn validate_price(price_per_hour: f64) -> AppResult<()> {
    if !price_per_hour.is_finite() || price_per_hour <= 0.0 {
        return Err(AppError::BadRequest(
            "Price per hour must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

/// List a vehicle for rent
pub async fn create_vehicle(
    State(state): State<AppState>,
    Json(payload): Json<CreateVehicleRequest>,
) -> AppResult<Json<vehicle::Model>> {
    require_text(&payload.vehicle_type, "Vehicle type")?;
    require_text(&payload.brand, "Brand")?;
    require_text(&payload.model, "Model")?;
    require_text(&payload.number_plate, "Number plate")?;
    require_text(&payload.location, "Location")?;
    validate_price(payload.price_per_hour)?;

    profile::Entity::find_by_id(payload.owner_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Owner profile not found".to_string()))?;

    let new_vehicle = vehicle::ActiveModel {
        id: Set(Uuid::new_v4()),
        owner_id: Set(payload.owner_id),
        vehicle_type: Set(payload.vehicle_type.trim().to_string()),
        brand: Set(payload.brand.trim().to_string()),
        model: Set(payload.model.trim().to_string()),
        number_plate: Set(normalize_number_plate(&payload.number_plate)),
        price_per_hour: Set(payload.price_per_hour),
        location: Set(payload.location.trim().to_string()),
        image_url: Set(normalize_image_url(payload.image_url)),
        is_available: Set(true),
        ..Default::default()
    };

    let vehicle = new_vehicle.insert(&state.db).await?;
    tracing::info!(
        vehicle_id = %vehicle.id,
        owner_id = %vehicle.owner_id,
        price_per_hour = vehicle.price_per_hour,
        "Vehicle listed"
    );

    Ok(Json(vehicle))
}

/// Update a vehicle listing
pub async fn update_vehicle(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
    Json(payload): Json<UpdateVehicleRequest>,
) -> AppResult<Json<vehicle::Model>> {
    let vehicle = find_vehicle(&state.db, vehicle_id).await?;
    let mut active: vehicle::ActiveModel = vehicle.into();

    if let Some(vehicle_type) = payload.vehicle_type {
        require_text(&vehicle_type, "Vehicle type")?;
        active.vehicle_type = Set(vehicle_type.trim().to_string());
    }

    if let Some(brand) = payload.brand {
        require_text(&brand, "Brand")?;
        active.brand = Set(brand.trim().to_string());
    }

    if let Some(model) = payload.model {
        require_text(&model, "Model")?;
        active.model = Set(model.trim().to_string());
    }

    if let Some(plate) = payload.number_plate {
        require_text(&plate, "Number plate")?;
        active.number_plate = Set(normalize_number_plate(&plate));
    }

    if let Some(price) = payload.price_per_hour {
        validate_price(price)?;
        active.price_per_hour = Set(price);
    }

    if let Some(location) = payload.location {
        require_text(&location, "Location")?;
        active.location = Set(location.trim().to_string());
    }

    if payload.image_url.is_some() {
        active.image_url = Set(normalize_image_url(payload.image_url));
    }

    if let Some(available) = payload.is_available {
        active.is_available = Set(available);
    }

    active.updated_at = Set(Utc::now().into());

    let result = active.update(&state.db).await?;
    tracing::info!(vehicle_id = %result.id, "Vehicle updated");

    Ok(Json(result))
}

/// Delete a vehicle listing
pub async fn delete_vehicle(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let result = vehicle::Entity::delete_by_id(vehicle_id)
        .exec(&state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Vehicle not found".to_string()));
    }

    tracing::info!(vehicle_id = %vehicle_id, "Vehicle deleted");
    Ok(Json(serde_json::json!({ "message": "Vehicle deleted" })))
}

// ============ Vehicle Bookings ============

#[derive(Debug, Deserialize)]
pub struct VehicleBookingsQuery {
    pub status: Option<BookingStatus>,
}

#[derive(Debug, Serialize)]
pub struct VehicleSummary {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub number_plate: String,
}

impl From<&vehicle::Model> for VehicleSummary {
    fn from(v: &vehicle::Model) -> Self {
        Self {
            id: v.id,
            brand: v.brand.clone(),
            model: v.model.clone(),
            vehicle_type: v.vehicle_type.clone(),
            number_plate: v.number_plate.clone(),
        }
    }
}

/// List bookings of one vehicle, latest start first
pub async fn vehicle_bookings(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
    Query(query): Query<VehicleBookingsQuery>,
) -> AppResult<Json<Vec<booking::Model>>> {
    find_vehicle(&state.db, vehicle_id).await?;

    let mut select = booking::Entity::find().filter(booking::Column::VehicleId.eq(vehicle_id));
    if let Some(status) = query.status {
        select = select.filter(booking::Column::Status.eq(status));
    }

    let bookings = select
        .order_by_desc(booking::Column::StartTime)
        .all(&state.db)
        .await?;

    Ok(Json(bookings))
}

pub(crate) async fn find_vehicle(
    db: &DatabaseConnection,
    vehicle_id: Uuid,
) -> AppResult<vehicle::Model> {
    vehicle::Entity::find_by_id(vehicle_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))
}

/// Flip a vehicle's availability. Plain overwrite, the last writer wins.
pub(crate) async fn set_vehicle_availability(
    db: &DatabaseConnection,
    vehicle_id: Uuid,
    available: bool,
) -> AppResult<()> {
    vehicle::Entity::update_many()
        .col_expr(vehicle::Column::IsAvailable, Expr::value(available))
        .col_expr(
            vehicle::Column::UpdatedAt,
            Expr::value(chrono::DateTime::<chrono::FixedOffset>::from(Utc::now())),
        )
        .filter(vehicle::Column::Id.eq(vehicle_id))
        .exec(db)
        .await?;

    tracing::debug!(vehicle_id = %vehicle_id, available, "Vehicle availability updated");
    Ok(())
}
