use axum::{
    extract::{Path, State},
    Json,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::{booking, vehicle};
use crate::error::AppResult;
use crate::AppState;

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_vehicles: usize,
    pub available_vehicles: usize,
    pub total_bookings: usize,
    pub total_earnings: f64,
}

impl DashboardStats {
    pub fn from_records(vehicles: &[vehicle::Model], bookings: &[booking::Model]) -> Self {
        Self {
            total_vehicles: vehicles.len(),
            available_vehicles: vehicles.iter().filter(|v| v.is_available).count(),
            total_bookings: bookings.len(),
            total_earnings: bookings.iter().map(|b| b.total_price).sum(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OwnerDashboard {
    pub stats: DashboardStats,
    pub vehicles: Vec<vehicle::Model>,
    pub bookings: Vec<booking::Model>,
}

/// Vehicles, bookings and earnings for a vehicle owner
pub async fn owner_dashboard(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
) -> AppResult<Json<OwnerDashboard>> {
    let vehicles = vehicle::Entity::find()
        .filter(vehicle::Column::OwnerId.eq(owner_id))
        .order_by_desc(vehicle::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let bookings = if vehicles.is_empty() {
        Vec::new()
    } else {
        booking::Entity::find()
            .filter(booking::Column::VehicleId.is_in(vehicles.iter().map(|v| v.id)))
            .order_by_desc(booking::Column::CreatedAt)
            .all(&state.db)
            .await?
    };

    let stats = DashboardStats::from_records(&vehicles, &bookings);

    Ok(Json(OwnerDashboard {
        stats,
        vehicles,
        bookings,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::booking::{BookingStatus, PaymentStatus};
    use chrono::Utc;

    fn vehicle(is_available: bool) -> vehicle::Model {
        let now = Utc::now().into();
        vehicle::Model {
            id: Uuid::new_v4(),
            owner_id: Uuid::nil(),
            vehicle_type: "car".to_string(),
            brand: "Hyundai".to_string(),
            model: "Creta".to_string(),
            number_plate: "KA01XY9999".to_string(),
            price_per_hour: 300.0,
            location: "Bangalore".to_string(),
            image_url: None,
            is_available,
            created_at: now,
            updated_at: now,
        }
    }

    fn booking(vehicle_id: Uuid, total_price: f64) -> booking::Model {
        let now = Utc::now().into();
        booking::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            vehicle_id,
            start_time: now,
            end_time: now,
            total_price,
            advance_amount: total_price / 2.0,
            aadhar_number: None,
            license_number: None,
            status: BookingStatus::Confirmed,
            payment_status: PaymentStatus::AdvancePaid,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_stats_empty() {
        assert_eq!(DashboardStats::from_records(&[], &[]), DashboardStats::default());
    }

    #[test]
    fn test_stats_counts_and_earnings() {
        let vehicles = vec![vehicle(true), vehicle(false), vehicle(true)];
        let bookings = vec![
            booking(vehicles[1].id, 900.0),
            booking(vehicles[0].id, 300.0),
        ];

        let stats = DashboardStats::from_records(&vehicles, &bookings);
        assert_eq!(stats.total_vehicles, 3);
        assert_eq!(stats.available_vehicles, 2);
        assert_eq!(stats.total_bookings, 2);
        assert_eq!(stats.total_earnings, 1200.0);
    }
}
