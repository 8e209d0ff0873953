use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{bookings, dashboard, parcels, profiles, quotes, vehicles};
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Pricing only, no database access
    let quote_routes = Router::new()
        .route("/parcel", post(quotes::parcel_quote))
        .route("/booking", post(quotes::booking_quote));

    let vehicle_routes = Router::new()
        .route("/", get(vehicles::list_vehicles).post(vehicles::create_vehicle))
        .route(
            "/{id}",
            get(vehicles::get_vehicle)
                .put(vehicles::update_vehicle)
                .delete(vehicles::delete_vehicle),
        )
        .route("/{id}/bookings", get(vehicles::vehicle_bookings));

    let booking_routes = Router::new()
        .route("/", post(bookings::create_booking))
        .route("/{id}/complete", post(bookings::complete_booking));

    let parcel_routes = Router::new()
        .route("/", get(parcels::list_open_parcels).post(parcels::create_parcel))
        .route("/{id}/accept", post(parcels::accept_parcel));

    let profile_routes = Router::new()
        .route("/", post(profiles::create_profile))
        .route("/{id}", get(profiles::get_profile));

    // Per-user views
    let user_routes = Router::new()
        .route("/{user_id}/bookings", get(bookings::user_bookings))
        .route("/{user_id}/parcels", get(parcels::sender_parcels))
        .route("/{user_id}/deliveries", get(parcels::carrier_deliveries));

    let owner_routes = Router::new()
        .route("/{owner_id}/dashboard", get(dashboard::owner_dashboard));

    Router::new()
        .nest("/api/quotes", quote_routes)
        .nest("/api/vehicles", vehicle_routes)
        .nest("/api/bookings", booking_routes)
        .nest("/api/parcels", parcel_routes)
        .nest("/api/profiles", profile_routes)
        .nest("/api/users", user_routes)
        .nest("/api/owners", owner_routes)
        .with_state(state)
}
