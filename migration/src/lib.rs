pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_profiles;
mod m20240601_000002_create_vehicles;
mod m20240601_000003_create_bookings;
mod m20240601_000004_create_parcels;
mod m20240601_000005_create_accepted_parcels;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_profiles::Migration),
            Box::new(m20240601_000002_create_vehicles::Migration),
            Box::new(m20240601_000003_create_bookings::Migration),
            Box::new(m20240601_000004_create_parcels::Migration),
            Box::new(m20240601_000005_create_accepted_parcels::Migration),
        ]
    }
}
