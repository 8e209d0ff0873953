use sea_orm_migration::{prelude::*, schema::*};

use super::m20240601_000001_create_profiles::Profile;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicle::Table)
                    .if_not_exists()
                    .col(uuid(Vehicle::Id).primary_key())
                    .col(uuid(Vehicle::OwnerId).not_null())
                    .col(string_len(Vehicle::Type, 30).not_null())
                    .col(string_len(Vehicle::Brand, 50).not_null())
                    .col(string_len(Vehicle::Model, 50).not_null())
                    .col(string_len(Vehicle::NumberPlate, 20).not_null())
                    .col(double(Vehicle::PricePerHour).not_null())
                    .col(string_len(Vehicle::Location, 255).not_null())
                    .col(text_null(Vehicle::ImageUrl))
                    .col(boolean(Vehicle::IsAvailable).not_null().default(true))
                    .col(
                        timestamp_with_time_zone(Vehicle::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Vehicle::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vehicle_owner")
                            .from(Vehicle::Table, Vehicle::OwnerId)
                            .to(Profile::Table, Profile::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vehicle::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Vehicle {
    Table,
    Id,
    OwnerId,
    Type,
    Brand,
    Model,
    NumberPlate,
    PricePerHour,
    Location,
    ImageUrl,
    IsAvailable,
    CreatedAt,
    UpdatedAt,
}
