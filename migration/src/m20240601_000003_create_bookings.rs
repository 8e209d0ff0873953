use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

use super::m20240601_000001_create_profiles::Profile;
use super::m20240601_000002_create_vehicles::Vehicle;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(BookingStatus::Enum)
                    .values([BookingStatus::Confirmed, BookingStatus::Completed])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(PaymentStatus::Enum)
                    .values([PaymentStatus::AdvancePaid, PaymentStatus::Paid])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(uuid(Booking::Id).primary_key())
                    .col(uuid(Booking::UserId).not_null())
                    .col(uuid(Booking::VehicleId).not_null())
                    .col(timestamp_with_time_zone(Booking::StartTime).not_null())
                    .col(timestamp_with_time_zone(Booking::EndTime).not_null())
                    .col(double(Booking::TotalPrice).not_null())
                    .col(double(Booking::AdvanceAmount).not_null())
                    .col(string_len_null(Booking::AadharNumber, 14))
                    .col(string_len_null(Booking::LicenseNumber, 30))
                    .col(
                        ColumnDef::new(Booking::Status)
                            .custom(BookingStatus::Enum)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Booking::PaymentStatus)
                            .custom(PaymentStatus::Enum)
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Booking::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Booking::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_vehicle")
                            .from(Booking::Table, Booking::VehicleId)
                            .to(Vehicle::Table, Vehicle::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_user")
                            .from(Booking::Table, Booking::UserId)
                            .to(Profile::Table, Profile::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Booking::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(PaymentStatus::Enum).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(BookingStatus::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Booking {
    Table,
    Id,
    UserId,
    VehicleId,
    StartTime,
    EndTime,
    TotalPrice,
    AdvanceAmount,
    AadharNumber,
    LicenseNumber,
    Status,
    PaymentStatus,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum BookingStatus {
    #[sea_orm(iden = "booking_status")]
    Enum,
    #[sea_orm(iden = "confirmed")]
    Confirmed,
    #[sea_orm(iden = "completed")]
    Completed,
}

#[derive(DeriveIden)]
pub enum PaymentStatus {
    #[sea_orm(iden = "payment_status")]
    Enum,
    #[sea_orm(iden = "advance_paid")]
    AdvancePaid,
    #[sea_orm(iden = "paid")]
    Paid,
}
