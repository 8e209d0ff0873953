use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

use super::m20240601_000001_create_profiles::Profile;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(ParcelStatus::Enum)
                    .values([ParcelStatus::Open, ParcelStatus::Accepted])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Parcel::Table)
                    .if_not_exists()
                    .col(uuid(Parcel::Id).primary_key())
                    .col(uuid(Parcel::SenderId).not_null())
                    .col(string_len(Parcel::PickupLocation, 255).not_null())
                    .col(string_len(Parcel::DropLocation, 255).not_null())
                    .col(double(Parcel::Weight).not_null())
                    .col(text_null(Parcel::Description))
                    .col(integer(Parcel::Distance).not_null())
                    .col(double(Parcel::Fee).not_null())
                    .col(
                        ColumnDef::new(Parcel::Status)
                            .custom(ParcelStatus::Enum)
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Parcel::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Parcel::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parcel_sender")
                            .from(Parcel::Table, Parcel::SenderId)
                            .to(Profile::Table, Profile::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Parcel::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(ParcelStatus::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Parcel {
    Table,
    Id,
    SenderId,
    PickupLocation,
    DropLocation,
    Weight,
    Description,
    Distance,
    Fee,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum ParcelStatus {
    #[sea_orm(iden = "parcel_status")]
    Enum,
    #[sea_orm(iden = "open")]
    Open,
    #[sea_orm(iden = "accepted")]
    Accepted,
}
