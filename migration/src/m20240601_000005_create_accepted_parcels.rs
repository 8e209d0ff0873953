use sea_orm_migration::{prelude::*, schema::*};

use super::m20240601_000001_create_profiles::Profile;
use super::m20240601_000004_create_parcels::Parcel;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AcceptedParcel::Table)
                    .if_not_exists()
                    .col(uuid(AcceptedParcel::Id).primary_key())
                    // One carrier per parcel
                    .col(uuid(AcceptedParcel::ParcelId).not_null().unique_key())
                    .col(uuid(AcceptedParcel::CarrierUserId).not_null())
                    .col(
                        timestamp_with_time_zone(AcceptedParcel::AcceptedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_accepted_parcel_parcel")
                            .from(AcceptedParcel::Table, AcceptedParcel::ParcelId)
                            .to(Parcel::Table, Parcel::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_accepted_parcel_carrier")
                            .from(AcceptedParcel::Table, AcceptedParcel::CarrierUserId)
                            .to(Profile::Table, Profile::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AcceptedParcel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AcceptedParcel {
    Table,
    Id,
    ParcelId,
    CarrierUserId,
    AcceptedAt,
}
