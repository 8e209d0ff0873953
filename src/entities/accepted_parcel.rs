use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accepted_parcel")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub parcel_id: Uuid,
    pub carrier_user_id: Uuid,
    pub accepted_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::parcel::Entity",
        from = "Column::ParcelId",
        to = "super::parcel::Column::Id"
    )]
    Parcel,
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::CarrierUserId",
        to = "super::profile::Column::Id"
    )]
    Carrier,
}

impl Related<super::parcel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Parcel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
