use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "parcel_status")]
#[serde(rename_all = "snake_case")]
pub enum ParcelStatus {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "accepted")]
    Accepted,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "parcel")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub sender_id: Uuid,
    pub pickup_location: String,
    pub drop_location: String,
    pub weight: f64,
    pub description: Option<String>,
    pub distance: i32,
    pub fee: f64,
    pub status: ParcelStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::SenderId",
        to = "super::profile::Column::Id"
    )]
    Sender,
    #[sea_orm(has_one = "super::accepted_parcel::Entity")]
    Acceptance,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sender.def()
    }
}

impl Related<super::accepted_parcel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Acceptance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
