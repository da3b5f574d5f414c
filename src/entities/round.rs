use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::RoundStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "round")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub wallpaper: String,
    #[sea_orm(column_name = "roundsize_id")]
    pub round_size_id: i32,
    pub starttime: Option<DateTimeWithTimeZone>,
    #[sea_orm(column_name = "roundstatus_id")]
    pub status: RoundStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::round_size::Entity",
        from = "Column::RoundSizeId",
        to = "super::round_size::Column::Id"
    )]
    RoundSize,
    #[sea_orm(has_many = "super::round_entry::Entity")]
    Entries,
}

impl Related<super::round_size::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoundSize.def()
    }
}

impl Related<super::round_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
