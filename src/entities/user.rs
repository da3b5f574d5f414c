use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::user_username::Entity")]
    Username,
    #[sea_orm(has_many = "super::round_entry::Entity")]
    RoundEntries,
}

impl Related<super::user_username::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Username.def()
    }
}

impl Related<super::round_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoundEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
