use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Player capacity bounds referenced by rounds.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "roundsize")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub min: i32,
    pub max: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::round::Entity")]
    Rounds,
}

impl Related<super::round::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rounds.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
