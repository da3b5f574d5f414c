use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Round lifecycle status, stored as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "lowercase")]
pub enum RoundStatus {
    /// Lobby is open and accepting players
    #[sea_orm(num_value = 1)]
    Open,
    /// Lobby no longer accepts players, round has not started
    #[sea_orm(num_value = 2)]
    Closed,
    /// Round is being played
    #[sea_orm(num_value = 3)]
    Running,
    /// Round is over
    #[sea_orm(num_value = 4)]
    Finished,
}

impl RoundStatus {
    /// Statuses listed as active rounds.
    pub const ACTIVE: [Self; 3] = [Self::Open, Self::Closed, Self::Running];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Running => "running",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
