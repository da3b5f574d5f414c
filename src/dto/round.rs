use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;

use crate::entities::RoundStatus;

/// Active round as shown in the lobby list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Round {
    pub id: i32,
    pub name: String,
    pub wallpaper: String,
    /// Number of membership rows referencing this round
    pub joined: i64,
    pub min: i32,
    pub max: i32,
    /// `None` until a start time has been scheduled
    pub starttime: Option<DateTimeWithTimeZone>,
    pub status: RoundStatus,
}

/// Outcome of a join request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinOutcome {
    /// A new membership row was created
    Joined,
    /// The user was already a member; nothing was written
    AlreadyJoined,
}

impl JoinOutcome {
    pub const fn already_joined(self) -> bool {
        matches!(self, Self::AlreadyJoined)
    }
}
