use serde::Serialize;

/// Member of a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub user_id: String,
    pub username: String,
}

impl Player {
    pub fn new(user_id: i32, username: String) -> Self {
        Self {
            user_id: user_id.to_string(),
            username,
        }
    }
}
