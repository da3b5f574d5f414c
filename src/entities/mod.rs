pub mod round;
pub mod round_entry;
pub mod round_size;
pub mod round_status;
pub mod user;
pub mod user_username;

pub use round_status::RoundStatus;
