pub mod player;
pub mod round;

pub use player::Player;
pub use round::{JoinOutcome, Round};
