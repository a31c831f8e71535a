mod leaderboard;
mod snapshot;

pub use leaderboard::*;
pub use snapshot::*;

pub type UserId = i64;
