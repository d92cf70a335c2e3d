pub mod score;
pub mod user;

pub use score::{rank_top, Game, NewScore, ScoreEntry, ScoreRecord};
pub use user::{UserRecord, Username};
