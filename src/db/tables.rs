use redb::TableDefinition;

/// Users table: username -> UserRecord (serialized)
pub const USERS: TableDefinition<&str, &[u8]> = TableDefinition::new("users");

/// Scores table: (game, username) -> current score
/// Used by the embedded leaderboard backend
pub const SCORES: TableDefinition<(&str, &str), u32> = TableDefinition::new("scores");
