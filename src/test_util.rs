// Snapshot payload builders shared by unit and integration tests.

pub const STARTING_SNAPSHOT: &str = concat!(
    "rnbqkbnr",
    "pppppppp",
    "........",
    "........",
    "........",
    "........",
    "PPPPPPPP",
    "RNBQKBNR",
);

// Ranks listed top-down (rank 8 first), 8 tokens each.
pub fn snapshot(ranks: [&str; 8]) -> String {
    assert!(ranks.iter().all(|rank| rank.chars().count() == 8));
    ranks.concat()
}
