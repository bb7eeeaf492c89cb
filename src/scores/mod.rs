//! High-score table: eligibility, ranked insertion and the persistence
//! round-trip against a byte-addressable store

pub mod store;
pub mod table;

pub use store::{FileStorage, ScoreStore, Storage};
pub use table::{HighScoreTable, ScoreEntry, NAME_LEN, TABLE_SLOTS};
