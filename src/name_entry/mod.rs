//! Scrolling letter-picker used to enter a name for the leaderboard

pub mod editor;

pub use editor::{NameEntryEditor, ALPHABET};
