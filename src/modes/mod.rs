//! Execution modes; the arcade loop is the only one

pub mod arcade;

pub use arcade::ArcadeMode;
