//! Wonsz - arcade snake for a fixed 64x32 pixel board
//!
//! This library provides:
//! - Core game logic: board, snake engine, food, speed curve, session (game module)
//! - Button conditioning and the terminal input adapter (input module)
//! - The scrolling letter-picker for name entry (name_entry module)
//! - The persistent high-score table (scores module)
//! - TUI rendering (render module)
//! - The top-level arcade loop (modes module)

pub mod game;
pub mod input;
pub mod modes;
pub mod name_entry;
pub mod render;
pub mod scores;
