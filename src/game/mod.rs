//! Core game logic
//!
//! Board geometry, the snake movement/collision engine, food placement,
//! the speed/level curve and the per-round session state machine. No I/O
//! and no rendering; everything here is driven by the control loop in
//! `modes` and exercised directly by tests.

pub mod config;
pub mod direction;
pub mod food;
pub mod grid;
pub mod session;
pub mod snake;
pub mod speed;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use food::{FoodSpawner, SpawnRegion};
pub use grid::{Grid, Position};
pub use session::{GameSession, SessionPhase, TickOutcome};
pub use snake::Snake;
pub use speed::SpeedController;
