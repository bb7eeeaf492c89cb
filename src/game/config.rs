use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::food::SpawnRegion;
use super::grid::Grid;

/// Configuration for one arcade installation.
///
/// Defaults carry the tuning the game shipped with: a 64x32 board, a
/// 320 ms starting pace that tightens by 20 ms every ten catches down to a
/// 60 ms floor, and a 30 ms turbo override.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the board in cells, wall ring included
    pub grid_width: i32,
    /// Height of the board in cells, wall ring included
    pub grid_height: i32,
    /// Snake length at round start
    pub initial_snake_length: usize,

    /// Milliseconds between committed moves at round start
    pub initial_interval_ms: u64,
    /// The interval never drops below this floor
    pub min_interval_ms: u64,
    /// Interval reduction applied at each level-up
    pub speedup_ms: u64,
    /// A level-up happens every this many catches
    pub level_up_every: u32,
    /// Interval used for the single tick following a held turbo input
    pub turbo_interval_ms: u64,
    /// Minimum time between two accepted pause toggles
    pub pause_cooldown_ms: u64,

    /// Where the first food of a round may appear
    pub initial_food_region: SpawnRegion,
    /// Where food respawns after a catch
    pub respawn_food_region: SpawnRegion,

    /// Number of characters in an entered name
    pub name_len: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 64,
            grid_height: 32,
            initial_snake_length: 2,
            initial_interval_ms: 320,
            min_interval_ms: 60,
            speedup_ms: 20,
            level_up_every: 10,
            turbo_interval_ms: 30,
            pause_cooldown_ms: 250,
            // The two regions intentionally differ: the opening spawn uses a
            // band around the board center, respawns use the interior of the
            // upper half. Linear indices over the 64-wide board.
            initial_food_region: SpawnRegion::new(15 * 64 + 31, 30 * 64 + 33),
            respawn_food_region: SpawnRegion::new(64 + 1, 14 * 64 + 62),
            name_len: 6,
        }
    }
}

impl GameConfig {
    /// Board geometry described by this configuration
    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    pub fn initial_interval(&self) -> Duration {
        Duration::from_millis(self.initial_interval_ms)
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    pub fn speedup(&self) -> Duration {
        Duration::from_millis(self.speedup_ms)
    }

    pub fn turbo_interval(&self) -> Duration {
        Duration::from_millis(self.turbo_interval_ms)
    }

    pub fn pause_cooldown(&self) -> Duration {
        Duration::from_millis(self.pause_cooldown_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::Position;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 64);
        assert_eq!(config.grid_height, 32);
        assert_eq!(config.initial_snake_length, 2);
        assert_eq!(config.initial_interval(), Duration::from_millis(320));
        assert_eq!(config.min_interval(), Duration::from_millis(60));
        assert_eq!(config.level_up_every, 10);
    }

    #[test]
    fn test_default_regions() {
        let config = GameConfig::default();
        let grid = config.grid();

        // Opening spawn band starts at the board center
        let first = Position::from_index(config.initial_food_region.first, &grid);
        assert_eq!(first, Position::new(31, 15));

        // Respawn region covers the interior of the upper half
        let first = Position::from_index(config.respawn_food_region.first, &grid);
        let last = Position::from_index(config.respawn_food_region.last, &grid);
        assert_eq!(first, Position::new(1, 1));
        assert_eq!(last, Position::new(62, 14));
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let restored: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.grid_width, config.grid_width);
        assert_eq!(restored.initial_interval_ms, config.initial_interval_ms);
        assert_eq!(restored.respawn_food_region, config.respawn_food_region);
    }
}
