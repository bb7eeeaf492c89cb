use std::time::Duration;

use super::config::GameConfig;

/// Derives the interval between committed moves from the catch counter.
///
/// Every `level_up_every` catches the score multiplier goes up by one; the
/// interval additionally shrinks by `speedup` while it is still above the
/// floor. Once the floor is reached, further level-ups keep raising the
/// multiplier without changing the timing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeedController {
    interval: Duration,
    multiplier: u32,

    initial: Duration,
    floor: Duration,
    step: Duration,
    every: u32,
    turbo: Duration,
}

impl SpeedController {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            interval: config.initial_interval(),
            multiplier: 1,
            initial: config.initial_interval(),
            floor: config.min_interval(),
            step: config.speedup(),
            every: config.level_up_every,
            turbo: config.turbo_interval(),
        }
    }

    /// Restore the round-start interval and multiplier
    pub fn reset(&mut self) {
        self.interval = self.initial;
        self.multiplier = 1;
    }

    /// Notify the controller of the current catch count, after a catch
    pub fn on_catch(&mut self, catches: u32) {
        if self.every == 0 || catches == 0 || catches % self.every != 0 {
            return;
        }

        self.multiplier += 1;
        if self.interval > self.floor {
            self.interval = self.floor.max(self.interval.saturating_sub(self.step));
        }
    }

    /// Current interval between committed moves
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Current score multiplier; points per catch
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Interval to the next committed move; a held turbo input overrides it
    /// for exactly that one move
    pub fn tick_interval(&self, turbo: bool) -> Duration {
        if turbo {
            self.turbo
        } else {
            self.interval
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> SpeedController {
        SpeedController::new(&GameConfig::default())
    }

    #[test]
    fn test_initial_state() {
        let speed = controller();
        assert_eq!(speed.interval(), Duration::from_millis(320));
        assert_eq!(speed.multiplier(), 1);
    }

    #[test]
    fn test_level_up_every_threshold() {
        let mut speed = controller();

        for catches in 1..=9 {
            speed.on_catch(catches);
        }
        assert_eq!(speed.interval(), Duration::from_millis(320));
        assert_eq!(speed.multiplier(), 1);

        speed.on_catch(10);
        assert_eq!(speed.interval(), Duration::from_millis(300));
        assert_eq!(speed.multiplier(), 2);
    }

    #[test]
    fn test_interval_monotonic_and_floored() {
        let mut speed = controller();
        let mut last = speed.interval();

        for catches in 1..=1000 {
            speed.on_catch(catches);
            assert!(speed.interval() <= last);
            assert!(speed.interval() >= Duration::from_millis(60));
            last = speed.interval();
        }
        assert_eq!(speed.interval(), Duration::from_millis(60));
    }

    #[test]
    fn test_multiplier_keeps_rising_past_floor() {
        let mut speed = controller();

        // 320 -> 60 takes 13 level-ups; go well past that
        for catches in 1..=200 {
            speed.on_catch(catches);
        }
        assert_eq!(speed.interval(), Duration::from_millis(60));
        assert_eq!(speed.multiplier(), 21);
    }

    #[test]
    fn test_turbo_overrides_single_tick() {
        let speed = controller();
        assert_eq!(speed.tick_interval(true), Duration::from_millis(30));
        assert_eq!(speed.tick_interval(false), Duration::from_millis(320));
    }

    #[test]
    fn test_reset() {
        let mut speed = controller();
        for catches in 1..=50 {
            speed.on_catch(catches);
        }
        speed.reset();
        assert_eq!(speed.interval(), Duration::from_millis(320));
        assert_eq!(speed.multiplier(), 1);
    }
}
