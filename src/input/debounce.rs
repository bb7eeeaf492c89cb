use std::time::{Duration, Instant};

/// Minimum-time gate between two acceptances of the same input
#[derive(Debug, Clone, Copy)]
pub struct Cooldown {
    window: Duration,
    ready_at: Option<Instant>,
}

impl Cooldown {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            ready_at: None,
        }
    }

    /// Whether an acceptance at `now` would be allowed
    pub fn ready(&self, now: Instant) -> bool {
        match self.ready_at {
            Some(at) => now >= at,
            None => true,
        }
    }

    /// Accept if allowed, starting a new window. Returns whether accepted.
    pub fn fire(&mut self, now: Instant) -> bool {
        if !self.ready(now) {
            return false;
        }
        self.ready_at = Some(now + self.window);
        true
    }
}

/// Rising-edge detector with a per-button cooldown window.
///
/// One instance per button. `update` is fed the sampled level every poll
/// and returns true exactly once per physical press: on the transition from
/// released to pressed, and only when the cooldown window from the previous
/// accepted press has elapsed. A held button therefore never repeats.
#[derive(Debug, Clone, Copy)]
pub struct EdgeTrigger {
    was_pressed: bool,
    cooldown: Cooldown,
}

impl EdgeTrigger {
    pub fn new(window: Duration) -> Self {
        Self {
            was_pressed: false,
            cooldown: Cooldown::new(window),
        }
    }

    /// Feed the sampled level; returns whether this poll accepts a press
    pub fn update(&mut self, pressed: bool, now: Instant) -> bool {
        let fired = pressed && !self.was_pressed && self.cooldown.fire(now);
        self.was_pressed = pressed;
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_cooldown_blocks_until_window_elapses() {
        let t0 = Instant::now();
        let mut gate = Cooldown::new(ms(100));

        assert!(gate.fire(t0));
        assert!(!gate.fire(t0 + ms(50)));
        assert!(gate.fire(t0 + ms(100)));
    }

    #[test]
    fn test_edge_fires_once_per_press() {
        let t0 = Instant::now();
        let mut trigger = EdgeTrigger::new(ms(50));

        assert!(trigger.update(true, t0));
        // Held: no repeat, regardless of elapsed time
        assert!(!trigger.update(true, t0 + ms(10)));
        assert!(!trigger.update(true, t0 + ms(500)));

        // Release then press again
        assert!(!trigger.update(false, t0 + ms(510)));
        assert!(trigger.update(true, t0 + ms(520)));
    }

    #[test]
    fn test_edge_respects_cooldown() {
        let t0 = Instant::now();
        let mut trigger = EdgeTrigger::new(ms(100));

        assert!(trigger.update(true, t0));
        assert!(!trigger.update(false, t0 + ms(10)));
        // Fresh edge, but still inside the window
        assert!(!trigger.update(true, t0 + ms(20)));
        assert!(!trigger.update(false, t0 + ms(30)));
        // Fresh edge after the window
        assert!(trigger.update(true, t0 + ms(120)));
    }

    #[test]
    fn test_independent_triggers() {
        let t0 = Instant::now();
        let mut a = EdgeTrigger::new(ms(100));
        let mut b = EdgeTrigger::new(ms(100));

        assert!(a.update(true, t0));
        // A's window does not gate B
        assert!(b.update(true, t0 + ms(10)));
    }
}
