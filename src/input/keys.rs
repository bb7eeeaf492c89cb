use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::buttons::{Button, ButtonSet};

/// Map a key event to the logical button it drives, if any.
///
/// Arrows and WASD steer, space or `t` is turbo (doubling as the commit
/// button during name entry), `p` is pause.
pub fn button_for_key(key: &KeyEvent) -> Option<Button> {
    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Button::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Button::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Button::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Button::Right),
        KeyCode::Char(' ') | KeyCode::Char('t') | KeyCode::Char('T') => Some(Button::Turbo),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Button::Pause),
        _ => None,
    }
}

/// Whether a key event asks to quit the program entirely
pub fn is_quit_key(key: &KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
}

/// Synthesizes pressed/not-pressed button levels from terminal key events.
///
/// Terminals report presses (and auto-repeats), not held levels, so each
/// event marks its button pressed for a short sustain window; auto-repeat
/// refreshes the window while the key is held. Release events, where the
/// terminal delivers them, clear the level immediately. Debouncing is not
/// done here - that stays with the consumers.
pub struct ButtonLevels {
    sustain: Duration,
    expires: [Option<Instant>; 6],
}

impl ButtonLevels {
    pub fn new(sustain: Duration) -> Self {
        Self {
            sustain,
            expires: [None; 6],
        }
    }

    /// Record a key event at `now`
    pub fn on_key(&mut self, key: &KeyEvent, now: Instant) {
        let Some(button) = button_for_key(key) else {
            return;
        };
        let slot = &mut self.expires[Self::index(button)];

        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => *slot = Some(now + self.sustain),
            KeyEventKind::Release => *slot = None,
        }
    }

    /// Current levels of all six buttons
    pub fn snapshot(&self, now: Instant) -> ButtonSet {
        let mut set = ButtonSet::none();
        for button in Button::ALL {
            if let Some(until) = self.expires[Self::index(button)] {
                if now < until {
                    set.set(button, true);
                }
            }
        }
        set
    }

    fn index(button: Button) -> usize {
        match button {
            Button::Left => 0,
            Button::Right => 1,
            Button::Up => 2,
            Button::Down => 3,
            Button::Pause => 4,
            Button::Turbo => 5,
        }
    }
}

impl Default for ButtonLevels {
    fn default() -> Self {
        Self::new(Duration::from_millis(200))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(button_for_key(&press(KeyCode::Up)), Some(Button::Up));
        assert_eq!(button_for_key(&press(KeyCode::Char('a'))), Some(Button::Left));
        assert_eq!(button_for_key(&press(KeyCode::Char(' '))), Some(Button::Turbo));
        assert_eq!(button_for_key(&press(KeyCode::Char('p'))), Some(Button::Pause));
        assert_eq!(button_for_key(&press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit_key(&press(KeyCode::Char('q'))));
        assert!(is_quit_key(&press(KeyCode::Esc)));
        assert!(is_quit_key(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_quit_key(&press(KeyCode::Char('w'))));
    }

    #[test]
    fn test_level_sustain_and_expiry() {
        let t0 = Instant::now();
        let mut levels = ButtonLevels::new(Duration::from_millis(100));

        levels.on_key(&press(KeyCode::Left), t0);
        assert!(levels.snapshot(t0).is_pressed(Button::Left));
        assert!(levels
            .snapshot(t0 + Duration::from_millis(50))
            .is_pressed(Button::Left));
        assert!(!levels
            .snapshot(t0 + Duration::from_millis(150))
            .is_pressed(Button::Left));
    }

    #[test]
    fn test_release_clears_level() {
        let t0 = Instant::now();
        let mut levels = ButtonLevels::new(Duration::from_millis(100));

        levels.on_key(&press(KeyCode::Char(' ')), t0);
        assert!(levels.snapshot(t0).is_pressed(Button::Turbo));

        let release = KeyEvent {
            kind: KeyEventKind::Release,
            ..press(KeyCode::Char(' '))
        };
        levels.on_key(&release, t0 + Duration::from_millis(10));
        assert!(!levels
            .snapshot(t0 + Duration::from_millis(20))
            .is_pressed(Button::Turbo));
    }
}
