/// The six logical buttons of the arcade panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
    Up,
    Down,
    Pause,
    Turbo,
}

impl Button {
    /// All buttons, in contention-priority order: when several are pressed
    /// at once, the first in this list wins
    pub const ALL: [Button; 6] = [
        Button::Left,
        Button::Right,
        Button::Up,
        Button::Down,
        Button::Pause,
        Button::Turbo,
    ];

    fn index(self) -> usize {
        match self {
            Button::Left => 0,
            Button::Right => 1,
            Button::Up => 2,
            Button::Down => 3,
            Button::Pause => 4,
            Button::Turbo => 5,
        }
    }
}

/// Pressed/not-pressed snapshot of all six buttons for one poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonSet {
    pressed: [bool; 6],
}

impl ButtonSet {
    pub fn none() -> Self {
        Self::default()
    }

    /// Builder-style press, mainly for tests
    pub fn with(mut self, button: Button) -> Self {
        self.set(button, true);
        self
    }

    pub fn set(&mut self, button: Button, pressed: bool) {
        self.pressed[button.index()] = pressed;
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.pressed[button.index()]
    }

    pub fn any_pressed(&self) -> bool {
        self.pressed.iter().any(|&p| p)
    }

    /// The pressed button that wins contention this poll, if any
    pub fn first_pressed(&self) -> Option<Button> {
        Button::ALL.into_iter().find(|&b| self.is_pressed(b))
    }
}
