//! Logical buttons and input conditioning
//!
//! The game is defined over six buttons sampled as pressed/not-pressed
//! levels. Debouncing (edge detection plus per-button cooldown) lives here
//! and is the consumers' responsibility, not the adapter's; `keys` is the
//! terminal adapter that synthesizes levels from key events.

pub mod buttons;
pub mod debounce;
pub mod keys;

pub use buttons::{Button, ButtonSet};
pub use debounce::{Cooldown, EdgeTrigger};
pub use keys::{button_for_key, is_quit_key, ButtonLevels};
