use std::time::{Duration, Instant};

use crate::input::{Button, ButtonSet, Cooldown, EdgeTrigger};

/// The alphabet a name is picked from, in scroll order
pub const ALPHABET: [char; 69] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l',
    'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '0', '1', '2', '3', '4',
    '5', '6', '7', '8', '9', ' ', '_', '.', '@', '!', '?', ':',
];

/// Rows per glyph in the scroll strip; the animation moves one row at a time
const GLYPH_ROWS: usize = 6;
/// Cadence of the scroll animation
const SCROLL_STEP: Duration = Duration::from_millis(20);
/// All input is ignored for this long after entry starts
const ENTRY_GUARD: Duration = Duration::from_millis(500);
/// Cooldown for the once-per-press buttons (left, right, confirm)
const PRESS_COOLDOWN: Duration = Duration::from_millis(150);
/// Step rate cap for a held up/down button
const SCROLL_COOLDOWN: Duration = Duration::from_millis(120);

/// Modal editor that builds a fixed-length name one slot at a time from
/// [`ALPHABET`], using a scrolling selector.
///
/// Up/Down move the selection with wraparound; Right advances to the next
/// slot; Left backs up, restoring that slot's earlier choice; the turbo
/// button confirms and is the only way out. Every button is debounced here,
/// and a confirm press that was already held when entry started is ignored
/// until a release has been seen.
pub struct NameEntryEditor {
    name_len: usize,
    chosen: Vec<Option<usize>>,
    current_slot: usize,
    selected_index: usize,

    scroll_row: usize,
    scroll_dir: i32,
    next_anim: Instant,

    ready_at: Instant,
    commit_armed: bool,

    left: EdgeTrigger,
    right: EdgeTrigger,
    confirm: EdgeTrigger,
    up_gate: Cooldown,
    down_gate: Cooldown,
}

impl NameEntryEditor {
    /// Start editing. `buttons` is the snapshot at entry time, used to
    /// suppress a confirm that is already held down.
    pub fn new(name_len: usize, buttons: &ButtonSet, now: Instant) -> Self {
        let mut chosen = vec![None; name_len.max(1)];
        chosen[0] = Some(0);

        Self {
            name_len: name_len.max(1),
            chosen,
            current_slot: 0,
            selected_index: 0,
            scroll_row: 0,
            scroll_dir: 1,
            next_anim: now,
            ready_at: now + ENTRY_GUARD,
            commit_armed: !buttons.is_pressed(Button::Turbo),
            left: EdgeTrigger::new(PRESS_COOLDOWN),
            right: EdgeTrigger::new(PRESS_COOLDOWN),
            confirm: EdgeTrigger::new(PRESS_COOLDOWN),
            up_gate: Cooldown::new(SCROLL_COOLDOWN),
            down_gate: Cooldown::new(SCROLL_COOLDOWN),
        }
    }

    /// Advance the editor by one poll; `Some(name)` exactly once, on commit
    pub fn poll(&mut self, buttons: &ButtonSet, now: Instant) -> Option<String> {
        self.step_animation(now);

        if now < self.ready_at {
            return None;
        }

        if !self.commit_armed && !buttons.is_pressed(Button::Turbo) {
            self.commit_armed = true;
        }

        let left = self.left.update(buttons.is_pressed(Button::Left), now);
        let right = self.right.update(buttons.is_pressed(Button::Right), now);
        let confirm = self.confirm.update(buttons.is_pressed(Button::Turbo), now);

        if left {
            self.retreat();
        } else if right {
            self.advance_slot();
        } else if buttons.is_pressed(Button::Up) && self.up_gate.fire(now) {
            self.shift_selection(-1);
        } else if buttons.is_pressed(Button::Down) && self.down_gate.fire(now) {
            self.shift_selection(1);
        } else if self.commit_armed && confirm {
            return Some(self.finish());
        }

        None
    }

    fn shift_selection(&mut self, delta: i32) {
        let len = ALPHABET.len();
        self.selected_index = (self.selected_index + len).wrapping_add_signed(delta as isize) % len;
        self.scroll_dir = delta;
        self.chosen[self.current_slot] = Some(self.selected_index);
    }

    fn advance_slot(&mut self) {
        if self.current_slot + 1 >= self.name_len {
            return;
        }
        self.chosen[self.current_slot] = Some(self.selected_index);
        self.current_slot += 1;
        // A fresh slot always starts at the top of the alphabet
        self.selected_index = 0;
        self.chosen[self.current_slot] = Some(0);
        self.scroll_row = 0;
        self.scroll_dir = 1;
    }

    fn retreat(&mut self) {
        if self.current_slot == 0 {
            return;
        }
        self.chosen[self.current_slot] = None;
        self.current_slot -= 1;
        self.selected_index = self.chosen[self.current_slot].unwrap_or(0);
        // Jump the strip straight to the restored choice
        self.scroll_row = self.selected_index * GLYPH_ROWS;
    }

    fn finish(&self) -> String {
        self.chosen
            .iter()
            .take_while(|choice| choice.is_some())
            .filter_map(|choice| choice.map(|i| ALPHABET[i]))
            .collect()
    }

    /// Move the strip one row toward the selection, wrapping at the ends
    fn step_animation(&mut self, now: Instant) {
        if now < self.next_anim {
            return;
        }
        self.next_anim = now + SCROLL_STEP;

        let total = ALPHABET.len() * GLYPH_ROWS;
        let target = self.selected_index * GLYPH_ROWS;
        if self.scroll_row != target {
            self.scroll_row = (self.scroll_row + total).wrapping_add_signed(self.scroll_dir as isize) % total;
        }
    }

    /// Slot the cursor is on
    pub fn current_slot(&self) -> usize {
        self.current_slot
    }

    pub fn name_len(&self) -> usize {
        self.name_len
    }

    /// Character chosen for a slot, if one is stored
    pub fn slot_char(&self, slot: usize) -> Option<char> {
        self.chosen.get(slot).copied().flatten().map(|i| ALPHABET[i])
    }

    /// The strip as currently scrolled: the glyphs above, under and below
    /// the cursor
    pub fn preview(&self) -> (char, char, char) {
        let len = ALPHABET.len();
        let center = self.scroll_row / GLYPH_ROWS;
        (
            ALPHABET[(center + len - 1) % len],
            ALPHABET[center],
            ALPHABET[(center + 1) % len],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn editor(now: Instant) -> NameEntryEditor {
        NameEntryEditor::new(6, &ButtonSet::none(), now)
    }

    /// Press and release a button well clear of every cooldown window
    fn tap(ed: &mut NameEntryEditor, button: Button, at: Instant) -> Option<String> {
        let committed = ed.poll(&ButtonSet::none().with(button), at);
        ed.poll(&ButtonSet::none(), at + ms(1));
        committed
    }

    #[test]
    fn test_immediate_confirm_yields_default() {
        let t0 = Instant::now();
        let mut ed = editor(t0);

        assert_eq!(tap(&mut ed, Button::Turbo, t0 + ms(600)), Some("A".into()));
    }

    #[test]
    fn test_entry_guard_swallows_early_input() {
        let t0 = Instant::now();
        let mut ed = editor(t0);

        assert_eq!(tap(&mut ed, Button::Turbo, t0 + ms(100)), None);
        assert_eq!(tap(&mut ed, Button::Down, t0 + ms(200)), None);
        assert_eq!(ed.slot_char(0), Some('A'));
    }

    #[test]
    fn test_up_wraps_to_alphabet_end() {
        let t0 = Instant::now();
        let mut ed = editor(t0);

        tap(&mut ed, Button::Up, t0 + ms(600));
        assert_eq!(ed.slot_char(0), Some(':'));
    }

    #[test]
    fn test_down_steps_forward() {
        let t0 = Instant::now();
        let mut ed = editor(t0);

        tap(&mut ed, Button::Down, t0 + ms(600));
        assert_eq!(ed.slot_char(0), Some('B'));

        tap(&mut ed, Button::Down, t0 + ms(800));
        assert_eq!(ed.slot_char(0), Some('C'));
    }

    #[test]
    fn test_right_advances_and_resets_new_slot() {
        let t0 = Instant::now();
        let mut ed = editor(t0);

        tap(&mut ed, Button::Down, t0 + ms(600));
        tap(&mut ed, Button::Right, t0 + ms(800));

        assert_eq!(ed.current_slot(), 1);
        assert_eq!(ed.slot_char(0), Some('B'));
        assert_eq!(ed.slot_char(1), Some('A'));

        tap(&mut ed, Button::Down, t0 + ms(1000));
        let name = tap(&mut ed, Button::Turbo, t0 + ms(1200));
        assert_eq!(name, Some("BB".into()));
    }

    #[test]
    fn test_left_restores_previous_choice() {
        let t0 = Instant::now();
        let mut ed = editor(t0);

        tap(&mut ed, Button::Down, t0 + ms(600));
        tap(&mut ed, Button::Down, t0 + ms(800));
        tap(&mut ed, Button::Right, t0 + ms(1000));
        tap(&mut ed, Button::Down, t0 + ms(1200));
        assert_eq!(ed.slot_char(1), Some('B'));

        tap(&mut ed, Button::Left, t0 + ms(1400));
        assert_eq!(ed.current_slot(), 0);
        assert_eq!(ed.slot_char(0), Some('C'));
        // The vacated slot's stored choice is cleared
        assert_eq!(ed.slot_char(1), None);

        let name = tap(&mut ed, Button::Turbo, t0 + ms(1600));
        assert_eq!(name, Some("C".into()));
    }

    #[test]
    fn test_back_navigation_is_a_no_op_for_the_name() {
        let t0 = Instant::now();

        // Right then Left then confirm, no Up/Down anywhere
        let mut ed = editor(t0);
        tap(&mut ed, Button::Right, t0 + ms(600));
        tap(&mut ed, Button::Left, t0 + ms(800));
        let roundabout = tap(&mut ed, Button::Turbo, t0 + ms(1000));

        let mut ed = editor(t0);
        let direct = tap(&mut ed, Button::Turbo, t0 + ms(600));

        assert_eq!(roundabout, direct);
    }

    #[test]
    fn test_left_at_first_slot_does_nothing() {
        let t0 = Instant::now();
        let mut ed = editor(t0);

        tap(&mut ed, Button::Left, t0 + ms(600));
        assert_eq!(ed.current_slot(), 0);
        assert_eq!(ed.slot_char(0), Some('A'));
    }

    #[test]
    fn test_right_stops_at_last_slot() {
        let t0 = Instant::now();
        let mut ed = editor(t0);

        let mut t = t0 + ms(600);
        for _ in 0..10 {
            tap(&mut ed, Button::Right, t);
            t += ms(200);
        }
        assert_eq!(ed.current_slot(), 5);
    }

    #[test]
    fn test_held_right_advances_once() {
        let t0 = Instant::now();
        let mut ed = editor(t0);
        let held = ButtonSet::none().with(Button::Right);

        ed.poll(&held, t0 + ms(600));
        ed.poll(&held, t0 + ms(610));
        ed.poll(&held, t0 + ms(900));
        assert_eq!(ed.current_slot(), 1);
    }

    #[test]
    fn test_held_confirm_at_entry_must_release_first() {
        let t0 = Instant::now();
        let held = ButtonSet::none().with(Button::Turbo);
        let mut ed = NameEntryEditor::new(6, &held, t0);

        // Still holding after the guard: no commit
        assert_eq!(ed.poll(&held, t0 + ms(600)), None);
        assert_eq!(ed.poll(&held, t0 + ms(700)), None);

        // Release, then a fresh press commits
        assert_eq!(ed.poll(&ButtonSet::none(), t0 + ms(800)), None);
        assert!(ed.poll(&held, t0 + ms(1000)).is_some());
    }

    #[test]
    fn test_scroll_animation_converges_on_selection() {
        let t0 = Instant::now();
        let mut ed = editor(t0);

        tap(&mut ed, Button::Down, t0 + ms(600));

        // One glyph is six rows; walk the animation forward
        let mut t = t0 + ms(620);
        for _ in 0..8 {
            ed.poll(&ButtonSet::none(), t);
            t += ms(25);
        }
        let (above, center, below) = ed.preview();
        assert_eq!(center, 'B');
        assert_eq!(above, 'A');
        assert_eq!(below, 'C');
    }
}
