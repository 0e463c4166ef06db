// ── Incremental text input ──
//
// Text boxes in the menu are fed one frame at a time from the set of keys
// released during that frame. Evaluation is a pure function of the previous
// buffer and the frame's key set; the capture wrapper adds the control
// suppression side effect the host needs while a box is active.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use crate::services::ControlSuppressor;

/// Printable characters that append themselves, scanned in this order.
pub const SCAN_RANGE: RangeInclusive<char> = '!'..='}';

/// A discrete key-release signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character key.
    Char(char),
    Space,
    /// The minus key, which types an underscore.
    Underscore,
    /// Removes the last character.
    Delete,
    /// Clears the whole buffer.
    Backspace,
}

/// Keys released during one frame. Releasing the same key twice within a
/// frame counts once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyFrame {
    chars: BTreeSet<char>,
    space: bool,
    underscore: bool,
    delete: bool,
    backspace: bool,
}

impl KeyFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn release(&mut self, key: Key) {
        match key {
            Key::Char(' ') | Key::Space => self.space = true,
            Key::Char(c) => {
                self.chars.insert(c);
            }
            Key::Underscore => self.underscore = true,
            Key::Delete => self.delete = true,
            Key::Backspace => self.backspace = true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty() && !self.space && !self.underscore && !self.delete && !self.backspace
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn released(&self, c: char) -> bool {
        self.chars.contains(&c)
    }
}

impl FromIterator<Key> for KeyFrame {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut frame = Self::new();
        for key in iter {
            frame.release(key);
        }
        frame
    }
}

/// Apply one frame of key releases to `previous`.
///
/// Order: printable characters in scan order, then space, underscore,
/// delete, and finally backspace.
pub fn evaluate_input(previous: &str, frame: &KeyFrame) -> String {
    let mut text = previous.to_owned();
    if frame.is_empty() {
        return text;
    }

    for c in SCAN_RANGE {
        if frame.released(c) {
            text.push(c);
        }
    }
    if frame.space {
        text.push(' ');
    }
    if frame.underscore {
        text.push('_');
    }
    if frame.delete {
        text.pop();
    }
    if frame.backspace {
        text.clear();
    }
    text
}

/// A text buffer plus its capture flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    buffer: String,
    capturing: bool,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    pub fn set_capturing(&mut self, capturing: bool) {
        self.capturing = capturing;
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Feed one frame of keys if this box holds capture. Controls are
    /// suppressed before sampling.
    pub fn poll<C: ControlSuppressor + ?Sized>(&mut self, frame: &KeyFrame, controls: &mut C) {
        if !self.capturing {
            return;
        }
        controls.suppress_controls();
        self.buffer = evaluate_input(&self.buffer, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingControls(usize);

    impl ControlSuppressor for CountingControls {
        fn suppress_controls(&mut self) {
            self.0 += 1;
        }
    }

    fn frame(keys: &[Key]) -> KeyFrame {
        keys.iter().copied().collect()
    }

    #[test]
    fn empty_frame_is_identity() {
        assert_eq!(evaluate_input("ADDER", &KeyFrame::new()), "ADDER");
        assert_eq!(evaluate_input("", &KeyFrame::new()), "");
    }

    #[test]
    fn chars_append_in_scan_order_not_press_order() {
        let keys = frame(&[Key::Char('Z'), Key::Char('A'), Key::Char('5')]);
        assert_eq!(evaluate_input("", &keys), "5AZ");
    }

    #[test]
    fn repeated_release_appends_once() {
        let keys = frame(&[Key::Char('A'), Key::Char('A')]);
        assert_eq!(evaluate_input("", &keys), "A");
    }

    #[test]
    fn space_and_underscore_substitutions() {
        assert_eq!(evaluate_input("a", &frame(&[Key::Space])), "a ");
        assert_eq!(evaluate_input("a", &frame(&[Key::Char(' ')])), "a ");
        assert_eq!(evaluate_input("a", &frame(&[Key::Underscore])), "a_");
        assert_eq!(evaluate_input("a", &frame(&[Key::Char('B'), Key::Space, Key::Underscore])), "aB _");
    }

    #[test]
    fn chars_outside_scan_range_are_ignored() {
        assert_eq!(evaluate_input("", &frame(&[Key::Char('~'), Key::Char('é')])), "");
    }

    #[test]
    fn delete_pops_last_and_is_noop_on_empty() {
        assert_eq!(evaluate_input("ADDER", &frame(&[Key::Delete])), "ADDE");
        assert_eq!(evaluate_input("", &frame(&[Key::Delete])), "");
    }

    #[test]
    fn delete_applies_after_appends() {
        assert_eq!(evaluate_input("AB", &frame(&[Key::Char('C'), Key::Delete])), "AB");
    }

    #[test]
    fn backspace_always_empties() {
        assert_eq!(evaluate_input("ZENTORNO", &frame(&[Key::Backspace])), "");
        assert_eq!(evaluate_input("", &frame(&[Key::Backspace])), "");
        assert_eq!(evaluate_input("X", &frame(&[Key::Char('Y'), Key::Backspace])), "");
    }

    #[test]
    fn poll_only_when_capturing() {
        let mut controls = CountingControls::default();
        let mut input = TextInput::new();
        input.poll(&frame(&[Key::Char('A')]), &mut controls);
        assert_eq!(input.value(), "");
        assert_eq!(controls.0, 0);

        input.set_capturing(true);
        input.poll(&frame(&[Key::Char('A')]), &mut controls);
        input.poll(&KeyFrame::new(), &mut controls);
        assert_eq!(input.value(), "A");
        assert_eq!(controls.0, 2);
    }
}
