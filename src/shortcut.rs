//! Keyboard shortcut type and its integer wire codec.
//!
//! Shortcuts are persisted as a single unsigned integer rather than a string:
//! some keys share a character representation (the period and the numpad
//! decimal point, for instance), so a string round-trip would be ambiguous.
//! The packing uses at most 12 bits: the key code in the low byte and one
//! modifier bit each for Win, Ctrl, Alt, and Shift in bits 8-11.

use std::fmt;

/// A modifier-plus-key-code combination bound to an application action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Shortcut {
    pub win: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    /// Virtual key code, 0 = unset.
    pub code: u8,
}

impl Shortcut {
    /// True when no key and no modifiers are set.
    pub fn is_empty(&self) -> bool {
        *self == Shortcut::default()
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "(none)");
        }
        if self.win {
            write!(f, "Win+")?;
        }
        if self.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.alt {
            write!(f, "Alt+")?;
        }
        if self.shift {
            write!(f, "Shift+")?;
        }
        if self.code.is_ascii_alphanumeric() {
            write!(f, "{}", self.code as char)
        } else {
            write!(f, "0x{:02X}", self.code)
        }
    }
}

/// The actions a shortcut can be bound to.
///
/// The discriminant doubles as the index into the settings shortcut table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Scale = 0,
    WindowedModeScale = 1,
    Toolbar = 2,
}

/// Number of shortcut actions, i.e. the size of the shortcut table.
pub const SHORTCUT_ACTION_COUNT: usize = 3;

impl ShortcutAction {
    /// All actions in table order.
    pub fn all() -> &'static [ShortcutAction] {
        &[
            ShortcutAction::Scale,
            ShortcutAction::WindowedModeScale,
            ShortcutAction::Toolbar,
        ]
    }

    /// Stable name used in log lines.
    pub fn name(self) -> &'static str {
        match self {
            ShortcutAction::Scale => "scale",
            ShortcutAction::WindowedModeScale => "windowedModeScale",
            ShortcutAction::Toolbar => "toolbar",
        }
    }
}

/// Pack a shortcut into its integer wire form.
pub fn encode(shortcut: &Shortcut) -> u32 {
    let mut value = u32::from(shortcut.code);
    if shortcut.win {
        value |= 0x100;
    }
    if shortcut.ctrl {
        value |= 0x200;
    }
    if shortcut.alt {
        value |= 0x400;
    }
    if shortcut.shift {
        value |= 0x800;
    }
    value
}

/// Unpack an integer wire value into `target`.
///
/// Values above 0xFFF cannot be a valid packing; decoding is then a no-op so
/// that whatever shortcut was already set is preserved.
pub fn decode(value: u32, target: &mut Shortcut) {
    if value > 0xfff {
        return;
    }

    target.code = (value & 0xff) as u8;
    target.win = value & 0x100 != 0;
    target.ctrl = value & 0x200 != 0;
    target.alt = value & 0x400 != 0;
    target.shift = value & 0x800 != 0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_packs_modifier_bits() {
        let shortcut = Shortcut {
            win: false,
            ctrl: true,
            alt: true,
            shift: false,
            code: b'A',
        };
        assert_eq!(encode(&shortcut), 0x600 | u32::from(b'A'));
    }

    #[test]
    fn test_round_trip_all_modifier_combinations() {
        for bits in 0u32..16 {
            let original = Shortcut {
                win: bits & 1 != 0,
                ctrl: bits & 2 != 0,
                alt: bits & 4 != 0,
                shift: bits & 8 != 0,
                code: b'Q',
            };
            let mut decoded = Shortcut::default();
            decode(encode(&original), &mut decoded);
            assert_eq!(decoded, original, "modifier combination {bits:#06b}");
        }
    }

    #[test]
    fn test_decode_out_of_range_preserves_target() {
        let existing = Shortcut {
            alt: true,
            shift: true,
            code: b'D',
            ..Shortcut::default()
        };
        let mut target = existing;
        decode(0x1000, &mut target);
        assert_eq!(target, existing, "decode of >0xFFF must not modify target");
    }

    #[test]
    fn test_decode_zero_clears_shortcut() {
        let mut target = Shortcut {
            ctrl: true,
            code: b'Z',
            ..Shortcut::default()
        };
        decode(0, &mut target);
        assert!(target.is_empty());
    }

    #[test]
    fn test_display_formats_modifiers_in_order() {
        let shortcut = Shortcut {
            alt: true,
            shift: true,
            code: b'A',
            ..Shortcut::default()
        };
        assert_eq!(shortcut.to_string(), "Alt+Shift+A");
    }
}
