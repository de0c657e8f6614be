//! Input primitives: control-flag bitsets, key codes, pointer buttons.
//!
//! [`ControlFlags`] packs the currently held modifier keys and pointer
//! buttons into one integer so that chord bindings ("Ctrl + left drag")
//! can be matched with a single comparison. The modifier and button bits
//! occupy disjoint ranges and can be tested separately via
//! [`ControlFlags::modifiers`] and [`ControlFlags::buttons`].

use bitflags::bitflags;

bitflags! {
    /// The set of modifier keys and pointer buttons active at the time an
    /// input event was generated.
    ///
    /// Modifier bits live in the low byte, button bits in the high byte;
    /// the two sub-ranges never overlap.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct ControlFlags: u16 {
        /// Shift key.
        const SHIFT      = 0x0001;
        /// Control key.
        const CONTROL    = 0x0002;
        /// Alt key.
        const ALT        = 0x0004;
        /// Meta key.
        const META       = 0x0008;
        /// Windows/Super key.
        const WIN        = 0x0010;

        /// Primary pointer button.
        const LEFT       = 0x0100;
        /// Middle pointer button.
        const MIDDLE     = 0x0200;
        /// Secondary pointer button.
        const RIGHT      = 0x0400;
        /// Wheel rotated away from the user.
        const WHEEL_UP   = 0x0800;
        /// Wheel rotated toward the user.
        const WHEEL_DOWN = 0x1000;

        /// Every modifier-key bit.
        const ALL_MODIFIERS = 0x001F;
        /// Every pointer-button bit.
        const ALL_BUTTONS   = 0x1F00;
    }
}

impl ControlFlags {
    /// Just the modifier-key portion of the flags.
    pub fn modifiers(self) -> ControlFlags {
        self & Self::ALL_MODIFIERS
    }

    /// Just the pointer-button portion of the flags.
    pub fn buttons(self) -> ControlFlags {
        self & Self::ALL_BUTTONS
    }

    /// True iff *exactly* the given flags are active (set equality).
    pub fn these_active(self, f: ControlFlags) -> bool {
        self == f
    }

    /// True iff *at least* the given flags are active (superset).
    pub fn all_active(self, f: ControlFlags) -> bool {
        self.contains(f)
    }

    /// True iff *any* of the given flags are active (non-empty intersection).
    pub fn any_active(self, f: ControlFlags) -> bool {
        self.intersects(f)
    }

    /// Exact match over the modifier sub-range only.
    pub fn these_modifiers_active(self, f: ControlFlags) -> bool {
        self.modifiers() == f.modifiers()
    }

    /// Superset match over the modifier sub-range only.
    pub fn all_modifiers_active(self, f: ControlFlags) -> bool {
        self.modifiers().contains(f.modifiers())
    }

    /// Intersection match over the modifier sub-range only.
    pub fn any_modifiers_active(self, f: ControlFlags) -> bool {
        self.modifiers().intersects(f.modifiers())
    }

    /// Exact match over the button sub-range only.
    pub fn these_buttons_active(self, f: ControlFlags) -> bool {
        self.buttons() == f.buttons()
    }

    /// Superset match over the button sub-range only.
    pub fn all_buttons_active(self, f: ControlFlags) -> bool {
        self.buttons().contains(f.buttons())
    }

    /// Intersection match over the button sub-range only.
    pub fn any_buttons_active(self, f: ControlFlags) -> bool {
        self.buttons().intersects(f.buttons())
    }
}

/// A pointer-device button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Button {
    /// Primary button (usually left).
    Left = 0,
    /// Middle button (wheel click).
    Middle = 1,
    /// Secondary button (usually right).
    Right = 2,
    /// Wheel rotated away from the user.
    WheelUp = 3,
    /// Wheel rotated toward the user.
    WheelDown = 4,
}

impl Button {
    /// The [`ControlFlags`] bit corresponding to this button.
    pub fn flag(self) -> ControlFlags {
        match self {
            Self::Left => ControlFlags::LEFT,
            Self::Middle => ControlFlags::MIDDLE,
            Self::Right => ControlFlags::RIGHT,
            Self::WheelUp => ControlFlags::WHEEL_UP,
            Self::WheelDown => ControlFlags::WHEEL_DOWN,
        }
    }

    /// All buttons, in flag-bit order.
    pub const ALL: [Button; 5] = [
        Button::Left,
        Button::Middle,
        Button::Right,
        Button::WheelUp,
        Button::WheelDown,
    ];
}

/// Keyboard lock keys exposed through the application peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockKey {
    /// Num Lock.
    NumLock,
    /// Scroll Lock.
    ScrollLock,
    /// Caps Lock.
    CapsLock,
}

/// Symbolic key codes, independent of the host toolkit's raw codes.
///
/// `Invalid` is the sentinel produced when a raw code has no known
/// mapping; see [`KeyCode::from_raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum KeyCode {
    /// Sentinel for an unrecognized raw key code.
    Invalid,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Symbols
    Minus, Plus, Tilde, Quote, Colon,
    Backslash, Slash, LessThan, GreaterThan, LeftBracket, RightBracket,

    // Navigation
    Up, Down, Left, Right, Home, End, PageUp, PageDown,

    // Editing
    Insert, Delete, Backspace, Tab, Space, Enter,

    // Control
    Escape, Shift, Control, Alt, Meta,
    CapsLock, NumLock, ScrollLock, Break, PrintScreen, Win, Popup,

    // Function keys
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
}

impl KeyCode {
    /// Translate a raw platform key code (an ASCII-ish `u32` as delivered
    /// by simple toolkits) into a symbolic key code.
    ///
    /// Unknown codes yield [`KeyCode::Invalid`] and log a warning rather
    /// than failing: an exotic hardware key must never abort event
    /// dispatch.
    pub fn from_raw(raw: u32) -> KeyCode {
        let code = match raw {
            0x41..=0x5A => Self::letter((raw - 0x41) as u8),
            0x61..=0x7A => Self::letter((raw - 0x61) as u8),
            0x30..=0x39 => Self::digit((raw - 0x30) as u8),
            0x20 => KeyCode::Space,
            0x09 => KeyCode::Tab,
            0x0D => KeyCode::Enter,
            0x08 => KeyCode::Backspace,
            0x1B => KeyCode::Escape,
            0x7F => KeyCode::Delete,
            0x2D => KeyCode::Minus,
            0x2B => KeyCode::Plus,
            0x7E => KeyCode::Tilde,
            0x27 => KeyCode::Quote,
            0x3A => KeyCode::Colon,
            0x5C => KeyCode::Backslash,
            0x2F => KeyCode::Slash,
            0x3C => KeyCode::LessThan,
            0x3E => KeyCode::GreaterThan,
            0x5B => KeyCode::LeftBracket,
            0x5D => KeyCode::RightBracket,
            _ => KeyCode::Invalid,
        };
        if code == KeyCode::Invalid {
            tracing::warn!(target: "cairn_core::input", raw, "no mapping for raw key code");
        }
        code
    }

    /// The typed character this key produces, when it has an obvious one.
    pub fn to_char(self) -> Option<char> {
        match self {
            KeyCode::A => Some('a'),
            KeyCode::B => Some('b'),
            KeyCode::C => Some('c'),
            KeyCode::D => Some('d'),
            KeyCode::E => Some('e'),
            KeyCode::F => Some('f'),
            KeyCode::G => Some('g'),
            KeyCode::H => Some('h'),
            KeyCode::I => Some('i'),
            KeyCode::J => Some('j'),
            KeyCode::K => Some('k'),
            KeyCode::L => Some('l'),
            KeyCode::M => Some('m'),
            KeyCode::N => Some('n'),
            KeyCode::O => Some('o'),
            KeyCode::P => Some('p'),
            KeyCode::Q => Some('q'),
            KeyCode::R => Some('r'),
            KeyCode::S => Some('s'),
            KeyCode::T => Some('t'),
            KeyCode::U => Some('u'),
            KeyCode::V => Some('v'),
            KeyCode::W => Some('w'),
            KeyCode::X => Some('x'),
            KeyCode::Y => Some('y'),
            KeyCode::Z => Some('z'),
            KeyCode::Digit0 => Some('0'),
            KeyCode::Digit1 => Some('1'),
            KeyCode::Digit2 => Some('2'),
            KeyCode::Digit3 => Some('3'),
            KeyCode::Digit4 => Some('4'),
            KeyCode::Digit5 => Some('5'),
            KeyCode::Digit6 => Some('6'),
            KeyCode::Digit7 => Some('7'),
            KeyCode::Digit8 => Some('8'),
            KeyCode::Digit9 => Some('9'),
            KeyCode::Space => Some(' '),
            KeyCode::Minus => Some('-'),
            KeyCode::Plus => Some('+'),
            KeyCode::Slash => Some('/'),
            _ => None,
        }
    }

    fn letter(index: u8) -> KeyCode {
        const LETTERS: [KeyCode; 26] = [
            KeyCode::A, KeyCode::B, KeyCode::C, KeyCode::D, KeyCode::E,
            KeyCode::F, KeyCode::G, KeyCode::H, KeyCode::I, KeyCode::J,
            KeyCode::K, KeyCode::L, KeyCode::M, KeyCode::N, KeyCode::O,
            KeyCode::P, KeyCode::Q, KeyCode::R, KeyCode::S, KeyCode::T,
            KeyCode::U, KeyCode::V, KeyCode::W, KeyCode::X, KeyCode::Y,
            KeyCode::Z,
        ];
        LETTERS[index as usize]
    }

    fn digit(index: u8) -> KeyCode {
        const DIGITS: [KeyCode; 10] = [
            KeyCode::Digit0, KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3,
            KeyCode::Digit4, KeyCode::Digit5, KeyCode::Digit6, KeyCode::Digit7,
            KeyCode::Digit8, KeyCode::Digit9,
        ];
        DIGITS[index as usize]
    }
}
