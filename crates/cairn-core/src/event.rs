//! Event value types.
//!
//! Events are immutable snapshots of an input or lifecycle occurrence. Each
//! carries a [`Timestamp`] measured from the application context's start
//! instant; input events additionally carry the [`ControlFlags`] and pointer
//! position captured when the event was generated, so listeners never need
//! to query live device state.

use std::sync::Arc;

use glam::IVec2;

use crate::dispatch::EventDispatcher;
use crate::input::{Button, ControlFlags, KeyCode};

/// Time since the application context started.
pub type Timestamp = std::time::Duration;

/// A position or extent in surface pixel coordinates.
///
/// The origin is the upper-left corner of the surface; `y` grows downward.
pub type Pixel = IVec2;

/// What happened to a component's geometry or visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentEventKind {
    /// The component moved to a new position.
    Moved,
    /// The component changed size.
    Resized,
    /// The component became invisible.
    Hidden,
    /// The component became visible again.
    Revealed,
}

/// A component lifecycle notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentEvent {
    /// When the change occurred.
    pub timestamp: Timestamp,
    /// What changed.
    pub kind: ComponentEventKind,
    /// Component position after the change.
    pub position: Pixel,
    /// Component size after the change.
    pub size: Pixel,
    /// Component visibility after the change.
    pub visible: bool,
}

/// What happened to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventKind {
    /// A key went down.
    Pressed,
    /// A key came up.
    Released,
    /// A character was produced (press + release of a printable key).
    Typed,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// When the event occurred.
    pub timestamp: Timestamp,
    /// Modifiers and buttons held at the time.
    pub flags: ControlFlags,
    /// Pointer position at the time.
    pub position: Pixel,
    /// Press, release, or typed.
    pub kind: KeyEventKind,
    /// The key involved.
    pub key: KeyCode,
    /// The character produced, for `Typed` events of printable keys.
    pub character: Option<char>,
}

/// What the pointer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    /// Moved with at least one button held.
    Dragged,
    /// Moved with no buttons held.
    Tracked,
    /// Entered the surface.
    Entered,
    /// Left the surface.
    Exited,
}

/// A pointer-motion event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// When the event occurred.
    pub timestamp: Timestamp,
    /// Modifiers and buttons held at the time.
    pub flags: ControlFlags,
    /// Pointer position after the motion.
    pub position: Pixel,
    /// The kind of motion.
    pub kind: PointerEventKind,
}

/// What happened to a pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEventKind {
    /// The button went down.
    Pressed,
    /// The button came up.
    Released,
    /// A press/release pair completed within the click threshold.
    Clicked,
}

/// A pointer-button event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    /// When the event occurred.
    pub timestamp: Timestamp,
    /// Modifiers and buttons held at the time.
    ///
    /// For `Pressed` events the pressed button's bit is already set; for
    /// `Released` events it is already cleared.
    pub flags: ControlFlags,
    /// Pointer position at the time.
    pub position: Pixel,
    /// Press, release, or synthesized click.
    pub kind: ButtonEventKind,
    /// The button involved.
    pub button: Button,
}

/// Common accessors and flag predicates for input events.
///
/// The predicate names mirror [`ControlFlags`]: `these_*` is set equality,
/// `all_*` is superset, `any_*` is non-empty intersection.
pub trait InputEvent {
    /// When the event occurred.
    fn timestamp(&self) -> Timestamp;

    /// Modifiers and buttons held when the event was generated.
    fn flags(&self) -> ControlFlags;

    /// Pointer position when the event was generated.
    fn position(&self) -> Pixel;

    /// True iff exactly the given flags were active.
    fn these_active(&self, f: ControlFlags) -> bool {
        self.flags().these_active(f)
    }

    /// True iff at least the given flags were active.
    fn all_active(&self, f: ControlFlags) -> bool {
        self.flags().all_active(f)
    }

    /// True iff any of the given flags were active.
    fn any_active(&self, f: ControlFlags) -> bool {
        self.flags().any_active(f)
    }

    /// Exact match over modifier bits only.
    fn these_modifiers_active(&self, f: ControlFlags) -> bool {
        self.flags().these_modifiers_active(f)
    }

    /// Superset match over modifier bits only.
    fn all_modifiers_active(&self, f: ControlFlags) -> bool {
        self.flags().all_modifiers_active(f)
    }

    /// Intersection match over modifier bits only.
    fn any_modifiers_active(&self, f: ControlFlags) -> bool {
        self.flags().any_modifiers_active(f)
    }

    /// Exact match over button bits only.
    fn these_buttons_active(&self, f: ControlFlags) -> bool {
        self.flags().these_buttons_active(f)
    }

    /// Superset match over button bits only.
    fn all_buttons_active(&self, f: ControlFlags) -> bool {
        self.flags().all_buttons_active(f)
    }

    /// Intersection match over button bits only.
    fn any_buttons_active(&self, f: ControlFlags) -> bool {
        self.flags().any_buttons_active(f)
    }
}

macro_rules! impl_input_event {
    ($ty:ty) => {
        impl InputEvent for $ty {
            fn timestamp(&self) -> Timestamp {
                self.timestamp
            }
            fn flags(&self) -> ControlFlags {
                self.flags
            }
            fn position(&self) -> Pixel {
                self.position
            }
        }
    };
}

impl_input_event!(KeyEvent);
impl_input_event!(PointerEvent);
impl_input_event!(ButtonEvent);

/// The outgoing notification channels owned by every component.
///
/// One dispatcher per event family; application code subscribes to the
/// families it cares about and ignores the rest.
#[derive(Default)]
pub struct ComponentEvents {
    /// Geometry and visibility changes.
    pub component: Arc<EventDispatcher<ComponentEvent>>,
    /// Keyboard input.
    pub key: Arc<EventDispatcher<KeyEvent>>,
    /// Pointer motion.
    pub pointer: Arc<EventDispatcher<PointerEvent>>,
    /// Pointer buttons.
    pub button: Arc<EventDispatcher<ButtonEvent>>,
}

impl ComponentEvents {
    /// Create a fresh set of dispatchers with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire a component lifecycle event.
    pub fn fire_component(&self, event: &ComponentEvent) {
        self.component.fire(event);
    }

    /// Fire a keyboard event.
    pub fn fire_key(&self, event: &KeyEvent) {
        self.key.fire(event);
    }

    /// Fire a pointer-motion event.
    pub fn fire_pointer(&self, event: &PointerEvent) {
        self.pointer.fire(event);
    }

    /// Fire a pointer-button event.
    pub fn fire_button(&self, event: &ButtonEvent) {
        self.button.fire(event);
    }
}
