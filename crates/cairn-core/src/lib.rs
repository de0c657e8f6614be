//! Core systems for the Cairn UI framework.
//!
//! This crate holds the toolkit-independent foundations:
//!
//! - [`component`] - The component arena with generation-checked handles,
//!   weak parentage, the containment protocol, and redisplay propagation
//! - [`dispatch`] - Synchronous multicast event dispatch
//! - [`input`] - Control-flag bitsets, key codes, and pointer buttons
//! - [`event`] - Immutable event value types and per-component dispatchers
//! - [`logging`] - The default log sink, tracing targets, and
//!   component-tree diagnostics
//!
//! The widget layer, camera navigation, and the peer boundary live in the
//! `cairn` crate, which builds on these types.

#![warn(missing_docs)]

pub mod component;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod input;
pub mod logging;

pub use component::{
    ComponentId, ComponentRegistry, RedisplayHandler, SharedComponentRegistry,
};
pub use dispatch::{EventDispatcher, ListenerId, ScopedListener};
pub use error::{ComponentError, ComponentResult};
pub use event::{
    ButtonEvent, ButtonEventKind, ComponentEvent, ComponentEventKind, ComponentEvents, InputEvent,
    KeyEvent, KeyEventKind, Pixel, PointerEvent, PointerEventKind, Timestamp,
};
pub use input::{Button, ControlFlags, KeyCode, LockKey};
