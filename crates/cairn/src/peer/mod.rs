//! The heavyweight peer boundary.
//!
//! Application, Window, and RenderableSurface each delegate their
//! toolkit-facing half to a *peer* object behind one of the traits below.
//! Framework code above the boundary never touches a toolkit API directly,
//! so a toolkit port is exactly one set of peer implementations.
//!
//! Lifecycle contract shared by window and surface peers: `create` on an
//! already valid peer and `destroy` on an invalid peer are
//! [`IllegalState`](crate::error::UiError::IllegalState) errors; after a
//! successful `create`, `valid()` reports true until `destroy`.
//!
//! Capabilities a toolkit cannot provide return
//! [`Unsupported`](crate::error::UiError::Unsupported) and leave state
//! unchanged; callers treat that as a soft failure.

pub mod headless;

use std::sync::Arc;

use parking_lot::Mutex;

use cairn_core::{LockKey, Pixel};

use crate::error::{UiError, UiResult};
use crate::render::SharedRenderer;

/// Toolkit half of the application: process-level setup and the run loop.
pub trait ApplicationPeer: Send {
    /// Perform toolkit initialization with the program arguments.
    fn initialize(&mut self, args: &[String]) -> UiResult<()>;

    /// Enter the toolkit's event loop; returns the exit code.
    fn run(&mut self) -> UiResult<i32>;

    /// Ask the event loop to terminate with the given exit code.
    fn exit(&mut self, code: i32) -> UiResult<()>;

    /// Read a keyboard lock-key state.
    fn lock_key_state(&self, key: LockKey) -> UiResult<bool>;

    /// Set a keyboard lock-key state.
    fn set_lock_key_state(&mut self, key: LockKey, on: bool) -> UiResult<()>;
}

/// Toolkit half of a window: native frame, geometry, and window-manager
/// state.
pub trait WindowPeer: Send {
    /// Create the native window.
    fn create(&mut self) -> UiResult<()>;

    /// Destroy the native window.
    fn destroy(&mut self) -> UiResult<()>;

    /// Whether the native window currently exists.
    fn valid(&self) -> bool;

    /// Window position on screen.
    fn position(&self) -> UiResult<Pixel>;
    /// Move the window.
    fn set_position(&mut self, position: Pixel) -> UiResult<()>;

    /// Window size.
    fn size(&self) -> UiResult<Pixel>;
    /// Resize the window.
    fn set_size(&mut self, size: Pixel) -> UiResult<()>;

    /// Minimum size the window manager should allow.
    fn minimum_size(&self) -> UiResult<Pixel>;
    /// Set the minimum allowed size.
    fn set_minimum_size(&mut self, size: Pixel) -> UiResult<()>;

    /// Maximum size the window manager should allow.
    fn maximum_size(&self) -> UiResult<Pixel>;
    /// Set the maximum allowed size.
    fn set_maximum_size(&mut self, size: Pixel) -> UiResult<()>;

    /// Title-bar text.
    fn title(&self) -> UiResult<String>;
    /// Set the title-bar text.
    fn set_title(&mut self, title: &str) -> UiResult<()>;

    /// Whether the window is shown.
    fn visible(&self) -> UiResult<bool>;
    /// Show or hide the window.
    fn set_visible(&mut self, visible: bool) -> UiResult<()>;

    /// Whether the window is iconified.
    fn iconified(&self) -> UiResult<bool>;
    /// Iconify or restore the window.
    fn set_iconified(&mut self, iconified: bool) -> UiResult<()>;

    /// Whether the window is maximized.
    fn maximized(&self) -> UiResult<bool>;
    /// Maximize or restore the window.
    fn set_maximized(&mut self, maximized: bool) -> UiResult<()>;

    /// Whether the window is full-screen.
    fn full_screen(&self) -> UiResult<bool>;
    /// Enter or leave full-screen mode.
    fn set_full_screen(&mut self, full_screen: bool) -> UiResult<()>;

    /// Whether the user may resize the window.
    fn resizable(&self) -> UiResult<bool>;
    /// Allow or forbid user resizing.
    fn set_resizable(&mut self, resizable: bool) -> UiResult<()>;

    /// Create the peer for this window's drawable surface.
    fn create_surface_peer(&mut self) -> UiResult<SharedSurfacePeer>;
}

/// Toolkit half of a renderable surface: the drawable, its renderer, and
/// scheduling.
pub trait RenderableSurfacePeer: Send {
    /// Create the native drawable.
    fn create(&mut self) -> UiResult<()>;

    /// Destroy the native drawable.
    fn destroy(&mut self) -> UiResult<()>;

    /// Whether the native drawable currently exists.
    fn valid(&self) -> bool;

    /// The renderer drawing into this surface.
    fn renderer(&self) -> SharedRenderer;

    /// Schedule a redisplay of the surface.
    ///
    /// Never renders synchronously; the toolkit delivers the actual render
    /// pass later through its own scheduling.
    fn request_redisplay(&mut self);

    /// Move the pointer to a surface position.
    ///
    /// Optional capability; the default is unsupported.
    fn warp_pointer(&mut self, _to: Pixel) -> UiResult<()> {
        Err(UiError::Unsupported("pointer warp"))
    }

    /// Show or hide the pointer cursor over this surface.
    ///
    /// Optional capability; the default is unsupported.
    fn set_cursor_visible(&mut self, _visible: bool) -> UiResult<()> {
        Err(UiError::Unsupported("cursor visibility"))
    }
}

/// Shared handle to a surface peer.
///
/// The surface owns one strongly; widgets attached to the surface hold
/// clones through their attachment link.
pub type SharedSurfacePeer = Arc<Mutex<dyn RenderableSurfacePeer>>;
