//! In-process peers with no toolkit behind them.
//!
//! These record every interaction instead of performing it, which makes
//! them the test double for the whole peer boundary and a usable backend
//! for off-screen tools. Surface peers count redisplay requests and log
//! pointer warps; the window peer keeps plain fields for geometry and
//! window-manager state.

use std::sync::Arc;

use parking_lot::Mutex;

use cairn_core::{LockKey, Pixel};

use crate::error::{UiError, UiResult};
use crate::peer::{ApplicationPeer, RenderableSurfacePeer, SharedSurfacePeer, WindowPeer};
use crate::render::{SharedRenderer, ViewMatrices};

/// Application peer that runs no event loop.
///
/// `run` returns immediately with the exit code set by `exit`, or zero.
pub struct HeadlessApplicationPeer {
    initialized: bool,
    exit_code: Option<i32>,
    lock_keys: [bool; 3],
}

impl HeadlessApplicationPeer {
    /// A fresh, uninitialized peer.
    pub fn new() -> Self {
        Self {
            initialized: false,
            exit_code: None,
            lock_keys: [false; 3],
        }
    }

    fn lock_key_index(key: LockKey) -> usize {
        match key {
            LockKey::NumLock => 0,
            LockKey::ScrollLock => 1,
            LockKey::CapsLock => 2,
        }
    }
}

impl Default for HeadlessApplicationPeer {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationPeer for HeadlessApplicationPeer {
    fn initialize(&mut self, args: &[String]) -> UiResult<()> {
        if self.initialized {
            return Err(UiError::IllegalState("application peer already initialized"));
        }
        tracing::debug!(target: "cairn::peer", arg_count = args.len(), "headless application initialized");
        self.initialized = true;
        Ok(())
    }

    fn run(&mut self) -> UiResult<i32> {
        if !self.initialized {
            return Err(UiError::IllegalState("application peer not initialized"));
        }
        Ok(self.exit_code.unwrap_or(0))
    }

    fn exit(&mut self, code: i32) -> UiResult<()> {
        self.exit_code = Some(code);
        Ok(())
    }

    fn lock_key_state(&self, key: LockKey) -> UiResult<bool> {
        Ok(self.lock_keys[Self::lock_key_index(key)])
    }

    fn set_lock_key_state(&mut self, key: LockKey, on: bool) -> UiResult<()> {
        self.lock_keys[Self::lock_key_index(key)] = on;
        Ok(())
    }
}

/// Window peer backed by plain fields.
///
/// Full-screen is deliberately unsupported so callers exercise the
/// capability-refusal path.
pub struct HeadlessWindowPeer {
    valid: bool,
    position: Pixel,
    size: Pixel,
    minimum_size: Pixel,
    maximum_size: Pixel,
    title: String,
    visible: bool,
    iconified: bool,
    maximized: bool,
    resizable: bool,
}

impl HeadlessWindowPeer {
    /// A fresh, not-yet-created window peer.
    pub fn new() -> Self {
        Self {
            valid: false,
            position: Pixel::ZERO,
            size: Pixel::new(640, 480),
            minimum_size: Pixel::ZERO,
            maximum_size: Pixel::new(i32::MAX, i32::MAX),
            title: String::new(),
            visible: false,
            iconified: false,
            maximized: false,
            resizable: true,
        }
    }
}

impl Default for HeadlessWindowPeer {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowPeer for HeadlessWindowPeer {
    fn create(&mut self) -> UiResult<()> {
        if self.valid {
            return Err(UiError::IllegalState("window peer already created"));
        }
        self.valid = true;
        Ok(())
    }

    fn destroy(&mut self) -> UiResult<()> {
        if !self.valid {
            return Err(UiError::IllegalState("window peer not created"));
        }
        self.valid = false;
        Ok(())
    }

    fn valid(&self) -> bool {
        self.valid
    }

    fn position(&self) -> UiResult<Pixel> {
        Ok(self.position)
    }

    fn set_position(&mut self, position: Pixel) -> UiResult<()> {
        self.position = position;
        Ok(())
    }

    fn size(&self) -> UiResult<Pixel> {
        Ok(self.size)
    }

    fn set_size(&mut self, size: Pixel) -> UiResult<()> {
        self.size = size;
        Ok(())
    }

    fn minimum_size(&self) -> UiResult<Pixel> {
        Ok(self.minimum_size)
    }

    fn set_minimum_size(&mut self, size: Pixel) -> UiResult<()> {
        self.minimum_size = size;
        Ok(())
    }

    fn maximum_size(&self) -> UiResult<Pixel> {
        Ok(self.maximum_size)
    }

    fn set_maximum_size(&mut self, size: Pixel) -> UiResult<()> {
        self.maximum_size = size;
        Ok(())
    }

    fn title(&self) -> UiResult<String> {
        Ok(self.title.clone())
    }

    fn set_title(&mut self, title: &str) -> UiResult<()> {
        self.title = title.to_string();
        Ok(())
    }

    fn visible(&self) -> UiResult<bool> {
        Ok(self.visible)
    }

    fn set_visible(&mut self, visible: bool) -> UiResult<()> {
        self.visible = visible;
        Ok(())
    }

    fn iconified(&self) -> UiResult<bool> {
        Ok(self.iconified)
    }

    fn set_iconified(&mut self, iconified: bool) -> UiResult<()> {
        self.iconified = iconified;
        Ok(())
    }

    fn maximized(&self) -> UiResult<bool> {
        Ok(self.maximized)
    }

    fn set_maximized(&mut self, maximized: bool) -> UiResult<()> {
        self.maximized = maximized;
        Ok(())
    }

    fn full_screen(&self) -> UiResult<bool> {
        Err(UiError::Unsupported("full-screen"))
    }

    fn set_full_screen(&mut self, _full_screen: bool) -> UiResult<()> {
        Err(UiError::Unsupported("full-screen"))
    }

    fn resizable(&self) -> UiResult<bool> {
        Ok(self.resizable)
    }

    fn set_resizable(&mut self, resizable: bool) -> UiResult<()> {
        self.resizable = resizable;
        Ok(())
    }

    fn create_surface_peer(&mut self) -> UiResult<SharedSurfacePeer> {
        if !self.valid {
            return Err(UiError::IllegalState("window peer not created"));
        }
        Ok(Arc::new(Mutex::new(HeadlessSurfacePeer::new())))
    }
}

/// Surface peer that records scheduling and pointer interactions.
pub struct HeadlessSurfacePeer {
    valid: bool,
    renderer: Arc<Mutex<ViewMatrices>>,
    redisplay_requests: usize,
    pointer_warps: Vec<Pixel>,
    cursor_visible: bool,
    supports_pointer_warp: bool,
}

impl HeadlessSurfacePeer {
    /// A fresh surface peer with pointer warping enabled.
    pub fn new() -> Self {
        Self {
            valid: false,
            renderer: Arc::new(Mutex::new(ViewMatrices::new())),
            redisplay_requests: 0,
            pointer_warps: Vec::new(),
            cursor_visible: true,
            supports_pointer_warp: true,
        }
    }

    /// A peer that refuses pointer warps, for exercising the soft-failure
    /// path.
    pub fn without_pointer_warp() -> Self {
        Self {
            supports_pointer_warp: false,
            ..Self::new()
        }
    }

    /// How many redisplays have been requested.
    pub fn redisplay_requests(&self) -> usize {
        self.redisplay_requests
    }

    /// Every pointer warp performed so far, in order.
    pub fn pointer_warps(&self) -> &[Pixel] {
        &self.pointer_warps
    }

    /// Whether the cursor is currently shown.
    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }
}

impl Default for HeadlessSurfacePeer {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderableSurfacePeer for HeadlessSurfacePeer {
    fn create(&mut self) -> UiResult<()> {
        if self.valid {
            return Err(UiError::IllegalState("surface peer already created"));
        }
        self.valid = true;
        Ok(())
    }

    fn destroy(&mut self) -> UiResult<()> {
        if !self.valid {
            return Err(UiError::IllegalState("surface peer not created"));
        }
        self.valid = false;
        Ok(())
    }

    fn valid(&self) -> bool {
        self.valid
    }

    fn renderer(&self) -> SharedRenderer {
        self.renderer.clone()
    }

    fn request_redisplay(&mut self) {
        self.redisplay_requests += 1;
        tracing::trace!(target: "cairn::peer", total = self.redisplay_requests, "redisplay requested");
    }

    fn warp_pointer(&mut self, to: Pixel) -> UiResult<()> {
        if !self.supports_pointer_warp {
            return Err(UiError::Unsupported("pointer warp"));
        }
        self.pointer_warps.push(to);
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> UiResult<()> {
        self.cursor_visible = visible;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_lifecycle() {
        let mut peer = HeadlessApplicationPeer::new();
        assert!(matches!(peer.run(), Err(UiError::IllegalState(_))));
        peer.initialize(&[]).unwrap();
        assert!(matches!(peer.initialize(&[]), Err(UiError::IllegalState(_))));
        peer.exit(3).unwrap();
        assert_eq!(peer.run().unwrap(), 3);
    }

    #[test]
    fn lock_keys_round_trip() {
        let mut peer = HeadlessApplicationPeer::new();
        assert!(!peer.lock_key_state(LockKey::CapsLock).unwrap());
        peer.set_lock_key_state(LockKey::CapsLock, true).unwrap();
        assert!(peer.lock_key_state(LockKey::CapsLock).unwrap());
        assert!(!peer.lock_key_state(LockKey::NumLock).unwrap());
    }

    #[test]
    fn window_create_destroy_contract() {
        let mut peer = HeadlessWindowPeer::new();
        assert!(!peer.valid());
        assert!(matches!(peer.destroy(), Err(UiError::IllegalState(_))));
        peer.create().unwrap();
        assert!(peer.valid());
        assert!(matches!(peer.create(), Err(UiError::IllegalState(_))));
        peer.destroy().unwrap();
        assert!(!peer.valid());
    }

    #[test]
    fn full_screen_is_refused_without_side_effects() {
        let mut peer = HeadlessWindowPeer::new();
        peer.create().unwrap();
        assert!(matches!(
            peer.set_full_screen(true),
            Err(UiError::Unsupported(_))
        ));
        assert!(matches!(peer.full_screen(), Err(UiError::Unsupported(_))));
    }

    #[test]
    fn surface_records_redisplay_and_warps() {
        let mut peer = HeadlessSurfacePeer::new();
        peer.create().unwrap();
        peer.request_redisplay();
        peer.request_redisplay();
        assert_eq!(peer.redisplay_requests(), 2);

        peer.warp_pointer(Pixel::new(10, 20)).unwrap();
        assert_eq!(peer.pointer_warps(), &[Pixel::new(10, 20)]);

        peer.set_cursor_visible(false).unwrap();
        assert!(!peer.cursor_visible());
    }

    #[test]
    fn warp_refusal_path() {
        let mut peer = HeadlessSurfacePeer::without_pointer_warp();
        assert!(matches!(
            peer.warp_pointer(Pixel::ZERO),
            Err(UiError::Unsupported(_))
        ));
        assert!(peer.pointer_warps().is_empty());
    }
}
