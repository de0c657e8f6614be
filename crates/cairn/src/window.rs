//! Top-level windows.
//!
//! A [`Window`] pairs a native frame, reached through its
//! [`WindowPeer`], with a lazily created [`RenderableSurface`] filling
//! its client area. Geometry and window-manager state delegate straight
//! to the peer; the surface is created on first access and parented
//! under the window in the component registry.

use cairn_core::{ComponentEvents, ComponentId, Pixel, Timestamp};

use crate::context::{ComponentBase, UiContext};
use crate::error::UiResult;
use crate::peer::WindowPeer;
use crate::surface::RenderableSurface;

/// A native top-level window.
pub struct Window {
    component: ComponentBase,
    peer: Box<dyn WindowPeer>,
    surface: Option<RenderableSurface>,
}

impl Window {
    /// Wrap a window peer. The native window is not created until
    /// [`construct`](Self::construct).
    pub fn new(ctx: &UiContext, peer: Box<dyn WindowPeer>) -> Self {
        Self {
            component: ComponentBase::new(ctx),
            peer,
            surface: None,
        }
    }

    /// The window's component handle.
    pub fn id(&self) -> ComponentId {
        self.component.id()
    }

    /// The owning context.
    pub fn context(&self) -> &UiContext {
        self.component.context()
    }

    /// The window's outgoing event dispatchers.
    pub fn events(&self) -> &ComponentEvents {
        self.component.events()
    }

    /// Create the native window. Idempotent.
    pub fn construct(&mut self) -> UiResult<()> {
        if !self.peer.valid() {
            self.peer.create()?;
        }
        Ok(())
    }

    /// Whether the native window exists.
    pub fn valid(&self) -> bool {
        self.peer.valid()
    }

    /// The window's drawable surface, created on first access.
    pub fn surface(&mut self) -> UiResult<&mut RenderableSurface> {
        if self.surface.is_none() {
            let peer = self.peer.create_surface_peer()?;
            let ctx = self.component.context().clone();
            let mut surface = RenderableSurface::new(&ctx, peer);
            surface.construct()?;
            let _ = ctx.registry().set_parent(surface.id(), Some(self.id()));
            if let Ok(size) = self.peer.size() {
                surface.dispatch_resized(size, ctx.now());
            }
            self.surface = Some(surface);
        }
        Ok(self.surface.as_mut().expect("surface was just created"))
    }

    /// The native window changed size.
    ///
    /// Peers call this from their resize notification; it keeps the
    /// surface and the widget tree in step with the frame.
    pub fn notify_resized(&mut self, size: Pixel, timestamp: Timestamp) {
        if let Some(surface) = self.surface.as_mut() {
            surface.dispatch_resized(size, timestamp);
        }
    }

    /// Window position on screen.
    pub fn position(&self) -> UiResult<Pixel> {
        self.peer.position()
    }

    /// Move the window.
    pub fn set_position(&mut self, position: Pixel) -> UiResult<()> {
        self.peer.set_position(position)
    }

    /// Window size.
    pub fn size(&self) -> UiResult<Pixel> {
        self.peer.size()
    }

    /// Resize the window.
    pub fn set_size(&mut self, size: Pixel) -> UiResult<()> {
        self.peer.set_size(size)
    }

    /// Minimum size the window manager should allow.
    pub fn minimum_size(&self) -> UiResult<Pixel> {
        self.peer.minimum_size()
    }

    /// Set the minimum allowed size.
    pub fn set_minimum_size(&mut self, size: Pixel) -> UiResult<()> {
        self.peer.set_minimum_size(size)
    }

    /// Maximum size the window manager should allow.
    pub fn maximum_size(&self) -> UiResult<Pixel> {
        self.peer.maximum_size()
    }

    /// Set the maximum allowed size.
    pub fn set_maximum_size(&mut self, size: Pixel) -> UiResult<()> {
        self.peer.set_maximum_size(size)
    }

    /// Title-bar text.
    pub fn title(&self) -> UiResult<String> {
        self.peer.title()
    }

    /// Set the title-bar text.
    pub fn set_title(&mut self, title: &str) -> UiResult<()> {
        self.peer.set_title(title)
    }

    /// Whether the window is shown.
    pub fn visible(&self) -> UiResult<bool> {
        self.peer.visible()
    }

    /// Show or hide the window.
    pub fn set_visible(&mut self, visible: bool) -> UiResult<()> {
        self.peer.set_visible(visible)
    }

    /// Whether the window is iconified.
    pub fn iconified(&self) -> UiResult<bool> {
        self.peer.iconified()
    }

    /// Iconify or restore the window.
    pub fn set_iconified(&mut self, iconified: bool) -> UiResult<()> {
        self.peer.set_iconified(iconified)
    }

    /// Whether the window is maximized.
    pub fn maximized(&self) -> UiResult<bool> {
        self.peer.maximized()
    }

    /// Maximize or restore the window.
    pub fn set_maximized(&mut self, maximized: bool) -> UiResult<()> {
        self.peer.set_maximized(maximized)
    }

    /// Whether the window is full-screen.
    pub fn full_screen(&self) -> UiResult<bool> {
        self.peer.full_screen()
    }

    /// Enter or leave full-screen mode.
    pub fn set_full_screen(&mut self, full_screen: bool) -> UiResult<()> {
        self.peer.set_full_screen(full_screen)
    }

    /// Whether the user may resize the window.
    pub fn resizable(&self) -> UiResult<bool> {
        self.peer.resizable()
    }

    /// Allow or forbid user resizing.
    pub fn set_resizable(&mut self, resizable: bool) -> UiResult<()> {
        self.peer.set_resizable(resizable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peer::headless::HeadlessWindowPeer;

    fn window(ctx: &UiContext) -> Window {
        Window::new(ctx, Box::new(HeadlessWindowPeer::new()))
    }

    #[test]
    fn construct_is_idempotent() {
        let ctx = UiContext::new();
        let mut w = window(&ctx);
        assert!(!w.valid());
        w.construct().unwrap();
        w.construct().unwrap();
        assert!(w.valid());
    }

    #[test]
    fn surface_is_created_lazily_and_parented() {
        let ctx = UiContext::new();
        let mut w = window(&ctx);
        w.construct().unwrap();
        let window_id = w.id();

        let surface_id = w.surface().unwrap().id();
        assert_eq!(ctx.registry().parent(surface_id).unwrap(), Some(window_id));

        // Second access returns the same surface.
        assert_eq!(w.surface().unwrap().id(), surface_id);
    }

    #[test]
    fn lazy_surface_inherits_the_window_size() {
        let ctx = UiContext::new();
        let mut w = window(&ctx);
        w.construct().unwrap();
        w.set_size(Pixel::new(320, 240)).unwrap();
        assert_eq!(w.surface().unwrap().size(), Pixel::new(320, 240));
    }

    #[test]
    fn surface_requires_a_constructed_window() {
        let ctx = UiContext::new();
        let mut w = window(&ctx);
        assert!(w.surface().is_err());
    }

    #[test]
    fn geometry_delegates_to_the_peer() {
        let ctx = UiContext::new();
        let mut w = window(&ctx);
        w.construct().unwrap();

        w.set_title("scene").unwrap();
        assert_eq!(w.title().unwrap(), "scene");

        w.set_position(Pixel::new(10, 20)).unwrap();
        assert_eq!(w.position().unwrap(), Pixel::new(10, 20));

        w.set_visible(true).unwrap();
        assert!(w.visible().unwrap());
    }

    #[test]
    fn resize_notification_reaches_the_surface() {
        let ctx = UiContext::new();
        let mut w = window(&ctx);
        w.construct().unwrap();
        let _ = w.surface().unwrap();

        w.notify_resized(Pixel::new(1024, 768), Timestamp::from_millis(5));
        assert_eq!(w.surface().unwrap().size(), Pixel::new(1024, 768));
    }
}
