//! Widget capability traits.
//!
//! Widget behavior is assembled from independent capabilities rather than
//! an inheritance tree:
//!
//! - [`WidgetPart`] gives a type component identity, size, and surface
//!   attachment through an embedded [`WidgetBase`].
//! - [`View`] adds the rendering lifecycle.
//! - [`Control`] adds input handling.
//! - [`Widget`] is simply `View + Control`; any type with both
//!   capabilities is a widget through the blanket impl.
//!
//! Every `View`/`Control` method has a no-op default, so a type implements
//! only what it reacts to.

use cairn_core::{ButtonEvent, ComponentEvents, ComponentId, KeyEvent, Pixel, PointerEvent};

use crate::context::{ComponentBase, UiContext};
use crate::error::{UiError, UiResult};
use crate::peer::SharedSurfacePeer;
use crate::render::{RenderContext, SharedRenderer};

/// A widget's link to the surface it is attached to.
///
/// Handed out by the surface when a widget is installed; cloned down the
/// decorator chain so every part can reach the renderer and the optional
/// pointer capabilities.
#[derive(Clone)]
pub struct SurfaceLink {
    /// The surface component holding the widget tree.
    pub surface: ComponentId,
    /// The surface's toolkit peer.
    pub peer: SharedSurfacePeer,
}

/// State embedded in every widget-part type.
pub struct WidgetBase {
    component: ComponentBase,
    size: Pixel,
    attachment: Option<SurfaceLink>,
    initialized: bool,
}

impl WidgetBase {
    /// Register a new widget part in the context.
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            component: ComponentBase::new(ctx),
            size: Pixel::ZERO,
            attachment: None,
            initialized: false,
        }
    }

    /// The part's component handle.
    pub fn id(&self) -> ComponentId {
        self.component.id()
    }

    /// The owning context.
    pub fn context(&self) -> &UiContext {
        self.component.context()
    }

    /// The part's outgoing event dispatchers.
    pub fn events(&self) -> &ComponentEvents {
        self.component.events()
    }

    /// The part's name, empty if unnamed.
    pub fn name(&self) -> String {
        self.component.name()
    }

    /// Set the part's name.
    pub fn set_name(&self, name: impl Into<String>) {
        self.component.set_name(name);
    }

    /// Current size, in pixels.
    pub fn size(&self) -> Pixel {
        self.size
    }

    /// Record a new size. Called from [`View::resize`] implementations.
    pub fn set_size(&mut self, size: Pixel) {
        self.size = size;
    }

    /// Bind the part to a surface.
    ///
    /// Idempotent for the same surface; binding to a different surface
    /// replaces the link and clears the initialized flag so the part runs
    /// one-time setup again against the new renderer.
    pub fn attach(&mut self, link: SurfaceLink) {
        if self.attachment.as_ref().map(|l| l.surface) == Some(link.surface) {
            return;
        }
        self.attachment = Some(link);
        self.initialized = false;
    }

    /// Drop the surface binding.
    pub fn detach(&mut self) {
        self.attachment = None;
        self.initialized = false;
    }

    /// Whether the part is bound to a surface.
    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    /// The current surface link, if attached.
    pub fn attachment(&self) -> Option<&SurfaceLink> {
        self.attachment.as_ref()
    }

    /// The surface the part is attached to, if any.
    pub fn surface(&self) -> Option<ComponentId> {
        self.attachment.as_ref().map(|l| l.surface)
    }

    /// The renderer of the attached surface.
    ///
    /// Asking an unattached part for its renderer is an
    /// [`IllegalState`](UiError::IllegalState) error.
    pub fn renderer(&self) -> UiResult<SharedRenderer> {
        match &self.attachment {
            Some(link) => Ok(link.peer.lock().renderer()),
            None => Err(UiError::IllegalState("widget is not attached to a surface")),
        }
    }

    /// Whether one-time setup has run since the last (re)attach.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Record that one-time setup has run.
    pub fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    /// Ask the containers holding this part to schedule a redisplay.
    pub fn request_redisplay(&self) {
        self.component.request_redisplay();
    }

    /// Install a redisplay handler that forwards requests from held parts
    /// to this part's own containers.
    ///
    /// Container widgets call this once at construction so that redisplay
    /// requests climb the containment chain until they reach a surface.
    /// The handler captures the context weakly.
    pub fn forward_redisplay(&self) {
        let ctx = self.context();
        let id = self.id();
        let weak = ctx.downgrade();
        let _ = ctx.registry().set_redisplay_handler(
            id,
            std::sync::Arc::new(move |_part| {
                if let Some(ctx) = weak.upgrade() {
                    let _ = ctx.registry().request_redisplay(id);
                }
            }),
        );
    }
}

/// Base capability: a participant in the widget containment protocol.
pub trait WidgetPart: Send {
    /// The embedded base state.
    fn widget_base(&self) -> &WidgetBase;

    /// The embedded base state, mutably.
    fn widget_base_mut(&mut self) -> &mut WidgetBase;

    /// The part's component handle.
    fn id(&self) -> ComponentId {
        self.widget_base().id()
    }
}

/// Rendering capability.
pub trait View: WidgetPart {
    /// One-time setup, run after the part is attached to a surface and
    /// before its first render. Re-run after attachment to a different
    /// surface.
    fn initialize(&mut self) {}

    /// The drawable area changed size.
    fn resize(&mut self, size: Pixel) {
        self.widget_base_mut().set_size(size);
    }

    /// Draw one frame.
    fn render(&mut self, _ctx: &mut RenderContext<'_>) {}
}

/// Input-handling capability. Every handler defaults to a no-op.
pub trait Control: WidgetPart {
    /// A key went down.
    fn key_pressed(&mut self, _ev: &KeyEvent) {}
    /// A key came up.
    fn key_released(&mut self, _ev: &KeyEvent) {}
    /// A printable key produced a character.
    fn key_typed(&mut self, _ev: &KeyEvent) {}

    /// The pointer moved with a button held.
    fn pointer_dragged(&mut self, _ev: &PointerEvent) {}
    /// The pointer moved with no buttons held.
    fn pointer_tracked(&mut self, _ev: &PointerEvent) {}
    /// The pointer entered the surface.
    fn pointer_entered(&mut self, _ev: &PointerEvent) {}
    /// The pointer left the surface.
    fn pointer_exited(&mut self, _ev: &PointerEvent) {}

    /// A pointer button went down.
    fn button_pressed(&mut self, _ev: &ButtonEvent) {}
    /// A pointer button came up.
    fn button_released(&mut self, _ev: &ButtonEvent) {}
    /// A press/release pair completed within the click threshold.
    fn button_clicked(&mut self, _ev: &ButtonEvent) {}
}

/// The full widget capability: rendering plus input handling.
pub trait Widget: View + Control {}

impl<T: View + Control> Widget for T {}

/// Bind a view part to a surface, run its one-time setup if needed, and
/// push the current size.
///
/// Containers call this when installing a part while already attached;
/// the surface calls it when a widget tree is installed at the root.
pub fn attach_part<V: View + ?Sized>(part: &mut V, link: SurfaceLink, size: Pixel) {
    part.widget_base_mut().attach(link);
    if !part.widget_base().is_initialized() {
        part.widget_base_mut().mark_initialized();
        part.initialize();
    }
    part.resize(size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peer::RenderableSurfacePeer;
    use crate::peer::headless::HeadlessSurfacePeer;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct Plain {
        base: WidgetBase,
        initialize_count: usize,
    }

    impl Plain {
        fn new(ctx: &UiContext) -> Self {
            Self {
                base: WidgetBase::new(ctx),
                initialize_count: 0,
            }
        }
    }

    impl WidgetPart for Plain {
        fn widget_base(&self) -> &WidgetBase {
            &self.base
        }
        fn widget_base_mut(&mut self) -> &mut WidgetBase {
            &mut self.base
        }
    }

    impl View for Plain {
        fn initialize(&mut self) {
            self.initialize_count += 1;
        }
    }

    impl Control for Plain {}

    fn link(ctx: &UiContext) -> SurfaceLink {
        let mut peer = HeadlessSurfacePeer::new();
        peer.create().unwrap();
        SurfaceLink {
            surface: ctx.registry().register(),
            peer: Arc::new(Mutex::new(peer)),
        }
    }

    #[test]
    fn renderer_requires_attachment() {
        let ctx = UiContext::new();
        let mut widget = Plain::new(&ctx);
        assert!(matches!(
            widget.base.renderer(),
            Err(UiError::IllegalState(_))
        ));

        attach_part(&mut widget, link(&ctx), Pixel::new(100, 100));
        assert!(widget.base.renderer().is_ok());
    }

    #[test]
    fn attach_is_idempotent_per_surface() {
        let ctx = UiContext::new();
        let mut widget = Plain::new(&ctx);
        let l = link(&ctx);

        attach_part(&mut widget, l.clone(), Pixel::new(64, 64));
        attach_part(&mut widget, l, Pixel::new(64, 64));
        assert_eq!(widget.initialize_count, 1);
    }

    #[test]
    fn reattach_to_a_new_surface_reinitializes() {
        let ctx = UiContext::new();
        let mut widget = Plain::new(&ctx);

        attach_part(&mut widget, link(&ctx), Pixel::new(64, 64));
        attach_part(&mut widget, link(&ctx), Pixel::new(64, 64));
        assert_eq!(widget.initialize_count, 2);
    }

    #[test]
    fn attach_pushes_size() {
        let ctx = UiContext::new();
        let mut widget = Plain::new(&ctx);
        attach_part(&mut widget, link(&ctx), Pixel::new(320, 200));
        assert_eq!(widget.base.size(), Pixel::new(320, 200));
    }

    #[test]
    fn detach_clears_state() {
        let ctx = UiContext::new();
        let mut widget = Plain::new(&ctx);
        attach_part(&mut widget, link(&ctx), Pixel::new(10, 10));
        widget.base.detach();
        assert!(!widget.base.is_attached());
        assert!(!widget.base.is_initialized());
    }
}
