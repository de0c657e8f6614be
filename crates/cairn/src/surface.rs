//! The drawable surface and its event pump.
//!
//! A [`RenderableSurface`] owns a surface peer and at most one root
//! widget. It is the place where the peer's raw event stream meets the
//! widget protocol: `dispatch_*` methods fire the surface's own
//! dispatchers and then drive the root widget, and button dispatch
//! synthesizes click events from press/release pairs that complete within
//! [`CLICK_DURATION`].
//!
//! The surface also terminates the redisplay chain. Constructing it
//! installs a registry handler that forwards redisplay requests from the
//! widget tree to the peer's scheduler.

use std::sync::Arc;

use cairn_core::{
    ButtonEvent, ButtonEventKind, ComponentEvent, ComponentEventKind, ComponentEvents, ComponentId,
    KeyEvent, KeyEventKind, Pixel, PointerEvent, PointerEventKind, Timestamp,
};

use crate::context::{ComponentBase, UiContext};
use crate::error::UiResult;
use crate::peer::SharedSurfacePeer;
use crate::render::RenderContext;
use crate::widget::{SurfaceLink, Widget, attach_part};

/// Longest press-to-release interval that still counts as a click.
pub const CLICK_DURATION: Timestamp = Timestamp::from_millis(500);

/// A drawable area with a root widget.
pub struct RenderableSurface {
    component: ComponentBase,
    peer: SharedSurfacePeer,
    widget: Option<Box<dyn Widget>>,
    size: Pixel,
    press_times: [Option<Timestamp>; 5],
}

impl RenderableSurface {
    /// Wrap a surface peer. The native drawable is not created until
    /// [`construct`](Self::construct).
    pub fn new(ctx: &UiContext, peer: SharedSurfacePeer) -> Self {
        Self {
            component: ComponentBase::new(ctx),
            peer,
            widget: None,
            size: Pixel::ZERO,
            press_times: [None; 5],
        }
    }

    /// The surface's component handle.
    pub fn id(&self) -> ComponentId {
        self.component.id()
    }

    /// The owning context.
    pub fn context(&self) -> &UiContext {
        self.component.context()
    }

    /// The surface's outgoing event dispatchers.
    pub fn events(&self) -> &ComponentEvents {
        self.component.events()
    }

    /// The surface's peer.
    pub fn peer(&self) -> &SharedSurfacePeer {
        &self.peer
    }

    /// Current size, in pixels.
    pub fn size(&self) -> Pixel {
        self.size
    }

    /// Create the native drawable and hook redisplay scheduling up to it.
    ///
    /// Idempotent: a surface whose peer is already valid only refreshes
    /// the redisplay hook.
    pub fn construct(&mut self) -> UiResult<()> {
        {
            let mut peer = self.peer.lock();
            if !peer.valid() {
                peer.create()?;
            }
        }
        // The handler holds the peer weakly; the surface owns the only
        // strong reference meant to keep it alive.
        let weak_peer = Arc::downgrade(&self.peer);
        self.component.context().registry().set_redisplay_handler(
            self.id(),
            Arc::new(move |_part| {
                if let Some(peer) = weak_peer.upgrade() {
                    peer.lock().request_redisplay();
                }
            }),
        )?;
        Ok(())
    }

    /// Destroy the native drawable.
    pub fn destruct(&mut self) -> UiResult<()> {
        let _ = self
            .component
            .context()
            .registry()
            .clear_redisplay_handler(self.id());
        self.peer.lock().destroy()
    }

    /// The root widget, if any.
    pub fn widget(&self) -> Option<&dyn Widget> {
        self.widget.as_deref()
    }

    /// The root widget, mutably.
    pub fn widget_mut(&mut self) -> Option<&mut (dyn Widget + 'static)> {
        self.widget.as_deref_mut()
    }

    /// Install a root widget, returning the previous one.
    ///
    /// The old widget is released and detached; the new one is acquired,
    /// attached to this surface, and sized to it.
    pub fn set_widget(&mut self, widget: Option<Box<dyn Widget>>) -> Option<Box<dyn Widget>> {
        let ctx = self.component.context().clone();
        let registry = ctx.registry();
        let mut old = self.widget.take();
        if let Some(old) = old.as_deref_mut() {
            let _ = registry.release(self.id(), old.id());
            old.widget_base_mut().detach();
        }
        if let Some(mut widget) = widget {
            let _ = registry.acquire(self.id(), widget.id());
            let link = SurfaceLink {
                surface: self.id(),
                peer: self.peer.clone(),
            };
            attach_part(widget.as_mut(), link, self.size);
            self.widget = Some(widget);
        }
        old
    }

    /// Ask the peer to schedule a redisplay.
    pub fn request_redisplay(&self) {
        self.peer.lock().request_redisplay();
    }

    /// Render one frame through the root widget.
    pub fn render(&mut self) {
        let renderer = self.peer.lock().renderer();
        let mut renderer = renderer.lock();
        renderer.begin_frame();
        if let Some(widget) = self.widget.as_deref_mut() {
            let mut ctx = RenderContext::new(&mut *renderer);
            widget.render(&mut ctx);
        }
        renderer.end_frame();
    }

    /// The drawable changed size.
    ///
    /// Updates the renderer viewport, resizes the widget tree, and fires
    /// a `Resized` component event.
    pub fn dispatch_resized(&mut self, size: Pixel, timestamp: Timestamp) {
        self.size = size;
        let renderer = self.peer.lock().renderer();
        renderer.lock().set_viewport(size);
        if let Some(widget) = self.widget.as_deref_mut() {
            widget.resize(size);
        }
        self.component.events().fire_component(&ComponentEvent {
            timestamp,
            kind: ComponentEventKind::Resized,
            position: Pixel::ZERO,
            size,
            visible: true,
        });
    }

    /// Deliver a keyboard event to listeners and the widget tree.
    pub fn dispatch_key(&mut self, ev: &KeyEvent) {
        self.component.events().fire_key(ev);
        if let Some(widget) = self.widget.as_deref_mut() {
            match ev.kind {
                KeyEventKind::Pressed => widget.key_pressed(ev),
                KeyEventKind::Released => widget.key_released(ev),
                KeyEventKind::Typed => widget.key_typed(ev),
            }
        }
    }

    /// Deliver a pointer-motion event to listeners and the widget tree.
    pub fn dispatch_pointer(&mut self, ev: &PointerEvent) {
        self.component.events().fire_pointer(ev);
        if let Some(widget) = self.widget.as_deref_mut() {
            match ev.kind {
                PointerEventKind::Dragged => widget.pointer_dragged(ev),
                PointerEventKind::Tracked => widget.pointer_tracked(ev),
                PointerEventKind::Entered => widget.pointer_entered(ev),
                PointerEventKind::Exited => widget.pointer_exited(ev),
            }
        }
    }

    /// Deliver a button event, synthesizing a click when a release
    /// follows its press within [`CLICK_DURATION`].
    pub fn dispatch_button(&mut self, ev: &ButtonEvent) {
        self.component.events().fire_button(ev);
        let slot = ev.button as usize;
        match ev.kind {
            ButtonEventKind::Pressed => {
                self.press_times[slot] = Some(ev.timestamp);
                if let Some(widget) = self.widget.as_deref_mut() {
                    widget.button_pressed(ev);
                }
            }
            ButtonEventKind::Released => {
                if let Some(widget) = self.widget.as_deref_mut() {
                    widget.button_released(ev);
                }
                let Some(pressed_at) = self.press_times[slot].take() else {
                    return;
                };
                let held = ev.timestamp.saturating_sub(pressed_at);
                if held < CLICK_DURATION {
                    let click = ButtonEvent {
                        kind: ButtonEventKind::Clicked,
                        ..*ev
                    };
                    self.component.events().fire_button(&click);
                    if let Some(widget) = self.widget.as_deref_mut() {
                        widget.button_clicked(&click);
                    }
                }
            }
            ButtonEventKind::Clicked => {
                if let Some(widget) = self.widget.as_deref_mut() {
                    widget.button_clicked(ev);
                }
            }
        }
    }
}

impl Drop for RenderableSurface {
    fn drop(&mut self) {
        let mut peer = self.peer.lock();
        if peer.valid() {
            let _ = peer.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peer::RenderableSurfacePeer;
    use crate::peer::headless::HeadlessSurfacePeer;
    use crate::widget::{Control, View, WidgetBase, WidgetPart};
    use cairn_core::{Button, ControlFlags};
    use parking_lot::Mutex;

    struct Recorder {
        base: WidgetBase,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Recorder {
        fn new(ctx: &UiContext, log: Arc<Mutex<Vec<String>>>) -> Self {
            Self {
                base: WidgetBase::new(ctx),
                log,
            }
        }
    }

    impl WidgetPart for Recorder {
        fn widget_base(&self) -> &WidgetBase {
            &self.base
        }
        fn widget_base_mut(&mut self) -> &mut WidgetBase {
            &mut self.base
        }
    }

    impl View for Recorder {
        fn render(&mut self, _ctx: &mut RenderContext<'_>) {
            self.log.lock().push("render".into());
        }
    }

    impl Control for Recorder {
        fn button_pressed(&mut self, _ev: &ButtonEvent) {
            self.log.lock().push("pressed".into());
        }
        fn button_released(&mut self, _ev: &ButtonEvent) {
            self.log.lock().push("released".into());
        }
        fn button_clicked(&mut self, _ev: &ButtonEvent) {
            self.log.lock().push("clicked".into());
        }
    }

    fn surface(ctx: &UiContext) -> RenderableSurface {
        let peer: SharedSurfacePeer = Arc::new(Mutex::new(HeadlessSurfacePeer::new()));
        let mut surface = RenderableSurface::new(ctx, peer);
        surface.construct().unwrap();
        surface
    }

    fn button(kind: ButtonEventKind, at_ms: u64) -> ButtonEvent {
        ButtonEvent {
            timestamp: Timestamp::from_millis(at_ms),
            flags: if matches!(kind, ButtonEventKind::Pressed) {
                ControlFlags::LEFT
            } else {
                ControlFlags::empty()
            },
            position: Pixel::new(5, 5),
            kind,
            button: Button::Left,
        }
    }

    #[test]
    fn construct_is_idempotent() {
        let ctx = UiContext::new();
        let mut s = surface(&ctx);
        s.construct().unwrap();
        assert!(s.peer().lock().valid());
    }

    #[test]
    fn quick_release_synthesizes_a_click() {
        let ctx = UiContext::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut s = surface(&ctx);
        s.set_widget(Some(Box::new(Recorder::new(&ctx, log.clone()))));

        s.dispatch_button(&button(ButtonEventKind::Pressed, 100));
        s.dispatch_button(&button(ButtonEventKind::Released, 300));
        assert_eq!(*log.lock(), vec!["pressed", "released", "clicked"]);
    }

    #[test]
    fn slow_release_is_not_a_click() {
        let ctx = UiContext::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut s = surface(&ctx);
        s.set_widget(Some(Box::new(Recorder::new(&ctx, log.clone()))));

        s.dispatch_button(&button(ButtonEventKind::Pressed, 100));
        // Exactly the threshold: not a click.
        s.dispatch_button(&button(ButtonEventKind::Released, 600));
        assert_eq!(*log.lock(), vec!["pressed", "released"]);
    }

    #[test]
    fn release_without_press_is_not_a_click() {
        let ctx = UiContext::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut s = surface(&ctx);
        s.set_widget(Some(Box::new(Recorder::new(&ctx, log.clone()))));

        s.dispatch_button(&button(ButtonEventKind::Released, 100));
        assert_eq!(*log.lock(), vec!["released"]);
    }

    #[test]
    fn widget_redisplay_reaches_the_peer() {
        let ctx = UiContext::new();
        let peer = Arc::new(Mutex::new(HeadlessSurfacePeer::new()));
        let mut s = RenderableSurface::new(&ctx, peer.clone());
        s.construct().unwrap();
        s.set_widget(Some(Box::new(Recorder::new(
            &ctx,
            Arc::new(Mutex::new(Vec::new())),
        ))));

        let widget_id = s.widget().unwrap().id();
        ctx.registry().request_redisplay(widget_id).unwrap();

        assert_eq!(peer.lock().redisplay_requests(), 1);
    }

    #[test]
    fn render_brackets_the_frame() {
        let ctx = UiContext::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut s = surface(&ctx);
        s.set_widget(Some(Box::new(Recorder::new(&ctx, log.clone()))));
        s.render();
        assert_eq!(*log.lock(), vec!["render"]);
    }

    #[test]
    fn resize_reaches_renderer_widget_and_listeners() {
        let ctx = UiContext::new();
        let mut s = surface(&ctx);
        let log = Arc::new(Mutex::new(Vec::new()));
        s.set_widget(Some(Box::new(Recorder::new(&ctx, log))));

        let resizes = Arc::new(Mutex::new(Vec::new()));
        let resizes_clone = resizes.clone();
        s.events().component.connect(move |ev: &ComponentEvent| {
            resizes_clone.lock().push((ev.kind, ev.size));
        });

        s.dispatch_resized(Pixel::new(800, 600), Timestamp::from_millis(10));
        assert_eq!(s.size(), Pixel::new(800, 600));
        assert_eq!(
            *resizes.lock(),
            vec![(ComponentEventKind::Resized, Pixel::new(800, 600))]
        );
        let widget_size = s.widget().unwrap().widget_base().size();
        assert_eq!(widget_size, Pixel::new(800, 600));

        let renderer = s.peer().lock().renderer();
        let viewport = renderer.lock().viewport();
        assert_eq!(viewport, Pixel::new(800, 600));
    }
}
