//! Transparent forwarding containers.
//!
//! Each `PassThru*` type holds at most one child of the matching capability
//! and forwards every capability call to it; with no child set, every call
//! is a silent no-op. Installing a child performs the containment
//! bookkeeping against the registry and, if the container is already
//! attached to a surface, immediately pushes the attachment and current
//! size down so the child never observes a half-configured state.
//!
//! Interceptor widgets embed a [`PassThruWidget`] and re-invoke its
//! forwarding methods for whatever they choose not to consume; see the
//! camera navigation widget for the pattern.

use cairn_core::{ButtonEvent, KeyEvent, Pixel, PointerEvent};

use crate::context::UiContext;
use crate::render::RenderContext;
use crate::widget::traits::{Control, View, Widget, WidgetBase, WidgetPart, attach_part};

macro_rules! forward_control {
    ($($method:ident: $ev:ty),+ $(,)?) => {
        $(
            fn $method(&mut self, ev: &$ev) {
                if let Some(child) = self.child.as_deref_mut() {
                    child.$method(ev);
                }
            }
        )+
    };
}

/// Forwarding container for a [`View`] child.
pub struct PassThruView {
    base: WidgetBase,
    child: Option<Box<dyn View>>,
}

impl PassThruView {
    /// An empty container.
    pub fn new(ctx: &UiContext) -> Self {
        let base = WidgetBase::new(ctx);
        base.forward_redisplay();
        Self { base, child: None }
    }

    /// The held view, if any.
    pub fn view(&self) -> Option<&dyn View> {
        self.child.as_deref()
    }

    /// The held view, mutably.
    pub fn view_mut(&mut self) -> Option<&mut (dyn View + 'static)> {
        self.child.as_deref_mut()
    }

    /// Replace the held view, returning the previous one.
    ///
    /// The old child is released from containment and detached; the new
    /// one is acquired and, if this container is attached, attached in
    /// turn with the current size pushed.
    pub fn set_view(&mut self, view: Option<Box<dyn View>>) -> Option<Box<dyn View>> {
        let ctx = self.base.context().clone();
        let mut old = self.child.take();
        if let Some(old) = old.as_deref_mut() {
            let _ = ctx.registry().release(self.base.id(), old.id());
            old.widget_base_mut().detach();
        }
        if let Some(mut view) = view {
            let _ = ctx.registry().acquire(self.base.id(), view.id());
            if let Some(link) = self.base.attachment().cloned() {
                attach_part(view.as_mut(), link, self.base.size());
            }
            self.child = Some(view);
        }
        old
    }
}

impl WidgetPart for PassThruView {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
}

impl View for PassThruView {
    fn initialize(&mut self) {
        if let (Some(link), Some(child)) =
            (self.base.attachment().cloned(), self.child.as_deref_mut())
        {
            attach_part(child, link, self.base.size());
        }
    }

    fn resize(&mut self, size: Pixel) {
        self.base.set_size(size);
        if let Some(child) = self.child.as_deref_mut() {
            child.resize(size);
        }
    }

    fn render(&mut self, ctx: &mut RenderContext<'_>) {
        if let Some(child) = self.child.as_deref_mut() {
            child.render(ctx);
        }
    }
}

/// Forwarding container for a [`Control`] child.
pub struct PassThruControl {
    base: WidgetBase,
    child: Option<Box<dyn Control>>,
}

impl PassThruControl {
    /// An empty container.
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            base: WidgetBase::new(ctx),
            child: None,
        }
    }

    /// The held control, if any.
    pub fn control(&self) -> Option<&dyn Control> {
        self.child.as_deref()
    }

    /// Replace the held control, returning the previous one.
    pub fn set_control(&mut self, control: Option<Box<dyn Control>>) -> Option<Box<dyn Control>> {
        let ctx = self.base.context().clone();
        let old = self.child.take();
        if let Some(old) = old.as_deref() {
            let _ = ctx.registry().release(self.base.id(), old.id());
        }
        if let Some(control) = control {
            let _ = ctx.registry().acquire(self.base.id(), control.id());
            self.child = Some(control);
        }
        old
    }
}

impl WidgetPart for PassThruControl {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
}

impl Control for PassThruControl {
    forward_control! {
        key_pressed: KeyEvent,
        key_released: KeyEvent,
        key_typed: KeyEvent,
        pointer_dragged: PointerEvent,
        pointer_tracked: PointerEvent,
        pointer_entered: PointerEvent,
        pointer_exited: PointerEvent,
        button_pressed: ButtonEvent,
        button_released: ButtonEvent,
        button_clicked: ButtonEvent,
    }
}

/// Forwarding container for a full [`Widget`] child.
pub struct PassThruWidget {
    base: WidgetBase,
    child: Option<Box<dyn Widget>>,
}

impl PassThruWidget {
    /// An empty container.
    pub fn new(ctx: &UiContext) -> Self {
        let base = WidgetBase::new(ctx);
        base.forward_redisplay();
        Self { base, child: None }
    }

    /// The held widget, if any.
    pub fn widget(&self) -> Option<&dyn Widget> {
        self.child.as_deref()
    }

    /// The held widget, mutably.
    pub fn widget_mut(&mut self) -> Option<&mut (dyn Widget + 'static)> {
        self.child.as_deref_mut()
    }

    /// Replace the held widget, returning the previous one.
    ///
    /// Performs release/acquire bookkeeping and pushes attachment and
    /// size to the new child when this container is already attached.
    pub fn set_widget(&mut self, widget: Option<Box<dyn Widget>>) -> Option<Box<dyn Widget>> {
        let ctx = self.base.context().clone();
        let mut old = self.child.take();
        if let Some(old) = old.as_deref_mut() {
            let _ = ctx.registry().release(self.base.id(), old.id());
            old.widget_base_mut().detach();
        }
        if let Some(mut widget) = widget {
            let _ = ctx.registry().acquire(self.base.id(), widget.id());
            if let Some(link) = self.base.attachment().cloned() {
                attach_part(widget.as_mut(), link, self.base.size());
            }
            self.child = Some(widget);
        }
        old
    }
}

impl WidgetPart for PassThruWidget {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
}

impl View for PassThruWidget {
    fn initialize(&mut self) {
        if let (Some(link), Some(child)) =
            (self.base.attachment().cloned(), self.child.as_deref_mut())
        {
            attach_part(child, link, self.base.size());
        }
    }

    fn resize(&mut self, size: Pixel) {
        self.base.set_size(size);
        if let Some(child) = self.child.as_deref_mut() {
            child.resize(size);
        }
    }

    fn render(&mut self, ctx: &mut RenderContext<'_>) {
        if let Some(child) = self.child.as_deref_mut() {
            child.render(ctx);
        }
    }
}

impl Control for PassThruWidget {
    forward_control! {
        key_pressed: KeyEvent,
        key_released: KeyEvent,
        key_typed: KeyEvent,
        pointer_dragged: PointerEvent,
        pointer_tracked: PointerEvent,
        pointer_entered: PointerEvent,
        pointer_exited: PointerEvent,
        button_pressed: ButtonEvent,
        button_released: ButtonEvent,
        button_clicked: ButtonEvent,
    }
}
