//! One-of-many widget switching.
//!
//! A [`MultiplexorWidget`] holds any number of widgets but keeps exactly
//! one selected. Rendering and input go only to the selection; the rest
//! are suspended in the registry so their redisplay requests are dropped
//! until they are selected again. Size changes reach every held widget so
//! a newly selected one never renders at a stale size.

use cairn_core::{ButtonEvent, KeyEvent, Pixel, PointerEvent};

use crate::context::UiContext;
use crate::render::RenderContext;
use crate::widget::traits::{Control, View, Widget, WidgetBase, WidgetPart, attach_part};

macro_rules! forward_to_selected {
    ($($method:ident: $ev:ty),+ $(,)?) => {
        $(
            fn $method(&mut self, ev: &$ev) {
                if let Some(widget) = self.selected_mut() {
                    widget.$method(ev);
                }
            }
        )+
    };
}

/// A container that shows exactly one of its widgets at a time.
pub struct MultiplexorWidget {
    base: WidgetBase,
    widgets: Vec<Box<dyn Widget>>,
    selected: Option<usize>,
}

impl MultiplexorWidget {
    /// An empty multiplexor with nothing selected.
    pub fn new(ctx: &UiContext) -> Self {
        let base = WidgetBase::new(ctx);
        base.forward_redisplay();
        Self {
            base,
            widgets: Vec::new(),
            selected: None,
        }
    }

    /// Number of held widgets.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether the multiplexor holds no widgets.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Index of the selected widget, if any.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// The selected widget, if any.
    pub fn selected(&self) -> Option<&dyn Widget> {
        self.selected.map(|i| &*self.widgets[i])
    }

    /// The selected widget, mutably.
    pub fn selected_mut(&mut self) -> Option<&mut (dyn Widget + 'static)> {
        let i = self.selected?;
        Some(self.widgets[i].as_mut())
    }

    /// Add a widget at the end of the rotation.
    ///
    /// The first widget added becomes the selection; later additions start
    /// out suspended. An attached multiplexor attaches the newcomer and
    /// pushes the current size immediately.
    pub fn add_widget(&mut self, mut widget: Box<dyn Widget>) {
        let ctx = self.base.context().clone();
        let _ = ctx.registry().acquire(self.base.id(), widget.id());
        if let Some(link) = self.base.attachment().cloned() {
            attach_part(widget.as_mut(), link, self.base.size());
        }
        if self.selected.is_some() {
            let _ = ctx.registry().suspend(self.base.id(), widget.id());
        } else {
            self.selected = Some(self.widgets.len());
        }
        self.widgets.push(widget);
    }

    /// Remove the widget at `index`, returning it.
    ///
    /// Removing the selection moves it to the next widget in rotation, or
    /// clears it when the container becomes empty.
    pub fn remove_widget(&mut self, index: usize) -> Option<Box<dyn Widget>> {
        if index >= self.widgets.len() {
            return None;
        }
        let ctx = self.base.context().clone();
        let mut widget = self.widgets.remove(index);
        let _ = ctx.registry().release(self.base.id(), widget.id());
        widget.widget_base_mut().detach();

        match self.selected {
            Some(s) if s == index => {
                if self.widgets.is_empty() {
                    self.selected = None;
                } else {
                    let next = index % self.widgets.len();
                    self.selected = Some(next);
                    let _ = ctx.registry().resume(self.base.id(), self.widgets[next].id());
                }
            }
            Some(s) if s > index => self.selected = Some(s - 1),
            _ => {}
        }
        Some(widget)
    }

    /// Select the widget at `index`.
    ///
    /// The previous selection is suspended, the new one resumed, and a
    /// redisplay requested so the switch becomes visible. Out-of-range
    /// indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index >= self.widgets.len() {
            tracing::warn!(target: "cairn::widget", index, len = self.widgets.len(), "selection index out of range");
            return;
        }
        if self.selected == Some(index) {
            return;
        }
        let ctx = self.base.context().clone();
        if let Some(old) = self.selected {
            let _ = ctx.registry().suspend(self.base.id(), self.widgets[old].id());
        }
        let _ = ctx.registry().resume(self.base.id(), self.widgets[index].id());
        self.selected = Some(index);
        self.base.request_redisplay();
    }

    /// Advance the selection to the next widget, wrapping at the end.
    pub fn select_next(&mut self) {
        if let Some(s) = self.selected {
            self.select((s + 1) % self.widgets.len());
        }
    }

    /// Move the selection to the previous widget, wrapping at the start.
    pub fn select_previous(&mut self) {
        if let Some(s) = self.selected {
            self.select((s + self.widgets.len() - 1) % self.widgets.len());
        }
    }
}

impl WidgetPart for MultiplexorWidget {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
}

impl View for MultiplexorWidget {
    fn initialize(&mut self) {
        if let Some(link) = self.base.attachment().cloned() {
            let size = self.base.size();
            for widget in &mut self.widgets {
                attach_part(widget.as_mut(), link.clone(), size);
            }
        }
    }

    fn resize(&mut self, size: Pixel) {
        self.base.set_size(size);
        // Every widget gets the new size, selected or not.
        for widget in &mut self.widgets {
            widget.resize(size);
        }
    }

    fn render(&mut self, ctx: &mut RenderContext<'_>) {
        if let Some(widget) = self.selected_mut() {
            widget.render(ctx);
        }
    }
}

impl Control for MultiplexorWidget {
    forward_to_selected! {
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
