//! The renderer contract consumed by widgets.
//!
//! Widgets never draw directly through a toolkit API; they manipulate the
//! [`Renderer`] handed down the render call. The framework ships
//! [`ViewMatrices`], a CPU-side implementation that tracks the viewport and
//! the projection and view [`MatrixStack`]s. Toolkit peers either wrap it
//! or mirror the trait onto their own pipeline.

use std::sync::Arc;

use glam::{DMat4, DVec3, DVec4};
use parking_lot::Mutex;

use cairn_core::Pixel;

use crate::transform::Transform;

/// A stack of 4x4 matrices with the usual push/pop discipline.
///
/// The stack always holds at least one matrix; popping the last entry is a
/// protocol violation that logs a warning and keeps it in place.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixStack {
    stack: Vec<DMat4>,
}

impl MatrixStack {
    /// A stack holding one identity matrix.
    pub fn new() -> Self {
        Self {
            stack: vec![DMat4::IDENTITY],
        }
    }

    /// The top of the stack.
    pub fn current(&self) -> DMat4 {
        *self.stack.last().expect("matrix stack is never empty")
    }

    /// Duplicate the top entry.
    pub fn push(&mut self) {
        self.stack.push(self.current());
    }

    /// Discard the top entry, restoring the previous one.
    pub fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        } else {
            tracing::warn!(target: "cairn::render", "pop on a matrix stack with one entry");
        }
    }

    /// Replace the top entry.
    pub fn load(&mut self, matrix: DMat4) {
        *self.stack.last_mut().expect("matrix stack is never empty") = matrix;
    }

    /// Right-multiply the top entry.
    pub fn multiply(&mut self, matrix: DMat4) {
        let top = self.current();
        self.load(top * matrix);
    }

    /// Apply a transform's local-to-world matrix to the top entry.
    pub fn transform(&mut self, t: &Transform) {
        self.multiply(t.matrix());
    }

    /// Apply the inverse of a transform to the top entry. With a camera
    /// transform this yields the view matrix.
    pub fn untransform(&mut self, t: &Transform) {
        self.multiply(t.view_matrix());
    }

    /// Drop everything and reload a single identity matrix.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.stack.push(DMat4::IDENTITY);
    }

    /// Current stack depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Drawing state handed down to widgets during a frame.
///
/// Implementations track the viewport and the projection/view matrix
/// stacks; the default unprojection helpers are derived from those, so a
/// peer only has to store state, not redo the math.
pub trait Renderer: Send {
    /// Resize the viewport, in pixels.
    fn set_viewport(&mut self, size: Pixel);

    /// The current viewport, in pixels.
    fn viewport(&self) -> Pixel;

    /// The projection matrix stack.
    fn projection(&self) -> &MatrixStack;

    /// The projection matrix stack, mutably.
    fn projection_mut(&mut self) -> &mut MatrixStack;

    /// The view matrix stack.
    fn view(&self) -> &MatrixStack;

    /// The view matrix stack, mutably.
    fn view_mut(&mut self) -> &mut MatrixStack;

    /// Mark the start of a frame.
    fn begin_frame(&mut self) {}

    /// Mark the end of a frame.
    fn end_frame(&mut self) {}

    /// Unproject a pixel to eye space on the near plane.
    ///
    /// Returns the origin for degenerate viewports or projections.
    fn screen_to_local(&self, p: Pixel) -> DVec3 {
        let size = self.viewport();
        if size.x <= 0 || size.y <= 0 {
            return DVec3::ZERO;
        }
        // Pixel center to normalized device coordinates; screen y grows
        // down, NDC y grows up.
        let x = 2.0 * (f64::from(p.x) + 0.5) / f64::from(size.x) - 1.0;
        let y = 1.0 - 2.0 * (f64::from(p.y) + 0.5) / f64::from(size.y);
        let ndc = DVec4::new(x, y, -1.0, 1.0);
        let eye = self.projection().current().inverse() * ndc;
        if eye.w.abs() < f64::EPSILON {
            return DVec3::ZERO;
        }
        eye.truncate() / eye.w
    }

    /// Map an eye-space point to world space through the view matrix.
    fn local_to_world(&self, p: DVec3) -> DVec3 {
        let world = self.view().current().inverse() * p.extend(1.0);
        if world.w.abs() < f64::EPSILON {
            return DVec3::ZERO;
        }
        world.truncate() / world.w
    }
}

/// Shared handle to a renderer, as handed out by surface peers.
pub type SharedRenderer = Arc<Mutex<dyn Renderer>>;

/// Borrow of the active renderer passed down render calls.
pub struct RenderContext<'a> {
    /// The renderer driving the current frame.
    pub renderer: &'a mut dyn Renderer,
}

impl<'a> RenderContext<'a> {
    /// Wrap a renderer borrow for the duration of a render pass.
    pub fn new(renderer: &'a mut dyn Renderer) -> Self {
        Self { renderer }
    }
}

/// CPU-side renderer state: viewport plus matrix stacks.
///
/// Counts begin/end frame calls so headless tests can assert that frames
/// are properly bracketed.
pub struct ViewMatrices {
    viewport: Pixel,
    projection: MatrixStack,
    view: MatrixStack,
    frames_begun: u64,
    frames_ended: u64,
}

impl ViewMatrices {
    /// Fresh state with a zero viewport and identity stacks.
    pub fn new() -> Self {
        Self {
            viewport: Pixel::ZERO,
            projection: MatrixStack::new(),
            view: MatrixStack::new(),
            frames_begun: 0,
            frames_ended: 0,
        }
    }

    /// Number of frames started so far.
    pub fn frames_begun(&self) -> u64 {
        self.frames_begun
    }

    /// Number of frames completed so far.
    pub fn frames_ended(&self) -> u64 {
        self.frames_ended
    }
}

impl Default for ViewMatrices {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for ViewMatrices {
    fn set_viewport(&mut self, size: Pixel) {
        self.viewport = size;
    }

    fn viewport(&self) -> Pixel {
        self.viewport
    }

    fn projection(&self) -> &MatrixStack {
        &self.projection
    }

    fn projection_mut(&mut self) -> &mut MatrixStack {
        &mut self.projection
    }

    fn view(&self) -> &MatrixStack {
        &self.view
    }

    fn view_mut(&mut self) -> &mut MatrixStack {
        &mut self.view
    }

    fn begin_frame(&mut self) {
        self.frames_begun += 1;
    }

    fn end_frame(&mut self) {
        self.frames_ended += 1;
    }
}
