//! Pointer-driven camera navigation.
//!
//! [`CameraNavigationWidget`] wraps a child widget and intercepts the
//! input that matches one of its pointer bindings, steering a shared
//! [`Camera`] instead of delivering the events. Everything it does not
//! consume passes through untouched, so the child behaves as if the
//! navigator were not there.
//!
//! While a drag is being followed the widget keeps the pointer usable on
//! small surfaces by warping it back to the center whenever it strays
//! within [`BOUNDARY_WARP_DISTANCE`] pixels of an edge. Surfaces whose
//! peer cannot warp simply let the pointer run out of room.

use std::sync::Arc;

use parking_lot::Mutex;

use cairn_core::{
    ButtonEvent, ControlFlags, InputEvent, KeyCode, KeyEvent, Pixel, PointerEvent,
};

use crate::camera::{Camera, Projection};
use crate::context::UiContext;
use crate::render::RenderContext;
use crate::widget::passthru::PassThruWidget;
use crate::widget::traits::{Control, View, Widget, WidgetBase, WidgetPart};

/// How close to a surface edge the pointer may get during a followed drag
/// before it is warped back to the center, in pixels.
pub const BOUNDARY_WARP_DISTANCE: i32 = 25;

/// What a followed pointer drag does to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerFollowMode {
    /// Leave the camera alone and pass events through.
    #[default]
    Ignore,
    /// Drag along the camera's front axis.
    MoveLongitudinally,
    /// Drag along the camera's right axis.
    MoveLaterally,
    /// Drag along the camera's up axis.
    MoveVertically,
    /// Slide the camera in its view plane, following the scene.
    Pan,
    /// Twist about the camera's front axis.
    Roll,
    /// Tilt about the camera's right axis.
    Pitch,
    /// Turn about the camera's up axis.
    Yaw,
    /// Free look: pitch plus a turn about the world vertical.
    Look,
    /// Change the camera's magnification.
    Zoom,
}

/// A widget that turns pointer drags and navigation keys into camera
/// motion, passing everything else to its child.
pub struct CameraNavigationWidget {
    pass_thru: PassThruWidget,
    camera: Option<Arc<Mutex<Camera>>>,
    bindings: Vec<(ControlFlags, PointerFollowMode)>,
    follow_mode: PointerFollowMode,
    last_pointer: Pixel,
    suppress_click: bool,
    locked_look: bool,
    /// Flip the sense of horizontal pointer deltas.
    pub invert_horizontal: bool,
    /// Flip the sense of vertical pointer deltas.
    pub invert_vertical: bool,
    /// Gate for the translating follow modes.
    pub translation_enabled: bool,
    /// Gate for the rotating follow modes.
    pub rotation_enabled: bool,
    /// Gate for [`PointerFollowMode::Zoom`].
    pub zoom_enabled: bool,
    /// World units of travel per pixel of drag for the linear modes.
    pub linear_motion_scale: f64,
    /// World units of travel per pixel of drag along the front axis.
    pub longitudinal_motion_scale: f64,
    /// Radians of rotation per pixel of drag.
    pub angular_motion_scale: f64,
    /// Per-pixel magnification rate for [`PointerFollowMode::Zoom`].
    pub zoom_scale: f64,
}

impl CameraNavigationWidget {
    /// A navigator with the standard bindings and no camera.
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            pass_thru: PassThruWidget::new(ctx),
            camera: None,
            bindings: Self::default_bindings(),
            follow_mode: PointerFollowMode::Ignore,
            last_pointer: Pixel::ZERO,
            suppress_click: false,
            locked_look: false,
            invert_horizontal: false,
            invert_vertical: false,
            translation_enabled: true,
            rotation_enabled: true,
            zoom_enabled: true,
            linear_motion_scale: 0.05,
            longitudinal_motion_scale: 0.1,
            angular_motion_scale: 0.005,
            zoom_scale: 0.01,
        }
    }

    /// The standard drag bindings, most specific first.
    pub fn default_bindings() -> Vec<(ControlFlags, PointerFollowMode)> {
        vec![
            (
                ControlFlags::CONTROL | ControlFlags::ALT | ControlFlags::RIGHT,
                PointerFollowMode::Zoom,
            ),
            (
                ControlFlags::CONTROL | ControlFlags::ALT | ControlFlags::LEFT,
                PointerFollowMode::Look,
            ),
            (
                ControlFlags::CONTROL | ControlFlags::LEFT,
                PointerFollowMode::MoveLongitudinally,
            ),
            (
                ControlFlags::CONTROL | ControlFlags::MIDDLE,
                PointerFollowMode::Pan,
            ),
            (
                ControlFlags::CONTROL | ControlFlags::RIGHT,
                PointerFollowMode::Roll,
            ),
            (ControlFlags::MIDDLE, PointerFollowMode::Pan),
            (
                ControlFlags::ALT | ControlFlags::LEFT,
                PointerFollowMode::Pan,
            ),
        ]
    }

    /// The camera being driven, if one is set.
    pub fn camera(&self) -> Option<&Arc<Mutex<Camera>>> {
        self.camera.as_ref()
    }

    /// Install or remove the driven camera.
    ///
    /// A newly installed camera is immediately reshaped to the widget's
    /// current size.
    pub fn set_camera(&mut self, camera: Option<Arc<Mutex<Camera>>>) {
        self.camera = camera;
        let size = self.pass_thru.widget_base().size();
        if size.x > 0 && size.y > 0 {
            if let Some(camera) = &self.camera {
                camera.lock().reshape(size.x, size.y);
            }
        }
    }

    /// The active drag bindings, checked in order.
    pub fn bindings(&self) -> &[(ControlFlags, PointerFollowMode)] {
        &self.bindings
    }

    /// Replace the drag bindings. Earlier entries win; matching is exact
    /// over the full flag set of the press event.
    pub fn set_bindings(&mut self, bindings: Vec<(ControlFlags, PointerFollowMode)>) {
        self.bindings = bindings;
    }

    /// The mode a drag is currently following.
    pub fn follow_mode(&self) -> PointerFollowMode {
        self.follow_mode
    }

    /// Whether the navigator is in locked-look mode.
    pub fn locked_look(&self) -> bool {
        self.locked_look
    }

    /// The wrapped child widget, if any.
    pub fn widget(&self) -> Option<&dyn Widget> {
        self.pass_thru.widget()
    }

    /// Replace the wrapped child, returning the previous one.
    pub fn set_widget(&mut self, widget: Option<Box<dyn Widget>>) -> Option<Box<dyn Widget>> {
        self.pass_thru.set_widget(widget)
    }

    fn select_follow_mode(&self, ev: &ButtonEvent) -> PointerFollowMode {
        for (flags, mode) in &self.bindings {
            if ev.these_active(*flags) {
                return *mode;
            }
        }
        PointerFollowMode::Ignore
    }

    /// World units covered by one pixel at the current viewport, for
    /// orthographic pans. Perspective cameras fall back to the linear
    /// scale.
    fn pan_units_per_pixel(&self, camera: &Camera) -> f64 {
        match camera.projection {
            Projection::Orthographic { .. } => {
                let Ok(renderer) = self.pass_thru.widget_base().renderer() else {
                    return self.linear_motion_scale;
                };
                let r = renderer.lock();
                let origin = r.screen_to_local(Pixel::new(0, 0));
                let right = r.screen_to_local(Pixel::new(1, 0));
                let step = origin.distance(right);
                if step > 0.0 { step } else { self.linear_motion_scale }
            }
            Projection::Perspective { .. } => self.linear_motion_scale,
        }
    }

    fn motion_enabled(&self, mode: PointerFollowMode) -> bool {
        match mode {
            PointerFollowMode::Ignore => false,
            PointerFollowMode::MoveLongitudinally
            | PointerFollowMode::MoveLaterally
            | PointerFollowMode::MoveVertically
            | PointerFollowMode::Pan => self.translation_enabled,
            PointerFollowMode::Roll
            | PointerFollowMode::Pitch
            | PointerFollowMode::Yaw
            | PointerFollowMode::Look => self.rotation_enabled,
            PointerFollowMode::Zoom => self.zoom_enabled,
        }
    }

    /// Apply a pointer delta to the camera. Returns false when there is no
    /// camera or the active mode's motion category is disabled.
    fn transform_camera(&mut self, delta: Pixel) -> bool {
        let Some(camera) = self.camera.clone() else {
            return false;
        };
        if !self.motion_enabled(self.follow_mode) {
            return false;
        }
        let mut camera = camera.lock();
        let dx = f64::from(delta.x) * if self.invert_horizontal { -1.0 } else { 1.0 };
        let dy = f64::from(delta.y) * if self.invert_vertical { -1.0 } else { 1.0 };
        match self.follow_mode {
            PointerFollowMode::Ignore => {}
            PointerFollowMode::MoveLongitudinally => {
                camera
                    .transform
                    .move_longitudinally((dx + dy) * self.longitudinal_motion_scale);
            }
            PointerFollowMode::MoveLaterally => {
                camera.transform.move_laterally(dx * self.linear_motion_scale);
            }
            PointerFollowMode::MoveVertically => {
                // Screen y grows downward.
                camera.transform.move_vertically(-dy * self.linear_motion_scale);
            }
            PointerFollowMode::Pan => {
                let step = self.pan_units_per_pixel(&camera);
                // The scene follows the pointer, so the camera moves the
                // other way.
                camera.transform.pan(-dx * step, dy * step);
            }
            PointerFollowMode::Roll => {
                camera.transform.roll((dx + dy) * self.angular_motion_scale);
            }
            PointerFollowMode::Pitch => {
                camera.transform.pitch(-dy * self.angular_motion_scale);
            }
            PointerFollowMode::Yaw => {
                camera.transform.yaw(-dx * self.angular_motion_scale);
            }
            PointerFollowMode::Look => {
                camera.transform.pitch(-dy * self.angular_motion_scale);
                camera.transform.rotate_z(-dx * self.angular_motion_scale);
            }
            PointerFollowMode::Zoom => {
                camera.zoom((1.0 + self.zoom_scale).powf(dx + dy));
            }
        }
        true
    }

    /// Warp the pointer back to the surface center when it strays near an
    /// edge during a followed drag. Returns the position deltas should be
    /// measured from next.
    fn warp_if_near_boundary(&self, position: Pixel) -> Pixel {
        let size = self.pass_thru.widget_base().size();
        if size.x <= 2 * BOUNDARY_WARP_DISTANCE || size.y <= 2 * BOUNDARY_WARP_DISTANCE {
            return position;
        }
        let near_edge = position.x < BOUNDARY_WARP_DISTANCE
            || position.y < BOUNDARY_WARP_DISTANCE
            || position.x >= size.x - BOUNDARY_WARP_DISTANCE
            || position.y >= size.y - BOUNDARY_WARP_DISTANCE;
        if !near_edge {
            return position;
        }
        let center = size / 2;
        if let Some(link) = self.pass_thru.widget_base().attachment() {
            match link.peer.lock().warp_pointer(center) {
                Ok(()) => return center,
                Err(err) => {
                    tracing::debug!(target: "cairn::widget", %err, "pointer warp unavailable");
                }
            }
        }
        position
    }

    fn follow_pointer(&mut self, position: Pixel) {
        let delta = position - self.last_pointer;
        let moved = self.transform_camera(delta);
        self.last_pointer = self.warp_if_near_boundary(position);
        if moved {
            self.pass_thru.widget_base().request_redisplay();
        }
    }

    fn set_cursor_visible(&self, visible: bool) {
        if let Some(link) = self.pass_thru.widget_base().attachment() {
            if let Err(err) = link.peer.lock().set_cursor_visible(visible) {
                tracing::debug!(target: "cairn::widget", %err, "cursor visibility unavailable");
            }
        }
    }

    fn toggle_locked_look(&mut self, at: Pixel) {
        self.locked_look = !self.locked_look;
        if self.locked_look {
            self.follow_mode = PointerFollowMode::Look;
            self.last_pointer = at;
            self.set_cursor_visible(false);
        } else {
            self.follow_mode = PointerFollowMode::Ignore;
            self.set_cursor_visible(true);
        }
    }

    /// Keyboard nudge distance for the flags held, in world units.
    fn key_step(flags: ControlFlags) -> f64 {
        if flags.all_modifiers_active(ControlFlags::CONTROL) {
            10.0
        } else if flags.all_modifiers_active(ControlFlags::SHIFT) {
            5.0
        } else {
            1.0
        }
    }

    /// Apply a navigation key, returning false when the key is not one of
    /// ours and should pass through.
    fn nudge(&mut self, ev: &KeyEvent) -> bool {
        let Some(camera) = self.camera.clone() else {
            return false;
        };
        let step = Self::key_step(ev.flags);
        let mut camera = camera.lock();
        match ev.key {
            KeyCode::W => camera.transform.move_longitudinally(step),
            KeyCode::S => camera.transform.move_longitudinally(-step),
            KeyCode::A => camera.transform.move_laterally(-step),
            KeyCode::D => camera.transform.move_laterally(step),
            KeyCode::Q => camera.transform.move_vertically(step),
            KeyCode::E => camera.transform.move_vertically(-step),
            _ => return false,
        }
        drop(camera);
        self.pass_thru.widget_base().request_redisplay();
        true
    }
}

impl WidgetPart for CameraNavigationWidget {
    fn widget_base(&self) -> &WidgetBase {
        self.pass_thru.widget_base()
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        self.pass_thru.widget_base_mut()
    }
}

impl View for CameraNavigationWidget {
    fn initialize(&mut self) {
        self.pass_thru.initialize();
    }

    fn resize(&mut self, size: Pixel) {
        if let Some(camera) = &self.camera {
            camera.lock().reshape(size.x, size.y);
        }
        self.pass_thru.resize(size);
    }

    fn render(&mut self, ctx: &mut RenderContext<'_>) {
        match &self.camera {
            Some(camera) => {
                let camera = camera.lock().clone();
                ctx.renderer.projection_mut().push();
                ctx.renderer.projection_mut().load(camera.projection_matrix());
                ctx.renderer.view_mut().push();
                ctx.renderer.view_mut().untransform(&camera.transform);
                self.pass_thru.render(ctx);
                ctx.renderer.view_mut().pop();
                ctx.renderer.projection_mut().pop();
            }
            None => self.pass_thru.render(ctx),
        }
    }
}

impl Control for CameraNavigationWidget {
    fn key_pressed(&mut self, ev: &KeyEvent) {
        if ev.key == KeyCode::F12 {
            self.toggle_locked_look(ev.position);
            return;
        }
        if self.nudge(ev) {
            return;
        }
        self.pass_thru.key_pressed(ev);
    }

    fn key_released(&mut self, ev: &KeyEvent) {
        self.pass_thru.key_released(ev);
    }

    fn key_typed(&mut self, ev: &KeyEvent) {
        self.pass_thru.key_typed(ev);
    }

    fn pointer_dragged(&mut self, ev: &PointerEvent) {
        if self.follow_mode == PointerFollowMode::Ignore {
            self.pass_thru.pointer_dragged(ev);
            return;
        }
        self.follow_pointer(ev.position);
    }

    fn pointer_tracked(&mut self, ev: &PointerEvent) {
        if self.follow_mode != PointerFollowMode::Ignore {
            self.follow_pointer(ev.position);
            return;
        }
        self.pass_thru.pointer_tracked(ev);
    }

    fn pointer_entered(&mut self, ev: &PointerEvent) {
        self.pass_thru.pointer_entered(ev);
    }

    fn pointer_exited(&mut self, ev: &PointerEvent) {
        self.pass_thru.pointer_exited(ev);
    }

    fn button_pressed(&mut self, ev: &ButtonEvent) {
        // Any click synthesized from the previous release has been
        // delivered by now; a leftover suppression must not outlive it.
        self.suppress_click = false;
        if self.locked_look {
            return;
        }
        // The follow mode is a pure function of the current flags.
        self.follow_mode = self.select_follow_mode(ev);
        if self.follow_mode == PointerFollowMode::Ignore {
            self.pass_thru.button_pressed(ev);
            return;
        }
        self.last_pointer = ev.position;
    }

    fn button_released(&mut self, ev: &ButtonEvent) {
        if self.locked_look {
            return;
        }
        let was_following = self.follow_mode != PointerFollowMode::Ignore;
        self.follow_mode = self.select_follow_mode(ev);
        if was_following {
            self.suppress_click = true;
            if self.follow_mode != PointerFollowMode::Ignore {
                self.last_pointer = ev.position;
            }
            return;
        }
        self.pass_thru.button_released(ev);
    }

    fn button_clicked(&mut self, ev: &ButtonEvent) {
        if self.suppress_click {
            self.suppress_click = false;
            return;
        }
        self.pass_thru.button_clicked(ev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairn_core::{Button, ButtonEventKind, Timestamp};
    use glam::DVec3;

    fn press(flags: ControlFlags, button: Button) -> ButtonEvent {
        ButtonEvent {
            timestamp: Timestamp::from_millis(1),
            flags,
            position: Pixel::new(100, 100),
            kind: ButtonEventKind::Pressed,
            button,
        }
    }

    fn navigator_with_camera() -> (CameraNavigationWidget, Arc<Mutex<Camera>>) {
        let ctx = UiContext::new();
        let mut nav = CameraNavigationWidget::new(&ctx);
        let camera = Arc::new(Mutex::new(Camera::perspective()));
        nav.set_camera(Some(camera.clone()));
        (nav, camera)
    }

    #[test]
    fn binding_table_resolves_exact_chords() {
        let ctx = UiContext::new();
        let nav = CameraNavigationWidget::new(&ctx);

        let cases = [
            (
                ControlFlags::CONTROL | ControlFlags::LEFT,
                Button::Left,
                PointerFollowMode::MoveLongitudinally,
            ),
            (
                ControlFlags::CONTROL | ControlFlags::ALT | ControlFlags::LEFT,
                Button::Left,
                PointerFollowMode::Look,
            ),
            (
                ControlFlags::CONTROL | ControlFlags::ALT | ControlFlags::RIGHT,
                Button::Right,
                PointerFollowMode::Zoom,
            ),
            (
                ControlFlags::CONTROL | ControlFlags::MIDDLE,
                Button::Middle,
                PointerFollowMode::Pan,
            ),
            (
                ControlFlags::CONTROL | ControlFlags::RIGHT,
                Button::Right,
                PointerFollowMode::Roll,
            ),
            (ControlFlags::MIDDLE, Button::Middle, PointerFollowMode::Pan),
            (
                ControlFlags::ALT | ControlFlags::LEFT,
                Button::Left,
                PointerFollowMode::Pan,
            ),
            (ControlFlags::LEFT, Button::Left, PointerFollowMode::Ignore),
            // Extra modifiers break an exact match.
            (
                ControlFlags::CONTROL | ControlFlags::SHIFT | ControlFlags::LEFT,
                Button::Left,
                PointerFollowMode::Ignore,
            ),
        ];
        for (flags, button, expected) in cases {
            assert_eq!(
                nav.select_follow_mode(&press(flags, button)),
                expected,
                "{flags:?}"
            );
        }
    }

    #[test]
    fn drag_moves_the_camera_longitudinally() {
        let (mut nav, camera) = navigator_with_camera();
        let front = camera.lock().transform.front();

        nav.button_pressed(&press(
            ControlFlags::CONTROL | ControlFlags::LEFT,
            Button::Left,
        ));
        assert_eq!(nav.follow_mode(), PointerFollowMode::MoveLongitudinally);

        nav.pointer_dragged(&PointerEvent {
            timestamp: Timestamp::from_millis(2),
            flags: ControlFlags::CONTROL | ControlFlags::LEFT,
            position: Pixel::new(110, 95),
            kind: cairn_core::PointerEventKind::Dragged,
        });

        let expected = front * (10.0 - 5.0) * nav.longitudinal_motion_scale;
        assert!(camera.lock().transform.position.distance(expected) < 1e-9);
    }

    #[test]
    fn release_ends_the_follow() {
        let (mut nav, _camera) = navigator_with_camera();
        nav.button_pressed(&press(
            ControlFlags::CONTROL | ControlFlags::LEFT,
            Button::Left,
        ));
        nav.button_released(&ButtonEvent {
            kind: ButtonEventKind::Released,
            flags: ControlFlags::CONTROL,
            ..press(ControlFlags::CONTROL, Button::Left)
        });
        assert_eq!(nav.follow_mode(), PointerFollowMode::Ignore);
    }

    #[test]
    fn zoom_drag_magnifies() {
        let (mut nav, camera) = navigator_with_camera();
        let before = camera.lock().projection;

        nav.button_pressed(&press(
            ControlFlags::CONTROL | ControlFlags::ALT | ControlFlags::RIGHT,
            Button::Right,
        ));
        nav.pointer_dragged(&PointerEvent {
            timestamp: Timestamp::from_millis(2),
            flags: ControlFlags::CONTROL | ControlFlags::ALT | ControlFlags::RIGHT,
            position: Pixel::new(150, 100),
            kind: cairn_core::PointerEventKind::Dragged,
        });

        let (
            Projection::Perspective {
                horiz_view_angle, ..
            },
            Projection::Perspective {
                horiz_view_angle: old,
                ..
            },
        ) = (camera.lock().projection, before)
        else {
            panic!("projection kind changed");
        };
        assert!(horiz_view_angle < old);
    }

    #[test]
    fn wasd_steps_scale_with_modifiers() {
        let (mut nav, camera) = navigator_with_camera();
        let key = |flags, code| KeyEvent {
            timestamp: Timestamp::from_millis(1),
            flags,
            position: Pixel::ZERO,
            kind: cairn_core::KeyEventKind::Pressed,
            key: code,
            character: None,
        };

        nav.key_pressed(&key(ControlFlags::empty(), KeyCode::W));
        assert!(
            camera
                .lock()
                .transform
                .position
                .distance(DVec3::new(0.0, 0.0, -1.0))
                < 1e-9
        );

        nav.key_pressed(&key(ControlFlags::SHIFT, KeyCode::S));
        assert!(
            camera
                .lock()
                .transform
                .position
                .distance(DVec3::new(0.0, 0.0, 4.0))
                < 1e-9
        );

        nav.key_pressed(&key(ControlFlags::CONTROL, KeyCode::D));
        assert!(
            camera
                .lock()
                .transform
                .position
                .distance(DVec3::new(10.0, 0.0, 4.0))
                < 1e-9
        );
    }

    #[test]
    fn disabled_translation_freezes_the_camera() {
        let (mut nav, camera) = navigator_with_camera();
        nav.translation_enabled = false;

        nav.button_pressed(&press(
            ControlFlags::CONTROL | ControlFlags::LEFT,
            Button::Left,
        ));
        nav.pointer_dragged(&PointerEvent {
            timestamp: Timestamp::from_millis(2),
            flags: ControlFlags::CONTROL | ControlFlags::LEFT,
            position: Pixel::new(200, 100),
            kind: cairn_core::PointerEventKind::Dragged,
        });

        assert_eq!(camera.lock().transform.position, DVec3::ZERO);
    }

    #[test]
    fn inverted_axes_flip_the_delta() {
        let (mut nav, camera) = navigator_with_camera();
        nav.invert_horizontal = true;
        nav.invert_vertical = true;
        let front = camera.lock().transform.front();

        nav.button_pressed(&press(
            ControlFlags::CONTROL | ControlFlags::LEFT,
            Button::Left,
        ));
        nav.pointer_dragged(&PointerEvent {
            timestamp: Timestamp::from_millis(2),
            flags: ControlFlags::CONTROL | ControlFlags::LEFT,
            position: Pixel::new(110, 95),
            kind: cairn_core::PointerEventKind::Dragged,
        });

        let expected = front * -(10.0 - 5.0) * nav.longitudinal_motion_scale;
        assert!(camera.lock().transform.position.distance(expected) < 1e-9);
    }

    #[test]
    fn f12_toggles_locked_look() {
        let (mut nav, camera) = navigator_with_camera();
        let f12 = KeyEvent {
            timestamp: Timestamp::from_millis(1),
            flags: ControlFlags::empty(),
            position: Pixel::new(50, 50),
            kind: cairn_core::KeyEventKind::Pressed,
            key: KeyCode::F12,
            character: None,
        };

        nav.key_pressed(&f12);
        assert!(nav.locked_look());
        assert_eq!(nav.follow_mode(), PointerFollowMode::Look);

        // Tracked motion now drives the camera with no button held.
        let rotation_before = camera.lock().transform.rotation;
        nav.pointer_tracked(&PointerEvent {
            timestamp: Timestamp::from_millis(2),
            flags: ControlFlags::empty(),
            position: Pixel::new(70, 50),
            kind: cairn_core::PointerEventKind::Tracked,
        });
        assert_ne!(camera.lock().transform.rotation, rotation_before);

        nav.key_pressed(&f12);
        assert!(!nav.locked_look());
        assert_eq!(nav.follow_mode(), PointerFollowMode::Ignore);
    }
}
