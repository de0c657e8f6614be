//! Rigid-body transform for cameras and scene objects.
//!
//! A [`Transform`] is a position plus an orientation. The local basis is
//! right-handed: `right` is +X, `up` is +Y, and `front` looks down -Z, the
//! usual camera convention. All rotation helpers act about the *local*
//! basis, so a `pitch` after a `yaw` tilts the already-turned view.

use glam::{DMat3, DMat4, DQuat, DVec3};

/// A position and orientation in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World-space position.
    pub position: DVec3,
    /// World-space orientation.
    pub rotation: DQuat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a transform from a position and orientation.
    pub fn new(position: DVec3, rotation: DQuat) -> Self {
        Self { position, rotation }
    }

    /// The local forward direction (-Z rotated into world space).
    pub fn front(&self) -> DVec3 {
        self.rotation * DVec3::NEG_Z
    }

    /// The local right direction (+X rotated into world space).
    pub fn right(&self) -> DVec3 {
        self.rotation * DVec3::X
    }

    /// The local up direction (+Y rotated into world space).
    pub fn up(&self) -> DVec3 {
        self.rotation * DVec3::Y
    }

    /// Move by a world-space offset.
    pub fn translate(&mut self, offset: DVec3) {
        self.position += offset;
    }

    /// Apply a rotation on top of the current orientation.
    pub fn rotate(&mut self, rotation: DQuat) {
        self.rotation = (rotation * self.rotation).normalize();
    }

    /// Rotate by an angle in radians about an arbitrary axis.
    pub fn rotate_about(&mut self, angle: f64, axis: DVec3) {
        self.rotate(DQuat::from_axis_angle(axis.normalize(), angle));
    }

    /// Tilt about the local right axis.
    pub fn pitch(&mut self, angle: f64) {
        self.rotate_about(angle, self.right());
    }

    /// Turn about the local up axis.
    pub fn yaw(&mut self, angle: f64) {
        self.rotate_about(angle, self.up());
    }

    /// Twist about the local front axis.
    pub fn roll(&mut self, angle: f64) {
        self.rotate_about(angle, self.front());
    }

    /// Rotate about the world Z axis. Used by navigation modes that keep a
    /// fixed world vertical while looking around.
    pub fn rotate_z(&mut self, angle: f64) {
        self.rotate_about(angle, DVec3::Z);
    }

    /// Move along the local front axis.
    pub fn move_longitudinally(&mut self, distance: f64) {
        let front = self.front();
        self.translate(front * distance);
    }

    /// Move along the local right axis.
    pub fn move_laterally(&mut self, distance: f64) {
        let right = self.right();
        self.translate(right * distance);
    }

    /// Move along the local up axis.
    pub fn move_vertically(&mut self, distance: f64) {
        let up = self.up();
        self.translate(up * distance);
    }

    /// Move toward what the transform is facing. Alias for
    /// [`move_longitudinally`](Self::move_longitudinally) under its
    /// traditional camera name.
    pub fn dolly(&mut self, distance: f64) {
        self.move_longitudinally(distance);
    }

    /// Slide in the local view plane: `horizontal` along right,
    /// `vertical` along up.
    pub fn pan(&mut self, horizontal: f64, vertical: f64) {
        let right = self.right();
        let up = self.up();
        self.translate(right * horizontal + up * vertical);
    }

    /// Adjust the view direction: pitch by `vertical`, then yaw by
    /// `horizontal`.
    pub fn look(&mut self, horizontal: f64, vertical: f64) {
        self.pitch(vertical);
        self.yaw(horizontal);
    }

    /// Orient the transform so its front axis points at `target`, keeping
    /// `up` as close to the given hint as the geometry allows.
    pub fn look_at(&mut self, target: DVec3, up: DVec3) {
        let front = (target - self.position).normalize_or_zero();
        if front == DVec3::ZERO {
            return;
        }
        let right = front.cross(up).normalize_or_zero();
        if right == DVec3::ZERO {
            // Up hint is parallel to the view direction; keep orientation.
            return;
        }
        let true_up = right.cross(front);
        let basis = DMat3::from_cols(right, true_up, -front);
        self.rotation = DQuat::from_mat3(&basis).normalize();
    }

    /// The local-to-world matrix.
    pub fn matrix(&self) -> DMat4 {
        DMat4::from_rotation_translation(self.rotation, self.position)
    }

    /// The world-to-local matrix, i.e. the view matrix when this transform
    /// is a camera.
    pub fn view_matrix(&self) -> DMat4 {
        self.matrix().inverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-9;

    fn assert_close(a: DVec3, b: DVec3) {
        assert!(a.distance(b) < 1e-6, "{a:?} != {b:?}");
    }

    #[test]
    fn identity_basis() {
        let t = Transform::default();
        assert_close(t.front(), DVec3::NEG_Z);
        assert_close(t.right(), DVec3::X);
        assert_close(t.up(), DVec3::Y);
    }

    #[test]
    fn longitudinal_motion_follows_front() {
        let mut t = Transform::default();
        t.move_longitudinally(3.0);
        assert_close(t.position, DVec3::new(0.0, 0.0, -3.0));

        t.yaw(FRAC_PI_2); // now facing -X
        t.move_longitudinally(2.0);
        assert_close(t.position, DVec3::new(-2.0, 0.0, -3.0));
    }

    #[test]
    fn pan_moves_in_the_view_plane() {
        let mut t = Transform::default();
        t.pan(1.5, -0.5);
        assert_close(t.position, DVec3::new(1.5, -0.5, 0.0));
    }

    #[test]
    fn pitch_tilts_the_front_axis() {
        let mut t = Transform::default();
        t.pitch(FRAC_PI_2);
        assert_close(t.front(), DVec3::Y);
        // Right axis unchanged by a pure pitch.
        assert_close(t.right(), DVec3::X);
    }

    #[test]
    fn roll_preserves_front() {
        let mut t = Transform::default();
        t.roll(FRAC_PI_2);
        assert_close(t.front(), DVec3::NEG_Z);
        assert_close(t.up(), DVec3::NEG_X);
    }

    #[test]
    fn dolly_is_longitudinal() {
        let mut a = Transform::default();
        let mut b = Transform::default();
        a.dolly(4.0);
        b.move_longitudinally(4.0);
        assert!(a.position.distance(b.position) < EPS);
    }

    #[test]
    fn look_at_points_front_at_target() {
        let mut t = Transform::new(DVec3::new(5.0, 0.0, 0.0), DQuat::IDENTITY);
        t.look_at(DVec3::ZERO, DVec3::Y);
        assert_close(t.front(), DVec3::NEG_X);
        assert_close(t.up(), DVec3::Y);
    }

    #[test]
    fn look_at_degenerate_up_is_a_noop() {
        let mut t = Transform::new(DVec3::new(0.0, 5.0, 0.0), DQuat::IDENTITY);
        let before = t.rotation;
        t.look_at(DVec3::ZERO, DVec3::Y); // target straight down the up hint
        assert_eq!(t.rotation, before);
    }

    #[test]
    fn view_matrix_inverts_the_transform() {
        let mut t = Transform::default();
        t.translate(DVec3::new(1.0, 2.0, 3.0));
        t.yaw(0.7);
        let round_trip = t.matrix() * t.view_matrix();
        let identity = DMat4::IDENTITY;
        for (a, b) in round_trip
            .to_cols_array()
            .iter()
            .zip(identity.to_cols_array())
        {
            assert!((a - b).abs() < 1e-9);
        }
    }
}
