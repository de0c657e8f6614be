//! Cameras and projections.
//!
//! A [`Camera`] pairs a [`Transform`] with a [`Projection`] and the clip
//! range. The projection is a plain sum type rather than a class hierarchy;
//! operations that differ per kind (`reshape`, `zoom`, the projection
//! matrix) match on it directly.

use glam::DMat4;

use crate::transform::Transform;

/// Default near clip distance.
pub const DEFAULT_NEAR_CLIP: f64 = 1.0;
/// Default far clip distance.
pub const DEFAULT_FAR_CLIP: f64 = 1000.0;

/// How eye-space geometry maps onto the image plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Perspective projection described by its view angles, in radians.
    Perspective {
        /// Full horizontal view angle.
        horiz_view_angle: f64,
        /// Full vertical view angle.
        vert_view_angle: f64,
    },
    /// Orthographic projection described by its view volume extents, in
    /// world units.
    Orthographic {
        /// Width of the visible volume.
        view_width: f64,
        /// Height of the visible volume.
        view_height: f64,
    },
}

impl Projection {
    /// A square perspective projection with 45 degree view angles.
    pub fn perspective() -> Self {
        Self::Perspective {
            horiz_view_angle: std::f64::consts::FRAC_PI_4,
            vert_view_angle: std::f64::consts::FRAC_PI_4,
        }
    }

    /// An orthographic projection with the given view volume extents.
    pub fn orthographic(view_width: f64, view_height: f64) -> Self {
        Self::Orthographic {
            view_width,
            view_height,
        }
    }
}

/// A viewpoint: transform, projection, and clip range.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Position and orientation of the viewpoint.
    pub transform: Transform,
    /// How the view volume maps to the image.
    pub projection: Projection,
    /// Near clip distance.
    pub near_clip: f64,
    /// Far clip distance.
    pub far_clip: f64,
}

impl Camera {
    /// A perspective camera at the origin with default clip range.
    pub fn perspective() -> Self {
        Self {
            transform: Transform::default(),
            projection: Projection::perspective(),
            near_clip: DEFAULT_NEAR_CLIP,
            far_clip: DEFAULT_FAR_CLIP,
        }
    }

    /// An orthographic camera at the origin with default clip range.
    pub fn orthographic(view_width: f64, view_height: f64) -> Self {
        Self {
            transform: Transform::default(),
            projection: Projection::orthographic(view_width, view_height),
            near_clip: DEFAULT_NEAR_CLIP,
            far_clip: DEFAULT_FAR_CLIP,
        }
    }

    /// Adapt the projection to a new viewport, keeping the horizontal
    /// extent fixed and deriving the vertical one from the aspect ratio.
    ///
    /// Degenerate viewports are ignored.
    pub fn reshape(&mut self, width: i32, height: i32) {
        if width <= 0 || height <= 0 {
            tracing::warn!(target: "cairn::camera", width, height, "reshape to degenerate viewport ignored");
            return;
        }
        let aspect = f64::from(width) / f64::from(height);
        match &mut self.projection {
            Projection::Perspective {
                horiz_view_angle,
                vert_view_angle,
            } => {
                *vert_view_angle = *horiz_view_angle / aspect;
            }
            Projection::Orthographic {
                view_width,
                view_height,
            } => {
                *view_height = *view_width / aspect;
            }
        }
    }

    /// Magnify the view by `factor`; values above one zoom in.
    ///
    /// Perspective cameras narrow their view angles, orthographic cameras
    /// shrink their view volume. Non-positive factors are ignored.
    pub fn zoom(&mut self, factor: f64) {
        if factor <= 0.0 || !factor.is_finite() {
            tracing::warn!(target: "cairn::camera", factor, "ignoring non-positive zoom factor");
            return;
        }
        match &mut self.projection {
            Projection::Perspective {
                horiz_view_angle,
                vert_view_angle,
            } => {
                *horiz_view_angle = (*horiz_view_angle / factor).min(std::f64::consts::PI);
                *vert_view_angle = (*vert_view_angle / factor).min(std::f64::consts::PI);
            }
            Projection::Orthographic {
                view_width,
                view_height,
            } => {
                *view_width /= factor;
                *view_height /= factor;
            }
        }
    }

    /// Width-to-height ratio of the projected image.
    pub fn aspect_ratio(&self) -> f64 {
        match self.projection {
            Projection::Perspective {
                horiz_view_angle,
                vert_view_angle,
            } => (horiz_view_angle / 2.0).tan() / (vert_view_angle / 2.0).tan(),
            Projection::Orthographic {
                view_width,
                view_height,
            } => view_width / view_height,
        }
    }

    /// The clip-space projection matrix.
    pub fn projection_matrix(&self) -> DMat4 {
        match self.projection {
            Projection::Perspective {
                vert_view_angle, ..
            } => DMat4::perspective_rh(
                vert_view_angle,
                self.aspect_ratio(),
                self.near_clip,
                self.far_clip,
            ),
            Projection::Orthographic {
                view_width,
                view_height,
            } => DMat4::orthographic_rh(
                -view_width / 2.0,
                view_width / 2.0,
                -view_height / 2.0,
                view_height / 2.0,
                self.near_clip,
                self.far_clip,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let camera = Camera::perspective();
        assert_eq!(camera.near_clip, 1.0);
        assert_eq!(camera.far_clip, 1000.0);
        assert!((camera.aspect_ratio() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn reshape_tracks_aspect() {
        let mut camera = Camera::perspective();
        camera.reshape(800, 400);
        let Projection::Perspective {
            horiz_view_angle,
            vert_view_angle,
        } = camera.projection
        else {
            panic!("projection kind changed");
        };
        assert!((vert_view_angle - horiz_view_angle / 2.0).abs() < 1e-9);

        let mut ortho = Camera::orthographic(10.0, 10.0);
        ortho.reshape(200, 100);
        assert!((ortho.aspect_ratio() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn reshape_ignores_degenerate_viewport() {
        let mut camera = Camera::orthographic(10.0, 5.0);
        let before = camera.projection;
        camera.reshape(0, 100);
        camera.reshape(100, -3);
        assert_eq!(camera.projection, before);
    }

    #[test]
    fn perspective_zoom_narrows_angles() {
        let mut camera = Camera::perspective();
        let before = camera.projection;
        camera.zoom(2.0);
        let (Projection::Perspective {
            horiz_view_angle, ..
        }, Projection::Perspective {
            horiz_view_angle: old,
            ..
        }) = (camera.projection, before)
        else {
            panic!("projection kind changed");
        };
        assert!(horiz_view_angle < old);
        assert!((horiz_view_angle - old / 2.0).abs() < 1e-9);
    }

    #[test]
    fn orthographic_zoom_shrinks_the_volume() {
        let mut camera = Camera::orthographic(20.0, 10.0);
        camera.zoom(4.0);
        assert_eq!(
            camera.projection,
            Projection::Orthographic {
                view_width: 5.0,
                view_height: 2.5
            }
        );
    }

    #[test]
    fn non_positive_zoom_is_ignored() {
        let mut camera = Camera::orthographic(20.0, 10.0);
        let before = camera.projection;
        camera.zoom(0.0);
        camera.zoom(-2.0);
        assert_eq!(camera.projection, before);
    }

    #[test]
    fn projection_matrices_are_finite() {
        for camera in [Camera::perspective(), Camera::orthographic(16.0, 9.0)] {
            let matrix = camera.projection_matrix();
            assert!(matrix.to_cols_array().iter().all(|v| v.is_finite()));
        }
    }
}
