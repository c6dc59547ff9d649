use std::f32::consts::PI;

use nalgebra::{Vector2, Vector3};

use crate::math::rotate;

/// Distance from the camera to the cube center at startup.
pub(crate) const CAMERA_DISTANCE: f32 = 15.0;
/// Angle added per tick while an arrow key is held, in radians.
pub(crate) const CAMERA_STEP: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Camera {
    pub(crate) position: Vector3<f32>,
    pub(crate) rotation: Vector3<f32>,
}

impl Camera {
    pub(crate) fn new(position: Vector3<f32>, rotation: Vector3<f32>) -> Self {
        Self { position, rotation }
    }

    /// Moves a world-space point into camera space.
    pub(crate) fn to_camera_space(&self, world: &Vector3<f32>) -> Vector3<f32> {
        rotate(world, &self.rotation) - self.position
    }

    /// Adds incremental pitch (x) and yaw (y) angles.
    pub(crate) fn nudge(&mut self, pitch: f32, yaw: f32) {
        self.rotation.x += pitch;
        self.rotation.y += yaw;
    }

    /// Sets absolute angles from a pointer offset, where each component of
    /// `offset` is -1 at the left/top edge of the viewport and 1 at the
    /// right/bottom edge.
    pub(crate) fn look_from_pointer(&mut self, offset: Vector2<f32>) {
        self.rotation.y = -offset.x * PI;
        self.rotation.x = offset.y * PI;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vector3::new(0.0, 0.0, -CAMERA_DISTANCE), Vector3::zeros())
    }
}

/// Screen area the cube is projected onto, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Viewport {
    pub(crate) width: f32,
    pub(crate) height: f32,
}

impl Viewport {
    pub(crate) fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Perspective-projects a camera-space point.
    ///
    /// The returned `x`/`y` are screen pixels and `z` is the camera-space
    /// depth, kept for paint ordering. A point with `z == 0` divides by zero;
    /// the camera is never placed on a cubie's depth plane.
    pub(crate) fn project(&self, point: &Vector3<f32>) -> Vector3<f32> {
        let f = (self.width + self.height) / (2.0 * point.z);
        Vector3::new(
            self.width / 2.0 + point.x * f,
            self.height / 2.0 + point.y * f,
            point.z,
        )
    }

    /// Paint-order score of a projected point. Larger means farther away.
    ///
    /// This is not a distance: it mixes the screen offset from the center with
    /// the depth, and the depth term dominates.
    pub(crate) fn depth_score(&self, projected: &Vector3<f32>) -> f32 {
        let spread = (self.width + self.height).powi(2);
        (projected.x - self.width / 2.0) * (2.0 * projected.z) / spread
            + (projected.y - self.height / 2.0) * (2.0 * projected.z) / spread
            + projected.z.powi(2)
    }

    /// Maps a position inside the viewport to an offset in [-1, 1] per axis.
    pub(crate) fn pointer_offset(&self, x: f32, y: f32) -> Vector2<f32> {
        Vector2::new(
            (x - self.width / 2.0) * 2.0 / self.width,
            (y - self.height / 2.0) * 2.0 / self.height,
        )
    }
}
