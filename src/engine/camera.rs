//! Camera for the demo scenes.
//!
//! Produces the view and projection matrices uploaded each frame. All
//! angles are in degrees, matching the math module's convention.

use crate::engine::math::{Matrix4, Vector3};

/// A perspective camera described by a world-space position and Euler
/// rotation angles.
///
/// The view transform translates the world by the negated eye position and
/// then rotates around x, then y, then z (see [`Matrix4::camera`]); the
/// projection uses the engine's frustum formula (see
/// [`Matrix4::perspective`]). Both matrices are rebuilt on demand — they are
/// cheap enough to recompute every frame.
///
/// # Example
/// ```no_run
/// let mut camera = Camera::new(90.0, 16.0 / 9.0);
/// camera.set_position([0.0, 1.0, 5.0]);
/// let view = camera.view_matrix();
/// let projection = camera.projection_matrix();
/// ```
#[derive(Debug, Clone)]
pub struct Camera {
    /// The camera's world-space position.
    pub position: [f32; 3],

    /// Euler rotation angles in degrees, applied in x, then y, then z order.
    pub rotation: [f32; 3],

    /// Horizontal field of view in degrees.
    pub fov_x: f32,

    /// Vertical field of view in degrees.
    pub fov_y: f32,

    /// Distance to the near clipping plane.
    pub near: f32,

    /// Distance to the far clipping plane.
    pub far: f32,
}

impl Camera {
    /// Creates a camera with the given horizontal field of view (degrees)
    /// and viewport aspect ratio (width / height).
    ///
    /// The vertical field of view is derived as `fov_x * aspect`, the way
    /// the demo scenes have always set up their frusta. Near/far default to
    /// 0.1 / 100.0.
    pub fn new(fov_x: f32, aspect: f32) -> Self {
        Self {
            position: [0.0, 0.0, 5.0],
            rotation: [0.0, 0.0, 0.0],
            fov_x,
            fov_y: fov_x * aspect,
            near: 0.1,
            far: 100.0,
        }
    }

    /// Updates the camera's world-space position `[x, y, z]`.
    pub fn set_position(&mut self, pos: [f32; 3]) {
        self.position = pos;
    }

    /// Updates the Euler rotation angles `[x, y, z]`, in degrees.
    pub fn set_rotation(&mut self, rot: [f32; 3]) {
        self.rotation = rot;
    }

    /// Sets the near and far clipping planes.
    pub fn set_near_far(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
    }

    /// Sets the horizontal field of view in degrees, re-deriving the
    /// vertical one from the aspect ratio.
    pub fn set_fov(&mut self, fov_x: f32, aspect: f32) {
        self.fov_x = fov_x;
        self.fov_y = fov_x * aspect;
    }

    /// Computes the view matrix from the camera's position and rotation.
    ///
    /// World-space coordinates multiplied by this matrix end up in eye
    /// space, with the camera at the origin looking down -z.
    pub fn view_matrix(&self) -> Matrix4 {
        Matrix4::camera(
            self.position[0],
            self.position[1],
            self.position[2],
            self.rotation[0],
            self.rotation[1],
            self.rotation[2],
        )
    }

    /// Computes a view matrix aiming the camera at `target` from its
    /// current position, ignoring the stored rotation angles.
    pub fn look_at(&self, target: Vector3, up: Vector3) -> Matrix4 {
        Matrix4::look_at(Vector3::from(self.position), target, up)
    }

    /// Computes the perspective projection matrix.
    pub fn projection_matrix(&self) -> Matrix4 {
        Matrix4::perspective(self.fov_x, self.fov_y, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrotated_view_is_a_translation() {
        let mut camera = Camera::new(90.0, 1.0);
        camera.set_position([0.0, 0.0, 5.0]);
        let p = camera.view_matrix().transform([0.0, 0.0, 0.0, 1.0]);
        assert!((p[2] + 5.0).abs() < 1e-5);
    }

    #[test]
    fn projection_uses_degree_fovs() {
        let camera = Camera::new(90.0, 1.0);
        let expected = Matrix4::perspective(90.0, 90.0, 0.1, 100.0);
        assert_eq!(camera.projection_matrix(), expected);
    }

    #[test]
    fn look_at_targets_the_point() {
        let mut camera = Camera::new(90.0, 1.0);
        camera.set_position([0.0, 0.0, 5.0]);
        let view = camera.look_at(Vector3::zero(), Vector3::new(0.0, 1.0, 0.0));
        let p = view.transform([0.0, 0.0, 0.0, 1.0]);
        assert!((p[2] + 5.0).abs() < 1e-4);
    }
}
