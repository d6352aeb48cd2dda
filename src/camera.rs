//! Trackball camera orbiting the scene origin.

use cgmath::{Deg, Matrix4, Vector3};

/// Orbiting camera: a distance to the origin plus two rotation angles.
///
/// The renderer only consumes [`TrackballCamera::view_matrix`]; the controls
/// are for the host's input handling.
#[derive(Clone, Copy, Debug)]
pub struct TrackballCamera {
    distance: f32,
    angle_x: Deg<f32>,
    angle_y: Deg<f32>,
}

impl TrackballCamera {
    pub fn new(distance: f32) -> Self {
        Self {
            distance,
            angle_x: Deg(0.0),
            angle_y: Deg(0.0),
        }
    }

    /// Dolly towards (positive delta) or away from the origin.
    pub fn move_front(&mut self, delta: f32) {
        self.distance -= delta;
    }

    pub fn rotate_left(&mut self, degrees: f32) {
        self.angle_y += Deg(degrees);
    }

    pub fn rotate_up(&mut self, degrees: f32) {
        self.angle_x += Deg(degrees);
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(Vector3::new(0.0, 0.0, -self.distance))
            * Matrix4::from_angle_x(self.angle_x)
            * Matrix4::from_angle_y(self.angle_y)
    }
}

impl Default for TrackballCamera {
    fn default() -> Self {
        Self::new(5.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn view_matrix_of_unrotated_camera_is_a_dolly() {
        let camera = TrackballCamera::new(5.0);
        let view = camera.view_matrix();
        assert_relative_eq!(view.w.z, -5.0);
        assert_relative_eq!(view.x.x, 1.0);
        assert_relative_eq!(view.y.y, 1.0);
    }

    #[test]
    fn move_front_shortens_the_distance() {
        let mut camera = TrackballCamera::new(5.0);
        camera.move_front(2.0);
        assert_relative_eq!(camera.view_matrix().w.z, -3.0);
    }
}
