//! Flocking agent state and render-time transforms.
//!
//! A boid lives in a 2D simulation space and is integrated with plain Euler
//! steps. At render time its position is embedded into the 3D scene and its
//! heading is turned into an angle/axis rotation for the agent model.

use cgmath::{Deg, InnerSpace, Matrix4, Rad, Vector2, Vector3, Zero};
use rand::Rng;

/// Model size applied to every agent unless overridden.
pub const DEFAULT_BOID_SIZE: f32 = 0.05;

/// Heading of the agent model before any rotation is applied.
const FRONT: Vector3<f32> = Vector3::new(0.0, 0.0, 1.0);

/// An autonomous 2D-moving agent rendered as an oriented 3D model.
#[derive(Clone, Debug)]
pub struct Boid {
    pub color: [f32; 3],
    pub position: Vector2<f32>,
    pub velocity: Vector2<f32>,
    pub size: f32,
}

/// Velocity with both components uniformly drawn from [-1, 1].
fn random_velocity() -> Vector2<f32> {
    let mut rng = rand::thread_rng();
    Vector2::new(rng.gen_range(-1.0f32..=1.0), rng.gen_range(-1.0f32..=1.0))
}

impl Boid {
    pub fn new(color: [f32; 3], position: Vector2<f32>, velocity: Vector2<f32>) -> Self {
        Self {
            color,
            position,
            velocity,
            size: DEFAULT_BOID_SIZE,
        }
    }

    /// Euler integration step: `position += velocity * dt`.
    pub fn update(&mut self, delta_time: f32) {
        self.position += self.velocity * delta_time;
    }

    /// Embeds the 2D simulation position into the scene's ground plane.
    pub fn position_3d(&self) -> Vector3<f32> {
        Vector3::new(self.position.x, 0.0, self.position.y)
    }

    /// Rotation turning the model heading towards the velocity direction.
    ///
    /// Returns a zero angle around the up axis when the velocity is too
    /// small to define a direction, or when it already matches the heading.
    pub fn look_at_angle_and_axis(&self) -> (Rad<f32>, Vector3<f32>) {
        let direction = Vector3::new(self.velocity.x, 0.0, self.velocity.y);
        if direction.magnitude2() <= f32::EPSILON {
            return (Rad(0.0), Vector3::unit_y());
        }
        let direction = direction.normalize();
        let angle = Rad(FRONT.dot(direction).clamp(-1.0, 1.0).acos());
        let axis = FRONT.cross(direction);
        if axis.magnitude2() <= f32::EPSILON {
            // velocity parallel to the heading, any perpendicular axis works
            return (angle, Vector3::unit_y());
        }
        (angle, axis.normalize())
    }

    /// Per-instance model matrix: translate, scale, face the velocity,
    /// then tilt the base mesh which is authored facing up.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        let (angle, axis) = self.look_at_angle_and_axis();
        Matrix4::from_translation(self.position_3d())
            * Matrix4::from_scale(self.size)
            * Matrix4::from_axis_angle(axis, angle)
            * Matrix4::from_angle_x(Deg(90.0))
    }
}

impl Default for Boid {
    fn default() -> Self {
        Self::new([0.0, 1.0, 1.0], Vector2::zero(), random_velocity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn update_integrates_position_by_velocity() {
        let mut boid = Boid::new([1.0; 3], Vector2::zero(), Vector2::new(1.0, 0.0));
        boid.update(0.5);
        assert_relative_eq!(boid.position.x, 0.5);
        assert_relative_eq!(boid.position.y, 0.0);
    }

    #[test]
    fn default_velocity_components_are_bounded() {
        for _ in 0..100 {
            let boid = Boid::default();
            assert!((-1.0..=1.0).contains(&boid.velocity.x));
            assert!((-1.0..=1.0).contains(&boid.velocity.y));
        }
    }

    #[test]
    fn look_at_rotates_heading_onto_velocity() {
        let boid = Boid::new([1.0; 3], Vector2::zero(), Vector2::new(1.0, 0.0));
        let (angle, axis) = boid.look_at_angle_and_axis();
        assert_relative_eq!(angle.0, FRAC_PI_2);
        assert_relative_eq!(axis.y, 1.0);
    }

    #[test]
    fn look_at_of_stationary_boid_is_identity_rotation() {
        let boid = Boid::new([1.0; 3], Vector2::zero(), Vector2::zero());
        let (angle, axis) = boid.look_at_angle_and_axis();
        assert_relative_eq!(angle.0, 0.0);
        assert_relative_eq!(axis.y, 1.0);
    }

    #[test]
    fn model_matrix_translates_to_embedded_position() {
        let boid = Boid::new([1.0; 3], Vector2::new(2.0, -3.0), Vector2::new(0.0, 1.0));
        let matrix = boid.model_matrix();
        assert_relative_eq!(matrix.w.x, 2.0);
        assert_relative_eq!(matrix.w.y, 0.0);
        assert_relative_eq!(matrix.w.z, -3.0);
    }
}
