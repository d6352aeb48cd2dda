//! Static scene elements: positioned, scaled objects without rotation.
//!
//! Used for the terrain and for point-light markers. Lights reuse the same
//! type since a light in this renderer is just a positioned marker whose
//! position feeds the lighting uniforms.

use cgmath::{Matrix4, Vector3, Zero};

/// A lightweight transform for terrain and point-light instances.
#[derive(Clone, Copy, Debug)]
pub struct SceneElement {
    pub position: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl SceneElement {
    pub fn new(position: Vector3<f32>, scale: Vector3<f32>) -> Self {
        Self { position, scale }
    }

    /// Model matrix: translate to position, then apply the per-axis scale.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

impl Default for SceneElement {
    fn default() -> Self {
        Self {
            position: Vector3::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn model_matrix_composes_translation_and_scale() {
        let element = SceneElement::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(2.0, 4.0, 8.0));
        let matrix = element.model_matrix();
        assert_relative_eq!(matrix.w.x, 1.0);
        assert_relative_eq!(matrix.w.y, 2.0);
        assert_relative_eq!(matrix.w.z, 3.0);
        assert_relative_eq!(matrix.x.x, 2.0);
        assert_relative_eq!(matrix.y.y, 4.0);
        assert_relative_eq!(matrix.z.z, 8.0);
    }
}
