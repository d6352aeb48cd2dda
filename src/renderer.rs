//! Draw orchestration for the three scene-element categories.
//!
//! The [`Renderer`] owns one [`GpuMesh`] per category (agents, terrain,
//! light marker) and exposes one synchronous render entry point for each.
//! Every entry point computes the shared projection/view pair once, builds
//! a per-instance model matrix and hands off to [`finalize_rendering`]
//! which uploads the uniforms and issues the draw call.

use std::path::PathBuf;

use anyhow::Result;
use cgmath::{Deg, Matrix, Matrix4, SquareMatrix, Vector3, Zero, perspective};

use crate::boid::Boid;
use crate::camera::TrackballCamera;
use crate::context::RenderContext;
use crate::geometry;
use crate::mesh::GpuMesh;
use crate::resources::shader::ShaderPaths;
use crate::scene::SceneElement;

const FIELD_OF_VIEW: Deg<f32> = Deg(70.0);
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.0;

// Material is a fixed constant in this renderer, not configurable.
const DIFFUSE_REFLECTANCE: [f32; 3] = [0.95, 0.95, 0.95];
const SPECULAR_REFLECTANCE: [f32; 3] = [0.95, 0.95, 0.95];
const SHININESS: f32 = 100.0;
const LIGHT_INTENSITY: [f32; 3] = [1.0, 1.0, 1.0];
const TEXTURE_UNIT: i32 = 0;

const LIGHT_MARKER_BANDS: u32 = 10;

/// Asset paths the renderer loads at construction.
#[derive(Clone, Debug)]
pub struct RendererAssets {
    pub boid_model: PathBuf,
    pub boid_texture: PathBuf,
    pub terrain_model: PathBuf,
    pub terrain_texture: PathBuf,
    /// Shaders for the textured scene meshes (boids and terrain).
    pub scene_shaders: ShaderPaths,
    /// Shaders for the untextured light marker.
    pub marker_shaders: ShaderPaths,
}

impl Default for RendererAssets {
    fn default() -> Self {
        Self {
            boid_model: "assets/models/boid.obj".into(),
            boid_texture: "assets/textures/boid.jpg".into(),
            terrain_model: "assets/models/terrain.obj".into(),
            terrain_texture: "assets/textures/terrain.png".into(),
            scene_shaders: ShaderPaths::new(
                "assets/shaders/3d.vs.glsl",
                "assets/shaders/point_light.fs.glsl",
            ),
            marker_shaders: ShaderPaths::new(
                "assets/shaders/3d.vs.glsl",
                "assets/shaders/normals.fs.glsl",
            ),
        }
    }
}

/// Per-draw uniform values, computed before any GL call is made.
///
/// Only the first element of the light list feeds the lighting uniforms;
/// further lights are ignored. An empty list falls back to a light at the
/// origin so a draw without lights stays well defined.
#[derive(Clone, Copy, Debug)]
pub struct DrawUniforms {
    pub mvp: Matrix4<f32>,
    pub model_view: Matrix4<f32>,
    pub normal: Matrix4<f32>,
    pub light_position_vs: Vector3<f32>,
}

impl DrawUniforms {
    pub fn new(
        projection: &Matrix4<f32>,
        view: &Matrix4<f32>,
        model: &Matrix4<f32>,
        lights: &[SceneElement],
    ) -> Self {
        let model_view = view * model;
        // transpose of the inverse keeps normals correct under
        // non-uniform scale
        let normal = model_view
            .invert()
            .unwrap_or_else(Matrix4::identity)
            .transpose();
        let mvp = projection * view * model;

        let light_position = lights
            .first()
            .map(|light| light.position)
            .unwrap_or_else(Vector3::zero);
        let light_position_vs = (view * light_position.extend(1.0)).truncate();

        Self {
            mvp,
            model_view,
            normal,
            light_position_vs,
        }
    }
}

/// Owns the three GPU meshes and issues all draw calls.
pub struct Renderer {
    boids_mesh: GpuMesh,
    terrain_mesh: GpuMesh,
    point_light_mesh: GpuMesh,
}

impl Renderer {
    /// Loads all three meshes. Any asset failure is returned; there is no
    /// partial fallback, hosts are expected to treat this as fatal.
    pub fn new(ctx: &RenderContext, assets: &RendererAssets) -> Result<Self> {
        let boids_mesh = GpuMesh::from_obj(
            ctx.gl().clone(),
            &assets.boid_model,
            &assets.boid_texture,
            &assets.scene_shaders,
        )?;
        let terrain_mesh = GpuMesh::from_obj(
            ctx.gl().clone(),
            &assets.terrain_model,
            &assets.terrain_texture,
            &assets.scene_shaders,
        )?;
        let point_light_mesh = GpuMesh::from_vertices(
            ctx.gl().clone(),
            geometry::sphere_vertices(1.0, LIGHT_MARKER_BANDS, LIGHT_MARKER_BANDS),
            &assets.marker_shaders,
        )?;
        Ok(Self {
            boids_mesh,
            terrain_mesh,
            point_light_mesh,
        })
    }

    /// Draws every agent, oriented along its velocity.
    pub fn render_boids(
        &self,
        ctx: &RenderContext,
        camera: &TrackballCamera,
        boids: &[Boid],
        lights: &[SceneElement],
    ) {
        self.boids_mesh.use_program();
        let (projection, view) = setup_view_projection(ctx, camera);
        for boid in boids {
            finalize_rendering(&self.boids_mesh, lights, &projection, &view, &boid.model_matrix());
        }
    }

    /// Draws the terrain once.
    pub fn render_terrain(
        &self,
        ctx: &RenderContext,
        camera: &TrackballCamera,
        terrain: &SceneElement,
        lights: &[SceneElement],
    ) {
        self.terrain_mesh.use_program();
        let (projection, view) = setup_view_projection(ctx, camera);
        finalize_rendering(
            &self.terrain_mesh,
            lights,
            &projection,
            &view,
            &terrain.model_matrix(),
        );
    }

    /// Draws one marker per light. Each marker is still lit by light
    /// index 0 only, the same single-light rule as every other draw.
    pub fn render_point_light(
        &self,
        ctx: &RenderContext,
        camera: &TrackballCamera,
        lights: &[SceneElement],
    ) {
        self.point_light_mesh.use_program();
        let (projection, view) = setup_view_projection(ctx, camera);
        for light in lights {
            finalize_rendering(
                &self.point_light_mesh,
                lights,
                &projection,
                &view,
                &light.model_matrix(),
            );
        }
    }
}

/// Shared projection/view pair, computed once per category.
fn setup_view_projection(
    ctx: &RenderContext,
    camera: &TrackballCamera,
) -> (Matrix4<f32>, Matrix4<f32>) {
    let projection = perspective(FIELD_OF_VIEW, ctx.aspect_ratio(), Z_NEAR, Z_FAR);
    (projection, camera.view_matrix())
}

/// Uploads the full cached uniform set for one instance and draws it.
fn finalize_rendering(
    mesh: &GpuMesh,
    lights: &[SceneElement],
    projection: &Matrix4<f32>,
    view: &Matrix4<f32>,
    model: &Matrix4<f32>,
) {
    let uniforms = DrawUniforms::new(projection, view, model, lights);

    mesh.set_mat4("uMVPMatrix", &uniforms.mvp);
    mesh.set_mat4("uMVMatrix", &uniforms.model_view);
    mesh.set_mat4("uNormalMatrix", &uniforms.normal);

    mesh.set_i32("uText", TEXTURE_UNIT);

    mesh.set_vec3("uKd", DIFFUSE_REFLECTANCE);
    mesh.set_vec3("uKs", SPECULAR_REFLECTANCE);
    mesh.set_f32("uShininess", SHININESS);

    mesh.set_vec3("uLightPos_vs", uniforms.light_position_vs.into());
    mesh.set_vec3("uLightIntensity", LIGHT_INTENSITY);

    mesh.draw();
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::{EuclideanSpace, Point3, Vector4};

    fn sample_view() -> Matrix4<f32> {
        Matrix4::look_at_rh(
            Point3::new(0.0, 2.0, 5.0),
            Point3::origin(),
            Vector3::unit_y(),
        )
    }

    fn assert_vec4_eq(actual: Vector4<f32>, expected: Vector4<f32>) {
        assert_relative_eq!(actual.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(actual.y, expected.y, epsilon = 1e-5);
        assert_relative_eq!(actual.z, expected.z, epsilon = 1e-5);
        assert_relative_eq!(actual.w, expected.w, epsilon = 1e-5);
    }

    fn assert_vec3_eq(actual: Vector3<f32>, expected: Vector3<f32>) {
        assert_relative_eq!(actual.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(actual.y, expected.y, epsilon = 1e-5);
        assert_relative_eq!(actual.z, expected.z, epsilon = 1e-5);
    }

    #[test]
    fn mvp_is_projection_view_model_in_that_order() {
        let projection = perspective(Deg(70.0), 16.0 / 9.0, 0.1, 100.0);
        let view = sample_view();
        let model = Matrix4::from_translation(Vector3::new(1.0, 0.0, 0.0));
        let uniforms = DrawUniforms::new(&projection, &view, &model, &[]);

        let expected = projection * view * model;
        let sample = Vector4::new(0.3, -0.2, 0.7, 1.0);
        assert_vec4_eq(uniforms.mvp * sample, expected * sample);
    }

    #[test]
    fn normal_matrix_is_inverse_transpose_of_model_view() {
        let projection = Matrix4::identity();
        let view = sample_view();
        let model = Matrix4::from_nonuniform_scale(2.0, 1.0, 0.5);
        let uniforms = DrawUniforms::new(&projection, &view, &model, &[]);

        let expected = (view * model).invert().unwrap().transpose();
        let sample = Vector4::new(0.0, 1.0, 0.0, 0.0);
        assert_vec4_eq(uniforms.normal * sample, expected * sample);
    }

    #[test]
    fn only_the_first_light_feeds_the_lighting_uniforms() {
        let view = Matrix4::identity();
        let lights = [
            SceneElement::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(1.0, 1.0, 1.0)),
            SceneElement::new(Vector3::new(-9.0, -9.0, -9.0), Vector3::new(1.0, 1.0, 1.0)),
        ];
        let uniforms =
            DrawUniforms::new(&Matrix4::identity(), &view, &Matrix4::identity(), &lights);
        assert_vec3_eq(uniforms.light_position_vs, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn light_position_is_transformed_into_view_space() {
        let view = Matrix4::from_translation(Vector3::new(0.0, 0.0, -5.0));
        let lights = [SceneElement::new(
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
        )];
        let uniforms =
            DrawUniforms::new(&Matrix4::identity(), &view, &Matrix4::identity(), &lights);
        assert_vec3_eq(uniforms.light_position_vs, Vector3::new(0.0, 1.0, -5.0));
    }

    #[test]
    fn empty_light_list_falls_back_to_the_origin() {
        let uniforms = DrawUniforms::new(
            &Matrix4::identity(),
            &Matrix4::identity(),
            &Matrix4::identity(),
            &[],
        );
        assert_vec3_eq(uniforms.light_position_vs, Vector3::zero());
    }
}
