//! GPU mesh bundle: one renderable asset and everything it owns.
//!
//! A [`GpuMesh`] couples a vertex buffer, a vertex-array layout, a linked
//! shader program, an optional texture and the resolved uniform locations
//! of the fixed uniform set this pipeline uses. It is built once and never
//! mutated afterwards; dropping it releases all four GPU resources.

use std::collections::HashMap;
use std::mem;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context as _, Result, anyhow};
use cgmath::Matrix4;
use glow::HasContext;

use crate::resources::{self, shader::ShaderPaths};

const VERTEX_ATTR_POSITION: u32 = 0;
const VERTEX_ATTR_NORMAL: u32 = 1;
const VERTEX_ATTR_TEXCOORDS: u32 = 2;

/// The full uniform set resolved at construction. Names missing from a
/// linked program stay unresolved and uploads to them are no-ops.
pub const UNIFORM_NAMES: [&str; 9] = [
    "uMVPMatrix",
    "uMVMatrix",
    "uNormalMatrix",
    "uText",
    "uKd",
    "uKs",
    "uShininess",
    "uLightPos_vs",
    "uLightIntensity",
];

/// One shaded vertex as laid out in the GPU vertex buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShadedVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

/// GPU resources for one renderable asset, released together on drop.
pub struct GpuMesh {
    gl: Arc<glow::Context>,
    vbo: glow::NativeBuffer,
    vao: glow::NativeVertexArray,
    program: glow::NativeProgram,
    texture: Option<glow::NativeTexture>,
    vertices: Vec<ShadedVertex>,
    uniforms: HashMap<&'static str, Option<glow::NativeUniformLocation>>,
}

impl GpuMesh {
    /// Builds a textured mesh from an OBJ file, a texture file (empty path
    /// skips texturing) and a vertex/fragment shader source pair.
    pub fn from_obj(
        gl: Arc<glow::Context>,
        obj_path: &Path,
        texture_path: &Path,
        shaders: &ShaderPaths,
    ) -> Result<Self> {
        let vertices = resources::mesh::load_model(obj_path)?;
        let texture = resources::texture::load_texture(&gl, texture_path)?;
        let program = resources::shader::load_shader(&gl, &shaders.vertex, &shaders.fragment)?;
        Self::build(gl, program, texture, vertices)
            .with_context(|| format!("while uploading mesh {}", obj_path.display()))
    }

    /// Builds an untextured mesh from a directly supplied vertex list, for
    /// procedurally generated geometry.
    pub fn from_vertices(
        gl: Arc<glow::Context>,
        vertices: Vec<ShadedVertex>,
        shaders: &ShaderPaths,
    ) -> Result<Self> {
        let program = resources::shader::load_shader(&gl, &shaders.vertex, &shaders.fragment)?;
        Self::build(gl, program, None, vertices)
    }

    fn build(
        gl: Arc<glow::Context>,
        program: glow::NativeProgram,
        texture: Option<glow::NativeTexture>,
        vertices: Vec<ShadedVertex>,
    ) -> Result<Self> {
        let uniforms = resolve_uniforms(&gl, program);
        let (vbo, vao) = upload_vertices(&gl, &vertices)?;
        log::debug!("gpu mesh ready: {} vertices", vertices.len());
        Ok(Self {
            gl,
            vbo,
            vao,
            program,
            texture,
            vertices,
            uniforms,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Makes this mesh's program the active one for subsequent uniform
    /// uploads and draws.
    pub fn use_program(&self) {
        unsafe { self.gl.use_program(Some(self.program)) };
    }

    fn location(&self, name: &str) -> Option<&glow::NativeUniformLocation> {
        self.uniforms.get(name).and_then(Option::as_ref)
    }

    pub(crate) fn set_mat4(&self, name: &str, value: &Matrix4<f32>) {
        let slice: &[f32; 16] = value.as_ref();
        unsafe {
            self.gl
                .uniform_matrix_4_f32_slice(self.location(name), false, slice)
        };
    }

    pub(crate) fn set_vec3(&self, name: &str, value: [f32; 3]) {
        unsafe {
            self.gl
                .uniform_3_f32(self.location(name), value[0], value[1], value[2])
        };
    }

    pub(crate) fn set_f32(&self, name: &str, value: f32) {
        unsafe { self.gl.uniform_1_f32(self.location(name), value) };
    }

    pub(crate) fn set_i32(&self, name: &str, value: i32) {
        unsafe { self.gl.uniform_1_i32(self.location(name), value) };
    }

    /// Issues one non-indexed triangle draw over the full vertex list.
    ///
    /// The texture slot is bound to unit 0 unconditionally; a mesh without
    /// a texture binds the zero handle. Bindings are undone before
    /// returning so no state leaks into the next draw.
    pub fn draw(&self) {
        let gl = &self.gl;
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, self.texture);

            gl.draw_arrays(glow::TRIANGLES, 0, self.vertices.len() as i32);

            gl.bind_texture(glow::TEXTURE_2D, None);
            gl.bind_vertex_array(None);
        }
    }
}

impl Drop for GpuMesh {
    fn drop(&mut self) {
        let gl = &self.gl;
        unsafe {
            if let Some(texture) = self.texture.take() {
                gl.delete_texture(texture);
            }
            gl.delete_buffer(self.vbo);
            gl.delete_vertex_array(self.vao);
            gl.delete_program(self.program);
        }
    }
}

fn resolve_uniforms(
    gl: &glow::Context,
    program: glow::NativeProgram,
) -> HashMap<&'static str, Option<glow::NativeUniformLocation>> {
    UNIFORM_NAMES
        .iter()
        .map(|&name| {
            let location = unsafe { gl.get_uniform_location(program, name) };
            if location.is_none() {
                // tolerated: uploads to an unresolved name are no-ops
                log::debug!("uniform {name} not found in linked program");
            }
            (name, location)
        })
        .collect()
}

/// Creates the buffer and vertex-array pair, describes the three-attribute
/// layout and uploads the vertex data exactly once.
fn upload_vertices(
    gl: &glow::Context,
    vertices: &[ShadedVertex],
) -> Result<(glow::NativeBuffer, glow::NativeVertexArray)> {
    let stride = mem::size_of::<ShadedVertex>() as i32;
    unsafe {
        let vbo = gl
            .create_buffer()
            .map_err(|e| anyhow!("failed to create vertex buffer: {e}"))?;
        let vao = gl
            .create_vertex_array()
            .map_err(|e| anyhow!("failed to create vertex array: {e}"))?;

        gl.bind_vertex_array(Some(vao));
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(vertices),
            glow::STATIC_DRAW,
        );

        gl.enable_vertex_attrib_array(VERTEX_ATTR_POSITION);
        gl.vertex_attrib_pointer_f32(
            VERTEX_ATTR_POSITION,
            3,
            glow::FLOAT,
            false,
            stride,
            mem::offset_of!(ShadedVertex, position) as i32,
        );
        gl.enable_vertex_attrib_array(VERTEX_ATTR_NORMAL);
        gl.vertex_attrib_pointer_f32(
            VERTEX_ATTR_NORMAL,
            3,
            glow::FLOAT,
            false,
            stride,
            mem::offset_of!(ShadedVertex, normal) as i32,
        );
        gl.enable_vertex_attrib_array(VERTEX_ATTR_TEXCOORDS);
        gl.vertex_attrib_pointer_f32(
            VERTEX_ATTR_TEXCOORDS,
            2,
            glow::FLOAT,
            false,
            stride,
            mem::offset_of!(ShadedVertex, tex_coords) as i32,
        );

        gl.bind_buffer(glow::ARRAY_BUFFER, None);
        gl.bind_vertex_array(None);
        Ok((vbo, vao))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_matches_the_attribute_offsets() {
        assert_eq!(mem::size_of::<ShadedVertex>(), 32);
        assert_eq!(mem::offset_of!(ShadedVertex, position), 0);
        assert_eq!(mem::offset_of!(ShadedVertex, normal), 12);
        assert_eq!(mem::offset_of!(ShadedVertex, tex_coords), 24);
    }
}
