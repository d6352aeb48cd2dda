//! Shader program compilation and linking.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, anyhow, bail};
use glow::HasContext;

/// Source file pair for one program: vertex stage plus fragment stage.
#[derive(Clone, Debug)]
pub struct ShaderPaths {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

impl ShaderPaths {
    pub fn new(vertex: impl Into<PathBuf>, fragment: impl Into<PathBuf>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }
}

/// Reads, compiles and links a vertex/fragment source file pair.
pub fn load_shader(
    gl: &glow::Context,
    vertex_path: &Path,
    fragment_path: &Path,
) -> Result<glow::NativeProgram> {
    let vertex_source = fs::read_to_string(vertex_path)
        .with_context(|| format!("while reading vertex shader {}", vertex_path.display()))?;
    let fragment_source = fs::read_to_string(fragment_path)
        .with_context(|| format!("while reading fragment shader {}", fragment_path.display()))?;
    link_program(gl, &vertex_source, &fragment_source)
        .with_context(|| format!("while building shader program {}", fragment_path.display()))
}

/// Compiles both stages and links them into one program. Compile and link
/// failures surface the driver's info log.
pub fn link_program(
    gl: &glow::Context,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<glow::NativeProgram> {
    unsafe {
        let program = gl
            .create_program()
            .map_err(|e| anyhow!("failed to create program: {e}"))?;

        let vertex = match compile_stage(gl, glow::VERTEX_SHADER, vertex_source) {
            Ok(shader) => shader,
            Err(e) => {
                gl.delete_program(program);
                return Err(e.context("in the vertex stage"));
            }
        };
        let fragment = match compile_stage(gl, glow::FRAGMENT_SHADER, fragment_source) {
            Ok(shader) => shader,
            Err(e) => {
                gl.delete_shader(vertex);
                gl.delete_program(program);
                return Err(e.context("in the fragment stage"));
            }
        };

        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);

        gl.detach_shader(program, vertex);
        gl.detach_shader(program, fragment);
        gl.delete_shader(vertex);
        gl.delete_shader(fragment);

        if !gl.get_program_link_status(program) {
            let info_log = gl.get_program_info_log(program);
            gl.delete_program(program);
            bail!("program link failed: {info_log}");
        }

        Ok(program)
    }
}

unsafe fn compile_stage(
    gl: &glow::Context,
    stage: u32,
    source: &str,
) -> Result<glow::NativeShader> {
    unsafe {
        let shader = gl
            .create_shader(stage)
            .map_err(|e| anyhow!("failed to create shader: {e}"))?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let info_log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            log::error!("shader compile failed: {info_log}");
            bail!("shader compile failed: {info_log}");
        }
        Ok(shader)
    }
}
