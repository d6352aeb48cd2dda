//! Render context owning the GL handle and the framebuffer size.

use std::sync::Arc;

use glow::HasContext;

/// Central GPU context handed over by the host once its window and GL
/// context exist. Meshes keep a shared handle to the [`glow::Context`] so
/// their GPU resources can be released when they are dropped.
pub struct RenderContext {
    gl: Arc<glow::Context>,
    width: u32,
    height: u32,
}

impl RenderContext {
    pub fn new(gl: glow::Context, width: u32, height: u32) -> Self {
        Self {
            gl: Arc::new(gl),
            width,
            height,
        }
    }

    pub fn gl(&self) -> &Arc<glow::Context> {
        &self.gl
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Tracks the host's framebuffer size; the new size takes effect with
    /// the next [`RenderContext::begin_frame`].
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Per-frame preamble: viewport, depth test and a cleared framebuffer.
    pub fn begin_frame(&self) {
        let gl = &self.gl;
        unsafe {
            gl.viewport(0, 0, self.width as i32, self.height as i32);
            gl.enable(glow::DEPTH_TEST);
            gl.clear_color(0.06, 0.08, 0.12, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }
}
