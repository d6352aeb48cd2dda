//! murmuration
//!
//! A small immediate-mode OpenGL renderer for boid flocking scenes. The
//! crate loads OBJ meshes and textures into GPU-resident [`mesh::GpuMesh`]
//! bundles and draws three scene-element categories per frame: flocking
//! agents, a terrain and point-light markers, all lit by a single point
//! light. Windowing and the event loop stay with the host; it hands over a
//! ready [`glow`] context and calls the per-category render entry points
//! once per frame.
//!
//! High-level modules
//! - `boid`: the flocking agent, its Euler update and render-time transform
//! - `camera`: trackball camera producing the per-frame view matrix
//! - `context`: render context owning the GL handle and framebuffer size
//! - `geometry`: procedurally generated vertex lists (light marker sphere)
//! - `mesh`: GPU mesh bundle (buffer, vertex array, program, texture,
//!   uniform locations)
//! - `renderer`: draw orchestration and the per-category render functions
//! - `resources`: helpers to load models, textures and shader programs
//! - `scene`: positioned, scaled static scene elements
//!

pub mod boid;
pub mod camera;
pub mod context;
pub mod geometry;
pub mod mesh;
pub mod renderer;
pub mod resources;
pub mod scene;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use glow;
