/**
 * This module contains all logic for loading meshes/textures/shaders from
 * external files. Every loader returns a `Result` so failures stay
 * recoverable at this boundary; hosts of this crate are expected to treat
 * a failed asset load as fatal, since a missing mesh or texture has no
 * safe rendering fallback.
 */
pub mod mesh;
pub mod shader;
pub mod texture;

pub use mesh::{load_model, load_model_buf};
pub use shader::{ShaderPaths, load_shader};
pub use texture::{load_texture, read_texture};
