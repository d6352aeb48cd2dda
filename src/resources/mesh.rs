//! OBJ model loading into flat vertex lists.
//!
//! Faces are expanded vertex by vertex with no shared-vertex deduplication
//! and no re-triangulation: the draw path is a plain non-indexed triangle
//! draw, so the vertex list must spell out every face corner. Attributes
//! the file does not provide default to zero.

use std::io::BufRead;
use std::path::Path;

use anyhow::{Context as _, Result, bail};

use crate::mesh::ShadedVertex;

/// Faces keep their authored arity and every attribute keeps its own
/// index; points and lines have no triangle to contribute.
fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: false,
        triangulate: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Loads an OBJ file into a flat list of shaded vertices.
///
/// A missing material library is logged and tolerated; an unparsable file
/// or I/O failure is returned as an error.
pub fn load_model(obj_path: &Path) -> Result<Vec<ShadedVertex>> {
    let (models, materials) = tobj::load_obj(obj_path, &load_options()).map_err(|e| {
        log::error!("failed to parse model {}: {e}", obj_path.display());
        anyhow::Error::new(e).context(format!("while loading model {}", obj_path.display()))
    })?;
    if let Err(e) = materials {
        log::warn!("material library for {} not loaded: {e}", obj_path.display());
    }
    flatten_models(&models)
}

/// Buffer variant of [`load_model`] for in-memory OBJ data.
pub fn load_model_buf(reader: &mut impl BufRead) -> Result<Vec<ShadedVertex>> {
    let (models, materials) = tobj::load_obj_buf(reader, &load_options(), |p| tobj::load_mtl(p))
        .context("while loading model from buffer")?;
    if let Err(e) = materials {
        log::warn!("material library not loaded: {e}");
    }
    flatten_models(&models)
}

fn attribute<const N: usize>(values: &[f32], index: usize) -> Result<[f32; N]> {
    match values.get(N * index..N * index + N) {
        Some(chunk) => {
            let mut out = [0.0; N];
            out.copy_from_slice(chunk);
            Ok(out)
        }
        None => bail!("face references attribute index {index} past the end of the file"),
    }
}

/// Expands every face of every model into independent vertices, in face
/// order. Normal and texture-coordinate indices the file leaves unset
/// yield zeroed attributes.
fn flatten_models(models: &[tobj::Model]) -> Result<Vec<ShadedVertex>> {
    let mut vertices = Vec::new();
    for model in models {
        let mesh = &model.mesh;
        // triangulated input carries no arities, every face is a triangle
        let arities: Vec<u32> = if mesh.face_arities.is_empty() {
            vec![3; mesh.indices.len() / 3]
        } else {
            mesh.face_arities.clone()
        };

        let mut next = 0usize;
        for &arity in &arities {
            for v in 0..arity as usize {
                let k = next + v;
                let position = attribute::<3>(&mesh.positions, mesh.indices[k] as usize)?;
                let normal = match mesh.normal_indices.get(k) {
                    Some(&ni) => attribute::<3>(&mesh.normals, ni as usize)?,
                    None => [0.0; 3],
                };
                let tex_coords = match mesh.texcoord_indices.get(k) {
                    Some(&ti) => attribute::<2>(&mesh.texcoords, ti as usize)?,
                    None => [0.0; 2],
                };
                vertices.push(ShadedVertex {
                    position,
                    normal,
                    tex_coords,
                });
            }
            next += arity as usize;
        }
    }
    Ok(vertices)
}
