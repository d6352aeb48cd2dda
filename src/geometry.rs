//! Procedurally generated vertex lists.
//!
//! Only the UV sphere used as the point-light marker lives here; everything
//! else comes from OBJ files through [`crate::resources`].

use std::f32::consts::PI;

use crate::mesh::ShadedVertex;

/// Non-indexed triangle list for a UV sphere centered on the origin.
///
/// `latitude_bands` x `longitude_bands` quads, two triangles each, so the
/// result holds exactly `latitude_bands * longitude_bands * 6` vertices.
/// Normals are the unit radial directions, texture coordinates follow the
/// spherical parametrization.
pub fn sphere_vertices(radius: f32, latitude_bands: u32, longitude_bands: u32) -> Vec<ShadedVertex> {
    let mut grid = Vec::with_capacity(((latitude_bands + 1) * (longitude_bands + 1)) as usize);
    for i in 0..=latitude_bands {
        let theta = PI * i as f32 / latitude_bands as f32;
        for j in 0..=longitude_bands {
            let phi = 2.0 * PI * j as f32 / longitude_bands as f32;
            let normal = [theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin()];
            grid.push(ShadedVertex {
                position: [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                normal,
                tex_coords: [
                    j as f32 / longitude_bands as f32,
                    i as f32 / latitude_bands as f32,
                ],
            });
        }
    }

    let row = longitude_bands + 1;
    let mut vertices = Vec::with_capacity((latitude_bands * longitude_bands * 6) as usize);
    for i in 0..latitude_bands {
        for j in 0..longitude_bands {
            let a = (i * row + j) as usize;
            let b = a + 1;
            let c = a + row as usize;
            let d = c + 1;
            vertices.extend([grid[a], grid[c], grid[b], grid[b], grid[c], grid[d]]);
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sphere_vertex_count_is_six_per_band_quad() {
        let vertices = sphere_vertices(1.0, 10, 10);
        assert_eq!(vertices.len(), 10 * 10 * 6);
    }

    #[test]
    fn sphere_vertices_lie_on_the_radius_with_unit_normals() {
        for vertex in sphere_vertices(2.0, 4, 6) {
            let [x, y, z] = vertex.position;
            assert_relative_eq!((x * x + y * y + z * z).sqrt(), 2.0, epsilon = 1e-5);
            let [nx, ny, nz] = vertex.normal;
            assert_relative_eq!((nx * nx + ny * ny + nz * nz).sqrt(), 1.0, epsilon = 1e-5);
        }
    }
}
