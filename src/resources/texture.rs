//! Image decoding and GPU texture upload.

use std::path::Path;

use anyhow::{Context as _, Result, anyhow};
use glow::HasContext;
use image::RgbaImage;

/// Decodes a texture file to RGBA8 pixels.
///
/// An empty path is a valid input meaning "skip texturing" and returns
/// `None` without touching the decoder. A non-empty path that cannot be
/// read or decoded is an error.
pub fn read_texture(texture_path: &Path) -> Result<Option<RgbaImage>> {
    if texture_path.as_os_str().is_empty() {
        return Ok(None);
    }
    let image = image::open(texture_path)
        .map_err(|e| {
            log::error!("failed to load texture {}: {e}", texture_path.display());
            e
        })
        .with_context(|| format!("while loading texture {}", texture_path.display()))?;
    Ok(Some(image.to_rgba8()))
}

/// Decodes and uploads a texture, returning `None` for the empty path.
pub fn load_texture(gl: &glow::Context, texture_path: &Path) -> Result<Option<glow::NativeTexture>> {
    match read_texture(texture_path)? {
        Some(image) => Ok(Some(upload_texture(gl, &image)?)),
        None => Ok(None),
    }
}

/// Uploads RGBA8 pixels as a 2D texture with linear min/mag filtering.
/// No mipmaps; the marker and scene meshes are viewed at close range.
fn upload_texture(gl: &glow::Context, image: &RgbaImage) -> Result<glow::NativeTexture> {
    unsafe {
        let texture = gl
            .create_texture()
            .map_err(|e| anyhow!("failed to create texture: {e}"))?;
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));

        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            glow::RGBA as i32,
            image.width() as i32,
            image.height() as i32,
            0,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            glow::PixelUnpackData::Slice(Some(image.as_raw())),
        );

        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MIN_FILTER,
            glow::LINEAR as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MAG_FILTER,
            glow::LINEAR as i32,
        );

        gl.bind_texture(glow::TEXTURE_2D, None);
        Ok(texture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_is_the_no_texture_sentinel() {
        let result = read_texture(Path::new("")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(read_texture(Path::new("does/not/exist.png")).is_err());
    }

    #[test]
    fn undecodable_bytes_are_an_error() {
        let path = std::env::temp_dir().join("murmuration_not_an_image.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(read_texture(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
