use anyhow::{Context, Result};
use base64::{engine::general_purpose, Engine as _};
use chrono::Local;
use std::io::Cursor;

use crate::surface::Surface;

/// The artifact format is a fixed contract with the upload collaborator:
/// lossy raster at a fixed quality factor.
pub const EXPORT_MIME: &str = "image/jpeg";
pub const EXPORT_QUALITY: u8 = 90;

/// An encoded snapshot of the surface. Produced on demand; the core keeps no
/// copy, ownership moves to the caller with the return value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedArtifact {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
}

impl ExportedArtifact {
    /// The embeddable `data:` URL form the upload collaborator consumes.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime,
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

/// Encode the surface's current pixels. Strokes render synchronously, so the
/// snapshot always matches what the user sees at the moment of the call. The
/// surface is not touched; on failure a retry is valid.
pub fn export_surface(surface: &Surface) -> Result<ExportedArtifact> {
    let (width, height) = surface.physical_size();
    let rgba = image::RgbaImage::from_raw(width, height, surface.buffer().pixels.clone())
        .context("surface buffer does not match its dimensions")?;
    let rgb = image::DynamicImage::ImageRgba8(rgba).to_rgb8();

    let mut encoded = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(rgb)
        .write_to(
            &mut encoded,
            image::ImageOutputFormat::Jpeg(EXPORT_QUALITY),
        )
        .context("encode surface snapshot as jpeg")?;

    Ok(ExportedArtifact {
        bytes: encoded.into_inner(),
        mime: EXPORT_MIME,
    })
}

pub fn timestamped_stem(now: chrono::DateTime<Local>) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}

pub fn build_filename(stem: &str) -> String {
    format!("note_{}.jpg", stem)
}

/// Filename for collaborators that attach the artifact as a multipart file.
pub fn suggested_filename() -> String {
    build_filename(&timestamped_stem(Local::now()))
}
