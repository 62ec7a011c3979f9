use crate::capture::raster::RgbaBuffer;
use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Local;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

pub const RX_EXPORT_SUBDIR: &str = "rx_exports";
const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// PNG-encoded raster handed out of the capture surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl EncodedImage {
    pub fn is_empty(&self) -> bool {
        self.png.is_empty() || self.width == 0 || self.height == 0
    }

    pub fn to_data_url(&self) -> String {
        format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(&self.png))
    }

    pub fn from_data_url(url: &str) -> Result<Self> {
        let payload = url
            .strip_prefix(PNG_DATA_URL_PREFIX)
            .ok_or_else(|| anyhow!("not a PNG data URL"))?;
        let png = STANDARD
            .decode(payload)
            .context("decode base64 image payload")?;
        let (width, height) = image::load_from_memory_with_format(&png, image::ImageFormat::Png)
            .context("decode PNG data URL")?
            .to_rgba8()
            .dimensions();
        Ok(Self { width, height, png })
    }
}

pub fn encode_png(buffer: &RgbaBuffer) -> Result<EncodedImage> {
    let image = image::RgbaImage::from_raw(buffer.width, buffer.height, buffer.pixels.clone())
        .ok_or_else(|| anyhow!("raster size does not match its pixel data"))?;
    let mut png = Vec::new();
    image::DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut png), image::ImageOutputFormat::Png)
        .context("encode raster as PNG")?;
    Ok(EncodedImage {
        width: buffer.width,
        height: buffer.height,
        png,
    })
}

pub fn decode_png(encoded: &EncodedImage) -> Result<RgbaBuffer> {
    let decoded = image::load_from_memory_with_format(&encoded.png, image::ImageFormat::Png)
        .context("decode PNG snapshot")?
        .to_rgba8();
    let (width, height) = decoded.dimensions();
    RgbaBuffer::from_pixels(width, height, decoded.into_raw())
        .ok_or_else(|| anyhow!("decoded PNG has inconsistent pixel data"))
}

pub fn exe_relative_output_folder_from_path(exe_path: &Path) -> Result<PathBuf> {
    let parent = exe_path
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe_path.display()))?;
    Ok(parent.join(RX_EXPORT_SUBDIR))
}

pub fn default_output_folder() -> Result<PathBuf> {
    let exe_path = std::env::current_exe().context("resolve current executable")?;
    exe_relative_output_folder_from_path(&exe_path)
}

pub fn timestamped_stem(now: chrono::DateTime<Local>) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}

pub fn build_filename(stem: &str, patient_id: &str) -> String {
    format!("{}_{}_rx.png", stem, patient_id)
}

/// Writes the snapshot into `output_dir`, creating the folder when missing.
pub fn save_snapshot(
    image: &EncodedImage,
    output_dir: &Path,
    patient_id: &str,
    now: chrono::DateTime<Local>,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create export folder {}", output_dir.display()))?;
    let path = output_dir.join(build_filename(&timestamped_stem(now), patient_id));
    fs::write(&path, &image.png)
        .with_context(|| format!("write prescription snapshot {}", path.display()))?;
    tracing::info!(path = %path.display(), "prescription snapshot saved");
    Ok(path)
}
