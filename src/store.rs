//! Loading content photos and persisting encoded images.
//!
//! The export functions take these as traits so tests can run without
//! touching the filesystem.

use crate::render::RenderError;
use image::{ImageReader, RgbaImage};
use std::fs;
use std::path::Path;

/// Decodes a content image.
pub trait ImageSource {
    fn load_image(&self, path: &Path) -> Result<RgbaImage, RenderError>;
}

/// Persists encoded bytes.
pub trait ImageSink {
    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), RenderError>;
}

/// Plain filesystem store.
///
/// Decodes JPEG, PNG, TIFF and WebP, sniffing the format from the file
/// contents rather than the extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStore;

impl ImageSource for FsStore {
    fn load_image(&self, path: &Path) -> Result<RgbaImage, RenderError> {
        let decode_err = |message: String| RenderError::Decode {
            path: path.to_path_buf(),
            message,
        };
        let image = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| decode_err(e.to_string()))?;
        log::debug!(
            "Decoded {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(image.to_rgba8())
    }
}

impl ImageSink for FsStore {
    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), RenderError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)?;
        log::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}
