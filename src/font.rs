//! Title font loading.
//!
//! A bold condensed DejaVu face is compiled into the binary so rendering never
//! depends on system fonts. It is parsed once on first use. Callers can swap
//! in their own TTF/OTF with [`TitleFont::from_file`].

use crate::render::RenderError;
use rusttype::{Font, Scale, point};
use std::path::Path;
use std::sync::{Arc, LazyLock};

const BUNDLED_TTF: &[u8] = include_bytes!("../fonts/DejaVuSansCondensed-Bold.ttf");
const BUNDLED_NAME: &str = "DejaVu Sans Condensed Bold";

static BUNDLED: LazyLock<Option<Arc<TitleFont>>> = LazyLock::new(|| {
    Font::try_from_bytes(BUNDLED_TTF).map(|font| {
        Arc::new(TitleFont {
            font,
            name: BUNDLED_NAME.to_string(),
        })
    })
});

/// A parsed font face used for the banner title.
pub struct TitleFont {
    font: Font<'static>,
    name: String,
}

impl std::fmt::Debug for TitleFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TitleFont").field("name", &self.name).finish()
    }
}

impl TitleFont {
    /// The font compiled into the binary.
    pub fn bundled() -> Result<Arc<TitleFont>, RenderError> {
        BUNDLED
            .clone()
            .ok_or_else(|| RenderError::InvalidFont(BUNDLED_NAME.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Arc<TitleFont>, RenderError> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_bytes(bytes, name).map(Arc::new)
    }

    pub fn from_bytes(bytes: Vec<u8>, name: impl Into<String>) -> Result<TitleFont, RenderError> {
        let name = name.into();
        let font = Font::try_from_vec(bytes).ok_or_else(|| RenderError::InvalidFont(name.clone()))?;
        Ok(TitleFont { font, name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn font(&self) -> &Font<'static> {
        &self.font
    }

    /// Natural advance width of `text` at a uniform `px` size.
    pub fn text_width(&self, text: &str, px: f32) -> f32 {
        self.font
            .layout(text, Scale::uniform(px), point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
    }
}
