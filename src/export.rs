//! Public entry points: resolve settings, compose a scene, hand back bytes,
//! a live surface, or a file on disk.
//!
//! Each call creates its own surface and settings. Nothing is shared between
//! calls apart from the read-only font held by the backend.

use crate::placement::{Placement, RandomSource};
use crate::render::compositor;
use crate::render::{RenderBackend, RenderError, Surface};
use crate::settings::{
    PartialBannerSettings, PartialPanelSettings, PartialPreviewSettings, resolve_banner,
    resolve_panel, resolve_preview,
};
use crate::store::{ImageSink, ImageSource};
use crate::types::Tag;
use std::path::PathBuf;

/// Render the banner (wedges, ribbon, title) and encode it as PNG.
///
/// Areas outside the banner stay transparent.
pub fn create_banner_image<B: RenderBackend>(
    backend: &B,
    title: &str,
    overrides: &PartialBannerSettings,
) -> Result<Vec<u8>, RenderError> {
    let settings = resolve_banner(overrides);
    let mut surface = backend.create_surface(settings.canvas.size)?;
    compositor::draw_banner(&mut surface, title, &settings)?;
    surface.encode_png()
}

/// Render the banner with its content panel and return the surface for
/// further drawing.
pub fn create_banner_with_background<B: RenderBackend>(
    backend: &B,
    title: &str,
    overrides: &PartialPanelSettings,
) -> Result<B::Surface, RenderError> {
    let settings = resolve_panel(overrides);
    let mut surface = backend.create_surface(settings.canvas.size)?;
    compositor::draw_banner_with_panel(&mut surface, title, &settings)?;
    Ok(surface)
}

/// Everything a preview render needs.
#[derive(Debug, Clone, Default)]
pub struct PreviewRequest {
    pub title: String,
    pub target_path: PathBuf,
    /// Photo placed between the wedges and the ribbon.
    pub content_path: Option<PathBuf>,
    /// Carried for downstream labelling; not drawn.
    pub tags: Vec<Tag>,
    pub placement: PartialPreviewSettings,
    pub banner: PartialBannerSettings,
}

impl PreviewRequest {
    pub fn new(title: impl Into<String>, target_path: impl Into<PathBuf>) -> Self {
        Self {
            title: title.into(),
            target_path: target_path.into(),
            ..Self::default()
        }
    }
}

/// Render a preview card and write it to `request.target_path`.
///
/// The content photo, when given, is decoded from `store` and placed with
/// jitter drawn from `rng`. Returns the placement used for it.
pub fn generate_preview_image<B, S, R>(
    backend: &B,
    store: &S,
    rng: &mut R,
    request: &PreviewRequest,
) -> Result<Option<Placement>, RenderError>
where
    B: RenderBackend,
    S: ImageSource + ImageSink,
    R: RandomSource,
{
    let settings = resolve_banner(&request.banner);
    let placement = resolve_preview(&request.placement);
    if !request.tags.is_empty() {
        let labels: Vec<&str> = request.tags.iter().map(|t| t.label.as_str()).collect();
        log::debug!("Preview tags: {}", labels.join(", "));
    }

    let content = request
        .content_path
        .as_deref()
        .map(|path| store.load_image(path))
        .transpose()?;

    let mut surface = backend.create_surface(settings.canvas.size)?;
    let placed = compositor::draw_preview(
        &mut surface,
        &request.title,
        &settings,
        content.as_ref(),
        &placement,
        rng,
    )?;
    let bytes = surface.encode_png()?;
    store.write(&request.target_path, &bytes)?;
    Ok(placed)
}
