//! Layered composition of the banner scene.
//!
//! Every scene is drawn in one fixed z-order:
//!
//! 1. flat background (`colours.bg`, preview only)
//! 2. two wedges behind the ribbon (`colours.banner_bg`)
//! 3. content panel (`colours.box_bg`, panel) or content photo (preview)
//! 4. the ribbon itself (`colours.banner_fg`)
//! 5. the title (`colours.text`)
//!
//! The ribbon goes down after the wedges and the panel so its edges mask
//! theirs. Reordering 2-4 changes the picture.

use super::path::{Path, Transform2D};
use super::surface::{RenderError, Surface, TextStyle};
use crate::geometry::{WedgePoints, banner_corners, panel_corners, title_layout, wedge_points};
use crate::placement::{Placement, RandomSource, plan_placement};
use crate::settings::{BannerSettings, BannerShape, PanelSettings, PreviewSettings};
use crate::types::{Colour, Corners, Point, Size};
use image::RgbaImage;

/// Result type for compositing.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Fill the closed polygon through `points` in order.
pub fn fill_polygon<S: Surface>(surface: &mut S, points: &[Point], colour: &Colour) -> Result<()> {
    match Path::closed(points) {
        Some(path) => surface.fill_path(&path, colour),
        None => Ok(()),
    }
}

/// Layer 1: cover the whole surface.
pub fn draw_background<S: Surface>(surface: &mut S, colour: &Colour) -> Result<()> {
    let size = surface.size();
    surface.fill_rect(Point::default(), size, colour)
}

/// Layer 2: `(tl, left, bl)` and `(br, right, tr)`.
pub fn draw_banner_background<S: Surface>(
    surface: &mut S,
    banner: &Corners,
    wedges: &WedgePoints,
    colour: &Colour,
) -> Result<()> {
    fill_polygon(
        surface,
        &[banner.top_left, wedges.left, banner.bottom_left],
        colour,
    )?;
    fill_polygon(
        surface,
        &[banner.bottom_right, wedges.right, banner.top_right],
        colour,
    )
}

/// Layer 3 (panel): `(tl, bl, br, tr)` of the panel.
pub fn draw_content_panel<S: Surface>(surface: &mut S, panel: &Corners, colour: &Colour) -> Result<()> {
    fill_polygon(
        surface,
        &[
            panel.top_left,
            panel.bottom_left,
            panel.bottom_right,
            panel.top_right,
        ],
        colour,
    )
}

/// Layer 4: `(tl, tr, br, bl)` of the ribbon.
pub fn draw_banner_foreground<S: Surface>(
    surface: &mut S,
    banner: &Corners,
    colour: &Colour,
) -> Result<()> {
    fill_polygon(
        surface,
        &[
            banner.top_left,
            banner.top_right,
            banner.bottom_right,
            banner.bottom_left,
        ],
        colour,
    )
}

/// Layer 5: the title, centred on the slanted ribbon.
pub fn draw_title<S: Surface>(
    surface: &mut S,
    title: &str,
    shape: &BannerShape,
    colour: &Colour,
) -> Result<()> {
    let layout = title_layout(shape);
    let style = TextStyle {
        colour: colour.clone(),
        font_px: layout.font_px,
        max_width: layout.max_width,
    };
    surface.fill_text(title, layout.anchor, &style)
}

/// Layer 3 (preview): place `image` on the surface.
///
/// The image is drawn centred on the planned position and rotated about it.
/// The transform exists only for this one draw call.
pub fn draw_content_image<S: Surface>(
    surface: &mut S,
    image: &RgbaImage,
    settings: &PreviewSettings,
    rng: &mut impl RandomSource,
) -> Result<Placement> {
    let (iw, ih) = image.dimensions();
    let placement = plan_placement(
        Size::new(iw as f32, ih as f32),
        surface.size(),
        settings,
        rng,
    );
    log::debug!(
        "Placing {iw}x{ih} content at ({:.1}, {:.1}) size {:.1}x{:.1} angle {:.2}deg",
        placement.position.x,
        placement.position.y,
        placement.size.width,
        placement.size.height,
        placement.angle.to_degrees()
    );

    let transform = Transform2D::identity()
        .translate(placement.position.x, placement.position.y)
        .rotate(placement.angle);
    let origin = Point::new(-placement.size.width / 2.0, -placement.size.height / 2.0);
    surface.draw_image(image, origin, placement.size, &transform)?;
    Ok(placement)
}

/// Layers 2, 4 and 5.
pub fn draw_banner<S: Surface>(surface: &mut S, title: &str, settings: &BannerSettings) -> Result<()> {
    let corners = banner_corners(&settings.banner);
    let wedges = wedge_points(&corners, settings.banner.point_offset);
    let colours = &settings.colours;

    draw_banner_background(surface, &corners, &wedges, &colours.banner_bg)?;
    draw_banner_foreground(surface, &corners, &colours.banner_fg)?;
    draw_title(surface, title, &settings.banner, &colours.text)
}

/// Layers 2, 3 (panel), 4 and 5.
pub fn draw_banner_with_panel<S: Surface>(
    surface: &mut S,
    title: &str,
    settings: &PanelSettings,
) -> Result<()> {
    let corners = banner_corners(&settings.banner);
    let wedges = wedge_points(&corners, settings.banner.point_offset);
    let panel = panel_corners(&corners, &settings.content);
    let colours = &settings.colours;

    draw_banner_background(surface, &corners, &wedges, &colours.banner_bg)?;
    draw_content_panel(surface, &panel, &colours.box_bg)?;
    draw_banner_foreground(surface, &corners, &colours.banner_fg)?;
    draw_title(surface, title, &settings.banner, &colours.text)
}

/// Layers 1, 2, 3 (photo, when given), 4 and 5.
///
/// Returns the placement used for the photo, if one was drawn.
pub fn draw_preview<S: Surface>(
    surface: &mut S,
    title: &str,
    settings: &BannerSettings,
    content: Option<&RgbaImage>,
    placement: &PreviewSettings,
    rng: &mut impl RandomSource,
) -> Result<Option<Placement>> {
    let corners = banner_corners(&settings.banner);
    let wedges = wedge_points(&corners, settings.banner.point_offset);
    let colours = &settings.colours;

    draw_background(surface, &colours.bg)?;
    draw_banner_background(surface, &corners, &wedges, &colours.banner_bg)?;
    let placed = match content {
        Some(image) => Some(draw_content_image(surface, image, placement, rng)?),
        None => None,
    };
    draw_banner_foreground(surface, &corners, &colours.banner_fg)?;
    draw_title(surface, title, &settings.banner, &colours.text)?;
    Ok(placed)
}
