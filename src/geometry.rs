//! Pure corner calculations for the banner, its wedges and the content panel.
//!
//! All functions here are pure and testable without a drawing surface.
//! Nothing is clipped against the canvas; shapes that run off the edge are
//! clipped by the rasterizer.

use crate::settings::{BannerShape, ContentShape};
use crate::types::{Corners, Point};

/// Tips of the two decorative wedges behind the ribbon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WedgePoints {
    /// Pulled right and up from the ribbon's top-left corner.
    pub left: Point,
    /// Pulled left and down from the ribbon's bottom-right corner.
    pub right: Point,
}

/// Where and how large the title is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleLayout {
    /// Centre of the text, both axes.
    pub anchor: Point,
    pub font_px: f32,
    pub max_width: f32,
}

/// Title font size relative to the ribbon height.
pub const TITLE_SCALE: f32 = 1.1;

/// Calculate the ribbon's corners.
///
/// The bottom edge is shifted right by `slant`, producing a parallelogram:
///
/// ```text
/// tl ─────────────── tr
///   \                 \
///    bl ─────────────── br
/// ```
///
/// # Examples
/// ```
/// # use bannergen::geometry::banner_corners;
/// # use bannergen::settings::BannerShape;
/// let corners = banner_corners(&BannerShape::default());
/// assert_eq!((corners.top_left.x, corners.top_left.y), (96.0, 696.0));
/// assert_eq!((corners.bottom_right.x, corners.bottom_right.y), (1824.0, 888.0));
/// ```
pub fn banner_corners(shape: &BannerShape) -> Corners {
    let Point { x: ox, y: oy } = shape.offset;
    let (w, h, s) = (shape.size.width, shape.size.height, shape.slant);

    Corners {
        top_left: Point::new(ox, oy),
        top_right: Point::new(ox + w, oy),
        bottom_left: Point::new(ox + s, oy + h),
        bottom_right: Point::new(ox + w + s, oy + h),
    }
}

/// Calculate the wedge tips from the ribbon corners and `point_offset`.
pub fn wedge_points(corners: &Corners, point_offset: Point) -> WedgePoints {
    WedgePoints {
        left: Point::new(
            corners.top_left.x + point_offset.x,
            corners.top_left.y - point_offset.y,
        ),
        right: Point::new(
            corners.bottom_right.x - point_offset.x,
            corners.bottom_right.y + point_offset.y,
        ),
    }
}

/// Calculate the content panel's corners.
///
/// The panel hangs from the ribbon's bottom-left corner, moved by
/// `content.offset`. Its top-right and both bottom corners share one `y`, so
/// with the default slant it reads as a trapezoid tucked under the ribbon.
pub fn panel_corners(banner: &Corners, content: &ContentShape) -> Corners {
    let top_left = banner.bottom_left + content.offset;
    let bottom_left = top_left.offset(content.slant, content.size.height);
    let top_right = top_left.offset(content.size.width, content.size.height);
    let bottom_right = top_right.offset(-content.slant, 0.0);

    Corners {
        top_left,
        top_right,
        bottom_left,
        bottom_right,
    }
}

/// Centre the title on the ribbon, accounting for the slant.
pub fn title_layout(shape: &BannerShape) -> TitleLayout {
    TitleLayout {
        anchor: Point::new(
            shape.offset.x + (shape.size.width + shape.slant) / 2.0,
            shape.offset.y + shape.size.height / 2.0,
        ),
        font_px: shape.size.height * TITLE_SCALE,
        max_width: shape.size.width,
    }
}
