//! Pure Rust drawing surface on top of `tiny-skia` and `rusttype`.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Surface | `tiny_skia::Pixmap` (premultiplied RGBA8) |
//! | Polygon fill | `PathBuilder` + `Pixmap::fill_path`, non-zero winding, anti-aliased |
//! | Image blit | `Pixmap::draw_pixmap` with a bicubic `PixmapPaint` |
//! | Title text | `rusttype` glyph coverage into a `Mask`, then one masked `fill_rect` |
//! | PNG encode | `image::codecs::png::PngEncoder` |
//!
//! Colours are CSS-style hex tokens: `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.

use super::path::{Path, PathOp, Transform2D};
use super::surface::{RenderBackend, RenderError, Surface, TextStyle};
use crate::font::TitleFont;
use crate::types::{Colour, Point, Size};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use rusttype::{Scale, point};
use std::sync::Arc;
use tiny_skia::{
    Color, ColorU8, FillRule, FilterQuality, Mask, Paint, PathBuilder, Pixmap, PixmapPaint, Rect,
    Transform,
};

/// Backend producing [`SkiaSurface`]s that share one title font.
#[derive(Debug, Clone)]
pub struct SkiaBackend {
    font: Arc<TitleFont>,
}

impl SkiaBackend {
    /// Backend using the bundled title font.
    pub fn new() -> Result<Self, RenderError> {
        Ok(Self::with_font(TitleFont::bundled()?))
    }

    pub fn with_font(font: Arc<TitleFont>) -> Self {
        Self { font }
    }

    pub fn font(&self) -> &TitleFont {
        &self.font
    }
}

impl RenderBackend for SkiaBackend {
    type Surface = SkiaSurface;

    fn create_surface(&self, size: Size) -> Result<SkiaSurface, RenderError> {
        let err = || RenderError::SurfaceCreation {
            width: size.width,
            height: size.height,
        };
        if !(size.width.is_finite() && size.height.is_finite()) {
            return Err(err());
        }
        if size.width <= 0.0 || size.height <= 0.0 {
            return Err(err());
        }
        let pixmap = Pixmap::new(size.width.round() as u32, size.height.round() as u32)
            .ok_or_else(err)?;
        Ok(SkiaSurface {
            pixmap,
            font: Arc::clone(&self.font),
        })
    }
}

/// A transparent RGBA surface.
pub struct SkiaSurface {
    pixmap: Pixmap,
    font: Arc<TitleFont>,
}

impl SkiaSurface {
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Straight-alpha RGBA value at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Copy the surface out as a straight-alpha image.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut out = RgbaImage::new(self.pixmap.width(), self.pixmap.height());
        for (dst, src) in out.pixels_mut().zip(self.pixmap.pixels()) {
            let c = src.demultiply();
            *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        out
    }

    fn paint(colour: &Colour) -> Result<Paint<'static>, RenderError> {
        let mut paint = Paint::default();
        paint.set_color(parse_colour(colour)?);
        paint.anti_alias = true;
        Ok(paint)
    }
}

impl Surface for SkiaSurface {
    fn size(&self) -> Size {
        Size::new(self.pixmap.width() as f32, self.pixmap.height() as f32)
    }

    fn fill_rect(&mut self, origin: Point, size: Size, colour: &Colour) -> Result<(), RenderError> {
        let paint = Self::paint(colour)?;
        let Some(rect) = Rect::from_xywh(origin.x, origin.y, size.width, size.height) else {
            log::debug!("Skipping empty rect at {origin:?} size {size:?}");
            return Ok(());
        };
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), None);
        Ok(())
    }

    fn fill_path(&mut self, path: &Path, colour: &Colour) -> Result<(), RenderError> {
        let paint = Self::paint(colour)?;
        let mut pb = PathBuilder::new();
        for op in path.ops() {
            match *op {
                PathOp::MoveTo(p) => pb.move_to(p.x, p.y),
                PathOp::LineTo(p) => pb.line_to(p.x, p.y),
                PathOp::Close => pb.close(),
            }
        }
        // Degenerate polygons (a single point, zero area) have nothing to fill.
        let Some(skia_path) = pb.finish() else {
            log::debug!("Skipping degenerate path {:?}", path.points());
            return Ok(());
        };
        self.pixmap.fill_path(
            &skia_path,
            &paint,
            FillRule::Winding,
            Transform::identity(),
            None,
        );
        Ok(())
    }

    fn draw_image(
        &mut self,
        image: &RgbaImage,
        origin: Point,
        size: Size,
        transform: &Transform2D,
    ) -> Result<(), RenderError> {
        let (iw, ih) = image.dimensions();
        let mut source = Pixmap::new(iw, ih).ok_or(RenderError::SurfaceCreation {
            width: iw as f32,
            height: ih as f32,
        })?;
        for (dst, src) in source.pixels_mut().iter_mut().zip(image.pixels()) {
            let [r, g, b, a] = src.0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }

        let t = transform
            .translate(origin.x, origin.y)
            .scale(size.width / iw as f32, size.height / ih as f32);
        let paint = PixmapPaint {
            quality: FilterQuality::Bicubic,
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(
            0,
            0,
            source.as_ref(),
            &paint,
            Transform::from_row(t.sx, t.ky, t.kx, t.sy, t.tx, t.ty),
            None,
        );
        Ok(())
    }

    fn fill_text(
        &mut self,
        text: &str,
        anchor: Point,
        style: &TextStyle,
    ) -> Result<(), RenderError> {
        let paint = Self::paint(&style.colour)?;
        let font = self.font.font();

        let natural = self.font.text_width(text, style.font_px);
        let mut scale = Scale::uniform(style.font_px);
        let mut width = natural;
        if style.max_width > 0.0 && natural > style.max_width {
            scale.x *= style.max_width / natural;
            width = style.max_width;
            log::debug!("Condensing title from {natural:.0}px to {width:.0}px");
        }

        let v = font.v_metrics(scale);
        let baseline = anchor.y + (v.ascent + v.descent) / 2.0;
        let start = point(anchor.x - width / 2.0, baseline);

        let (w, h) = (self.pixmap.width(), self.pixmap.height());
        let Some(mut mask) = Mask::new(w, h) else {
            return Err(RenderError::SurfaceCreation {
                width: w as f32,
                height: h as f32,
            });
        };
        let coverage = mask.data_mut();
        for glyph in font.layout(text, scale, start) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, v| {
                let x = bb.min.x + gx as i32;
                let y = bb.min.y + gy as i32;
                if x < 0 || y < 0 || x >= w as i32 || y >= h as i32 {
                    return;
                }
                let idx = y as usize * w as usize + x as usize;
                let value = (v * 255.0).round() as u8;
                coverage[idx] = coverage[idx].max(value);
            });
        }

        if let Some(rect) = Rect::from_xywh(0.0, 0.0, w as f32, h as f32) {
            self.pixmap
                .fill_rect(rect, &paint, Transform::identity(), Some(&mask));
        }
        Ok(())
    }

    fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        let image = self.to_rgba_image();
        let mut buf = Vec::new();
        PngEncoder::new(&mut buf)
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        Ok(buf)
    }
}

/// Parse a hex colour token into a straight-alpha colour.
pub fn parse_colour(colour: &Colour) -> Result<Color, RenderError> {
    let invalid = || RenderError::InvalidColour(colour.clone());
    let hex = colour.as_str().trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|n| n * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);

    let rgba = match hex.len() {
        3 => [nibble(0), nibble(1), nibble(2), Ok(255)],
        4 => [nibble(0), nibble(1), nibble(2), nibble(3)],
        6 => [byte(0), byte(2), byte(4), Ok(255)],
        8 => [byte(0), byte(2), byte(4), byte(6)],
        _ => return Err(invalid()),
    };
    let [r, g, b, a] = rgba.map(|c| c.map_err(|_| invalid()));
    Ok(Color::from_rgba8(r?, g?, b?, a?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> SkiaBackend {
        SkiaBackend::new().unwrap()
    }

    fn surface(w: f32, h: f32) -> SkiaSurface {
        backend().create_surface(Size::new(w, h)).unwrap()
    }

    /// Resampling may round interior pixels by a unit or two.
    fn near(actual: Option<[u8; 4]>, expected: [u8; 4]) -> bool {
        actual.is_some_and(|a| a.iter().zip(expected).all(|(a, e)| a.abs_diff(e) <= 2))
    }

    fn rgba8(colour: &str) -> [u8; 4] {
        let c = parse_colour(&Colour::from(colour)).unwrap().to_color_u8();
        [c.red(), c.green(), c.blue(), c.alpha()]
    }

    // =========================================================================
    // parse_colour tests
    // =========================================================================

    #[test]
    fn parse_short_and_long_hex() {
        assert_eq!(rgba8("#fff"), [255, 255, 255, 255]);
        assert_eq!(rgba8("#222"), [0x22, 0x22, 0x22, 255]);
        assert_eq!(rgba8("#2c87e9"), [0x2c, 0x87, 0xe9, 255]);
        assert_eq!(rgba8("#2C87E9"), [0x2c, 0x87, 0xe9, 255]);
    }

    #[test]
    fn parse_hex_with_alpha() {
        assert_eq!(rgba8("#0008"), [0, 0, 0, 0x88]);
        assert_eq!(rgba8("#14539880"), [0x14, 0x53, 0x98, 0x80]);
    }

    #[test]
    fn parse_rejects_non_hex() {
        for bad in ["red", "#12", "#12345", "#gggggg", "", "#", "#ééé"] {
            let result = parse_colour(&Colour::from(bad));
            assert!(
                matches!(result, Err(RenderError::InvalidColour(_))),
                "accepted {bad:?}"
            );
        }
    }

    // =========================================================================
    // surface tests
    // =========================================================================

    #[test]
    fn create_surface_rounds_size() {
        let s = surface(99.6, 10.2);
        assert_eq!(s.size(), Size::new(100.0, 10.0));
        assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn create_surface_rejects_bad_sizes() {
        for size in [
            Size::new(0.0, 10.0),
            Size::new(10.0, -1.0),
            Size::new(f32::NAN, 10.0),
            Size::new(f32::INFINITY, 10.0),
        ] {
            let result = backend().create_surface(size);
            assert!(matches!(result, Err(RenderError::SurfaceCreation { .. })));
        }
    }

    #[test]
    fn fill_rect_covers_region() {
        let mut s = surface(20.0, 20.0);
        s.fill_rect(Point::new(5.0, 5.0), Size::new(10.0, 10.0), &Colour::from("#f00"))
            .unwrap();
        assert_eq!(s.pixel(10, 10), Some([255, 0, 0, 255]));
        assert_eq!(s.pixel(2, 2), Some([0, 0, 0, 0]));
    }

    #[test]
    fn fill_rect_rejects_bad_colour() {
        let mut s = surface(4.0, 4.0);
        let result = s.fill_rect(Point::default(), Size::new(4.0, 4.0), &Colour::from("blue"));
        assert!(matches!(result, Err(RenderError::InvalidColour(c)) if c.as_str() == "blue"));
    }

    #[test]
    fn fill_path_fills_interior_only() {
        let mut s = surface(100.0, 100.0);
        let triangle = Path::closed(&[
            Point::new(10.0, 10.0),
            Point::new(90.0, 10.0),
            Point::new(10.0, 90.0),
        ])
        .unwrap();
        s.fill_path(&triangle, &Colour::from("#00f")).unwrap();
        assert_eq!(s.pixel(20, 20), Some([0, 0, 255, 255]));
        assert_eq!(s.pixel(80, 80), Some([0, 0, 0, 0]));
    }

    #[test]
    fn degenerate_path_is_skipped() {
        let mut s = surface(10.0, 10.0);
        let dot = Path::closed(&[Point::new(5.0, 5.0)]).unwrap();
        s.fill_path(&dot, &Colour::from("#fff")).unwrap();
        assert_eq!(s.pixel(5, 5), Some([0, 0, 0, 0]));
    }

    #[test]
    fn draw_image_scales_into_rect() {
        let mut s = surface(50.0, 50.0);
        let red = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        s.draw_image(
            &red,
            Point::new(10.0, 10.0),
            Size::new(20.0, 20.0),
            &Transform2D::identity(),
        )
        .unwrap();
        assert!(near(s.pixel(20, 20), [255, 0, 0, 255]));
        assert_eq!(s.pixel(5, 5), Some([0, 0, 0, 0]));
        assert_eq!(s.pixel(40, 40), Some([0, 0, 0, 0]));
    }

    #[test]
    fn draw_image_applies_rotation_about_anchor() {
        // A 40x10 bar centred on (50, 50), rotated 90 degrees, becomes vertical.
        let mut s = surface(100.0, 100.0);
        let bar = RgbaImage::from_pixel(4, 1, Rgba([0, 255, 0, 255]));
        let t = Transform2D::identity()
            .translate(50.0, 50.0)
            .rotate(std::f32::consts::FRAC_PI_2);
        s.draw_image(&bar, Point::new(-20.0, -5.0), Size::new(40.0, 10.0), &t)
            .unwrap();
        assert!(near(s.pixel(50, 35), [0, 255, 0, 255]));
        assert_eq!(s.pixel(35, 50), Some([0, 0, 0, 0]));
    }

    #[test]
    fn fill_text_draws_near_anchor() {
        let mut s = surface(400.0, 200.0);
        let style = TextStyle {
            colour: Colour::from("#fff"),
            font_px: 80.0,
            max_width: 400.0,
        };
        s.fill_text("HI", Point::new(200.0, 100.0), &style).unwrap();

        let image = s.to_rgba_image();
        let inked: Vec<(u32, u32)> = image
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[3] > 128)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!inked.is_empty());
        let min_x = inked.iter().map(|p| p.0).min().unwrap();
        let max_x = inked.iter().map(|p| p.0).max().unwrap();
        let min_y = inked.iter().map(|p| p.1).min().unwrap();
        let max_y = inked.iter().map(|p| p.1).max().unwrap();
        // Roughly centred on the anchor in both axes.
        assert!(((min_x + max_x) as f32 / 2.0 - 200.0).abs() < 10.0);
        assert!(((min_y + max_y) as f32 / 2.0 - 100.0).abs() < 15.0);
    }

    #[test]
    fn fill_text_condenses_to_max_width() {
        let mut s = surface(600.0, 200.0);
        let style = TextStyle {
            colour: Colour::from("#fff"),
            font_px: 100.0,
            max_width: 200.0,
        };
        let text = "A much longer title";
        assert!(s.font.text_width(text, 100.0) > 200.0);
        s.fill_text(text, Point::new(300.0, 100.0), &style).unwrap();

        let image = s.to_rgba_image();
        for (x, _, p) in image.enumerate_pixels() {
            if p.0[3] > 0 {
                assert!((196..=404).contains(&x), "ink at x = {x}");
            }
        }
    }

    #[test]
    fn encode_png_round_trips_dimensions() {
        let mut s = surface(32.0, 16.0);
        s.fill_rect(Point::default(), Size::new(32.0, 16.0), &Colour::from("#2c87e9"))
            .unwrap();
        let bytes = s.encode_png().unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (32, 16));
        assert_eq!(decoded.get_pixel(3, 3).0, [0x2c, 0x87, 0xe9, 255]);
    }
}
