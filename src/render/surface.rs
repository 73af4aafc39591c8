//! Drawing-surface capability and shared render types.
//!
//! The [`Surface`] trait is the narrow set of raster operations the compositor
//! needs: a flat rectangle fill, a polygon fill, a transformed image blit,
//! centred text, and PNG encoding. [`RenderBackend`] creates surfaces.
//!
//! The production implementation is
//! [`SkiaBackend`](super::skia::SkiaBackend). Tests use the recording
//! `MockBackend` in this module's `tests` submodule.

use super::path::{Path, Transform2D};
use crate::types::{Colour, Point, Size};
use image::RgbaImage;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },
    #[error("PNG encode failed: {0}")]
    Encode(String),
    #[error("Cannot create a {width}x{height} surface")]
    SurfaceCreation { width: f32, height: f32 },
    #[error("Invalid colour: {0}")]
    InvalidColour(Colour),
    #[error("Invalid font: {0}")]
    InvalidFont(String),
}

/// How title text is drawn.
///
/// Text is always centred horizontally on the anchor with its em box centred
/// vertically on it. When the natural width exceeds `max_width` the text is
/// condensed horizontally to fit.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub colour: Colour,
    pub font_px: f32,
    pub max_width: f32,
}

/// A fixed-size raster surface.
pub trait Surface {
    fn size(&self) -> Size;

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, origin: Point, size: Size, colour: &Colour) -> Result<(), RenderError>;

    /// Fill a closed path with a solid colour.
    fn fill_path(&mut self, path: &Path, colour: &Colour) -> Result<(), RenderError>;

    /// Draw `image` stretched into the rectangle at `origin`/`size`, with
    /// `transform` applied to that rectangle for this call only.
    fn draw_image(
        &mut self,
        image: &RgbaImage,
        origin: Point,
        size: Size,
        transform: &Transform2D,
    ) -> Result<(), RenderError>;

    /// Draw `text` centred on `anchor`.
    fn fill_text(&mut self, text: &str, anchor: Point, style: &TextStyle)
    -> Result<(), RenderError>;

    /// Encode the current pixels as PNG.
    fn encode_png(&self) -> Result<Vec<u8>, RenderError>;
}

/// Creates drawing surfaces.
pub trait RenderBackend: Sync {
    type Surface: Surface;

    /// Create a blank surface. Fails for non-positive or non-finite sizes.
    fn create_surface(&self, size: Size) -> Result<Self::Surface, RenderError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock backend whose surfaces record operations instead of drawing.
    /// Uses Mutex (not RefCell) so it stays Sync like real backends.
    #[derive(Default)]
    pub struct MockBackend {
        pub operations: Arc<Mutex<Vec<RecordedOp>>>,
    }

    pub struct MockSurface {
        size: Size,
        operations: Arc<Mutex<Vec<RecordedOp>>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        CreateSurface(Size),
        FillRect {
            origin: Point,
            size: Size,
            colour: String,
        },
        FillPath {
            points: Vec<Point>,
            colour: String,
        },
        DrawImage {
            image: (u32, u32),
            origin: Point,
            size: Size,
            transform: Transform2D,
        },
        FillText {
            text: String,
            anchor: Point,
            style: TextStyle,
        },
        EncodePng,
    }

    impl RecordedOp {
        /// Short label used by layer-order assertions.
        pub fn layer(&self) -> String {
            match self {
                RecordedOp::CreateSurface(_) => "create".into(),
                RecordedOp::FillRect { colour, .. } => format!("rect {colour}"),
                RecordedOp::FillPath { colour, .. } => format!("path {colour}"),
                RecordedOp::DrawImage { .. } => "image".into(),
                RecordedOp::FillText { text, .. } => format!("text {text}"),
                RecordedOp::EncodePng => "encode".into(),
            }
        }
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        pub fn layers(&self) -> Vec<String> {
            self.get_operations().iter().map(RecordedOp::layer).collect()
        }

        fn record(&self, op: RecordedOp) {
            self.operations.lock().unwrap().push(op);
        }
    }

    impl MockSurface {
        fn record(&self, op: RecordedOp) {
            self.operations.lock().unwrap().push(op);
        }
    }

    impl RenderBackend for MockBackend {
        type Surface = MockSurface;

        fn create_surface(&self, size: Size) -> Result<MockSurface, RenderError> {
            if !(size.width > 0.0 && size.height > 0.0) {
                return Err(RenderError::SurfaceCreation {
                    width: size.width,
                    height: size.height,
                });
            }
            self.record(RecordedOp::CreateSurface(size));
            Ok(MockSurface {
                size,
                operations: Arc::clone(&self.operations),
            })
        }
    }

    impl Surface for MockSurface {
        fn size(&self) -> Size {
            self.size
        }

        fn fill_rect(
            &mut self,
            origin: Point,
            size: Size,
            colour: &Colour,
        ) -> Result<(), RenderError> {
            self.record(RecordedOp::FillRect {
                origin,
                size,
                colour: colour.to_string(),
            });
            Ok(())
        }

        fn fill_path(&mut self, path: &Path, colour: &Colour) -> Result<(), RenderError> {
            self.record(RecordedOp::FillPath {
                points: path.points(),
                colour: colour.to_string(),
            });
            Ok(())
        }

        fn draw_image(
            &mut self,
            image: &RgbaImage,
            origin: Point,
            size: Size,
            transform: &Transform2D,
        ) -> Result<(), RenderError> {
            self.record(RecordedOp::DrawImage {
                image: image.dimensions(),
                origin,
                size,
                transform: *transform,
            });
            Ok(())
        }

        fn fill_text(
            &mut self,
            text: &str,
            anchor: Point,
            style: &TextStyle,
        ) -> Result<(), RenderError> {
            self.record(RecordedOp::FillText {
                text: text.to_string(),
                anchor,
                style: style.clone(),
            });
            Ok(())
        }

        fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
            self.record(RecordedOp::EncodePng);
            Ok(b"\x89PNG mock".to_vec())
        }
    }

    #[test]
    fn mock_records_surface_creation() {
        let backend = MockBackend::new();
        let surface = backend.create_surface(Size::new(640.0, 480.0)).unwrap();
        assert_eq!(surface.size(), Size::new(640.0, 480.0));
        assert_eq!(
            backend.get_operations(),
            vec![RecordedOp::CreateSurface(Size::new(640.0, 480.0))]
        );
    }

    #[test]
    fn mock_rejects_empty_surface() {
        let backend = MockBackend::new();
        let result = backend.create_surface(Size::new(0.0, 480.0));
        assert!(matches!(result, Err(RenderError::SurfaceCreation { .. })));
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn mock_records_fill_path_points() {
        let backend = MockBackend::new();
        let mut surface = backend.create_surface(Size::new(10.0, 10.0)).unwrap();
        let pts = [Point::new(1.0, 1.0), Point::new(9.0, 1.0), Point::new(5.0, 9.0)];
        surface
            .fill_path(&Path::closed(&pts).unwrap(), &Colour::from("#fff"))
            .unwrap();

        let ops = backend.get_operations();
        assert!(matches!(
            &ops[1],
            RecordedOp::FillPath { points, colour } if points == &pts.to_vec() && colour == "#fff"
        ));
    }
}
