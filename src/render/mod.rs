//! Rasterizing the banner scene.
//!
//! | Concern | Where |
//! |---|---|
//! | **Paths & transforms** | [`path`]: closed polygons, 2-D affine transforms |
//! | **Surface capability** | [`Surface`] + [`RenderBackend`] traits |
//! | **Layer order** | [`compositor`]: one function per layer, plus whole scenes |
//! | **Pixels** | [`SkiaBackend`]: `tiny-skia` fills, `rusttype` text, PNG via `image` |
//!
//! The compositor only ever talks to the traits, so layer order and vertex
//! winding are tested against a recording mock and never need real pixels.

pub mod compositor;
pub mod path;
pub mod skia;
pub mod surface;

pub use compositor::{draw_banner, draw_banner_with_panel, draw_preview};
pub use path::{Path, PathOp, Transform2D};
pub use skia::{SkiaBackend, SkiaSurface, parse_colour};
pub use surface::{RenderBackend, RenderError, Surface, TextStyle};
