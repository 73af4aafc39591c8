//! Shared value types used by the settings, geometry, placement and render
//! modules.
//!
//! Everything here is a plain value: `Copy` where it can be, never mutated once
//! built. Coordinates are canvas pixels with the origin at the top-left and `y`
//! growing downwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2-D coordinate in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise offset.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        self.offset(rhs.x, rhs.y)
    }
}

/// Pixel extents. Width and height are expected to be non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both extents multiplied by `factor`.
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

/// Four corners of a quadrilateral.
///
/// The shapes built from these are slanted on purpose, so nothing here assumes
/// the quad is axis-aligned or convex. Winding order is decided by whoever
/// turns the corners into a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corners {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_left: Point,
    pub bottom_right: Point,
}

/// An opaque colour token such as `"#2c87e9"`.
///
/// Geometry and compositing pass colours through untouched; only a concrete
/// [`Surface`](crate::render::Surface) interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Colour(pub String);

impl Colour {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Colour {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A label attached to a preview image.
///
/// Tags are carried through the preview export for downstream labelling and
/// are not drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub label: String,
    pub colour: Colour,
}

impl Tag {
    pub const DEFAULT_COLOUR: &'static str = "#444";
}

/// Parses `label` or `label=colour`.
impl std::str::FromStr for Tag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, colour) = match s.split_once('=') {
            Some((label, colour)) => (label.trim(), colour.trim()),
            None => (s.trim(), Self::DEFAULT_COLOUR),
        };
        if label.is_empty() {
            return Err(format!("empty tag label in {s:?}"));
        }
        Ok(Tag {
            label: label.to_string(),
            colour: Colour::from(colour),
        })
    }
}
