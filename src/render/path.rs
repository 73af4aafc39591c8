//! Backend-neutral vector primitives: closed polygon paths and 2-D affine
//! transforms.
//!
//! These describe *what* to draw. A [`Surface`](super::Surface) turns them into
//! pixels, which keeps winding order and transform composition testable
//! without a rasterizer.

use crate::types::Point;

/// One step of a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp {
    MoveTo(Point),
    LineTo(Point),
    Close,
}

/// A single closed polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    ops: Vec<PathOp>,
}

impl Path {
    /// Move to the first point, line to each following point in order, then
    /// close back to the start.
    ///
    /// Returns `None` for an empty point list.
    pub fn closed(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut ops = Vec::with_capacity(points.len() + 1);
        ops.push(PathOp::MoveTo(*first));
        ops.extend(rest.iter().map(|p| PathOp::LineTo(*p)));
        ops.push(PathOp::Close);
        Some(Self { ops })
    }

    pub fn ops(&self) -> &[PathOp] {
        &self.ops
    }

    /// The polygon's vertices in drawing order.
    pub fn points(&self) -> Vec<Point> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                PathOp::MoveTo(p) | PathOp::LineTo(p) => Some(*p),
                PathOp::Close => None,
            })
            .collect()
    }
}

/// A 2-D affine transform, stored as the first two rows of a 3x3 matrix:
///
/// ```text
/// | sx  kx  tx |
/// | ky  sy  ty |
/// ```
///
/// `translate` and `rotate` compose the way a canvas context does: each new
/// operation applies to coordinates *before* the existing ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub sx: f32,
    pub ky: f32,
    pub kx: f32,
    pub sy: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    pub const fn identity() -> Self {
        Self {
            sx: 1.0,
            ky: 0.0,
            kx: 0.0,
            sy: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self {
            tx: self.sx * dx + self.kx * dy + self.tx,
            ty: self.ky * dx + self.sy * dy + self.ty,
            ..self
        }
    }

    /// Rotate by `radians`, clockwise on a y-down canvas.
    pub fn rotate(self, radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            sx: self.sx * cos + self.kx * sin,
            ky: self.ky * cos + self.sy * sin,
            kx: self.kx * cos - self.sx * sin,
            sy: self.sy * cos - self.ky * sin,
            ..self
        }
    }

    pub fn scale(self, fx: f32, fy: f32) -> Self {
        Self {
            sx: self.sx * fx,
            ky: self.ky * fx,
            kx: self.kx * fy,
            sy: self.sy * fy,
            ..self
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.sx * p.x + self.kx * p.y + self.tx,
            self.ky * p.x + self.sy * p.y + self.ty,
        )
    }
}
