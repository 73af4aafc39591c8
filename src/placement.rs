//! Placement of a content photo on the preview canvas.
//!
//! [`plan_placement`] is pure apart from the [`RandomSource`] it is handed:
//! fit-inside scaling, a base rotation plus random jitter, and a base position
//! plus random shift. The result is drawn by the compositor in a single scoped
//! transform, so nothing carries over into later layers.

use crate::settings::PreviewSettings;
use crate::types::{Point, Size};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A source of uniform jitter in `[-1, 1]`.
pub trait RandomSource {
    fn jitter(&mut self) -> f32;
}

/// Unseeded randomness from the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn jitter(&mut self) -> f32 {
        rand::thread_rng().gen_range(-1.0..=1.0)
    }
}

/// Reproducible randomness from a fixed seed.
#[derive(Debug, Clone)]
pub struct SeededRandom(ChaCha8Rng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn jitter(&mut self) -> f32 {
        self.0.gen_range(-1.0..=1.0)
    }
}

/// Replays a scripted list of jitter values, cycling when exhausted.
///
/// Values are clamped to `[-1, 1]`. An empty script always yields `0`.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f32>,
    next: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<f32>) -> Self {
        Self {
            values,
            next: 0,
        }
    }
}

impl RandomSource for SequenceRandom {
    fn jitter(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value.clamp(-1.0, 1.0)
    }
}

/// A resolved placement: draw the image centred on `position`, rotated by
/// `angle` radians about that point, at `size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub available: Size,
    pub ratio: f32,
    pub size: Size,
    pub position: Point,
    /// Radians, clockwise in canvas space.
    pub angle: f32,
}

/// Uniform scale that fits `image` entirely inside `available`.
pub fn fit_inside_ratio(image: Size, available: Size) -> f32 {
    (available.width / image.width).min(available.height / image.height)
}

/// Compute where and how a content image of size `image` is drawn.
///
/// Jitter is drawn from `rng` only for the non-zero random magnitudes, angle
/// first, then x, then y. Image dimensions must be positive; zero or
/// non-finite sizes are not guarded against.
pub fn plan_placement(
    image: Size,
    canvas: Size,
    settings: &PreviewSettings,
    rng: &mut impl RandomSource,
) -> Placement {
    let available = canvas.scaled(settings.scale);
    let ratio = fit_inside_ratio(image, available);
    let size = image.scaled(ratio);

    let mut angle_degrees = settings.angle;
    if settings.random_angle != 0.0 {
        angle_degrees += rng.jitter() * settings.random_angle;
    }

    let mut position = Point::new(
        canvas.width * settings.position.x,
        canvas.height * settings.position.y,
    );
    if settings.random_position != 0.0 {
        let dx = rng.jitter() * settings.random_position * size.width;
        let dy = rng.jitter() * settings.random_position * size.height;
        position = position.offset(dx, dy);
    }

    Placement {
        available,
        ratio,
        size,
        position,
        angle: angle_degrees.to_radians(),
    }
}
