//! # Bannergen
//!
//! Procedural banner and preview-card images: a slanted ribbon with a title,
//! two decorative wedges behind it, and optionally a content panel or a
//! photo tucked underneath.
//!
//! # Architecture: Resolve, Measure, Compose
//!
//! Every render runs the same three steps:
//!
//! ```text
//! 1. Resolve   stock defaults + partial overrides  →  full settings
//! 2. Measure   settings                            →  corners, wedge tips, placement
//! 3. Compose   corners + surface                   →  layered fills  →  PNG
//! ```
//!
//! Steps 1 and 2 are pure functions over plain values. Step 3 only talks to
//! the [`render::Surface`] trait, so the whole pipeline can be tested against
//! a recording mock without rasterizing anything.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`settings`] | Stock defaults, `Partial*` overrides, typed recursive merge, settings file loading |
//! | [`geometry`] | Ribbon, wedge and panel corners; title anchor and size |
//! | [`placement`] | Fit-inside scaling and jittered rotation/position of a content photo |
//! | [`render`] | Surface capability, fixed layer order, and the `tiny-skia` backend |
//! | [`font`] | Bundled title font and custom font loading |
//! | [`store`] | Content photo decode and output write |
//! | [`export`] | Public entry points: banner PNG, live panel surface, preview file |
//! | [`output`] | CLI output formatting |
//! | [`types`] | Shared value types (`Point`, `Size`, `Corners`, `Colour`, `Tag`) |
//!
//! # Design Decisions
//!
//! ## Fixed Layer Order
//!
//! Wedges, then panel or photo, then ribbon, then title. The ribbon is drawn
//! over everything behind it so its crisp edges hide the seams of the shapes
//! underneath. Shapes and order are not configurable; only sizes, offsets and
//! colours are.
//!
//! ## Typed Overrides
//!
//! Every settings struct has an all-optional `Partial*` twin. Merging walks
//! both with [`settings::Overlay`], so an override can never introduce a key
//! the renderer doesn't know about, and a settings file with a typo fails to
//! parse instead of being silently ignored.
//!
//! ## Injected Randomness
//!
//! Photo placement jitter comes from a [`placement::RandomSource`]. The CLI
//! uses the thread RNG by default and a seeded ChaCha stream with `--seed`;
//! tests script exact values.
//!
//! ## Self-Contained Binary
//!
//! Rasterizing, text and PNG encoding are pure Rust, and the title font is
//! compiled in. Nothing needs to be installed on the machine running it.

pub mod export;
pub mod font;
pub mod geometry;
pub mod output;
pub mod placement;
pub mod render;
pub mod settings;
pub mod store;
pub mod types;
