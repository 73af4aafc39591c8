//! Banner settings: defaults, partial overrides, and resolution.
//!
//! Every render call starts from an immutable stock default and overlays the
//! caller's partial override on top of it. The result is a fully-populated
//! settings struct that stays read-only for the rest of the render.
//!
//! ## Resolution Rules
//!
//! Each settings struct has a `Partial*` twin where every field is optional.
//! [`Overlay::overlay`] walks both in lock-step:
//!
//! - nested records merge recursively,
//! - a leaf (number or colour) present in the override replaces the default,
//! - anything absent falls back to the default.
//!
//! Neither input is modified. There are no error conditions.
//!
//! ## Settings File
//!
//! The CLI reads overrides from a sparse TOML (or `.json`) file. One file
//! feeds every command: `banner` uses `canvas`/`banner`/`colours`, `panel` adds
//! `content`, `preview` uses `preview`.
//!
//! ```toml
//! [banner]
//! slant = 0                 # rectangular banner
//!
//! [colours]
//! banner_fg = "#e94f2c"
//!
//! [preview]
//! random_angle = 0          # keep the photo upright
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::types::{Colour, Point, Size};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Typed recursive merge of a partial override onto a complete value.
pub trait Overlay: Clone {
    type Partial;

    /// Return a new value with every field present in `partial` taken from it.
    fn overlay(&self, partial: &Self::Partial) -> Self;
}

fn leaf<T: Clone>(base: &T, over: &Option<T>) -> T {
    over.as_ref().unwrap_or(base).clone()
}

fn nested<T: Overlay>(base: &T, over: &Option<T::Partial>) -> T {
    match over {
        Some(partial) => base.overlay(partial),
        None => base.clone(),
    }
}

// =============================================================================
// Complete settings
// =============================================================================

/// Canvas dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasSettings {
    pub size: Size,
}

/// Geometry of the slanted ribbon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerShape {
    pub size: Size,
    /// Top-left corner of the ribbon.
    pub offset: Point,
    /// How far the two decorative wedge tips are pulled away from the ribbon.
    pub point_offset: Point,
    /// Horizontal skew of the bottom edge in pixels. Negative skews left.
    pub slant: f32,
}

/// Colour for each layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colours {
    /// Background wedges flanking the ribbon.
    pub banner_bg: Colour,
    /// The ribbon itself.
    pub banner_fg: Colour,
    /// Content panel below the ribbon.
    pub box_bg: Colour,
    /// Title text.
    pub text: Colour,
    /// Flat canvas background (preview only).
    pub bg: Colour,
}

/// Geometry of the content panel hanging below the ribbon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentShape {
    pub size: Size,
    /// Offset from the ribbon's bottom-left corner.
    pub offset: Point,
    /// Reserved for content layout; corner computation ignores it.
    pub margin: f32,
    pub slant: f32,
}

/// Settings for a plain banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerSettings {
    pub canvas: CanvasSettings,
    pub banner: BannerShape,
    pub colours: Colours,
}

/// Settings for a banner with a content panel beneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSettings {
    pub canvas: CanvasSettings,
    pub banner: BannerShape,
    pub colours: Colours,
    pub content: ContentShape,
}

/// Placement of the content photo in a preview image.
///
/// `position` and `scale` are fractions of the canvas, angles are degrees.
/// `random_position` is a fraction of the placed image's size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewSettings {
    pub position: Point,
    pub scale: f32,
    pub angle: f32,
    pub random_position: f32,
    pub random_angle: f32,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            size: Size::new(1920.0, 1080.0),
        }
    }
}

impl Default for BannerShape {
    fn default() -> Self {
        Self {
            size: Size::new(1680.0, 192.0),
            offset: Point::new(96.0, 696.0),
            point_offset: Point::new(256.0, 128.0),
            slant: 48.0,
        }
    }
}

impl Default for Colours {
    fn default() -> Self {
        Self {
            banner_bg: Colour::from("#145398"),
            banner_fg: Colour::from("#2c87e9"),
            box_bg: Colour::from("#1a222b"),
            text: Colour::from("#fff"),
            bg: Colour::from("#222"),
        }
    }
}

impl Default for ContentShape {
    fn default() -> Self {
        Self {
            size: Size::new(1200.0, 300.0),
            offset: Point::new(0.0, 0.0),
            margin: 24.0,
            slant: 48.0,
        }
    }
}

impl Default for BannerSettings {
    fn default() -> Self {
        Self {
            canvas: CanvasSettings::default(),
            banner: BannerShape::default(),
            colours: Colours::default(),
        }
    }
}

impl Default for PanelSettings {
    fn default() -> Self {
        let base = BannerSettings::default();
        Self {
            canvas: base.canvas,
            banner: base.banner,
            colours: base.colours,
            content: ContentShape::default(),
        }
    }
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            position: Point::new(0.5, 0.5),
            scale: 0.9,
            angle: 0.0,
            random_position: 0.05,
            random_angle: 12.0,
        }
    }
}

impl PreviewSettings {
    /// Map the older `{size_factor, angle, wiggle_room}` placement model.
    ///
    /// That model always centred the image and only expressed a random angle,
    /// so the base angle is zero and the position is the canvas middle.
    pub fn from_legacy(size_factor: f32, angle_degrees: f32, wiggle_room: f32) -> Self {
        Self {
            position: Point::new(0.5, 0.5),
            scale: size_factor,
            angle: 0.0,
            random_position: wiggle_room,
            random_angle: angle_degrees,
        }
    }
}

impl BannerSettings {
    /// The banner part of panel settings, without the content panel.
    pub fn from_panel(panel: &PanelSettings) -> Self {
        Self {
            canvas: panel.canvas.clone(),
            banner: panel.banner.clone(),
            colours: panel.colours.clone(),
        }
    }
}

// =============================================================================
// Partial overrides
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialPoint {
    pub x: Option<f32>,
    pub y: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialSize {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialCanvasSettings {
    pub size: Option<PartialSize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialBannerShape {
    pub size: Option<PartialSize>,
    pub offset: Option<PartialPoint>,
    pub point_offset: Option<PartialPoint>,
    pub slant: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialColours {
    pub banner_bg: Option<Colour>,
    pub banner_fg: Option<Colour>,
    pub box_bg: Option<Colour>,
    pub text: Option<Colour>,
    pub bg: Option<Colour>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialContentShape {
    pub size: Option<PartialSize>,
    pub offset: Option<PartialPoint>,
    pub margin: Option<f32>,
    pub slant: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialBannerSettings {
    pub canvas: Option<PartialCanvasSettings>,
    pub banner: Option<PartialBannerShape>,
    pub colours: Option<PartialColours>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialPanelSettings {
    pub canvas: Option<PartialCanvasSettings>,
    pub banner: Option<PartialBannerShape>,
    pub colours: Option<PartialColours>,
    pub content: Option<PartialContentShape>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialPreviewSettings {
    pub position: Option<PartialPoint>,
    pub scale: Option<f32>,
    pub angle: Option<f32>,
    pub random_position: Option<f32>,
    pub random_angle: Option<f32>,
}

impl Overlay for Point {
    type Partial = PartialPoint;

    fn overlay(&self, partial: &PartialPoint) -> Self {
        Self {
            x: partial.x.unwrap_or(self.x),
            y: partial.y.unwrap_or(self.y),
        }
    }
}

impl Overlay for Size {
    type Partial = PartialSize;

    fn overlay(&self, partial: &PartialSize) -> Self {
        Self {
            width: partial.width.unwrap_or(self.width),
            height: partial.height.unwrap_or(self.height),
        }
    }
}

impl Overlay for CanvasSettings {
    type Partial = PartialCanvasSettings;

    fn overlay(&self, partial: &PartialCanvasSettings) -> Self {
        Self {
            size: nested(&self.size, &partial.size),
        }
    }
}

impl Overlay for BannerShape {
    type Partial = PartialBannerShape;

    fn overlay(&self, partial: &PartialBannerShape) -> Self {
        Self {
            size: nested(&self.size, &partial.size),
            offset: nested(&self.offset, &partial.offset),
            point_offset: nested(&self.point_offset, &partial.point_offset),
            slant: leaf(&self.slant, &partial.slant),
        }
    }
}

impl Overlay for Colours {
    type Partial = PartialColours;

    fn overlay(&self, partial: &PartialColours) -> Self {
        Self {
            banner_bg: leaf(&self.banner_bg, &partial.banner_bg),
            banner_fg: leaf(&self.banner_fg, &partial.banner_fg),
            box_bg: leaf(&self.box_bg, &partial.box_bg),
            text: leaf(&self.text, &partial.text),
            bg: leaf(&self.bg, &partial.bg),
        }
    }
}

impl Overlay for ContentShape {
    type Partial = PartialContentShape;

    fn overlay(&self, partial: &PartialContentShape) -> Self {
        Self {
            size: nested(&self.size, &partial.size),
            offset: nested(&self.offset, &partial.offset),
            margin: leaf(&self.margin, &partial.margin),
            slant: leaf(&self.slant, &partial.slant),
        }
    }
}

impl Overlay for BannerSettings {
    type Partial = PartialBannerSettings;

    fn overlay(&self, partial: &PartialBannerSettings) -> Self {
        Self {
            canvas: nested(&self.canvas, &partial.canvas),
            banner: nested(&self.banner, &partial.banner),
            colours: nested(&self.colours, &partial.colours),
        }
    }
}

impl Overlay for PanelSettings {
    type Partial = PartialPanelSettings;

    fn overlay(&self, partial: &PartialPanelSettings) -> Self {
        Self {
            canvas: nested(&self.canvas, &partial.canvas),
            banner: nested(&self.banner, &partial.banner),
            colours: nested(&self.colours, &partial.colours),
            content: nested(&self.content, &partial.content),
        }
    }
}

impl Overlay for PreviewSettings {
    type Partial = PartialPreviewSettings;

    fn overlay(&self, partial: &PartialPreviewSettings) -> Self {
        Self {
            position: nested(&self.position, &partial.position),
            scale: leaf(&self.scale, &partial.scale),
            angle: leaf(&self.angle, &partial.angle),
            random_position: leaf(&self.random_position, &partial.random_position),
            random_angle: leaf(&self.random_angle, &partial.random_angle),
        }
    }
}

/// Stock banner defaults with `overrides` applied.
pub fn resolve_banner(overrides: &PartialBannerSettings) -> BannerSettings {
    BannerSettings::default().overlay(overrides)
}

/// Stock panel defaults with `overrides` applied.
pub fn resolve_panel(overrides: &PartialPanelSettings) -> PanelSettings {
    PanelSettings::default().overlay(overrides)
}

/// Stock preview placement with `overrides` applied.
pub fn resolve_preview(overrides: &PartialPreviewSettings) -> PreviewSettings {
    PreviewSettings::default().overlay(overrides)
}

// =============================================================================
// Settings file loading
// =============================================================================

/// A sparse settings file covering every command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    pub canvas: Option<PartialCanvasSettings>,
    pub banner: Option<PartialBannerShape>,
    pub colours: Option<PartialColours>,
    pub content: Option<PartialContentShape>,
    pub preview: Option<PartialPreviewSettings>,
}

impl SettingsFile {
    pub fn banner_overrides(&self) -> PartialBannerSettings {
        PartialBannerSettings {
            canvas: self.canvas.clone(),
            banner: self.banner.clone(),
            colours: self.colours.clone(),
        }
    }

    pub fn panel_overrides(&self) -> PartialPanelSettings {
        PartialPanelSettings {
            canvas: self.canvas.clone(),
            banner: self.banner.clone(),
            colours: self.colours.clone(),
            content: self.content.clone(),
        }
    }

    pub fn preview_overrides(&self) -> PartialPreviewSettings {
        self.preview.clone().unwrap_or_default()
    }
}

/// Parse a settings file, choosing JSON for `.json` and TOML otherwise.
pub fn load_overrides(path: &Path) -> Result<SettingsFile, SettingsError> {
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(serde_json::from_str(&content)?)
    } else {
        Ok(toml::from_str(&content)?)
    }
}

/// Returns a fully-commented stock settings file with every key at its default.
///
/// Used by the `gen-settings` CLI command.
pub fn stock_settings_toml() -> &'static str {
    r##"# bannergen settings
# ==================
# Every key is optional. Values below are the defaults.
# Units are canvas pixels unless stated otherwise.

# ---------------------------------------------------------------------------
# Canvas
# ---------------------------------------------------------------------------
[canvas.size]
width = 1920
height = 1080

# ---------------------------------------------------------------------------
# Banner ribbon
# ---------------------------------------------------------------------------
[banner]
# Horizontal skew of the bottom edge. 0 gives a rectangle, negative skews left.
slant = 48

[banner.size]
width = 1680
height = 192

# Top-left corner of the ribbon.
[banner.offset]
x = 96
y = 696

# How far the two background wedge tips are pulled away from the ribbon.
[banner.point_offset]
x = 256
y = 128

# ---------------------------------------------------------------------------
# Colours
# ---------------------------------------------------------------------------
[colours]
banner_bg = "#145398"   # wedges behind the ribbon
banner_fg = "#2c87e9"   # the ribbon
box_bg = "#1a222b"      # content panel (panel command)
text = "#fff"           # title
bg = "#222"             # canvas background (preview command)

# ---------------------------------------------------------------------------
# Content panel (panel command only)
# ---------------------------------------------------------------------------
[content]
margin = 24
slant = 48

[content.size]
width = 1200
height = 300

# Offset from the ribbon's bottom-left corner.
[content.offset]
x = 0
y = 0

# ---------------------------------------------------------------------------
# Preview photo placement (preview command only)
# ---------------------------------------------------------------------------
[preview]
scale = 0.9             # fraction of the canvas the photo may fill
angle = 0               # base rotation, degrees
random_angle = 12       # +/- degrees of random rotation
random_position = 0.05  # +/- fraction of the photo size of random shift

# Photo centre as a fraction of the canvas.
[preview.position]
x = 0.5
y = 0.5
"##
}
