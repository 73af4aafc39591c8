//! CLI output formatting for each command.
//!
//! Every command prints a header naming what was rendered and where it went,
//! followed by indented context lines describing the resolved geometry:
//!
//! ```text
//! Banner "Release notes" → out/banner.png
//!     Canvas: 1920x1080
//!     Ribbon: (96, 696) → (1824, 888), slant 48
//!     Wrote 48213 bytes
//! ```
//!
//! ```text
//! Preview "Release notes" → out/preview.png
//!     Canvas: 1920x1080
//!     Ribbon: (96, 696) → (1824, 888), slant 48
//!     Photo: 1728x864 at (951, 548), rotated -4.2°
//!     Tags: rust, graphics
//! ```
//!
//! Each `format_*` function returns `Vec<String>` and does no I/O;
//! [`print_lines`] writes them to stdout.

use crate::export::PreviewRequest;
use crate::geometry::{banner_corners, panel_corners};
use crate::placement::Placement;
use crate::settings::{BannerSettings, PanelSettings};
use crate::types::{Point, Size};
use std::path::Path;

fn indent(line: impl AsRef<str>) -> String {
    format!("    {}", line.as_ref())
}

fn point(p: Point) -> String {
    format!("({:.0}, {:.0})", p.x, p.y)
}

fn size(s: Size) -> String {
    format!("{:.0}x{:.0}", s.width, s.height)
}

fn header(kind: &str, title: &str, target: &Path) -> String {
    format!("{kind} {title:?} → {}", target.display())
}

fn banner_lines(settings: &BannerSettings) -> Vec<String> {
    let corners = banner_corners(&settings.banner);
    vec![
        indent(format!("Canvas: {}", size(settings.canvas.size))),
        indent(format!(
            "Ribbon: {} → {}, slant {}",
            point(corners.top_left),
            point(corners.bottom_right),
            settings.banner.slant
        )),
    ]
}

pub fn format_banner_output(
    title: &str,
    target: &Path,
    settings: &BannerSettings,
    bytes: usize,
) -> Vec<String> {
    let mut lines = vec![header("Banner", title, target)];
    lines.extend(banner_lines(settings));
    lines.push(indent(format!("Wrote {bytes} bytes")));
    lines
}

pub fn format_panel_output(
    title: &str,
    target: &Path,
    settings: &PanelSettings,
    bytes: usize,
) -> Vec<String> {
    let banner = BannerSettings::from_panel(settings);
    let panel = panel_corners(&banner_corners(&settings.banner), &settings.content);

    let mut lines = vec![header("Panel", title, target)];
    lines.extend(banner_lines(&banner));
    lines.push(indent(format!(
        "Panel: {} → {}",
        point(panel.top_left),
        point(panel.top_right)
    )));
    lines.push(indent(format!("Wrote {bytes} bytes")));
    lines
}

pub fn format_preview_output(
    request: &PreviewRequest,
    settings: &BannerSettings,
    placed: Option<&Placement>,
) -> Vec<String> {
    let mut lines = vec![header("Preview", &request.title, &request.target_path)];
    lines.extend(banner_lines(settings));
    match placed {
        Some(p) => lines.push(indent(format!(
            "Photo: {} at {}, rotated {:.1}°",
            size(p.size),
            point(p.position),
            p.angle.to_degrees()
        ))),
        None => lines.push(indent("Photo: none")),
    }
    if !request.tags.is_empty() {
        let labels: Vec<&str> = request.tags.iter().map(|t| t.label.as_str()).collect();
        lines.push(indent(format!("Tags: {}", labels.join(", "))));
    }
    lines
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
