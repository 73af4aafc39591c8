//! End-to-end renders through the real rasterizer.
//!
//! These check pixels at known points of the default layout rather than
//! comparing against golden files, so anti-aliasing and font hinting changes
//! don't break them.

use bannergen::export::{
    PreviewRequest, create_banner_image, create_banner_with_background, generate_preview_image,
};
use bannergen::placement::{SeededRandom, SequenceRandom};
use bannergen::render::{SkiaBackend, Surface};
use bannergen::settings::{
    PartialBannerSettings, PartialPanelSettings, PartialPreviewSettings, load_overrides,
};
use bannergen::store::FsStore;
use image::{Rgba, RgbaImage};
use std::fs;
use tempfile::TempDir;

const RIBBON: [u8; 4] = [0x2c, 0x87, 0xe9, 255];
const WEDGE: [u8; 4] = [0x14, 0x53, 0x98, 255];
const PANEL: [u8; 4] = [0x1a, 0x22, 0x2b, 255];
const BACKGROUND: [u8; 4] = [0x22, 0x22, 0x22, 255];
const CLEAR: [u8; 4] = [0, 0, 0, 0];

fn backend() -> SkiaBackend {
    SkiaBackend::new().unwrap()
}

fn decode(bytes: &[u8]) -> RgbaImage {
    image::load_from_memory(bytes).unwrap().to_rgba8()
}

fn px(image: &RgbaImage, x: u32, y: u32) -> [u8; 4] {
    image.get_pixel(x, y).0
}

fn near(actual: [u8; 4], expected: [u8; 4]) -> bool {
    actual
        .iter()
        .zip(expected)
        .all(|(a, e)| a.abs_diff(e) <= 2)
}

#[test]
fn banner_png_has_canvas_size_and_layers() {
    let bytes = create_banner_image(&backend(), "Hi", &PartialBannerSettings::default()).unwrap();
    let image = decode(&bytes);

    assert_eq!(image.dimensions(), (1920, 1080));
    assert_eq!(px(&image, 10, 10), CLEAR);
    // Ribbon, away from the title.
    assert_eq!(px(&image, 300, 800), RIBBON);
    assert_eq!(px(&image, 1700, 750), RIBBON);
    // Left wedge, above the ribbon's top edge.
    assert_eq!(px(&image, 250, 650), WEDGE);
    // Right wedge, below the ribbon's bottom edge.
    assert_eq!(px(&image, 1700, 920), WEDGE);
}

#[test]
fn banner_title_is_drawn_inside_ribbon() {
    let image = decode(
        &create_banner_image(&backend(), "Hello", &PartialBannerSettings::default()).unwrap(),
    );

    let mut white = 0;
    for (x, y, p) in image.enumerate_pixels() {
        if p.0 == [255, 255, 255, 255] {
            white += 1;
            assert!((600..1320).contains(&x), "title ink at x = {x}");
            assert!((696..=888).contains(&y), "title ink at y = {y}");
        }
    }
    assert!(white > 1000, "only {white} title pixels");
}

#[test]
fn panel_is_drawn_under_ribbon() {
    let surface =
        create_banner_with_background(&backend(), "Hi", &PartialPanelSettings::default()).unwrap();

    assert_eq!(surface.pixel(400, 1000), Some(PANEL));
    assert_eq!(surface.pixel(300, 800), Some(RIBBON));
    // Right of the panel's hypotenuse.
    assert_eq!(surface.pixel(1200, 1000), Some(CLEAR));

    let image = decode(&surface.encode_png().unwrap());
    assert_eq!(px(&image, 400, 1000), PANEL);
}

#[test]
fn settings_file_overrides_reach_pixels() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("settings.toml");
    fs::write(
        &path,
        r##"
[canvas.size]
width = 1000
height = 600

[banner]
slant = 0

[banner.offset]
x = 100
y = 200

[banner.size]
width = 800
height = 100

[colours]
banner_fg = "#e94f2c"
"##,
    )
    .unwrap();
    let file = load_overrides(&path).unwrap();

    let image = decode(&create_banner_image(&backend(), "", &file.banner_overrides()).unwrap());
    assert_eq!(image.dimensions(), (1000, 600));
    assert_eq!(px(&image, 150, 250), [0xe9, 0x4f, 0x2c, 255]);
    // Zero slant: the ribbon's left edge is vertical.
    assert_eq!(px(&image, 101, 295), [0xe9, 0x4f, 0x2c, 255]);
    assert_eq!(px(&image, 98, 250), CLEAR);
}

#[test]
fn preview_places_photo_between_wedges_and_ribbon() {
    let tmp = TempDir::new().unwrap();
    let photo = tmp.path().join("photo.png");
    RgbaImage::from_pixel(400, 200, Rgba([220, 20, 20, 255]))
        .save(&photo)
        .unwrap();
    let target = tmp.path().join("out/preview.png");

    let request = PreviewRequest {
        content_path: Some(photo),
        placement: PartialPreviewSettings {
            scale: Some(0.5),
            random_position: Some(0.0),
            random_angle: Some(0.0),
            ..Default::default()
        },
        ..PreviewRequest::new("Post", &target)
    };
    let placed = generate_preview_image(
        &backend(),
        &FsStore,
        &mut SequenceRandom::new(vec![]),
        &request,
    )
    .unwrap()
    .unwrap();

    // min(960 / 400, 540 / 200) = 2.4
    assert!((placed.size.width - 960.0).abs() < 0.01);
    assert!((placed.size.height - 480.0).abs() < 0.01);

    let image = decode(&fs::read(&target).unwrap());
    assert_eq!(image.dimensions(), (1920, 1080));
    assert_eq!(px(&image, 100, 100), BACKGROUND);
    assert!(near(px(&image, 960, 400), [220, 20, 20, 255]));
    // The ribbon is drawn over the photo's lower edge.
    assert_eq!(px(&image, 500, 760), RIBBON);
}

#[test]
fn preview_without_photo_still_written() {
    let tmp = TempDir::new().unwrap();
    let target = tmp.path().join("preview.png");

    let placed = generate_preview_image(
        &backend(),
        &FsStore,
        &mut SequenceRandom::new(vec![]),
        &PreviewRequest::new("Post", &target),
    )
    .unwrap();

    assert!(placed.is_none());
    let image = decode(&fs::read(&target).unwrap());
    assert_eq!(px(&image, 960, 100), BACKGROUND);
    assert_eq!(px(&image, 250, 650), WEDGE);
}

#[test]
fn seeded_previews_are_identical() {
    let tmp = TempDir::new().unwrap();
    let photo = tmp.path().join("photo.png");
    RgbaImage::from_fn(64, 48, |x, y| Rgba([x as u8 * 4, y as u8 * 5, 90, 255]))
        .save(&photo)
        .unwrap();

    let render = |name: &str| {
        let target = tmp.path().join(name);
        let request = PreviewRequest {
            content_path: Some(photo.clone()),
            ..PreviewRequest::new("Seeded", &target)
        };
        generate_preview_image(&backend(), &FsStore, &mut SeededRandom::new(99), &request)
            .unwrap();
        fs::read(target).unwrap()
    };

    assert_eq!(render("a.png"), render("b.png"));
}
