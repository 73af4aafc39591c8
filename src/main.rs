use bannergen::export::{self, PreviewRequest};
use bannergen::font::TitleFont;
use bannergen::placement::{RandomSource, SeededRandom, ThreadRandom};
use bannergen::render::{SkiaBackend, Surface};
use bannergen::settings::{self, SettingsFile};
use bannergen::store::{FsStore, ImageSink};
use bannergen::types::Tag;
use bannergen::{output, placement};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::{Path, PathBuf};

/// Shared arguments for commands that render a title.
#[derive(clap::Args, Clone)]
struct RenderArgs {
    /// Title text drawn on the ribbon
    title: String,

    /// Output PNG path
    #[arg(short, long, default_value = "banner.png")]
    output: PathBuf,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "bannergen")]
#[command(about = "Slanted-ribbon banner and preview image generator")]
#[command(long_about = "\
Slanted-ribbon banner and preview image generator

Draws a slanted ribbon with a title, two wedges behind it, and optionally a
content panel or a photo underneath. Output is always PNG.

Layers, back to front:

  background     colours.bg          (preview only)
  wedges         colours.banner_bg
  panel / photo  colours.box_bg      (panel / preview)
  ribbon         colours.banner_fg
  title          colours.text

Every size, offset and colour can be overridden from a sparse settings file.
Run 'bannergen gen-settings' to print a documented one.")]
#[command(version = version_string())]
struct Cli {
    /// Settings file with overrides (TOML, or JSON with a .json extension)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// TTF/OTF font for the title instead of the bundled one
    #[arg(long, global = true)]
    font: Option<PathBuf>,

    /// Verbose logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the banner on a transparent canvas
    Banner(RenderArgs),
    /// Render the banner with the content panel underneath
    Panel(RenderArgs),
    /// Render a preview card, optionally with a photo under the ribbon
    Preview {
        #[command(flatten)]
        args: RenderArgs,

        /// Photo placed between the wedges and the ribbon
        #[arg(long)]
        content: Option<PathBuf>,

        /// Tag carried with the preview, as `label` or `label=#colour` (repeatable)
        #[arg(long = "tag")]
        tags: Vec<Tag>,

        /// Seed for reproducible photo placement
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print a stock settings file with all options documented
    GenSettings,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("warn")
    };
    env_logger::Builder::from_env(env).init();

    match cli.command {
        Command::GenSettings => print!("{}", settings::stock_settings_toml()),
        command => {
            let file = load_settings(cli.settings.as_deref())?;
            let backend = load_backend(cli.font.as_deref())?;
            render(command, &file, &backend)?;
        }
    }

    Ok(())
}

fn render(
    command: Command,
    file: &SettingsFile,
    backend: &SkiaBackend,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Banner(args) => {
            let overrides = file.banner_overrides();
            let bytes = export::create_banner_image(backend, &args.title, &overrides)?;
            FsStore.write(&args.output, &bytes)?;
            output::print_lines(&output::format_banner_output(
                &args.title,
                &args.output,
                &settings::resolve_banner(&overrides),
                bytes.len(),
            ));
        }
        Command::Panel(args) => {
            let overrides = file.panel_overrides();
            let surface = export::create_banner_with_background(backend, &args.title, &overrides)?;
            let bytes = surface.encode_png()?;
            FsStore.write(&args.output, &bytes)?;
            output::print_lines(&output::format_panel_output(
                &args.title,
                &args.output,
                &settings::resolve_panel(&overrides),
                bytes.len(),
            ));
        }
        Command::Preview {
            args,
            content,
            tags,
            seed,
        } => {
            let request = PreviewRequest {
                title: args.title,
                target_path: args.output,
                content_path: content,
                tags,
                placement: file.preview_overrides(),
                banner: file.banner_overrides(),
            };
            let placed = match seed {
                Some(seed) => preview(backend, &mut SeededRandom::new(seed), &request)?,
                None => preview(backend, &mut ThreadRandom, &request)?,
            };
            output::print_lines(&output::format_preview_output(
                &request,
                &settings::resolve_banner(&request.banner),
                placed.as_ref(),
            ));
        }
        Command::GenSettings => {}
    }
    Ok(())
}

fn preview(
    backend: &SkiaBackend,
    rng: &mut impl RandomSource,
    request: &PreviewRequest,
) -> Result<Option<placement::Placement>, Box<dyn std::error::Error>> {
    Ok(export::generate_preview_image(backend, &FsStore, rng, request)?)
}

fn load_backend(font: Option<&Path>) -> Result<SkiaBackend, Box<dyn std::error::Error>> {
    let backend = match font {
        Some(path) => SkiaBackend::with_font(TitleFont::from_file(path)?),
        None => SkiaBackend::new()?,
    };
    log::debug!("Title font: {}", backend.font().name());
    Ok(backend)
}

/// Load the settings file, or an empty one when none was given.
fn load_settings(path: Option<&Path>) -> Result<SettingsFile, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            log::info!("Loading settings from {}", path.display());
            Ok(settings::load_overrides(path)?)
        }
        None => Ok(SettingsFile::default()),
    }
}
