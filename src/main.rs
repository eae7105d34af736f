// SPDX-License-Identifier: MPL-2.0
//! Headless batch editor: applies filters, a crop and a watermark to image
//! files with the same engines the interactive studio uses.

use gallery_studio::app::{paths, Studio};
use gallery_studio::config::{self, Config};
use gallery_studio::domain::editing::{FilterChange, FilterPreset, FontSize, WatermarkStyle};
use gallery_studio::domain::ui::{Rect, Size};
use gallery_studio::error::{EditError, Result};
use gallery_studio::gallery::DiskFile;
use gallery_studio::ui::surface::{AlwaysConfirm, GalleryLog, HeadlessSurface};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const HELP: &str = "\
gallery-studio: batch image filters, crop and watermark

USAGE:
  gallery-studio [OPTIONS] FILES...

OPTIONS:
  --config-dir DIR     Directory holding settings.toml
  --out DIR            Output directory [default: gallery-studio-out]
  --brightness N       Brightness percent (100 = unchanged)
  --contrast N         Contrast percent (100 = unchanged)
  --saturation N       Saturation percent (100 = unchanged)
  --preset NAME        none, grayscale, sepia, invert or blur
  --crop L,T,W,H       Crop region in display pixels
  --display WxH        Display size the crop region refers to [default: image size]
  --watermark TEXT     Watermark text, centered
  --style NAME         none, shadow, outline or transparent
  --color COLOR        CSS color of the watermark
  --size PX            Watermark font size in output pixels
  -h, --help           Print help
";

type Studio_ = Studio<HeadlessSurface, GalleryLog, AlwaysConfirm>;

#[derive(Debug)]
struct Args {
    help: bool,
    config_dir: Option<String>,
    out: PathBuf,
    brightness: Option<f32>,
    contrast: Option<f32>,
    saturation: Option<f32>,
    preset: Option<FilterPreset>,
    crop: Option<Rect>,
    display: Option<Size>,
    watermark: Option<String>,
    style: Option<WatermarkStyle>,
    color: Option<String>,
    size: Option<f32>,
    files: Vec<PathBuf>,
}

impl Args {
    fn parse() -> std::result::Result<Self, pico_args::Error> {
        let mut args = pico_args::Arguments::from_env();
        Ok(Self {
            help: args.contains(["-h", "--help"]),
            config_dir: args.opt_value_from_str("--config-dir")?,
            out: args
                .opt_value_from_str("--out")?
                .unwrap_or_else(|| PathBuf::from("gallery-studio-out")),
            brightness: args.opt_value_from_str("--brightness")?,
            contrast: args.opt_value_from_str("--contrast")?,
            saturation: args.opt_value_from_str("--saturation")?,
            preset: args.opt_value_from_str("--preset")?,
            crop: args.opt_value_from_fn("--crop", parse_rect)?,
            display: args.opt_value_from_fn("--display", parse_size)?,
            watermark: args.opt_value_from_str("--watermark")?,
            style: args.opt_value_from_str("--style")?,
            color: args.opt_value_from_str("--color")?,
            size: args.opt_value_from_str("--size")?,
            files: args.finish().into_iter().map(PathBuf::from).collect(),
        })
    }

    fn filter_changes(&self) -> Vec<FilterChange> {
        let mut changes = Vec::new();
        changes.extend(self.brightness.map(FilterChange::Brightness));
        changes.extend(self.contrast.map(FilterChange::Contrast));
        changes.extend(self.saturation.map(FilterChange::Saturation));
        changes.extend(self.preset.map(FilterChange::Preset));
        changes
    }
}

fn parse_rect(value: &str) -> std::result::Result<Rect, String> {
    let parts: Vec<f32> = value
        .split(',')
        .map(|part| part.trim().parse::<f32>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|err| format!("invalid crop {:?}: {}", value, err))?;
    match parts.as_slice() {
        [left, top, width, height] => Ok(Rect::new(*left, *top, *width, *height)),
        _ => Err(format!("crop needs L,T,W,H, got {:?}", value)),
    }
}

fn parse_size(value: &str) -> std::result::Result<Size, String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("display needs WxH, got {:?}", value))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f32>()
            .map_err(|err| format!("invalid display {:?}: {}", value, err))
    };
    Ok(Size::new(parse(width)?, parse(height)?))
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match Args::parse() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{}\n\n{}", err, HELP);
            return ExitCode::from(2);
        }
    };
    if args.help || args.files.is_empty() {
        print!("{}", HELP);
        return if args.help {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(2)
        };
    }

    paths::init_cli_override(args.config_dir.clone());
    let (config, warning) = config::load();
    if let Some(key) = warning {
        log::warn!("{}; using default settings", key);
    }

    match run(&args, config).await {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            log::warn!("{} file(s) could not be processed", failed);
            ExitCode::FAILURE
        }
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

/// Processes every file and returns how many failed.
async fn run(args: &Args, config: Config) -> Result<usize> {
    let mut failed = 0;
    let mut files = Vec::with_capacity(args.files.len());
    for path in &args.files {
        match DiskFile::open(path).await {
            Ok(file) => files.push(file),
            Err(err) => {
                log::error!("{}: {}", path.display(), err);
                failed += 1;
            }
        }
    }

    let mut studio = Studio::new(
        config,
        HeadlessSurface::default(),
        GalleryLog::default(),
        AlwaysConfirm,
    );
    let report = studio.add_files(&files).await;
    failed += report.rejected.len();

    tokio::fs::create_dir_all(&args.out).await?;
    for index in 0..studio.gallery().len() {
        match process(&mut studio, index, args).await {
            Ok(path) => log::info!("Wrote {}", path.display()),
            Err(err) => {
                log::error!("{}", err);
                failed += 1;
            }
        }
        studio.close_viewer();
    }
    Ok(failed)
}

async fn process(studio: &mut Studio_, index: usize, args: &Args) -> Result<PathBuf> {
    studio.open_viewer(index)?;
    show_at_natural_size(studio, args.display);

    let changes = args.filter_changes();
    if !changes.is_empty() {
        studio.open_edit_panel()?;
        for change in changes {
            studio.set_filter(change)?;
        }
        studio.apply_filters()?;
    }

    if let Some(region) = args.crop {
        studio.open_edit_panel()?;
        studio.enter_crop()?;
        studio.set_crop_region(region)?;
        studio.commit_crop().await?;
        studio.close_edit_panel();
    }

    if let Some(text) = &args.watermark {
        show_at_natural_size(studio, None);
        let mut spec = studio.default_watermark_spec();
        spec.set_text(text);
        if let Some(style) = args.style {
            spec.style = style;
        }
        if let Some(color) = &args.color {
            spec.set_color(color);
        }
        if let Some(size) = args.size {
            spec.font_size = FontSize::new(size);
        }
        studio.open_edit_panel()?;
        studio.enter_watermark(spec)?;
        studio.commit_watermark().await?;
        studio.close_edit_panel();
    }

    let record = studio.current().ok_or(EditError::NoImage)?;
    let name = record.name().to_string();
    let rendered = studio.render_current()?;
    let path = args.out.join(output_name(&name, rendered.mime_type()));
    tokio::fs::write(&path, rendered.bytes()).await?;
    Ok(path)
}

/// Lays the current image out at `display`, or 1:1 with its pixels.
fn show_at_natural_size(studio: &mut Studio_, display: Option<Size>) {
    let natural = studio.current().map(|record| record.natural_size());
    if let Some((width, height)) = natural {
        let size = display.unwrap_or_else(|| Size::new(width as f32, height as f32));
        studio.surface_mut().set_display_size(size);
    }
}

/// `photo.jpeg` rendered as PNG becomes `photo-edited.png`.
fn output_name(name: &str, mime_type: &str) -> String {
    let stem = Path::new(name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string());
    let extension = image_rs_extension(mime_type);
    format!("{}-edited.{}", stem, extension)
}

fn image_rs_extension(mime_type: &str) -> &'static str {
    match mime_type {
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/bmp" => "bmp",
        "image/tiff" => "tiff",
        "image/webp" => "webp",
        _ => "png",
    }
}
