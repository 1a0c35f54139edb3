use std::path::{Path, PathBuf};

use anyhow::Context;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use doorwin::annotate::LabelFont;
use doorwin::config::{self, AppConfig};
use doorwin::placement::{self, PLACED_IMAGE_NAME, PlacementBoard};
use doorwin::session::{self, DetectionSession};
use doorwin::view::Size;
use doorwin::{MultiThresholdDetector, ResultPersister, YoloDetector};

#[derive(Parser)]
#[command(name = "doorwin")]
#[command(about = "Detect doors and windows in house photographs")]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Settings {
    /// Path to the exported model weights (.rten)
    #[arg(long, env = "DOORWIN_WEIGHTS", default_value = config::DEFAULT_WEIGHTS_PATH, global = true)]
    weights: PathBuf,

    /// Directory the annotated image and coordinates are written to
    #[arg(long, env = "DOORWIN_OUTPUT_DIR", default_value = doorwin::persist::DEFAULT_OUTPUT_DIR, global = true)]
    output_dir: PathBuf,

    /// TrueType font used for box labels
    #[arg(long, env = "DOORWIN_FONT", global = true)]
    font: Option<PathBuf>,

    /// Display area used to compute the initial scale, as WIDTHxHEIGHT
    #[arg(long, value_parser = config::parse_viewport, default_value = "720x600", global = true)]
    viewport: Size,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Run the threshold sweep on one image and save the results
    Detect {
        /// Path to input image file
        #[arg(value_name = "IMAGE")]
        image_path: PathBuf,

        /// Print detections without writing output files
        #[arg(long)]
        no_save: bool,
    },
    /// Place an image into the saved detection box under a point
    Place {
        /// Image to stretch into the box
        #[arg(value_name = "OVERLAY")]
        overlay: PathBuf,

        /// X coordinate in saved-image pixels
        #[arg(long, allow_negative_numbers = true)]
        x: i32,

        /// Y coordinate in saved-image pixels
        #[arg(long, allow_negative_numbers = true)]
        y: i32,

        /// Overlay opacity between 0 and 1
        #[arg(long, value_parser = config::parse_opacity, default_value = "1.0")]
        opacity: f32,

        /// Where to write the composite (defaults to the output directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Open the interactive detection window
    #[cfg(feature = "gui")]
    Gui,
}

impl Settings {
    fn into_config(self) -> AppConfig {
        AppConfig {
            weights_path: self.weights,
            output_dir: self.output_dir,
            label_font: self.font,
            viewport: self.viewport,
            ..AppConfig::default()
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(args.settings.verbose);
    let config = args.settings.into_config();

    match args.command {
        Command::Detect {
            image_path,
            no_save,
        } => run_detect(&config, &load_detector(&config)?, &image_path, no_save),
        Command::Place {
            overlay,
            x,
            y,
            opacity,
            out,
        } => run_place(&config, &overlay, (x, y), opacity, out),
        #[cfg(feature = "gui")]
        Command::Gui => {
            let detector = load_detector(&config)?;
            doorwin::gui::run(config, detector)
        }
    }
}

/// A missing model is fatal before any window or output exists
fn load_detector(config: &AppConfig) -> anyhow::Result<MultiThresholdDetector<YoloDetector>> {
    let detector = YoloDetector::load_with_input_size(&config.weights_path, config.input_size)?;
    Ok(MultiThresholdDetector::new(detector))
}

fn run_place(
    config: &AppConfig,
    overlay_path: &Path,
    (x, y): (i32, i32),
    opacity: f32,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut board = PlacementBoard::load(&config.output_dir)
        .context("run `detect` first to produce detection results")?;
    let overlay = placement::open_image(overlay_path)?;
    board.set_opacity(opacity);

    let Some(record) = board.place_at(x, y, overlay) else {
        anyhow::bail!("no detected box contains ({x}, {y})");
    };
    let label = record.class.map_or("unknown", |c| c.name());
    println!(
        "Image placed in {label} box x1:{} y1:{} x2:{} y2:{}",
        record.x1, record.y1, record.x2, record.y2
    );

    let out = out.unwrap_or_else(|| config.output_dir.join(PLACED_IMAGE_NAME));
    let saved = board.save(&out)?;
    println!("Saved placement: {}", saved.display());
    Ok(())
}

fn run_detect(
    config: &AppConfig,
    detector: &MultiThresholdDetector<YoloDetector>,
    image_path: &Path,
    no_save: bool,
) -> anyhow::Result<()> {
    let mut session = DetectionSession::new(config.viewport);
    let loaded = session.load_image(image_path, detector)?;
    println!("{}", session::loaded_status(loaded));

    println!("\n=== Door/Window Detection Results ===");
    println!("Total detections: {}", session.boxes().len());
    for b in session.boxes() {
        println!("  {} ({:.2})", b.coordinate_line(), b.confidence);
    }

    if no_save {
        return Ok(());
    }

    let persister = ResultPersister::new(&config.output_dir)
        .with_font(LabelFont::discover(config.label_font.as_deref()));
    let outcome = session.save(&persister)?;
    println!("\n{}", session::save_status(&outcome));

    Ok(())
}
