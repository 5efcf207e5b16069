use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use drillframe::RasterBackend as _;

const FONT_ENV: &str = "DRILLFRAME_FONT";

#[derive(Parser, Debug)]
#[command(name = "drillframe", version)]
struct Cli {
    /// Log progress to stderr (repeat for debug output).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and validate a drill payload.
    Validate(ValidateArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a thumbnail of the first frame as a PNG.
    Thumbnail(ThumbnailArgs),
    /// Export all frames as an animated GIF.
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input drill JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input drill JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    frame: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 640)]
    width: u32,

    #[arg(long, default_value_t = 400)]
    height: u32,

    /// TTF/OTF font for text elements (falls back to $DRILLFRAME_FONT).
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ThumbnailArgs {
    /// Input drill JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, value_enum, default_value_t = ModeChoice::FirstElement)]
    mode: ModeChoice,

    #[arg(long, default_value_t = 160)]
    width: u32,

    #[arg(long, default_value_t = 100)]
    height: u32,

    /// TTF/OTF font for text elements (falls back to $DRILLFRAME_FONT).
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input drill JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 640)]
    width: u32,

    #[arg(long, default_value_t = 400)]
    height: u32,

    /// Delay for frames without their own `durationMs`.
    #[arg(long, default_value_t = 1000)]
    frame_ms: u32,

    /// Play the GIF once instead of looping.
    #[arg(long)]
    once: bool,

    /// TTF/OTF font for text elements (falls back to $DRILLFRAME_FONT).
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    FirstElement,
    FullFrame,
}

impl From<ModeChoice> for drillframe::ThumbnailMode {
    fn from(m: ModeChoice) -> Self {
        match m {
            ModeChoice::FirstElement => Self::FirstElement,
            ModeChoice::FullFrame => Self::FullFrame,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Thumbnail(args) => cmd_thumbnail(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_drill_json(path: &Path) -> anyhow::Result<drillframe::DrillDocument> {
    drillframe::DrillDocument::from_path(path)
        .with_context(|| format!("load drill '{}'", path.display()))
}

fn raster_opts(font: Option<&Path>) -> anyhow::Result<drillframe::RasterOpts> {
    let font = font
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(FONT_ENV).map(PathBuf::from));
    let opts = drillframe::RasterOpts::default();
    match font {
        Some(path) => opts
            .with_font_file(&path)
            .with_context(|| format!("load font '{}'", path.display())),
        None => Ok(opts),
    }
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let doc = read_drill_json(&args.in_path)?;
    eprintln!("ok: {} frames, {} elements", doc.len(), doc.element_count());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let doc = read_drill_json(&args.in_path)?;
    let frame = doc
        .frame(args.frame)
        .ok_or_else(|| drillframe::DrillError::frame_index(args.frame, doc.len()))?;
    drillframe::Canvas::new(args.width, args.height)?;

    let mut raster = drillframe::CpuRasterizer::new(raster_opts(args.font.as_deref())?);
    let commands = drillframe::render(frame, args.width, args.height);
    let bitmap = raster.rasterize(&commands, args.width, args.height)?;
    write_output(&args.out, &drillframe::encode_png(&bitmap)?)
}

fn cmd_thumbnail(args: ThumbnailArgs) -> anyhow::Result<()> {
    let doc = read_drill_json(&args.in_path)?;
    let opts = drillframe::ThumbnailOpts {
        width: args.width,
        height: args.height,
        mode: args.mode.into(),
        raster: raster_opts(args.font.as_deref())?,
        ..Default::default()
    };
    write_output(&args.out, &drillframe::thumbnail_png(&doc, &opts)?)
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let doc = read_drill_json(&args.in_path)?;
    let opts = drillframe::ExportOpts {
        raster: raster_opts(args.font.as_deref())?,
        ..drillframe::ExportOpts::new(args.width, args.height, args.frame_ms)
    };
    let encoder = drillframe::GifEncoder::new(drillframe::GifEncoderOpts {
        repeat: !args.once,
        ..Default::default()
    })?;

    let mut controller = drillframe::ExportController::new();
    let total = doc.len();
    controller.set_observer(move |p| {
        tracing::info!(captured = p.frames_captured, total, "frame captured");
    });
    controller.start_export(&doc, opts, Box::new(encoder))?;

    match controller.run_to_completion()? {
        drillframe::ExportOutcome::Done(artifact) => {
            write_output(&args.out, &artifact.bytes)?;
            eprintln!(
                "{} frames, {} ms",
                artifact.frame_count, artifact.total_duration_ms
            );
            Ok(())
        }
        drillframe::ExportOutcome::Cancelled => anyhow::bail!("export was cancelled"),
    }
}
