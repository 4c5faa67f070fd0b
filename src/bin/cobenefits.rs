use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use cobenefits::{
    ChartKind, Millis, Page, Rasterizer, Scene, Surface, TileProvider, UrlTemplateTiles, VizConfig,
};

#[derive(Parser, Debug)]
#[command(name = "cobenefits", version)]
struct Cli {
    /// Configuration JSON (defaults apply to every missing field).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one chart as SVG or PNG.
    Chart(ChartArgs),
    /// Render a chart's entrance animation as a PNG sequence.
    Frames(FramesArgs),
    /// Render the whole page at a scroll position and time.
    Page(PageArgs),
    /// Dump the dataset as JSON.
    Data(DataArgs),
}

#[derive(Parser, Debug)]
struct ChartArgs {
    #[arg(long, value_enum)]
    kind: ChartKind,

    /// Container width in px (defaults to the configured viewport width).
    #[arg(long)]
    width: Option<f64>,

    /// Container height in px (defaults to the chart's preferred height).
    #[arg(long)]
    height: Option<f64>,

    /// Time since the chart was triggered; omitted means fully settled.
    #[arg(long)]
    at_ms: Option<u64>,

    /// Selected year of the timeline chart.
    #[arg(long, default_value_t = 2025)]
    year: u16,

    /// `{z}/{x}/{y}` tile URL template for the map.
    #[arg(long)]
    tiles: Option<String>,

    /// Extra font directory for PNG output.
    #[arg(long)]
    fonts: Option<PathBuf>,

    /// Output path; `.svg` or `.png`.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[arg(long, value_enum)]
    kind: ChartKind,

    #[arg(long)]
    width: Option<f64>,

    /// Overrides the configured frame rate.
    #[arg(long)]
    fps: Option<u32>,

    #[arg(long, default_value_t = 2025)]
    year: u16,

    #[arg(long)]
    tiles: Option<String>,

    #[arg(long)]
    fonts: Option<PathBuf>,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PageArgs {
    #[arg(long)]
    width: Option<f64>,

    #[arg(long)]
    height: Option<f64>,

    /// Scroll offset in px.
    #[arg(long, default_value_t = 0.0)]
    scroll: f64,

    /// Scroll to a section instead (`#timeline` or `timeline`).
    #[arg(long, conflicts_with = "scroll")]
    anchor: Option<String>,

    /// Page time to advance to after scrolling.
    #[arg(long, default_value_t = 0)]
    at_ms: u64,

    /// Timeline year to select before advancing.
    #[arg(long)]
    year: Option<u16>,

    /// Start timeline playback before advancing.
    #[arg(long)]
    play: bool,

    /// Only what the viewport shows instead of the whole document.
    #[arg(long)]
    viewport: bool,

    #[arg(long)]
    tiles: Option<String>,

    #[arg(long)]
    fonts: Option<PathBuf>,

    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct DataArgs {
    /// Output file; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => VizConfig::from_json_path(path)?,
        None => VizConfig::default(),
    };
    match cli.cmd {
        Command::Chart(args) => cmd_chart(&config, args),
        Command::Frames(args) => cmd_frames(&config, args),
        Command::Page(args) => cmd_page(config, args),
        Command::Data(args) => cmd_data(args),
    }
}

fn tile_provider(
    config: &VizConfig,
    template: Option<String>,
) -> anyhow::Result<Option<Arc<dyn TileProvider>>> {
    match template {
        Some(t) => Ok(Some(Arc::new(UrlTemplateTiles::new(t)?))),
        None => Ok(config.tile_provider()?),
    }
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_scene(scene: &Scene, out: &Path, fonts: Option<PathBuf>) -> anyhow::Result<()> {
    ensure_parent(out)?;
    let ext = out
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("svg") => std::fs::write(out, cobenefits::to_svg(scene))
            .with_context(|| format!("write svg '{}'", out.display()))?,
        Some("png") => Rasterizer::new(fonts).rasterize(scene)?.save_png(out)?,
        _ => anyhow::bail!("output '{}' must end in .svg or .png", out.display()),
    }
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn build_chart_scene(
    config: &VizConfig,
    kind: ChartKind,
    width: Option<f64>,
    height: Option<f64>,
    year: u16,
    tiles: Option<String>,
) -> anyhow::Result<Scene> {
    let tiles = tile_provider(config, tiles)?;
    if kind == ChartKind::Map && tiles.is_none() {
        tracing::warn!("map requested without a tile provider; output will be empty");
    }
    let chart = config.chart(kind, year, tiles);
    let width = width.unwrap_or(config.viewport.width);
    let height = height.unwrap_or_else(|| chart.preferred_height(width));
    let surface = Surface::new(width, height);
    anyhow::ensure!(surface.is_drawable(), "chart surface {width}x{height} is empty");
    Ok(chart.build(surface).with_background(config.theme.background))
}

fn cmd_chart(config: &VizConfig, args: ChartArgs) -> anyhow::Result<()> {
    let scene = build_chart_scene(
        config,
        args.kind,
        args.width,
        args.height,
        args.year,
        args.tiles,
    )?;
    let scene = match args.at_ms {
        Some(t) => scene.sample(Millis(t)),
        None => scene.settled(),
    };
    write_scene(&scene, &args.out, args.fonts)
}

fn cmd_frames(config: &VizConfig, args: FramesArgs) -> anyhow::Result<()> {
    let scene = build_chart_scene(config, args.kind, args.width, None, args.year, args.tiles)?;
    let mut opts = config.frames.clone();
    if let Some(fps) = args.fps {
        opts.fps = fps;
    }
    let rasterizer = Rasterizer::new(args.fonts);
    let frames = cobenefits::render_sequence(&scene, &rasterizer, &opts)?;
    let paths = cobenefits::write_sequence(&frames, &args.out)?;
    eprintln!("wrote {} frames to {}", paths.len(), args.out.display());
    Ok(())
}

fn cmd_page(mut config: VizConfig, args: PageArgs) -> anyhow::Result<()> {
    if let Some(w) = args.width {
        config.viewport.width = w;
    }
    if let Some(h) = args.height {
        config.viewport.height = h;
    }
    config.validate()?;
    let tiles = tile_provider(&config, args.tiles)?;

    let mut page = Page::new(config, tiles);
    match &args.anchor {
        Some(anchor) => {
            page.navigate(anchor)
                .with_context(|| format!("unknown anchor '{anchor}'"))?;
        }
        None => page.scroll_to(args.scroll),
    }
    if let Some(year) = args.year {
        page.set_year(year);
    }
    if args.play {
        page.toggle_playback();
    }
    page.advance(Millis(args.at_ms));

    let scene = if args.viewport {
        page.viewport_snapshot()
    } else {
        page.snapshot()
    };
    write_scene(&scene, &args.out, args.fonts)
}

fn cmd_data(args: DataArgs) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&cobenefits::data::metrics::dataset())
        .context("serialize dataset")?;
    match args.out {
        Some(path) => {
            ensure_parent(&path)?;
            std::fs::write(&path, json)
                .with_context(|| format!("write dataset '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
