use std::fs;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use mapf_replay::render::raster::{RasterOpts, RasterSurface};
use mapf_replay::{ColorAssigner, HashedHue, PaletteCycle, ReplaySession, ReplaySurface as _};

#[derive(Parser, Debug)]
#[command(name = "mapf-replay", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render playback loops as a PNG frame sequence.
    Render(RenderArgs),
    /// Print the assembled frame timeline as JSON.
    Dump(DumpArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Trajectory log file.
    #[arg(long, default_value = "toto.txt")]
    log: PathBuf,

    /// Output directory for `frame_NNNN.png` files.
    #[arg(long)]
    out: PathBuf,

    /// Side length of one map cell in pixels.
    #[arg(long, default_value_t = 8)]
    cell: u32,

    /// Number of full playback loops to render.
    #[arg(long, default_value_t = 1)]
    loops: usize,

    /// Agent color assignment strategy.
    #[arg(long, value_enum, default_value_t = ColorChoice::Palette)]
    colors: ColorChoice,
}

#[derive(Parser, Debug)]
struct DumpArgs {
    /// Trajectory log file.
    #[arg(long, default_value = "toto.txt")]
    log: PathBuf,

    /// Agent color assignment strategy.
    #[arg(long, value_enum, default_value_t = ColorChoice::Palette)]
    colors: ColorChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColorChoice {
    /// Deterministic 12-color palette, cycled in recording order.
    Palette,
    /// Deterministic per-id hue spread.
    Hashed,
}

impl ColorChoice {
    fn assigner(self) -> Box<dyn ColorAssigner> {
        match self {
            ColorChoice::Palette => Box::new(PaletteCycle::new()),
            ColorChoice::Hashed => Box::new(HashedHue),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Dump(args) => cmd_dump(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut colors = args.colors.assigner();
    let session = ReplaySession::load_with_colors(&args.log, colors.as_mut())?;
    let (rows, cols) = session.timeline().bounding_cells();
    tracing::debug!(rows, cols, "trajectory extent");

    fs::create_dir_all(&args.out)
        .with_context(|| format!("create output directory '{}'", args.out.display()))?;

    let mut surface = RasterSurface::new(RasterOpts {
        cell_px: args.cell,
        ..RasterOpts::default()
    });
    surface.set_background(session.map())?;
    surface.draw_goals(session.timeline().goals())?;

    let mut controller = session.controller();
    let total = session.timeline().len() * args.loops;
    for i in 0..total {
        controller.advance(&mut surface)?;
        let path = args.out.join(format!("frame_{i:04}.png"));
        surface.save_last(&path)?;
    }
    tracing::info!(frames = total, out = %args.out.display(), "render complete");
    Ok(())
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let mut colors = args.colors.assigner();
    let session = ReplaySession::load_with_colors(&args.log, colors.as_mut())?;
    let json = serde_json::to_string_pretty(session.timeline())
        .context("serialize timeline to JSON")?;
    println!("{json}");
    Ok(())
}
