use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "energy-sankey", version)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Options JSON (same keys as the library options, camelCase).
    #[arg(long, global = true)]
    options: Option<PathBuf>,

    /// Verbose logging, including every emitted event.
    #[arg(long, global = true)]
    debug: bool,

    /// Start with waste-heat flows hidden.
    #[arg(long, global = true)]
    hide_waste: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one year as PNG or SVG (chosen by the output extension).
    Frame(FrameArgs),
    /// Render the whole playback as MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print one year's totals and flow geometry as JSON.
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Input dataset JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[arg(long)]
    year: i32,

    /// Output `.png` or `.svg` path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Input dataset JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 30)]
    fps: u32,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Input dataset JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[arg(long)]
    year: i32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.common.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let options = read_options(&cli.common)?;
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args, &options),
        Command::Render(args) => cmd_render(args, &options),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn read_options(common: &CommonArgs) -> anyhow::Result<energy_sankey::SankeyOptions> {
    let mut options = match &common.options {
        Some(path) => {
            let s = std::fs::read_to_string(path)
                .with_context(|| format!("read options '{}'", path.display()))?;
            energy_sankey::SankeyOptions::from_json_str(&s)
                .with_context(|| format!("parse options '{}'", path.display()))?
        }
        None => energy_sankey::SankeyOptions::default(),
    };
    if common.debug {
        options.debug_logging = true;
    }
    if common.hide_waste {
        options.show_waste_heat = false;
    }
    Ok(options)
}

fn read_dataset(path: &Path) -> anyhow::Result<energy_sankey::DataStore> {
    let f = File::open(path).with_context(|| format!("open dataset '{}'", path.display()))?;
    let store = energy_sankey::DataStore::from_reader(BufReader::new(f))
        .with_context(|| format!("load dataset '{}'", path.display()))?;
    Ok(store)
}

fn cmd_frame(args: FrameArgs, options: &energy_sankey::SankeyOptions) -> anyhow::Result<()> {
    let store = read_dataset(&args.in_path)?;
    let is_svg = args
        .out
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

    if is_svg {
        let svg = energy_sankey::render_year_svg(store, options, args.year)?;
        if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(&args.out, svg)
            .with_context(|| format!("write svg '{}'", args.out.display()))?;
    } else {
        energy_sankey::render_year_png(store, options, args.year, &args.out)?;
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs, options: &energy_sankey::SankeyOptions) -> anyhow::Result<()> {
    let store = read_dataset(&args.in_path)?;
    let stats = energy_sankey::render_playback_mp4(store, options, &args.out, args.fps)?;
    eprintln!(
        "wrote {} ({} frames, {} years)",
        args.out.display(),
        stats.frames,
        stats.years
    );
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let store = read_dataset(&args.in_path)?;
    let Some(record) = store.record_by_year(args.year) else {
        anyhow::bail!(
            "year {} is not in the dataset ({}..={})",
            args.year,
            store.first_year(),
            store.last_year()
        );
    };
    let totals = energy_sankey::Totals::aggregate(&store);
    let index = store.year_index(args.year).unwrap_or_default();
    let year_totals = totals
        .for_index(index)
        .context("totals missing for year")?;
    let graph = energy_sankey::FlowGeometry::build_year(
        record,
        year_totals,
        &totals.box_tops,
        store.catalog(),
    );
    println!("{}", serde_json::to_string_pretty(&graph)?);
    Ok(())
}
