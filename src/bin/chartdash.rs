use anyhow::{Result, bail};
use chartdash::dashboard::{DataOrigin, LoadOutcome};
use chartdash::render::render;
use chartdash::{Client, api, fixture, storage, viz};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{error, info, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "chartdash",
    version,
    about = "Render declarative dashboard payloads to SVG/PNG charts"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a dashboard and write one image per chart.
    Render(RenderArgs),
    /// Write the built-in dashboard payload as JSON.
    Fixture(FixtureArgs),
    /// Parse a payload file and report problems.
    Check(CheckArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ImageFormat {
    Svg,
    Png,
}

impl ImageFormat {
    fn extension(self) -> &'static str {
        match self {
            ImageFormat::Svg => "svg",
            ImageFormat::Png => "png",
        }
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Data source URL returning the dashboard payload.
    #[arg(long, env = "API_BASE_URL")]
    url: Option<String>,
    /// Skip the fetch and use the built-in dashboard (overrides --url and --payload).
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Read the payload from a JSON file instead of fetching it.
    #[arg(long)]
    payload: Option<PathBuf>,
    /// Directory receiving `<chart id>.<format>` files (created if missing).
    #[arg(long)]
    out_dir: PathBuf,
    /// Image format.
    #[arg(long, value_enum, default_value_t = ImageFormat::Svg)]
    format: ImageFormat,
    /// Width (px) that percentage chart widths resolve against.
    #[arg(long, default_value_t = 1000)]
    canvas_width: u32,
    /// Also export the dashboard table as CSV.
    #[arg(long)]
    table_csv: Option<PathBuf>,
    /// Delay before falling back to built-in data after a failed fetch.
    #[arg(long, default_value_t = 3000)]
    fallback_delay_ms: u64,
}

#[derive(Args, Debug)]
struct FixtureArgs {
    /// Output path of the JSON file.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Payload JSON file.
    file: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Fixture(args) => cmd_fixture(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn load(args: &RenderArgs) -> Result<LoadOutcome> {
    if args.offline {
        return api::fallback("offline mode requested");
    }
    if let Some(path) = &args.payload {
        let payload = storage::load_payload_json(path)?;
        return Ok(LoadOutcome {
            payload,
            origin: DataOrigin::Live,
        });
    }
    Client::new(args.url.clone())?
        .with_fallback_delay(Duration::from_millis(args.fallback_delay_ms))
        .load()
}

/// File name for a chart: its id with path-unfriendly characters replaced.
fn file_stem(id: &str, idx: usize) -> String {
    let stem: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        format!("chart-{}", idx + 1)
    } else {
        stem
    }
}

/// [`file_stem`], suffixed with the chart number when an earlier chart
/// already claimed the same name.
fn unique_stem(taken: &mut HashSet<String>, id: &str, idx: usize) -> String {
    let mut stem = file_stem(id, idx);
    if taken.contains(&stem) {
        let renamed = format!("{}-{}", stem, idx + 1);
        warn!("chart {:?} would overwrite {}; writing {} instead", id, stem, renamed);
        stem = renamed;
    }
    taken.insert(stem.clone());
    stem
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let outcome = load(&args)?;
    let payload = &outcome.payload;
    for w in payload.lint() {
        warn!("{}", w);
    }

    println!("{}", payload.title());
    match &outcome.origin {
        DataOrigin::Live => println!("source: live"),
        DataOrigin::Fallback { reason } => println!("source: offline data ({})", reason),
    }
    if !payload.insights.summary.is_empty() {
        println!("{}", payload.insights.summary);
    }

    std::fs::create_dir_all(&args.out_dir)?;
    let ext = args.format.extension();
    let mut failed = 0usize;
    let mut taken = HashSet::new();
    for (idx, chart) in payload.charts.iter().enumerate() {
        let stem = unique_stem(&mut taken, &chart.id, idx);
        let path = args.out_dir.join(format!("{}.{}", stem, ext));
        let view = render(chart);
        match viz::render_to_file(&view, &path, args.canvas_width) {
            Ok(()) => {
                info!("wrote {}", path.display());
                eprintln!("Wrote {}", path.display());
            }
            Err(err) => {
                failed += 1;
                error!("chart {:?} failed: {:#}", chart.id, err);
                eprintln!("Failed to draw chart {:?}: {:#}", chart.id, err);
            }
        }
    }

    if let Some(csv_path) = &args.table_csv {
        storage::save_table_csv(&payload.table_data, csv_path)?;
        eprintln!(
            "Saved {} table rows to {}",
            payload.table_data.rows.len(),
            csv_path.display()
        );
    }

    if failed > 0 {
        bail!("{} of {} charts could not be drawn", failed, payload.charts.len());
    }
    Ok(())
}

fn cmd_fixture(args: FixtureArgs) -> Result<()> {
    let payload = fixture::fallback_payload()?;
    ensure_parent(&args.out)?;
    storage::save_payload_json(&payload, &args.out)?;
    eprintln!(
        "Wrote built-in dashboard ({} charts) to {}",
        payload.charts.len(),
        args.out.display()
    );
    Ok(())
}

fn cmd_check(args: CheckArgs) -> Result<()> {
    let payload = storage::load_payload_json(&args.file)?;
    println!("{}", payload.title());
    for chart in &payload.charts {
        println!(
            "{:<32} {:<10} rows={} series={}",
            chart.id,
            chart.kind.as_str(),
            chart.data.len(),
            chart.series.len()
        );
    }
    let warnings = payload.lint();
    for w in &warnings {
        println!("warning: {}", w);
    }
    if warnings.is_empty() {
        println!("ok");
    }
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}
