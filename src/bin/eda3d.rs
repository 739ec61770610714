//! eda3d: explore a CSV file and build 3D chart specifications.
//!
//! Run: `eda3d eda data.csv show summary`
//!      `eda3d plot data.csv --kind bubble --color species -o fig.json`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use eda3d::charts::{build_chart, ChartKind, ChartRequest};
use eda3d::config::Config;
use eda3d::eda;
use eda3d::scale::Colorscale;
use eda3d::selection::AxisSelection;
use eda3d::table::Table;

/// eda3d: 3D exploratory data analysis
#[derive(Parser, Debug)]
#[command(name = "eda3d")]
#[command(version)]
#[command(about = "Explore CSV data and build 3D chart specifications", long_about = None)]
struct Cli {
    /// Log debug output to stderr (overridden by EDA3D_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run an EDA command (show summary, describe column <col>, show columns)
    Eda {
        /// CSV file
        csv: PathBuf,
        /// Command words
        #[arg(required = true, trailing_var_arg = true)]
        command: Vec<String>,
    },
    /// Build a chart and write its JSON specification
    Plot(PlotArgs),
}

#[derive(clap::Args, Debug)]
struct PlotArgs {
    /// CSV file
    csv: PathBuf,

    /// Chart kind (scatter, surface, bar, line, bubble, custom-scatter)
    #[arg(short, long, default_value = "scatter")]
    kind: ChartKind,

    /// X column (default: first numeric column)
    #[arg(long)]
    x: Option<String>,

    /// Y column (default: second numeric column)
    #[arg(long)]
    y: Option<String>,

    /// Z column (default: third numeric column)
    #[arg(long)]
    z: Option<String>,

    /// Color column, numeric or categorical
    #[arg(long)]
    color: Option<String>,

    /// Size column (default for bubble charts: fourth numeric column)
    #[arg(long)]
    size: Option<String>,

    /// YAML config with default style
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Colorscale (Plasma, Viridis, Inferno, Magma, Cividis, Bluered, RdBu, Jet, Rainbow, Turbo)
    #[arg(long)]
    colorscale: Option<Colorscale>,

    /// Marker base size, 2 to 20
    #[arg(long)]
    marker_size: Option<u32>,

    /// Marker opacity, 0.1 to 1.0
    #[arg(long)]
    opacity: Option<f32>,

    /// Camera rotation around x, -180 to 180
    #[arg(long, allow_hyphen_values = true)]
    camera_x: Option<f32>,

    /// Camera rotation around y, -180 to 180
    #[arg(long, allow_hyphen_values = true)]
    camera_y: Option<f32>,

    /// Camera rotation around z, -180 to 180
    #[arg(long, allow_hyphen_values = true)]
    camera_z: Option<f32>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON
    #[arg(long)]
    pretty: bool,
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env("EDA3D_LOG")
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_table(path: &Path) -> Result<Table> {
    Table::from_csv_path(path).with_context(|| format!("failed to load {}", path.display()))
}

fn run_eda(csv: &Path, words: &[String]) -> Result<()> {
    let table = load_table(csv)?;
    let report = eda::run(&table, &words.join(" "))?;
    print!("{report}");
    Ok(())
}

fn build_request(args: &PlotArgs, table: &Table) -> Result<ChartRequest> {
    let defaults = AxisSelection::defaults(table);
    let pick = |given: &Option<String>, default: Option<&String>, axis: &str| {
        given
            .clone()
            .or_else(|| default.cloned())
            .with_context(|| format!("no {axis} column given and fewer than three numeric columns"))
    };

    let mut style = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?
            .style,
        None => Config::default().style,
    };
    if let Some(c) = args.colorscale {
        style.colorscale = c;
    }
    if let Some(s) = args.marker_size {
        style.marker_size = s;
    }
    if let Some(o) = args.opacity {
        style.opacity = o;
    }
    style.camera_x = args.camera_x.unwrap_or(style.camera_x);
    style.camera_y = args.camera_y.unwrap_or(style.camera_y);
    style.camera_z = args.camera_z.unwrap_or(style.camera_z);

    let size = match (&args.size, args.kind) {
        (Some(s), _) => Some(s.clone()),
        (None, ChartKind::Bubble) => defaults.as_ref().and_then(|d| d.size.clone()),
        (None, _) => None,
    };

    Ok(ChartRequest {
        kind: args.kind,
        x: pick(&args.x, defaults.as_ref().map(|d| &d.x), "x")?,
        y: pick(&args.y, defaults.as_ref().map(|d| &d.y), "y")?,
        z: pick(&args.z, defaults.as_ref().map(|d| &d.z), "z")?,
        color: args.color.clone(),
        size,
        style,
    })
}

fn run_plot(args: &PlotArgs) -> Result<()> {
    let table = load_table(&args.csv)?;
    let request = build_request(args, &table)?;
    let output = build_chart(&table, &request)?;

    for w in &output.warnings {
        eprintln!("Warning: {w}");
    }

    let json = if args.pretty { output.figure.to_json_pretty()? } else { output.figure.to_json()? };
    match &args.output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), kind = request.kind.id(), "wrote chart");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Command::Eda { csv, command } => run_eda(csv, command).map_err(|e| ("Error", e)),
        Command::Plot(args) => run_plot(args).map_err(|e| ("Error generating plot", e)),
    };

    if let Err((prefix, e)) = result {
        eprintln!("{prefix}: {e:#}");
        std::process::exit(1);
    }
}
