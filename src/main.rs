use anyhow::Context;
use clap::Parser;
use shapereg::{init_logging, run, RegularizationConfig, RunOptions, BUILD_DATE, VERSION};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "shapereg",
    version,
    about = "Regularize noisy curves into lines, circles, rectangles, and polygons"
)]
struct Cli {
    /// Input CSV with path_id,segment_id,x,y rows
    input: PathBuf,

    /// Write regularized shapes to this CSV file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Render regularized shapes to this SVG file
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Render the input curves to this SVG file
    #[arg(long)]
    input_svg: Option<PathBuf>,

    /// Regularization settings (.json or .toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum least-squares residual for a straight line
    #[arg(long)]
    line_threshold: Option<f64>,

    /// Maximum radius coefficient of variation for a circle
    #[arg(long)]
    circle_threshold: Option<f64>,

    /// Hull vertex count treated as a rectangle
    #[arg(long)]
    rectangle_vertices: Option<usize>,

    /// Target residual of the smoothing spline
    #[arg(long)]
    smoothing: Option<f64>,

    /// Save the effective settings to this file (.json or .toml)
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Print the shape summary as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    fn regularization_config(&self) -> anyhow::Result<RegularizationConfig> {
        let mut config = match &self.config {
            Some(path) => RegularizationConfig::load_from_file(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => RegularizationConfig::default(),
        };
        if let Some(value) = self.line_threshold {
            config.line_residual_threshold = value;
        }
        if let Some(value) = self.circle_threshold {
            config.circle_cv_threshold = value;
        }
        if let Some(value) = self.rectangle_vertices {
            config.rectangle_hull_vertices = value;
        }
        if let Some(value) = self.smoothing {
            config.smoothing_factor = value;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json)?;
    info!("shapereg {} (built {})", VERSION, BUILD_DATE);

    let config = cli.regularization_config()?;
    if let Some(path) = &cli.save_config {
        config
            .save_to_file(path)
            .with_context(|| format!("Failed to save settings to {}", path.display()))?;
    }

    let options = RunOptions {
        input: cli.input.clone(),
        output: cli.output.clone(),
        svg: cli.svg.clone(),
        input_svg: cli.input_svg.clone(),
        config,
    };
    let result = run(&options)?;
    let summary = result.summary();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{} curves: {} lines, {} circles, {} rectangles, {} polygons, {} raw ({} smoothed)",
            summary.total(),
            summary.lines,
            summary.circles,
            summary.rectangles,
            summary.polygons,
            summary.raw,
            summary.smoothed
        );
        for report in &result.reports {
            println!("  path {} curve {}: {}", report.path, report.curve, report.error);
        }
    }

    Ok(())
}
