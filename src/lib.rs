//! # ShapeReg
//!
//! Regularizes noisy hand- or machine-drawn curves into idealized
//! geometric primitives.
//!
//! ## Architecture
//!
//! ShapeReg is organized as a workspace with multiple crates:
//!
//! 1. **shapereg-core** - Point/curve data model, error taxonomy, configuration
//! 2. **shapereg-engine** - Line/circle/hull tests, smoothing fallback, pipeline
//! 3. **shapereg-io** - CSV decoding and persistence, SVG rendering
//! 4. **shapereg** - Command-line binary that wires the crates together
//!
//! ## Flow
//!
//! ```text
//! CSV rows → Document → ShapeRegularizationPipeline → RegularizedDocument
//!                                                     ├── CSV (optional)
//!                                                     └── SVG (optional)
//! ```

use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use shapereg_engine as engine;
pub use shapereg_io as io;

pub use shapereg_core::{Curve, Document, Point, RegularizationConfig};
pub use shapereg_engine::{
    CanonicalShape, Classification, RegularizedDocument, ShapeKind, ShapeRegularizationPipeline,
    ShapeSummary,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// One regularization run: where to read, what to produce.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub input: PathBuf,
    /// Regularized shapes as CSV.
    pub output: Option<PathBuf>,
    /// Regularized shapes as SVG.
    pub svg: Option<PathBuf>,
    /// Input curves as SVG, for side-by-side comparison.
    pub input_svg: Option<PathBuf>,
    pub config: RegularizationConfig,
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Reads the input document, regularizes it, and writes the requested outputs.
///
/// Nothing is written unless an output path is given.
pub fn run(options: &RunOptions) -> anyhow::Result<RegularizedDocument> {
    options
        .config
        .validate()
        .context("Invalid regularization configuration")?;

    let document = shapereg_io::read_document(&options.input)
        .with_context(|| format!("Failed to read {}", options.input.display()))?;
    let label = file_label(&options.input);

    if let Some(path) = &options.input_svg {
        let svg_options = shapereg_io::SvgOptions {
            title: Some(format!("Input Paths - {}", label)),
            ..Default::default()
        };
        shapereg_io::write_svg(path, &document, &svg_options)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    let pipeline = ShapeRegularizationPipeline::new(options.config.clone());
    let config = pipeline.regularizer().config();
    debug!(
        "Thresholds: line residual < {}, circle cv < {}, rectangle hull = {}, smoothing factor {}",
        config.line_residual_threshold,
        config.circle_cv_threshold,
        config.rectangle_hull_vertices,
        config.smoothing_factor
    );
    let result = pipeline.regularize(&document);
    let curves = result.curves();

    if let Some(path) = &options.output {
        shapereg_io::write_document(path, &curves)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    if let Some(path) = &options.svg {
        let svg_options = shapereg_io::SvgOptions {
            title: Some(format!("Regularized Paths - {}", label)),
            ..Default::default()
        };
        shapereg_io::write_svg(path, &curves, &svg_options)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    info!("Finished {}", label);
    Ok(result)
}

/// Initialize logging
///
/// Sets up structured logging with:
/// - stderr output, so stdout stays free for results
/// - RUST_LOG environment variable support (default `info`)
/// - JSON lines instead of human-readable text when `json` is set
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_line_number(true),
            )
            .try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))
}
