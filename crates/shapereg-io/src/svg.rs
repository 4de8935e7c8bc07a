//! SVG rendering of curve documents.
//!
//! Every curve is drawn as a polyline. Curves of the same path share a
//! colour, cycling through [`PATH_COLOURS`]. The drawing keeps equal aspect
//! with +Y pointing up.

use shapereg_core::{Curve, Result};
use std::path::Path;
use tracing::info;

/// Blue, green, red, cyan, magenta, yellow, black.
pub const PATH_COLOURS: [&str; 7] = [
    "#0000ff", "#008000", "#ff0000", "#00bfbf", "#bf00bf", "#bfbf00", "#000000",
];

/// Output settings for [`render_document`].
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    pub width: f64,
    pub height: f64,
    /// Fraction of each dimension kept clear on every side (0.0 - 0.5).
    pub padding: f64,
    pub stroke_width: f64,
    pub title: Option<String>,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
            padding: 0.05,
            stroke_width: 2.0,
            title: None,
        }
    }
}

/// Uniform world-to-pixel mapping with a flipped Y axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_height: f64,
}

impl Viewport {
    /// Identity zoom with the world origin at the bottom-left corner.
    pub fn new(canvas_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_height,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Centres the bounding box in the canvas at the largest zoom that fits
    /// both dimensions.
    ///
    /// A box that is flat in one dimension is fitted by the other; a single
    /// point is centred at unit zoom.
    pub fn fit_to_bounds(
        canvas_width: f64,
        canvas_height: f64,
        (min_x, min_y, max_x, max_y): (f64, f64, f64, f64),
        padding: f64,
    ) -> Self {
        let width = max_x - min_x;
        let height = max_y - min_y;
        let usable = 1.0 - padding * 2.0;

        let zoom_x = if width > 0.0 {
            canvas_width * usable / width
        } else {
            f64::INFINITY
        };
        let zoom_y = if height > 0.0 {
            canvas_height * usable / height
        } else {
            f64::INFINITY
        };
        let zoom = match zoom_x.min(zoom_y) {
            z if z.is_finite() => z,
            _ => 1.0,
        };

        // pixel_x = world_x * zoom + pan_x, with the box centred.
        let pan_x = canvas_width / 2.0 - (min_x + width / 2.0) * zoom;
        let pan_y = canvas_height / 2.0 - (min_y + height / 2.0) * zoom;

        Self {
            zoom,
            pan_x,
            pan_y,
            canvas_height,
        }
    }

    /// World (+Y up) to pixel (+Y down) coordinates.
    pub fn world_to_pixel(&self, world_x: f64, world_y: f64) -> (f64, f64) {
        let pixel_x = world_x * self.zoom + self.pan_x;
        let pixel_y = self.canvas_height - (world_y * self.zoom + self.pan_y);
        (pixel_x, pixel_y)
    }
}

fn document_bounds(paths: &[Vec<Curve>]) -> Option<(f64, f64, f64, f64)> {
    paths
        .iter()
        .flatten()
        .filter_map(Curve::bounding_box)
        .reduce(|a, b| (a.0.min(b.0), a.1.min(b.1), a.2.max(b.2), a.3.max(b.3)))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Renders curves to an SVG document.
pub fn render_document(paths: &[Vec<Curve>], options: &SvgOptions) -> String {
    let viewport = match document_bounds(paths) {
        Some(bounds) => {
            Viewport::fit_to_bounds(options.width, options.height, bounds, options.padding)
        }
        None => Viewport::new(options.height),
    };

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = options.width,
        h = options.height
    ));
    svg.push_str("<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");
    if let Some(title) = &options.title {
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"16\">{}</text>\n",
            options.width / 2.0,
            options.height * options.padding.max(0.03) * 0.75,
            escape(title)
        ));
    }

    for (index, path) in paths.iter().enumerate() {
        let colour = PATH_COLOURS[index % PATH_COLOURS.len()];
        svg.push_str(&format!(
            "<g id=\"path-{}\" stroke=\"{}\" fill=\"none\">\n",
            index, colour
        ));
        for curve in path {
            match curve.points() {
                [] => {}
                [p] => {
                    let (x, y) = viewport.world_to_pixel(p.x, p.y);
                    svg.push_str(&format!(
                        "<circle cx=\"{:.3}\" cy=\"{:.3}\" r=\"{}\" fill=\"{}\"/>\n",
                        x, y, options.stroke_width, colour
                    ));
                }
                points => {
                    let coords: Vec<String> = points
                        .iter()
                        .map(|p| {
                            let (x, y) = viewport.world_to_pixel(p.x, p.y);
                            format!("{:.3},{:.3}", x, y)
                        })
                        .collect();
                    svg.push_str(&format!(
                        "<polyline points=\"{}\" stroke-width=\"{}\" stroke-linejoin=\"round\"/>\n",
                        coords.join(" "),
                        options.stroke_width
                    ));
                }
            }
        }
        svg.push_str("</g>\n");
    }

    svg.push_str("</svg>\n");
    svg
}

/// Renders curves and writes the SVG to `path`.
pub fn write_svg(path: impl AsRef<Path>, paths: &[Vec<Curve>], options: &SvgOptions) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, render_document(paths, options))?;
    info!("Rendered {} paths to {}", paths.len(), path.display());
    Ok(())
}
