//! # ShapeReg IO
//!
//! Collaborators around the regularization engine: the CSV decoder that
//! turns `path_id,segment_id,x,y` rows into a document, the matching CSV
//! writer, and an SVG renderer for visual inspection.

pub mod csv;
pub mod svg;

pub use csv::{format_document, parse_document, read_document, write_document};
pub use svg::{render_document, write_svg, SvgOptions, Viewport, PATH_COLOURS};
