//! CSV decoding and persistence of curve documents.
//!
//! Each row is `path_id,segment_id,x,y`. Identifiers may be written as
//! floats (`0.0`) but must be whole and non-negative. Paths and segments are
//! ordered by ascending identifier; rows within a segment keep file order.
//! Blank lines and `#` comments are skipped.

use shapereg_core::{Curve, DecodeError, Document, Point, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Columns per row.
pub const COLUMNS: usize = 4;

/// Reads and decodes a document from a CSV file.
pub fn read_document(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let document = parse_document(&content)?;
    info!(
        "Read {} paths ({} curves) from {}",
        document.len(),
        document.iter().map(Vec::len).sum::<usize>(),
        path.display()
    );
    Ok(document)
}

/// Decodes CSV text into a document.
pub fn parse_document(content: &str) -> std::result::Result<Document, DecodeError> {
    let mut paths: BTreeMap<u64, BTreeMap<u64, Vec<Point>>> = BTreeMap::new();
    let mut rows = 0usize;

    for (index, raw) in content.lines().enumerate() {
        let line = index + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = text.split(',').map(str::trim).collect();
        if fields.len() != COLUMNS {
            return Err(DecodeError::ColumnCount {
                line,
                expected: COLUMNS,
                found: fields.len(),
            });
        }

        let path_id = parse_identifier(line, 1, fields[0])?;
        let segment_id = parse_identifier(line, 2, fields[1])?;
        let x = parse_number(line, 3, fields[2])?;
        let y = parse_number(line, 4, fields[3])?;

        paths
            .entry(path_id)
            .or_default()
            .entry(segment_id)
            .or_default()
            .push(Point::new(x, y));
        rows += 1;
    }

    debug!("Decoded {} rows into {} paths", rows, paths.len());

    Ok(paths
        .into_values()
        .map(|segments| segments.into_values().map(Curve::new).collect())
        .collect())
}

fn parse_number(line: usize, column: usize, text: &str) -> std::result::Result<f64, DecodeError> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(DecodeError::InvalidNumber {
            line,
            column,
            value: text.to_string(),
        }),
    }
}

fn parse_identifier(
    line: usize,
    column: usize,
    text: &str,
) -> std::result::Result<u64, DecodeError> {
    let value = parse_number(line, column, text)?;
    if value < 0.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
        return Err(DecodeError::InvalidIdentifier { line, value });
    }
    Ok(value as u64)
}

/// Encodes curves as CSV rows, numbering paths and curves from zero.
pub fn format_document(paths: &[Vec<Curve>]) -> String {
    let mut out = String::new();
    for (path_id, path) in paths.iter().enumerate() {
        for (segment_id, curve) in path.iter().enumerate() {
            for p in curve.iter() {
                out.push_str(&format!("{},{},{},{}\n", path_id, segment_id, p.x, p.y));
            }
        }
    }
    out
}

/// Writes curves to a CSV file in the layout [`read_document`] accepts.
pub fn write_document(path: impl AsRef<Path>, paths: &[Vec<Curve>]) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, format_document(paths))?;
    info!("Wrote {} paths to {}", paths.len(), path.display());
    Ok(())
}
