//! Header-less track CSV reader: one `kind,x,y` row per cone.

use std::io::Read;
use std::path::Path;

use conetrack::{Cone, ConeColor, Point};

use crate::CliResult;

/// Cones and car position read from a track file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackFile {
    pub cones: Vec<Cone>,
    /// Last `car_start` row, if any.
    pub car_start: Option<Point>,
    /// Rows with a kind this reader does not know.
    pub n_skipped: usize,
}

enum RowKind {
    Cone(ConeColor),
    CarStart,
}

fn row_kind(kind: &str) -> Option<RowKind> {
    match kind {
        "blue" => Some(RowKind::Cone(ConeColor::Blue)),
        "yellow" => Some(RowKind::Cone(ConeColor::Yellow)),
        "orange" => Some(RowKind::Cone(ConeColor::Orange)),
        "big_orange" => Some(RowKind::Cone(ConeColor::LargeOrange)),
        "car_start" => Some(RowKind::CarStart),
        _ => None,
    }
}

fn parse_coord(field: Option<&str>, name: &str, line: u64) -> CliResult<f64> {
    let raw = field.ok_or_else(|| format!("line {}: missing {} column", line, name))?;
    let value = raw
        .parse::<f64>()
        .map_err(|e| format!("line {}: invalid {} value {:?}: {}", line, name, raw, e))?;
    if !value.is_finite() {
        return Err(format!("line {}: {} value {:?} is not finite", line, name, raw).into());
    }
    Ok(value)
}

pub fn read_track<R: Read>(reader: R) -> CliResult<TrackFile> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut track = TrackFile::default();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let Some(kind_field) = record.get(0) else {
            continue;
        };
        if kind_field.is_empty() {
            continue;
        }
        let Some(kind) = row_kind(kind_field) else {
            tracing::debug!("line {}: skipping row of kind {:?}", line, kind_field);
            track.n_skipped += 1;
            continue;
        };

        let x = parse_coord(record.get(1), "x", line)?;
        let y = parse_coord(record.get(2), "y", line)?;
        match kind {
            RowKind::Cone(color) => track.cones.push(Cone::new(x, y, color)),
            RowKind::CarStart => track.car_start = Some(Point::new(x, y)),
        }
    }
    Ok(track)
}

pub fn load_track(path: &Path) -> CliResult<TrackFile> {
    let file = std::fs::File::open(path)
        .map_err(|e| format!("failed to open track {}: {}", path.display(), e))?;
    read_track(file)
}
