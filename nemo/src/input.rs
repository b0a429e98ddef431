//! Reading target points from CSV files.
//!
//! Every file starts with a header row that is skipped. Each following record has the longitude
//! in the first field and the latitude in the second one, in degrees. Other fields are ignored.

use crate::error::{NemoError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use nemo_types::geo::impls::GeoPoint2d;
use std::io::Read;
use std::path::Path;

/// Reads target points from CSV data.
pub fn read_targets(reader: impl Read) -> Result<Vec<GeoPoint2d>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut targets = vec![];
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        targets.push(parse_record(&record, line)?);
    }

    Ok(targets)
}

/// Reads target points from a CSV file.
pub fn read_targets_file(path: impl AsRef<Path>) -> Result<Vec<GeoPoint2d>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let targets = read_targets(file)?;
    log::debug!("Read {} targets from {}", targets.len(), path.display());

    Ok(targets)
}

/// Reads target points from several CSV files, concatenated in the given order.
pub fn read_targets_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<GeoPoint2d>> {
    let mut targets = vec![];
    for path in paths {
        targets.extend(read_targets_file(path)?);
    }

    Ok(targets)
}

fn parse_record(record: &StringRecord, line: u64) -> Result<GeoPoint2d> {
    let lon = parse_field(record, 0, "longitude", line)?;
    let lat = parse_field(record, 1, "latitude", line)?;

    GeoPoint2d::try_latlon(lat, lon).map_err(|err| NemoError::InputFormat {
        line,
        message: err.to_string(),
    })
}

fn parse_field(record: &StringRecord, index: usize, name: &str, line: u64) -> Result<f64> {
    let Some(field) = record.get(index).filter(|f| !f.is_empty()) else {
        return Err(NemoError::InputFormat {
            line,
            message: format!("missing {name}"),
        });
    };

    field.parse().map_err(|_| NemoError::InputFormat {
        line,
        message: format!("{name} '{field}' is not a number"),
    })
}
