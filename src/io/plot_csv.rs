// SPDX-License-Identifier: AGPL-3.0-or-later
//! Plot measurement CSV reader and index/fit table writers.
//!
//! Streams from disk via [`BufReader`]. Files ending in `.gz` are decoded
//! through `flate2::read::GzDecoder`.
//!
//! # Input format
//!
//! ```text
//! plot_id,species_id,girth,diameter,height,branch_height,canopy_cover
//! P01,17,42.0,13.4,8.5,2.1,65
//! P01,4,,,1.2,,
//! ```
//!
//! `plot_id` and `species_id` are required; the measurement columns are
//! optional and may appear in any order. Empty cells are missing values.
//! Fields are split on commas; quoted fields are not supported. A leading
//! UTF-8 byte order mark is ignored.

use crate::ecology::diversity::DiversityIndices;
use crate::ecology::observation::{Measurements, Observation};
use crate::ecology::project::PlotIndices;
use crate::ecology::species_area::PowerLawFit;
use crate::error::{Error, Result};
use crate::numeric::round_to;
use crate::store::MemoryStore;
use crate::tolerances::{DISPLAY_DECIMALS, FIT_DECIMALS};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

const MEASUREMENT_COLUMNS: [&str; 5] = [
    "girth",
    "diameter",
    "height",
    "branch_height",
    "canopy_cover",
];

/// Column positions resolved from the header line.
struct Layout {
    width: usize,
    plot_id: usize,
    species_id: usize,
    measurements: [Option<usize>; 5],
}

impl Layout {
    fn from_header(line: &str) -> Result<Self> {
        // Spreadsheet exports often lead with a UTF-8 byte order mark.
        let line = line.strip_prefix('\u{feff}').unwrap_or(line);
        let names: Vec<&str> = line.split(',').map(str::trim).collect();
        let position = |name: &str| names.iter().position(|&n| n == name);
        let required = |name: &str| {
            position(name)
                .ok_or_else(|| Error::Csv(format!("header: missing required column '{name}'")))
        };
        Ok(Self {
            width: names.len(),
            plot_id: required("plot_id")?,
            species_id: required("species_id")?,
            measurements: MEASUREMENT_COLUMNS.map(position),
        })
    }
}

fn open_reader(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let ext = path
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or("");
    if ext.eq_ignore_ascii_case("gz") {
        Ok(Box::new(BufReader::new(flate2::read::GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

fn parse_cell(cell: &str, column: &str, line_no: usize) -> Result<Option<f64>> {
    if cell.is_empty() {
        return Ok(None);
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(Error::Csv(format!(
            "line {line_no}: {column} is not a finite number: '{cell}'"
        ))),
    }
}

/// Read a plot measurement CSV into a [`MemoryStore`] keyed by plot id.
///
/// The first non-blank line is the header. Blank lines are skipped; a
/// header with no data rows yields an empty store.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read, or
/// [`Error::Csv`] for a missing header, a missing required column, a row
/// with the wrong number of fields, an empty id, or a measurement that is
/// not a finite number (`NaN` and `inf` are rejected).
pub fn read_observations(path: &Path) -> Result<MemoryStore<String>> {
    let io_err = |e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    };
    let mut lines = open_reader(path)?.lines().enumerate();

    let cols = loop {
        let Some((_, line_result)) = lines.next() else {
            return Err(Error::Csv("missing header line".into()));
        };
        let line = line_result.map_err(io_err)?;
        if !line.trim().is_empty() {
            break Layout::from_header(&line)?;
        }
    };

    let mut store = MemoryStore::new();
    for (idx, line_result) in lines {
        let line_no = idx + 1;
        let line = line_result.map_err(io_err)?;
        if line.trim().is_empty() {
            continue;
        }

        let cells: Vec<&str> = line.split(',').map(str::trim).collect();
        if cells.len() != cols.width {
            return Err(Error::Csv(format!(
                "line {line_no}: expected {} fields, got {}",
                cols.width,
                cells.len()
            )));
        }
        let plot_id = cells[cols.plot_id];
        let species = cells[cols.species_id];
        if plot_id.is_empty() || species.is_empty() {
            return Err(Error::Csv(format!(
                "line {line_no}: plot_id and species_id must not be empty"
            )));
        }

        let mut values = [None; 5];
        for ((slot, column), name) in values
            .iter_mut()
            .zip(cols.measurements)
            .zip(MEASUREMENT_COLUMNS)
        {
            if let Some(col) = column {
                *slot = parse_cell(cells[col], name, line_no)?;
            }
        }
        let [girth, diameter, height, branch_height, canopy_cover] = values;
        store.push(
            plot_id,
            Observation::with_measurements(
                species.to_string(),
                Measurements {
                    girth,
                    diameter,
                    height,
                    branch_height,
                    canopy_cover,
                },
            ),
        );
    }
    Ok(store)
}

fn write_row<W: Write>(writer: &mut W, label: &str, values: &[f64], decimals: u32) -> std::io::Result<()> {
    let prec = decimals as usize;
    write!(writer, "{label}")?;
    for &v in values {
        write!(writer, ",{:.prec$}", round_to(v, decimals))?;
    }
    writeln!(writer)
}

/// Write one row per plot, indices rounded to
/// [`DISPLAY_DECIMALS`] places.
///
/// # Errors
///
/// Propagates writer errors.
pub fn write_indices_csv<W: Write>(writer: &mut W, rows: &[PlotIndices]) -> std::io::Result<()> {
    writeln!(writer, "plot_id,{}", DiversityIndices::FIELD_NAMES.join(","))?;
    for row in rows {
        write_row(writer, &row.plot_id, &row.indices.to_array(), DISPLAY_DECIMALS)?;
    }
    Ok(())
}

/// [`write_indices_csv`] into a new file at `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be created or written.
pub fn write_indices_file(path: &Path, rows: &[PlotIndices]) -> Result<()> {
    let io_err = |e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    write_indices_csv(&mut writer, rows).map_err(io_err)?;
    writer.flush().map_err(io_err)
}

/// Write labelled power-law fits, values at [`FIT_DECIMALS`] places.
///
/// # Errors
///
/// Propagates writer errors.
pub fn write_fit_csv<W: Write>(writer: &mut W, rows: &[(&str, PowerLawFit)]) -> std::io::Result<()> {
    writeln!(writer, "label,c,z,r_squared")?;
    for (label, fit) in rows {
        write_row(writer, label, &[fit.c, fit.z, fit.r_squared], FIT_DECIMALS)?;
    }
    Ok(())
}
