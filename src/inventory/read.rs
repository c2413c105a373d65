//! CSV loading for the tree inventory.

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerReader, prelude::{CsvReader, DataType}};

use super::TreeRecord;

/// Source column names, as exported from the field spreadsheet.
const COL_CODE: &str = "TreeCode";
const COL_LAT: &str = "lat";
const COL_LON: &str = "lon";
const COL_GENUS: &str = "Genus";
const COL_SPECIES: &str = "Species";
const COL_DBH: &str = "DBH1cm";
const COL_HEIGHT: &str = "Heightm";
const COL_CROWN_NS: &str = "CrownNSm";
const COL_CROWN_EW: &str = "CrownEWm";

/// Reads the inventory CSV at `path` into tree records.
///
/// Rows without a usable position are dropped. Missing optional cells become
/// `None`; a missing optional column leaves that field `None` for every row
/// (with a warning), so partial exports still load.
pub fn read_inventory(path: &Path) -> Result<Vec<TreeRecord>> {
    let df = read_csv(path)?;
    let rows = df.height();

    let codes = opt_str_cells(&df, COL_CODE)?;
    let lats = require_f64_cells(&df, COL_LAT, path)?;
    let lons = require_f64_cells(&df, COL_LON, path)?;
    let genera = opt_str_cells(&df, COL_GENUS)?;
    let species = opt_str_cells(&df, COL_SPECIES)?;
    let dbhs = opt_f64_cells(&df, COL_DBH)?;
    let heights = opt_f64_cells(&df, COL_HEIGHT)?;
    let crown_ns = opt_f64_cells(&df, COL_CROWN_NS)?;
    let crown_ew = opt_f64_cells(&df, COL_CROWN_EW)?;

    let mut records = Vec::with_capacity(rows);
    for i in 0..rows {
        // Same filter as the source sheet: keep only mappable rows.
        let (Some(lat), Some(lon)) = (lats[i], lons[i]) else { continue };
        if !lat.is_finite() || !lon.is_finite() {
            continue;
        }

        records.push(TreeRecord {
            code: codes[i].as_deref().unwrap_or("").trim().to_string(),
            lat,
            lon,
            genus: non_blank(genera[i].as_deref()),
            species: non_blank(species[i].as_deref()),
            dbh_cm: dbhs[i],
            height_m: heights[i],
            crown_ns_m: crown_ns[i],
            crown_ew_m: crown_ew[i],
        });
    }
    Ok(records)
}

/// Reads a CSV file from `path` into a Polars DataFrame.
fn read_csv(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)
        .with_context(|| format!("[inventory::read] Failed to open inventory CSV: {}", path.display()))?;
    CsvReader::new(file)
        .finish()
        .with_context(|| format!("[inventory::read] Failed to read CSV from {:?}", path))
}

fn non_blank(cell: Option<&str>) -> Option<String> {
    cell.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Numeric column that must exist (lat/lon).
fn require_f64_cells(df: &DataFrame, name: &str, path: &Path) -> Result<Vec<Option<f64>>> {
    let col = df.column(name)
        .with_context(|| format!("[inventory::read] Missing required column {name:?} in {}", path.display()))?
        .cast(&DataType::Float64)
        .with_context(|| format!("[inventory::read] Column {name:?} is not numeric"))?;
    Ok(col.f64()?.into_iter().collect())
}

/// Numeric column that may be absent entirely.
fn opt_f64_cells(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let Ok(col) = df.column(name) else {
        eprintln!("warning: column {name:?} not found in inventory");
        return Ok(vec![None; df.height()]);
    };
    let col = col.cast(&DataType::Float64)
        .with_context(|| format!("[inventory::read] Column {name:?} is not numeric"))?;
    Ok(col.f64()?.into_iter().collect())
}

/// String column that may be absent entirely.
fn opt_str_cells(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let Ok(col) = df.column(name) else {
        eprintln!("warning: column {name:?} not found in inventory");
        return Ok(vec![None; df.height()]);
    };
    let col = col.cast(&DataType::String)
        .with_context(|| format!("[inventory::read] Column {name:?} is not readable as text"))?;
    Ok(col.str()?.into_iter().map(|cell| cell.map(str::to_string)).collect())
}
