//! Flat CSV extract for the web front end.

use std::path::Path;

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerWriter, prelude::{CsvWriter, NamedFrom}, series::Series};

use crate::inventory::TreeRecord;
use crate::io::{finalize_write, open_for_write};

/// Write the inventory as a flat CSV with the column names the web app
/// expects. Missing optional values become empty cells.
pub fn write_extract(records: &[TreeRecord], path: &Path, force: bool) -> Result<()> {
    let mut df = extract_frame(records)?;
    let mut sink = open_for_write(path, force)?;
    CsvWriter::new(&mut sink)
        .finish(&mut df)
        .with_context(|| format!("[export::csv] Failed to write CSV to {:?}", path))?;
    finalize_write(sink)
}

fn extract_frame(records: &[TreeRecord]) -> Result<DataFrame> {
    let codes: Vec<String> = records.iter().map(|r| r.code.clone()).collect();
    let lats: Vec<f64> = records.iter().map(|r| r.lat).collect();
    let lons: Vec<f64> = records.iter().map(|r| r.lon).collect();
    let genera: Vec<Option<String>> = records.iter().map(|r| r.genus.clone()).collect();
    let species: Vec<Option<String>> = records.iter().map(|r| r.species.clone()).collect();
    let dbhs: Vec<Option<f64>> = records.iter().map(|r| r.dbh_cm).collect();
    let heights: Vec<Option<f64>> = records.iter().map(|r| r.height_m).collect();
    let crown_ns: Vec<Option<f64>> = records.iter().map(|r| r.crown_ns_m).collect();
    let crown_ew: Vec<Option<f64>> = records.iter().map(|r| r.crown_ew_m).collect();

    DataFrame::new(vec![
        Series::new("treeCode".into(), codes).into(),
        Series::new("lat".into(), lats).into(),
        Series::new("lon".into(), lons).into(),
        Series::new("genus".into(), genera).into(),
        Series::new("species".into(), species).into(),
        Series::new("dbh".into(), dbhs).into(),
        Series::new("height".into(), heights).into(),
        Series::new("crownNS".into(), crown_ns).into(),
        Series::new("crownEW".into(), crown_ew).into(),
    ]).context("[export::csv] Failed to assemble extract columns")
}
