use anyhow::Result;

use crate::boundary::Boundary;
use crate::cli::{Cli, MapArgs};
use crate::common::fs::require_file_exists;
use crate::export::write_map;
use crate::inventory::{distinct_genera, read_inventory};
use crate::style::{StylePalette, assign_styles};

pub fn run(cli: &Cli, args: &MapArgs) -> Result<()> {
    require_file_exists(&args.inventory)?;

    if cli.verbose > 0 {
        eprintln!("[map] inventory={} -> {}", args.inventory.display(), args.out.display());
    }

    let records = read_inventory(&args.inventory)?;
    let palette = StylePalette::default();
    let styles = assign_styles(distinct_genera(&records), &palette);

    let boundary = load_boundary(cli, args)?;

    write_map(&records, &styles, &palette, boundary.as_ref(), &args.out, args.force)?;
    println!("Wrote map ({} trees, {} genera) -> {}", records.len(), styles.len(), args.out.display());
    Ok(())
}

/// The boundary overlay is optional: a configured-but-missing file warns
/// and is skipped.
fn load_boundary(cli: &Cli, args: &MapArgs) -> Result<Option<Boundary>> {
    let Some(path) = &args.boundary else { return Ok(None) };

    if !path.exists() {
        eprintln!("warning: boundary shapefile not found -> {}", path.display());
        return Ok(None);
    }

    let boundary = Boundary::read(path)?;
    if cli.verbose > 0 {
        eprintln!("[map] boundary features: {}", boundary.shapes().len());
    }
    Ok(Some(boundary))
}
