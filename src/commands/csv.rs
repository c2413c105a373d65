use anyhow::Result;

use crate::cli::{Cli, CsvArgs};
use crate::common::fs::require_file_exists;
use crate::export::write_extract;
use crate::inventory::read_inventory;

pub fn run(cli: &Cli, args: &CsvArgs) -> Result<()> {
    require_file_exists(&args.inventory)?;

    if cli.verbose > 0 {
        eprintln!("[csv] inventory={} -> {}", args.inventory.display(), args.out.display());
    }

    let records = read_inventory(&args.inventory)?;
    write_extract(&records, &args.out, args.force)?;

    println!("Wrote extract ({} trees) -> {}", records.len(), args.out.display());
    Ok(())
}
