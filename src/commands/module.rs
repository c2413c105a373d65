use anyhow::Result;

use crate::boundary::Boundary;
use crate::cli::{Cli, ModuleArgs};
use crate::common::fs::{ensure_dir_exists, require_file_exists};
use crate::export::{ModuleOptions, write_boundary_module, write_tree_module};
use crate::inventory::{distinct_genera, read_inventory};
use crate::photos::PhotoIndex;
use crate::style::{StylePalette, assign_styles};

pub fn run(cli: &Cli, args: &ModuleArgs) -> Result<()> {
    require_file_exists(&args.inventory)?;
    ensure_dir_exists(&args.out_dir)?;

    if cli.verbose > 0 {
        eprintln!("[module] inventory={} -> {}", args.inventory.display(), args.out_dir.display());
    }

    let records = read_inventory(&args.inventory)?;
    let palette = StylePalette::default();
    let styles = assign_styles(distinct_genera(&records), &palette);

    let photos = args.photos.as_deref().map(|dir| {
        let index = PhotoIndex::scan(dir);
        if index.is_empty() {
            eprintln!("warning: no photos found under {}", dir.display());
        } else if cli.verbose > 0 {
            eprintln!("[module] indexed {} photos", index.len());
        }
        index
    });

    let opts = ModuleOptions {
        photos: photos.as_ref(),
        photo_base_url: args.photo_base_url.as_deref(),
    };
    let trees_path = args.out_dir.join("trees.js");
    write_tree_module(&records, &styles, &palette, &opts, &trees_path, args.force)?;
    println!("Wrote tree module ({} trees) -> {}", records.len(), trees_path.display());

    if let Some(path) = &args.boundary {
        if path.exists() {
            let boundary = Boundary::read(path)?;
            let boundary_path = args.out_dir.join("boundary.js");
            write_boundary_module(&boundary, &boundary_path, args.force)?;
            println!("Wrote boundary module ({} features) -> {}", boundary.shapes().len(), boundary_path.display());
        } else {
            eprintln!("warning: boundary shapefile not found -> {}", path.display());
        }
    }

    Ok(())
}
