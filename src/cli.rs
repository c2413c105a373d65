use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

/// Tree inventory conversion CLI (argument schema only)
#[derive(Parser, Debug)]
#[command(name = "arbormap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a standalone HTML map from an inventory CSV
    Map(MapArgs),

    /// Generate JS data modules for the web front end
    Module(ModuleArgs),

    /// Write a flat CSV extract of the inventory
    Csv(CsvArgs),
}

#[derive(Args, Debug)]
pub struct MapArgs {
    /// Input inventory CSV
    #[arg(value_hint = ValueHint::FilePath)]
    pub inventory: PathBuf,

    /// Output HTML file (must be a file path; "-" is rejected)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub out: PathBuf,

    /// Boundary shapefile to overlay
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub boundary: Option<PathBuf>,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ModuleArgs {
    /// Input inventory CSV
    #[arg(value_hint = ValueHint::FilePath)]
    pub inventory: PathBuf,

    /// Output directory for the generated modules
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub out_dir: PathBuf,

    /// Boundary shapefile to convert alongside the tree module
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub boundary: Option<PathBuf>,

    /// Folder of per-tree photos, matched by tree code
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub photos: Option<PathBuf>,

    /// Base URL prepended to matched photo file names
    #[arg(long)]
    pub photo_base_url: Option<String>,

    /// Overwrite if the files exist
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CsvArgs {
    /// Input inventory CSV
    #[arg(value_hint = ValueHint::FilePath)]
    pub inventory: PathBuf,

    /// Output CSV file (must be a file path; "-" is rejected)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub out: PathBuf,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}
