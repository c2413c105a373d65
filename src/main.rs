use anyhow::Result;
use clap::Parser;

use arbormap::cli::{Cli, Commands};
use arbormap::commands::{csv, map, module};

fn main() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Map(args) => map::run(&cli, args),
        Commands::Module(args) => module::run(&cli, args),
        Commands::Csv(args) => csv::run(&cli, args),
    }
}
