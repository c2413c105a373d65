#![doc = "Arbormap public API"]
pub mod cli;
pub mod commands;

mod boundary;
mod common;
mod export;
mod inventory;
mod io;
mod photos;
mod style;

#[doc(inline)]
pub use boundary::Boundary;

#[doc(inline)]
pub use inventory::{TreeRecord, center, distinct_genera, read_inventory};

#[doc(inline)]
pub use photos::PhotoIndex;

#[doc(inline)]
pub use style::{GenusStyle, MarkerShape, StylePalette, assign_styles, canopy_radius, resolve_style};

#[doc(inline)]
pub use export::{ModuleOptions, render_map, write_boundary_module, write_extract, write_map, write_tree_module};
