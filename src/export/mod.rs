//! Artifact writers: CSV extract, JS data modules, standalone HTML map.

mod csv;
mod html;
mod module;

pub use csv::write_extract;
pub use html::{render_map, write_map};
pub use module::{ModuleOptions, write_boundary_module, write_tree_module};
