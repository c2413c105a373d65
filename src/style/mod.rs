//! Genus styling: marker colors/shapes and canopy geometry.

mod assign;
mod canopy;

pub use assign::{GenusStyle, MarkerShape, StylePalette, assign_styles, resolve_style};
pub use canopy::canopy_radius;
