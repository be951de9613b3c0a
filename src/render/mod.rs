//! Vector rendering of finished crystals.
//!
//! Attached cells are drawn as circles. Lattice offsets from the center
//! are rotated by pi/4 and the vertical axis is squashed by `1/sqrt(3)`,
//! which lays the six axial neighbors out on a hexagon. Circle radii scale
//! with crystal mass.

mod svg;

pub use svg::{RenderConfig, SvgRenderer};
