//! Rendering module
//!
//! Turns simulation state into SVG markup. Nothing here feeds back into the sim.

pub mod svg;

pub use svg::{scene_svg, spheroid_path};
