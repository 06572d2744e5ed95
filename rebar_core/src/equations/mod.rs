//! # Reinforcement Detailing Equations
//!
//! Fundamental formulas used by the layout engine. Keeping them in one place
//! makes them easy to check against the code clauses they come from.
//!
//! ## Modules
//!
//! - [`spacing`] - Effective width/depth and minimum bar spacing
//!
//! ## Conventions
//!
//! - **Lengths**: millimetres throughout
//! - **x**: measured from the left face of the section
//! - **y**: effective depth, measured from the compression face to the layer centroid
//!
//! ## References
//!
//! - CSA A23.1: Concrete materials and methods of concrete construction
//! - CSA G30.18: Carbon steel bars for concrete reinforcement

pub mod spacing;

pub use spacing::{effective_depth, effective_width, layer_spacing, minimum_spacing};
