//! # Materials Database
//!
//! Reinforcing steel sizes used when detailing concrete sections.
//!
//! ## Example
//!
//! ```rust
//! use rebar_core::materials::{RebarSize, LINK_SIZES};
//!
//! assert_eq!(RebarSize::M30.diameter_mm(), 30.0);
//! assert!(LINK_SIZES.contains(&RebarSize::M15));
//! ```

pub mod rebar;

pub use rebar::{is_standard_bar_diameter, is_standard_link_diameter, RebarSize, LINK_SIZES};
