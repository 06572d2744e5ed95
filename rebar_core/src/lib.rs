//! # rebar_core - Reinforcing Bar Layout Engine
//!
//! `rebar_core` places the longitudinal bars of a rectangular concrete
//! section and checks their clear spacing against the CSA A23.1 Cl. 6.6.5.2
//! minimum. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Traceable**: Layout steps emit `tracing` events at debug level
//!
//! ## Quick Start
//!
//! ```rust
//! use rebar_core::calculations::{calculate, BarLayer, BarLayoutInput, BeamSection};
//!
//! let input = BarLayoutInput {
//!     label: "B-1".to_string(),
//!     section: BeamSection::new(300.0, 500.0, 30.0, 11.0, 20.0),
//!     layers: vec![BarLayer::new(1, 25.0, 3)],
//! };
//!
//! let result = calculate(&input).unwrap();
//! println!("{}", serde_json::to_string_pretty(&result).unwrap());
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Bar layout engine and spacing check
//! - [`equations`] - Effective width/depth and minimum spacing formulas
//! - [`materials`] - Standard bar and link sizes
//! - [`report`] - Bar marks, legend and calculation narrative
//! - [`project`] - Project container and detailing defaults
//! - [`errors`] - Structured error types
//! - [`file_io`] - File operations with atomic saves and locking

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod materials;
pub mod project;
pub mod report;

// Re-export commonly used types at crate root for convenience
pub use calculations::{
    calculate, layout_bars, BarLayer, BarLayoutInput, BarLayoutResult, BeamSection, SectionLayout,
};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_project, FileLock};
pub use project::{DetailingSettings, Project, ProjectMetadata};
