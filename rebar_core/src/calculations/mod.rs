//! # Reinforcement Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`bar_layout`] - Bar coordinates for every layer of a section
//! - [`spacing_check`] - Governing layer spacing against the code minimum
//! - [`input_checks`] - Advisory checks on requested layers

pub mod bar_layout;
pub mod input_checks;
pub mod spacing_check;

use serde::{Deserialize, Serialize};

pub use bar_layout::{
    layout_bars, validate_placement, BarLayer, BeamSection, LayerLayout, SectionLayout,
};
pub use input_checks::{check_layers, LayerWarning};
pub use spacing_check::{
    calculate, governing_layer, spacing_result, BarLayoutInput, BarLayoutResult, SpacingResult,
};

/// Enum wrapper for all calculation types stored in a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Bar layout and spacing check of a rectangular section
    BarLayout(BarLayoutInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::BarLayout(input) => &input.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::BarLayout(_) => "Bar Layout",
        }
    }

    /// Run the calculation
    pub fn run(&self) -> crate::errors::CalcResult<BarLayoutResult> {
        match self {
            CalculationItem::BarLayout(input) => calculate(input),
        }
    }
}
