//! # Bar Spacing Check
//!
//! Runs the bar layout for a section and reports the spacing of the
//! governing layer against the CSA A23.1 Cl. 6.6.5.2 minimum.
//!
//! ## Governing Layer
//!
//! The governing layer is the one with the largest effective depth. Ties go
//! to the larger bar diameter, then to the larger bar count. Legends and
//! calculation narratives both use [`governing_layer`] so they always
//! describe the same layer.
//!
//! ## Example
//!
//! ```rust
//! use rebar_core::calculations::bar_layout::{BarLayer, BeamSection};
//! use rebar_core::calculations::spacing_check::{calculate, BarLayoutInput};
//!
//! let input = BarLayoutInput {
//!     label: "B-1".to_string(),
//!     section: BeamSection::new(300.0, 300.0, 30.0, 11.0, 20.0),
//!     layers: vec![BarLayer::new(1, 20.0, 2)],
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!((result.governing.bar_spacing_mm - 158.0).abs() < 1e-9);
//! assert!((result.governing.min_spacing_mm - 30.0).abs() < 1e-9);
//! ```

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::bar_layout::{layout_bars, BarLayer, BeamSection, LayerLayout, SectionLayout};
use super::input_checks::{check_layers, LayerWarning};
use crate::equations::spacing::{effective_width, layer_spacing, minimum_spacing};
use crate::errors::{CalcError, CalcResult};

/// Input for a bar layout check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "B-1 midspan",
///   "section": {
///     "width_mm": 300.0,
///     "depth_mm": 300.0,
///     "cover_mm": 30.0,
///     "link_diameter_mm": 11.0,
///     "aggregate_size_mm": 20.0
///   },
///   "layers": [
///     { "layer_number": 1, "bar_diameter_mm": 20.0, "bar_count": 4 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarLayoutInput {
    /// User label for this section (e.g., "B-1 midspan")
    pub label: String,

    /// Section geometry and detailing parameters
    pub section: BeamSection,

    /// Bar layers in placement order
    pub layers: Vec<BarLayer>,
}

impl BarLayoutInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.section.validate()?;

        if self.layers.is_empty() {
            return Err(CalcError::invalid_input(
                "layers",
                "[]",
                "At least one bar layer is required",
            ));
        }
        for layer in &self.layers {
            if layer.layer_number == 0 {
                return Err(CalcError::invalid_input(
                    "layer_number",
                    "0",
                    "Layer numbers start at 1",
                ));
            }
            if !layer.bar_diameter_mm.is_finite() || layer.bar_diameter_mm <= 0.0 {
                return Err(CalcError::invalid_input(
                    "bar_diameter_mm",
                    layer.bar_diameter_mm.to_string(),
                    "Bar diameter must be positive",
                ));
            }
            if layer.bar_count == 0 {
                return Err(CalcError::invalid_input(
                    "bar_count",
                    "0",
                    "A layer needs at least one bar",
                ));
            }
        }
        Ok(())
    }
}

/// Spacing figures for one layer.
///
/// ## JSON Example
///
/// ```json
/// {
///   "bar_spacing_mm": 158.0,
///   "min_spacing_mm": 30.0,
///   "effective_width_mm": 198.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpacingResult {
    /// Governing clear spacing used for the layout (mm)
    pub bar_spacing_mm: f64,

    /// Code-minimum clear spacing (mm)
    pub min_spacing_mm: f64,

    /// Width available for bar centres (mm)
    pub effective_width_mm: f64,
}

impl SpacingResult {
    /// Whether the code minimum, rather than the even split, governs
    pub fn minimum_governs(&self) -> bool {
        self.bar_spacing_mm <= self.min_spacing_mm
    }
}

/// Results of a bar layout check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarLayoutResult {
    /// Coordinates of every bar
    pub layout: SectionLayout,

    /// Layer number of the governing layer
    pub governing_layer_number: u32,

    /// Spacing of the governing layer
    pub governing: SpacingResult,

    /// Advisory input warnings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<LayerWarning>,
}

impl BarLayoutResult {
    /// The governing layer's placed bars
    pub fn governing_layer(&self) -> Option<&LayerLayout> {
        governing_layer(&self.layout)
    }
}

/// Compare layers by (effective depth, bar diameter, bar count).
fn governing_order(a: &LayerLayout, b: &LayerLayout) -> Ordering {
    a.effective_depth_mm()
        .total_cmp(&b.effective_depth_mm())
        .then(a.bar_diameter_mm.total_cmp(&b.bar_diameter_mm))
        .then(a.bar_count.cmp(&b.bar_count))
}

/// Select the governing layer of a layout.
///
/// Returns `None` only for an empty layout.
pub fn governing_layer(layout: &SectionLayout) -> Option<&LayerLayout> {
    layout
        .layers
        .iter()
        .reduce(|best, layer| {
            if governing_order(layer, best) == Ordering::Greater {
                layer
            } else {
                best
            }
        })
}

/// Spacing figures for a layer of `bar_count` bars of `bar_diameter_mm`.
///
/// # Errors
/// `CalcError::InvalidLayer` when `bar_count < 2`.
pub fn spacing_result(
    section: &BeamSection,
    bar_diameter_mm: f64,
    bar_count: u32,
) -> CalcResult<SpacingResult> {
    let b_eff = effective_width(
        section.width_mm,
        section.cover_mm,
        section.link_diameter_mm,
        bar_diameter_mm,
    );
    let bar_spacing_mm = layer_spacing(
        b_eff,
        bar_count,
        bar_diameter_mm,
        section.aggregate_size_mm,
        section.cover_mm,
    )?;

    Ok(SpacingResult {
        bar_spacing_mm,
        min_spacing_mm: minimum_spacing(
            bar_diameter_mm,
            section.aggregate_size_mm,
            section.cover_mm,
        ),
        effective_width_mm: b_eff,
    })
}

/// Lay out the bars and report the governing spacing.
///
/// # Returns
///
/// * `Ok(BarLayoutResult)` - Layout, governing spacing and warnings
/// * `Err(CalcError::InvalidInput)` - Section or layer values are unusable
/// * `Err(CalcError::InvalidLayer)` - A layer has a single bar
/// * `Err(CalcError::PlacementOverflow)` - A layer does not fit
pub fn calculate(input: &BarLayoutInput) -> CalcResult<BarLayoutResult> {
    input.validate()?;

    let warnings = check_layers(&input.layers, input.section.link_diameter_mm);
    let layout = layout_bars(&input.layers, &input.section)?;

    let layer = governing_layer(&layout).ok_or_else(|| CalcError::Internal {
        message: "layout produced no layers".to_string(),
    })?;
    let governing = spacing_result(&input.section, layer.bar_diameter_mm, layer.bar_count)?;
    let governing_layer_number = layer.layer_number;

    info!(
        label = %input.label,
        bars = layout.bar_count(),
        governing_layer = governing_layer_number,
        spacing = governing.bar_spacing_mm,
        "bar layout complete"
    );

    Ok(BarLayoutResult {
        layout,
        governing_layer_number,
        governing,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn test_input() -> BarLayoutInput {
        BarLayoutInput {
            label: "Test Beam".to_string(),
            section: BeamSection::new(300.0, 300.0, 30.0, 11.0, 20.0),
            layers: vec![BarLayer::new(1, 20.0, 2)],
        }
    }

    #[test]
    fn test_reference_spacing() {
        let result = calculate(&test_input()).unwrap();
        assert!((result.governing.effective_width_mm - 198.0).abs() < EPS);
        assert!((result.governing.bar_spacing_mm - 158.0).abs() < EPS);
        assert!((result.governing.min_spacing_mm - 30.0).abs() < EPS);
        assert!(!result.governing.minimum_governs());
        assert_eq!(result.governing_layer_number, 1);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_governing_layer_is_deepest() {
        let mut input = test_input();
        input.section.depth_mm = 500.0;
        input.layers = vec![BarLayer::new(2, 20.0, 2), BarLayer::new(1, 20.0, 2)];

        let result = calculate(&input).unwrap();
        // the first entry in input order sits deepest, whatever its number
        assert_eq!(result.governing_layer_number, 2);
        assert_eq!(
            result.governing_layer().map(|l| l.effective_depth_mm()),
            Some(449.0)
        );
    }

    #[test]
    fn test_governing_tie_breaks_on_diameter_then_count() {
        let make = |number, diameter, count| LayerLayout {
            layer_number: number,
            bar_diameter_mm: diameter,
            bar_count: count,
            x_coords: vec![0.0; count as usize],
            y_coords: vec![400.0; count as usize],
        };
        let layout = SectionLayout {
            layers: vec![make(1, 20.0, 3), make(2, 25.0, 2), make(3, 25.0, 3)],
        };
        assert_eq!(governing_layer(&layout).map(|l| l.layer_number), Some(3));
        assert!(governing_layer(&SectionLayout::default()).is_none());
    }

    #[test]
    fn test_minimum_governs_for_crowded_layer() {
        let spacing = spacing_result(&test_input().section, 20.0, 4).unwrap();
        // (198 - 80)/3 = 39.3 > 30, so not crowded yet
        assert!(!spacing.minimum_governs());

        let mut section = test_input().section;
        section.width_mm = 250.0;
        // b_eff = 148, (148 - 80)/3 = 22.7 < 30
        let spacing = spacing_result(&section, 20.0, 4).unwrap();
        assert!(spacing.minimum_governs());
        assert!((spacing.bar_spacing_mm - 30.0).abs() < EPS);
    }

    #[test]
    fn test_overflow_propagates() {
        let mut input = test_input();
        input.layers[0].bar_count = 10;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "PLACEMENT_OVERFLOW");
    }

    #[test]
    fn test_huge_bar_count_overflows_without_allocating() {
        let mut input = test_input();
        input.layers = vec![BarLayer::new(1, 20.0, u32::MAX)];
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "PLACEMENT_OVERFLOW");
    }

    #[test]
    fn test_invalid_inputs() {
        let mut input = test_input();
        input.layers.clear();
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");

        let mut input = test_input();
        input.layers[0].bar_diameter_mm = 0.0;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");

        let mut input = test_input();
        input.section.width_mm = 60.0;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");

        let mut input = test_input();
        input.layers[0].bar_count = 1;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_LAYER");
    }

    #[test]
    fn test_warnings_are_reported_but_not_fatal() {
        let mut input = test_input();
        input.section.depth_mm = 600.0;
        input.layers = vec![BarLayer::new(1, 20.0, 3), BarLayer::new(2, 16.0, 2)];
        let result = calculate(&input).unwrap();
        assert_eq!(result.warnings.len(), 2);
    }

    #[test]
    fn test_serialization() {
        let input = test_input();
        let json = serde_json::to_string_pretty(&input).unwrap();
        let roundtrip: BarLayoutInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);

        let result = calculate(&input).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("warnings"));
        let roundtrip: BarLayoutResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, roundtrip);
    }
}
