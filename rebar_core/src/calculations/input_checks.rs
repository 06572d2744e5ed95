//! # Layer Input Checks
//!
//! Advisory checks on user-entered layers. These mirror the limits of the
//! input form (standard sizes, 1 to 10 bars, at most two layers) and the
//! CSA A23.1 Cl. 6.6.5.3 recommendation that stacked layers match. None of
//! them stop a calculation; the layout engine accepts any positive input.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::bar_layout::BarLayer;
use crate::materials::{is_standard_bar_diameter, is_standard_link_diameter};

/// Fewest bars a layer may have in the input form
pub const MIN_BARS_PER_LAYER: u32 = 1;

/// Most bars a layer may have in the input form
pub const MAX_BARS_PER_LAYER: u32 = 10;

/// Most layers the input form offers
pub const MAX_LAYERS: usize = 2;

/// A non-fatal problem with the requested layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum LayerWarning {
    /// Bar diameter is not one of the standard detailing sizes
    NonStandardBarSize { layer_number: u32, bar_diameter_mm: f64 },

    /// Link diameter is not one of the standard link sizes
    NonStandardLinkSize { link_diameter_mm: f64 },

    /// Bar count outside the range offered by the input form
    BarCountOutOfRange { layer_number: u32, bar_count: u32 },

    /// More layers than the input form offers
    TooManyLayers { layer_count: usize },

    /// Second layer uses a different bar size than the first
    BarSizeMismatch {
        first_mm: f64,
        second_mm: f64,
    },

    /// Second layer has a different number of bars than the first
    BarCountMismatch { first: u32, second: u32 },
}

impl fmt::Display for LayerWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerWarning::NonStandardBarSize {
                layer_number,
                bar_diameter_mm,
            } => write!(
                f,
                "Layer {layer_number}: {bar_diameter_mm} mm is not a standard bar size"
            ),
            LayerWarning::NonStandardLinkSize { link_diameter_mm } => {
                write!(f, "{link_diameter_mm} mm is not a standard link size")
            }
            LayerWarning::BarCountOutOfRange {
                layer_number,
                bar_count,
            } => write!(
                f,
                "Layer {layer_number}: {bar_count} bars is outside {MIN_BARS_PER_LAYER}..={MAX_BARS_PER_LAYER}"
            ),
            LayerWarning::TooManyLayers { layer_count } => {
                write!(f, "{layer_count} layers requested, at most {MAX_LAYERS} are supported")
            }
            LayerWarning::BarSizeMismatch {
                first_mm,
                second_mm,
            } => write!(
                f,
                "Bar size in the 2nd layer ({second_mm} mm) differs from the 1st layer ({first_mm} mm). \
                 They should match per code requirements."
            ),
            LayerWarning::BarCountMismatch { first, second } => write!(
                f,
                "Number of bars in the 2nd layer ({second}) differs from the 1st layer ({first}). \
                 They should match per code requirements."
            ),
        }
    }
}

/// Collect advisory warnings for a set of layers.
///
/// # Example
///
/// ```rust
/// use rebar_core::calculations::bar_layout::BarLayer;
/// use rebar_core::calculations::input_checks::{check_layers, LayerWarning};
///
/// let layers = [BarLayer::new(1, 20.0, 4), BarLayer::new(2, 20.0, 3)];
/// let warnings = check_layers(&layers, 11.0);
/// assert_eq!(warnings, vec![LayerWarning::BarCountMismatch { first: 4, second: 3 }]);
/// ```
pub fn check_layers(layers: &[BarLayer], link_diameter_mm: f64) -> Vec<LayerWarning> {
    let mut warnings = Vec::new();

    if !is_standard_link_diameter(link_diameter_mm) {
        warnings.push(LayerWarning::NonStandardLinkSize { link_diameter_mm });
    }

    if layers.len() > MAX_LAYERS {
        warnings.push(LayerWarning::TooManyLayers {
            layer_count: layers.len(),
        });
    }

    for layer in layers {
        if !is_standard_bar_diameter(layer.bar_diameter_mm) {
            warnings.push(LayerWarning::NonStandardBarSize {
                layer_number: layer.layer_number,
                bar_diameter_mm: layer.bar_diameter_mm,
            });
        }
        if !(MIN_BARS_PER_LAYER..=MAX_BARS_PER_LAYER).contains(&layer.bar_count) {
            warnings.push(LayerWarning::BarCountOutOfRange {
                layer_number: layer.layer_number,
                bar_count: layer.bar_count,
            });
        }
    }

    if let [first, second, ..] = layers {
        if first.bar_diameter_mm != second.bar_diameter_mm {
            warnings.push(LayerWarning::BarSizeMismatch {
                first_mm: first.bar_diameter_mm,
                second_mm: second.bar_diameter_mm,
            });
        }
        if first.bar_count != second.bar_count {
            warnings.push(LayerWarning::BarCountMismatch {
                first: first.bar_count,
                second: second.bar_count,
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_standard_layers_have_no_warnings() {
        let layers = [BarLayer::new(1, 25.0, 4), BarLayer::new(2, 25.0, 4)];
        assert!(check_layers(&layers, 11.0).is_empty());
    }

    #[test]
    fn test_mismatched_layers() {
        let layers = [BarLayer::new(1, 25.0, 4), BarLayer::new(2, 20.0, 3)];
        let warnings = check_layers(&layers, 11.0);
        assert_eq!(warnings.len(), 2);
        assert!(matches!(warnings[0], LayerWarning::BarSizeMismatch { .. }));
        assert!(warnings[1].to_string().contains("should match"));
    }

    #[test]
    fn test_form_limits() {
        let layers = [
            BarLayer::new(1, 19.5, 12),
            BarLayer::new(2, 19.5, 12),
            BarLayer::new(3, 19.5, 12),
        ];
        let warnings = check_layers(&layers, 10.0);

        assert!(warnings.contains(&LayerWarning::NonStandardLinkSize {
            link_diameter_mm: 10.0
        }));
        assert!(warnings.contains(&LayerWarning::TooManyLayers { layer_count: 3 }));
        assert!(warnings.contains(&LayerWarning::BarCountOutOfRange {
            layer_number: 2,
            bar_count: 12
        }));
        assert_eq!(
            warnings
                .iter()
                .filter(|w| matches!(w, LayerWarning::NonStandardBarSize { .. }))
                .count(),
            3
        );
    }

    #[test]
    fn test_warning_serialization() {
        let warning = LayerWarning::BarCountMismatch { first: 4, second: 2 };
        let json = serde_json::to_string(&warning).unwrap();
        assert_eq!(json, r#"{"kind":"BarCountMismatch","first":4,"second":2}"#);
    }
}
