//! # Bar Layout
//!
//! Places every longitudinal bar of a rectangular section, layer by layer.
//!
//! ## Method
//!
//! Layers are placed in input order. Each layer starts at the link on the
//! left face and steps right by one bar diameter plus the governing layer
//! spacing. Layers stack away from the first layer by consuming
//! `spacing + bar diameter` of depth, so the horizontal spacing of a layer is
//! also used as its vertical clear distance to the next layer.
//!
//! ## Example
//!
//! ```rust
//! use rebar_core::calculations::bar_layout::{layout_bars, BarLayer, BeamSection};
//!
//! let section = BeamSection::new(300.0, 300.0, 30.0, 11.0, 20.0);
//! let layers = [BarLayer::new(1, 20.0, 2)];
//!
//! let layout = layout_bars(&layers, &section).unwrap();
//! assert_eq!(layout.layers[0].x_coords, vec![51.0, 229.0]);
//! assert_eq!(layout.layers[0].y_coords, vec![249.0, 249.0]);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::spacing::{effective_depth, effective_width, layer_spacing};
use crate::errors::{CalcError, CalcResult};

/// Rectangular concrete section and its detailing parameters.
///
/// ## JSON Example
///
/// ```json
/// {
///   "width_mm": 300.0,
///   "depth_mm": 500.0,
///   "cover_mm": 30.0,
///   "link_diameter_mm": 11.0,
///   "aggregate_size_mm": 20.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamSection {
    /// Overall section width b (mm)
    pub width_mm: f64,

    /// Overall section depth h (mm)
    pub depth_mm: f64,

    /// Clear cover to the link (mm)
    pub cover_mm: f64,

    /// Link (stirrup) diameter (mm)
    pub link_diameter_mm: f64,

    /// Nominal maximum aggregate size (mm)
    pub aggregate_size_mm: f64,
}

impl BeamSection {
    pub fn new(
        width_mm: f64,
        depth_mm: f64,
        cover_mm: f64,
        link_diameter_mm: f64,
        aggregate_size_mm: f64,
    ) -> Self {
        BeamSection {
            width_mm,
            depth_mm,
            cover_mm,
            link_diameter_mm,
            aggregate_size_mm,
        }
    }

    /// Distance from a face to the inside of the link (cover + link)
    pub fn inside_link_offset_mm(&self) -> f64 {
        self.cover_mm + self.link_diameter_mm
    }

    /// Whether any bar can fit inside the link at all
    pub fn is_feasible(&self) -> bool {
        self.width_mm > 2.0 * self.inside_link_offset_mm()
            && self.depth_mm > self.inside_link_offset_mm()
    }

    /// Validate dimensions and feasibility.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("width_mm", self.width_mm),
            ("depth_mm", self.depth_mm),
            ("cover_mm", self.cover_mm),
            ("link_diameter_mm", self.link_diameter_mm),
            ("aggregate_size_mm", self.aggregate_size_mm),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Dimension must be a positive number",
                ));
            }
        }
        if self.width_mm <= 2.0 * self.inside_link_offset_mm() {
            return Err(CalcError::invalid_input(
                "width_mm",
                self.width_mm.to_string(),
                "Width must exceed 2 x (cover + link diameter)",
            ));
        }
        if self.depth_mm <= self.inside_link_offset_mm() {
            return Err(CalcError::invalid_input(
                "depth_mm",
                self.depth_mm.to_string(),
                "Depth must exceed cover + link diameter",
            ));
        }
        Ok(())
    }
}

/// One horizontal row of bars as requested by the user.
///
/// ## JSON Example
///
/// ```json
/// { "layer_number": 1, "bar_diameter_mm": 25.0, "bar_count": 4 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarLayer {
    /// Placement order label, 1 = first layer from the reference face
    pub layer_number: u32,

    /// Bar diameter (mm)
    pub bar_diameter_mm: f64,

    /// Number of bars in the layer
    pub bar_count: u32,
}

impl BarLayer {
    pub fn new(layer_number: u32, bar_diameter_mm: f64, bar_count: u32) -> Self {
        BarLayer {
            layer_number,
            bar_diameter_mm,
            bar_count,
        }
    }
}

/// A placed layer: the originating [`BarLayer`] fields plus bar centres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerLayout {
    pub layer_number: u32,
    pub bar_diameter_mm: f64,
    pub bar_count: u32,

    /// Bar centre x positions from the left face (mm), left to right
    pub x_coords: Vec<f64>,

    /// Effective depth of the layer, repeated once per bar (mm)
    pub y_coords: Vec<f64>,
}

impl LayerLayout {
    /// Effective depth shared by every bar of the layer
    pub fn effective_depth_mm(&self) -> f64 {
        self.y_coords.first().copied().unwrap_or_default()
    }

    /// Iterate over bar centres as (x, y) pairs
    pub fn centres(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x_coords.iter().copied().zip(self.y_coords.iter().copied())
    }
}

/// Complete layout of a section, one entry per input layer in input order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SectionLayout {
    pub layers: Vec<LayerLayout>,
}

impl SectionLayout {
    /// Total number of bars placed
    pub fn bar_count(&self) -> u32 {
        self.layers.iter().map(|layer| layer.bar_count).sum()
    }

    /// Find a layer by its layer number
    pub fn layer(&self, layer_number: u32) -> Option<&LayerLayout> {
        self.layers
            .iter()
            .find(|layer| layer.layer_number == layer_number)
    }
}

/// Check that the last bar of a layer stays inside the link.
///
/// The limit mirrors the effective width from the opposite face:
/// `b - c - d_s - d_b/2`. An empty slice passes.
///
/// # Errors
/// `CalcError::PlacementOverflow` carrying the largest x and the limit.
pub fn validate_placement(
    x_coords: &[f64],
    beam_width: f64,
    cover: f64,
    link_diameter: f64,
    bar_diameter: f64,
) -> CalcResult<()> {
    let Some(max_position) = x_coords.iter().copied().reduce(f64::max) else {
        return Ok(());
    };
    let limit = beam_width - cover - link_diameter - bar_diameter / 2.0;

    if max_position > limit {
        return Err(CalcError::placement_overflow(max_position, limit));
    }
    Ok(())
}

/// Centre x of the last bar in a layer, from the uniform `d_b + s` pitch.
fn last_bar_x(section: &BeamSection, bar_diameter: f64, bar_count: u32, spacing: f64) -> f64 {
    let start = section.inside_link_offset_mm() + bar_diameter / 2.0;
    start + f64::from(bar_count.saturating_sub(1)) * (bar_diameter + spacing)
}

/// Bar centre x positions for one layer.
///
/// The step between neighbours is half the previous bar, the spacing and
/// half the current bar; with one diameter per layer this is a uniform
/// `d_b + s` pitch.
fn bar_x_coords(
    section: &BeamSection,
    bar_diameter: f64,
    bar_count: u32,
    spacing: f64,
) -> Vec<f64> {
    let start = section.inside_link_offset_mm() + bar_diameter / 2.0;
    let mut x_coords: Vec<f64> = Vec::with_capacity(bar_count as usize);

    for index in 0..bar_count {
        let x = match x_coords.last() {
            None => start,
            Some(prev) => prev + bar_diameter / 2.0 + spacing + bar_diameter / 2.0,
        };
        debug!(bar = index + 1, x, "placed bar");
        x_coords.push(x);
    }
    x_coords
}

/// Lay out every bar layer in the section.
///
/// Layers are processed in input order. Depth consumed by earlier layers is
/// accumulated and fed into the effective depth of later layers.
///
/// # Errors
///
/// * `CalcError::InvalidLayer` - a layer has fewer than two bars
/// * `CalcError::PlacementOverflow` - a layer does not fit inside the link
///
/// The first failure aborts the whole layout.
pub fn layout_bars(layers: &[BarLayer], section: &BeamSection) -> CalcResult<SectionLayout> {
    let mut result = Vec::with_capacity(layers.len());
    let mut prior_offset = 0.0;

    for (i, layer) in layers.iter().enumerate() {
        let d_b = layer.bar_diameter_mm;

        let b_eff = effective_width(
            section.width_mm,
            section.cover_mm,
            section.link_diameter_mm,
            d_b,
        );
        let d = effective_depth(
            section.depth_mm,
            section.cover_mm,
            section.link_diameter_mm,
            d_b,
            prior_offset,
        );
        let spacing = layer_spacing(
            b_eff,
            layer.bar_count,
            d_b,
            section.aggregate_size_mm,
            section.cover_mm,
        )?;

        debug!(
            layer = layer.layer_number,
            effective_width = b_eff,
            effective_depth = d,
            spacing,
            "laying out bar layer"
        );

        // Reject an overflowing layer before allocating its coordinates.
        validate_placement(
            &[last_bar_x(section, d_b, layer.bar_count, spacing)],
            section.width_mm,
            section.cover_mm,
            section.link_diameter_mm,
            d_b,
        )?;

        let x_coords = bar_x_coords(section, d_b, layer.bar_count, spacing);
        validate_placement(
            &x_coords,
            section.width_mm,
            section.cover_mm,
            section.link_diameter_mm,
            d_b,
        )?;

        let y_coords = vec![d; x_coords.len()];

        if i + 1 < layers.len() {
            prior_offset += spacing + d_b;
        }

        result.push(LayerLayout {
            layer_number: layer.layer_number,
            bar_diameter_mm: d_b,
            bar_count: layer.bar_count,
            x_coords,
            y_coords,
        });
    }

    Ok(SectionLayout { layers: result })
}
