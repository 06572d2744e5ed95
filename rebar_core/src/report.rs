//! # Report Data
//!
//! What a front end needs to draw and describe a bar layout: bar marks in
//! drawing coordinates, legend values and a markdown calculation narrative.
//! Nothing here draws; renderers consume these values.
//!
//! Drawing coordinates put the origin at the bottom-left corner of the
//! section, so a bar with effective depth `y` is drawn at `depth - y`.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::calculations::bar_layout::{BeamSection, LayerLayout, SectionLayout};
use crate::calculations::spacing_check::{
    governing_layer, spacing_result, BarLayoutInput, BarLayoutResult,
};
use crate::equations::spacing::SPACING_FACTOR;
use crate::errors::CalcResult;

/// One bar in drawing coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarMark {
    pub layer_number: u32,
    /// Centre x from the left face (mm)
    pub x_mm: f64,
    /// Centre y from the bottom face (mm)
    pub y_mm: f64,
    pub diameter_mm: f64,
}

/// Flatten a layout into bar marks with the y axis flipped.
pub fn bar_marks(layout: &SectionLayout, section: &BeamSection) -> Vec<BarMark> {
    layout
        .layers
        .iter()
        .flat_map(|layer| {
            layer.centres().map(move |(x, y)| BarMark {
                layer_number: layer.layer_number,
                x_mm: x,
                y_mm: section.depth_mm - y,
                diameter_mm: layer.bar_diameter_mm,
            })
        })
        .collect()
}

/// Legend values for the governing layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub cover_mm: f64,
    pub factored_aggregate_mm: f64,
    pub factored_bar_mm: f64,
    pub min_spacing_mm: f64,
    /// Provided spacing rounded to 0.1 mm
    pub provided_spacing_mm: f64,
}

impl Legend {
    /// Build the legend for `layer` of `section`.
    pub fn for_layer(section: &BeamSection, layer: &LayerLayout) -> CalcResult<Self> {
        let spacing = spacing_result(section, layer.bar_diameter_mm, layer.bar_count)?;
        Ok(Legend {
            cover_mm: section.cover_mm,
            factored_aggregate_mm: SPACING_FACTOR * section.aggregate_size_mm,
            factored_bar_mm: SPACING_FACTOR * layer.bar_diameter_mm,
            min_spacing_mm: spacing.min_spacing_mm,
            provided_spacing_mm: (spacing.bar_spacing_mm * 10.0).round() / 10.0,
        })
    }

    /// Build the legend for the governing layer, if the layout has one.
    pub fn for_layout(section: &BeamSection, layout: &SectionLayout) -> CalcResult<Option<Self>> {
        governing_layer(layout)
            .map(|layer| Self::for_layer(section, layer))
            .transpose()
    }

    /// Legend text, one entry per line
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Concrete Cover: {} mm", fmt_mm(self.cover_mm)),
            format!("1.4*Aggregate Size: {} mm", fmt_mm(self.factored_aggregate_mm)),
            format!("1.4*Bar Size: {} mm", fmt_mm(self.factored_bar_mm)),
            format!("Minimum Spacing: {} mm", fmt_mm(self.min_spacing_mm)),
            format!("Calculated Spacing Provided: {:.1} mm", self.provided_spacing_mm),
        ]
    }
}

/// Format a length without trailing noise (30 -> "30", 28.000000000000004 -> "28")
fn fmt_mm(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded}")
    }
}

/// Markdown narrative of the calculation.
///
/// Shows the effective width and spacing substitutions for the governing
/// layer, followed by a table of every layer.
pub fn narrative_markdown(input: &BarLayoutInput, result: &BarLayoutResult) -> String {
    let section = &input.section;
    let mut out = String::with_capacity(2_048);

    let _ = writeln!(out, "# Bar Placement: {}\n", input.label);
    let _ = writeln!(
        out,
        "Section {} x {} mm, cover {} mm, link {} mm, aggregate {} mm\n",
        fmt_mm(section.width_mm),
        fmt_mm(section.depth_mm),
        fmt_mm(section.cover_mm),
        fmt_mm(section.link_diameter_mm),
        fmt_mm(section.aggregate_size_mm),
    );

    if let Some(layer) = result.governing_layer() {
        let d_b = layer.bar_diameter_mm;
        let n = layer.bar_count;
        let spacing = &result.governing;

        let _ = writeln!(out, "## Effective Width for Bar Placement\n");
        let _ = writeln!(
            out,
            "b_eff = b - 2(c + d_s + d_b/2) = {} - 2({} + {} + {}/2) = {} mm\n",
            fmt_mm(section.width_mm),
            fmt_mm(section.cover_mm),
            fmt_mm(section.link_diameter_mm),
            fmt_mm(d_b),
            fmt_mm(spacing.effective_width_mm),
        );

        let _ = writeln!(out, "## Bar Spacing (CSA A23.1 Cl. 6.6.5.2)\n");
        let _ = writeln!(
            out,
            "s_min = max(1.4 d_b, 1.4 a_g, c) = max({}, {}, {}) = {} mm\n",
            fmt_mm(SPACING_FACTOR * d_b),
            fmt_mm(SPACING_FACTOR * section.aggregate_size_mm),
            fmt_mm(section.cover_mm),
            fmt_mm(spacing.min_spacing_mm),
        );
        let gaps = n.saturating_sub(1);
        let even_split = (spacing.effective_width_mm - f64::from(n) * d_b) / f64::from(gaps);
        let _ = writeln!(
            out,
            "s = max((b_eff - n d_b)/(n - 1), s_min) = max(({} - {} x {})/{}, {}) = {:.1} mm\n",
            fmt_mm(spacing.effective_width_mm),
            n,
            fmt_mm(d_b),
            gaps,
            fmt_mm(spacing.min_spacing_mm),
            spacing.bar_spacing_mm,
        );
        let governs = if spacing.minimum_governs() {
            "minimum spacing governs"
        } else {
            "even split governs"
        };
        let _ = writeln!(
            out,
            "Even split gap {:.1} mm, {} (layer {}).\n",
            even_split, governs, layer.layer_number
        );
    }

    let _ = writeln!(out, "## Layers\n");
    let _ = writeln!(out, "| Layer | Bars | d_b (mm) | d (mm) | x (mm) |");
    let _ = writeln!(out, "|-------|------|----------|--------|--------|");
    for layer in &result.layout.layers {
        let xs: Vec<String> = layer.x_coords.iter().map(|x| format!("{x:.1}")).collect();
        let _ = writeln!(
            out,
            "| {} | {} | {} | {:.1} | {} |",
            layer.layer_number,
            layer.bar_count,
            fmt_mm(layer.bar_diameter_mm),
            layer.effective_depth_mm(),
            xs.join(", "),
        );
    }

    if !result.warnings.is_empty() {
        let _ = writeln!(out, "\n## Warnings\n");
        for warning in &result.warnings {
            let _ = writeln!(out, "- {warning}");
        }
    }

    out
}
