//! # Bar Spacing Formulas
//!
//! Geometry of a layer of longitudinal bars inside the link of a rectangular
//! section, plus the minimum clear spacing rule of CSA A23.1 Cl. 6.6.5.2.
//!
//! ## Notation
//!
//! - `b` = Beam width
//! - `h` = Beam depth
//! - `c` = Clear cover to the link
//! - `d_s` = Link (stirrup) diameter
//! - `d_b` = Longitudinal bar diameter
//! - `a_g` = Nominal maximum aggregate size
//! - `b_eff` = Effective width available for bar centres
//!
//! ```text
//!     ┌───────────────────────────┐
//!     │  ┌─────────────────────┐  │
//!     │  │                     │  │
//!     │  │  ●     ●     ●   ●  │  │ ← layer centroid at d
//!     │  └─────────────────────┘  │
//!     └───────────────────────────┘
//!      c+d_s+d_b/2 |← b_eff →|
//! ```
//!
//! All lengths are millimetres.

use crate::errors::{CalcError, CalcResult};

/// Multiplier applied to bar diameter and aggregate size in the spacing rule
pub const SPACING_FACTOR: f64 = 1.4;

/// Calculate the width available for bar centres.
///
/// # Formula
/// b_eff = b - 2(c + d_s + d_b/2)
///
/// # Example
/// ```rust
/// use rebar_core::equations::spacing::effective_width;
///
/// let b_eff = effective_width(300.0, 30.0, 11.0, 20.0);
/// assert!((b_eff - 198.0).abs() < 1e-9);
/// ```
#[inline]
pub fn effective_width(beam_width: f64, cover: f64, link_diameter: f64, bar_diameter: f64) -> f64 {
    beam_width - 2.0 * (cover + link_diameter + bar_diameter / 2.0)
}

/// Calculate the effective depth of a layer of bars.
///
/// `prior_offset` is the depth already consumed by the layers placed before
/// this one; it is zero for the first layer.
///
/// # Formula
/// d = h - (c + d_s + d_b/2 + offset)
///
/// # Example
/// ```rust
/// use rebar_core::equations::spacing::effective_depth;
///
/// let d = effective_depth(300.0, 30.0, 11.0, 20.0, 0.0);
/// assert!((d - 249.0).abs() < 1e-9);
/// ```
#[inline]
pub fn effective_depth(
    beam_depth: f64,
    cover: f64,
    link_diameter: f64,
    bar_diameter: f64,
    prior_offset: f64,
) -> f64 {
    beam_depth - (cover + link_diameter + bar_diameter / 2.0 + prior_offset)
}

/// Minimum clear spacing between parallel bars.
///
/// # Formula
/// s_min = max(1.4 d_b, 1.4 a_g, c)
///
/// # Reference
/// - CSA A23.1 Cl. 6.6.5.2
#[inline]
pub fn minimum_spacing(bar_diameter: f64, aggregate_size: f64, cover: f64) -> f64 {
    (SPACING_FACTOR * bar_diameter)
        .max(SPACING_FACTOR * aggregate_size)
        .max(cover)
}

/// Gap between bars when `bar_count` bars are split evenly over `b_eff`.
///
/// # Formula
/// s = (b_eff - n d_b) / (n - 1)
///
/// Caller guarantees `bar_count >= 2`.
#[inline]
fn even_split_gap(effective_width: f64, bar_count: u32, bar_diameter: f64) -> f64 {
    let n = f64::from(bar_count);
    (effective_width - n * bar_diameter) / (n - 1.0)
}

/// Governing spacing of a layer.
///
/// The even-split gap is used when it is at least the code minimum;
/// otherwise the minimum governs and the bars no longer span the whole
/// effective width.
///
/// # Formula
/// s = max((b_eff - n d_b)/(n - 1), s_min)
///
/// # Errors
/// `CalcError::InvalidLayer` when `bar_count < 2`.
///
/// # Example
/// ```rust
/// use rebar_core::equations::spacing::layer_spacing;
///
/// let s = layer_spacing(198.0, 2, 20.0, 20.0, 30.0).unwrap();
/// assert!((s - 158.0).abs() < 1e-9);
/// ```
pub fn layer_spacing(
    effective_width: f64,
    bar_count: u32,
    bar_diameter: f64,
    aggregate_size: f64,
    cover: f64,
) -> CalcResult<f64> {
    if bar_count < 2 {
        return Err(CalcError::invalid_layer(
            bar_count,
            "Spacing requires at least two bars in the layer",
        ));
    }

    let gap = even_split_gap(effective_width, bar_count, bar_diameter);
    Ok(gap.max(minimum_spacing(bar_diameter, aggregate_size, cover)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_effective_width_reference_section() {
        // 300 - 2(30 + 11 + 10) = 198
        assert!((effective_width(300.0, 30.0, 11.0, 20.0) - 198.0).abs() < EPS);
    }

    #[test]
    fn test_effective_width_positive_when_section_is_wide_enough() {
        for &(b, c, s, d) in &[
            (300.0, 30.0, 11.0, 20.0),
            (103.0, 25.0, 11.0, 30.0),
            (600.0, 40.0, 16.0, 56.0),
        ] {
            assert!(b > 2.0 * (c + s + d / 2.0));
            assert!(effective_width(b, c, s, d) > 0.0);
        }
    }

    #[test]
    fn test_effective_depth_with_offset() {
        assert!((effective_depth(300.0, 30.0, 11.0, 20.0, 0.0) - 249.0).abs() < EPS);
        assert!((effective_depth(300.0, 30.0, 11.0, 20.0, 178.0) - 71.0).abs() < EPS);
    }

    #[test]
    fn test_minimum_spacing_picks_largest_candidate() {
        // 1.4 x 20 = 28 for both, cover 30 governs
        assert!((minimum_spacing(20.0, 20.0, 30.0) - 30.0).abs() < EPS);
        // bar governs
        assert!((minimum_spacing(36.0, 20.0, 30.0) - 50.4).abs() < EPS);
        // aggregate governs
        assert!((minimum_spacing(11.0, 40.0, 30.0) - 56.0).abs() < EPS);
    }

    #[test]
    fn test_minimum_spacing_dominates_each_candidate() {
        for &d in &[0.0, 11.0, 20.0, 56.0] {
            for &agg in &[0.0, 10.0, 20.0, 40.0] {
                for &c in &[0.0, 25.0, 40.0, 75.0] {
                    let s = minimum_spacing(d, agg, c);
                    assert!(s >= c);
                    assert!(s >= 1.4 * d);
                    assert!(s >= 1.4 * agg);
                }
            }
        }
    }

    #[test]
    fn test_layer_spacing_even_split_governs() {
        // (198 - 40) / 1 = 158 > 30
        let s = layer_spacing(198.0, 2, 20.0, 20.0, 30.0).unwrap();
        assert!((s - 158.0).abs() < EPS);
    }

    #[test]
    fn test_layer_spacing_minimum_governs() {
        // (198 - 200) / 9 < 0, minimum 30 governs
        let s = layer_spacing(198.0, 10, 20.0, 20.0, 30.0).unwrap();
        assert!((s - 30.0).abs() < EPS);
    }

    #[test]
    fn test_layer_spacing_rejects_single_bar() {
        let err = layer_spacing(198.0, 1, 20.0, 20.0, 30.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_LAYER");
        assert!(layer_spacing(198.0, 0, 20.0, 20.0, 30.0).is_err());
    }

    #[test]
    fn test_layer_spacing_monotonic_in_aggregate_and_cover() {
        let mut last = 0.0;
        for agg in [5.0, 10.0, 20.0, 30.0, 40.0, 60.0] {
            let s = layer_spacing(198.0, 4, 20.0, agg, 30.0).unwrap();
            assert!(s >= last);
            last = s;
        }

        let mut last = 0.0;
        for cover in [20.0, 30.0, 40.0, 60.0, 80.0] {
            let s = layer_spacing(198.0, 4, 20.0, 20.0, cover).unwrap();
            assert!(s >= last);
            last = s;
        }
    }
}
