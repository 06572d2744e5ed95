//! Metric Reinforcing Bar Sizes (CSA G30.18)
//!
//! Standard deformed bar designations with the rounded diameters used for
//! detailing (11, 16, 20, 25, 30, 36, 44, 56 mm) alongside the exact nominal
//! diameters and areas from the standard.
//!
//! ## Example
//!
//! ```rust
//! use rebar_core::materials::rebar::RebarSize;
//!
//! let bar = RebarSize::from_designation("20M").unwrap();
//! assert_eq!(bar.diameter_mm(), 20.0);
//! assert_eq!(RebarSize::from_diameter(20.0), Some(bar));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

/// Standard metric bar designation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RebarSize {
    #[serde(rename = "10M")]
    M10,
    #[serde(rename = "15M")]
    M15,
    #[serde(rename = "20M")]
    M20,
    #[serde(rename = "25M")]
    M25,
    #[serde(rename = "30M")]
    M30,
    #[serde(rename = "35M")]
    M35,
    #[serde(rename = "45M")]
    M45,
    #[serde(rename = "55M")]
    M55,
}

/// Sizes accepted for links (stirrups/ties)
pub const LINK_SIZES: [RebarSize; 3] = [RebarSize::M10, RebarSize::M15, RebarSize::M20];

static BY_DESIGNATION: Lazy<HashMap<&'static str, RebarSize>> = Lazy::new(|| {
    RebarSize::ALL
        .iter()
        .map(|size| (size.designation(), *size))
        .collect()
});

impl RebarSize {
    /// All bar sizes, smallest first
    pub const ALL: [RebarSize; 8] = [
        RebarSize::M10,
        RebarSize::M15,
        RebarSize::M20,
        RebarSize::M25,
        RebarSize::M30,
        RebarSize::M35,
        RebarSize::M45,
        RebarSize::M55,
    ];

    /// Designation string, e.g. "25M"
    pub fn designation(&self) -> &'static str {
        match self {
            RebarSize::M10 => "10M",
            RebarSize::M15 => "15M",
            RebarSize::M20 => "20M",
            RebarSize::M25 => "25M",
            RebarSize::M30 => "30M",
            RebarSize::M35 => "35M",
            RebarSize::M45 => "45M",
            RebarSize::M55 => "55M",
        }
    }

    /// Rounded diameter used for detailing (mm)
    pub fn diameter_mm(&self) -> f64 {
        match self {
            RebarSize::M10 => 11.0,
            RebarSize::M15 => 16.0,
            RebarSize::M20 => 20.0,
            RebarSize::M25 => 25.0,
            RebarSize::M30 => 30.0,
            RebarSize::M35 => 36.0,
            RebarSize::M45 => 44.0,
            RebarSize::M55 => 56.0,
        }
    }

    /// Nominal diameter from the standard (mm)
    pub fn nominal_diameter_mm(&self) -> f64 {
        match self {
            RebarSize::M10 => 11.3,
            RebarSize::M15 => 16.0,
            RebarSize::M20 => 19.5,
            RebarSize::M25 => 25.2,
            RebarSize::M30 => 29.9,
            RebarSize::M35 => 35.7,
            RebarSize::M45 => 43.7,
            RebarSize::M55 => 56.4,
        }
    }

    /// Nominal cross-sectional area (mm²)
    pub fn area_mm2(&self) -> f64 {
        match self {
            RebarSize::M10 => 100.0,
            RebarSize::M15 => 200.0,
            RebarSize::M20 => 300.0,
            RebarSize::M25 => 500.0,
            RebarSize::M30 => 700.0,
            RebarSize::M35 => 1000.0,
            RebarSize::M45 => 1500.0,
            RebarSize::M55 => 2500.0,
        }
    }

    /// Look up a size by designation (case-insensitive, "20m" works)
    pub fn from_designation(s: &str) -> Option<Self> {
        BY_DESIGNATION.get(s.trim().to_uppercase().as_str()).copied()
    }

    /// Look up a size by its rounded detailing diameter
    pub fn from_diameter(diameter_mm: f64) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|size| (size.diameter_mm() - diameter_mm).abs() < 1e-6)
    }

    /// Whether this size may be used as a link
    pub fn is_link_size(&self) -> bool {
        LINK_SIZES.contains(self)
    }
}

impl fmt::Display for RebarSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.designation())
    }
}

impl FromStr for RebarSize {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_designation(s)
            .ok_or_else(|| CalcError::invalid_input("bar_size", s, "Unknown bar designation"))
    }
}

/// Whether `diameter_mm` is one of the standard detailing diameters
pub fn is_standard_bar_diameter(diameter_mm: f64) -> bool {
    RebarSize::from_diameter(diameter_mm).is_some()
}

/// Whether `diameter_mm` is one of the standard link diameters
pub fn is_standard_link_diameter(diameter_mm: f64) -> bool {
    RebarSize::from_diameter(diameter_mm).is_some_and(|size| size.is_link_size())
}
