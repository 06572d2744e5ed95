//! # Project Data Structures
//!
//! A `Project` groups the section checks of one job. Projects serialize to
//! `.rbp` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: DetailingSettings (code clause, default cover/aggregate/link)
//! └── items: HashMap<Uuid, CalculationItem> (all section checks)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rebar_core::project::Project;
//!
//! let project = Project::new("Jane Engineer", "25-042", "ACME Corp");
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("CSA A23.1"));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::bar_layout::BeamSection;
use crate::calculations::CalculationItem;

/// Current schema version for .rbp files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Detailing defaults
    #[serde(default)]
    pub settings: DetailingSettings,

    /// All section checks, keyed by UUID
    pub items: HashMap<Uuid, CalculationItem>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rebar_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(project.meta.engineer, "John Doe");
    /// ```
    pub fn new(
        engineer: impl Into<String>,
        job_id: impl Into<String>,
        client: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: DetailingSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add a calculation item and return its new UUID.
    pub fn add_item(&mut self, item: CalculationItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove a calculation item by UUID.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<CalculationItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    pub fn get_item(&self, id: &Uuid) -> Option<&CalculationItem> {
        self.items.get(id)
    }

    /// Items sorted by label, for stable listings
    pub fn items_by_label(&self) -> Vec<(&Uuid, &CalculationItem)> {
        let mut items: Vec<_> = self.items.iter().collect();
        items.sort_by(|a, b| a.1.label().cmp(b.1.label()));
        items
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Defaults offered when a new section is entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailingSettings {
    /// Clause the spacing rule is reported against
    pub spacing_clause: String,

    pub default_width_mm: f64,
    pub default_depth_mm: f64,
    pub default_cover_mm: f64,
    pub default_aggregate_size_mm: f64,
    pub default_link_diameter_mm: f64,
}

impl Default for DetailingSettings {
    fn default() -> Self {
        DetailingSettings {
            spacing_clause: "CSA A23.1 Cl. 6.6.5.2".to_string(),
            default_width_mm: 300.0,
            default_depth_mm: 300.0,
            default_cover_mm: 30.0,
            default_aggregate_size_mm: 20.0,
            default_link_diameter_mm: 11.0,
        }
    }
}

impl DetailingSettings {
    /// Section built from the defaults
    pub fn default_section(&self) -> BeamSection {
        BeamSection::new(
            self.default_width_mm,
            self.default_depth_mm,
            self.default_cover_mm,
            self.default_link_diameter_mm,
            self.default_aggregate_size_mm,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::bar_layout::BarLayer;
    use crate::calculations::BarLayoutInput;

    fn test_item(label: &str) -> CalculationItem {
        CalculationItem::BarLayout(BarLayoutInput {
            label: label.to_string(),
            section: DetailingSettings::default().default_section(),
            layers: vec![BarLayer::new(1, 20.0, 4)],
        })
    }

    #[test]
    fn test_project_creation() {
        let project = Project::new("John Doe", "25-001", "Acme Corp");
        assert_eq!(project.meta.engineer, "John Doe");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.item_count(), 0);
    }

    #[test]
    fn test_add_remove_item() {
        let mut project = Project::new("Engineer", "25-001", "Client");
        let id = project.add_item(test_item("B-1"));
        assert_eq!(project.item_count(), 1);
        assert_eq!(project.get_item(&id).map(|i| i.label()), Some("B-1"));

        assert!(project.remove_item(&id).is_some());
        assert!(project.remove_item(&id).is_none());
        assert_eq!(project.item_count(), 0);
    }

    #[test]
    fn test_items_by_label() {
        let mut project = Project::default();
        project.add_item(test_item("B-2"));
        project.add_item(test_item("B-1"));
        let labels: Vec<&str> = project.items_by_label().iter().map(|(_, i)| i.label()).collect();
        assert_eq!(labels, vec!["B-1", "B-2"]);
    }

    #[test]
    fn test_project_serialization() {
        let mut project = Project::new("Jane Engineer", "25-042", "Test Client");
        let id = project.add_item(test_item("B-1"));
        let json = serde_json::to_string_pretty(&project).unwrap();
        assert!(json.contains("\"type\": \"BarLayout\""));

        let roundtrip: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.engineer, "Jane Engineer");
        assert_eq!(roundtrip.get_item(&id), project.get_item(&id));
    }

    #[test]
    fn test_settings_fill_missing_fields() {
        let settings: DetailingSettings =
            serde_json::from_str(r#"{ "default_cover_mm": 40.0 }"#).unwrap();
        assert_eq!(settings.default_cover_mm, 40.0);
        assert_eq!(settings.default_link_diameter_mm, 11.0);
        assert!(settings.default_section().validate().is_ok());
    }
}
