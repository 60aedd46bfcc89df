//! Project statistics and the downloadable JSON project export.

use serde::Serialize;

use crate::catalog::{FenceSystem, HouseStyle};
use crate::element::{ElementType, FenceElement};
use crate::error::CoreError;
use crate::project::FenceProject;
use crate::types::Timestamp;

/// Element counts plus length and face area of the fence panels.
///
/// Length and area count sections only; posts, gates and doors are counted
/// but add no run length here.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total_length: f64,
    pub total_area: f64,
    pub posts: u32,
    pub gates: u32,
    pub doors: u32,
    pub sections: u32,
}

impl ProjectStats {
    pub fn from_elements(elements: &[FenceElement]) -> Self {
        let mut stats = Self::default();
        for element in elements {
            match element.element_type {
                ElementType::Post => stats.posts += 1,
                ElementType::Gate => stats.gates += 1,
                ElementType::Door => stats.doors += 1,
                ElementType::Section => {
                    stats.sections += 1;
                    stats.total_length += element.width;
                    stats.total_area += element.width * element.height;
                }
            }
        }
        stats
    }
}

/// Snapshot written to disk when the user exports a project.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectExport {
    pub name: String,
    pub system: Option<FenceSystem>,
    pub house_style: Option<HouseStyle>,
    pub elements: Vec<FenceElement>,
    pub stats: ProjectStats,
    pub total_price: f64,
    pub export_date: Timestamp,
}

impl ProjectExport {
    /// Capture `project` as of `now`.
    pub fn from_project(project: &FenceProject, now: Timestamp) -> Self {
        Self {
            name: format!("Projekt ogrodzenia - {}", now.format("%d.%m.%Y")),
            system: project.selected_system().cloned(),
            house_style: project.selected_house_style().cloned(),
            elements: project.elements().to_vec(),
            stats: ProjectStats::from_elements(project.elements()),
            total_price: project.total_price(),
            export_date: now,
        }
    }

    /// Suggested download name, e.g. `projekt-ogrodzenia-2024-05-01.json`.
    pub fn file_name(&self) -> String {
        format!(
            "projekt-ogrodzenia-{}.json",
            self.export_date.format("%Y-%m-%d")
        )
    }

    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self).map_err(|e| CoreError::Internal(e.to_string()))
    }
}
