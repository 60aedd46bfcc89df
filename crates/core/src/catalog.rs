//! Fence product catalog: server-side system descriptors, house styles and
//! the typed per-product element definitions used by the 3D configurator.
//!
//! Catalog entries are read-only configuration. They are parsed from JSON
//! and validated once at load time; after that nothing mutates them.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::element::ElementType;
use crate::error::CoreError;

/// Built-in product line, shipped with the crate.
const BUILTIN_CATALOG_JSON: &str = include_str!("../catalog/fences.json");

// ---------------------------------------------------------------------------
// Server-side descriptors
// ---------------------------------------------------------------------------

/// A selectable fence system as returned by `GET /api/systems`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FenceSystem {
    pub id: String,
    pub name: String,
    pub obj_file: String,
    pub mtl_file: String,
    pub texture_file: Option<String>,
    pub base_price: f64,
}

/// A house model shown next to the fence in the 3D view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseStyle {
    pub id: String,
    pub name: String,
    pub model: String,
}

/// The fixed set of fence systems served by the backend.
pub fn builtin_systems() -> Vec<FenceSystem> {
    vec![
        FenceSystem {
            id: "smooth-medium".into(),
            name: "Ogrodzenie gładkie Medium".into(),
            obj_file: "/Ogrodzenie/Ogrodzenei gładkie Medium - konfigurator.obj".into(),
            mtl_file: "/Ogrodzenie/Ogrodzenei gładkie Medium - konfigurator.mtl".into(),
            texture_file: Some("/Ogrodzenie/_1.tif".into()),
            base_price: 150.0,
        },
        FenceSystem {
            id: "smooth-premium".into(),
            name: "Ogrodzenie gładkie Premium".into(),
            obj_file: "/Ogrodzenie/smooth-premium.obj".into(),
            mtl_file: "/Ogrodzenie/smooth-premium.mtl".into(),
            texture_file: Some("/Ogrodzenie/smooth-premium.tif".into()),
            base_price: 200.0,
        },
        FenceSystem {
            id: "decorative-classic".into(),
            name: "Ogrodzenie dekoracyjne Klasyczne".into(),
            obj_file: "/Ogrodzenie/decorative-classic.obj".into(),
            mtl_file: "/Ogrodzenie/decorative-classic.mtl".into(),
            texture_file: Some("/Ogrodzenie/decorative-classic.tif".into()),
            base_price: 250.0,
        },
    ]
}

/// The fixed set of house styles served by the backend.
pub fn builtin_house_styles() -> Vec<HouseStyle> {
    vec![
        HouseStyle {
            id: "modern".into(),
            name: "Nowoczesny".into(),
            model: "/models/house-modern.glb".into(),
        },
        HouseStyle {
            id: "classic".into(),
            name: "Klasyczny".into(),
            model: "/models/house-classic.glb".into(),
        },
    ]
}

// ---------------------------------------------------------------------------
// Typed product definitions
// ---------------------------------------------------------------------------

/// Surface family a texture is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    Wood,
    Metal,
}

/// Texture files for one model group. Only `diffuse` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureConfig {
    #[serde(rename = "type")]
    pub kind: SurfaceKind,
    pub diffuse: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roughness: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metalness: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ao: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub y: f64,
}

/// Euler rotation in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotation3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Rotation3 {
    /// Stands DAE exports (Z-up, facing away) upright and toward the camera.
    fn default() -> Self {
        Self {
            x: 1.5708,
            y: 3.1416,
            z: 0.0,
        }
    }
}

/// Model sub-parts and textures that make up one element type of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementConfig {
    pub groups: Vec<String>,
    pub textures: BTreeMap<String, TextureConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positioning: Option<BTreeMap<String, Offset>>,
    #[serde(default)]
    pub rotation: Rotation3,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementConfigs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<ElementConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<ElementConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<ElementConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub door: Option<ElementConfig>,
}

impl ElementConfigs {
    pub fn get(&self, element_type: ElementType) -> Option<&ElementConfig> {
        match element_type {
            ElementType::Post => self.post.as_ref(),
            ElementType::Section => self.section.as_ref(),
            ElementType::Gate => self.gate.as_ref(),
            ElementType::Door => self.door.as_ref(),
        }
    }

    fn iter(&self) -> impl Iterator<Item = (ElementType, &ElementConfig)> {
        ElementType::ALL
            .into_iter()
            .filter_map(move |t| self.get(t).map(|c| (t, c)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialSide {
    FrontSide,
    DoubleSide,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceParams {
    pub roughness: f64,
    pub metalness: f64,
    pub env_map_intensity: f64,
    pub side: MaterialSide,
    pub flat_shading: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialParams {
    pub wood: SurfaceParams,
    pub metal: SurfaceParams,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            wood: SurfaceParams {
                roughness: 0.8,
                metalness: 0.1,
                env_map_intensity: 1.0,
                side: MaterialSide::DoubleSide,
                flat_shading: false,
            },
            metal: SurfaceParams {
                roughness: 0.3,
                metalness: 0.9,
                env_map_intensity: 1.2,
                side: MaterialSide::DoubleSide,
                flat_shading: false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoSectionAnchor {
    Center,
    Left,
    Right,
}

/// Whether a section is inserted automatically between two placed posts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoSection {
    pub enabled: bool,
    /// Milliseconds to wait after the second post lands.
    pub delay: u64,
    pub position: AutoSectionAnchor,
}

impl Default for AutoSection {
    fn default() -> Self {
        Self {
            enabled: true,
            delay: 200,
            position: AutoSectionAnchor::Center,
        }
    }
}

/// Orbit camera limits for the 3D view (angles in radians).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraLimits {
    pub min_distance: f64,
    pub zoom_speed: f64,
    pub min_polar_angle: f64,
    pub max_polar_angle: f64,
}

impl Default for CameraLimits {
    fn default() -> Self {
        Self {
            min_distance: 2.0,
            zoom_speed: 0.5,
            min_polar_angle: 0.0,
            max_polar_angle: 1.5708,
        }
    }
}

/// Full definition of one fence product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FenceCatalogEntry {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Human-readable block sizes, e.g. `"80x25"`.
    pub dimensions: String,
    pub colors: Vec<String>,
    pub model_path: String,
    pub texture_path: String,
    #[serde(default)]
    pub elements: ElementConfigs,
    #[serde(default)]
    pub materials: MaterialParams,
    #[serde(default)]
    pub auto_section: AutoSection,
    #[serde(default)]
    pub camera: CameraLimits,
}

impl FenceCatalogEntry {
    /// Element types this product provides model groups for.
    pub fn supported_elements(&self) -> Vec<ElementType> {
        self.elements.iter().map(|(t, _)| t).collect()
    }

    /// Check the entry's internal consistency.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id.trim().is_empty() {
            return Err(CoreError::Validation(
                "catalog entry id must not be empty".to_string(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "catalog entry '{}' has an empty name",
                self.id
            )));
        }

        for (element_type, config) in self.elements.iter() {
            let ctx = format!("catalog entry '{}' {element_type}", self.id);

            if config.groups.is_empty() {
                return Err(CoreError::Validation(format!("{ctx}: no model groups")));
            }
            for group in &config.groups {
                if !config.textures.contains_key(group) {
                    return Err(CoreError::Validation(format!(
                        "{ctx}: group '{group}' has no texture"
                    )));
                }
            }
            for (group, texture) in &config.textures {
                if !config.groups.contains(group) {
                    return Err(CoreError::Validation(format!(
                        "{ctx}: texture for unknown group '{group}'"
                    )));
                }
                if texture.diffuse.trim().is_empty() {
                    return Err(CoreError::Validation(format!(
                        "{ctx}: group '{group}' has an empty diffuse map"
                    )));
                }
            }
            if let Some(positioning) = &config.positioning {
                if let Some(group) = positioning.keys().find(|g| !config.groups.contains(g)) {
                    return Err(CoreError::Validation(format!(
                        "{ctx}: offset for unknown group '{group}'"
                    )));
                }
            }
            if config.default_height.is_some_and(|h| h <= 0.0) {
                return Err(CoreError::Validation(format!(
                    "{ctx}: default height must be positive"
                )));
            }
            if config.spacing.is_some_and(|s| s <= 0.0) {
                return Err(CoreError::Validation(format!(
                    "{ctx}: spacing must be positive"
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Validated, immutable set of fence products keyed by id.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<FenceCatalogEntry>,
}

impl Catalog {
    /// Validate `entries` and build a catalog. Ids must be unique.
    pub fn load(entries: Vec<FenceCatalogEntry>) -> Result<Self, CoreError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            entry.validate()?;
            if !seen.insert(entry.id.as_str()) {
                return Err(CoreError::Conflict(format!(
                    "duplicate catalog entry id '{}'",
                    entry.id
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Parse a JSON array of entries and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let entries: Vec<FenceCatalogEntry> = serde_json::from_str(json)
            .map_err(|e| CoreError::Validation(format!("invalid catalog JSON: {e}")))?;
        Self::load(entries)
    }

    /// The product line bundled with the crate.
    pub fn builtin() -> Result<Self, CoreError> {
        Self::from_json_str(BUILTIN_CATALOG_JSON)
    }

    pub fn entries(&self) -> &[FenceCatalogEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&FenceCatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a FenceCatalogEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn minimal_entry(id: &str) -> FenceCatalogEntry {
        let json = serde_json::json!({
            "id": id,
            "name": "Test",
            "category": "test",
            "dimensions": "10x10",
            "colors": ["Biały"],
            "modelPath": "/m/",
            "texturePath": "/t/",
            "elements": {
                "post": {
                    "groups": ["group_0"],
                    "textures": { "group_0": { "type": "wood", "diffuse": "a.jpg" } }
                }
            }
        });
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 13);
        assert!(catalog.get("gładkie_medium").is_some());
        assert!(catalog.get("nope").is_none());
    }

    #[test]
    fn test_builtin_medium_supports_every_element_type() {
        let catalog = Catalog::builtin().unwrap();
        let medium = catalog.get("gładkie_medium").unwrap();
        assert_eq!(medium.supported_elements(), ElementType::ALL.to_vec());
        assert_eq!(medium.elements.door.as_ref().unwrap().groups, vec!["group_17"]);
    }

    #[test]
    fn test_defaults_applied_when_omitted() {
        let entry = minimal_entry("x");
        assert_eq!(entry.materials, MaterialParams::default());
        assert_eq!(entry.auto_section.delay, 200);
        assert_eq!(entry.camera.min_distance, 2.0);
        let post = entry.elements.post.as_ref().unwrap();
        assert_eq!(post.rotation, Rotation3::default());
        assert_eq!(post.spacing, None);
    }

    #[test]
    fn test_by_category() {
        let catalog = Catalog::builtin().unwrap();
        let vision: Vec<_> = catalog.by_category("vision").map(|e| e.id.as_str()).collect();
        assert_eq!(vision, vec!["long_vision", "max_vision", "medium_vision"]);
    }

    #[test]
    fn test_group_without_texture_rejected() {
        let mut entry = minimal_entry("x");
        entry
            .elements
            .post
            .as_mut()
            .unwrap()
            .groups
            .push("group_9".into());
        let err = Catalog::load(vec![entry]).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("group_9"));
    }

    #[test]
    fn test_non_positive_spacing_rejected() {
        let mut entry = minimal_entry("x");
        entry.elements.post.as_mut().unwrap().spacing = Some(0.0);
        assert_matches!(entry.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = Catalog::load(vec![minimal_entry("a"), minimal_entry("a")]).unwrap_err();
        assert_matches!(err, CoreError::Conflict(_));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert_matches!(
            Catalog::from_json_str(r#"[{"id": "x"}]"#),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn test_systems_and_house_styles() {
        let systems = builtin_systems();
        assert_eq!(systems.len(), 3);
        assert_eq!(systems[0].base_price, 150.0);
        let json = serde_json::to_value(&systems[1]).unwrap();
        assert_eq!(json["objFile"], "/Ogrodzenie/smooth-premium.obj");
        assert_eq!(json["basePrice"], 200.0);

        let styles = builtin_house_styles();
        assert_eq!(
            styles.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
            vec!["modern", "classic"]
        );
    }
}
