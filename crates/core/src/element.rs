//! Placed fence parts and their partial-update payload.

use serde::{Deserialize, Serialize};

use crate::pricing::element_price;
use crate::types::{Dimensions, Position};

/// Material tag used when no fence system is selected.
pub const DEFAULT_MATERIAL: &str = "default";

/// Height applied to a section when the caller does not supply one.
pub const DEFAULT_SECTION_HEIGHT: f64 = 1.5;

/// Kind of physical fence part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Post,
    Gate,
    Door,
    Section,
}

impl ElementType {
    pub const ALL: [ElementType; 4] = [
        ElementType::Post,
        ElementType::Gate,
        ElementType::Door,
        ElementType::Section,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::Post => "post",
            ElementType::Gate => "gate",
            ElementType::Door => "door",
            ElementType::Section => "section",
        }
    }

    /// Default footprint for fixed-size parts. Sections have no default
    /// width, so this returns `None` for them.
    pub fn default_dimensions(self) -> Option<Dimensions> {
        match self {
            ElementType::Post => Some(Dimensions::new(0.2, 2.0)),
            ElementType::Gate => Some(Dimensions::new(3.0, 2.0)),
            ElementType::Door => Some(Dimensions::new(1.0, 2.0)),
            ElementType::Section => None,
        }
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One placed instance of a post, gate, door or section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FenceElement {
    pub id: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    pub position: Position,
    /// Degrees around the vertical axis, in `[0, 360)`.
    pub rotation: f64,
    pub width: f64,
    pub height: f64,
    pub material: String,
    pub price: f64,
}

impl FenceElement {
    /// Price this element should carry given its current type and width.
    pub fn expected_price(&self) -> f64 {
        element_price(self.element_type, self.width)
    }
}

/// Partial update merged into an existing element.
///
/// `id` and `type` are not updatable. `price` is accepted for wire
/// compatibility but the stored price always follows the pricing rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementUpdate {
    pub position: Option<Position>,
    pub rotation: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub material: Option<String>,
    pub price: Option<f64>,
}

impl ElementUpdate {
    pub fn width(width: f64) -> Self {
        Self {
            width: Some(width),
            ..Default::default()
        }
    }

    pub fn height(height: f64) -> Self {
        Self {
            height: Some(height),
            ..Default::default()
        }
    }

    pub fn position(position: Position) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }
}

/// Normalize an angle in degrees into `[0, 360)`.
pub fn normalize_rotation(degrees: f64) -> f64 {
    let r = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dimensions() {
        assert_eq!(
            ElementType::Post.default_dimensions(),
            Some(Dimensions::new(0.2, 2.0))
        );
        assert_eq!(
            ElementType::Gate.default_dimensions(),
            Some(Dimensions::new(3.0, 2.0))
        );
        assert_eq!(
            ElementType::Door.default_dimensions(),
            Some(Dimensions::new(1.0, 2.0))
        );
        assert_eq!(ElementType::Section.default_dimensions(), None);
    }

    #[test]
    fn test_element_type_serializes_lowercase() {
        let json = serde_json::to_string(&ElementType::Section).unwrap();
        assert_eq!(json, "\"section\"");
        let parsed: ElementType = serde_json::from_str("\"gate\"").unwrap();
        assert_eq!(parsed, ElementType::Gate);
    }

    #[test]
    fn test_unknown_element_type_rejected() {
        assert!(serde_json::from_str::<ElementType>("\"hedge\"").is_err());
    }

    #[test]
    fn test_element_serializes_type_field() {
        let element = FenceElement {
            id: "post-1".into(),
            element_type: ElementType::Post,
            position: Position::ground(1.0, 2.0),
            rotation: 0.0,
            width: 0.2,
            height: 2.0,
            material: DEFAULT_MATERIAL.into(),
            price: 50.0,
        };
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["type"], "post");
        assert_eq!(json["position"]["z"], 2.0);
    }

    #[test]
    fn test_partial_update_deserializes_missing_fields() {
        let update: ElementUpdate = serde_json::from_str(r#"{"width": 5.0}"#).unwrap();
        assert_eq!(update.width, Some(5.0));
        assert_eq!(update.height, None);
        assert_eq!(update.price, None);
    }

    #[test]
    fn test_normalize_rotation() {
        assert_eq!(normalize_rotation(45.0), 45.0);
        assert_eq!(normalize_rotation(360.0), 0.0);
        assert_eq!(normalize_rotation(405.0), 45.0);
        assert_eq!(normalize_rotation(-90.0), 270.0);
        let tiny = normalize_rotation(-1e-15);
        assert!((0.0..360.0).contains(&tiny));
    }
}
