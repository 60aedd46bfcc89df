//! Itemized cost breakdown (material vs. installation) with markup.
//!
//! This is a read-only view over a project's elements. The rates differ from
//! the list prices in [`crate::pricing`]: they split each part into material
//! and installation cost, and sections pay a caller-chosen installation rate
//! per meter.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::element::{ElementType, FenceElement};
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Rates
// ---------------------------------------------------------------------------

pub const POST_MATERIAL: f64 = 45.0;
pub const POST_INSTALLATION: f64 = 25.0;
pub const GATE_MATERIAL: f64 = 850.0;
pub const GATE_INSTALLATION: f64 = 150.0;
pub const DOOR_MATERIAL: f64 = 450.0;
pub const DOOR_INSTALLATION: f64 = 75.0;
/// Section material cost per meter of width.
pub const SECTION_MATERIAL_PER_METER: f64 = 75.0;

pub const DEFAULT_INSTALLATION_COST_PER_METER: f64 = 30.0;
pub const DEFAULT_MARKUP_PERCENT: f64 = 25.0;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// User-adjustable quote parameters. Not stored in the project.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteSettings {
    #[validate(range(min = 0.0))]
    pub installation_cost_per_meter: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub markup_percent: f64,
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            installation_cost_per_meter: DEFAULT_INSTALLATION_COST_PER_METER,
            markup_percent: DEFAULT_MARKUP_PERCENT,
        }
    }
}

// ---------------------------------------------------------------------------
// Quote types
// ---------------------------------------------------------------------------

/// Cost of all elements of one type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLine {
    pub category: ElementType,
    pub count: u32,
    /// Summed width; only meaningful for sections.
    pub length: f64,
    /// Combined material + installation rate: per piece, or per meter for
    /// sections.
    pub unit_price: f64,
    pub material: f64,
    pub installation: f64,
    pub total: f64,
}

impl QuoteLine {
    fn empty(category: ElementType, unit_price: f64) -> Self {
        Self {
            category,
            count: 0,
            length: 0.0,
            unit_price,
            material: 0.0,
            installation: 0.0,
            total: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// One line per element type present, in post/gate/door/section order.
    pub lines: Vec<QuoteLine>,
    pub material_total: f64,
    pub installation_total: f64,
    pub subtotal: f64,
    pub markup_percent: f64,
    pub markup: f64,
    pub grand_total: f64,
    pub element_count: usize,
    /// Bounding-box perimeter of the placed elements, in meters.
    pub perimeter: f64,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Build the cost breakdown for `elements`.
pub fn build_quote(elements: &[FenceElement], settings: &QuoteSettings) -> Result<Quote, CoreError> {
    settings
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let install_rate = settings.installation_cost_per_meter;
    let mut lines = [
        QuoteLine::empty(ElementType::Post, POST_MATERIAL + POST_INSTALLATION),
        QuoteLine::empty(ElementType::Gate, GATE_MATERIAL + GATE_INSTALLATION),
        QuoteLine::empty(ElementType::Door, DOOR_MATERIAL + DOOR_INSTALLATION),
        QuoteLine::empty(ElementType::Section, SECTION_MATERIAL_PER_METER + install_rate),
    ];

    for element in elements {
        let (slot, material, installation) = match element.element_type {
            ElementType::Post => (0, POST_MATERIAL, POST_INSTALLATION),
            ElementType::Gate => (1, GATE_MATERIAL, GATE_INSTALLATION),
            ElementType::Door => (2, DOOR_MATERIAL, DOOR_INSTALLATION),
            ElementType::Section => (
                3,
                element.width * SECTION_MATERIAL_PER_METER,
                element.width * install_rate,
            ),
        };
        let line = &mut lines[slot];
        line.count += 1;
        if element.element_type == ElementType::Section {
            line.length += element.width;
        }
        line.material += material;
        line.installation += installation;
        line.total += material + installation;
    }

    let lines: Vec<QuoteLine> = lines.into_iter().filter(|l| l.count > 0).collect();
    let material_total: f64 = lines.iter().map(|l| l.material).sum();
    let installation_total: f64 = lines.iter().map(|l| l.installation).sum();
    let subtotal = material_total + installation_total;
    let markup = subtotal * settings.markup_percent / 100.0;

    Ok(Quote {
        lines,
        material_total,
        installation_total,
        subtotal,
        markup_percent: settings.markup_percent,
        markup,
        grand_total: subtotal + markup,
        element_count: elements.len(),
        perimeter: bounding_perimeter(elements),
    })
}

/// Perimeter of the axis-aligned box spanned by the elements on the ground
/// plane. Each element extends `width` along x from its position.
pub fn bounding_perimeter(elements: &[FenceElement]) -> f64 {
    if elements.is_empty() {
        return 0.0;
    }
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_z, mut max_z) = (f64::INFINITY, f64::NEG_INFINITY);
    for e in elements {
        min_x = min_x.min(e.position.x);
        max_x = max_x.max(e.position.x + e.width);
        min_z = min_z.min(e.position.z);
        max_z = max_z.max(e.position.z);
    }
    2.0 * ((max_x - min_x) + (max_z - min_z))
}
