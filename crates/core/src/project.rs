//! Configurator session state: placed elements, current selections and the
//! derived length/price totals.
//!
//! All mutation goes through [`FenceProject`] methods. Totals are recomputed
//! as full sums after every structural change; element counts are in the
//! tens, so there is no incremental bookkeeping.

use serde::{Deserialize, Serialize};

use crate::catalog::{FenceSystem, HouseStyle};
use crate::element::{
    normalize_rotation, ElementType, ElementUpdate, FenceElement, DEFAULT_MATERIAL,
    DEFAULT_SECTION_HEIGHT,
};
use crate::error::CoreError;
use crate::pricing::element_price;
use crate::types::{Dimensions, Position, ViewMode};

const ELEMENT_ENTITY: &str = "FenceElement";

// ---------------------------------------------------------------------------
// Scene adapter
// ---------------------------------------------------------------------------

/// Render-side collaborator notified of element lifecycle changes.
///
/// Every method defaults to a no-op so adapters only implement what they
/// mirror.
pub trait SceneAdapter: Send {
    fn on_element_added(&mut self, _element: &FenceElement) {}
    fn on_element_removed(&mut self, _id: &str) {}
    /// Clear everything the scene holds for this project.
    fn on_reset(&mut self) {}
}

/// Adapter used when no scene is attached.
#[derive(Debug, Default)]
pub struct NoopScene;

impl SceneAdapter for NoopScene {}

// ---------------------------------------------------------------------------
// Project state
// ---------------------------------------------------------------------------

/// Serializable snapshot of a project's state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectState {
    pub selected_system: Option<FenceSystem>,
    pub selected_house_style: Option<HouseStyle>,
    pub elements: Vec<FenceElement>,
    pub view_mode: ViewMode,
    pub total_length: f64,
    pub total_price: f64,
    pub is_closed: bool,
}

/// The single source of truth for a configurator session.
pub struct FenceProject {
    state: ProjectState,
    scene: Box<dyn SceneAdapter>,
}

impl Default for FenceProject {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FenceProject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FenceProject")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl FenceProject {
    /// Empty project with no scene attached.
    pub fn new() -> Self {
        Self::with_scene(Box::new(NoopScene))
    }

    /// Empty project that reports element changes to `scene`.
    pub fn with_scene(scene: Box<dyn SceneAdapter>) -> Self {
        Self {
            state: ProjectState::default(),
            scene,
        }
    }

    // --- Reads ---

    pub fn state(&self) -> &ProjectState {
        &self.state
    }

    pub fn elements(&self) -> &[FenceElement] {
        &self.state.elements
    }

    pub fn element(&self, id: &str) -> Option<&FenceElement> {
        self.state.elements.iter().find(|e| e.id == id)
    }

    pub fn total_length(&self) -> f64 {
        self.state.total_length
    }

    pub fn total_price(&self) -> f64 {
        self.state.total_price
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_closed
    }

    pub fn view_mode(&self) -> ViewMode {
        self.state.view_mode
    }

    pub fn selected_system(&self) -> Option<&FenceSystem> {
        self.state.selected_system.as_ref()
    }

    pub fn selected_house_style(&self) -> Option<&HouseStyle> {
        self.state.selected_house_style.as_ref()
    }

    // --- Selection ---

    pub fn select_system(&mut self, system: FenceSystem) {
        self.state.selected_system = Some(system);
    }

    pub fn select_house_style(&mut self, style: Option<HouseStyle>) {
        self.state.selected_house_style = style;
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.state.view_mode = mode;
    }

    // --- Elements ---

    /// Place a new element and return its id.
    ///
    /// Missing or non-positive dimensions fall back to the type's default.
    /// A section without a usable width gets width 0 (and price 0); callers
    /// are expected to pass one via [`FenceProject::add_section`].
    pub fn add_element(
        &mut self,
        element_type: ElementType,
        position: Position,
        dimensions: Option<Dimensions>,
    ) -> String {
        let (default_width, default_height) = match element_type.default_dimensions() {
            Some(d) => (d.width, d.height),
            None => (0.0, DEFAULT_SECTION_HEIGHT),
        };
        let width = dimensions
            .map(|d| d.width)
            .filter(|w| *w > 0.0)
            .unwrap_or(default_width);
        let height = dimensions
            .map(|d| d.height)
            .filter(|h| *h > 0.0)
            .unwrap_or(default_height);

        let element = FenceElement {
            id: new_element_id(element_type),
            element_type,
            position,
            rotation: 0.0,
            width,
            height,
            material: self.current_material(),
            price: element_price(element_type, width),
        };
        let id = element.id.clone();

        self.scene.on_element_added(&element);
        self.state.elements.push(element);
        self.state.is_closed = false;
        self.recompute_totals();

        id
    }

    pub fn add_post(&mut self, position: Position, dimensions: Option<Dimensions>) -> String {
        self.add_element(ElementType::Post, position, dimensions)
    }

    pub fn add_gate(&mut self, position: Position, dimensions: Option<Dimensions>) -> String {
        self.add_element(ElementType::Gate, position, dimensions)
    }

    pub fn add_door(&mut self, position: Position, dimensions: Option<Dimensions>) -> String {
        self.add_element(ElementType::Door, position, dimensions)
    }

    pub fn add_section(&mut self, position: Position, width: f64, height: Option<f64>) -> String {
        let dimensions = Dimensions::new(width, height.unwrap_or(DEFAULT_SECTION_HEIGHT));
        self.add_element(ElementType::Section, position, Some(dimensions))
    }

    /// Merge `update` into the element with `id`.
    ///
    /// The stored price always follows the pricing rule: a section's price
    /// tracks its (possibly new) width, other types keep their constant.
    pub fn update_element(&mut self, id: &str, update: ElementUpdate) -> Result<(), CoreError> {
        validate_dimension("width", update.width)?;
        validate_dimension("height", update.height)?;

        let element = self
            .state
            .elements
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| not_found(id))?;

        if let Some(position) = update.position {
            element.position = position;
        }
        if let Some(rotation) = update.rotation {
            element.rotation = normalize_rotation(rotation);
        }
        if let Some(width) = update.width {
            element.width = width;
        }
        if let Some(height) = update.height {
            element.height = height;
        }
        if let Some(material) = update.material {
            element.material = material;
        }
        element.price = element.expected_price();

        self.recompute_totals();
        Ok(())
    }

    /// Remove the element with `id` and return it.
    pub fn remove_element(&mut self, id: &str) -> Result<FenceElement, CoreError> {
        let index = self
            .state
            .elements
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| not_found(id))?;

        let removed = self.state.elements.remove(index);
        self.scene.on_element_removed(&removed.id);
        self.state.is_closed = false;
        self.recompute_totals();
        Ok(removed)
    }

    /// Set the rotation of the element with `id`. Totals are unaffected.
    pub fn rotate_element(&mut self, id: &str, degrees: f64) -> Result<(), CoreError> {
        let element = self
            .state
            .elements
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| not_found(id))?;
        element.rotation = normalize_rotation(degrees);
        Ok(())
    }

    /// Drop all elements and clear the scene. Selections and view mode stay.
    pub fn reset(&mut self) {
        self.state.elements.clear();
        self.state.total_length = 0.0;
        self.state.total_price = 0.0;
        self.state.is_closed = false;
        self.scene.on_reset();
    }

    /// Mark the perimeter as closed. The element layout is not checked.
    pub fn close_perimeter(&mut self) {
        self.state.is_closed = true;
    }

    /// Recompute `total_length` and `total_price` from the element list.
    pub fn recompute_totals(&mut self) {
        self.state.total_length = self.state.elements.iter().map(|e| e.width).sum();
        self.state.total_price = self.state.elements.iter().map(|e| e.price).sum();
    }

    fn current_material(&self) -> String {
        self.state
            .selected_system
            .as_ref()
            .map(|s| s.id.clone())
            .unwrap_or_else(|| DEFAULT_MATERIAL.to_string())
    }
}

/// Ids are `"{type}-{uuid v7}"`: time-ordered like a timestamp, but unique
/// even for elements placed within the same millisecond.
fn new_element_id(element_type: ElementType) -> String {
    format!("{}-{}", element_type.as_str(), uuid::Uuid::now_v7())
}

/// Updated dimensions must be finite and positive.
fn validate_dimension(field: &str, value: Option<f64>) -> Result<(), CoreError> {
    match value {
        Some(v) if !v.is_finite() || v <= 0.0 => Err(CoreError::Validation(format!(
            "{field} must be a positive number, got {v}"
        ))),
        _ => Ok(()),
    }
}

fn not_found(id: &str) -> CoreError {
    CoreError::NotFound {
        entity: ELEMENT_ENTITY,
        id: id.to_string(),
    }
}
