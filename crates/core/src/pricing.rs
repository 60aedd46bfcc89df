//! Per-element list prices.
//!
//! Posts, gates and doors carry a flat price regardless of their edited
//! dimensions; sections are priced per meter of width.

use crate::element::ElementType;

/// Flat price of a single post.
pub const POST_PRICE: f64 = 50.0;
/// Flat price of a single gate.
pub const GATE_PRICE: f64 = 1200.0;
/// Flat price of a single door.
pub const DOOR_PRICE: f64 = 600.0;
/// Section price per meter of width.
pub const SECTION_PRICE_PER_METER: f64 = 100.0;

/// Price of an element of the given type and width.
pub fn element_price(element_type: ElementType, width: f64) -> f64 {
    match element_type {
        ElementType::Post => POST_PRICE,
        ElementType::Gate => GATE_PRICE,
        ElementType::Door => DOOR_PRICE,
        ElementType::Section => width * SECTION_PRICE_PER_METER,
    }
}
