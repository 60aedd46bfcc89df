//! Fence configurator domain logic.
//!
//! Pure, synchronous building blocks shared by the HTTP server and any
//! client embedding: the element model and pricing rule, the project state
//! manager, quote and export views, the product catalog and texture/upload
//! file helpers.

pub mod catalog;
pub mod element;
pub mod error;
pub mod export;
pub mod pricing;
pub mod project;
pub mod quote;
pub mod texture;
pub mod types;
pub mod upload;
