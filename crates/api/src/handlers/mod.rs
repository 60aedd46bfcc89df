pub mod catalog;
pub mod export;
pub mod quote;
pub mod texture;
pub mod upload;
