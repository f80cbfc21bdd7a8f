//! CLI command implementations

pub mod products;
pub mod render;
pub mod shadow;
