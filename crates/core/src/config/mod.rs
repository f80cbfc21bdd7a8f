//! Render job configuration
//!
//! TOML-backed job list plus the data model shared by the image pipeline.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
