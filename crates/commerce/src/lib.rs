//! Shopify product client for Artprint tools
//!
//! Products can be managed through either the REST Admin API or the GraphQL
//! Admin API. Both adapters sit on top of a [`Transport`], so the wire client
//! can be swapped for a fake in tests.
//!
//! # Example
//!
//! ```rust,no_run
//! use artprint_commerce::{RestProducts, ShopClient, ShopConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ShopClient::with_config(ShopConfig::from_env()?)?;
//!     let products = RestProducts::new(client).list_all(50).await?;
//!     println!("{} products", products.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_support;

pub use client::ShopClient;
pub use config::ShopConfig;
pub use endpoints::{GraphqlProducts, ProductsApi, RestProducts, TransportKind};
pub use error::{ApiError, ApiResult};
pub use transport::{ApiRequest, ApiResponse, Method, PageToken, Transport};
pub use types::{
    Metafield, Product, ProductId, ProductImage, ProductInput, ProductOption, UserError,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::ShopClient;
    pub use crate::config::ShopConfig;
    pub use crate::endpoints::{GraphqlProducts, ProductsApi, RestProducts, TransportKind};
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::transport::Transport;
    pub use crate::types::{Product, ProductInput};
}
