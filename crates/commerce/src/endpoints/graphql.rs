//! Products through the GraphQL Admin API
//!
//! Every operation posts a fixed document to `graphql.json`. Numeric ids are
//! turned into global ids and `edges { node }` connections in the result are
//! flattened into plain lists.

use super::queries::{CREATE_PRODUCT, DELETE_PRODUCT, GET_PRODUCT, UPDATE_PRODUCT};
use crate::error::{ApiError, ApiResult};
use crate::transport::{ApiRequest, Transport};
use crate::types::{Product, ProductInput, UserError};
use serde_json::{json, Value};
use tracing::{error, info};

const GRAPHQL_PATH: &str = "graphql.json";

/// Global id for a product, e.g. `gid://shopify/Product/42`.
///
/// Ids that are already global are returned unchanged.
pub fn product_gid(id: &str) -> String {
    if id.starts_with("gid://") {
        id.to_string()
    } else {
        format!("gid://shopify/Product/{id}")
    }
}

/// GraphQL products API
#[derive(Debug, Clone)]
pub struct GraphqlProducts<T> {
    transport: T,
}

impl<T: Transport> GraphqlProducts<T> {
    /// Create a products API over the given transport
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Create a product
    pub async fn create(&self, input: &ProductInput) -> ApiResult<Product> {
        self.mutate_product(CREATE_PRODUCT, "productCreate", json!({ "input": input }))
            .await
            .inspect(|product| info!(id = ?product.id, title = %product.title, "Product created"))
            .inspect_err(|e| error!(operation = "create", error = %e, "Failed to create product"))
    }

    /// Fetch a product by id
    pub async fn get(&self, id: &str) -> ApiResult<Product> {
        self.fetch_product(id)
            .await
            .inspect_err(|e| {
                error!(
                    operation = "get",
                    product_id = %id,
                    error = %e,
                    "Failed to retrieve product"
                )
            })
    }

    /// Update a product
    pub async fn update(&self, id: &str, input: &ProductInput) -> ApiResult<Product> {
        let variables = json!({ "id": product_gid(id), "input": input });
        self.mutate_product(UPDATE_PRODUCT, "productUpdate", variables)
            .await
            .inspect(|_| info!(product_id = %id, "Product updated"))
            .inspect_err(|e| {
                error!(
                    operation = "update",
                    product_id = %id,
                    error = %e,
                    "Failed to update product"
                )
            })
    }

    /// Delete a product
    pub async fn delete(&self, id: &str) -> ApiResult<bool> {
        self.delete_product(id)
            .await
            .inspect(|_| info!(product_id = %id, "Product deleted"))
            .inspect_err(|e| {
                error!(
                    operation = "delete",
                    product_id = %id,
                    error = %e,
                    "Failed to delete product"
                )
            })
    }

    /// Run a document and return its `data` object.
    async fn execute(&self, document: &str, variables: Value) -> ApiResult<Value> {
        let request = ApiRequest::post(
            GRAPHQL_PATH,
            json!({ "query": document, "variables": variables }),
        );
        let mut body = self.transport.send(request).await?.body;

        if let Some(message) = top_level_errors(&body) {
            return Err(ApiError::GraphQl(message));
        }

        match body.get_mut("data").map(Value::take) {
            Some(Value::Null) | None => Err(ApiError::unexpected("GraphQL response has no `data`")),
            Some(data) => Ok(data),
        }
    }

    async fn fetch_product(&self, id: &str) -> ApiResult<Product> {
        let mut data = self.execute(GET_PRODUCT, json!({ "id": product_gid(id) })).await?;
        match data.get_mut("product").map(Value::take) {
            Some(Value::Null) | None => Err(ApiError::NotFound(id.to_string())),
            Some(product) => into_product(product),
        }
    }

    async fn mutate_product(
        &self,
        document: &str,
        field: &str,
        variables: Value,
    ) -> ApiResult<Product> {
        let mut payload = self.mutation_payload(document, field, variables).await?;
        match payload.get_mut("product").map(Value::take) {
            Some(Value::Null) | None => {
                Err(ApiError::unexpected(format!("`{field}` returned no product")))
            }
            Some(product) => into_product(product),
        }
    }

    async fn delete_product(&self, id: &str) -> ApiResult<bool> {
        let payload = self
            .mutation_payload(DELETE_PRODUCT, "productDelete", json!({ "id": product_gid(id) }))
            .await?;
        match payload.get("deletedProductId") {
            Some(Value::String(_)) => Ok(true),
            _ => Err(ApiError::NotFound(id.to_string())),
        }
    }

    /// Run a mutation and return its payload, failing on `userErrors`.
    async fn mutation_payload(
        &self,
        document: &str,
        field: &str,
        variables: Value,
    ) -> ApiResult<Value> {
        let mut data = self.execute(document, variables).await?;
        let payload = match data.get_mut(field).map(Value::take) {
            Some(Value::Null) | None => {
                return Err(ApiError::unexpected(format!("response has no `{field}`")));
            }
            Some(payload) => payload,
        };

        let user_errors: Vec<UserError> = match payload.get("userErrors") {
            Some(errors) if !errors.is_null() => serde_json::from_value(errors.clone())?,
            _ => Vec::new(),
        };
        if !user_errors.is_empty() {
            return Err(ApiError::UserErrors(user_errors));
        }

        Ok(payload)
    }
}

/// Joined messages of a non-empty top-level `errors` field.
fn top_level_errors(body: &Value) -> Option<String> {
    match body.get("errors")? {
        Value::Array(errors) if !errors.is_empty() => Some(
            errors
                .iter()
                .map(|e| {
                    e.get("message")
                        .and_then(Value::as_str)
                        .map_or_else(|| e.to_string(), str::to_string)
                })
                .collect::<Vec<_>>()
                .join("; "),
        ),
        Value::String(message) => Some(message.clone()),
        _ => None,
    }
}

fn into_product(mut product: Value) -> ApiResult<Product> {
    flatten_connections(&mut product);
    Ok(serde_json::from_value(product)?)
}

/// Replace every `{ "edges": [{ "node": .. }] }` object with the list of nodes.
pub fn flatten_connections(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::Array(edges)) = map.get_mut("edges") {
                let nodes = edges
                    .iter_mut()
                    .map(|edge| edge.get_mut("node").map(Value::take).unwrap_or(Value::Null))
                    .collect();
                *value = Value::Array(nodes);
                flatten_connections(value);
                return;
            }
            map.values_mut().for_each(flatten_connections);
        }
        Value::Array(items) => items.iter_mut().for_each(flatten_connections),
        _ => {}
    }
}
