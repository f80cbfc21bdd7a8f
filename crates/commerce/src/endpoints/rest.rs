//! Products through the REST Admin API
//!
//! | Operation | Request |
//! |-----------|---------|
//! | `create` | `POST products.json` |
//! | `get` | `GET products/{id}.json` |
//! | `update` | `PUT products/{id}.json` |
//! | `delete` | `DELETE products/{id}.json` |
//! | `list_all` | `GET products.json?limit=..&page_info=..` until the last page |
//! | `upload_images` | `POST products/{id}/images.json` |

use crate::error::{ApiError, ApiResult};
use crate::transport::{ApiRequest, PageToken, Transport};
use crate::types::{Product, ProductInput};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

/// REST products API
#[derive(Debug, Clone)]
pub struct RestProducts<T> {
    transport: T,
}

impl<T: Transport> RestProducts<T> {
    /// Create a products API over the given transport
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Create a product
    pub async fn create(&self, input: &ProductInput) -> ApiResult<Product> {
        let request = ApiRequest::post("products.json", json!({ "product": input }));
        self.fetch_product(request)
            .await
            .inspect(|product| info!(id = ?product.id, title = %product.title, "Product created"))
            .inspect_err(|e| error!(operation = "create", error = %e, "Failed to create product"))
    }

    /// Fetch a product by id
    pub async fn get(&self, id: &str) -> ApiResult<Product> {
        self.fetch_product(ApiRequest::get(format!("products/{id}.json")))
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
        let request = ApiRequest::put(format!("products/{id}.json"), json!({ "product": input }));
        self.fetch_product(request)
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
        self.transport
            .send(ApiRequest::delete(format!("products/{id}.json")))
            .await
            .map(|_| true)
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

    /// Fetch every product, `limit` per page, in the order pages arrive
    pub async fn list_all(&self, limit: u32) -> ApiResult<Vec<Product>> {
        self.collect_pages(limit)
            .await
            .inspect(|products| info!(count = products.len(), "Products retrieved"))
            .inspect_err(|e| {
                error!(
                    operation = "list_all",
                    error = %e,
                    "Failed to retrieve products"
                )
            })
    }

    async fn collect_pages(&self, limit: u32) -> ApiResult<Vec<Product>> {
        let mut products = Vec::new();
        let mut cursor: Option<PageToken> = None;
        let mut seen: HashSet<PageToken> = HashSet::new();
        let mut page = 0u32;

        loop {
            let mut request = ApiRequest::get("products.json").with_query("limit", limit);
            if let Some(token) = &cursor {
                request = request.with_query("page_info", token.as_str());
            }

            let response = self.transport.send(request).await?;
            page += 1;

            let batch: Vec<Product> = match response.body.get("products") {
                Some(list) => serde_json::from_value(list.clone())?,
                None => return Err(ApiError::unexpected("listing has no `products` array")),
            };
            debug!(page, received = batch.len(), "Fetched product page");
            products.extend(batch);

            match response.next_page {
                Some(next) if !seen.insert(next.clone()) => {
                    warn!(page, cursor = next.as_str(), "Listing revisited a cursor; stopping");
                    break;
                }
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(products)
    }

    /// Attach local image files to a product
    ///
    /// Returns the raw response body.
    pub async fn upload_images(&self, id: &str, paths: &[PathBuf]) -> ApiResult<Value> {
        self.post_images(id, paths)
            .await
            .inspect(|_| info!(product_id = %id, count = paths.len(), "Product images uploaded"))
            .inspect_err(|e| {
                error!(
                    operation = "upload_images",
                    product_id = %id,
                    error = %e,
                    "Failed to upload product images"
                )
            })
    }
}

impl<T: Transport> RestProducts<T> {
    async fn fetch_product(&self, request: ApiRequest) -> ApiResult<Product> {
        let response = self.transport.send(request).await?;
        product_from(response.body)
    }

    async fn post_images(&self, id: &str, paths: &[PathBuf]) -> ApiResult<Value> {
        let mut images = Vec::with_capacity(paths.len());
        for path in paths {
            let bytes = tokio::fs::read(path).await?;
            images.push(json!({ "attachment": STANDARD.encode(bytes) }));
        }

        let request = ApiRequest::post(
            format!("products/{id}/images.json"),
            json!({ "images": images }),
        );
        Ok(self.transport.send(request).await?.body)
    }
}

fn product_from(mut body: Value) -> ApiResult<Product> {
    match body.get_mut("product").map(Value::take) {
        Some(Value::Null) | None => Err(ApiError::unexpected("response has no `product` object")),
        Some(product) => Ok(serde_json::from_value(product)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockTransport;
    use crate::transport::{ApiResponse, Method};
    use crate::types::ProductId;

    #[tokio::test]
    async fn test_list_all_follows_page_tokens() {
        let mock = MockTransport::new(vec![
            Ok(ApiResponse::ok(json!({
                "products": [{ "id": 1, "title": "A" }, { "id": 2, "title": "B" }]
            }))
            .with_next_page(PageToken::new("p2"))),
            Ok(ApiResponse::ok(json!({ "products": [{ "id": 3, "title": "C" }] }))
                .with_next_page(PageToken::new("p3"))),
            Ok(ApiResponse::ok(json!({ "products": [{ "id": 4, "title": "D" }] }))),
        ]);

        let products = RestProducts::new(&mock).list_all(2).await.unwrap();

        let ids: Vec<_> = products.iter().filter_map(|p| p.id.clone()).collect();
        assert_eq!(
            ids,
            vec![
                ProductId::Numeric(1),
                ProductId::Numeric(2),
                ProductId::Numeric(3),
                ProductId::Numeric(4)
            ]
        );

        let requests = mock.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].query, vec![("limit".to_string(), "2".to_string())]);
        assert_eq!(
            requests[1].query,
            vec![
                ("limit".to_string(), "2".to_string()),
                ("page_info".to_string(), "p2".to_string())
            ]
        );
        assert_eq!(requests[2].query[1].1, "p3");
    }

    #[tokio::test]
    async fn test_list_all_single_empty_page() {
        let mock = MockTransport::new(vec![Ok(ApiResponse::ok(json!({ "products": [] })))]);
        let products = RestProducts::new(&mock).list_all(10).await.unwrap();
        assert!(products.is_empty());
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_list_all_stops_on_repeated_cursor() {
        let page = || {
            Ok(ApiResponse::ok(json!({ "products": [{ "id": 1, "title": "A" }] }))
                .with_next_page(PageToken::new("same")))
        };
        let mock = MockTransport::new(vec![page(), page(), page()]);

        let products = RestProducts::new(&mock).list_all(1).await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(mock.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_list_all_stops_on_cursor_cycle() {
        let page = |id: u64, next: &str| {
            Ok(ApiResponse::ok(json!({ "products": [{ "id": id, "title": "A" }] }))
                .with_next_page(PageToken::new(next)))
        };
        // a -> b -> a would loop forever without remembering every cursor
        let mock = MockTransport::new(vec![page(1, "a"), page(2, "b"), page(3, "a"), page(4, "b")]);

        let products = RestProducts::new(&mock).list_all(1).await.unwrap();

        assert_eq!(products.len(), 3);
        let requests = mock.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].query[1].1, "a");
        assert_eq!(requests[2].query[1].1, "b");
    }

    #[tokio::test]
    async fn test_list_all_propagates_failure() {
        let mock = MockTransport::new(vec![
            Ok(ApiResponse::ok(json!({ "products": [{ "id": 1, "title": "A" }] }))
                .with_next_page(PageToken::new("p2"))),
            Err(ApiError::api_response(503, "Service Unavailable")),
        ]);

        let err = RestProducts::new(&mock).list_all(1).await.unwrap_err();
        assert!(err.is_server_error());
    }

    #[tokio::test]
    async fn test_create_wraps_input() {
        let mock = MockTransport::new(vec![Ok(ApiResponse::ok(
            json!({ "product": { "id": 8074394992832u64, "title": "Lemons", "status": "draft" } }),
        ))]);

        let product = RestProducts::new(&mock)
            .create(&json!({ "title": "Lemons", "status": "draft" }))
            .await
            .unwrap();

        assert_eq!(product.id, Some(ProductId::Numeric(8074394992832)));
        assert_eq!(product.extra["status"], "draft");

        let request = &mock.requests()[0];
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "products.json");
        assert_eq!(
            request.body,
            Some(json!({ "product": { "title": "Lemons", "status": "draft" } }))
        );
    }

    #[tokio::test]
    async fn test_get_update_delete_paths() {
        let mock = MockTransport::new(vec![
            Ok(ApiResponse::ok(json!({ "product": { "id": 5, "title": "Old" } }))),
            Ok(ApiResponse::ok(json!({ "product": { "id": 5, "title": "New" } }))),
            Ok(ApiResponse::ok(json!({}))),
        ]);
        let api = RestProducts::new(&mock);

        assert_eq!(api.get("5").await.unwrap().title, "Old");
        assert_eq!(api.update("5", &json!({ "title": "New" })).await.unwrap().title, "New");
        assert!(api.delete("5").await.unwrap());

        let requests = mock.requests();
        assert_eq!(
            requests.iter().map(|r| (r.method, r.path.as_str())).collect::<Vec<_>>(),
            vec![
                (Method::Get, "products/5.json"),
                (Method::Put, "products/5.json"),
                (Method::Delete, "products/5.json"),
            ]
        );
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let not_found = ApiError::api_response(404, r#"{"errors":"Not Found"}"#);
        let mock = MockTransport::new(vec![Err(not_found)]);
        let err = RestProducts::new(&mock).get("999").await.unwrap_err();
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_upload_images_encodes_attachments() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("product-image-001.jpg");
        let second = dir.path().join("product-image-002.jpg");
        std::fs::write(&first, b"hello").unwrap();
        std::fs::write(&second, [0xff, 0xd8, 0xff]).unwrap();

        let body = json!({ "images": [{ "id": 1 }, { "id": 2 }] });
        let mock = MockTransport::new(vec![Ok(ApiResponse::ok(body))]);
        let body = RestProducts::new(&mock).upload_images("42", &[first, second]).await.unwrap();
        assert_eq!(body["images"].as_array().map(Vec::len), Some(2));

        let request = &mock.requests()[0];
        assert_eq!(request.path, "products/42/images.json");
        assert_eq!(
            request.body,
            Some(json!({ "images": [{ "attachment": "aGVsbG8=" }, { "attachment": "/9j/" }] }))
        );
    }

    #[tokio::test]
    async fn test_upload_missing_file_sends_nothing() {
        let mock = MockTransport::new(vec![]);
        let err = RestProducts::new(&mock)
            .upload_images("42", &[PathBuf::from("/nonexistent/product-image-001.jpg")])
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Io(_)));
        assert!(mock.requests().is_empty());
    }
}
