//! ProductCatalog implementation over HTTP

use async_trait::async_trait;
use prodsearch::{CatalogError, Product, ProductCatalog, ProductId, ProductSummary};
use tracing::debug;

use crate::client::CatalogClient;
use crate::config::HttpCatalogConfig;

/// HTTP product catalog implementing `ProductCatalog`
pub struct HttpCatalog {
    client: CatalogClient,
}

impl HttpCatalog {
    /// Create a catalog for the configured endpoint
    pub fn new(config: HttpCatalogConfig) -> Result<Self, CatalogError> {
        let client = CatalogClient::new(&config)?;
        Ok(Self { client })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

#[async_trait]
impl ProductCatalog for HttpCatalog {
    async fn search(&self, query: &str) -> Result<Vec<ProductSummary>, CatalogError> {
        let items: Vec<ProductSummary> = self
            .client
            .get_json("/products", &[("search", query)])
            .await?;

        debug!(query = %query, count = items.len(), "Catalog search returned");
        Ok(items)
    }

    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.client.get_json(&format!("/products/{id}"), &[]).await
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn catalog_for(server: &MockServer) -> HttpCatalog {
        HttpCatalog::new(HttpCatalogConfig::new(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_search_sends_query_parameter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .and(query_param("search", "usb c"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 4, "name": "USB-C Hub", "price": 35, "category": "tech"},
                {"id": 9, "name": "USB-C Cable", "price": 9}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let items = catalog_for(&server).search("usb c").await.unwrap();

        assert_eq!(
            items,
            vec![
                ProductSummary::new(4, "USB-C Hub"),
                ProductSummary::new(9, "USB-C Cable"),
            ]
        );
    }

    #[tokio::test]
    async fn test_requests_carry_user_agent() {
        let server = MockServer::start().await;
        let agent = HttpCatalogConfig::default().user_agent;
        Mock::given(method("GET"))
            .and(path("/products"))
            .and(header("user-agent", agent.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        catalog_for(&server).search("lamp").await.unwrap();
    }

    #[tokio::test]
    async fn test_search_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let items = catalog_for(&server).search("nothing").await.unwrap();

        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_product_detail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1,
                "name": "Laptop",
                "price": 999,
                "description": "...",
                "image": null
            })))
            .mount(&server)
            .await;

        let product = catalog_for(&server)
            .product(ProductId::new(1))
            .await
            .unwrap();

        assert_eq!(product, Product::new(1, "Laptop", 999.0).with_description("..."));
    }

    #[tokio::test]
    async fn test_error_status_maps_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/77"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such product"))
            .mount(&server)
            .await;

        let err = catalog_for(&server)
            .product(ProductId::new(77))
            .await
            .unwrap_err();

        match err {
            CatalogError::Status { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "no such product");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_decode() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = catalog_for(&server).search("lap").await.unwrap_err();

        assert!(matches!(err, CatalogError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_maps_to_transport() {
        let config = HttpCatalogConfig::new("http://127.0.0.1:1").with_timeout(Duration::from_secs(1));
        let catalog = HttpCatalog::new(config).unwrap();

        let err = catalog.search("lap").await.unwrap_err();

        assert!(matches!(err, CatalogError::Transport(_)));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let catalog = HttpCatalog::new(HttpCatalogConfig::new("http://localhost:9000/api/")).unwrap();

        assert_eq!(catalog.base_url(), "http://localhost:9000/api");
    }
}
