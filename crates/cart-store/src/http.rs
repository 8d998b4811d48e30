//! # Storefront API Client
//!
//! Stock and catalog lookups over HTTP.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET {base}/stock/{id}      → { "id": 1, "amount": 3 }                 │
//! │  GET {base}/products/{id}   → { "id": 1, "title": "...",                │
//! │                                 "price": 139.9, "image": "..." }       │
//! │                                                                         │
//! │  Failure contract (both endpoints):                                    │
//! │    connection error / timeout  → StoreError::Request                   │
//! │    non-2xx status              → StoreError::Status                    │
//! │    undecodable body            → StoreError::Response                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument, warn};
use url::Url;

use cart_core::{Product, ProductId, Stock};

use crate::error::{StoreError, StoreResult};
use crate::ports::{ProductCatalog, StockOracle};

/// Body of `GET stock/{id}`. The id echoed by the API is ignored.
#[derive(Debug, Deserialize)]
struct StockBody {
    amount: i64,
}

/// HTTP client for the storefront API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: Url,
}

impl HttpCatalog {
    /// Creates a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` if `base_url` does not parse, and `InvalidConfig`
    /// if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: normalize_base(base_url)?,
        })
    }

    /// Returns the base URL requests are joined onto.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GETs `path` relative to the base URL and decodes a JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> StoreResult<T> {
        let url = self.base_url.join(path)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| StoreError::Request {
                path: path.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(path = %path, status = status.as_u16(), "Storefront API returned an error status");
            return Err(StoreError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| StoreError::Response {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}

impl StockOracle for HttpCatalog {
    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn stock(&self, product_id: ProductId) -> StoreResult<Stock> {
        let body: StockBody = self.get_json(&format!("stock/{}", product_id)).await?;

        debug!(amount = body.amount, "Stock fetched");
        Ok(Stock::new(product_id, body.amount))
    }
}

impl ProductCatalog for HttpCatalog {
    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn product(&self, product_id: ProductId) -> StoreResult<Product> {
        let product: Product = self.get_json(&format!("products/{}", product_id)).await?;

        debug!(name = %product.name, "Product fetched");
        // Catalog data never carries a held amount.
        Ok(product.with_amount(0))
    }
}

/// Parses `base` and makes sure it ends in `/`.
///
/// Without the slash `Url::join` would replace the last path segment,
/// so `http://host/api` + `stock/1` would become `http://host/stock/1`.
fn normalize_base(base: &str) -> StoreResult<Url> {
    let mut url = Url::parse(base)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use cart_core::Money;
    use serde_json::json;

    async fn stock_handler(Path(id): Path<u64>) -> axum::response::Response {
        match id {
            1 => Json(json!({ "id": 1, "amount": 3 })).into_response(),
            98 => "not json".into_response(),
            _ => StatusCode::NOT_FOUND.into_response(),
        }
    }

    async fn product_handler(Path(id): Path<u64>) -> axum::response::Response {
        match id {
            1 => Json(json!({
                "id": 1,
                "title": "Tênis de Caminhada Leve Confortável",
                "price": 179.9,
                "image": "https://example.test/shoe-1.jpg"
            }))
            .into_response(),
            2 => Json(json!({
                "id": 2,
                "title": "Tênis VR Caminhada",
                "price": 139,
                "image": "https://example.test/shoe-2.jpg",
                "amount": 7
            }))
            .into_response(),
            _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }

    /// Serves a fake storefront API under `/api` on an ephemeral port.
    async fn spawn_api() -> String {
        let app = Router::new()
            .route("/api/stock/{id}", get(stock_handler))
            .route("/api/products/{id}", get(product_handler));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/api", addr)
    }

    async fn client() -> HttpCatalog {
        HttpCatalog::new(&spawn_api().await, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_normalize_base_appends_slash() {
        let url = normalize_base("http://localhost:3333/api").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3333/api/");
        assert_eq!(
            url.join("stock/1").unwrap().as_str(),
            "http://localhost:3333/api/stock/1"
        );

        let url = normalize_base("http://localhost:3333").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3333/");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpCatalog::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, StoreError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_stock_stamps_requested_id() {
        let api = client().await;
        let stock = api.stock(ProductId::new(1)).await.unwrap();

        assert_eq!(stock, Stock::new(ProductId::new(1), 3));
    }

    #[tokio::test]
    async fn test_stock_not_found_is_status_error() {
        let api = client().await;
        let err = api.stock(ProductId::new(5)).await.unwrap_err();

        assert!(matches!(err, StoreError::Status { status: 404, .. }));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_stock_malformed_body_is_response_error() {
        let api = client().await;
        let err = api.stock(ProductId::new(98)).await.unwrap_err();

        assert!(matches!(err, StoreError::Response { .. }));
    }

    #[tokio::test]
    async fn test_product_decodes_wire_names() {
        let api = client().await;
        let product = api.product(ProductId::new(1)).await.unwrap();

        assert_eq!(product.name, "Tênis de Caminhada Leve Confortável");
        assert_eq!(product.price, Money::from_cents(17_990));
        assert_eq!(product.image_url, "https://example.test/shoe-1.jpg");
        assert_eq!(product.amount, 0);
    }

    #[tokio::test]
    async fn test_product_ignores_amount_from_catalog() {
        let api = client().await;
        let product = api.product(ProductId::new(2)).await.unwrap();

        assert_eq!(product.amount, 0);
        assert_eq!(product.price, Money::from_cents(13_900));
    }

    #[tokio::test]
    async fn test_product_server_error() {
        let api = client().await;
        let err = api.product(ProductId::new(3)).await.unwrap_err();

        assert!(matches!(err, StoreError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_unreachable_api_is_request_error() {
        // Bind then drop to get a port with nothing listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = HttpCatalog::new(&format!("http://{}", addr), Duration::from_secs(2)).unwrap();
        let err = api.stock(ProductId::new(1)).await.unwrap_err();

        assert!(matches!(err, StoreError::Request { .. }));
    }
}
