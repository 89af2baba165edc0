use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use stockroom_core::ProductId;
use stockroom_inventory::{Inventory, InventoryDraft};
use stockroom_products::{Category, Product, ProductDraft};

use super::{ClientError, DataServiceClient};

/// HTTP/JSON client for the data tier's `/data` routes.
#[derive(Debug, Clone)]
pub struct HttpDataServiceClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpDataServiceClient {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `base_url` + `/data/` + segments, each segment percent-encoded.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Network(format!("base url cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .push("data")
            .extend(segments);
        Ok(url)
    }

    async fn send_json<B, T>(&self, method: Method, url: Url, body: Option<&B>) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let mut req = self.http.request(method, url);
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }

        resp.json().await.map_err(|e| ClientError::Parse(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        let url = self.url(segments)?;
        self.send_json::<(), T>(Method::GET, url, None).await
    }

    async fn post<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ClientError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(segments)?;
        self.send_json(Method::POST, url, Some(body)).await
    }
}

#[async_trait]
impl DataServiceClient for HttpDataServiceClient {
    async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        self.get(&["productos"]).await
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, ClientError> {
        self.get(&["productos", &id.to_string()]).await
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ClientError> {
        self.post(&["productos"], draft).await
    }

    async fn products_by_category(&self, category_name: &str) -> Result<Vec<Product>, ClientError> {
        self.get(&["productos", "categoria", category_name]).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        self.get(&["categorias"]).await
    }

    async fn create_inventory(&self, draft: &InventoryDraft) -> Result<Inventory, ClientError> {
        self.post(&["inventario"], draft).await
    }

    async fn low_stock(&self) -> Result<Vec<Inventory>, ClientError> {
        self.get(&["inventario", "stock-bajo"]).await
    }

    async fn list_inventory(&self) -> Result<Vec<Inventory>, ClientError> {
        self.get(&["inventario"]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> HttpDataServiceClient {
        HttpDataServiceClient::new(Url::parse(base).unwrap())
    }

    #[test]
    fn builds_data_routes_under_the_base_url() {
        let url = client("http://localhost:8081").url(&["inventario", "stock-bajo"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8081/data/inventario/stock-bajo");
    }

    #[test]
    fn tolerates_a_trailing_slash_and_a_path_prefix() {
        let url = client("http://data:8081/internal/").url(&["productos"]).unwrap();
        assert_eq!(url.as_str(), "http://data:8081/internal/data/productos");
    }

    #[test]
    fn encodes_category_names() {
        let url = client("http://localhost:8081")
            .url(&["productos", "categoria", "Home & Garden"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8081/data/productos/categoria/Home%20&%20Garden"
        );
    }
}
