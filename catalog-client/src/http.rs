// catalog-client/src/http.rs
// HTTP client for the catalog REST API

use async_trait::async_trait;
use http::StatusCode;
use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use shared::error::ApiErrorBody;
use shared::{Brand, BrandList, Category, CategoryList, ProductPage, ProductQuery};

use crate::{ClientConfig, ClientError, ClientResult};

/// Catalog listing endpoints consumed by the catalog view
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /api/products`
    async fn list_products(&self, query: &ProductQuery) -> ClientResult<ProductPage>;
    /// `GET /api/categories`
    async fn list_categories(&self, limit: u32) -> ClientResult<Vec<Category>>;
    /// `GET /api/brands`
    async fn list_brands(&self, limit: u32) -> ClientResult<Vec<Brand>>;
}

#[derive(Serialize)]
struct LimitQuery {
    limit: u32,
}

/// Network catalog client
#[derive(Debug, Clone)]
pub struct NetworkCatalogClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkCatalogClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Make a GET request with a serialized query string
    pub async fn get<T, Q>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut request = self.client.get(&url).query(query);
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            let body = ApiErrorBody::from_response_text(status, &text);
            return Err(match status {
                StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
                StatusCode::FORBIDDEN => ClientError::Forbidden(body.full_message()),
                StatusCode::NOT_FOUND => ClientError::NotFound(body.full_message()),
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    ClientError::Validation(body.full_message())
                }
                _ => ClientError::Api {
                    status: status.as_u16(),
                    message: body.full_message(),
                },
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            ClientError::InvalidResponse(format!("{} (status {})", e, status.as_u16()))
        })
    }
}

#[async_trait]
impl CatalogApi for NetworkCatalogClient {
    async fn list_products(&self, query: &ProductQuery) -> ClientResult<ProductPage> {
        self.get("/api/products", query).await
    }

    async fn list_categories(&self, limit: u32) -> ClientResult<Vec<Category>> {
        let list: CategoryList = self.get("/api/categories", &LimitQuery { limit }).await?;
        Ok(list.categories)
    }

    async fn list_brands(&self, limit: u32) -> ClientResult<Vec<Brand>> {
        let list: BrandList = self.get("/api/brands", &LimitQuery { limit }).await?;
        Ok(list.brands)
    }
}
