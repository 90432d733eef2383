//! DummyJSON catalog API client.
//!
//! Thin wrapper over the remote REST endpoints the façade forwards to. Every
//! call returns the response body as untyped JSON so procedures can pass it
//! through unchanged.
//!
//! # Endpoints
//!
//! | Method | Path | Used by |
//! |--------|------|---------|
//! | POST | `/auth/login` | `auth.login` |
//! | GET | `/auth/me` | `auth.getCurrentUser` |
//! | GET | `/products`, `/products/search`, `/products/category/{slug}` | `products.getProducts` |
//! | GET | `/products/{id}` | `products.getProduct` |
//! | GET | `/products/categories` | `products.getCategories` |
//! | POST | `/products/add` | `products.addProduct` |
//! | PUT | `/products/{id}` | `products.updateProduct` |
//! | DELETE | `/products/{id}` | `products.deleteProduct` |
//! | GET | `/carts/user/{id}` | `carts.getUserCarts` |
//! | POST | `/carts/add` | `carts.addCart` |

use dashcart_core::models::{AddCartInput, LoginInput, ProductForm, ProductListQuery, ProductPatch};
use dashcart_core::{ProductId, UserId};
use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use thiserror::Error;
use tracing::instrument;
use url::Url;

/// Lifetime requested for access tokens issued at login, in minutes.
pub const TOKEN_EXPIRES_IN_MINS: u32 = 60;

/// Errors that can occur when calling the catalog API.
#[derive(Debug, Error)]
pub enum DummyJsonError {
    /// Request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Catalog API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct DummyJsonClient {
    client: reqwest::Client,
    base_url: String,
}

impl DummyJsonClient {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: &Url) -> Result<Self, DummyJsonError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("dashcart/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a request and decode the JSON body of a success response.
    async fn send(&self, request: RequestBuilder) -> Result<Value, DummyJsonError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DummyJsonError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// Exchange credentials for a profile plus access token.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the credentials are rejected.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: &LoginInput) -> Result<Value, DummyJsonError> {
        let body = serde_json::json!({
            "username": input.username,
            "password": input.password,
            "expiresInMins": TOKEN_EXPIRES_IN_MINS,
        });
        self.send(self.client.post(self.endpoint("/auth/login")).json(&body))
            .await
    }

    /// Fetch the profile that owns `token`.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the token is rejected.
    #[instrument(skip_all)]
    pub async fn current_user(&self, token: &SecretString) -> Result<Value, DummyJsonError> {
        self.send(
            self.client
                .get(self.endpoint("/auth/me"))
                .bearer_auth(token.expose_secret()),
        )
        .await
    }

    /// Fetch one page of products, by search text, by category, or unfiltered.
    ///
    /// Price bounds in `query` are not sent; the remote API has no such
    /// filter.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: &ProductListQuery) -> Result<Value, DummyJsonError> {
        self.send(self.client.get(self.product_list_url(query))).await
    }

    fn product_list_url(&self, query: &ProductListQuery) -> String {
        let search = query.search.as_deref().filter(|s| !s.is_empty());
        let category = query.category.as_deref().filter(|c| !c.is_empty());

        let mut url = match (search, category) {
            (Some(q), _) => self.endpoint(&format!("/products/search?q={}", urlencoding::encode(q))),
            (None, Some(c)) => {
                self.endpoint(&format!("/products/category/{}", urlencoding::encode(c)))
            }
            (None, None) => self.endpoint("/products"),
        };

        let separator = if url.contains('?') { '&' } else { '?' };
        url.push_str(&format!(
            "{separator}limit={}&skip={}",
            query.limit, query.skip
        ));
        url
    }

    /// Fetch a single product.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the product does not exist.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Value, DummyJsonError> {
        self.send(self.client.get(self.endpoint(&format!("/products/{id}"))))
            .await
    }

    /// Fetch all product categories.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Value, DummyJsonError> {
        self.send(self.client.get(self.endpoint("/products/categories")))
            .await
    }

    /// Create a product. The remote API simulates the write.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self, form), fields(title = %form.title))]
    pub async fn add_product(&self, form: &ProductForm) -> Result<Value, DummyJsonError> {
        self.send(self.client.post(self.endpoint("/products/add")).json(form))
            .await
    }

    /// Apply a partial update to a product.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the product does not exist.
    #[instrument(skip(self, patch))]
    pub async fn update_product(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Value, DummyJsonError> {
        self.send(
            self.client
                .put(self.endpoint(&format!("/products/{id}")))
                .json(patch),
        )
        .await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the product does not exist.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<Value, DummyJsonError> {
        self.send(self.client.delete(self.endpoint(&format!("/products/{id}"))))
            .await
    }

    /// Fetch the remote carts of a user.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn user_carts(&self, user_id: UserId) -> Result<Value, DummyJsonError> {
        self.send(
            self.client
                .get(self.endpoint(&format!("/carts/user/{user_id}"))),
        )
        .await
    }

    /// Create a remote cart.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self, input), fields(user_id = %input.user_id))]
    pub async fn add_cart(&self, input: &AddCartInput) -> Result<Value, DummyJsonError> {
        self.send(self.client.post(self.endpoint("/carts/add")).json(input))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client() -> DummyJsonClient {
        DummyJsonClient::new(&Url::parse("https://dummyjson.com").unwrap()).unwrap()
    }

    #[test]
    fn test_product_list_url_plain() {
        let url = client().product_list_url(&ProductListQuery::default());
        assert_eq!(url, "https://dummyjson.com/products?limit=10&skip=0");
    }

    #[test]
    fn test_product_list_url_search_wins_over_category() {
        let query = ProductListQuery {
            search: Some("red lipstick".to_string()),
            category: Some("beauty".to_string()),
            skip: 20,
            ..ProductListQuery::default()
        };
        let url = client().product_list_url(&query);
        assert_eq!(
            url,
            "https://dummyjson.com/products/search?q=red%20lipstick&limit=10&skip=20"
        );
    }

    #[test]
    fn test_product_list_url_category() {
        let query = ProductListQuery {
            category: Some("home-decoration".to_string()),
            limit: 5,
            ..ProductListQuery::default()
        };
        let url = client().product_list_url(&query);
        assert_eq!(
            url,
            "https://dummyjson.com/products/category/home-decoration?limit=5&skip=0"
        );
    }

    #[test]
    fn test_empty_search_is_ignored() {
        let query = ProductListQuery {
            search: Some(String::new()),
            ..ProductListQuery::default()
        };
        assert_eq!(
            client().product_list_url(&query),
            "https://dummyjson.com/products?limit=10&skip=0"
        );
    }
}
