//! Procedure client for the DashCart server.
//!
//! Every call is a `POST /api/orpc/<router>.<procedure>` with a JSON body.
//! The session cookie is attached while it is live, the way a browser would
//! send it.

use dashcart_core::models::{
    AddCartInput, Category, LoginInput, LoginResponse, Product, ProductForm, ProductIdInput,
    ProductListQuery, ProductPage, ProductPatch, UpdateProductInput, User, UserCarts,
    UserCartsInput,
};
use dashcart_core::stores::{SESSION_COOKIE_NAME, SessionCookie};
use dashcart_core::{ProductId, UserId};
use reqwest::header::COOKIE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::instrument;
use url::Url;

use crate::error::{ClientError, Result};

/// Procedure client.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    cookie: Option<String>,
}

impl ApiClient {
    /// Create a client for the server at `server_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(server_url: &Url) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("dashcart-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: server_url.as_str().trim_end_matches('/').to_owned(),
            cookie: None,
        })
    }

    /// Send `session` as the `auth_token` cookie with subsequent calls, or
    /// stop sending one.
    pub fn set_session_cookie(&mut self, session: Option<&SessionCookie>) {
        self.cookie = session
            .map(|c| cookie::Cookie::new(SESSION_COOKIE_NAME, c.value.clone()).to_string());
    }

    /// Call `procedure` with `input` and decode its output.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with the server's error message for a
    /// non-success status, or `ClientError::Http` on transport and decode
    /// failures.
    #[instrument(skip(self, input))]
    pub async fn call<I, O>(&self, procedure: &str, input: &I) -> Result<O>
    where
        I: Serialize + ?Sized + Sync,
        O: DeserializeOwned,
    {
        let mut request = self
            .client
            .post(format!("{}/api/orpc/{procedure}", self.base_url))
            .json(input);
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .map_or_else(|| status.to_string(), str::to_owned);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// `auth.login`
    ///
    /// # Errors
    ///
    /// Returns error if the call fails.
    pub async fn login(&self, input: &LoginInput) -> Result<LoginResponse> {
        self.call("auth.login", input).await
    }

    /// `auth.getCurrentUser`: `None` when the session is missing or rejected.
    ///
    /// # Errors
    ///
    /// Returns error if the server cannot be reached.
    pub async fn current_user(&self) -> Result<Option<User>> {
        self.call("auth.getCurrentUser", &json!({})).await
    }

    /// `products.getProducts`
    ///
    /// # Errors
    ///
    /// Returns error if the call fails.
    pub async fn products(&self, query: &ProductListQuery) -> Result<ProductPage> {
        self.call("products.getProducts", query).await
    }

    /// `products.getProduct`
    ///
    /// # Errors
    ///
    /// Returns error if the call fails.
    pub async fn product(&self, id: ProductId) -> Result<Product> {
        self.call("products.getProduct", &ProductIdInput { id }).await
    }

    /// `products.getCategories`
    ///
    /// # Errors
    ///
    /// Returns error if the call fails.
    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.call("products.getCategories", &json!({})).await
    }

    /// `products.addProduct`
    ///
    /// # Errors
    ///
    /// Returns error if the call fails.
    pub async fn add_product(&self, form: &ProductForm) -> Result<Product> {
        self.call("products.addProduct", form).await
    }

    /// `products.updateProduct`
    ///
    /// # Errors
    ///
    /// Returns error if the call fails.
    pub async fn update_product(&self, id: ProductId, data: ProductPatch) -> Result<Product> {
        self.call("products.updateProduct", &UpdateProductInput { id, data })
            .await
    }

    /// `products.deleteProduct`
    ///
    /// # Errors
    ///
    /// Returns error if the call fails.
    pub async fn delete_product(&self, id: ProductId) -> Result<Value> {
        self.call("products.deleteProduct", &ProductIdInput { id })
            .await
    }

    /// `carts.getUserCarts`
    ///
    /// # Errors
    ///
    /// Returns error if the call fails.
    pub async fn user_carts(&self, user_id: UserId) -> Result<UserCarts> {
        self.call("carts.getUserCarts", &UserCartsInput { user_id })
            .await
    }

    /// `carts.addCart`
    ///
    /// # Errors
    ///
    /// Returns error if the call fails.
    pub async fn add_cart(&self, input: &AddCartInput) -> Result<Value> {
        self.call("carts.addCart", input).await
    }
}
