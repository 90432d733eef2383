//! Dashboard actions.
//!
//! Each method is one user action: it validates form input locally, calls
//! the server where needed and applies the result to the persisted stores.

use std::sync::Arc;

use chrono::Utc;
use dashcart_core::models::{
    AddCartInput, Category, CheckoutDetails, LoginInput, LoginResponse, Product, ProductForm,
    ProductPage, ProductPatch, User, UserCarts,
};
use dashcart_core::stores::{
    AuthState, CartLine, CartState, CheckoutError, Order, UiFilters, place_order,
};
use dashcart_core::{OrderId, ProductId};
use serde_json::Value;
use tracing::instrument;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::store::{FileStorage, Storage, Stores};

/// Client session: server connection plus persisted stores.
pub struct Dashboard {
    api: ApiClient,
    stores: Stores,
}

impl Dashboard {
    /// Open the stores in `config.data_dir` and connect to `config.server_url`.
    ///
    /// # Errors
    ///
    /// Returns error if a store cannot be loaded or the HTTP client fails to
    /// build.
    pub fn open(config: &ClientConfig) -> Result<Self> {
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(&config.data_dir));
        Ok(Self::new(
            ApiClient::new(&config.server_url)?,
            Stores::open(storage)?,
        ))
    }

    /// Combine a client and stores. The stored session cookie is sent while
    /// it has not expired.
    #[must_use]
    pub fn new(mut api: ApiClient, stores: Stores) -> Self {
        let now = Utc::now();
        let live_cookie = stores.cookie.get().as_ref().filter(|c| c.is_live(now));
        api.set_session_cookie(live_cookie);
        Self { api, stores }
    }

    #[must_use]
    pub const fn stores(&self) -> &Stores {
        &self.stores
    }

    /// The locally stored session user.
    #[must_use]
    pub fn session_user(&self) -> Option<&User> {
        self.stores.auth.get().user.as_ref()
    }

    /// Log in and store the session and its cookie.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` for empty fields, or the server's
    /// error (`Invalid credentials`) if the login is rejected.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, username: &str, password: &str) -> Result<User> {
        let input = LoginInput {
            username: username.to_owned(),
            password: password.to_owned(),
        };
        input.validate()?;

        let LoginResponse {
            user, access_token, ..
        } = self.api.login(&input).await?;

        let profile = user.clone();
        let cookie = self
            .stores
            .auth
            .update(|auth| auth.set_auth(profile, access_token, Utc::now()))?;
        self.stores.cookie.set(Some(cookie))?;
        self.api.set_session_cookie(self.stores.cookie.get().as_ref());

        tracing::info!(user_id = %user.id, "Logged in");
        Ok(user)
    }

    /// Clear the session and its cookie.
    ///
    /// # Errors
    ///
    /// Returns error if the stores cannot be written.
    pub fn logout(&mut self) -> Result<()> {
        self.stores.auth.update(AuthState::logout)?;
        self.stores.cookie.set(None)?;
        self.api.set_session_cookie(None);
        Ok(())
    }

    /// Profile the server resolves from the session cookie.
    ///
    /// # Errors
    ///
    /// Returns error if the server cannot be reached.
    pub async fn current_user(&self) -> Result<Option<User>> {
        self.api.current_user().await
    }

    /// One page of products matching `filters`.
    ///
    /// # Errors
    ///
    /// Returns error if the call fails.
    pub async fn products(
        &self,
        filters: &UiFilters,
        page: u32,
        page_size: u32,
    ) -> Result<ProductPage> {
        self.api.products(&filters.to_query(page, page_size)).await
    }

    /// # Errors
    ///
    /// Returns error if the call fails.
    pub async fn product(&self, id: ProductId) -> Result<Product> {
        self.api.product(id).await
    }

    /// # Errors
    ///
    /// Returns error if the call fails.
    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.api.categories().await
    }

    /// Create a product after checking the form.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` without calling the server if the
    /// form is invalid.
    pub async fn add_product(&self, form: &ProductForm) -> Result<Product> {
        form.validate()?;
        self.api.add_product(form).await
    }

    /// Update a product after checking the present fields.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` without calling the server if a
    /// field is invalid.
    pub async fn update_product(&self, id: ProductId, patch: ProductPatch) -> Result<Product> {
        patch.validate()?;
        self.api.update_product(id, patch).await
    }

    /// # Errors
    ///
    /// Returns error if the call fails.
    pub async fn delete_product(&self, id: ProductId) -> Result<Value> {
        self.api.delete_product(id).await
    }

    #[must_use]
    pub fn cart(&self) -> &CartState {
        self.stores.cart.get()
    }

    /// Fetch the product and add `quantity` units of it to the cart.
    ///
    /// Returns the resulting line, or `None` if the product is out of stock.
    ///
    /// # Errors
    ///
    /// Returns error if the product cannot be fetched or the cart cannot be
    /// written.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&mut self, id: ProductId, quantity: u32) -> Result<Option<CartLine>> {
        let product = self.api.product(id).await?;
        let line = self.stores.cart.update(|cart| {
            cart.add(CartLine::from_product(&product, quantity));
            cart.get(id).cloned()
        })?;
        Ok(line)
    }

    /// Set the quantity of a cart line; zero or less removes it.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the product is not in the cart.
    pub fn set_cart_quantity(&mut self, id: ProductId, quantity: i64) -> Result<()> {
        if self.cart().get(id).is_none() {
            return Err(ClientError::NotFound(format!("Cart line {id}")));
        }
        self.stores
            .cart
            .update(|cart| cart.update_quantity(id, quantity))?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the product is not in the cart.
    pub fn remove_from_cart(&mut self, id: ProductId) -> Result<()> {
        if self.stores.cart.update(|cart| cart.remove(id))? {
            Ok(())
        } else {
            Err(ClientError::NotFound(format!("Cart line {id}")))
        }
    }

    /// # Errors
    ///
    /// Returns error if the cart cannot be written.
    pub fn clear_cart(&mut self) -> Result<()> {
        self.stores.cart.update(CartState::clear)?;
        Ok(())
    }

    /// Place an order for the whole cart.
    ///
    /// With a session user the cart is first recorded remotely; if that
    /// fails nothing changes locally. The new order is `processing`, its
    /// total is the cart total, and the cart is emptied. The emptied cart is
    /// written before the order history, so a failed write cannot leave a
    /// placed order next to a cart that would order the same items again.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` for bad details,
    /// `CheckoutError::EmptyCart` for an empty cart, or the remote cart error.
    #[instrument(skip_all)]
    pub async fn checkout(&mut self, details: &CheckoutDetails) -> Result<Order> {
        details.validate()?;
        if self.cart().is_empty() {
            return Err(CheckoutError::EmptyCart.into());
        }

        if let Some(user) = self.session_user() {
            let input = AddCartInput {
                user_id: user.id,
                products: self.cart().remote_lines(),
            };
            self.api.add_cart(&input).await?;
        }

        let mut cart = self.cart().clone();
        let mut orders = self.stores.orders.get().clone();
        let order = place_order(
            &mut cart,
            &mut orders,
            details.shipping_address(),
            Utc::now(),
        )?;
        self.stores.cart.set(cart)?;
        self.stores.orders.set(orders)?;

        tracing::info!(order_id = %order.id, total = %order.total, "Order placed");
        Ok(order)
    }

    /// Placed orders, newest first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        self.stores.orders.get().orders()
    }

    /// Delete an order from the history.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` for an unknown id.
    pub fn cancel_order(&mut self, id: &OrderId) -> Result<()> {
        if self.stores.orders.update(|orders| orders.cancel(id))? {
            tracing::info!(order_id = %id, "Order cancelled");
            Ok(())
        } else {
            Err(ClientError::NotFound(format!("Order {id}")))
        }
    }

    /// Carts the remote service holds for the session user.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotLoggedIn` without a session user.
    pub async fn remote_carts(&self) -> Result<UserCarts> {
        let user = self.session_user().ok_or(ClientError::NotLoggedIn)?;
        self.api.user_carts(user.id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use dashcart_core::stores::{OrderHistory, PersistedState, SessionCookie, ShippingAddress};
    use rust_decimal::Decimal;
    use url::Url;

    use super::*;
    use crate::store::{MemoryStorage, StoreError};

    // Points at a closed port; these tests never reach the network.
    fn dashboard() -> Dashboard {
        dashboard_over(Arc::new(MemoryStorage::new()))
    }

    fn dashboard_over(storage: Arc<dyn Storage>) -> Dashboard {
        let api = ApiClient::new(&Url::parse("http://127.0.0.1:9").unwrap()).unwrap();
        Dashboard::new(api, Stores::open(storage).unwrap())
    }

    /// Memory storage that refuses writes to the cart key.
    #[derive(Default)]
    struct CartWriteFails(MemoryStorage);

    impl Storage for CartWriteFails {
        fn get_item(&self, key: &str) -> std::result::Result<Option<String>, StoreError> {
            self.0.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> std::result::Result<(), StoreError> {
            if key == CartState::STORAGE_KEY {
                return Err(StoreError::Io {
                    key: key.to_owned(),
                    source: std::io::Error::other("disk full"),
                });
            }
            self.0.set_item(key, value)
        }
    }

    fn line(id: i32, quantity: u32, stock: u32) -> CartLine {
        CartLine {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Decimal::new(1050, 2),
            quantity,
            thumbnail: String::new(),
            stock,
        }
    }

    fn details() -> CheckoutDetails {
        CheckoutDetails {
            full_name: "Emily Johnson".to_string(),
            email: "emily.johnson@x.dummyjson.com".to_string(),
            phone: "+81 965-431-3024".to_string(),
            address: "626 Main Street".to_string(),
            city: "Phoenix".to_string(),
            zip_code: "29112".to_string(),
        }
    }

    #[tokio::test]
    async fn test_guest_checkout_places_order_and_clears_cart() {
        let mut dashboard = dashboard();
        dashboard
            .stores
            .cart
            .update(|cart| {
                cart.add(line(1, 2, 5));
                cart.add(line(2, 1, 5));
            })
            .unwrap();

        let order = dashboard.checkout(&details()).await.unwrap();

        assert_eq!(order.total, Decimal::new(3150, 2));
        assert_eq!(order.items.len(), 2);
        assert!(dashboard.cart().is_empty());
        assert_eq!(dashboard.orders().len(), 1);
        assert_eq!(dashboard.orders()[0].id, order.id);
    }

    #[tokio::test]
    async fn test_failed_cart_write_leaves_no_order_on_disk() {
        let mut cart = CartState::default();
        cart.add(line(1, 2, 5));
        let storage = Arc::new(CartWriteFails::default());
        storage
            .0
            .set_item(CartState::STORAGE_KEY, &serde_json::to_string(&cart).unwrap())
            .unwrap();
        let mut dashboard = dashboard_over(Arc::clone(&storage) as Arc<dyn Storage>);

        let err = dashboard.checkout(&details()).await.unwrap_err();
        assert!(matches!(err, ClientError::Storage(_)));
        assert_eq!(storage.get_item(OrderHistory::STORAGE_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_checkout_rejects_invalid_details_first() {
        let mut dashboard = dashboard();
        let mut bad = details();
        bad.email = "nope".to_string();

        let err = dashboard.checkout(&bad).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn test_checkout_with_empty_cart() {
        let mut dashboard = dashboard();
        let err = dashboard.checkout(&details()).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Checkout(CheckoutError::EmptyCart)
        ));
        assert!(dashboard.orders().is_empty());
    }

    #[test]
    fn test_cart_edits() {
        let mut dashboard = dashboard();
        dashboard
            .stores
            .cart
            .update(|cart| cart.add(line(1, 2, 5)))
            .unwrap();

        dashboard.set_cart_quantity(ProductId::new(1), 9).unwrap();
        assert_eq!(dashboard.cart().total_items(), 5);

        dashboard.set_cart_quantity(ProductId::new(1), 0).unwrap();
        assert!(dashboard.cart().is_empty());

        assert!(matches!(
            dashboard.remove_from_cart(ProductId::new(1)),
            Err(ClientError::NotFound(_))
        ));
        assert!(matches!(
            dashboard.set_cart_quantity(ProductId::new(3), 1),
            Err(ClientError::NotFound(_))
        ));
    }

    #[test]
    fn test_cancel_order() {
        let mut dashboard = dashboard();
        let mut cart = CartState::default();
        cart.add(line(1, 1, 5));
        let mut orders = dashboard.stores.orders.get().clone();
        let address = ShippingAddress {
            full_name: "Emily Johnson".to_string(),
            address: "626 Main Street".to_string(),
            city: "Phoenix".to_string(),
            zip_code: "29112".to_string(),
        };
        let order = place_order(&mut cart, &mut orders, address, Utc::now()).unwrap();
        dashboard.stores.orders.set(orders).unwrap();

        dashboard.cancel_order(&order.id).unwrap();
        assert!(dashboard.orders().is_empty());
        assert!(matches!(
            dashboard.cancel_order(&order.id),
            Err(ClientError::NotFound(_))
        ));
    }

    #[test]
    fn test_logout_clears_session_and_cookie() {
        let mut dashboard = dashboard();
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 1,
            "username": "emilys",
            "email": "emily.johnson@x.dummyjson.com",
            "firstName": "Emily",
            "lastName": "Johnson"
        }))
        .unwrap();
        let cookie: SessionCookie = dashboard
            .stores
            .auth
            .update(|auth| auth.set_auth(user, "token".to_string(), Utc::now()))
            .unwrap();
        dashboard.stores.cookie.set(Some(cookie)).unwrap();

        dashboard.logout().unwrap();
        assert!(dashboard.session_user().is_none());
        assert!(dashboard.stores().cookie.get().is_none());
        assert!(!dashboard.stores().auth.get().is_authenticated);
    }

    #[tokio::test]
    async fn test_remote_carts_needs_session() {
        let dashboard = dashboard();
        assert!(matches!(
            dashboard.remote_carts().await,
            Err(ClientError::NotLoggedIn)
        ));
    }

    #[tokio::test]
    async fn test_invalid_product_form_is_not_sent() {
        let dashboard = dashboard();
        let form = ProductForm {
            title: String::new(),
            description: "Soft".to_string(),
            price: Decimal::ZERO,
            category: "beauty".to_string(),
            brand: None,
            stock: None,
            thumbnail: None,
        };
        let err = dashboard.add_product(&form).await.unwrap_err();
        let ClientError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.message_for("title"), Some("Title is required"));
        assert_eq!(errors.message_for("price"), Some("Price must be positive"));
    }
}
