//! Procedure façade.
//!
//! Procedures are addressed as `<router>.<procedure>`:
//!
//! ```text
//! auth.login               auth.getCurrentUser
//! products.getProducts     products.getProduct      products.getCategories
//! products.addProduct      products.updateProduct   products.deleteProduct
//! carts.getUserCarts       carts.addCart
//! ```
//!
//! Each procedure validates its JSON input, makes one catalog call and
//! returns the catalog's JSON. The only procedure that reshapes the response
//! is `products.getProducts`, which applies the price range to the fetched
//! page.

pub mod auth;
pub mod carts;
pub mod context;
pub mod products;

use serde::de::DeserializeOwned;
use serde_json::Value;

use dashcart_core::validation::ValidationErrors;

use crate::error::{Result, RpcError};
use crate::state::AppState;

pub use context::RequestContext;

/// Every procedure the façade serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Procedure {
    Login,
    GetCurrentUser,
    GetProducts,
    GetProduct,
    GetCategories,
    AddProduct,
    UpdateProduct,
    DeleteProduct,
    GetUserCarts,
    AddCart,
}

const AUTH_ROUTER: &[(&str, Procedure)] = &[
    ("login", Procedure::Login),
    ("getCurrentUser", Procedure::GetCurrentUser),
];

const PRODUCTS_ROUTER: &[(&str, Procedure)] = &[
    ("getProducts", Procedure::GetProducts),
    ("getProduct", Procedure::GetProduct),
    ("getCategories", Procedure::GetCategories),
    ("addProduct", Procedure::AddProduct),
    ("updateProduct", Procedure::UpdateProduct),
    ("deleteProduct", Procedure::DeleteProduct),
];

const CARTS_ROUTER: &[(&str, Procedure)] = &[
    ("getUserCarts", Procedure::GetUserCarts),
    ("addCart", Procedure::AddCart),
];

const ROUTERS: &[(&str, &[(&str, Procedure)])] = &[
    ("auth", AUTH_ROUTER),
    ("products", PRODUCTS_ROUTER),
    ("carts", CARTS_ROUTER),
];

impl Procedure {
    /// Resolve a dotted path such as `products.getProducts`.
    ///
    /// Only the first two dot-separated segments are considered.
    ///
    /// # Errors
    ///
    /// Returns `RpcError::RouterNotFound` or `RpcError::ProcedureNotFound`.
    pub fn lookup(path: &str) -> Result<Self> {
        let mut segments = path.split('.');
        let router_name = segments.next().unwrap_or_default();
        let procedure_name = segments.next().unwrap_or_default();

        let (_, router) = ROUTERS
            .iter()
            .find(|(name, _)| *name == router_name)
            .ok_or(RpcError::RouterNotFound)?;

        router
            .iter()
            .find(|(name, _)| *name == procedure_name)
            .map(|(_, procedure)| *procedure)
            .ok_or(RpcError::ProcedureNotFound)
    }

    /// Run the procedure.
    ///
    /// # Errors
    ///
    /// Returns `RpcError::Validation` for bad input and `RpcError::Remote`
    /// when the catalog call fails.
    pub async fn call(self, state: &AppState, ctx: &RequestContext, input: Value) -> Result<Value> {
        let catalog = state.catalog();
        match self {
            Self::Login => auth::login(catalog, input).await,
            Self::GetCurrentUser => Ok(auth::get_current_user(catalog, ctx).await),
            Self::GetProducts => products::get_products(catalog, input).await,
            Self::GetProduct => products::get_product(catalog, input).await,
            Self::GetCategories => products::get_categories(catalog).await,
            Self::AddProduct => products::add_product(catalog, input).await,
            Self::UpdateProduct => products::update_product(catalog, input).await,
            Self::DeleteProduct => products::delete_product(catalog, input).await,
            Self::GetUserCarts => carts::get_user_carts(catalog, input).await,
            Self::AddCart => carts::add_cart(catalog, input).await,
        }
    }
}

/// Decode a procedure input, reporting shape errors as validation failures.
pub(crate) fn parse_input<T: DeserializeOwned>(input: Value) -> Result<T> {
    serde_json::from_value(input)
        .map_err(|e| RpcError::Validation(ValidationErrors::single("input", e.to_string())))
}
