//! Shapes shared between the façade, the client and the catalog wire format.
//!
//! Field names follow the catalog's camelCase JSON.

pub mod carts;
pub mod checkout;
pub mod product;
pub mod user;

pub use carts::{
    AddCartInput, CartProductInput, RemoteCart, RemoteCartLine, UserCarts, UserCartsInput,
};
pub use checkout::CheckoutDetails;
pub use product::{
    Category, DEFAULT_PAGE_SIZE, Product, ProductForm, ProductIdInput, ProductListQuery,
    ProductPage, ProductPatch, UpdateProductInput,
};
pub use user::{LoginInput, LoginResponse, User};
