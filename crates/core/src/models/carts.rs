//! Remote cart procedure inputs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CartId, ProductId, UserId};

/// Input of `carts.getUserCarts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCartsInput {
    pub user_id: UserId,
}

/// One product line of a remote cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartProductInput {
    pub id: ProductId,
    pub quantity: u32,
}

/// Input of `carts.addCart`, forwarded to the remote service as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartInput {
    pub user_id: UserId,
    pub products: Vec<CartProductInput>,
}

/// A cart stored by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCart {
    pub id: CartId,
    #[serde(default)]
    pub products: Vec<RemoteCartLine>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(default)]
    pub total_products: u32,
    #[serde(default)]
    pub total_quantity: u32,
}

/// A product line of a [`RemoteCart`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteCartLine {
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
}

/// Response of `carts.getUserCarts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCarts {
    pub carts: Vec<RemoteCart>,
    #[serde(default)]
    pub total: u32,
}
