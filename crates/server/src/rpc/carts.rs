//! `carts.*` procedures.

use dashcart_core::models::{AddCartInput, UserCartsInput};
use serde_json::Value;
use tracing::instrument;

use crate::dummyjson::DummyJsonClient;
use crate::error::{Result, RpcError};
use crate::rpc::parse_input;

/// `carts.getUserCarts`
#[instrument(skip_all)]
pub async fn get_user_carts(catalog: &DummyJsonClient, input: Value) -> Result<Value> {
    let input: UserCartsInput = parse_input(input)?;
    catalog
        .user_carts(input.user_id)
        .await
        .map_err(|e| RpcError::remote("Failed to fetch user carts", e))
}

/// `carts.addCart`
#[instrument(skip_all)]
pub async fn add_cart(catalog: &DummyJsonClient, input: Value) -> Result<Value> {
    let input: AddCartInput = parse_input(input)?;
    catalog
        .add_cart(&input)
        .await
        .map_err(|e| RpcError::remote("Failed to create cart", e))
}
