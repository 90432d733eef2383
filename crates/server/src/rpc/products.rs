//! `products.*` procedures.

use std::str::FromStr;

use dashcart_core::models::{ProductForm, ProductIdInput, ProductListQuery, UpdateProductInput};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tracing::instrument;

use crate::dummyjson::DummyJsonClient;
use crate::error::{Result, RpcError};
use crate::rpc::parse_input;

/// `products.getProducts`: one page of products, price-filtered locally.
#[instrument(skip_all)]
pub async fn get_products(catalog: &DummyJsonClient, input: Value) -> Result<Value> {
    let query: ProductListQuery = parse_input(input)?;

    let page = catalog
        .list_products(&query)
        .await
        .map_err(|e| RpcError::remote("Failed to fetch products", e))?;

    Ok(filter_page(page, &query))
}

/// Apply the query's price range to the products of a fetched page.
///
/// Only the fetched page is filtered. `total`, `skip` and `limit` are copied
/// from the remote page unchanged, so with a price range the page can hold
/// fewer products than `limit` while `total` still counts the unfiltered set.
/// Products without a numeric price are kept.
#[must_use]
pub fn filter_page(page: Value, query: &ProductListQuery) -> Value {
    let products: Vec<Value> = match page.get("products") {
        Some(Value::Array(products)) => products
            .iter()
            .filter(|product| price_of(product).is_none_or(|price| query.price_in_range(price)))
            .cloned()
            .collect(),
        _ => Vec::new(),
    };

    let field = |name: &str| page.get(name).cloned().unwrap_or(Value::Null);
    json!({
        "products": products,
        "total": field("total"),
        "skip": field("skip"),
        "limit": field("limit"),
    })
}

/// Product price as written in the JSON, without a round trip through `f64`.
fn price_of(product: &Value) -> Option<Decimal> {
    let text = product.get("price")?.as_number()?.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// `products.getProduct`
#[instrument(skip_all)]
pub async fn get_product(catalog: &DummyJsonClient, input: Value) -> Result<Value> {
    let input: ProductIdInput = parse_input(input)?;
    catalog
        .get_product(input.id)
        .await
        .map_err(|e| RpcError::remote("Product not found", e))
}

/// `products.getCategories`
#[instrument(skip_all)]
pub async fn get_categories(catalog: &DummyJsonClient) -> Result<Value> {
    catalog
        .categories()
        .await
        .map_err(|e| RpcError::remote("Failed to fetch categories", e))
}

/// `products.addProduct`
#[instrument(skip_all)]
pub async fn add_product(catalog: &DummyJsonClient, input: Value) -> Result<Value> {
    let form: ProductForm = parse_input(input)?;
    form.validate()?;
    catalog
        .add_product(&form)
        .await
        .map_err(|e| RpcError::remote("Failed to add product", e))
}

/// `products.updateProduct`
#[instrument(skip_all)]
pub async fn update_product(catalog: &DummyJsonClient, input: Value) -> Result<Value> {
    let input: UpdateProductInput = parse_input(input)?;
    input.data.validate()?;
    catalog
        .update_product(input.id, &input.data)
        .await
        .map_err(|e| RpcError::remote("Failed to update product", e))
}

/// `products.deleteProduct`
#[instrument(skip_all)]
pub async fn delete_product(catalog: &DummyJsonClient, input: Value) -> Result<Value> {
    let input: ProductIdInput = parse_input(input)?;
    catalog
        .delete_product(input.id)
        .await
        .map_err(|e| RpcError::remote("Failed to delete product", e))
}
