//! Turning the cart into an order.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::stores::cart::CartState;
use crate::stores::orders::{NewOrder, Order, OrderHistory, OrderLine, ShippingAddress};
use crate::types::OrderStatus;

/// Errors that can occur when placing an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,
}

/// Snapshot the cart into a new `processing` order, prepend it to `orders`
/// and empty the cart.
///
/// The order total is the cart total at the time of the call.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` and changes nothing if the cart has no
/// lines.
pub fn place_order(
    cart: &mut CartState,
    orders: &mut OrderHistory,
    shipping_address: ShippingAddress,
    placed_at: DateTime<Utc>,
) -> Result<Order, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let new = NewOrder {
        items: cart.items().iter().map(OrderLine::from).collect(),
        total: cart.total_price(),
        status: OrderStatus::Processing,
        shipping_address,
    };
    let order = orders.add(new, placed_at);
    cart.clear();
    Ok(order)
}
