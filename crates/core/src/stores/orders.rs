//! Local order history.
//!
//! Orders are only ever created (at checkout) and cancelled. Cancelling
//! deletes the order; there is no status transition and no undo.

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::stores::cart::CartLine;
use crate::types::{OrderId, OrderStatus, ProductId};

/// Snapshot of one cart line at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: ProductId,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
    pub thumbnail: String,
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id,
            title: line.title.clone(),
            price: line.price,
            quantity: line.quantity,
            thumbnail: line.thumbnail.clone(),
        }
    }
}

/// Where an order ships to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<OrderLine>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    /// ISO-8601 placement time, e.g. `2024-06-10T07:33:20.123Z`.
    pub date: String,
    pub status: OrderStatus,
    pub shipping_address: ShippingAddress,
}

/// Order data before the store stamps an id and date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub items: Vec<OrderLine>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub shipping_address: ShippingAddress,
}

/// Placed orders, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderHistory {
    orders: Vec<Order>,
}

impl OrderHistory {
    /// All orders, newest first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// The order with `id`, if present.
    #[must_use]
    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| &order.id == id)
    }

    /// Stamp `new` with an id and date derived from `placed_at` and prepend
    /// it. Returns a copy of the stored order.
    pub fn add(&mut self, new: NewOrder, placed_at: DateTime<Utc>) -> Order {
        let order = Order {
            id: OrderId::generate(placed_at),
            items: new.items,
            total: new.total,
            date: placed_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            status: new.status,
            shipping_address: new.shipping_address,
        };
        self.orders.insert(0, order.clone());
        order
    }

    /// Delete the order with `id`. Returns whether an order was removed.
    pub fn cancel(&mut self, id: &OrderId) -> bool {
        let before = self.orders.len();
        self.orders.retain(|order| &order.id != id);
        self.orders.len() != before
    }
}
