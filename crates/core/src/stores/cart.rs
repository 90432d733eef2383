//! Local shopping cart.
//!
//! Every mutation keeps `1 <= quantity <= stock` for each line: quantities are
//! clamped to stock, and a line whose quantity drops to zero is removed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CartProductInput, Product};
use crate::types::{ProductId, line_total};

/// One product in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
    pub thumbnail: String,
    pub stock: u32,
}

impl CartLine {
    /// A line for `quantity` units of `product`, before clamping.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            quantity,
            thumbnail: product.thumbnail.clone(),
            stock: product.stock,
        }
    }

    /// Price of this line.
    #[must_use]
    pub fn total(&self) -> Decimal {
        line_total(self.price, self.quantity)
    }
}

/// Cart contents in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    items: Vec<CartLine>,
}

impl CartState {
    /// Lines in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartLine> {
        self.items.iter().find(|line| line.id == id)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `line.quantity` units, merging with an existing line for the same
    /// product. The result is clamped to the stored line's stock.
    ///
    /// Adding zero units of a product not in the cart, or of a product with no
    /// stock, leaves the cart unchanged.
    pub fn add(&mut self, line: CartLine) {
        if let Some(existing) = self.items.iter_mut().find(|l| l.id == line.id) {
            existing.quantity = existing
                .quantity
                .saturating_add(line.quantity)
                .min(existing.stock);
            return;
        }

        let quantity = line.quantity.min(line.stock);
        if quantity == 0 {
            return;
        }
        self.items.push(CartLine { quantity, ..line });
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|line| line.id != id);
        self.items.len() != before
    }

    /// Set the quantity of the line for `id`, clamped to stock.
    ///
    /// A quantity of zero or less removes the line. Unknown ids are ignored.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove(id);
            return;
        }
        if let Some(line) = self.items.iter_mut().find(|l| l.id == id) {
            let wanted = u32::try_from(quantity).unwrap_or(u32::MAX);
            line.quantity = wanted.min(line.stock);
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Sum of price × quantity over all lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartLine::total).sum()
    }

    /// Product id/quantity pairs for a remote cart.
    #[must_use]
    pub fn remote_lines(&self) -> Vec<CartProductInput> {
        self.items
            .iter()
            .map(|line| CartProductInput {
                id: line.id,
                quantity: line.quantity,
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(id: i32, price: &str, quantity: u32, stock: u32) -> CartLine {
        CartLine {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: price.parse().unwrap(),
            quantity,
            thumbnail: String::new(),
            stock,
        }
    }

    #[test]
    fn test_repeated_add_clamps_to_stock() {
        let mut cart = CartState::default();
        cart.add(line(1, "10", 3, 5));
        cart.add(line(1, "10", 4, 5));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 5);
    }

    #[test]
    fn test_first_add_clamps_to_stock() {
        let mut cart = CartState::default();
        cart.add(line(2, "1.50", 9, 2));
        assert_eq!(cart.get(ProductId::new(2)).unwrap().quantity, 2);
    }

    #[test]
    fn test_add_never_exceeds_stock() {
        for stock in 1..6 {
            for first in 0..8 {
                for second in 0..8 {
                    let mut cart = CartState::default();
                    cart.add(line(1, "3", first, stock));
                    cart.add(line(1, "3", second, stock));
                    for item in cart.items() {
                        assert!(item.quantity >= 1);
                        assert!(item.quantity <= stock);
                    }
                }
            }
        }
    }

    #[test]
    fn test_out_of_stock_product_is_not_added() {
        let mut cart = CartState::default();
        cart.add(line(3, "5", 1, 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_to_zero_removes_line() {
        let mut cart = CartState::default();
        cart.add(line(1, "10", 1, 5));
        cart.add(line(2, "20", 2, 5));

        cart.update_quantity(ProductId::new(1), 0);
        assert!(cart.get(ProductId::new(1)).is_none());
        assert_eq!(cart.items().len(), 1);

        cart.update_quantity(ProductId::new(2), -4);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_clamps() {
        let mut cart = CartState::default();
        cart.add(line(1, "10", 1, 5));
        cart.update_quantity(ProductId::new(1), 50);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 5);

        cart.update_quantity(ProductId::new(1), 2);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 2);

        cart.update_quantity(ProductId::new(99), 3);
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = CartState::default();
        cart.add(line(1, "10", 1, 5));
        cart.add(line(2, "20", 1, 5));

        assert!(cart.remove(ProductId::new(1)));
        assert!(!cart.remove(ProductId::new(1)));
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals() {
        let mut cart = CartState::default();
        cart.add(line(1, "9.99", 2, 5));
        cart.add(line(2, "0.01", 3, 5));

        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.total_price(), "20.01".parse::<Decimal>().unwrap());
        assert_eq!(
            cart.remote_lines(),
            vec![
                CartProductInput {
                    id: ProductId::new(1),
                    quantity: 2
                },
                CartProductInput {
                    id: ProductId::new(2),
                    quantity: 3
                },
            ]
        );
    }

    #[test]
    fn test_persisted_shape() {
        let mut cart = CartState::default();
        cart.add(line(1, "9.99", 1, 5));
        let value = serde_json::to_value(&cart).unwrap();
        assert_eq!(value["items"][0]["price"], serde_json::json!(9.99));
        assert_eq!(value["items"][0]["quantity"], serde_json::json!(1));

        let restored: CartState = serde_json::from_value(value).unwrap();
        assert_eq!(restored, cart);
    }
}
