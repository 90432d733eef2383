//! Plain-text views of catalog and store state.

use std::fmt::Write;

use dashcart_core::format_price;
use dashcart_core::models::{Category, Product, ProductPage, User, UserCarts};
use dashcart_core::stores::{CartState, Order, UiFilters};

/// Product page as a table with a paging footer.
#[must_use]
pub fn product_table(page: &ProductPage) -> String {
    let mut out = format!(
        "{:>5}  {:<40}  {:>11}  {:>5}  {}\n",
        "ID", "TITLE", "PRICE", "STOCK", "CATEGORY"
    );
    for product in &page.products {
        let _ = writeln!(
            out,
            "{:>5}  {:<40}  {:>11}  {:>5}  {}",
            product.id.as_i32(),
            truncate(&product.title, 40),
            format_price(product.price),
            product.stock,
            product.category,
        );
    }

    let first = if page.products.is_empty() { 0 } else { page.skip + 1 };
    let last = page.skip.saturating_add(page.limit).min(page.total);
    let _ = write!(out, "Showing {first}-{last} of {} products", page.total);
    out
}

/// Note on the category and price filters behind a listing, if any narrow it.
#[must_use]
pub fn active_filters(filters: &UiFilters) -> Option<String> {
    if !filters.is_active() {
        return None;
    }

    let (min, max) = filters.price_range;
    let mut out = String::from("Filtered by");
    if !filters.selected_category.is_empty() {
        let _ = write!(out, " category {},", filters.selected_category);
    }
    let _ = write!(
        out,
        " price {}-{} (omit --category, --min-price and --max-price to clear)",
        format_price(min),
        format_price(max)
    );
    Some(out)
}

/// All known fields of one product.
#[must_use]
pub fn product_detail(product: &Product) -> String {
    let mut out = format!("#{} {}\n", product.id, product.title);
    let _ = writeln!(out, "Price:    {}", format_price(product.price));
    if let Some(discount) = product.discount_percentage {
        let _ = writeln!(out, "Discount: {discount}%");
    }
    let _ = writeln!(out, "Stock:    {}", product.stock);
    let _ = writeln!(out, "Category: {}", product.category);
    if let Some(brand) = &product.brand {
        let _ = writeln!(out, "Brand:    {brand}");
    }
    if !product.thumbnail.is_empty() {
        let _ = writeln!(out, "Image:    {}", product.thumbnail);
    }
    if !product.description.is_empty() {
        let _ = write!(out, "\n{}", product.description);
    }
    out.trim_end().to_owned()
}

#[must_use]
pub fn categories(categories: &[Category]) -> String {
    categories
        .iter()
        .map(|c| format!("{:<24}  {}", c.slug, c.name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cart lines with per-line and overall totals.
#[must_use]
pub fn cart(cart: &CartState) -> String {
    if cart.is_empty() {
        return "Your cart is empty".to_owned();
    }

    let mut out = String::new();
    for line in cart.items() {
        let _ = writeln!(
            out,
            "{:>5}  {:<40}  {:>3} x {:>11}  = {:>11}",
            line.id.as_i32(),
            truncate(&line.title, 40),
            line.quantity,
            format_price(line.price),
            format_price(line.total()),
        );
    }
    let _ = write!(
        out,
        "Items: {}  Total: {}",
        cart.total_items(),
        format_price(cart.total_price())
    );
    out
}

/// Order summary followed by its lines.
#[must_use]
pub fn order(order: &Order) -> String {
    let address = &order.shipping_address;
    let mut out = format!(
        "{}  {}  {}  {}\n",
        order.id,
        order.date,
        order.status,
        format_price(order.total)
    );
    let _ = writeln!(
        out,
        "  Ship to: {}, {}, {} {}",
        address.full_name, address.address, address.city, address.zip_code
    );
    for line in &order.items {
        let _ = writeln!(
            out,
            "  {:>3} x {} ({})",
            line.quantity,
            line.title,
            format_price(line.price)
        );
    }
    out.trim_end().to_owned()
}

#[must_use]
pub fn orders(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "No orders yet".to_owned();
    }
    orders.iter().map(order).collect::<Vec<_>>().join("\n\n")
}

#[must_use]
pub fn user(user: &User) -> String {
    format!(
        "{} ({}) <{}> #{}",
        user.full_name(),
        user.username,
        user.email,
        user.id
    )
}

#[must_use]
pub fn remote_carts(carts: &UserCarts) -> String {
    if carts.carts.is_empty() {
        return "No remote carts".to_owned();
    }

    let mut out = String::new();
    for cart in &carts.carts {
        let _ = writeln!(
            out,
            "Cart {}: {} products, {} items, {}",
            cart.id,
            cart.total_products,
            cart.total_quantity,
            format_price(cart.total)
        );
        for line in &cart.products {
            let _ = writeln!(out, "  {:>3} x {} ({})", line.quantity, line.title, line.id);
        }
    }
    out.trim_end().to_owned()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
