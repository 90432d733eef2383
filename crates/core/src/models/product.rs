//! Catalog product types and product procedure inputs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;
use crate::validation::{ValidationErrors, Validator};

/// Default page size for product listings.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A catalog product as returned by the remote service.
///
/// Only the fields the dashboard uses are modelled; unknown fields are
/// ignored. Newly added products may come back without stock or thumbnail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub discount_percentage: Option<Decimal>,
}

/// One page of products.
///
/// `total`, `skip` and `limit` describe the remote result set, not the
/// (possibly price-filtered) `products` on this page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: u32,
    pub skip: u32,
    pub limit: u32,
}

/// Product category entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Input of `products.getProducts`.
///
/// `search` takes precedence over `category`. The price bounds are applied to
/// the fetched page after the remote call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub skip: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_price: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_price: Option<Decimal>,
}

const fn default_limit() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for ProductListQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            skip: 0,
            search: None,
            category: None,
            min_price: None,
            max_price: None,
        }
    }
}

impl ProductListQuery {
    /// Whether the price bounds admit `price`. Bounds are inclusive.
    #[must_use]
    pub fn price_in_range(&self, price: Decimal) -> bool {
        if self.min_price.is_some_and(|min| price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| price > max) {
            return false;
        }
        true
    }
}

/// Input carrying only a product id (`getProduct`, `deleteProduct`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductIdInput {
    pub id: ProductId,
}

/// Product create form (`products.addProduct`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductForm {
    pub title: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl ProductForm {
    /// Check every field rule.
    ///
    /// # Errors
    ///
    /// Returns all failing fields.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.non_empty("title", &self.title, "Title is required")
            .non_empty("description", &self.description, "Description is required")
            .positive("price", self.price, "Price must be positive")
            .non_empty("category", &self.category, "Category is required");
        check_optional_fields(&mut v, self.stock, self.thumbnail.as_deref());
        v.finish()
    }
}

/// Partial product update (`products.updateProduct` data).
///
/// Absent fields are left untouched remotely; present fields obey the
/// [`ProductForm`] rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl ProductPatch {
    /// Check the rules of every present field.
    ///
    /// # Errors
    ///
    /// Returns all failing fields.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        if let Some(title) = &self.title {
            v.non_empty("title", title, "Title is required");
        }
        if let Some(description) = &self.description {
            v.non_empty("description", description, "Description is required");
        }
        if let Some(price) = self.price {
            v.positive("price", price, "Price must be positive");
        }
        if let Some(category) = &self.category {
            v.non_empty("category", category, "Category is required");
        }
        check_optional_fields(&mut v, self.stock, self.thumbnail.as_deref());
        v.finish()
    }
}

fn check_optional_fields(v: &mut Validator, stock: Option<i64>, thumbnail: Option<&str>) {
    if let Some(stock) = stock {
        v.non_negative("stock", stock, "Stock must be non-negative");
    }
    if let Some(thumbnail) = thumbnail {
        v.url("thumbnail", thumbnail, "Invalid URL");
    }
}

/// Input of `products.updateProduct`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProductInput {
    pub id: ProductId,
    pub data: ProductPatch,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form() -> ProductForm {
        ProductForm {
            title: "Essence Mascara".to_string(),
            description: "Lash princess".to_string(),
            price: "9.99".parse().unwrap(),
            category: "beauty".to_string(),
            brand: None,
            stock: Some(5),
            thumbnail: Some("https://cdn.dummyjson.com/a.png".to_string()),
        }
    }

    #[test]
    fn test_product_decodes_remote_json() {
        let product: Product = serde_json::from_value(json!({
            "id": 1,
            "title": "Essence Mascara Lash Princess",
            "description": "Popular mascara",
            "category": "beauty",
            "price": 9.99,
            "discountPercentage": 7.17,
            "rating": 4.94,
            "stock": 5,
            "brand": "Essence",
            "thumbnail": "https://cdn.dummyjson.com/thumb.png",
            "tags": ["beauty"]
        }))
        .unwrap();

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, "9.99".parse::<Decimal>().unwrap());
        assert_eq!(product.stock, 5);
        assert_eq!(product.brand.as_deref(), Some("Essence"));
        assert_eq!(
            product.discount_percentage,
            Some("7.17".parse::<Decimal>().unwrap())
        );
    }

    #[test]
    fn test_product_tolerates_sparse_add_response() {
        let product: Product =
            serde_json::from_value(json!({"id": 195, "title": "New", "price": 12})).unwrap();
        assert_eq!(product.stock, 0);
        assert!(product.thumbnail.is_empty());
    }

    #[test]
    fn test_list_query_defaults() {
        let query: ProductListQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(query, ProductListQuery::default());
        assert_eq!(query.limit, 10);
        assert_eq!(query.skip, 0);
        assert!(query.price_in_range(Decimal::from(1_000_000)));
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let query: ProductListQuery =
            serde_json::from_value(json!({"minPrice": 10, "maxPrice": 20})).unwrap();
        assert!(query.price_in_range(Decimal::from(10)));
        assert!(query.price_in_range(Decimal::from(20)));
        assert!(!query.price_in_range("9.99".parse().unwrap()));
        assert!(!query.price_in_range("20.01".parse().unwrap()));
    }

    #[test]
    fn test_form_validation() {
        assert!(form().validate().is_ok());

        let mut bad = form();
        bad.title = String::new();
        bad.price = Decimal::ZERO;
        bad.stock = Some(-3);
        bad.thumbnail = Some("nope".to_string());
        let errors = bad.validate().unwrap_err();
        assert_eq!(errors.message_for("title"), Some("Title is required"));
        assert_eq!(errors.message_for("price"), Some("Price must be positive"));
        assert_eq!(errors.message_for("stock"), Some("Stock must be non-negative"));
        assert_eq!(errors.message_for("thumbnail"), Some("Invalid URL"));
    }

    #[test]
    fn test_form_serializes_price_as_number() {
        let value = serde_json::to_value(form()).unwrap();
        assert_eq!(value["price"], json!(9.99));
        assert!(value.get("brand").is_none());
    }

    #[test]
    fn test_patch_only_checks_present_fields() {
        assert!(ProductPatch::default().validate().is_ok());

        let patch = ProductPatch {
            price: Some(Decimal::from(-1)),
            ..ProductPatch::default()
        };
        let errors = patch.validate().unwrap_err();
        assert_eq!(errors.fields().len(), 1);
        assert_eq!(errors.message_for("price"), Some("Price must be positive"));
    }
}
