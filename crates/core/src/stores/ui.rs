//! Product list filters. Held in memory only.

use rust_decimal::Decimal;

use crate::models::ProductListQuery;

/// Upper bound of the default price range.
pub const DEFAULT_MAX_PRICE: u32 = 10_000;

/// Search, category and price-range filters of the product list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiFilters {
    pub search_query: String,
    pub selected_category: String,
    pub price_range: (Decimal, Decimal),
}

impl Default for UiFilters {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            selected_category: String::new(),
            price_range: (Decimal::ZERO, Decimal::from(DEFAULT_MAX_PRICE)),
        }
    }
}

impl UiFilters {
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn set_selected_category(&mut self, category: impl Into<String>) {
        self.selected_category = category.into();
    }

    pub fn set_price_range(&mut self, min: Decimal, max: Decimal) {
        self.price_range = (min, max);
    }

    /// Back to an empty search, no category and the full price range.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether a category or a narrowed price range is in effect.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.selected_category.is_empty()
            || self.price_range.0 > Decimal::ZERO
            || self.price_range.1 < Decimal::from(DEFAULT_MAX_PRICE)
    }

    /// Listing query for zero-based `page` of `page_size` products.
    #[must_use]
    pub fn to_query(&self, page: u32, page_size: u32) -> ProductListQuery {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_owned());
        ProductListQuery {
            limit: page_size,
            skip: page.saturating_mul(page_size),
            search: non_empty(&self.search_query),
            category: non_empty(&self.selected_category),
            min_price: Some(self.price_range.0),
            max_price: Some(self.price_range.1),
        }
    }
}
