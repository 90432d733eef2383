//! Client-side state containers.
//!
//! Each container is plain data plus the operations that mutate it. The
//! persisted ones implement [`PersistedState`]: after every mutation the
//! owner writes the whole value under [`PersistedState::STORAGE_KEY`], and on
//! start-up it re-hydrates from that key (falling back to `Default`).
//!
//! | Store | Key | Persisted |
//! |-------|-----|-----------|
//! | [`AuthState`] | `auth-storage` | yes |
//! | [`CartState`] | `cart-storage` | yes |
//! | [`OrderHistory`] | `order-storage` | yes |
//! | [`SessionCookie`] | `auth-cookie` | yes (stands in for the browser cookie jar) |
//! | [`UiFilters`] | - | no |

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod ui;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use auth::{AuthState, SESSION_COOKIE_MAX_AGE_SECS, SESSION_COOKIE_NAME, SessionCookie};
pub use cart::{CartLine, CartState};
pub use checkout::{CheckoutError, place_order};
pub use orders::{NewOrder, Order, OrderHistory, OrderLine, ShippingAddress};
pub use ui::{DEFAULT_MAX_PRICE, UiFilters};

/// A state container persisted as one JSON document under a fixed key.
pub trait PersistedState: Serialize + DeserializeOwned + Default {
    /// Durable storage key holding the full serialized state.
    const STORAGE_KEY: &'static str;
}

impl PersistedState for AuthState {
    const STORAGE_KEY: &'static str = "auth-storage";
}

impl PersistedState for CartState {
    const STORAGE_KEY: &'static str = "cart-storage";
}

impl PersistedState for OrderHistory {
    const STORAGE_KEY: &'static str = "order-storage";
}

impl PersistedState for Option<SessionCookie> {
    const STORAGE_KEY: &'static str = "auth-cookie";
}
