//! DashCart terminal client.
//!
//! The client plays the dashboard's role: it keeps the auth session, cart
//! and order history in persisted stores and calls the server's procedures
//! for everything catalog-related.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod render;
pub mod store;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use dashboard::Dashboard;
pub use error::{ClientError, Result};
pub use store::{FileStorage, MemoryStorage, PersistedStore, Storage, StoreError, Stores};
