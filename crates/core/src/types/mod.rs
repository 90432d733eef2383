//! Core types for DashCart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod status;

pub use id::*;
pub use price::{format_price, line_total};
pub use status::OrderStatus;
