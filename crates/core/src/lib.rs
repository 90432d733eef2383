//! DashCart Core - Shared domain types and state containers.
//!
//! This crate provides the types used across all DashCart components:
//! - `server` - Procedure façade in front of the DummyJSON catalog API
//! - `cli` - Terminal dashboard that calls the façade and persists local state
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O, no
//! HTTP clients, no file access. Persisting a store is the caller's job; every
//! store here is plain serializable data with methods that uphold its
//! invariants.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, order status, price helpers
//! - [`models`] - Catalog, user and checkout shapes shared with the wire format
//! - [`stores`] - Auth session, cart, order history and UI filter containers
//! - [`validation`] - Field rules shared by the façade and the client forms

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod stores;
pub mod types;
pub mod validation;

pub use types::*;
