//! GameArena Core - Shared types library.
//!
//! This crate provides the types used across the GameArena shop components:
//! - `storefront` - Cart store, local storage backends, catalog client, views
//! - `cli` - Command-line shop front-end
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O, no
//! storage access, no HTTP clients. Persisting a cart is the caller's job.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product/category IDs, prices, catalog records
//! - [`cart`] - Line items and the pure cart transitions (add, remove, set quantity, clear)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, LineItem};
pub use types::*;
