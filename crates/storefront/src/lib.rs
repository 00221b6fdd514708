//! GameArena Storefront library.
//!
//! The customer-facing side of the shop: the session cart and the pieces
//! around it.
//!
//! # Modules
//!
//! - [`cart_store`] - Session cart mirrored to durable local storage
//! - [`storage`] - Local key/value storage backends (memory, file, no-op)
//! - [`catalog`] - HTTP client for the product API, plus shop-page queries
//! - [`views`] - Display models for the cart page, badge and product pages
//! - [`state`] - The per-session context handed to consumers
//! - [`config`] - Environment configuration
//! - [`error`] - Application-level errors

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart_store;
pub mod catalog;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;
pub mod views;

pub use cart_store::{CART_STORAGE_KEY, CartStore, InitOutcome, PersistOutcome};
pub use state::ShopSession;
