//! Core types for the GameArena shop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;

pub use id::*;
pub use price::{format_inr, line_total};
pub use product::{CatalogProduct, CategoryRef, DisplayFields};
