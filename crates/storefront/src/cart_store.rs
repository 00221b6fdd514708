//! Session cart store.
//!
//! [`CartStore`] owns the cart for one shop session and mirrors it into a
//! [`LocalStorage`] backend under [`CART_STORAGE_KEY`].
//!
//! # Persistence protocol
//!
//! - Every mutation runs the pure transition on [`Cart`] first, then calls
//!   [`CartStore::persist`].
//! - A non-empty cart is written as a JSON array of line items. An empty cart
//!   deletes the key, so "no key" and "empty cart" are the same state.
//! - Storage failures are logged and swallowed. The in-memory cart stays
//!   authoritative for the rest of the session.
//!
//! # Initialization
//!
//! [`CartStore::initialize`] reads the key once. A snapshot that does not
//! parse is deleted and the session starts empty; the caller learns which
//! path was taken from the returned [`InitOutcome`].

use gamearena_core::cart::CartChange;
use gamearena_core::{Cart, CatalogProduct, LineItem, ProductId};
use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

use crate::storage::LocalStorage;

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "gameArenaCart";

/// How the cart was obtained at session start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// A stored snapshot was loaded.
    Restored { lines: usize },
    /// Nothing was stored (or the stored cart was empty).
    Fresh,
    /// The stored snapshot did not parse and was deleted.
    Discarded { reason: String },
    /// Storage could not be read; the session starts empty.
    Unreadable { reason: String },
}

/// Result of mirroring the cart into storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    /// The snapshot was written.
    Written { bytes: usize },
    /// The cart is empty and the key was deleted.
    Removed,
    /// Storage rejected the write or delete.
    Failed { reason: String },
}

/// The cart for one shop session.
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    storage: S,
}

impl<S: LocalStorage> CartStore<S> {
    /// Load the session cart from `storage`.
    ///
    /// Never fails: unreadable storage and corrupt snapshots both yield an
    /// empty cart, distinguished by the returned [`InitOutcome`].
    #[instrument(skip(storage))]
    pub fn initialize(storage: S) -> (Self, InitOutcome) {
        let raw = match storage.get_item(CART_STORAGE_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to read stored cart, starting empty");
                let store = Self::with_cart(Cart::new(), storage);
                return (
                    store,
                    InitOutcome::Unreadable {
                        reason: e.to_string(),
                    },
                );
            }
        };

        let Some(raw) = raw else {
            debug!("No stored cart");
            return (Self::with_cart(Cart::new(), storage), InitOutcome::Fresh);
        };

        match serde_json::from_str::<Cart>(&raw) {
            Ok(cart) if cart.is_empty() => {
                let store = Self::with_cart(cart, storage);
                store.persist();
                (store, InitOutcome::Fresh)
            }
            Ok(cart) => {
                let lines = cart.len();
                debug!(lines, "Restored stored cart");
                let store = Self::with_cart(cart, storage);
                // Rewrites the snapshot in normalized form (duplicate ids merged).
                store.persist();
                (store, InitOutcome::Restored { lines })
            }
            Err(e) => {
                warn!(error = %e, "Stored cart is corrupt, discarding it");
                if let Err(remove_err) = storage.remove_item(CART_STORAGE_KEY) {
                    warn!(error = %remove_err, "Failed to delete corrupt cart snapshot");
                }
                (
                    Self::with_cart(Cart::new(), storage),
                    InitOutcome::Discarded {
                        reason: e.to_string(),
                    },
                )
            }
        }
    }

    const fn with_cart(cart: Cart, storage: S) -> Self {
        Self { cart, storage }
    }

    /// Add `quantity` units of `product` and persist.
    ///
    /// A product already in the cart keeps its original price; only its
    /// quantity grows.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add(&mut self, product: &CatalogProduct, quantity: u32) -> CartChange {
        let change = self.cart.add(product, quantity);
        debug!(?change, "add");
        self.persist();
        change
    }

    /// Remove the line for `id` (no-op if absent) and persist.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn remove(&mut self, id: &ProductId) -> CartChange {
        let change = self.cart.remove(id);
        debug!(?change, "remove");
        self.persist();
        change
    }

    /// Set the quantity for `id` and persist. Zero or below removes the line;
    /// an absent id is left absent.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> CartChange {
        let change = self.cart.set_quantity(id, quantity);
        debug!(?change, "set_quantity");
        self.persist();
        change
    }

    /// Empty the cart and delete the stored snapshot.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> CartChange {
        let change = self.cart.clear();
        debug!(?change, "clear");
        self.persist();
        change
    }

    /// Mirror the current cart into storage.
    ///
    /// Called after every mutation. Failures are logged, never returned as
    /// errors.
    pub fn persist(&self) -> PersistOutcome {
        if self.cart.is_empty() {
            return match self.storage.remove_item(CART_STORAGE_KEY) {
                Ok(()) => PersistOutcome::Removed,
                Err(e) => {
                    warn!(error = %e, "Failed to delete stored cart");
                    PersistOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            };
        }

        let snapshot = match serde_json::to_string(&self.cart) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "Failed to serialize cart");
                return PersistOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        match self.storage.set_item(CART_STORAGE_KEY, &snapshot) {
            Ok(()) => PersistOutcome::Written {
                bytes: snapshot.len(),
            },
            Err(e) => {
                warn!(error = %e, "Failed to save cart, keeping in-memory state");
                PersistOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// Current quantity for `id`, if present.
    #[must_use]
    pub fn quantity(&self, id: &ProductId) -> Option<u32> {
        self.cart.quantity(id)
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.cart.total_item_count()
    }

    /// Sum of `quantity * unit_price` across all lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.cart.total_price()
    }

    /// The storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }
}
