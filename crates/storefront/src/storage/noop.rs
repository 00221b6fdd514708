//! Storage backend for environments with nowhere to persist.

use super::{LocalStorage, StorageError};

/// Accepts every write and remembers nothing.
///
/// Used when the shop runs without a durable store: the cart still works for
/// the session, and a new session always starts empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStorage;

impl LocalStorage for NoopStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Ok(())
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}
