use thiserror::Error;

use jam_types::{StateEntries, StateKey};
use utils::trie::MerkleTrie;

pub mod ancestors;
pub mod serialized;

pub use ancestors::{Ancestors, HeaderChain};
pub use serialized::{SerializedState, StateError};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("backend failure: {0}")]
    Backend(String),
}

/// Persistence contract. Anything able to answer point lookups by state key can back a `SerializedState`.
pub trait StateBackend {
    fn get(&self, key: &StateKey) -> Result<Option<Vec<u8>>, StorageError>;
}

impl StateBackend for StateEntries {
    fn get(&self, key: &StateKey) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.map.get(key).cloned())
    }
}

// Trie and persistence share the same key space
impl StateBackend for MerkleTrie {
    fn get(&self, key: &StateKey) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(MerkleTrie::get(self, key).cloned())
    }
}

#[cfg(feature = "DB")]
impl StateBackend for database::Kv {
    fn get(&self, key: &StateKey) -> Result<Option<Vec<u8>>, StorageError> {
        database::Kv::get(self, key).map_err(|error| StorageError::Backend(error.to_string()))
    }
}

impl<B: StateBackend + ?Sized> StateBackend for &B {
    fn get(&self, key: &StateKey) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key)
    }
}
