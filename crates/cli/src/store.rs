//! Durable client storage.
//!
//! A [`Storage`] is a flat string key-value store. [`FileStorage`] keeps one
//! `<key>.json` file per key inside a data directory; [`MemoryStorage`] keeps
//! everything in a map for tests. [`PersistedStore`] binds one
//! [`PersistedState`] to a storage and rewrites it after every mutation.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use dashcart_core::stores::{AuthState, CartState, OrderHistory, PersistedState, SessionCookie};
use thiserror::Error;

/// Errors raised while reading or writing persisted state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access storage key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Stored value for '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// String key-value storage.
pub trait Storage: Send + Sync {
    /// The raw value under `key`, or `None` if nothing was stored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the backing medium cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the backing medium cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_owned(),
                source,
            }),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            key: key.to_owned(),
            source,
        };
        std::fs::create_dir_all(&self.dir).map_err(io_err)?;
        std::fs::write(self.path(key), value).map_err(io_err)
    }
}

/// In-memory storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// A state container kept in sync with its storage key.
pub struct PersistedStore<T: PersistedState> {
    storage: Arc<dyn Storage>,
    state: T,
}

impl<T: PersistedState> PersistedStore<T> {
    /// Re-hydrate from storage. A missing key yields `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Corrupt` if the stored JSON does not match `T`.
    pub fn hydrate(storage: Arc<dyn Storage>) -> Result<Self, StoreError> {
        let state = match storage.get_item(T::STORAGE_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                key: T::STORAGE_KEY.to_owned(),
                source,
            })?,
            None => T::default(),
        };
        Ok(Self { storage, state })
    }

    /// Current state.
    pub const fn get(&self) -> &T {
        &self.state
    }

    /// Mutate the state, then persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be written. The in-memory
    /// state keeps the mutation.
    pub fn update<R>(&mut self, mutate: impl FnOnce(&mut T) -> R) -> Result<R, StoreError> {
        let result = mutate(&mut self.state);
        self.persist()?;
        Ok(result)
    }

    /// Replace the state, then persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be written.
    pub fn set(&mut self, state: T) -> Result<(), StoreError> {
        self.state = state;
        self.persist()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.state).map_err(|source| StoreError::Corrupt {
            key: T::STORAGE_KEY.to_owned(),
            source,
        })?;
        self.storage.set_item(T::STORAGE_KEY, &raw)?;
        tracing::debug!(key = T::STORAGE_KEY, "State persisted");
        Ok(())
    }
}

/// Every persisted client store, sharing one storage.
pub struct Stores {
    pub auth: PersistedStore<AuthState>,
    pub cart: PersistedStore<CartState>,
    pub orders: PersistedStore<OrderHistory>,
    pub cookie: PersistedStore<Option<SessionCookie>>,
}

impl Stores {
    /// Re-hydrate all stores from `storage`.
    ///
    /// # Errors
    ///
    /// Returns the first store that fails to load.
    pub fn open(storage: Arc<dyn Storage>) -> Result<Self, StoreError> {
        Ok(Self {
            auth: PersistedStore::hydrate(Arc::clone(&storage))?,
            cart: PersistedStore::hydrate(Arc::clone(&storage))?,
            orders: PersistedStore::hydrate(Arc::clone(&storage))?,
            cookie: PersistedStore::hydrate(storage)?,
        })
    }
}
