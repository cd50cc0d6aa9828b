//! Persistence contract for the cart record.
//!
//! A cart is persisted as one named record holding the serialized line-item
//! collection. Each surface that can hold such a record (a browser session, a
//! local file, memory) implements [`CartStorage`].

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use thiserror::Error;

/// Name of the cart record in keyed surfaces (session stores, files).
pub const CART_RECORD_KEY: &str = "cart";

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A lock guarding the record was poisoned.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A single-record key-value surface for the serialized cart.
pub trait CartStorage {
    /// Read the persisted record, `Ok(None)` if there is none.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Replace the persisted record.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn save(&self, record: &str) -> Result<(), StorageError>;
}

impl<T: CartStorage + ?Sized> CartStorage for &T {
    fn load(&self) -> Result<Option<String>, StorageError> {
        (**self).load()
    }

    fn save(&self, record: &str) -> Result<(), StorageError> {
        (**self).save(record)
    }
}

impl<T: CartStorage + ?Sized> CartStorage for Arc<T> {
    fn load(&self) -> Result<Option<String>, StorageError> {
        (**self).load()
    }

    fn save(&self, record: &str) -> Result<(), StorageError> {
        (**self).save(record)
    }
}

/// In-memory record holder.
///
/// Clones share the same record, so a caller can hand one clone to a
/// [`CartStore`](super::CartStore) and inspect what was written through
/// another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<MemoryStorageInner>,
}

#[derive(Debug, Default)]
struct MemoryStorageInner {
    record: RwLock<Option<String>>,
    writes: AtomicUsize,
}

impl MemoryStorage {
    /// Create an empty storage (no record).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-seeded with a record.
    #[must_use]
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(MemoryStorageInner {
                record: RwLock::new(Some(record.into())),
                writes: AtomicUsize::new(0),
            }),
        }
    }

    /// Snapshot of the current record.
    #[must_use]
    pub fn record(&self) -> Option<String> {
        self.inner
            .record
            .read()
            .ok()
            .and_then(|guard| guard.clone())
    }

    /// Number of successful `save` calls.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    /// Drop the record, as an external storage wipe would.
    pub fn wipe(&self) {
        if let Ok(mut guard) = self.inner.record.write() {
            *guard = None;
        }
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        let guard = self
            .inner
            .record
            .read()
            .map_err(|_| StorageError::Poisoned)?;
        Ok(guard.clone())
    }

    fn save(&self, record: &str) -> Result<(), StorageError> {
        let mut guard = self
            .inner
            .record
            .write()
            .map_err(|_| StorageError::Poisoned)?;
        *guard = Some(record.to_owned());
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
