//! Session-backed cart.
//!
//! The browser session plays the role of the per-browser key-value store: the
//! cart record lives under [`CART_RECORD_KEY`] as the JSON array text the
//! [`CartStore`] writes. Each request restores its own store from that record,
//! mutates it, and writes the record back only when it changed.

use serde_json::Value;
use tower_sessions::Session;

use palisade_core::{CART_RECORD_KEY, CartStore, MemoryStorage, RestoreOutcome};

use crate::error::Result;

/// A cart restored from the current session.
pub struct SessionCart {
    session: Session,
    loaded: Option<String>,
    storage: MemoryStorage,
    store: CartStore<MemoryStorage>,
}

impl SessionCart {
    /// Restore the cart held by `session`.
    ///
    /// Malformed records are replaced by an empty cart on the next
    /// [`commit`](Self::commit).
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn load(session: Session) -> Result<Self> {
        let loaded = match session.get_value(CART_RECORD_KEY).await? {
            None | Some(Value::Null) => None,
            Some(Value::String(record)) => Some(record),
            Some(other) => Some(other.to_string()),
        };

        let storage = loaded
            .as_deref()
            .map_or_else(MemoryStorage::new, MemoryStorage::with_record);
        let mut store = CartStore::new(storage.clone());

        if store.restore()? == RestoreOutcome::Discarded {
            tracing::warn!(
                session_id = ?session.id(),
                "Session cart record was malformed and has been reset"
            );
        }

        Ok(Self {
            session,
            loaded,
            storage,
            store,
        })
    }

    /// The restored cart.
    #[must_use]
    pub const fn cart(&self) -> &CartStore<MemoryStorage> {
        &self.store
    }

    /// The restored cart, for mutation.
    pub const fn cart_mut(&mut self) -> &mut CartStore<MemoryStorage> {
        &mut self.store
    }

    /// Write the cart record back to the session if it changed.
    ///
    /// A visitor without a record and with an empty cart gets no session
    /// entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be written.
    pub async fn commit(&self) -> Result<()> {
        let current = self.storage.record();
        if current == self.loaded || (self.loaded.is_none() && self.store.is_empty()) {
            return Ok(());
        }

        if let Some(record) = current {
            self.session.insert(CART_RECORD_KEY, record).await?;
        }
        Ok(())
    }
}
