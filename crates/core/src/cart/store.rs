//! The cart store: line items, restore protocol and write-through.

use tracing::{debug, warn};

use super::CartError;
use super::item::{CartLineItem, ProductSnapshot};
use super::storage::CartStorage;
use crate::types::{Price, ProductId};

/// Where the store is in its one-time restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestoreState {
    /// Constructed; nothing has been read from storage yet.
    #[default]
    Uninitialized,
    /// A restore is in flight; write-through is suppressed.
    Restoring,
    /// Restore finished; every mutation is written through.
    Ready,
}

/// What `finish_restore` found in the persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// No record existed; the in-memory collection was kept.
    Empty,
    /// The record was decoded and replaced the collection.
    Restored {
        /// Number of line items after restore.
        lines: usize,
    },
    /// The record could not be decoded and was dropped.
    Discarded,
}

/// Single source of truth for one shopping cart.
///
/// Reads are always served from memory. Mutations update memory immediately
/// and, once the store is [`RestoreState::Ready`], persist the whole
/// collection through `S`. Until then nothing is written, so an empty
/// in-memory cart can never clobber a record that has not been read yet.
///
/// ```
/// use palisade_core::{CartStore, MemoryStorage, Price, ProductId, ProductSnapshot};
///
/// let storage = MemoryStorage::new();
/// let mut cart = CartStore::new(storage.clone());
/// cart.restore().unwrap();
///
/// let fence = ProductSnapshot {
///     product_id: ProductId::new("p1"),
///     name: "Fence A".to_string(),
///     unit_price: "45.00".to_string(),
///     image_url: None,
/// };
/// cart.add_item(fence.clone());
/// cart.add_item(fence);
///
/// assert_eq!(cart.total_item_count(), 2);
/// assert_eq!(cart.total_price(), Price::from_cents(9_000));
/// assert!(storage.record().is_some());
/// ```
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    items: Vec<CartLineItem>,
    state: RestoreState,
}

impl<S: CartStorage> CartStore<S> {
    /// Create an empty, not yet restored store over `storage`.
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self {
            storage,
            items: Vec::new(),
            state: RestoreState::Uninitialized,
        }
    }

    /// Current restore state.
    #[must_use]
    pub const fn state(&self) -> RestoreState {
        self.state
    }

    /// Whether restore has completed and write-through is armed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state == RestoreState::Ready
    }

    // =========================================================================
    // Restore protocol
    // =========================================================================

    /// Run the whole restore: read the record from storage and adopt it.
    ///
    /// If the record cannot be read the store stays
    /// [`RestoreState::Restoring`], so write-through is never armed over a
    /// record that may still exist.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::RestoreAlreadyStarted`] if the store was already
    /// restored (or is restoring), or [`CartError::Load`] if storage could not
    /// be read.
    pub fn restore(&mut self) -> Result<RestoreOutcome, CartError> {
        self.begin_restore()?;

        let record = self.storage.load().map_err(|e| {
            warn!(error = %e, "Failed to read cart record, write-through stays off");
            CartError::Load(e.to_string())
        })?;

        self.finish_restore(record)
    }

    /// Enter [`RestoreState::Restoring`].
    ///
    /// Use this with [`finish_restore`](Self::finish_restore) when the record
    /// is fetched asynchronously by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::RestoreAlreadyStarted`] unless the store is
    /// [`RestoreState::Uninitialized`].
    pub fn begin_restore(&mut self) -> Result<(), CartError> {
        if self.state != RestoreState::Uninitialized {
            return Err(CartError::RestoreAlreadyStarted(self.state));
        }
        self.state = RestoreState::Restoring;
        Ok(())
    }

    /// Adopt the fetched record (if any), become ready and persist once.
    ///
    /// A record that does not decode is discarded and the cart starts empty.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotRestoring`] unless `begin_restore` was called.
    pub fn finish_restore(&mut self, record: Option<String>) -> Result<RestoreOutcome, CartError> {
        if self.state != RestoreState::Restoring {
            return Err(CartError::NotRestoring(self.state));
        }

        let outcome = match record {
            None => RestoreOutcome::Empty,
            Some(raw) => match serde_json::from_str::<Vec<CartLineItem>>(&raw) {
                Ok(lines) => {
                    self.items = merge_lines(lines);
                    RestoreOutcome::Restored {
                        lines: self.items.len(),
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Discarding malformed cart record");
                    self.items.clear();
                    RestoreOutcome::Discarded
                }
            },
        };

        self.state = RestoreState::Ready;
        debug!(?outcome, lines = self.items.len(), "Cart restored");
        self.persist();

        Ok(outcome)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of `product`.
    ///
    /// An existing line only has its quantity bumped; its name and price stay
    /// as they were when the product was first added.
    pub fn add_item(&mut self, product: ProductSnapshot) {
        if let Some(line) = self.line_mut(&product.product_id) {
            line.quantity = line.quantity.saturating_add(1);
            debug!(product_id = %product.product_id, quantity = line.quantity, "Incremented cart line");
        } else {
            debug!(product_id = %product.product_id, "Added cart line");
            self.items.push(CartLineItem::from_snapshot(product));
        }
        self.persist();
    }

    /// Remove the line for `product_id`; does nothing if it is absent.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        let before = self.items.len();
        self.items.retain(|line| &line.product_id != product_id);
        if self.items.len() != before {
            debug!(%product_id, "Removed cart line");
        }
        self.persist();
    }

    /// Set the quantity of an existing line.
    ///
    /// Zero or negative removes the line. Unknown ids are ignored.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity;
            debug!(%product_id, quantity, "Set cart line quantity");
        }
        self.persist();
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        debug!("Cleared cart");
        self.persist();
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Look up the line for `product_id`.
    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|line| &line.product_id == product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities. Zero until restore has completed.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        if !self.is_ready() {
            return 0;
        }
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of `unit_price × quantity`. Zero until restore has completed.
    #[must_use]
    pub fn total_price(&self) -> Price {
        if !self.is_ready() {
            return Price::ZERO;
        }
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLineItem> {
        self.items
            .iter_mut()
            .find(|line| &line.product_id == product_id)
    }

    /// Write the full collection through, if restore has completed.
    fn persist(&self) {
        if !self.is_ready() {
            return;
        }

        let record = match serde_json::to_string(&self.items) {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "Failed to serialize cart");
                return;
            }
        };

        if let Err(e) = self.storage.save(&record) {
            warn!(error = %e, "Failed to persist cart");
        }
    }
}

/// Fold duplicate ids together and drop zero-quantity lines, keeping the
/// order in which each id first appears.
fn merge_lines(lines: Vec<CartLineItem>) -> Vec<CartLineItem> {
    let mut merged: Vec<CartLineItem> = Vec::with_capacity(lines.len());
    for line in lines {
        if line.quantity == 0 {
            continue;
        }
        if let Some(existing) = merged
            .iter_mut()
            .find(|m| m.product_id == line.product_id)
        {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
        } else {
            merged.push(line);
        }
    }
    merged
}
