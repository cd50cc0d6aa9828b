//! Shopping cart state.
//!
//! The [`CartStore`] owns the line items of one browser's cart. It is built
//! once per cart, restored from a [`CartStorage`] record, and then writes the
//! full collection back through that storage after every mutation.
//!
//! ```text
//! Uninitialized --begin_restore--> Restoring --finish_restore--> Ready
//!        (writes suppressed)         (writes suppressed)     (write-through)
//! ```

mod item;
mod storage;
mod store;

use thiserror::Error;

pub use item::{CartLineItem, ProductSnapshot};
pub use storage::{CART_RECORD_KEY, CartStorage, MemoryStorage, StorageError};
pub use store::{CartStore, RestoreOutcome, RestoreState};

/// Errors raised by the restore protocol.
///
/// Cart mutations themselves never fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// `begin_restore` was called after the store already left `Uninitialized`.
    #[error("cart restore already started (state: {0:?})")]
    RestoreAlreadyStarted(RestoreState),

    /// `finish_restore` was called while no restore was in progress.
    #[error("cart is not restoring (state: {0:?})")]
    NotRestoring(RestoreState),

    /// The persisted record could not be read; write-through stays disarmed.
    #[error("failed to read cart record: {0}")]
    Load(String),
}
