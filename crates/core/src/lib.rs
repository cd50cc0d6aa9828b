//! Palisade Core - Shared types and the shopping cart store.
//!
//! This crate provides the domain pieces used across all Palisade components:
//! - `storefront` - Public-facing catalog and cart HTTP API
//! - `cli` - Command-line tools for seeding and local cart management
//!
//! # Architecture
//!
//! The core crate contains only types, traits and in-memory state - no network
//! clients, no database access. Persistence of the cart goes through the
//! [`cart::CartStorage`] trait, which each binary implements over its own
//! surface (browser session, local file).
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices
//! - [`cart`] - Cart line items, the cart store and its persistence contract

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{
    CART_RECORD_KEY, CartError, CartLineItem, CartStorage, CartStore, MemoryStorage,
    ProductSnapshot, RestoreOutcome, RestoreState, StorageError,
};
pub use types::*;
