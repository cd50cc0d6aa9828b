//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart` - Session-backed shopping cart

pub mod cart;

pub use cart::SessionCart;
