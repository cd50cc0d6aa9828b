//! Local cart commands.
//!
//! Drives a [`CartStore`] over a [`FileStorage`], so the CLI exercises the
//! same restore and write-through rules as the storefront.
//!
//! # Usage
//!
//! ```bash
//! palisade cart add --id p1 --name "Vinyl Picket" --price 45.00
//! palisade cart set p1 3
//! palisade cart show
//! palisade cart remove p1
//! palisade cart clear
//! ```

use std::path::Path;

use thiserror::Error;
use tracing::info;

use palisade_core::{
    CartError, CartStorage, CartStore, Price, PriceError, ProductId, ProductSnapshot,
    RestoreOutcome,
};

use crate::storage::FileStorage;

/// A cart operation requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    Show,
    Add {
        id: String,
        name: String,
        price: String,
        image: Option<String>,
    },
    Remove {
        id: String,
    },
    Set {
        id: String,
        quantity: i64,
    },
    Clear,
}

/// Errors from cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    #[error(transparent)]
    Cart(#[from] CartError),

    #[error("invalid --price: {0}")]
    Price(#[from] PriceError),
}

/// Run `command` against the cart stored at `cart_file`.
///
/// # Errors
///
/// Returns an error if the cart file cannot be read, or if the price of an
/// added product is not a number. An unreadable cart file is left untouched.
pub fn run(command: CartCommand, cart_file: &Path) -> Result<(), CartCommandError> {
    let mut cart = CartStore::new(FileStorage::new(cart_file));

    if cart.restore()? == RestoreOutcome::Discarded {
        tracing::warn!(path = %cart_file.display(), "Cart file was unreadable and has been reset");
    }

    apply(&mut cart, command)?;
    report(&cart);
    Ok(())
}

fn apply<S: CartStorage>(
    cart: &mut CartStore<S>,
    command: CartCommand,
) -> Result<(), CartCommandError> {
    match command {
        CartCommand::Show => {}
        CartCommand::Add {
            id,
            name,
            price,
            image,
        } => {
            let unit_price = Price::parse(&price)?.normalized();
            cart.add_item(ProductSnapshot {
                product_id: ProductId::new(id),
                name,
                unit_price: unit_price.to_string(),
                image_url: image,
            });
        }
        CartCommand::Remove { id } => cart.remove_item(&ProductId::new(id)),
        CartCommand::Set { id, quantity } => cart.set_quantity(&ProductId::new(id), quantity),
        CartCommand::Clear => cart.clear(),
    }
    Ok(())
}

fn report<S: CartStorage>(cart: &CartStore<S>) {
    if cart.is_empty() {
        info!("Cart is empty");
        return;
    }

    for item in cart.items() {
        info!(
            "  {} x {} ({}) @ {} = {}",
            item.quantity,
            item.name,
            item.product_id,
            item.unit_price,
            item.line_total()
        );
    }
    info!(
        "Total: {} items, {}",
        cart.total_item_count(),
        cart.total_price()
    );
}
