//! Events carried by the change bus.

use serde::{Deserialize, Serialize};

use crate::models::Product;

/// A committed mutation, published after the store flush succeeded.
///
/// `ProductsChanged` carries the full current product list to match the
/// existing consumer contract (realtime clients re-render the whole list).
/// Cart mutations are not broadcast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BusEvent {
    ProductsChanged { products: Vec<Product> },
}
