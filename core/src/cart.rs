// orderform/src/cart.rs

//! Client-side cart: requested quantity per product id.
//!
//! Every stored quantity is positive. Selecting zero (or anything that is
//! not a positive integer) removes the product instead of storing zero.

use crate::catalog::Product;
use crate::error::CartError;
use crate::order::OrderItem;
use std::collections::HashMap;
use std::num::IntErrorKind;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
  entries: HashMap<String, u64>,
}

impl Cart {
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets the quantity from raw picker input.
  ///
  /// The input is trimmed and parsed as a non-negative integer. Anything
  /// else (empty, non-numeric, negative, fractional, zero) unsets the product.
  /// There is no upper bound; input beyond `u64::MAX` is kept at `u64::MAX`.
  pub fn set_quantity(&mut self, product_id: &str, raw_value: &str) {
    let raw = raw_value.trim();
    let parsed = match raw.parse::<u64>() {
      Ok(quantity) => quantity,
      Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
        warn!(product_id, raw, "Quantity overflows; clamping to the largest supported value.");
        u64::MAX
      }
      Err(_) => 0,
    };
    self.set_quantity_value(product_id, parsed);
  }

  pub fn set_quantity_value(&mut self, product_id: &str, quantity: u64) {
    if quantity == 0 {
      if self.entries.remove(product_id).is_some() {
        debug!(product_id, "Cart entry removed.");
      }
      return;
    }
    self.entries.insert(product_id.to_string(), quantity);
    debug!(product_id, quantity, "Cart entry set.");
  }

  pub fn quantity(&self, product_id: &str) -> Option<u64> {
    self.entries.get(product_id).copied()
  }

  pub fn total_quantity(&self) -> u64 {
    self.entries.values().fold(0u64, |total, &q| total.saturating_add(q))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn clear(&mut self) {
    self.entries.clear();
  }

  /// Checks the cart against the products offered to the current store and
  /// returns the items to send downstream.
  ///
  /// Items come back in the order `offered` yields them. Cart entries for
  /// products that are not offered are left out rather than rejected.
  pub fn validate_for_submission<'a, I>(&self, offered: I) -> Result<Vec<OrderItem>, CartError>
  where
    I: IntoIterator<Item = &'a Product>,
  {
    let mut items = Vec::with_capacity(self.entries.len());
    for product in offered {
      let Some(&requested) = self.entries.get(&product.id) else {
        continue;
      };
      if requested < u64::from(product.moq) {
        warn!(
          product_id = %product.id,
          requested,
          moq = product.moq,
          "Cart entry is below the minimum order quantity."
        );
        return Err(CartError::BelowMinimumOrderQuantity {
          product_id: product.id.clone(),
          product_name: product.name.clone(),
          moq: product.moq,
          requested,
        });
      }
      items.push(OrderItem {
        sku: product.id.clone(),
        qty: requested,
      });
    }

    let dropped = self.entries.len().saturating_sub(items.len());
    if dropped > 0 {
      debug!(
        dropped,
        "Cart entries for products not offered to this store were left out."
      );
    }
    Ok(items)
  }
}
