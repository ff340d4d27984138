// orderform/src/catalog.rs

//! The product catalog and the store visibility rule.
//!
//! A [`Catalog`] is loaded once at startup (from JSON) and never mutated.
//! Which products a given store sees is decided by its visibility rule:
//! stores listed in a group see that group's products, every other store
//! sees the default list.

use crate::error::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// Sentinel used when the page was opened without a store parameter.
pub const DEFAULT_STORE_CODE: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
  /// Back-office SKU. Never shown to the user.
  pub id: String,
  pub name: String,
  /// Minimum order quantity; always positive.
  pub moq: u32,
  /// Advisory quantities offered by the picker. Not enforced.
  #[serde(default)]
  pub quantity_options: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityGroup {
  pub name: String,
  pub stores: Vec<String>,
  pub products: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityRule {
  pub default: Vec<String>,
  #[serde(default)]
  pub groups: Vec<VisibilityGroup>,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
  products: Vec<Product>,
  visibility: VisibilityRule,
}

#[derive(Debug, Clone)]
pub struct Catalog {
  products: Vec<Product>,
  index: HashMap<String, usize>,
  visibility: VisibilityRule,
}

impl Catalog {
  /// Builds a catalog, checking every invariant the form relies on.
  pub fn new(products: Vec<Product>, visibility: VisibilityRule) -> CatalogResult<Self> {
    let mut index = HashMap::with_capacity(products.len());
    for (idx, product) in products.iter().enumerate() {
      if product.moq == 0 {
        return Err(CatalogError::ZeroMinimum {
          product_id: product.id.clone(),
        });
      }
      let ascending = product.quantity_options.windows(2).all(|w| w[0] < w[1]);
      if !ascending || product.quantity_options.first() == Some(&0) {
        return Err(CatalogError::InvalidQuantityOptions {
          product_id: product.id.clone(),
        });
      }
      if index.insert(product.id.clone(), idx).is_some() {
        return Err(CatalogError::DuplicateProduct {
          product_id: product.id.clone(),
        });
      }
    }

    if visibility.default.is_empty() {
      return Err(CatalogError::EmptyDefaultVisibility);
    }
    let rules = std::iter::once(("default", &visibility.default))
      .chain(visibility.groups.iter().map(|g| (g.name.as_str(), &g.products)));
    for (rule, ids) in rules {
      if let Some(missing) = ids.iter().find(|id| !index.contains_key(id.as_str())) {
        return Err(CatalogError::UnknownProduct {
          rule: rule.to_string(),
          product_id: missing.clone(),
        });
      }
    }

    Ok(Self {
      products,
      index,
      visibility,
    })
  }

  pub fn from_json_str(raw: &str) -> CatalogResult<Self> {
    let file: CatalogFile = serde_json::from_str(raw).map_err(|source| CatalogError::Parse { source })?;
    Self::new(file.products, file.visibility)
  }

  pub fn from_path(path: impl AsRef<Path>) -> CatalogResult<Self> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
      path: path.display().to_string(),
      source,
    })?;
    let catalog = Self::from_json_str(&raw)?;
    tracing::info!(path = %path.display(), products = catalog.len(), "Catalog loaded from file.");
    Ok(catalog)
  }

  /// The catalog compiled into the crate.
  pub fn builtin() -> CatalogResult<Self> {
    Self::from_json_str(BUILTIN_CATALOG)
  }

  pub fn get(&self, product_id: &str) -> Option<&Product> {
    self.index.get(product_id).map(|&idx| &self.products[idx])
  }

  pub fn products(&self) -> &[Product] {
    &self.products
  }

  pub fn len(&self) -> usize {
    self.products.len()
  }

  pub fn is_empty(&self) -> bool {
    self.products.is_empty()
  }

  /// Products visible to `store`, in the order the rule lists them.
  pub fn visible_for(&self, store: &StoreCode) -> Vec<&Product> {
    let ids = self
      .visibility
      .groups
      .iter()
      .find(|group| group.stores.iter().any(|s| s == store.as_str()))
      .map(|group| &group.products)
      .unwrap_or(&self.visibility.default);

    // Ids were checked against the index in `new`.
    ids.iter().filter_map(|id| self.get(id)).collect()
  }
}

/// Query parameters that select a store, as they arrive on the page URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreSelection {
  pub store_code: Option<String>,
  pub store_id: Option<String>,
}

impl StoreSelection {
  /// `store_code` wins over `store_id`; blank values count as absent.
  pub fn resolve(&self) -> StoreCode {
    let pick = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(String::from);
    pick(&self.store_code)
      .or_else(|| pick(&self.store_id))
      .map(StoreCode)
      .unwrap_or_default()
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StoreCode(String);

impl StoreCode {
  pub fn new(code: impl Into<String>) -> Self {
    StoreCode(code.into())
  }

  /// Reads the store from a raw query string such as `store_code=HN_Robson&x=1`.
  /// A leading `?` is accepted. Unparseable input falls back to the default store.
  pub fn from_query(query: &str) -> Self {
    let query = query.strip_prefix('?').unwrap_or(query);
    match serde_urlencoded::from_str::<StoreSelection>(query) {
      Ok(selection) => selection.resolve(),
      Err(e) => {
        tracing::warn!(error = %e, "Store query could not be parsed; using default store.");
        StoreCode::default()
      }
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn is_default(&self) -> bool {
    self.0 == DEFAULT_STORE_CODE
  }
}

impl Default for StoreCode {
  fn default() -> Self {
    StoreCode(DEFAULT_STORE_CODE.to_string())
  }
}

impl fmt::Display for StoreCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}
