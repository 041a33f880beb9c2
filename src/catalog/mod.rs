//! Catalog module - in-memory record catalogs loaded from CSV files.
//!
//! - `record` - record shapes (`Product`, `Vehicle`) and row conversion
//! - `loader` - `CatalogStore::load`, rebuilt from the file on every call
//! - `search` - case-insensitive substring search in catalog order
//! - `cache` - optional mtime-keyed cache in front of the loader

pub mod cache;
pub mod loader;
pub mod record;
pub mod search;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use cache::CatalogCache;
pub use loader::CatalogStore;
pub use record::{CatalogRecord, Product, Vehicle};
pub use search::{effective_limit, search};

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read catalog file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog file {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Identifier → record mapping that iterates in insertion order.
///
/// Re-inserting an existing identifier replaces the record in place.
#[derive(Debug, Clone)]
pub struct Catalog<R> {
    records: Vec<R>,
    index: HashMap<String, usize>,
    source: PathBuf,
}

impl<R: CatalogRecord> Catalog<R> {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
            source: source.into(),
        }
    }

    pub fn insert(&mut self, record: R) {
        let id = record.identifier();
        match self.index.get(&id) {
            Some(&position) => self.records[position] = record,
            None => {
                self.index.insert(id, self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn get(&self, identifier: &str) -> Option<&R> {
        self.index.get(identifier).map(|&i| &self.records[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolved path the catalog was loaded from.
    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl<R: CatalogRecord> FromIterator<R> for Catalog<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let mut catalog = Catalog::new(PathBuf::new());
        for record in iter {
            catalog.insert(record);
        }
        catalog
    }
}

impl<'a, R> IntoIterator for &'a Catalog<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(sku: &str, name: &str) -> Product {
        Product {
            sku: sku.to_string(),
            name: name.to_string(),
            unit: "шт".to_string(),
            unit_price: 1.0,
            description: String::new(),
        }
    }

    #[test]
    fn test_insert_keeps_order() {
        let catalog: Catalog<Product> =
            vec![product("B", "second"), product("A", "first")].into_iter().collect();
        let skus: Vec<_> = catalog.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, vec!["B", "A"]);
    }

    #[test]
    fn test_duplicate_identifier_replaces_in_place() {
        let catalog: Catalog<Product> = vec![
            product("A", "old"),
            product("B", "other"),
            product("A", "new"),
        ]
        .into_iter()
        .collect();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.iter().next().unwrap().name, "new");
        assert_eq!(catalog.get("A").unwrap().name, "new");
    }
}
