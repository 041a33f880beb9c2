//! Substring search over a loaded catalog.

use super::{Catalog, CatalogRecord};

/// Requested limit coerced to at least 1.
pub fn effective_limit(limit: i64) -> usize {
    usize::try_from(limit.max(1)).unwrap_or(usize::MAX)
}

/// First `limit` records (in catalog order) whose designated text fields
/// contain `query`, case-insensitively.
///
/// An empty query yields no results. Scanning stops once the limit is reached.
pub fn search<R: CatalogRecord>(query: &str, limit: i64, catalog: &Catalog<R>) -> Vec<R> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    catalog
        .iter()
        .filter(|record| record.matches(&needle))
        .take(effective_limit(limit))
        .cloned()
        .collect()
}
