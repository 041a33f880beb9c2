//! Modification-time keyed cache in front of [`CatalogStore::load`].
//!
//! A cached catalog is reused only while the file's mtime and length are
//! unchanged, so callers always observe the current file contents.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use log::debug;
use moka::future::Cache;

use super::{Catalog, CatalogError, CatalogRecord, CatalogStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fingerprint {
    modified: SystemTime,
    len: u64,
}

#[derive(Clone)]
struct CachedCatalog<R> {
    fingerprint: Fingerprint,
    catalog: Arc<Catalog<R>>,
}

#[derive(Clone)]
pub struct CatalogCache<R: CatalogRecord> {
    store: CatalogStore,
    entries: Cache<PathBuf, CachedCatalog<R>>,
    enabled: bool,
}

impl<R: CatalogRecord> CatalogCache<R> {
    pub fn new(store: CatalogStore, enabled: bool) -> Self {
        let entries = Cache::builder()
            .time_to_live(Duration::from_secs(30 * 60))
            .max_capacity(16)
            .build();

        Self {
            store,
            entries,
            enabled,
        }
    }

    /// Same contract as [`CatalogStore::load`], served from cache when the
    /// file is unchanged.
    pub async fn get_or_load(&self, source: impl AsRef<Path>) -> Result<Arc<Catalog<R>>, CatalogError> {
        let path = self.store.resolve(source);
        if !self.enabled {
            return self.load_blocking(path).await.map(Arc::new);
        }

        let fingerprint = match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => meta.modified().ok().map(|modified| Fingerprint {
                modified,
                len: meta.len(),
            }),
            _ => {
                self.entries.invalidate(&path).await;
                return Err(CatalogError::NotFound(path));
            }
        };

        if let (Some(current), Some(entry)) = (fingerprint, self.entries.get(&path).await) {
            if entry.fingerprint == current {
                debug!("Catalog cache hit for {}", path.display());
                return Ok(entry.catalog);
            }
        }

        let catalog = Arc::new(self.load_blocking(path.clone()).await?);
        match fingerprint {
            Some(fingerprint) => {
                self.entries
                    .insert(
                        path,
                        CachedCatalog {
                            fingerprint,
                            catalog: catalog.clone(),
                        },
                    )
                    .await;
            }
            // Platforms without mtime support never cache.
            None => self.entries.invalidate(&path).await,
        }

        Ok(catalog)
    }

    /// Drop every cached catalog; the next lookup reparses its file.
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }

    /// `CatalogStore::load` on the blocking pool.
    async fn load_blocking(&self, path: PathBuf) -> Result<Catalog<R>, CatalogError> {
        let store = self.store.clone();
        let task_path = path.clone();
        tokio::task::spawn_blocking(move || store.load::<R>(&task_path))
            .await
            .map_err(|err| CatalogError::Io {
                path,
                source: std::io::Error::new(std::io::ErrorKind::Other, err),
            })?
    }
}
