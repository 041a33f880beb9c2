//! Catalog loading from delimited text files.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::{Catalog, CatalogError, CatalogRecord};

/// Loads catalogs relative to a fixed base directory.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    base_dir: PathBuf,
}

impl CatalogStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Relative paths are joined onto the base directory, never the cwd.
    pub fn resolve(&self, source: impl AsRef<Path>) -> PathBuf {
        let source = source.as_ref();
        if source.is_absolute() {
            source.to_path_buf()
        } else {
            self.base_dir.join(source)
        }
    }

    /// Parse the file into a fresh catalog.
    ///
    /// Rows without an identifier are skipped and unparseable numbers become 0,
    /// so the only hard failures are a missing file or broken CSV framing.
    pub fn load<R: CatalogRecord>(
        &self,
        source: impl AsRef<Path>,
    ) -> Result<Catalog<R>, CatalogError> {
        let path = self.resolve(source);
        if !path.is_file() {
            return Err(CatalogError::NotFound(path));
        }

        let content = fs::read_to_string(&path).map_err(|source| CatalogError::Io {
            path: path.clone(),
            source,
        })?;
        let content = content.trim_start_matches('\u{feff}');

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(sniff_delimiter(content))
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut catalog = Catalog::new(path.clone());
        let mut skipped = 0usize;
        for row in reader.deserialize::<R::Row>() {
            let row = row.map_err(|source| CatalogError::Csv {
                path: path.clone(),
                source,
            })?;
            match R::from_row(row) {
                Some(record) => catalog.insert(record),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!("Skipped {} rows without identifier in {}", skipped, path.display());
        }
        info!("Loaded {} records from {}", catalog.len(), path.display());

        Ok(catalog)
    }
}

/// `;` when the header uses it and has no commas, `\t` likewise, else `,`.
fn sniff_delimiter(content: &str) -> u8 {
    let header = content.lines().next().unwrap_or_default();
    if header.contains(',') {
        b','
    } else if header.contains(';') {
        b';'
    } else if header.contains('\t') {
        b'\t'
    } else {
        b','
    }
}
