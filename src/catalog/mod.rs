//! The store table: import, spatial refinement, visit tracking and queries.
//!
//! The catalog lives in a single JSON file. Every change writes the complete
//! new store set to a temporary file next to it and renames it into place, so
//! readers see either the old catalog or the new one.

use std::{
    collections::HashMap,
    fs::{self, read_to_string},
    io::{self, Write},
    path::{Path, PathBuf},
};

use _model::{StoreId, StoreRecord};
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::{address, spatial::SpatialResolver, utils::progress_bar};

mod error;
pub mod listing;
mod query;

pub use error::{CatalogError, Result};
pub use listing::ListingRow;
pub use query::StoreFilter;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReloadSummary {
    pub imported: usize,
    /// Rows outside the city.
    pub dropped: usize,
    /// Stores whose visited flag was carried over from the previous catalog.
    pub restored: usize,
    pub unclassified: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RefineSummary {
    pub matched: usize,
    pub unmatched: usize,
    /// Stores without coordinates.
    pub skipped: usize,
}

pub struct Catalog {
    path: PathBuf,
    stores: Vec<StoreRecord>,
}

impl Catalog {
    /// Opens the catalog at `path`. A missing file is an empty catalog.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let stores = match read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).map_err(|source| CatalogError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no catalog yet");
                Vec::new()
            }
            Err(source) => return Err(CatalogError::Read { path, source }),
        };

        Ok(Self { path, stores })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn all(&self) -> &[StoreRecord] {
        &self.stores
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Replaces every store with `rows`, keeping visited flags by store name.
    ///
    /// Rows whose address does not mention `city` are dropped. Nothing is
    /// changed if the new catalog cannot be written.
    pub fn reload(&mut self, rows: Vec<ListingRow>, city: &str) -> Result<ReloadSummary> {
        let mut visited: HashMap<&str, bool> = HashMap::new();
        for store in &self.stores {
            *visited.entry(store.name.as_str()).or_default() |= store.visited;
        }

        let total = rows.len();
        let mut stores: Vec<StoreRecord> = rows
            .into_par_iter()
            .filter(|x| x.in_city(city))
            .map(|row| {
                let address = row.address.unwrap_or_default();
                let location = address::parse(&address);
                StoreRecord::new(row.name, address, location)
                    .with_coordinates(row.latitude, row.longitude)
            })
            .collect();

        let mut summary = ReloadSummary {
            imported: stores.len(),
            dropped: total - stores.len(),
            ..Default::default()
        };
        for store in &mut stores {
            if visited.get(store.name.as_str()).copied().unwrap_or(false) {
                store.visited = true;
                summary.restored += 1;
            }
            if !store.is_classified() {
                summary.unclassified += 1;
            }
        }

        self.replace(stores, "reload")?;
        info!(
            imported = summary.imported,
            dropped = summary.dropped,
            restored = summary.restored,
            unclassified = summary.unclassified,
            "catalog reloaded"
        );
        Ok(summary)
    }

    /// Overwrites neighborhoods with the containing boundary's name. Stores
    /// outside every boundary, or without coordinates, keep what they had.
    pub fn refine(&mut self, resolver: &SpatialResolver) -> Result<RefineSummary> {
        let found: Vec<Option<Option<String>>> = self
            .stores
            .par_iter()
            .progress_with(progress_bar(self.stores.len() as u64))
            .map(|store| {
                let (latitude, longitude) = store.coordinates()?;
                Some(
                    resolver
                        .locate(latitude, longitude, &store.address)
                        .map(str::to_string),
                )
            })
            .collect();

        let mut summary = RefineSummary::default();
        let mut stores = self.stores.clone();
        for (store, found) in stores.iter_mut().zip(found) {
            match found {
                None => summary.skipped += 1,
                Some(None) => {
                    debug!(
                        name = %store.name,
                        address = %store.address,
                        "no containing boundary"
                    );
                    summary.unmatched += 1;
                }
                Some(Some(neighborhood)) => {
                    store.neighborhood = Some(neighborhood);
                    summary.matched += 1;
                }
            }
        }

        if summary.matched > 0 {
            self.replace(stores, "refine")?;
        }
        info!(
            matched = summary.matched,
            unmatched = summary.unmatched,
            skipped = summary.skipped,
            "neighborhoods refined"
        );
        Ok(summary)
    }

    /// Sets the visited flag on every store with `id` and returns how many
    /// there were. An unknown id changes nothing.
    pub fn set_visited(&mut self, id: StoreId, visited: bool) -> Result<usize> {
        let mut stores = self.stores.clone();
        let mut count = 0;
        for store in stores.iter_mut().filter(|x| x.id == id) {
            store.visited = visited;
            count += 1;
        }

        if count > 0 {
            self.replace(stores, "update")?;
        }
        debug!(%id, visited, count, "visited flag set");
        Ok(count)
    }

    fn replace(&mut self, stores: Vec<StoreRecord>, operation: &'static str) -> Result<()> {
        write_atomic(&self.path, &stores, operation)?;
        self.stores = stores;
        Ok(())
    }
}

fn write_atomic(path: &Path, stores: &[StoreRecord], operation: &'static str) -> Result<()> {
    let failed = |source: io::Error| CatalogError::Write {
        operation,
        path: path.to_path_buf(),
        source,
    };

    let mut json = serde_json::to_string_pretty(stores)?;
    json.push('\n');

    let dir = match path.parent() {
        Some(x) if !x.as_os_str().is_empty() => x,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(failed)?;

    let mut file = NamedTempFile::new_in(dir).map_err(failed)?;
    file.write_all(json.as_bytes()).map_err(failed)?;
    file.as_file().sync_all().map_err(failed)?;
    file.persist(path).map_err(|x| failed(x.error))?;
    Ok(())
}
