// Read-through loading of pinned repositories.
// Serves from the cache file when possible and fetches only on a miss.

use std::io;
use std::path::PathBuf;

use tracing::info;

use crate::cache;
use crate::error::Result;
use crate::github::RepositorySource;
use crate::record::{RepositoryRecord, normalize_all};

/// Cache-first loader in front of a repository source.
pub struct Pipeline<S> {
    cache_path: PathBuf,
    source: S,
}

impl<S: RepositorySource> Pipeline<S> {
    pub fn new(cache_path: impl Into<PathBuf>, source: S) -> Self {
        Self {
            cache_path: cache_path.into(),
            source,
        }
    }

    /// Load the records to render.
    ///
    /// On a miss the fetched list is written to the cache and read back, so
    /// rendered data has always been through the same JSON round trip.
    pub async fn load(&self) -> Result<Vec<RepositoryRecord>> {
        match cache::read_cache(&self.cache_path)? {
            Some(records) if !records.is_empty() => {
                info!(
                    "Using {} cached repositories from {}",
                    records.len(),
                    self.cache_path.display()
                );
                return Ok(records);
            }
            Some(_) => info!("Cache {} is empty, refetching", self.cache_path.display()),
            None => info!("No cache at {}", self.cache_path.display()),
        }

        let raw = self.source.fetch().await?;
        let records = normalize_all(raw)?;

        info!("Writing {} repositories to cache", records.len());
        cache::write_cache(&self.cache_path, &records)?;

        cache::read_cache(&self.cache_path)?.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("cache {} vanished after write", self.cache_path.display()),
            )
            .into()
        })
    }
}
