// Cache store for the pinned repository list.
// A single JSON array on disk, written atomically and read back in full.

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::{PinpageError, Result};
use crate::record::RepositoryRecord;

/// Read the cached repository list.
///
/// Returns `None` when the file does not exist. A file that is not a JSON
/// array of records is reported as corrupt rather than treated as a miss.
pub fn read_cache(path: &Path) -> Result<Option<Vec<RepositoryRecord>>> {
    let Some(contents) = read_text(path)? else {
        debug!("cache file {} not found", path.display());
        return Ok(None);
    };

    debug!("reading from cache file {}", path.display());
    let records: Vec<RepositoryRecord> =
        serde_json::from_str(&contents).map_err(|source| PinpageError::CacheCorrupt {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(records))
}

/// Overwrite the cache with `records`.
pub fn write_cache(path: &Path, records: &[RepositoryRecord]) -> Result<()> {
    debug!("writing {} records to cache file {}", records.len(), path.display());
    let json = serde_json::to_string_pretty(records)?;
    write_text(path, &json)
}

/// Replace `path` with `text` via a sibling temp file and rename, creating the
/// parent directory. Backs both the cache file and the generated page, so a
/// failed write never leaves either half-written.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    // `Path::new("cache.json").parent()` is `Some("")`.
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    // Write atomically via temp file
    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(text.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Read the cache file's text; an absent file is a miss, not an error.
fn read_text(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    Ok(Some(contents))
}
