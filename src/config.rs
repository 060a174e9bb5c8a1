// Configuration loading.
// Resolves the API token and generator settings from the environment and an optional .env file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{PinpageError, Result};

/// Environment variable holding the GitHub bearer token.
pub const TOKEN_VAR: &str = "GRAPHQL_GITHUB_TOKEN";

pub const DEFAULT_LOGIN: &str = "lycuid";
pub const DEFAULT_PINNED_LIMIT: u32 = 100;
pub const DEFAULT_LANGUAGE_LIMIT: u32 = 1;
pub const DEFAULT_CACHE_FILE: &str = "cache.json";
pub const DEFAULT_OUTPUT_FILE: &str = "public/index.html";
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Resolved key/value configuration, environment first, .env file second.
pub type EnvMap = BTreeMap<String, String>;

/// Merge the inherited environment with an optional `.env`-style file.
///
/// Keys already present in `env` win; the file only fills gaps. A missing
/// file is not an error.
pub fn load_env_map<I>(env: I, dotenv_path: &Path) -> Result<EnvMap>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut map: EnvMap = env.into_iter().collect();

    if !dotenv_path.exists() {
        debug!("no env file at {}", dotenv_path.display());
        return Ok(map);
    }

    debug!("reading env file {}", dotenv_path.display());
    let entries = dotenv::from_path_iter(dotenv_path)
        .map_err(|e| PinpageError::Config(format!("{}: {}", dotenv_path.display(), e)))?;

    for entry in entries {
        let (key, value) = entry
            .map_err(|e| PinpageError::Config(format!("{}: {}", dotenv_path.display(), e)))?;
        map.entry(key).or_insert(value);
    }

    Ok(map)
}

/// Generator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bearer token; absence surfaces later as an authorization failure.
    pub token: Option<String>,
    /// Account whose pinned repositories are rendered.
    pub login: String,
    /// Upper bound on pinned items per request.
    pub pinned_limit: u32,
    /// Upper bound on languages listed per repository.
    pub language_limit: u32,
    pub cache_path: PathBuf,
    pub output_path: PathBuf,
    pub graphql_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            login: DEFAULT_LOGIN.to_string(),
            pinned_limit: DEFAULT_PINNED_LIMIT,
            language_limit: DEFAULT_LANGUAGE_LIMIT,
            cache_path: PathBuf::from(DEFAULT_CACHE_FILE),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
        }
    }
}

impl Config {
    /// Build configuration from a resolved environment map.
    ///
    /// Recognized keys:
    /// - GRAPHQL_GITHUB_TOKEN (optional here, required for a live fetch)
    /// - PINPAGE_LOGIN (default: lycuid)
    /// - PINPAGE_PINNED_LIMIT (default: 100)
    /// - PINPAGE_LANGUAGE_LIMIT (default: 1)
    /// - PINPAGE_CACHE_FILE (default: cache.json)
    /// - PINPAGE_OUTPUT_FILE (default: public/index.html)
    /// - PINPAGE_GRAPHQL_URL (default: https://api.github.com/graphql)
    pub fn from_map(map: &EnvMap) -> Result<Self> {
        let defaults = Self::default();

        let token = map
            .get(TOKEN_VAR)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(Self {
            token,
            login: non_empty(map, "PINPAGE_LOGIN").unwrap_or(defaults.login),
            pinned_limit: limit(map, "PINPAGE_PINNED_LIMIT")?.unwrap_or(defaults.pinned_limit),
            language_limit: limit(map, "PINPAGE_LANGUAGE_LIMIT")?
                .unwrap_or(defaults.language_limit),
            cache_path: non_empty(map, "PINPAGE_CACHE_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_path),
            output_path: non_empty(map, "PINPAGE_OUTPUT_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
            graphql_url: non_empty(map, "PINPAGE_GRAPHQL_URL").unwrap_or(defaults.graphql_url),
        })
    }
}

fn non_empty(map: &EnvMap, key: &str) -> Option<String> {
    map.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn limit(map: &EnvMap, key: &str) -> Result<Option<u32>> {
    let Some(raw) = non_empty(map, key) else {
        return Ok(None);
    };
    match raw.parse::<u32>() {
        Ok(0) => Err(PinpageError::Config(format!("{key} must be at least 1"))),
        Ok(n) => Ok(Some(n)),
        Err(_) => Err(PinpageError::Config(format!(
            "{key} must be a positive integer, got {raw:?}"
        ))),
    }
}
