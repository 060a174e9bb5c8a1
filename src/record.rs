// Display-ready repository records.
// Flattens raw GraphQL nodes into the shape stored in the cache and rendered on the page.

use serde::{Deserialize, Serialize};

use crate::error::{PinpageError, Result};
use crate::github::RawRepository;

/// One pinned repository, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub name: String,
    pub url: String,
    pub description: String,
    /// Dominant language first.
    pub languages: Vec<String>,
}

impl RepositoryRecord {
    /// Languages as a single display string.
    pub fn languages_joined(&self) -> String {
        self.languages.join(", ")
    }
}

/// Flatten `languages.nodes[].name` into a plain list, preserving order.
pub fn normalize(raw: RawRepository) -> Result<RepositoryRecord> {
    if raw.name.trim().is_empty() {
        return Err(PinpageError::Shape(format!(
            "repository at {:?} has an empty name",
            raw.url
        )));
    }

    Ok(RepositoryRecord {
        name: raw.name,
        url: raw.url,
        description: raw.description.unwrap_or_default(),
        languages: raw.languages.nodes.into_iter().map(|n| n.name).collect(),
    })
}

pub fn normalize_all(raw: Vec<RawRepository>) -> Result<Vec<RepositoryRecord>> {
    raw.into_iter().map(normalize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{LanguageConnection, LanguageNode};

    fn raw(name: &str, languages: &[&str]) -> RawRepository {
        RawRepository {
            name: name.to_string(),
            url: format!("https://x/{}", name),
            description: Some("bar".to_string()),
            languages: LanguageConnection {
                nodes: languages
                    .iter()
                    .map(|l| LanguageNode {
                        name: l.to_string(),
                    })
                    .collect(),
            },
        }
    }

    #[test]
    fn test_normalize_flattens_languages_in_order() {
        let record = normalize(raw("foo", &["Go", "Rust"])).unwrap();
        assert_eq!(record.languages, vec!["Go", "Rust"]);
        assert_eq!(record.languages_joined(), "Go, Rust");
        assert_eq!(record.url, "https://x/foo");
    }

    #[test]
    fn test_normalize_empty_languages() {
        let record = normalize(raw("foo", &[])).unwrap();
        assert!(record.languages.is_empty());
        assert_eq!(record.languages_joined(), "");
    }

    #[test]
    fn test_missing_description_becomes_empty() {
        let mut repo = raw("foo", &["C"]);
        repo.description = None;
        assert_eq!(normalize(repo).unwrap().description, "");
    }

    #[test]
    fn test_empty_name_is_shape_error() {
        let err = normalize_all(vec![raw("ok", &[]), raw(" ", &[])]).unwrap_err();
        assert!(matches!(err, PinpageError::Shape(_)));
    }
}
