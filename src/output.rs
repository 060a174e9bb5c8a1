// Output generation.
// Resolves the renderer up front, loads repositories and writes the page file or a rendered template.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cache;
use crate::config::Config;
use crate::error::Result;
use crate::github::RepositorySource;
use crate::pipeline::Pipeline;
use crate::render::content::Profile;
use crate::render::{PageRenderer, Renderer, TemplateRenderer};

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generated {
    /// The built-in page was written to this file.
    Page(PathBuf),
    /// This template was rendered to the output stream.
    Template(PathBuf),
}

impl Generated {
    pub fn action(&self) -> &'static str {
        match self {
            Generated::Page(_) => "wrote",
            Generated::Template(_) => "rendered",
        }
    }

    pub fn target(&self) -> &Path {
        match self {
            Generated::Page(path) | Generated::Template(path) => path,
        }
    }
}

/// Render pinned repositories either to the configured page file or, when a
/// template is given, to `out`.
///
/// The template is read and parsed before any cache or network access, and
/// nothing is written until rendering has succeeded.
pub async fn generate<S, W>(
    config: &Config,
    template: Option<&Path>,
    source: S,
    out: &mut W,
) -> Result<Generated>
where
    S: RepositorySource,
    W: Write,
{
    let template = match template {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            let renderer =
                TemplateRenderer::new(&text)?.with_binding("login", config.login.as_str());
            Some((path.to_path_buf(), renderer))
        }
        None => None,
    };

    let repos = Pipeline::new(&config.cache_path, source).load().await?;

    match template {
        Some((path, renderer)) => {
            let html = renderer.render(&repos)?;
            out.write_all(html.as_bytes())?;
            out.flush()?;
            Ok(Generated::Template(path))
        }
        None => {
            let html = PageRenderer::new(Profile::for_login(&config.login)).render(&repos)?;
            cache::write_text(&config.output_path, &html)?;
            Ok(Generated::Page(config.output_path.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PinpageError;
    use crate::github::{LanguageConnection, LanguageNode, RawRepository};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    /// Counts fetches; fails them when `fail` is set.
    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl<'a> RepositorySource for &'a CountingSource {
        async fn fetch(&self) -> Result<Vec<RawRepository>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(PinpageError::Unauthorized);
            }
            Ok(vec![RawRepository {
                name: "foo".to_string(),
                url: "https://x/foo".to_string(),
                description: Some("bar".to_string()),
                languages: LanguageConnection {
                    nodes: vec![LanguageNode {
                        name: "Go".to_string(),
                    }],
                },
            }])
        }
    }

    fn config(dir: &TempDir) -> Config {
        Config {
            cache_path: dir.path().join("cache.json"),
            output_path: dir.path().join("public").join("index.html"),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_page_written_with_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir);
        let source = CountingSource::ok();
        let mut out = Vec::new();

        let generated = generate(&config, None, &source, &mut out).await.unwrap();

        assert_eq!(generated, Generated::Page(config.output_path.clone()));
        assert_eq!(generated.action(), "wrote");
        let html = fs::read_to_string(&config.output_path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"href="https://x/foo""#));
        assert!(!html.contains('\n'));
        assert!(out.is_empty());
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_fetch_error_leaves_existing_page_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir);
        cache::write_text(&config.output_path, "<p>previous</p>").unwrap();
        let source = CountingSource::failing();
        let mut out = Vec::new();

        let err = generate(&config, None, &source, &mut out)
            .await
            .unwrap_err();

        assert!(err.is_fetch_error());
        assert_eq!(
            fs::read_to_string(&config.output_path).unwrap(),
            "<p>previous</p>"
        );
        assert!(!config.cache_path.exists());
    }

    #[tokio::test]
    async fn test_fetch_error_writes_no_page() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir);
        let source = CountingSource::failing();
        let mut out = Vec::new();

        assert!(generate(&config, None, &source, &mut out).await.is_err());
        assert!(!config.output_path.exists());
    }

    #[tokio::test]
    async fn test_template_output_is_only_the_document() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir);
        let template_path = temp_dir.path().join("page.tpl");
        fs::write(
            &template_path,
            "<h1>{{ login }}</h1>{% for repo in repositories %}<a href=\"{{ repo.url }}\">{{ repo.name }}</a>{% endfor %}",
        )
        .unwrap();
        let source = CountingSource::ok();
        let mut out = Vec::new();

        let generated = generate(&config, Some(template_path.as_path()), &source, &mut out)
            .await
            .unwrap();

        assert_eq!(generated, Generated::Template(template_path));
        assert_eq!(generated.action(), "rendered");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<h1>lycuid</h1><a href=\"https://x/foo\">foo</a>"
        );
        assert!(!config.output_path.exists());
    }

    #[tokio::test]
    async fn test_missing_template_does_not_fetch() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir);
        let source = CountingSource::ok();
        let mut out = Vec::new();

        let err = generate(
            &config,
            Some(temp_dir.path().join("missing.tpl").as_path()),
            &source,
            &mut out,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, PinpageError::Io(_)));
        assert_eq!(source.calls(), 0);
        assert!(!config.cache_path.exists());
    }

    #[tokio::test]
    async fn test_invalid_template_does_not_fetch() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir);
        let template_path = temp_dir.path().join("bad.tpl");
        fs::write(&template_path, "{% for repo in repositories %}unclosed").unwrap();
        let source = CountingSource::ok();
        let mut out = Vec::new();

        let err = generate(&config, Some(template_path.as_path()), &source, &mut out)
            .await
            .unwrap_err();

        assert!(matches!(err, PinpageError::Template(_)));
        assert_eq!(source.calls(), 0);
        assert!(!config.cache_path.exists());
        assert!(out.is_empty());
    }
}
