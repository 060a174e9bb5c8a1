// Pinned repository fetching.
// Typed query methods on the client plus the source the pipeline reads from.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::Result;

use super::client::GraphQlClient;
use super::query::pinned_repositories_query;
use super::types::{RawRepository, parse_pinned_nodes};

impl GraphQlClient {
    /// Fetch the pinned repositories of `login` with a single request.
    pub async fn fetch_repositories(
        &self,
        login: &str,
        pinned_limit: u32,
        language_limit: u32,
    ) -> Result<Vec<RawRepository>> {
        let query = pinned_repositories_query(login, pinned_limit, language_limit);
        let body = self.post_query(&query).await?;
        let repos = parse_pinned_nodes(&body)?;
        debug!("received {} pinned items for {}", repos.len(), login);
        Ok(repos)
    }
}

/// Where the pipeline gets fresh repository data on a cache miss.
#[async_trait]
pub trait RepositorySource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<RawRepository>>;
}

/// A client bound to one account and its fetch limits.
pub struct PinnedRepositories {
    client: GraphQlClient,
    login: String,
    pinned_limit: u32,
    language_limit: u32,
}

impl PinnedRepositories {
    pub fn new(client: GraphQlClient, login: &str, pinned_limit: u32, language_limit: u32) -> Self {
        Self {
            client,
            login: login.to_string(),
            pinned_limit,
            language_limit,
        }
    }
}

#[async_trait]
impl RepositorySource for PinnedRepositories {
    async fn fetch(&self) -> Result<Vec<RawRepository>> {
        info!("Making HTTP request to {}", self.client.endpoint());
        self.client
            .fetch_repositories(&self.login, self.pinned_limit, self.language_limit)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PinpageError;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn pinned_body() -> serde_json::Value {
        json!({
            "data": { "user": { "pinnedItems": { "nodes": [
                {
                    "name": "foo",
                    "url": "https://x/foo",
                    "description": "bar",
                    "languages": { "nodes": [{ "name": "Go" }, { "name": "Rust" }] }
                }
            ] } } }
        })
    }

    #[tokio::test]
    async fn test_fetch_sends_authenticated_post() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(header("authorization", "Bearer secret"))
            .and(header("content-type", "application/json"))
            .and(body_string_contains("pinnedItems(first: 4, types: REPOSITORY)"))
            .respond_with(ResponseTemplate::new(200).set_body_json(pinned_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = GraphQlClient::new(&format!("{}/graphql", server.uri()), Some("secret")).unwrap();
        let source = PinnedRepositories::new(client, "lycuid", 4, 10);

        let repos = source.fetch().await.unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].name, "foo");
        assert_eq!(repos[0].languages.nodes.len(), 2);
    }

    #[tokio::test]
    async fn test_request_body_is_query_object() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains(r#"{"query":"query {"#))
            .respond_with(ResponseTemplate::new(200).set_body_json(pinned_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = GraphQlClient::new(&server.uri(), Some("secret")).unwrap();
        client.fetch_repositories("lycuid", 100, 1).await.unwrap();
    }

    #[tokio::test]
    async fn test_unauthorized_without_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = GraphQlClient::new(&server.uri(), None).unwrap();
        let err = client.fetch_repositories("lycuid", 100, 1).await.unwrap_err();
        assert!(matches!(err, PinpageError::MissingToken));

        let client = GraphQlClient::new(&server.uri(), Some("expired")).unwrap();
        let err = client.fetch_repositories("lycuid", 100, 1).await.unwrap_err();
        assert!(matches!(err, PinpageError::Unauthorized));
    }

    #[tokio::test]
    async fn test_server_error_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = GraphQlClient::new(&server.uri(), Some("secret")).unwrap();
        match client.fetch_repositories("lycuid", 100, 1).await {
            Err(PinpageError::Api { status, body }) => {
                assert_eq!(status, 502);
                assert_eq!(body, "bad gateway");
            }
            other => panic!("expected Api error, got {:?}", other.map(|r| r.len())),
        }
    }
}
